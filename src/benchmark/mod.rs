//! 基准测试驱动
//!
//! 对每个 (样本规模, 重复次数) 依次执行 读取 → 构图 → 最短路径，
//! 记录耗时与常驻内存差值，并按样本规模汇总统计。

mod memory;
pub mod stats;

pub use memory::{MemoryProbe, ProcessMemory};

use crate::algorithm::find_shortest_path;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::import::read_edges;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info};

/// 样本规模：读取的边数上限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSampleSize", into = "RawSampleSize")]
pub enum SampleSize {
    /// 最多读取 n 条边（n >= 1）
    Limit(usize),
    /// 读取全部边
    All,
}

impl SampleSize {
    /// 传给边表读取器的上限
    pub fn limit(&self) -> Option<usize> {
        match self {
            SampleSize::Limit(n) => Some(*n),
            SampleSize::All => None,
        }
    }
}

impl fmt::Display for SampleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleSize::Limit(n) => write!(f, "{}", n),
            SampleSize::All => write!(f, "ALL"),
        }
    }
}

impl FromStr for SampleSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if ["all", "none", "*"].iter().any(|k| s.eq_ignore_ascii_case(k)) {
            return Ok(SampleSize::All);
        }
        match s.parse::<usize>() {
            Ok(n) if n > 0 => Ok(SampleSize::Limit(n)),
            _ => Err(Error::InvalidSampleSize(s.to_string())),
        }
    }
}

/// JSON 中的样本规模：正整数或 "ALL"
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSampleSize {
    Count(usize),
    Text(String),
}

impl TryFrom<RawSampleSize> for SampleSize {
    type Error = Error;

    fn try_from(raw: RawSampleSize) -> Result<Self> {
        match raw {
            RawSampleSize::Count(0) => Err(Error::InvalidSampleSize("0".to_string())),
            RawSampleSize::Count(n) => Ok(SampleSize::Limit(n)),
            RawSampleSize::Text(s) => s.parse(),
        }
    }
}

impl From<SampleSize> for RawSampleSize {
    fn from(size: SampleSize) -> Self {
        match size {
            SampleSize::Limit(n) => RawSampleSize::Count(n),
            SampleSize::All => RawSampleSize::Text("ALL".to_string()),
        }
    }
}

/// 默认样本规模序列
pub fn default_sample_sizes() -> Vec<SampleSize> {
    [
        1, 1000, 2000, 5000, 7000, 10000, 20000, 50000, 70000, 100000, 150000, 200000, 250000,
    ]
    .into_iter()
    .map(SampleSize::Limit)
    .chain(std::iter::once(SampleSize::All))
    .collect()
}

fn default_repetitions() -> usize {
    5
}

/// 基准测试配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// 边表文件
    pub input: PathBuf,
    /// 起点
    pub start: String,
    /// 终点
    pub end: String,
    /// 样本规模
    #[serde(default = "default_sample_sizes")]
    pub sample_sizes: Vec<SampleSize>,
    /// 每个规模的重复次数
    #[serde(default = "default_repetitions")]
    pub repetitions: usize,
}

impl BenchmarkConfig {
    pub fn new(input: impl Into<PathBuf>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            start: start.into(),
            end: end.into(),
            sample_sizes: default_sample_sizes(),
            repetitions: default_repetitions(),
        }
    }

    pub fn with_sample_sizes(mut self, sizes: Vec<SampleSize>) -> Self {
        self.sample_sizes = sizes;
        self
    }

    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// 从 JSON 文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::ConfigError(format!("无法读取 {}: {}", path.as_ref().display(), e))
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// 校验输入文件、起点、终点非空
    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(Error::ConfigError("缺少输入文件".to_string()));
        }
        if self.start.is_empty() {
            return Err(Error::ConfigError("缺少起点".to_string()));
        }
        if self.end.is_empty() {
            return Err(Error::ConfigError("缺少终点".to_string()));
        }
        Ok(())
    }
}

/// 单次运行结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSample {
    /// 最短路径代价，不可达为 +inf（JSON 中为 null）
    #[serde(with = "crate::algorithm::cost_serde")]
    pub distance: f64,
    pub path: Vec<String>,
    /// 执行时间（秒）
    pub execution_time: f64,
    /// 常驻内存差值（MB）
    pub memory_delta: f64,
    pub vertex_count: usize,
    pub edge_count: usize,
}

/// 单个样本规模的汇总统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeReport {
    pub sample_size: SampleSize,
    pub repetitions: usize,
    pub min_time: f64,
    pub max_time: f64,
    pub mean_time: f64,
    pub median_time: f64,
    /// 少于两次重复时为空
    pub stdev_time: Option<f64>,
    pub variance_time: Option<f64>,
    pub min_memory: f64,
    pub max_memory: f64,
    pub mean_memory: f64,
    pub mean_vertices: f64,
    pub mean_edges: f64,
}

impl SizeReport {
    /// 汇总一组样本，样本为空时返回 `None`
    pub fn from_samples(sample_size: SampleSize, samples: &[BenchmarkSample]) -> Option<Self> {
        let times: Vec<f64> = samples.iter().map(|s| s.execution_time).collect();
        let mems: Vec<f64> = samples.iter().map(|s| s.memory_delta).collect();
        let vertices: Vec<f64> = samples.iter().map(|s| s.vertex_count as f64).collect();
        let edges: Vec<f64> = samples.iter().map(|s| s.edge_count as f64).collect();

        Some(Self {
            sample_size,
            repetitions: samples.len(),
            min_time: stats::min(&times)?,
            max_time: stats::max(&times)?,
            mean_time: stats::mean(&times)?,
            median_time: stats::median(&times)?,
            stdev_time: stats::stdev(&times),
            variance_time: stats::variance(&times),
            min_memory: stats::min(&mems)?,
            max_memory: stats::max(&mems)?,
            mean_memory: stats::mean(&mems)?,
            mean_vertices: stats::mean(&vertices)?,
            mean_edges: stats::mean(&edges)?,
        })
    }
}

/// 单个样本规模的全部结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeRun {
    pub samples: Vec<BenchmarkSample>,
    pub report: SizeReport,
}

/// 基准测试报告，按请求的样本规模顺序排列
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub start: String,
    pub end: String,
    pub runs: Vec<SizeRun>,
}

impl BenchmarkReport {
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn reports(&self) -> impl Iterator<Item = &SizeReport> {
        self.runs.iter().map(|r| &r.report)
    }
}

/// 基准测试驱动
pub struct Benchmark<P = ProcessMemory> {
    config: BenchmarkConfig,
    probe: P,
}

impl Benchmark<ProcessMemory> {
    /// 使用进程内存探针创建驱动
    pub fn new(config: BenchmarkConfig) -> Self {
        Self::with_probe(config, ProcessMemory)
    }
}

impl<P: MemoryProbe> Benchmark<P> {
    pub fn with_probe(config: BenchmarkConfig, probe: P) -> Self {
        Self { config, probe }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// 顺序执行全部规模与重复
    pub fn run(&self) -> Result<BenchmarkReport> {
        self.config.validate()?;

        let mut report = BenchmarkReport {
            start: self.config.start.clone(),
            end: self.config.end.clone(),
            runs: Vec::new(),
        };

        for &size in &self.config.sample_sizes {
            let mut samples = Vec::with_capacity(self.config.repetitions);
            for rep in 0..self.config.repetitions {
                let sample = self.run_once(size)?;
                debug!(
                    %size,
                    rep,
                    time = sample.execution_time,
                    memory = sample.memory_delta,
                    distance = sample.distance,
                    "单次运行完成"
                );
                samples.push(sample);
            }

            let Some(size_report) = SizeReport::from_samples(size, &samples) else {
                continue;
            };
            info!(
                %size,
                mean_time = size_report.mean_time,
                mean_memory = size_report.mean_memory,
                vertices = size_report.mean_vertices,
                edges = size_report.mean_edges,
                "样本规模统计完成"
            );
            report.runs.push(SizeRun {
                samples,
                report: size_report,
            });
        }

        Ok(report)
    }

    /// 读取、构图并计时一次最短路径查询
    fn run_once(&self, size: SampleSize) -> Result<BenchmarkSample> {
        let edges = read_edges(&self.config.input, size.limit())?;
        let graph = Graph::from_edges(edges);
        let vertex_count = graph.vertex_count();
        let edge_count = graph.edge_count();

        let mem_before = self.probe.resident_mb();
        let timer = Instant::now();
        let result = find_shortest_path(&graph, &self.config.start, &self.config.end);
        let elapsed = timer.elapsed();
        let mem_after = self.probe.resident_mb();

        let memory_delta = match (mem_before, mem_after) {
            (Some(before), Some(after)) => after - before,
            _ => 0.0,
        };

        Ok(BenchmarkSample {
            distance: result.cost,
            path: result.path,
            execution_time: elapsed.as_secs_f64(),
            memory_delta,
            vertex_count,
            edge_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// 每次采样递增 0.5 MB
    struct SteppingProbe {
        current: Cell<f64>,
    }

    impl MemoryProbe for SteppingProbe {
        fn resident_mb(&self) -> Option<f64> {
            let value = self.current.get();
            self.current.set(value + 0.5);
            Some(value)
        }
    }

    struct NoProbe;

    impl MemoryProbe for NoProbe {
        fn resident_mb(&self) -> Option<f64> {
            None
        }
    }

    fn edge_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const CHAIN: &str = "A B 1.0\nB C 2.0\nA C 5.0\nC D 1.0\n";

    #[test]
    fn test_sample_size_parsing() {
        assert_eq!("10".parse::<SampleSize>().unwrap(), SampleSize::Limit(10));
        assert_eq!("ALL".parse::<SampleSize>().unwrap(), SampleSize::All);
        assert_eq!("none".parse::<SampleSize>().unwrap(), SampleSize::All);
        assert!("0".parse::<SampleSize>().is_err());
        assert!("-3".parse::<SampleSize>().is_err());
        assert_eq!(SampleSize::All.to_string(), "ALL");
        assert_eq!(SampleSize::Limit(7).to_string(), "7");
    }

    #[test]
    fn test_config_from_json() {
        let file = edge_file(
            r#"{"input": "edges.txt", "start": "v1", "end": "v2", "sample_sizes": [1, 100, "all"]}"#,
        );

        let config = BenchmarkConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.start, "v1");
        assert_eq!(config.repetitions, 5);
        assert_eq!(
            config.sample_sizes,
            vec![SampleSize::Limit(1), SampleSize::Limit(100), SampleSize::All]
        );
    }

    #[test]
    fn test_config_rejects_zero_size() {
        let file = edge_file(r#"{"input": "e.txt", "start": "a", "end": "b", "sample_sizes": [0]}"#);
        assert!(matches!(
            BenchmarkConfig::from_json_file(file.path()),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_config_rejects_missing_input() {
        let file = edge_file(r#"{"input": "", "start": "a", "end": "b"}"#);
        assert!(matches!(
            BenchmarkConfig::from_json_file(file.path()),
            Err(Error::ConfigError(_))
        ));

        let config = BenchmarkConfig::new("", "a", "b");
        assert!(matches!(
            Benchmark::with_probe(config, NoProbe).run(),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_unreachable_sample_json_round_trip() {
        let sample = BenchmarkSample {
            distance: f64::INFINITY,
            path: Vec::new(),
            execution_time: 0.5,
            memory_delta: 0.25,
            vertex_count: 2,
            edge_count: 1,
        };

        let json = serde_json::to_string(&sample).unwrap();
        assert!(json.contains(r#""distance":null"#));
        let back: BenchmarkSample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample);
    }

    #[test]
    fn test_report_with_unreachable_run_reloads() {
        let file = edge_file(CHAIN);
        let config = BenchmarkConfig::new(file.path(), "A", "Z")
            .with_sample_sizes(vec![SampleSize::Limit(2)])
            .with_repetitions(2);

        let report = Benchmark::with_probe(config, NoProbe).run().unwrap();
        let json = serde_json::to_string_pretty(&report).unwrap();
        let back: BenchmarkReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.runs.len(), 1);
        assert_eq!(back.runs[0].report.sample_size, SampleSize::Limit(2));
        for sample in &back.runs[0].samples {
            assert_eq!(sample.distance, f64::INFINITY);
            assert!(sample.path.is_empty());
        }
    }

    #[test]
    fn test_default_sizes_end_unbounded() {
        let sizes = default_sample_sizes();
        assert_eq!(sizes.len(), 14);
        assert_eq!(sizes.first(), Some(&SampleSize::Limit(1)));
        assert_eq!(sizes.last(), Some(&SampleSize::All));
    }

    #[test]
    fn test_run_aggregates_per_size() {
        let file = edge_file(CHAIN);
        let config = BenchmarkConfig::new(file.path(), "A", "C")
            .with_sample_sizes(vec![SampleSize::Limit(1), SampleSize::Limit(2), SampleSize::All])
            .with_repetitions(3);
        let probe = SteppingProbe {
            current: Cell::new(100.0),
        };

        let report = Benchmark::with_probe(config, probe).run().unwrap();
        assert_eq!(report.runs.len(), 3);

        // 只读一条边时 C 不在图中
        let first = &report.runs[0];
        assert_eq!(first.report.sample_size, SampleSize::Limit(1));
        assert!(first.samples.iter().all(|s| s.distance == f64::INFINITY));
        assert_eq!(first.report.mean_vertices, 2.0);
        assert_eq!(first.report.mean_edges, 1.0);

        let second = &report.runs[1];
        assert!(second.samples.iter().all(|s| s.distance == 3.0));
        assert_eq!(second.samples[0].path, vec!["A", "B", "C"]);

        let all = &report.runs[2].report;
        assert_eq!(all.repetitions, 3);
        assert_eq!(all.mean_vertices, 4.0);
        assert_eq!(all.mean_edges, 4.0);
        assert_eq!(all.min_memory, 0.5);
        assert_eq!(all.max_memory, 0.5);
        assert!(all.stdev_time.is_some());
        assert!(all.variance_time.is_some());
        assert!(all.min_time <= all.median_time && all.median_time <= all.max_time);
    }

    #[test]
    fn test_single_repetition_has_no_spread() {
        let file = edge_file(CHAIN);
        let config = BenchmarkConfig::new(file.path(), "A", "D")
            .with_sample_sizes(vec![SampleSize::All])
            .with_repetitions(1);

        let report = Benchmark::with_probe(config, NoProbe).run().unwrap();
        let size_report = &report.runs[0].report;
        assert_eq!(size_report.stdev_time, None);
        assert_eq!(size_report.variance_time, None);
        assert_eq!(size_report.mean_memory, 0.0);
        assert_eq!(report.runs[0].samples[0].distance, 4.0);
    }

    #[test]
    fn test_empty_sizes_or_zero_repetitions() {
        let file = edge_file(CHAIN);

        let no_sizes = BenchmarkConfig::new(file.path(), "A", "C").with_sample_sizes(Vec::new());
        assert!(Benchmark::with_probe(no_sizes, NoProbe).run().unwrap().is_empty());

        let no_reps = BenchmarkConfig::new(file.path(), "A", "C").with_repetitions(0);
        assert!(Benchmark::with_probe(no_reps, NoProbe).run().unwrap().is_empty());
    }

    #[test]
    fn test_parse_error_aborts_run() {
        let file = edge_file("A B 1\nB C x\n");
        let config = BenchmarkConfig::new(file.path(), "A", "C")
            .with_sample_sizes(vec![SampleSize::All])
            .with_repetitions(2);

        let err = Benchmark::with_probe(config, NoProbe).run().unwrap_err();
        assert!(matches!(err, Error::ParseError { line: 2, .. }));
    }
}
