//! pathbench 命令行工具
//!
//! 单次最短路径查询与按样本规模的基准测试

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use pathbench::algorithm::Dijkstra;
use pathbench::benchmark::{Benchmark, BenchmarkConfig, SampleSize};
use pathbench::cli::{PrintMode, Printer};
use pathbench::graph::Graph;
use pathbench::import::read_edges_with_stats;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pathbench")]
#[command(author, version, about = "无向带权图最短路径基准测试工具")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 输出格式
    #[arg(long, global = true, default_value = "table")]
    format: OutputFormat,

    /// 只输出警告和错误日志
    #[arg(long, short, global = true)]
    quiet: bool,

    /// 输出调试日志
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Vertical,
    Json,
}

impl OutputFormat {
    fn is_table(&self) -> bool {
        matches!(self, OutputFormat::Table)
    }
}

impl From<OutputFormat> for PrintMode {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Table => PrintMode::Table,
            OutputFormat::Vertical => PrintMode::Vertical,
            OutputFormat::Json => PrintMode::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 计算一次最短路径
    Path {
        /// 边表文件
        #[arg(short, long)]
        input: PathBuf,

        /// 起点
        #[arg(short, long)]
        start: String,

        /// 终点
        #[arg(short, long)]
        end: String,

        /// 最多读取的边数
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// 按样本规模重复运行并汇总统计
    Bench {
        /// JSON 配置文件，命令行参数优先
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// 边表文件
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// 起点
        #[arg(short, long)]
        start: Option<String>,

        /// 终点
        #[arg(short, long)]
        end: Option<String>,

        /// 样本规模，逗号分隔，`all` 表示不限
        #[arg(long, value_delimiter = ',')]
        sizes: Option<Vec<SampleSize>>,

        /// 每个规模的重复次数
        #[arg(short, long)]
        repetitions: Option<usize>,
    },
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pathbench={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let printer = Printer::new(cli.format.into());

    match cli.command {
        Commands::Path {
            input,
            start,
            end,
            limit,
        } => {
            let (edges, load) = read_edges_with_stats(&input, limit)
                .with_context(|| format!("读取边表失败: {}", input.display()))?;
            let graph = Graph::from_edges(edges);
            info!(
                records = load.records,
                vertices = graph.vertex_count(),
                edges = graph.edge_count(),
                "图构建完成"
            );

            let (result, stats) = Dijkstra::new(&graph).shortest_path_with_stats(&start, &end);
            print!("{}", printer.print_path(&result, &stats)?);
            if cli.format.is_table() {
                print!("{}", printer.print_stats(graph.vertex_count(), graph.edge_count()));
            }
        }

        Commands::Bench {
            config,
            input,
            start,
            end,
            sizes,
            repetitions,
        } => {
            let mut bench_config = match config {
                Some(path) => BenchmarkConfig::from_json_file(&path)
                    .with_context(|| format!("加载配置失败: {}", path.display()))?,
                None => {
                    let (Some(input), Some(start), Some(end)) =
                        (input.clone(), start.clone(), end.clone())
                    else {
                        bail!("未提供配置文件时必须指定 --input、--start 和 --end");
                    };
                    BenchmarkConfig::new(input, start, end)
                }
            };
            if let Some(input) = input {
                bench_config.input = input;
            }
            if let Some(start) = start {
                bench_config.start = start;
            }
            if let Some(end) = end {
                bench_config.end = end;
            }
            if let Some(sizes) = sizes {
                bench_config.sample_sizes = sizes;
            }
            if let Some(repetitions) = repetitions {
                bench_config.repetitions = repetitions;
            }

            info!(
                input = %bench_config.input.display(),
                start = %bench_config.start,
                end = %bench_config.end,
                sizes = bench_config.sample_sizes.len(),
                repetitions = bench_config.repetitions,
                "开始基准测试"
            );
            let report = Benchmark::new(bench_config)
                .run()
                .context("基准测试失败")?;
            print!("{}", printer.print_report(&report)?);
        }
    }

    Ok(())
}
