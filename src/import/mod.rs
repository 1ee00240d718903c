//! 边表导入模块
//!
//! 每行一条记录: `起点 终点 权重`，以空白分隔

use crate::error::{Error, Result};
use crate::graph::Edge;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, trace};

/// 导入统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// 有效记录数
    pub records: usize,
    /// 字段数不为 3 而跳过的行数
    pub skipped_lines: usize,
    /// 实际读取的行数
    pub lines_read: usize,
}

/// 从文件读取边表，最多取 `limit` 条有效记录
pub fn read_edges<P: AsRef<Path>>(path: P, limit: Option<usize>) -> Result<Vec<Edge<String>>> {
    read_edges_with_stats(path, limit).map(|(edges, _)| edges)
}

/// 从文件读取边表并返回导入统计
pub fn read_edges_with_stats<P: AsRef<Path>>(
    path: P,
    limit: Option<usize>,
) -> Result<(Vec<Edge<String>>, LoadStats)> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let (edges, stats) = load(BufReader::new(file), limit)?;
    debug!(
        path = %path.display(),
        records = stats.records,
        skipped = stats.skipped_lines,
        "边表读取完成"
    );
    Ok((edges, stats))
}

/// 从任意缓冲读取器读取边表
pub fn read_edges_from<R: BufRead>(reader: R, limit: Option<usize>) -> Result<Vec<Edge<String>>> {
    load(reader, limit).map(|(edges, _)| edges)
}

fn load<R: BufRead>(reader: R, limit: Option<usize>) -> Result<(Vec<Edge<String>>, LoadStats)> {
    let mut edges = Vec::new();
    let mut stats = LoadStats::default();

    if limit == Some(0) {
        return Ok((edges, stats));
    }

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        stats.lines_read += 1;

        match parse_line(&line, index + 1)? {
            Some(edge) => {
                edges.push(edge);
                stats.records += 1;
                if limit.is_some_and(|max| edges.len() >= max) {
                    break;
                }
            }
            None => {
                trace!(line = index + 1, "字段数不为 3，跳过");
                stats.skipped_lines += 1;
            }
        }
    }

    Ok((edges, stats))
}

/// 解析单行；字段数不为 3 时返回 `None`，权重无效时报错
fn parse_line(line: &str, line_no: usize) -> Result<Option<Edge<String>>> {
    let mut fields = line.split_whitespace();
    let (Some(source), Some(target), Some(weight), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Ok(None);
    };

    let weight = weight
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
        .ok_or_else(|| Error::ParseError {
            line: line_no,
            value: weight.to_string(),
        })?;

    Ok(Some(Edge::new(source.to_string(), target.to_string(), weight)))
}
