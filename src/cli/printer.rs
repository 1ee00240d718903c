//! 结果打印器
//!
//! 提供表格、垂直和 JSON 格式的结果输出

use crate::algorithm::{PathResult, SearchStats};
use crate::benchmark::{BenchmarkReport, SizeReport};
use prettytable::{format, row, Cell, Row, Table};
use serde::Serialize;
use std::fmt::Display;

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintMode {
    /// 表格模式
    #[default]
    Table,
    /// 垂直模式，每个样本规模一个块
    Vertical,
    /// JSON
    Json,
}

/// 结果打印器
#[derive(Default)]
pub struct Printer {
    mode: PrintMode,
}

const REPORT_COLUMNS: [&str; 12] = [
    "sample_size",
    "min_time",
    "max_time",
    "mean_time",
    "median_time",
    "stdev_time",
    "variance_time",
    "min_memory",
    "max_memory",
    "mean_memory",
    "mean_vertices",
    "mean_edges",
];

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 打印基准测试报告
    pub fn print_report(&self, report: &BenchmarkReport) -> serde_json::Result<String> {
        if self.mode == PrintMode::Json {
            return to_json(report);
        }
        if report.is_empty() {
            return Ok("Empty set\n".to_string());
        }

        let rows: Vec<Vec<String>> = report.reports().map(report_row).collect();
        let body = match self.mode {
            PrintMode::Vertical => format_vertical(&REPORT_COLUMNS, &rows),
            _ => format_table(&REPORT_COLUMNS, &rows),
        };

        Ok(format!(
            "{} -> {}\n{}\n{} sample size(s)\n",
            report.start,
            report.end,
            body,
            rows.len()
        ))
    }

    /// 打印单次最短路径查询结果
    pub fn print_path<V>(&self, result: &PathResult<V>, stats: &SearchStats) -> serde_json::Result<String>
    where
        V: Display + Serialize,
    {
        if self.mode == PrintMode::Json {
            #[derive(Serialize)]
            struct PathOutput<'a, T> {
                #[serde(flatten)]
                result: &'a PathResult<T>,
                reachable: bool,
                stats: &'a SearchStats,
            }
            return to_json(&PathOutput {
                result,
                reachable: result.is_reachable(),
                stats,
            });
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        if result.is_reachable() {
            let path: Vec<String> = result.path.iter().map(ToString::to_string).collect();
            table.add_row(row!["Distance", format_float(result.cost, 6)]);
            table.add_row(row!["Hops", result.hops()]);
            table.add_row(row!["Path", path.join(" -> ")]);
        } else {
            table.add_row(row!["Distance", "unreachable"]);
        }
        table.add_row(row!["Entries Pushed", stats.pushed]);
        table.add_row(row!["Stale Entries", stats.stale]);
        table.add_row(row!["Max Frontier", stats.max_frontier]);
        Ok(table.to_string())
    }

    /// 打印图统计信息
    pub fn print_stats(&self, vertex_count: usize, edge_count: usize) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Vertex Count", vertex_count.to_string()]);
        table.add_row(row!["Edge Count", edge_count.to_string()]);
        table.to_string()
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value).map(|s| s + "\n")
}

fn format_float(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

fn format_optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format_float(v, precision))
}

fn report_row(report: &SizeReport) -> Vec<String> {
    vec![
        report.sample_size.to_string(),
        format_float(report.min_time, 6),
        format_float(report.max_time, 6),
        format_float(report.mean_time, 6),
        format_float(report.median_time, 6),
        format_optional(report.stdev_time, 6),
        format_optional(report.variance_time, 6),
        format_float(report.min_memory, 2),
        format_float(report.max_memory, 2),
        format_float(report.mean_memory, 2),
        format_float(report.mean_vertices, 2),
        format_float(report.mean_edges, 2),
    ]
}

/// 表格格式
fn format_table(columns: &[&str], rows: &[Vec<String>]) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
    table.set_titles(Row::new(header));

    for row_data in rows {
        let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
        table.add_row(Row::new(cells));
    }

    table.to_string()
}

/// 垂直格式
fn format_vertical(columns: &[&str], rows: &[Vec<String>]) -> String {
    let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
    let mut output = String::new();

    for (i, row_data) in rows.iter().enumerate() {
        output.push_str(&format!(
            "*************************** {}. row ***************************\n",
            i + 1
        ));

        for (j, col) in columns.iter().enumerate() {
            let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
            output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
        }
    }

    output
}
