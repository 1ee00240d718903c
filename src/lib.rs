//! pathbench - 无向带权图最短路径与基准测试
//!
//! 在内存中对单个图快照执行：
//! - 边表读取（`起点 终点 权重`，可截取前 N 条）
//! - 无向邻接表构建
//! - 基于二叉堆的 Dijkstra 最短路径（惰性删除）
//! - 按样本规模重复计时与内存采样，并汇总统计

pub mod algorithm;
pub mod benchmark;
pub mod cli;
pub mod error;
pub mod graph;
pub mod import;

// 重导出常用类型
pub use algorithm::{find_shortest_path, Dijkstra, PathResult, SearchStats};
pub use benchmark::{Benchmark, BenchmarkConfig, BenchmarkReport, SampleSize, SizeReport};
pub use error::{Error, Result};
pub use graph::{build_graph, Edge, Graph};
pub use import::{read_edges, read_edges_from};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
