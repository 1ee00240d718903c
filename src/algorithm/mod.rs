//! 图算法模块
//!
//! 包含基于优先队列的 Dijkstra 最短路径算法

mod dijkstra;

pub(crate) use dijkstra::cost_serde;
pub use dijkstra::{find_shortest_path, Dijkstra, PathResult, SearchStats};
