//! 图核心模块
//!
//! 定义边和邻接表图的数据结构

mod edge;
mod graph;

pub use edge::Edge;
pub use graph::{build_graph, Graph};
