//! 边定义
//!
//! 边表中的一条记录：起点、终点、权重

use serde::{Deserialize, Serialize};

/// 带权无向边
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<V> {
    /// 起点
    pub source: V,
    /// 终点
    pub target: V,
    /// 权重（非负有限值）
    pub weight: f64,
}

impl<V> Edge<V> {
    pub fn new(source: V, target: V, weight: f64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }
}

impl<V> From<(V, V, f64)> for Edge<V> {
    fn from((source, target, weight): (V, V, f64)) -> Self {
        Self::new(source, target, weight)
    }
}
