//! Dijkstra 最短路径
//!
//! 基于二叉堆的惰性删除实现：每次松弛都压入新条目，
//! 弹出时丢弃已定型顶点的过期条目，不做 decrease-key。
//! 因此优先队列中最多可能同时存在 O(E) 个条目。

use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::trace;

/// 最短路径结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult<V> {
    /// 路径总代价，不可达时为 +inf（JSON 中为 null）
    #[serde(with = "cost_serde")]
    pub cost: f64,
    /// 从起点到终点的顶点序列，不可达时为空
    pub path: Vec<V>,
}

impl<V> PathResult<V> {
    /// 不可达哨兵值 `(+inf, [])`
    pub fn unreachable() -> Self {
        Self {
            cost: f64::INFINITY,
            path: Vec::new(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }

    /// 路径跳数
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// 代价的 JSON 表示：+inf 写为 `null`，读回时 `null` 还原为 +inf
pub(crate) mod cost_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(cost: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        let value = if cost.is_finite() { Some(*cost) } else { None };
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

/// 单次查询的搜索统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// 压入优先队列的条目数
    pub pushed: usize,
    /// 弹出的条目数
    pub popped: usize,
    /// 弹出后因顶点已定型而丢弃的条目数
    pub stale: usize,
    /// 已在队列中的顶点被更低代价再次压入的次数，每次都会留下一个过期条目
    pub improved: usize,
    /// 优先队列的最大长度
    pub max_frontier: usize,
}

/// 优先队列条目: (累计代价, 顶点, 已走路径)
struct FrontierEntry<V> {
    cost: f64,
    vertex: V,
    path: Vec<V>,
}

impl<V> PartialEq for FrontierEntry<V> {
    fn eq(&self, other: &Self) -> bool {
        self.cost.total_cmp(&other.cost) == Ordering::Equal
    }
}

impl<V> Eq for FrontierEntry<V> {}

impl<V> PartialOrd for FrontierEntry<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// BinaryHeap 是最大堆，反转代价比较得到最小堆；只按代价排序
impl<V> Ord for FrontierEntry<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost)
    }
}

/// Dijkstra 路径查找器
pub struct Dijkstra<'g, V> {
    graph: &'g Graph<V>,
}

impl<'g, V> Dijkstra<'g, V>
where
    V: Eq + Hash + Clone + Debug,
{
    pub fn new(graph: &'g Graph<V>) -> Self {
        Self { graph }
    }

    /// 计算 start 到 end 的最短路径
    pub fn shortest_path(&self, start: &V, end: &V) -> PathResult<V> {
        self.shortest_path_with_stats(start, end).0
    }

    /// 计算最短路径并返回搜索统计
    pub fn shortest_path_with_stats(&self, start: &V, end: &V) -> (PathResult<V>, SearchStats) {
        let mut stats = SearchStats::default();

        if !self.graph.contains_vertex(start) {
            trace!(?start, "起点不在图中");
            return (PathResult::unreachable(), stats);
        }

        let mut frontier = BinaryHeap::new();
        let mut finalized: HashSet<V> = HashSet::new();
        let mut best: HashMap<V, f64> = HashMap::new();

        best.insert(start.clone(), 0.0);
        frontier.push(FrontierEntry {
            cost: 0.0,
            vertex: start.clone(),
            path: Vec::new(),
        });
        stats.pushed = 1;
        stats.max_frontier = 1;

        while let Some(FrontierEntry {
            cost,
            vertex,
            mut path,
        }) = frontier.pop()
        {
            stats.popped += 1;
            if finalized.contains(&vertex) {
                stats.stale += 1;
                continue;
            }
            finalized.insert(vertex.clone());
            path.push(vertex.clone());

            if &vertex == end {
                trace!(?end, cost, hops = path.len() - 1, "到达终点");
                return (PathResult { cost, path }, stats);
            }

            for (neighbor, weight) in self.graph.neighbors(&vertex) {
                if finalized.contains(neighbor) {
                    continue;
                }
                let candidate = cost + weight;
                let known = best.get(neighbor).copied().unwrap_or(f64::INFINITY);
                if candidate < known {
                    if known.is_finite() {
                        stats.improved += 1;
                    }
                    best.insert(neighbor.clone(), candidate);
                    frontier.push(FrontierEntry {
                        cost: candidate,
                        vertex: neighbor.clone(),
                        path: path.clone(),
                    });
                    stats.pushed += 1;
                    stats.max_frontier = stats.max_frontier.max(frontier.len());
                }
            }
        }

        trace!(?start, ?end, "终点不可达");
        (PathResult::unreachable(), stats)
    }
}

/// 计算无向图中 start 到 end 的最短路径
///
/// 不可达（含起点不存在）时返回 [`PathResult::unreachable`]。
pub fn find_shortest_path<V>(graph: &Graph<V>, start: &V, end: &V) -> PathResult<V>
where
    V: Eq + Hash + Clone + Debug,
{
    Dijkstra::new(graph).shortest_path(start, end)
}
