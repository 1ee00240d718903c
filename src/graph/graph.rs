//! 图数据结构
//!
//! 内存中的无向邻接表，每条边拆成两条有向半边

use super::edge::Edge;
use indexmap::IndexMap;
use std::hash::Hash;

/// 无向带权图
///
/// 顶点按首次出现的顺序保存，构建完成后只读。
#[derive(Debug, Clone)]
pub struct Graph<V> {
    /// 邻接表: 顶点 -> [(邻居, 权重)]
    adjacency: IndexMap<V, Vec<(V, f64)>>,
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self {
            adjacency: IndexMap::new(),
        }
    }
}

impl<V: Eq + Hash + Clone> Graph<V> {
    /// 从边序列构建图
    ///
    /// 平行边全部保留，自环也照常存储。
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = Edge<V>>,
    {
        let mut adjacency: IndexMap<V, Vec<(V, f64)>> = IndexMap::new();
        for Edge {
            source,
            target,
            weight,
        } in edges
        {
            adjacency
                .entry(source.clone())
                .or_default()
                .push((target.clone(), weight));
            adjacency.entry(target).or_default().push((source, weight));
        }
        Self { adjacency }
    }

    /// 顶点的邻接列表，未知顶点返回空切片
    pub fn neighbors(&self, vertex: &V) -> &[(V, f64)] {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// 顶点数
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// 边数（半边总数的一半）
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// 按插入顺序遍历顶点
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.adjacency.keys()
    }
}

impl<V: Eq + Hash + Clone> FromIterator<Edge<V>> for Graph<V> {
    fn from_iter<I: IntoIterator<Item = Edge<V>>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}

/// 构建无向图
pub fn build_graph<V: Eq + Hash + Clone>(edges: Vec<Edge<V>>) -> Graph<V> {
    Graph::from_edges(edges)
}
