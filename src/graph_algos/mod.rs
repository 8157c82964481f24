pub mod dijkstra;
mod shortest_path;

pub use dijkstra::{ShortestPathTree, shortest_path, shortest_paths_from};
use shortest_path::reconstruct_path;

use crate::collections::FxIndexMap;
use crate::graph::Graph;

use std::{fmt::Debug, hash::Hash};
use num_traits::Float;

/// Type alias for the node map used by the path engine
/// N: Node id
/// C: Cost of reaching the node from the start
/// The tuple contains (parent_index, cost) where:
/// - parent_index is the index of the parent node in the map, NO_PARENT if it has none
/// - cost is the total cost to reach this node from the start, infinity if unreachable
pub type GraphNodeMap<N, C> = FxIndexMap<N, (usize, C)>;

/// Parent index of the start node and of nodes never reached
pub(crate) const NO_PARENT: usize = usize::MAX;


/// Result of a route query
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route<K, C> {
    pub path: Vec<K>, // start to end, both included
    pub distance: C, // sum of the edge distances along path
}

impl<K, C> Route<K, C> {

    pub fn start(&self) -> Option<&K> {
        self.path.first()
    }

    pub fn end(&self) -> Option<&K> {
        self.path.last()
    }

    /// Number of edges walked
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Display names of the locations along the route
    /// Ids missing from `graph` are skipped
    pub fn names<'a>(&self, graph: &'a Graph<K, C>) -> Vec<&'a str>
    where
        K: Eq + Hash + Clone + Debug,
        C: Float + Debug,
    {
        self.path
            .iter()
            .filter_map(|id| graph.get_node(id))
            .map(|node| node.name.as_str())
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_helpers() {
        let mut graph = Graph::new();
        graph.add_node("lib", "Library", 0.0, 0.0, vec![]);
        graph.add_node("gym", "Gym", 10.0, 0.0, vec![]);
        graph.add_edge("lib", "gym", 10.0);

        let route = Route { path: vec!["lib", "gym"], distance: 10.0 };

        assert_eq!(route.start(), Some(&"lib"));
        assert_eq!(route.end(), Some(&"gym"));
        assert_eq!(route.hops(), 1);
        assert_eq!(route.names(&graph), vec!["Library", "Gym"]);
    }

    #[test]
    fn test_single_node_route_has_no_hops() {
        let route = Route { path: vec![7u32], distance: 0.0 };
        assert_eq!(route.hops(), 0);
    }
}
