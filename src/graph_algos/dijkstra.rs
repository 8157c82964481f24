use crate::collections::FxIndexSet;
use crate::errors::GraphError;
use crate::graph::Graph;
use super::{GraphNodeMap, NO_PARENT, Route, reconstruct_path};

use std::{fmt::Debug, hash::Hash};
use log::{debug, trace};
use num_traits::Float;


/// Distance and predecessor tables computed from a single start node
/// Holds one entry per graph node, in graph insertion order
#[derive(Clone, Debug)]
pub struct ShortestPathTree<K, C> {
    start: K,
    node_map: GraphNodeMap<K, C>,
}

impl<K, C> ShortestPathTree<K, C>
where
    K: Eq + Hash + Clone + Debug,
    C: Float + Debug,
{

    pub fn start(&self) -> &K {
        &self.start
    }

    /// Shortest known distance from the start
    /// None for ids outside the graph, infinity for nodes that cannot be reached
    pub fn distance(&self, id: &K) -> Option<C> {
        self.node_map.get(id).map(|&(_, cost)| cost)
    }

    /// Node preceding `id` on its shortest path, None for the start and for unreachable nodes
    pub fn predecessor(&self, id: &K) -> Option<&K> {
        let &(parent_index, _) = self.node_map.get(id)?;
        self.node_map.get_index(parent_index).map(|(parent, _)| parent)
    }

    pub fn is_reachable(&self, id: &K) -> bool {
        self.distance(id).is_some_and(|cost| cost.is_finite())
    }

    /// Reachable nodes and their distances, in graph insertion order
    pub fn reachable(&self) -> impl Iterator<Item = (&K, C)> + '_ {
        self.node_map
            .iter()
            .filter(|(_, (_, cost))| cost.is_finite())
            .map(|(id, &(_, cost))| (id, cost))
    }

    /// Route from the start to `end`, None if `end` is unreachable or unknown
    pub fn path_to(&self, end: &K) -> Option<Route<K, C>> {
        let (goal_index, _, &(_, distance)) = self.node_map.get_full(end)?;
        if !distance.is_finite() {
            return None;
        }

        let path = reconstruct_path(&self.node_map, goal_index)?;
        Some(Route { path, distance })
    }
}


/// Run Dijkstra's algorithm from `start` over the whole graph
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
///
/// Node selection is a linear scan over the unvisited set, which follows graph insertion order.
/// Among nodes at the same distance the one inserted first is settled first, and a neighbor's
/// predecessor only changes on a strictly shorter distance, so equal cost routes resolve the
/// same way on every run. O(V^2) per query.
pub fn shortest_paths_from<K, C>(graph: &Graph<K, C>, start: &K) -> Result<ShortestPathTree<K, C>, GraphError<K>>
where
    K: Eq + Hash + Clone + Debug,
    C: Float + Debug,
{
    let start_index = graph
        .index_of(start)
        .ok_or_else(|| GraphError::NodeNotFound(start.clone()))?;

    let node_map = build_dijkstra_table(graph, start_index);

    Ok(ShortestPathTree {
        start: start.clone(),
        node_map,
    })
}


/// Shortest route between `start` and `end`
/// - Err(NodeNotFound) if either id is not in the graph, start is checked first
/// - Ok(None) if no edge sequence connects them
/// - Ok(Some(route)) otherwise; start == end yields a single node route of distance 0
pub fn shortest_path<K, C>(graph: &Graph<K, C>, start: &K, end: &K) -> Result<Option<Route<K, C>>, GraphError<K>>
where
    K: Eq + Hash + Clone + Debug,
    C: Float + Debug,
{
    if !graph.contains_node(start) {
        return Err(GraphError::NodeNotFound(start.clone()));
    }
    if !graph.contains_node(end) {
        return Err(GraphError::NodeNotFound(end.clone()));
    }

    debug!("route query {start:?} -> {end:?}");
    let tree = shortest_paths_from(graph, start)?;

    let route = tree.path_to(end);
    match &route {
        Some(route) => debug!("route found: {} hops, distance {:?}", route.hops(), route.distance),
        None => debug!("no route from {start:?} to {end:?}"),
    }
    Ok(route)
}


/// Fills the distance and predecessor tables for every node of the graph
/// The returned map is indexed like the graph itself
fn build_dijkstra_table<K, C>(graph: &Graph<K, C>, start_index: usize) -> GraphNodeMap<K, C>
where
    K: Eq + Hash + Clone + Debug,
    C: Float + Debug,
{
    // every node starts unreachable and without a parent
    let mut node_map: GraphNodeMap<K, C> = graph
        .ids()
        .map(|id| (id.clone(), (NO_PARENT, C::infinity())))
        .collect();
    if let Some((_, entry)) = node_map.get_index_mut(start_index) {
        entry.1 = C::zero();
    }

    // unvisited node indices, kept in graph insertion order
    let mut unvisited: FxIndexSet<usize> = (0..node_map.len()).collect();

    while !unvisited.is_empty() {

        // first node with the strictly smallest cost wins ties
        let mut selected: Option<(usize, C)> = None;
        for &index in unvisited.iter() {
            let cost = node_map[index].1;
            let best = selected.map_or(C::infinity(), |(_, c)| c);
            if cost < best {
                selected = Some((index, cost));
            }
        }

        // the remaining nodes are all unreachable
        let Some((index, cost)) = selected else {
            break;
        };

        unvisited.shift_remove(&index);
        let Some(node) = graph.node_at(index) else {
            break;
        };
        trace!("settled {:?} at {:?}", node.id, cost);

        // loop over neighbors that are not settled yet
        for (neighbor, edge_cost) in node.neighbors() {
            let Some(neighbor_index) = graph.index_of(neighbor) else {
                continue;
            };
            if !unvisited.contains(&neighbor_index) {
                continue;
            }

            let new_cost = cost + edge_cost;
            if let Some((_, entry)) = node_map.get_index_mut(neighbor_index) {
                if new_cost < entry.1 {
                    *entry = (index, new_cost);
                }
            }
        }
    }

    node_map
}


#[cfg(test)]
mod tests {
    use super::*;

    // Diamond: A - B - D and A - C - D
    fn create_test_graph() -> Graph<&'static str> {
        let mut graph = Graph::new();
        for id in ["A", "B", "C", "D"] {
            graph.add_node(id, id, 0.0, 0.0, vec![]);
        }
        graph.add_edge("A", "B", 1.0);
        graph.add_edge("A", "C", 3.0);
        graph.add_edge("B", "D", 5.0);
        graph.add_edge("C", "D", 1.0);
        graph
    }

    #[test]
    fn test_build_dijkstra_table_simple() {
        let graph = create_test_graph();
        let tree = shortest_paths_from(&graph, &"A").unwrap();

        assert_eq!(tree.distance(&"A"), Some(0.0));
        assert_eq!(tree.distance(&"B"), Some(1.0));
        assert_eq!(tree.distance(&"C"), Some(3.0));
        assert_eq!(tree.distance(&"D"), Some(4.0)); // via A -> C -> D
        assert_eq!(tree.predecessor(&"D"), Some(&"C"));
        assert_eq!(tree.predecessor(&"A"), None);
    }

    #[test]
    fn test_unknown_start_fails_fast() {
        let graph = create_test_graph();
        let result = shortest_paths_from(&graph, &"Z");
        assert!(matches!(result, Err(GraphError::NodeNotFound("Z"))));
    }

    #[test]
    fn test_unreachable_nodes_stay_infinite() {
        let mut graph = create_test_graph();
        graph.add_node("E", "E", 0.0, 0.0, vec![]);

        let tree = shortest_paths_from(&graph, &"A").unwrap();

        assert_eq!(tree.distance(&"E"), Some(f64::INFINITY));
        assert_eq!(tree.predecessor(&"E"), None);
        assert!(!tree.is_reachable(&"E"));
        assert!(tree.path_to(&"E").is_none());
        assert_eq!(tree.distance(&"nowhere"), None);

        let reachable: Vec<_> = tree.reachable().map(|(id, _)| *id).collect();
        assert_eq!(reachable, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_dijkstra_finds_optimal_path() {
        let graph = create_test_graph();
        let route = shortest_path(&graph, &"A", &"D").unwrap().unwrap();

        assert_eq!(route.path, vec!["A", "C", "D"]);
        assert_eq!(route.distance, 4.0);
    }

    #[test]
    fn test_shortest_path_unknown_end() {
        let graph = create_test_graph();
        let result = shortest_path(&graph, &"A", &"Z");
        assert_eq!(result, Err(GraphError::NodeNotFound("Z")));

        // start is reported before end
        let result = shortest_path(&graph, &"Y", &"Z");
        assert_eq!(result, Err(GraphError::NodeNotFound("Y")));
    }

    #[test]
    fn test_start_equals_end() {
        let graph = create_test_graph();
        let route = shortest_path(&graph, &"B", &"B").unwrap().unwrap();

        assert_eq!(route.path, vec!["B"]);
        assert_eq!(route.distance, 0.0);
    }

    #[test]
    fn test_equal_cost_keeps_first_predecessor() {
        // A - B costs 4 directly and 4 through C
        let mut graph = Graph::new();
        for id in ["A", "B", "C"] {
            graph.add_node(id, id, 0.0, 0.0, vec![]);
        }
        graph.add_edge("A", "B", 4.0);
        graph.add_edge("A", "C", 2.0);
        graph.add_edge("C", "B", 2.0);

        let tree = shortest_paths_from(&graph, &"A").unwrap();
        assert_eq!(tree.predecessor(&"B"), Some(&"A"));
        assert_eq!(tree.path_to(&"B").unwrap().path, vec!["A", "B"]);
    }

    #[test]
    fn test_tie_break_follows_insertion_order() {
        // B and C are both 1 away from A and both reach D for 2 total
        let build = |order: [&'static str; 4]| {
            let mut graph = Graph::new();
            for id in order {
                graph.add_node(id, id, 0.0, 0.0, vec![]);
            }
            graph.add_edge("A", "B", 1.0);
            graph.add_edge("A", "C", 1.0);
            graph.add_edge("B", "D", 1.0);
            graph.add_edge("C", "D", 1.0);
            graph
        };

        let graph = build(["A", "B", "C", "D"]);
        let route = shortest_path(&graph, &"A", &"D").unwrap().unwrap();
        assert_eq!(route.path, vec!["A", "B", "D"]);

        let graph = build(["A", "C", "B", "D"]);
        let route = shortest_path(&graph, &"A", &"D").unwrap().unwrap();
        assert_eq!(route.path, vec!["A", "C", "D"]);
    }

    #[test]
    fn test_f32_weights() {
        let mut graph: Graph<u32, f32> = Graph::new();
        graph.add_node(1, "One", 0.0, 0.0, vec![]);
        graph.add_node(2, "Two", 1.0, 0.0, vec![]);
        graph.add_edge(1, 2, 1.5);

        let route = graph.find_shortest_path(&1, &2).unwrap().unwrap();
        assert_eq!(route.distance, 1.5f32);
    }
}
