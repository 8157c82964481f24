//! Shortest walking routes on a campus map.
//!
//! The map is a weighted undirected [`Graph`] of named locations. Routes are found with
//! Dijkstra's algorithm, run fresh for every query over the whole graph.
//!
//! ```
//! use campus_nav::Graph;
//!
//! let mut graph = Graph::new();
//! graph.add_node("lib", "Library", 120.0, 80.0, vec!["Main Library".to_string()]);
//! graph.add_node("gym", "Gym", 300.0, 40.0, vec![]);
//! graph.add_node("caf", "Cafeteria", 200.0, 220.0, vec![]);
//! graph.add_edge("lib", "gym", 5.0);
//! graph.add_edge("gym", "caf", 3.0);
//!
//! let route = graph.find_shortest_path(&"lib", &"caf").unwrap().unwrap();
//! assert_eq!(route.path, vec!["lib", "gym", "caf"]);
//! assert_eq!(route.distance, 8.0);
//! assert_eq!(route.names(&graph), vec!["Library", "Gym", "Cafeteria"]);
//! ```
//!
//! Unreachable destinations are not errors, the query returns `Ok(None)`.
//! Ids missing from the graph are reported as [`GraphError::NodeNotFound`].

mod collections;
mod errors;
pub mod graph;
pub mod graph_algos;
#[cfg(feature = "serde")]
pub mod map_data;

pub use collections::FxIndexMap;
pub use errors::GraphError;
pub use graph::{Edge, Graph, Node};
pub use graph_algos::{Route, ShortestPathTree, shortest_path, shortest_paths_from};
#[cfg(feature = "serde")]
pub use map_data::{EdgeRecord, MapData, NodeRecord};
