use crate::collections::FxIndexMap;
use crate::errors::GraphError;
use crate::graph_algos::{Route, shortest_path};

use std::{fmt::Debug, hash::Hash};
use log::warn;
use num_traits::Float;


/// Location on the map
/// Coordinates are only carried for display, the path engine never reads them
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound(
        serialize = "K: serde::Serialize, C: serde::Serialize",
        deserialize = "K: serde::Deserialize<'de> + Eq + Hash, C: serde::Deserialize<'de>"
    ))
)]
pub struct Node<K, C> {
    pub id: K,
    pub name: String,
    pub x: C,
    pub y: C,
    pub aliases: Vec<String>, // Alternate display names resolving to this node
    neighbors: FxIndexMap<K, C>, // neighbor id -> edge distance
}

impl<K, C> Node<K, C>
where
    K: Eq + Hash,
    C: Copy,
{
    fn new(id: K, name: String, x: C, y: C, aliases: Vec<String>) -> Self {
        Self {
            id,
            name,
            x,
            y,
            aliases,
            neighbors: FxIndexMap::default(),
        }
    }

    /// Neighbors and edge distances, in the order the edges were first added
    pub fn neighbors(&self) -> impl Iterator<Item = (&K, C)> + '_ {
        self.neighbors.iter().map(|(id, &distance)| (id, distance))
    }

    /// Distance of the edge to `neighbor`, if one exists
    pub fn weight_to(&self, neighbor: &K) -> Option<C> {
        self.neighbors.get(neighbor).copied()
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Display name followed by every alias
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}


/// Undirected edge as reported by [`Graph::edges`]
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Edge<'a, K, C> {
    pub source: &'a K,
    pub target: &'a K,
    pub distance: C,
}


/// Weighted undirected graph of map locations
/// Nodes keep their insertion order, which is also the tie-break order of the path engine
#[derive(Clone, Debug)]
pub struct Graph<K, C = f64> {
    nodes: FxIndexMap<K, Node<K, C>>,
}

impl<K, C> Default for Graph<K, C> {
    fn default() -> Self {
        Self {
            nodes: FxIndexMap::default(),
        }
    }
}

impl<K, C> Graph<K, C>
where
    K: Eq + Hash + Clone + Debug,
    C: Float + Debug,
{

    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: FxIndexMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Insert a node, replacing any node already stored under `id`
    /// A replaced node keeps its position but loses its adjacency, so add nodes before edges
    pub fn add_node(&mut self, id: K, name: impl Into<String>, x: C, y: C, aliases: Vec<String>) {
        let node = Node::new(id.clone(), name.into(), x, y, aliases);
        self.nodes.insert(id, node);
    }

    /// Connect two existing nodes in both directions
    /// Best-effort: if either endpoint is missing the edge is dropped and `false` is returned
    /// Re-adding an edge overwrites the previous distance in both directions
    pub fn add_edge(&mut self, source: K, target: K, distance: C) -> bool {
        match self.try_add_edge(source, target, distance) {
            Ok(()) => true,
            Err(error) => {
                warn!("dropping edge: {error}");
                false
            }
        }
    }

    /// Strict version of [`Graph::add_edge`]
    /// Fails with `NodeNotFound` naming the first missing endpoint, nothing is written in that case
    pub fn try_add_edge(&mut self, source: K, target: K, distance: C) -> Result<(), GraphError<K>> {
        if !self.nodes.contains_key(&source) {
            return Err(GraphError::NodeNotFound(source));
        }
        if !self.nodes.contains_key(&target) {
            return Err(GraphError::NodeNotFound(target));
        }

        if let Some(node) = self.nodes.get_mut(&source) {
            node.neighbors.insert(target.clone(), distance);
        }
        if let Some(node) = self.nodes.get_mut(&target) {
            node.neighbors.insert(source, distance);
        }
        Ok(())
    }

    pub fn get_node(&self, id: &K) -> Option<&Node<K, C>> {
        self.nodes.get(id)
    }

    pub fn contains_node(&self, id: &K) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node<K, C>> + '_ {
        self.nodes.values()
    }

    /// Node ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &K> + '_ {
        self.nodes.keys()
    }

    /// Neighbors of `id` with their edge distances, empty for unknown ids
    pub fn neighbors<'a>(&'a self, id: &K) -> impl Iterator<Item = (&'a K, C)> + use<'a, K, C> {
        self.nodes.get(id).into_iter().flat_map(|node| node.neighbors())
    }

    pub fn edge_weight(&self, source: &K, target: &K) -> Option<C> {
        self.get_node(source)?.weight_to(target)
    }

    /// Every undirected edge once, reported from the endpoint inserted first
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_, K, C>> + '_ {
        self.nodes.iter().enumerate().flat_map(move |(index, (id, node))| {
            node.neighbors.iter().filter_map(move |(neighbor, &distance)| {
                let neighbor_index = self.nodes.get_index_of(neighbor)?;

                // the other side reports it, unless a node overwrite dropped its half
                let reported_elsewhere = neighbor_index < index
                    && self.nodes[neighbor_index].neighbors.contains_key(id);
                if reported_elsewhere {
                    return None;
                }

                Some(Edge { source: id, target: neighbor, distance })
            })
        })
    }

    /// Map a display name or alias to its node id
    /// Nodes are searched in insertion order, the first node carrying the label wins
    pub fn resolve(&self, label: &str) -> Option<&K> {
        self.nodes
            .values()
            .find(|node| node.labels().any(|l| l == label))
            .map(|node| &node.id)
    }

    /// Every (id, label) pair for a location picker
    /// Nodes are sorted by name ignoring case, each name is followed by that node's aliases
    /// Nodes with the same name keep their insertion order
    pub fn labels(&self) -> Vec<(&K, &str)> {
        let mut nodes: Vec<&Node<K, C>> = self.nodes.values().collect();
        nodes.sort_by_cached_key(|node| node.name.to_lowercase());

        nodes
            .into_iter()
            .flat_map(|node| node.labels().map(move |label| (&node.id, label)))
            .collect()
    }

    /// Shortest route between two nodes, see [`shortest_path`]
    pub fn find_shortest_path(&self, start: &K, end: &K) -> Result<Option<Route<K, C>>, GraphError<K>> {
        shortest_path(self, start, end)
    }

    pub(crate) fn index_of(&self, id: &K) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    pub(crate) fn node_at(&self, index: usize) -> Option<&Node<K, C>> {
        self.nodes.get_index(index).map(|(_, node)| node)
    }
}
