use crate::errors::GraphError;
use crate::graph::Graph;

use std::{fmt::Debug, hash::Hash, io::Read};
use log::debug;
use num_traits::Float;
use serde::{Deserialize, Serialize, de::DeserializeOwned};


/// Description of a map as produced by an external loader
/// `{ "nodes": [{id, name, x, y, aliases?}], "edges": [{source, target, distance}] }`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "K: Deserialize<'de>, C: Deserialize<'de>"))]
pub struct MapData<K, C> {
    pub nodes: Vec<NodeRecord<K, C>>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord<K, C>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord<K, C> {
    pub id: K,
    pub name: String,
    pub x: C,
    pub y: C,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord<K, C> {
    pub source: K,
    pub target: K,
    pub distance: C,
}


impl<K, C> MapData<K, C>
where
    K: Eq + Hash + Clone + Debug,
    C: Float + Debug,
{

    pub fn from_json_str(json: &str) -> Result<Self, GraphError<K>>
    where
        K: DeserializeOwned,
        C: DeserializeOwned,
    {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, GraphError<K>>
    where
        K: DeserializeOwned,
        C: DeserializeOwned,
    {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Build a graph, adding every node before any edge
    /// Edges naming an unknown node are dropped
    pub fn build(self) -> Graph<K, C> {
        let mut graph = self.add_nodes();

        let total = self.edges.len();
        let added = self
            .edges
            .into_iter()
            .map(|edge| graph.add_edge(edge.source, edge.target, edge.distance))
            .filter(|&added| added)
            .count();

        debug!("loaded map: {} nodes, {added} edges, {} dropped", graph.len(), total - added);
        graph
    }

    /// Build a graph, failing on the first edge that names an unknown node
    pub fn build_strict(self) -> Result<Graph<K, C>, GraphError<K>> {
        let mut graph = self.add_nodes();

        let total = self.edges.len();
        for edge in self.edges {
            graph.try_add_edge(edge.source, edge.target, edge.distance)?;
        }

        debug!("loaded map: {} nodes, {total} edges", graph.len());
        Ok(graph)
    }

    fn add_nodes(&self) -> Graph<K, C> {
        let mut graph = Graph::with_capacity(self.nodes.len());
        for node in &self.nodes {
            graph.add_node(node.id.clone(), node.name.clone(), node.x, node.y, node.aliases.clone());
        }
        graph
    }
}

impl<K, C> From<MapData<K, C>> for Graph<K, C>
where
    K: Eq + Hash + Clone + Debug,
    C: Float + Debug,
{
    fn from(data: MapData<K, C>) -> Self {
        data.build()
    }
}

impl<K, C> Graph<K, C>
where
    K: Eq + Hash + Clone + Debug,
    C: Float + Debug,
{
    /// Describe the graph as map data, one edge record per undirected edge
    pub fn to_map_data(&self) -> MapData<K, C> {
        let nodes = self
            .nodes()
            .map(|node| NodeRecord {
                id: node.id.clone(),
                name: node.name.clone(),
                x: node.x,
                y: node.y,
                aliases: node.aliases.clone(),
            })
            .collect();

        let edges = self
            .edges()
            .map(|edge| EdgeRecord {
                source: edge.source.clone(),
                target: edge.target.clone(),
                distance: edge.distance,
            })
            .collect();

        MapData { nodes, edges }
    }
}
