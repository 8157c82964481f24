use std::fmt;


/// Errors raised by the graph store and the path engine
/// "No path" is not one of them: unreachable destinations are reported as `Ok(None)`
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError<K> {
    NodeNotFound(K), // Referenced id is not in the graph
    InvalidMapData(String), // Map description could not be parsed
}

impl<K: fmt::Debug> fmt::Display for GraphError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::NodeNotFound(id) => write!(f, "node {id:?} not found in graph"),
            GraphError::InvalidMapData(msg) => write!(f, "invalid map data: {msg}"),
        }
    }
}

impl<K: fmt::Debug> std::error::Error for GraphError<K> {}


#[cfg(feature = "serde")]
impl<K> From<serde_json::Error> for GraphError<K> {
    fn from(error: serde_json::Error) -> Self {
        GraphError::InvalidMapData(error.to_string())
    }
}
