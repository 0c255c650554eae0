//! Components which make up a connection, and the graph holding them.

use crate::error::SimulationError;
use crate::simulator::components::bodies::BodyKey;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Stable identity of a connection. Ids are handed out in creation order
/// and never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ConnectionId(pub usize);

impl ConnectionId {
    fn edge(self) -> EdgeIndex {
        EdgeIndex::new(self.0)
    }
}

impl From<EdgeIndex> for ConnectionId {
    fn from(edge: EdgeIndex) -> Self {
        Self(edge.index())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A damped spring between two spheres.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Rest length of the spring.
    pub length: f64,
    pub spring_constant: f64,
    pub damping_constant: f64,
}

impl Connection {
    pub const fn new(length: f64, spring_constant: f64, damping_constant: f64) -> Self {
        Self {
            length,
            spring_constant,
            damping_constant,
        }
    }
}

/// A partial update of a [`Connection`]. Unset fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionUpdate {
    pub length: Option<f64>,
    pub spring_constant: Option<f64>,
    pub damping_constant: Option<f64>,
}

impl ConnectionUpdate {
    fn apply(self, connection: &mut Connection) {
        if let Some(length) = self.length {
            connection.length = length;
        }
        if let Some(spring_constant) = self.spring_constant {
            connection.spring_constant = spring_constant;
        }
        if let Some(damping_constant) = self.damping_constant {
            connection.damping_constant = damping_constant;
        }
    }
}

/// The spring graph between spheres.
///
/// Every unordered pair of spheres holds at most one connection. Endpoints
/// are stored in key order, so `(a, b)` and `(b, a)` name the same edge.
/// Connections refer to spheres by key only; a key missing from the body
/// store is skipped by the passes that read the graph.
#[derive(Clone, Debug, Default)]
pub struct ConnectivityGraph {
    graph: UnGraph<BodyKey, Connection>,
    nodes: HashMap<BodyKey, NodeIndex>,
}

impl ConnectivityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&mut self, key: &BodyKey) -> NodeIndex {
        if let Some(&node) = self.nodes.get(key) {
            return node;
        }
        let node = self.graph.add_node(key.clone());
        self.nodes.insert(key.clone(), node);
        node
    }

    /// Connects `a` and `b`. If the pair is already connected, its spring is
    /// replaced and the existing id is returned. Self-connections are refused.
    pub fn connect(&mut self, a: &BodyKey, b: &BodyKey, connection: Connection) -> Option<ConnectionId> {
        if a == b {
            return None;
        }
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        let first = self.node(first);
        let second = self.node(second);
        Some(self.graph.update_edge(first, second, connection).into())
    }

    /// Number of connections.
    pub fn len(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Connection> {
        self.graph.edge_weight(id.edge())
    }

    pub fn get_mut(&mut self, id: ConnectionId) -> Option<&mut Connection> {
        self.graph.edge_weight_mut(id.edge())
    }

    /// Both endpoints of `id`, in key order.
    pub fn endpoints(&self, id: ConnectionId) -> Option<(&BodyKey, &BodyKey)> {
        let (a, b) = self.graph.edge_endpoints(id.edge())?;
        Some((&self.graph[a], &self.graph[b]))
    }

    pub fn find(&self, a: &BodyKey, b: &BodyKey) -> Option<ConnectionId> {
        let a = *self.nodes.get(a)?;
        let b = *self.nodes.get(b)?;
        self.graph.find_edge(a, b).map(ConnectionId::from)
    }

    /// All connections in id order, with their endpoints in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ConnectionId, &BodyKey, &BodyKey, &Connection)> {
        self.graph.edge_references().map(|edge| {
            (
                ConnectionId::from(edge.id()),
                &self.graph[edge.source()],
                &self.graph[edge.target()],
                edge.weight(),
            )
        })
    }

    /// Connections touching `key`.
    pub fn connections_of<'a>(&'a self, key: &BodyKey) -> impl Iterator<Item = ConnectionId> + 'a {
        self.nodes
            .get(key)
            .into_iter()
            .flat_map(move |&node| self.graph.edges(node).map(|edge| ConnectionId::from(edge.id())))
    }

    /// Number of connections touching `key`.
    pub fn degree(&self, key: &BodyKey) -> usize {
        self.connections_of(key).count()
    }

    pub fn update(&mut self, id: ConnectionId, update: ConnectionUpdate) -> Result<&Connection, SimulationError> {
        let connection = self
            .graph
            .edge_weight_mut(id.edge())
            .ok_or(SimulationError::UnknownConnection(id))?;
        update.apply(connection);
        Ok(&*connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spring() -> Connection {
        Connection::new(5.0, 0.1, 0.0)
    }

    #[test]
    fn reversed_pair_is_the_same_connection() {
        let mut graph = ConnectivityGraph::new();
        let first = graph.connect(&"b".into(), &"a".into(), spring());
        let second = graph.connect(&"a".into(), &"b".into(), Connection::new(7.0, 0.2, 0.1));

        assert_eq!(first, second);
        assert_eq!(graph.len(), 1);
        let id = first.unwrap();
        assert_eq!(graph.get(id).map(|c| c.length), Some(7.0));
        let (a, b) = graph.endpoints(id).unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("a", "b"));
    }

    #[test]
    fn self_connection_is_refused() {
        let mut graph = ConnectivityGraph::new();
        assert_eq!(graph.connect(&"a".into(), &"a".into(), spring()), None);
        assert!(graph.is_empty());
    }

    #[test]
    fn adjacency_lists_each_edge_once() {
        let mut graph = ConnectivityGraph::new();
        graph.connect(&"a".into(), &"b".into(), spring());
        graph.connect(&"a".into(), &"c".into(), spring());
        graph.connect(&"b".into(), &"c".into(), spring());

        assert_eq!(graph.degree(&"a".into()), 2);
        assert_eq!(graph.degree(&"c".into()), 2);
        assert_eq!(graph.degree(&"missing".into()), 0);
        assert_eq!(graph.find(&"c".into(), &"a".into()), Some(ConnectionId(1)));
    }
}
