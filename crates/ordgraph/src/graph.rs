//! The [`Graph`] container: structural mutations, point queries, and the value-level trait
//! implementations (rendering, equality, construction).
use crate::adjacency::{AdjacencyIndex, Connection};
use crate::errors::{GraphError, NodeOperation};
use crate::store::{NodeId, NodeStore};
use std::borrow::Borrow;
use std::fmt;

/// Directed graph with unique, ordered node values of type `N` and weighted edges of type `E`.
///
/// Several edges may connect the same pair of nodes as long as their weights differ; an exact
/// `(source, destination, weight)` triple is stored at most once. Nodes and edges are always
/// enumerated in ascending order: nodes by value, edges by `(source, destination, weight)`.
///
/// Query methods take their node arguments by reference and accept any borrowed form of `N`, the
/// same way [`BTreeMap::get`](std::collections::BTreeMap::get) does.
///
/// # Examples
///
/// ```
/// use ordgraph::Graph;
///
/// let mut graph = Graph::from_nodes(["a", "b", "c"]);
/// assert!(graph.insert_edge(&"a", &"b", 2).unwrap());
/// assert!(graph.insert_edge(&"a", &"b", 1).unwrap());
/// assert!(!graph.insert_edge(&"a", &"b", 1).unwrap());
///
/// assert_eq!(vec![1, 2], graph.get_weights(&"a", &"b").unwrap());
/// assert!(graph.insert_edge(&"a", &"z", 0).is_err());
/// ```
pub struct Graph<N, E> {
    pub(crate) nodes: NodeStore<N>,
    pub(crate) adjacency: AdjacencyIndex<E>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self {
            nodes: NodeStore::default(),
            adjacency: AdjacencyIndex::default(),
        }
    }
}

impl<N: Clone, E: Clone> Clone for Graph<N, E> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            adjacency: self.adjacency.clone(),
        }
    }
}

impl<N, E> Graph<N, E> {
    /// Create a new, empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the contents of this graph out, leaving it empty.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Number of nodes in the graph.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges in the graph.
    pub fn num_edges(&self) -> usize {
        self.adjacency.num_connections()
    }

    /// Returns true if the graph has no nodes (and therefore no edges).
    pub fn is_empty(&self) -> bool {
        self.num_nodes() == 0
    }

    /// Iterates over the node values in ascending order.
    pub fn nodes(&self) -> impl '_ + DoubleEndedIterator<Item = &N> + ExactSizeIterator {
        self.nodes.values()
    }

    /// Removes every node and edge.
    pub fn clear(&mut self) {
        log::debug!(
            "clear: dropping {} nodes and {} edges",
            self.num_nodes(),
            self.num_edges()
        );
        self.adjacency.clear();
        self.nodes.clear();
    }
}

impl<N: Ord, E: Ord> Graph<N, E> {
    /// Builds a graph containing the given nodes and no edges. Duplicate values are ignored.
    pub fn from_nodes(nodes: impl IntoIterator<Item = N>) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.insert_node(node);
        }
        graph
    }

    /// Builds a graph from `(source, destination, weight)` triples. Endpoints are created as needed
    /// and duplicate triples are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordgraph::Graph;
    ///
    /// let graph = Graph::from_edges([(1, 1, 1), (1, 1, 2), (3, 1, 0), (1, 1, 1)]);
    /// assert_eq!(vec![1, 3], graph.get_nodes());
    /// assert_eq!(3, graph.num_edges());
    /// ```
    pub fn from_edges(edges: impl IntoIterator<Item = (N, N, E)>) -> Self {
        let mut graph = Self::new();
        graph.extend(edges);
        graph
    }

    fn resolve(&mut self, value: N) -> NodeId {
        let (id, created) = self.nodes.resolve(value);
        if created {
            self.adjacency.register(id);
        }
        id
    }

    fn find_node<Q>(&self, value: &Q, operation: NodeOperation) -> Result<NodeId, GraphError>
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.nodes
            .find(value)
            .ok_or(GraphError::missing_node(operation))
    }

    /// Adds a node. Returns false if a node with the same value already exists.
    pub fn insert_node(&mut self, value: N) -> bool {
        if self.nodes.contains(&value) {
            return false;
        }
        let id = self.resolve(value);
        log::trace!("insert_node: {id:?}");
        true
    }

    /// Adds an edge between two existing nodes.
    ///
    /// Returns `Ok(false)` if an edge with the same source, destination and weight already exists.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingEndpoint`] if `src` or `dst` is not a node of the graph.
    pub fn insert_edge<Q>(&mut self, src: &Q, dst: &Q, weight: E) -> Result<bool, GraphError>
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (Some(from), Some(to)) = (self.nodes.find(src), self.nodes.find(dst)) else {
            return Err(GraphError::MissingEndpoint);
        };
        let inserted = self
            .adjacency
            .insert(&self.nodes, from, Connection { to, weight });
        log::trace!("insert_edge: {from:?} -> {to:?}, inserted={inserted}");
        Ok(inserted)
    }

    /// Removes a node together with every edge coming from or going to it. Returns false if the
    /// node does not exist.
    pub fn delete_node<Q>(&mut self, value: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(id) = self.nodes.find(value) else {
            return false;
        };
        let outgoing = self.adjacency.erase_node_entry(id).len();
        let incoming = self.adjacency.retain_all(|connection| connection.to != id);
        self.nodes.remove(id);
        log::debug!(
            "delete_node: {id:?}, removed {outgoing} outgoing and {incoming} incoming edges"
        );
        true
    }

    /// Renames the node `old` to `new` in place. Every edge of the node, outgoing or incoming, is
    /// kept and follows the new value.
    ///
    /// Returns `Ok(false)` and leaves the graph untouched when a node equal to `new` already
    /// exists; use [`merge_replace`](Self::merge_replace) to combine two existing nodes.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingNode`] if `old` is not a node of the graph.
    pub fn replace<Q>(&mut self, old: &Q, new: N) -> Result<bool, GraphError>
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let id = self.find_node(old, NodeOperation::Replace)?;
        if self.nodes.rename(id, new).is_none() {
            return Ok(false);
        }
        let resorted = self.adjacency.resort_targeting(&self.nodes, id);
        log::debug!("replace: renamed {id:?}, {resorted} connection lists sorted again");
        Ok(true)
    }

    /// Merges node `old` into node `new`.
    ///
    /// Every edge touching `old` is redirected to touch `new` instead, after which `old` is
    /// removed. Edges which become identical to an existing edge are dropped, so that the graph
    /// never holds the same `(source, destination, weight)` twice. Merging a node into itself does
    /// nothing.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingOperand`] if either `old` or `new` is not a node of the graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordgraph::Graph;
    ///
    /// let mut graph = Graph::from_edges([(1, 2, "A"), (2, 3, "B"), (3, 4, "B"), (2, 4, "C")]);
    /// graph.merge_replace(&2, &3).unwrap();
    ///
    /// assert!(!graph.is_node(&2));
    /// assert_eq!(vec![3, 4], graph.get_connected(&3).unwrap());
    /// assert_eq!(vec!["B", "C"], graph.get_weights(&3, &4).unwrap());
    /// ```
    pub fn merge_replace<Q>(&mut self, old: &Q, new: &Q) -> Result<(), GraphError>
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (Some(from), Some(to)) = (self.nodes.find(old), self.nodes.find(new)) else {
            return Err(GraphError::MissingOperand);
        };
        if from == to {
            return Ok(());
        }
        let (rewired, dropped_incoming) = self.adjacency.retarget(&self.nodes, from, to);
        let (moved, dropped_outgoing) = self.adjacency.merge_into(&self.nodes, from, to);
        self.nodes.remove(from);
        log::debug!(
            "merge_replace: {from:?} into {to:?}, rewired {rewired}, moved {moved}, dropped {}",
            dropped_incoming + dropped_outgoing
        );
        Ok(())
    }

    /// Returns true if a node equal to `value` exists.
    pub fn is_node<Q>(&self, value: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.nodes.contains(value)
    }

    /// Returns true if there is at least one edge from `src` to `dst`.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingNode`] if `src` or `dst` is not a node of the graph.
    pub fn is_connected<Q>(&self, src: &Q, dst: &Q) -> Result<bool, GraphError>
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let from = self.find_node(src, NodeOperation::IsConnected)?;
        let to = self.find_node(dst, NodeOperation::IsConnected)?;
        Ok(self
            .adjacency
            .connections_of(from)
            .iter()
            .any(|connection| connection.to == to))
    }

    /// Returns a copy of every node value, in ascending order.
    pub fn get_nodes(&self) -> Vec<N>
    where
        N: Clone,
    {
        self.nodes().cloned().collect()
    }

    /// Returns the distinct destinations of the edges leaving `src`, in ascending order.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingNode`] if `src` is not a node of the graph.
    pub fn get_connected<Q>(&self, src: &Q) -> Result<Vec<N>, GraphError>
    where
        N: Borrow<Q> + Clone,
        Q: ?Sized + Ord,
    {
        let from = self.find_node(src, NodeOperation::GetConnected)?;
        let mut connected: Vec<N> = Vec::new();
        for connection in self.adjacency.connections_of(from) {
            let value = &self.nodes[connection.to];
            if connected.last() != Some(value) {
                connected.push(value.clone());
            }
        }
        Ok(connected)
    }

    /// Returns the weights of every edge from `src` to `dst`, in ascending order.
    ///
    /// # Errors
    ///
    /// [`GraphError::MissingNode`] if `src` or `dst` is not a node of the graph.
    pub fn get_weights<Q>(&self, src: &Q, dst: &Q) -> Result<Vec<E>, GraphError>
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
        E: Clone,
    {
        let from = self.find_node(src, NodeOperation::GetWeights)?;
        let to = self.find_node(dst, NodeOperation::GetWeights)?;
        let start = self.adjacency.lower_bound(&self.nodes, from, dst);
        Ok(self.adjacency.connections_of(from)[start..]
            .iter()
            .take_while(|connection| connection.to == to)
            .map(|connection| connection.weight.clone())
            .collect())
    }
}

impl<N: Ord, E: Ord> Extend<(N, N, E)> for Graph<N, E> {
    fn extend<T: IntoIterator<Item = (N, N, E)>>(&mut self, iter: T) {
        for (src, dst, weight) in iter {
            let from = self.resolve(src);
            let to = self.resolve(dst);
            self.adjacency
                .insert(&self.nodes, from, Connection { to, weight });
        }
    }
}

impl<N: Ord, E: Ord> FromIterator<(N, N, E)> for Graph<N, E> {
    fn from_iter<T: IntoIterator<Item = (N, N, E)>>(iter: T) -> Self {
        Self::from_edges(iter)
    }
}

impl<N: Ord, E: Ord, const K: usize> From<[N; K]> for Graph<N, E> {
    fn from(nodes: [N; K]) -> Self {
        Self::from_nodes(nodes)
    }
}

/// Renders every node in ascending order, each followed by its outgoing edges:
///
/// ```text
/// 1 (
///   1 | 1
///   1 | 2
/// )
/// 2 (
/// )
/// ```
///
/// An empty graph renders as an empty string.
impl<N: fmt::Display, E: fmt::Display> fmt::Display for Graph<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in self.nodes.ids() {
            writeln!(f, "{} (", self.nodes[id])?;
            for connection in self.adjacency.connections_of(id) {
                writeln!(f, "  {} | {}", self.nodes[connection.to], connection.weight)?;
            }
            writeln!(f, ")")?;
        }
        Ok(())
    }
}

impl<N: fmt::Debug, E: fmt::Debug> fmt::Debug for Graph<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.nodes.ids().map(|id| {
                let connections = self
                    .adjacency
                    .connections_of(id)
                    .iter()
                    .map(|connection| (&self.nodes[connection.to], &connection.weight))
                    .collect::<Vec<_>>();
                (&self.nodes[id], connections)
            }))
            .finish()
    }
}

/// Two graphs are equal when they have the same nodes and the same edges.
impl<N: PartialEq, E: PartialEq> PartialEq for Graph<N, E> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes().eq(other.nodes()) && self.iter().eq(other.iter())
    }
}

impl<N: Eq, E: Eq> Eq for Graph<N, E> {}
