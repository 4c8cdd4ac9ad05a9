#![warn(missing_docs)]
//! # Ordered directed weighted graphs
//!
//! [`Graph<N, E>`] stores unique node values of type `N` and directed edges carrying a weight of
//! type `E`. Two nodes may be connected by several edges as long as their weights differ.
//!
//! Everything is kept in order: nodes by value, and edges by `(source, destination, weight)`. Edges
//! can be walked in both directions, either through an [`EdgeCursor`] (which also supports erasing
//! the edge under it) or through the [`Edges`] iterator.
//!
//! Nodes have a stable identity internally, which lets them be renamed in place with
//! [`Graph::replace`], or merged into one another with [`Graph::merge_replace`].
//!
//! ```
//! use ordgraph::graph;
//!
//! let mut g = graph![(1, 1, 1), (1, 1, 2), (3, 1, 0)];
//! g.insert_node(2);
//! assert_eq!("1 (\n  1 | 1\n  1 | 2\n)\n2 (\n)\n3 (\n  1 | 0\n)\n", g.to_string());
//! ```

mod adjacency;
pub mod cursor;
pub mod errors;
mod graph;
#[cfg(feature = "serialize")]
pub mod serde;
mod store;

pub use cursor::{EdgeCursor, Edges};
pub use errors::{GraphError, NodeOperation};
pub use graph::Graph;

/// Builds a [`Graph`] from a list of node values, or from a list of
/// `(source, destination, weight)` triples.
///
/// ```
/// use ordgraph::graph;
///
/// let nodes: ordgraph::Graph<char, u8> = graph!['a', 'b', 'x', 'y'];
/// assert!(nodes.is_node(&'a'));
/// assert_eq!(0, nodes.num_edges());
///
/// let edges = graph![("a", "b", 1), ("b", "c", 2)];
/// assert!(edges.is_connected(&"a", &"b").unwrap());
/// ```
#[macro_export]
macro_rules! graph {
    () => {
        $crate::Graph::new()
    };
    ($(($src:expr, $dst:expr, $weight:expr)),+ $(,)?) => {
        $crate::Graph::from_edges([$(($src, $dst, $weight)),+])
    };
    ($($node:expr),+ $(,)?) => {
        $crate::Graph::from_nodes([$($node),+])
    };
}
