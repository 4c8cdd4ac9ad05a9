//! Ordered enumeration of the edges of a [`Graph`].
//!
//! The edges of a graph form a single sequence sorted by `(source, destination, weight)`. An
//! [`EdgeCursor`] is a position in that sequence; it does not borrow the graph, and every cursor
//! method takes the graph explicitly. [`Edges`] wraps a pair of cursors into a double-ended
//! iterator.
use crate::adjacency::Connection;
use crate::Graph;
use std::borrow::Borrow;
use std::iter::FusedIterator;

/// Position in the ordered edge sequence of a graph.
///
/// A cursor is either on an edge or at the end of the sequence. It stays meaningful until the
/// graph is structurally modified; the only exception is [`Graph::erase_at`], which consumes a
/// cursor and returns a valid one. Using an outdated cursor is memory-safe, but it may point to a
/// different edge, or to none.
///
/// Two cursors are equal when they are both at the end, or both on the same position.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct EdgeCursor(Position);

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
enum Position {
    /// On the `connection`-th outgoing edge of the `source`-th node (in ascending node order).
    At { source: usize, connection: usize },
    #[default]
    End,
}

impl EdgeCursor {
    /// The end-of-sequence cursor.
    pub const END: Self = Self(Position::End);

    const fn at(source: usize, connection: usize) -> Self {
        Self(Position::At { source, connection })
    }

    /// Returns true if this cursor is past the last edge.
    pub fn is_end(&self) -> bool {
        matches!(self.0, Position::End)
    }
}

impl<N, E> Graph<N, E> {
    fn connections_at(&self, source: usize) -> &[Connection<E>] {
        self.nodes
            .id_at(source)
            .map_or(&[], |id| self.adjacency.connections_of(id))
    }

    /// First edge of the first non-empty source at or after `source`.
    fn first_from(&self, source: usize) -> EdgeCursor {
        (source..self.nodes.len())
            .find(|&source| !self.connections_at(source).is_empty())
            .map_or(EdgeCursor::END, |source| EdgeCursor::at(source, 0))
    }

    /// Last edge of the last non-empty source strictly before `source`.
    fn last_before(&self, source: usize) -> EdgeCursor {
        (0..source.min(self.nodes.len()))
            .rev()
            .find_map(|source| {
                let len = self.connections_at(source).len();
                len.checked_sub(1)
                    .map(|connection| EdgeCursor::at(source, connection))
            })
            .unwrap_or(EdgeCursor::END)
    }

    /// Cursor on the first edge, or [`EdgeCursor::END`] if the graph has no edges.
    pub fn begin(&self) -> EdgeCursor {
        self.first_from(0)
    }

    /// The end-of-sequence cursor.
    pub fn end(&self) -> EdgeCursor {
        EdgeCursor::END
    }

    /// Moves the cursor to the next edge. Advancing past the last edge gives the end cursor, and
    /// the end cursor stays there.
    pub fn advance(&self, cursor: EdgeCursor) -> EdgeCursor {
        match cursor.0 {
            Position::End => EdgeCursor::END,
            Position::At { source, connection } => {
                if connection + 1 < self.connections_at(source).len() {
                    EdgeCursor::at(source, connection + 1)
                } else {
                    self.first_from(source + 1)
                }
            }
        }
    }

    /// Moves the cursor to the previous edge. Retreating from the end cursor lands on the last
    /// edge; retreating from the first edge gives the end cursor.
    pub fn retreat(&self, cursor: EdgeCursor) -> EdgeCursor {
        match cursor.0 {
            Position::End => self.last_before(self.nodes.len()),
            Position::At { source, connection } => {
                let len = self.connections_at(source).len();
                match connection.min(len).checked_sub(1) {
                    Some(connection) => EdgeCursor::at(source, connection),
                    None => self.last_before(source),
                }
            }
        }
    }

    /// Returns the `(source, destination, weight)` triple under the cursor, or `None` at the end.
    pub fn edge(&self, cursor: EdgeCursor) -> Option<(&N, &N, &E)> {
        let Position::At { source, connection } = cursor.0 else {
            return None;
        };
        let id = self.nodes.id_at(source)?;
        let Connection { to, weight } = self.adjacency.connections_of(id).get(connection)?;
        Some((self.nodes.get(id)?, self.nodes.get(*to)?, weight))
    }

    /// Removes the edge under the cursor, returning a cursor to the edge that followed it (or the
    /// end cursor if it was the last one). Does nothing when given the end cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordgraph::Graph;
    ///
    /// let mut graph = Graph::from_edges([(1, 1, 'a'), (1, 2, 'b'), (2, 2, 'c')]);
    /// let next = graph.erase_at(graph.begin());
    /// assert_eq!(Some((&1, &2, &'b')), graph.edge(next));
    ///
    /// let last = graph.retreat(graph.end());
    /// assert!(graph.erase_at(last).is_end());
    /// assert_eq!(1, graph.num_edges());
    /// ```
    pub fn erase_at(&mut self, cursor: EdgeCursor) -> EdgeCursor {
        let Position::At { source, connection } = cursor.0 else {
            return EdgeCursor::END;
        };
        let Some(id) = self.nodes.id_at(source) else {
            return EdgeCursor::END;
        };
        if self.adjacency.remove_at(id, connection).is_none() {
            return EdgeCursor::END;
        }
        log::trace!("erase_at: {id:?}[{connection}]");
        if connection < self.connections_at(source).len() {
            EdgeCursor::at(source, connection)
        } else {
            self.first_from(source + 1)
        }
    }

    /// Iterates over all edges as `(source, destination, weight)`, in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordgraph::Graph;
    ///
    /// let graph = Graph::from_edges([(2, 2, 0.5), (1, 2, 0.0), (1, 1, 1.5)].map(|(s, d, w)| {
    ///     (s, d, (w * 10.0) as i32)
    /// }));
    /// let forward = graph.iter().map(|(s, d, w)| (*s, *d, *w)).collect::<Vec<_>>();
    /// assert_eq!(vec![(1, 1, 15), (1, 2, 0), (2, 2, 5)], forward);
    ///
    /// let last = graph.iter().rev().next();
    /// assert_eq!(Some((&2, &2, &5)), last);
    /// ```
    pub fn iter(&self) -> Edges<'_, N, E> {
        Edges {
            graph: self,
            front: self.begin(),
            back: EdgeCursor::END,
            remaining: self.num_edges(),
        }
    }
}

impl<N: Ord, E: Ord> Graph<N, E> {
    /// Returns a cursor on the edge `src -> dst` with the given weight, or the end cursor if there
    /// is no such edge.
    pub fn find<Q>(&self, src: &Q, dst: &Q, weight: &E) -> EdgeCursor
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Ok(source) = self.nodes.position(src) else {
            return EdgeCursor::END;
        };
        let id = self.nodes.id_at(source);
        id.and_then(|id| self.adjacency.position(&self.nodes, id, dst, weight))
            .map_or(EdgeCursor::END, |connection| {
                EdgeCursor::at(source, connection)
            })
    }

    /// Removes the edge `src -> dst` with the given weight. Returns false if there is no such edge.
    pub fn erase<Q>(&mut self, src: &Q, dst: &Q, weight: &E) -> bool
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(id) = self.nodes.find(src) else {
            return false;
        };
        let erased = self
            .adjacency
            .erase_connection(&self.nodes, id, dst, weight);
        log::trace!("erase: {id:?}, erased={erased}");
        erased
    }
}

impl<'a, N, E> IntoIterator for &'a Graph<N, E> {
    type Item = (&'a N, &'a N, &'a E);
    type IntoIter = Edges<'a, N, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Double-ended iterator over the edges of a [`Graph`], in ascending
/// `(source, destination, weight)` order.
///
/// Created by [`Graph::iter`].
#[derive(Debug)]
pub struct Edges<'a, N, E> {
    graph: &'a Graph<N, E>,
    front: EdgeCursor,
    /// One past the last edge not yet yielded from the back.
    back: EdgeCursor,
    remaining: usize,
}

impl<N, E> Clone for Edges<'_, N, E> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, N, E> Iterator for Edges<'a, N, E> {
    type Item = (&'a N, &'a N, &'a E);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let edge = self.graph.edge(self.front)?;
        self.front = self.graph.advance(self.front);
        self.remaining -= 1;
        Some(edge)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<N, E> DoubleEndedIterator for Edges<'_, N, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back = self.graph.retreat(self.back);
        self.remaining -= 1;
        self.graph.edge(self.back)
    }
}

impl<N, E> ExactSizeIterator for Edges<'_, N, E> {}

impl<N, E> FusedIterator for Edges<'_, N, E> {}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::NotNan;

    type Weight = NotNan<f64>;

    fn w(value: f64) -> Weight {
        NotNan::new(value).unwrap()
    }

    /// Nodes `0..=3`, edges `1 -> 1: 0.5`, `1 -> 1: 1.5`, `1 -> 2: 0`, `2 -> 2: 0.1`.
    fn sample() -> Graph<i32, Weight> {
        let mut graph = Graph::from_edges([
            (2, 2, w(0.1)),
            (1, 1, w(1.5)),
            (1, 2, w(0.0)),
            (1, 1, w(0.5)),
        ]);
        graph.insert_node(0);
        graph.insert_node(3);
        graph
    }

    fn triple(graph: &Graph<i32, Weight>, cursor: EdgeCursor) -> Option<(i32, i32, f64)> {
        graph
            .edge(cursor)
            .map(|(src, dst, weight)| (*src, *dst, weight.into_inner()))
    }

    #[test]
    fn test_begin_skips_empty_sources() {
        let graph = sample();
        assert_eq!(Some((1, 1, 0.5)), triple(&graph, graph.begin()));
    }

    #[test]
    fn test_advance_in_order() {
        let graph = sample();
        let mut cursor = graph.begin();
        let mut seen = Vec::new();
        while !cursor.is_end() {
            seen.extend(triple(&graph, cursor));
            cursor = graph.advance(cursor);
        }
        assert_eq!(
            vec![(1, 1, 0.5), (1, 1, 1.5), (1, 2, 0.0), (2, 2, 0.1)],
            seen
        );
        assert_eq!(graph.end(), graph.advance(cursor));
    }

    #[test]
    fn test_retreat_from_end() {
        let graph = sample();
        let mut cursor = graph.end();
        let mut seen = Vec::new();
        loop {
            cursor = graph.retreat(cursor);
            let Some(edge) = triple(&graph, cursor) else {
                break;
            };
            seen.push(edge);
        }
        assert_eq!(
            vec![(2, 2, 0.1), (1, 2, 0.0), (1, 1, 1.5), (1, 1, 0.5)],
            seen
        );
        assert!(graph.retreat(graph.begin()).is_end());
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::<i32, i32>::from_nodes([1, 2]);
        assert_eq!(graph.begin(), graph.end());
        assert!(graph.retreat(graph.end()).is_end());
        assert_eq!(graph.end(), graph.find(&1, &1, &1));
        assert_eq!(None, graph.edge(graph.begin()));
    }

    #[test]
    fn test_find() {
        let graph = sample();
        let cursor = graph.find(&1, &1, &w(0.5));
        assert_ne!(graph.end(), cursor);
        assert_eq!(graph.begin(), cursor);

        assert_eq!(graph.end(), graph.find(&1, &1, &w(0.6)));
        assert_eq!(graph.end(), graph.find(&0, &0, &w(0.5)));
        assert_eq!(graph.end(), graph.find(&7, &1, &w(0.5)));
    }

    #[test]
    fn test_erase_at_first() {
        let mut graph = sample();
        let next = graph.erase_at(graph.begin());
        assert_eq!(Some((1, 1, 1.5)), triple(&graph, next));
        assert_eq!(3, graph.iter().count());
    }

    #[test]
    fn test_erase_at_crosses_sources() {
        let mut graph = sample();
        let cursor = graph.retreat(graph.retreat(graph.end()));
        assert_eq!(Some((1, 2, 0.0)), triple(&graph, cursor));

        let next = graph.erase_at(cursor);
        assert_eq!(Some((2, 2, 0.1)), triple(&graph, next));
        assert_eq!(3, graph.num_edges());
    }

    #[test]
    fn test_erase_at_last() {
        let mut graph = sample();
        let last = graph.retreat(graph.end());
        assert!(graph.erase_at(last).is_end());
        assert_eq!(3, graph.num_edges());
    }

    #[test]
    fn test_erase_at_end_is_noop() {
        let mut graph = sample();
        assert!(graph.erase_at(EdgeCursor::END).is_end());
        assert_eq!(4, graph.num_edges());
    }

    #[test]
    fn test_erase() {
        let mut graph = sample();
        assert!(graph.erase(&1, &2, &w(0.0)));
        assert!(!graph.erase(&1, &2, &w(0.0)));
        assert!(!graph.erase(&9, &2, &w(0.0)));
        assert_eq!(3, graph.num_edges());
    }

    #[test]
    fn test_iter_both_ends() {
        let graph = sample();
        let mut edges = graph.iter();
        assert_eq!(4, edges.len());

        let first = edges.next().map(|(s, d, w)| (*s, *d, w.into_inner()));
        let last = edges.next_back().map(|(s, d, w)| (*s, *d, w.into_inner()));
        assert_eq!(Some((1, 1, 0.5)), first);
        assert_eq!(Some((2, 2, 0.1)), last);
        assert_eq!(2, edges.len());

        assert!(edges.next().is_some());
        assert!(edges.next_back().is_some());
        assert_eq!(None, edges.next());
        assert_eq!(None, edges.next_back());
    }

    #[test]
    fn test_rev_matches_reversed_forward() {
        let graph = sample();
        let mut forward = graph.iter().collect::<Vec<_>>();
        forward.reverse();
        let backward = (&graph).into_iter().rev().collect::<Vec<_>>();
        assert_eq!(forward, backward);
    }
}
