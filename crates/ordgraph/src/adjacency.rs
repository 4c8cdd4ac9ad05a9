//! Adjacency index of a graph.
//!
//! Each node ID maps to the list of its outgoing [`Connection`]s. The lists are kept sorted by
//! destination *value* (looked up through the [`NodeStore`]), then by weight, so that no two
//! connections of the same source share a destination and weight.
use crate::store::{NodeId, NodeStore};
use slotmap::SecondaryMap;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// One outgoing edge, stored under its source node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Connection<E> {
    /// Destination node
    pub to: NodeId,
    /// Edge weight
    pub weight: E,
}

/// Outgoing connection lists, keyed by source node.
#[derive(Debug, Clone)]
pub(crate) struct AdjacencyIndex<E> {
    outgoing: SecondaryMap<NodeId, Vec<Connection<E>>>,
}

impl<E> Default for AdjacencyIndex<E> {
    fn default() -> Self {
        Self {
            outgoing: SecondaryMap::default(),
        }
    }
}

impl<E> AdjacencyIndex<E> {
    /// Registers an empty connection list for a newly created node.
    pub fn register(&mut self, id: NodeId) {
        self.outgoing.insert(id, Vec::new());
    }

    /// Sorted outgoing connections of a node. Unknown nodes have no connections.
    pub fn connections_of(&self, id: NodeId) -> &[Connection<E>] {
        self.outgoing.get(id).map_or(&[], Vec::as_slice)
    }

    /// Drops the whole outgoing list of a node, returning it.
    pub fn erase_node_entry(&mut self, id: NodeId) -> Vec<Connection<E>> {
        self.outgoing.remove(id).unwrap_or_default()
    }

    /// Removes the connection at `index` in the list of `id`.
    pub fn remove_at(&mut self, id: NodeId, index: usize) -> Option<Connection<E>> {
        let list = self.outgoing.get_mut(id)?;
        (index < list.len()).then(|| list.remove(index))
    }

    /// Keeps only the connections for which `keep` returns true, in every list. Returns the number
    /// of removed connections.
    pub fn retain_all(&mut self, mut keep: impl FnMut(&Connection<E>) -> bool) -> usize {
        let mut removed = 0;
        for list in self.outgoing.values_mut() {
            let before = list.len();
            list.retain(&mut keep);
            removed += before - list.len();
        }
        removed
    }

    /// Total number of connections.
    pub fn num_connections(&self) -> usize {
        self.outgoing.values().map(Vec::len).sum()
    }

    /// Removes all lists.
    pub fn clear(&mut self) {
        self.outgoing.clear();
    }
}

impl<E: Ord> AdjacencyIndex<E> {
    fn cmp_connection<N, Q>(
        store: &NodeStore<N>,
        connection: &Connection<E>,
        to: &Q,
        weight: &E,
    ) -> Ordering
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Borrow::<Q>::borrow(&store[connection.to])
            .cmp(to)
            .then_with(|| connection.weight.cmp(weight))
    }

    fn search<N, Q>(
        store: &NodeStore<N>,
        list: &[Connection<E>],
        to: &Q,
        weight: &E,
    ) -> Result<usize, usize>
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        list.binary_search_by(|connection| Self::cmp_connection(store, connection, to, weight))
    }

    fn insert_sorted<N: Ord>(
        store: &NodeStore<N>,
        list: &mut Vec<Connection<E>>,
        connection: Connection<E>,
    ) -> bool {
        match Self::search(store, list, &store[connection.to], &connection.weight) {
            Ok(_) => false,
            Err(index) => {
                list.insert(index, connection);
                true
            }
        }
    }

    /// Inserts a connection in the outgoing list of `id`, returning false if an equal
    /// destination/weight pair is already present.
    pub fn insert<N: Ord>(
        &mut self,
        store: &NodeStore<N>,
        id: NodeId,
        connection: Connection<E>,
    ) -> bool {
        if !self.outgoing.contains_key(id) {
            self.register(id);
        }
        Self::insert_sorted(store, &mut self.outgoing[id], connection)
    }

    /// Index of the connection to `to` with the given weight in the list of `id`.
    pub fn position<N, Q>(
        &self,
        store: &NodeStore<N>,
        id: NodeId,
        to: &Q,
        weight: &E,
    ) -> Option<usize>
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Self::search(store, self.connections_of(id), to, weight).ok()
    }

    /// Index of the first connection of `id` whose destination is not less than `to`.
    pub fn lower_bound<N, Q>(&self, store: &NodeStore<N>, id: NodeId, to: &Q) -> usize
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.connections_of(id)
            .partition_point(|connection| Borrow::<Q>::borrow(&store[connection.to]) < to)
    }

    /// Removes the connection to `to` with the given weight from the list of `id`.
    pub fn erase_connection<N, Q>(
        &mut self,
        store: &NodeStore<N>,
        id: NodeId,
        to: &Q,
        weight: &E,
    ) -> bool
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.position(store, id, to, weight) {
            Some(index) => self.remove_at(id, index).is_some(),
            None => false,
        }
    }

    /// Restores the ordering of every list holding a connection to `target`. Needed after the
    /// value of `target` changed. Returns the number of lists that were sorted again.
    pub fn resort_targeting<N: Ord>(&mut self, store: &NodeStore<N>, target: NodeId) -> usize {
        let mut sorted = 0;
        for list in self.outgoing.values_mut() {
            if list.iter().any(|connection| connection.to == target) {
                list.sort_by(|a, b| {
                    store
                        .compare(a.to, b.to)
                        .then_with(|| a.weight.cmp(&b.weight))
                });
                sorted += 1;
            }
        }
        sorted
    }

    /// Points every connection targeting `from` to `to` instead. A rewritten connection which
    /// would duplicate an existing one in the same list is discarded.
    ///
    /// Returns the number of rewritten and discarded connections.
    pub fn retarget<N: Ord>(
        &mut self,
        store: &NodeStore<N>,
        from: NodeId,
        to: NodeId,
    ) -> (usize, usize) {
        let (mut rewired, mut discarded) = (0, 0);
        for list in self.outgoing.values_mut() {
            if !list.iter().any(|connection| connection.to == from) {
                continue;
            }
            let (moved, kept): (Vec<_>, Vec<_>) = std::mem::take(list)
                .into_iter()
                .partition(|connection| connection.to == from);
            *list = kept;
            for Connection { weight, .. } in moved {
                if Self::insert_sorted(store, list, Connection { to, weight }) {
                    rewired += 1;
                } else {
                    discarded += 1;
                }
            }
        }
        (rewired, discarded)
    }

    /// Moves the outgoing list of `from` into the list of `to`. Connections already present in the
    /// list of `to` win over the moved ones.
    ///
    /// Returns the number of moved and discarded connections.
    pub fn merge_into<N: Ord>(
        &mut self,
        store: &NodeStore<N>,
        from: NodeId,
        to: NodeId,
    ) -> (usize, usize) {
        let (mut moved, mut discarded) = (0, 0);
        for connection in self.erase_node_entry(from) {
            if self.insert(store, to, connection) {
                moved += 1;
            } else {
                discarded += 1;
            }
        }
        (moved, discarded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (NodeStore<i32>, AdjacencyIndex<&'static str>, [NodeId; 3]) {
        let mut store = NodeStore::default();
        let mut index = AdjacencyIndex::default();
        let ids = [1, 2, 3].map(|value| {
            let (id, _) = store.resolve(value);
            index.register(id);
            id
        });
        (store, index, ids)
    }

    fn pairs(
        store: &NodeStore<i32>,
        index: &AdjacencyIndex<&'static str>,
        id: NodeId,
    ) -> Vec<(i32, &'static str)> {
        index
            .connections_of(id)
            .iter()
            .map(|c| (store[c.to], c.weight))
            .collect()
    }

    #[test]
    fn test_insert_keeps_order_and_rejects_duplicates() {
        let (store, mut index, [one, two, three]) = setup();

        assert!(index.insert(&store, one, Connection { to: three, weight: "b" }));
        assert!(index.insert(&store, one, Connection { to: two, weight: "z" }));
        assert!(index.insert(&store, one, Connection { to: three, weight: "a" }));
        assert!(!index.insert(&store, one, Connection { to: three, weight: "a" }));

        assert_eq!(vec![(2, "z"), (3, "a"), (3, "b")], pairs(&store, &index, one));
        assert_eq!(3, index.num_connections());
    }

    #[test]
    fn test_erase_connection() {
        let (store, mut index, [one, two, _]) = setup();
        index.insert(&store, one, Connection { to: two, weight: "a" });

        assert!(!index.erase_connection(&store, one, &2, &"b"));
        assert!(index.erase_connection(&store, one, &2, &"a"));
        assert!(index.connections_of(one).is_empty());
    }

    #[test]
    fn test_lower_bound() {
        let (store, mut index, [one, two, three]) = setup();
        index.insert(&store, one, Connection { to: one, weight: "a" });
        index.insert(&store, one, Connection { to: three, weight: "a" });

        assert_eq!(0, index.lower_bound(&store, one, &1));
        assert_eq!(1, index.lower_bound(&store, one, &2));
        assert_eq!(1, index.lower_bound(&store, one, &3));
        assert_eq!(0, index.lower_bound(&store, two, &3));
    }

    #[test]
    fn test_retarget_discards_duplicates() {
        let (store, mut index, [one, two, three]) = setup();
        index.insert(&store, one, Connection { to: two, weight: "a" });
        index.insert(&store, one, Connection { to: two, weight: "b" });
        index.insert(&store, one, Connection { to: three, weight: "a" });

        assert_eq!((1, 1), index.retarget(&store, two, three));
        assert_eq!(vec![(3, "a"), (3, "b")], pairs(&store, &index, one));
    }

    #[test]
    fn test_merge_into_keeps_existing() {
        let (store, mut index, [one, two, three]) = setup();
        index.insert(&store, two, Connection { to: one, weight: "a" });
        index.insert(&store, two, Connection { to: one, weight: "b" });
        index.insert(&store, three, Connection { to: one, weight: "a" });

        assert_eq!((1, 1), index.merge_into(&store, two, three));
        assert!(index.connections_of(two).is_empty());
        assert_eq!(vec![(1, "a"), (1, "b")], pairs(&store, &index, three));
    }

    #[test]
    fn test_resort_after_rename() {
        let (mut store, mut index, [one, two, three]) = setup();
        index.insert(&store, one, Connection { to: two, weight: "a" });
        index.insert(&store, one, Connection { to: three, weight: "a" });

        store.rename(two, 4);
        assert_eq!(1, index.resort_targeting(&store, two));
        assert_eq!(vec![(3, "a"), (4, "a")], pairs(&store, &index, one));
    }
}
