//! Node storage.
//!
//! Every node value lives in a [`SlotMap`] arena; its key is the node's identity and stays valid
//! for as long as the node exists, even if its value is renamed. A second, sorted list of keys
//! gives the nodes in ascending value order, which is both the lookup index and the source order
//! used by edge cursors.
use slotmap::{new_key_type, SlotMap};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::ops;

new_key_type! {
    /// Stable identity of a node inside a [`NodeStore`].
    pub(crate) struct NodeId;
}

/// Owns the set of node values of a graph, keeping them unique and sorted.
#[derive(Debug, Clone)]
pub(crate) struct NodeStore<N> {
    slots: SlotMap<NodeId, N>,
    /// Node IDs sorted by ascending value.
    order: Vec<NodeId>,
}

impl<N> Default for NodeStore<N> {
    fn default() -> Self {
        Self {
            slots: SlotMap::default(),
            order: Vec::new(),
        }
    }
}

impl<N> ops::Index<NodeId> for NodeStore<N> {
    type Output = N;

    fn index(&self, index: NodeId) -> &Self::Output {
        &self.slots[index]
    }
}

impl<N> NodeStore<N> {
    /// Number of stored nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns the value stored for this ID, if the node exists.
    pub fn get(&self, id: NodeId) -> Option<&N> {
        self.slots.get(id)
    }

    /// Returns the ID at the given rank in ascending value order.
    pub fn id_at(&self, position: usize) -> Option<NodeId> {
        self.order.get(position).copied()
    }

    /// Iterates over node IDs in ascending value order.
    pub fn ids(&self) -> impl '_ + DoubleEndedIterator<Item = NodeId> + ExactSizeIterator {
        self.order.iter().copied()
    }

    /// Iterates over node values in ascending order.
    pub fn values(&self) -> impl '_ + DoubleEndedIterator<Item = &N> + ExactSizeIterator {
        self.order.iter().map(|id| &self.slots[*id])
    }

    /// Removes all nodes.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
    }
}

impl<N: Ord> NodeStore<N> {
    /// Binary search over the sorted node list.
    ///
    /// Returns `Ok(rank)` if a node equal to `value` exists, or `Err(rank)` with the rank at which
    /// it would have to be inserted to keep the list sorted.
    pub fn position<Q>(&self, value: &Q) -> Result<usize, usize>
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.order
            .binary_search_by(|id| Borrow::<Q>::borrow(&self.slots[*id]).cmp(value))
    }

    /// Looks up the ID of the node equal to `value`.
    pub fn find<Q>(&self, value: &Q) -> Option<NodeId>
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.position(value).ok().map(|rank| self.order[rank])
    }

    /// Returns true if a node equal to `value` is stored.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.position(value).is_ok()
    }

    /// Returns the ID of the node equal to `value`, storing it first if it is not present yet.
    ///
    /// The returned flag is true when a new node was created.
    pub fn resolve(&mut self, value: N) -> (NodeId, bool) {
        match self.position(&value) {
            Ok(rank) => (self.order[rank], false),
            Err(rank) => {
                let id = self.slots.insert(value);
                self.order.insert(rank, id);
                (id, true)
            }
        }
    }

    /// Removes a node, returning its value.
    ///
    /// Connections pointing to this node must have been removed beforehand.
    pub fn remove(&mut self, id: NodeId) -> Option<N> {
        let rank = self.position(self.slots.get(id)?).ok()?;
        debug_assert_eq!(self.order[rank], id);
        self.order.remove(rank);
        self.slots.remove(id)
    }

    /// Changes the value stored for a node in place, keeping its ID.
    ///
    /// Returns the previous value, or `None` (leaving the store untouched) if the node does not
    /// exist or another node already holds `value`.
    pub fn rename(&mut self, id: NodeId, value: N) -> Option<N> {
        if self.contains(&value) {
            return None;
        }
        let old_rank = self.position(self.slots.get(id)?).ok()?;
        self.order.remove(old_rank);
        let previous = std::mem::replace(&mut self.slots[id], value);
        let new_rank = self
            .position(&self.slots[id])
            .unwrap_or_else(|rank| rank);
        self.order.insert(new_rank, id);
        Some(previous)
    }

    /// Compares the values of two stored nodes.
    pub fn compare(&self, a: NodeId, b: NodeId) -> Ordering {
        self.slots[a].cmp(&self.slots[b])
    }
}
