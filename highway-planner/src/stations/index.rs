//! Ordered station index.
//!
//! A red-black tree keyed by station id. Nodes live in an arena (`Vec<Node>`)
//! and refer to each other by slot index, so parent links are plain indices
//! rather than owning pointers and rotations never leave anything dangling.
//! Released slots are recycled through a free list.

use std::cmp::Ordering;

use tracing::trace;

use super::error::DuplicateStation;
use super::range::{Ascending, Descending};
use super::station::Station;
use crate::cars::DEFAULT_MAX_CARS;
use crate::domain::StationId;

/// Index of a node slot in the arena.
pub(super) type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone)]
pub(super) struct Node {
    pub(super) station: Station,
    pub(super) color: Color,
    pub(super) parent: Option<NodeId>,
    pub(super) left: Option<NodeId>,
    pub(super) right: Option<NodeId>,
}

/// The stations on the highway, ordered by position.
///
/// Lookup, insertion and removal are `O(log n)`. Range iteration walks only
/// the part of the tree that overlaps the requested interval, using an
/// explicit stack bounded by the tree height.
///
/// # Invariants
///
/// - the root is black
/// - no red node has a red child
/// - every path from a node to its empty leaves has the same number of
///   black nodes
/// - an in-order walk yields strictly increasing ids
///
/// # Examples
///
/// ```
/// use highway_planner::domain::StationId;
/// use highway_planner::stations::StationIndex;
///
/// let mut index = StationIndex::new();
/// for id in [30, 10, 20] {
///     index.insert(StationId::new(id)).unwrap();
/// }
///
/// let ids: Vec<u32> = index
///     .range_ascending(StationId::new(15), StationId::new(30))
///     .map(|s| s.id().get())
///     .collect();
/// assert_eq!(ids, vec![20, 30]);
///
/// // Duplicate ids are rejected
/// assert!(index.insert(StationId::new(20)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct StationIndex {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    len: usize,
    max_cars: usize,
}

impl StationIndex {
    /// Create an empty index whose stations hold up to the default number of cars.
    pub fn new() -> Self {
        Self::with_max_cars(DEFAULT_MAX_CARS)
    }

    /// Create an empty index whose stations hold up to `max_cars` cars each.
    pub fn with_max_cars(max_cars: usize) -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
            max_cars,
        }
    }

    /// Number of stations on the highway.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if there are no stations.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Car capacity given to newly inserted stations.
    pub fn max_cars(&self) -> usize {
        self.max_cars
    }

    /// Look up a station by id.
    pub fn search(&self, id: StationId) -> Option<&Station> {
        self.find(id).map(|n| &self.nodes[n].station)
    }

    /// Look up a station by id for modification of its cars.
    pub fn search_mut(&mut self, id: StationId) -> Option<&mut Station> {
        self.find(id).map(|n| &mut self.nodes[n].station)
    }

    /// Returns true if a station with this id exists.
    pub fn contains(&self, id: StationId) -> bool {
        self.find(id).is_some()
    }

    /// Add a station with no cars.
    ///
    /// Returns the new station so the caller can park cars there. If the id
    /// is taken, nothing changes and [`DuplicateStation`] is returned.
    pub fn insert(&mut self, id: StationId) -> Result<&mut Station, DuplicateStation> {
        let mut parent = None;
        let mut cursor = self.root;
        let mut as_left = false;

        while let Some(n) = cursor {
            parent = Some(n);
            match id.cmp(&self.nodes[n].station.id()) {
                Ordering::Equal => return Err(DuplicateStation(id)),
                Ordering::Less => {
                    as_left = true;
                    cursor = self.nodes[n].left;
                }
                Ordering::Greater => {
                    as_left = false;
                    cursor = self.nodes[n].right;
                }
            }
        }

        let node = self.alloc(Node {
            station: Station::new(id, self.max_cars),
            color: Color::Red,
            parent,
            left: None,
            right: None,
        });
        match parent {
            None => self.root = Some(node),
            Some(p) if as_left => self.nodes[p].left = Some(node),
            Some(p) => self.nodes[p].right = Some(node),
        }

        self.insert_fixup(node);
        self.len += 1;
        trace!(station = %id, stations = self.len, "station inserted");

        // Rotations relink nodes but never move them between slots.
        Ok(&mut self.nodes[node].station)
    }

    /// Remove a station and all of its cars.
    ///
    /// Returns false if there is no station with this id.
    pub fn remove(&mut self, id: StationId) -> bool {
        let Some(target) = self.find(id) else {
            return false;
        };

        // The spliced-out node has at most one child: either the target
        // itself or its in-order successor.
        let spliced = match (self.nodes[target].left, self.nodes[target].right) {
            (Some(_), Some(right)) => self.minimum(right),
            _ => target,
        };
        let child = self.nodes[spliced].left.or(self.nodes[spliced].right);
        let parent = self.nodes[spliced].parent;

        if let Some(c) = child {
            self.nodes[c].parent = parent;
        }
        self.replace_child(parent, spliced, child);

        if spliced != target {
            let successor = std::mem::replace(&mut self.nodes[spliced].station, Station::vacant());
            self.nodes[target].station = successor;
        }

        if self.nodes[spliced].color == Color::Black {
            self.delete_fixup(child, parent);
        }

        self.release(spliced);
        self.len -= 1;
        trace!(station = %id, stations = self.len, "station removed");
        true
    }

    /// Stations with `lo <= id <= hi`, in increasing id order.
    pub fn range_ascending(&self, lo: StationId, hi: StationId) -> Ascending<'_> {
        Ascending::new(self, lo, hi)
    }

    /// Stations with `lo <= id <= hi`, in decreasing id order.
    pub fn range_descending(&self, hi: StationId, lo: StationId) -> Descending<'_> {
        Descending::new(self, hi, lo)
    }

    /// All stations in increasing id order.
    pub fn iter(&self) -> Ascending<'_> {
        self.range_ascending(StationId::MIN, StationId::MAX)
    }

    /// All stations in decreasing id order.
    pub fn iter_rev(&self) -> Descending<'_> {
        self.range_descending(StationId::MAX, StationId::MIN)
    }

    pub(super) fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(super) fn node(&self, n: NodeId) -> &Node {
        &self.nodes[n]
    }

    fn find(&self, id: StationId) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(n) = cursor {
            cursor = match id.cmp(&self.nodes[n].station.id()) {
                Ordering::Equal => return Some(n),
                Ordering::Less => self.nodes[n].left,
                Ordering::Greater => self.nodes[n].right,
            };
        }
        None
    }

    fn minimum(&self, mut n: NodeId) -> NodeId {
        while let Some(left) = self.nodes[n].left {
            n = left;
        }
        n
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, n: NodeId) {
        let node = &mut self.nodes[n];
        node.station = Station::vacant();
        node.parent = None;
        node.left = None;
        node.right = None;
        self.free.push(n);
    }

    fn is_red(&self, n: Option<NodeId>) -> bool {
        n.is_some_and(|n| self.nodes[n].color == Color::Red)
    }

    fn set_color(&mut self, n: Option<NodeId>, color: Color) {
        if let Some(n) = n {
            self.nodes[n].color = color;
        }
    }

    /// Point `parent`'s link to `old` (or the root, if `parent` is None) at `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(p) if self.nodes[p].left == Some(old) => self.nodes[p].left = new,
            Some(p) => self.nodes[p].right = new,
        }
    }

    fn rotate_left(&mut self, x: NodeId) {
        let Some(y) = self.nodes[x].right else {
            return;
        };
        let inner = self.nodes[y].left;
        self.nodes[x].right = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(x);
        }
        let parent = self.nodes[x].parent;
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, Some(y));
        self.nodes[y].left = Some(x);
        self.nodes[x].parent = Some(y);
    }

    fn rotate_right(&mut self, x: NodeId) {
        let Some(y) = self.nodes[x].left else {
            return;
        };
        let inner = self.nodes[y].right;
        self.nodes[x].left = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(x);
        }
        let parent = self.nodes[x].parent;
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, Some(y));
        self.nodes[y].right = Some(x);
        self.nodes[x].parent = Some(y);
    }

    fn insert_fixup(&mut self, mut z: NodeId) {
        while let Some(p) = self.nodes[z].parent {
            if self.nodes[p].color == Color::Black {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let Some(g) = self.nodes[p].parent else {
                break;
            };

            if self.nodes[g].left == Some(p) {
                let uncle = self.nodes[g].right;
                if self.is_red(uncle) {
                    self.nodes[p].color = Color::Black;
                    self.set_color(uncle, Color::Black);
                    self.nodes[g].color = Color::Red;
                    z = g;
                    continue;
                }
                if self.nodes[p].right == Some(z) {
                    z = p;
                    self.rotate_left(z);
                }
                let Some(p) = self.nodes[z].parent else {
                    break;
                };
                self.nodes[p].color = Color::Black;
                self.nodes[g].color = Color::Red;
                self.rotate_right(g);
            } else {
                let uncle = self.nodes[g].left;
                if self.is_red(uncle) {
                    self.nodes[p].color = Color::Black;
                    self.set_color(uncle, Color::Black);
                    self.nodes[g].color = Color::Red;
                    z = g;
                    continue;
                }
                if self.nodes[p].left == Some(z) {
                    z = p;
                    self.rotate_right(z);
                }
                let Some(p) = self.nodes[z].parent else {
                    break;
                };
                self.nodes[p].color = Color::Black;
                self.nodes[g].color = Color::Red;
                self.rotate_left(g);
            }
        }

        self.set_color(self.root, Color::Black);
    }

    /// Restore the black height after splicing out a black node.
    ///
    /// `x` is the node that took the spliced node's place (possibly an empty
    /// leaf) and `parent` is its parent, tracked separately because an empty
    /// leaf has no slot to store it in.
    fn delete_fixup(&mut self, mut x: Option<NodeId>, mut parent: Option<NodeId>) {
        while x != self.root && !self.is_red(x) {
            let Some(p) = parent else {
                break;
            };

            if self.nodes[p].left == x {
                let Some(mut w) = self.nodes[p].right else {
                    break;
                };
                if self.nodes[w].color == Color::Red {
                    self.nodes[w].color = Color::Black;
                    self.nodes[p].color = Color::Red;
                    self.rotate_left(p);
                    let Some(next) = self.nodes[p].right else {
                        break;
                    };
                    w = next;
                }

                if !self.is_red(self.nodes[w].left) && !self.is_red(self.nodes[w].right) {
                    self.nodes[w].color = Color::Red;
                    x = Some(p);
                    parent = self.nodes[p].parent;
                    continue;
                }

                if !self.is_red(self.nodes[w].right) {
                    self.set_color(self.nodes[w].left, Color::Black);
                    self.nodes[w].color = Color::Red;
                    self.rotate_right(w);
                    let Some(next) = self.nodes[p].right else {
                        break;
                    };
                    w = next;
                }
                self.nodes[w].color = self.nodes[p].color;
                self.nodes[p].color = Color::Black;
                self.set_color(self.nodes[w].right, Color::Black);
                self.rotate_left(p);
                x = self.root;
            } else {
                let Some(mut w) = self.nodes[p].left else {
                    break;
                };
                if self.nodes[w].color == Color::Red {
                    self.nodes[w].color = Color::Black;
                    self.nodes[p].color = Color::Red;
                    self.rotate_right(p);
                    let Some(next) = self.nodes[p].left else {
                        break;
                    };
                    w = next;
                }

                if !self.is_red(self.nodes[w].left) && !self.is_red(self.nodes[w].right) {
                    self.nodes[w].color = Color::Red;
                    x = Some(p);
                    parent = self.nodes[p].parent;
                    continue;
                }

                if !self.is_red(self.nodes[w].left) {
                    self.set_color(self.nodes[w].right, Color::Black);
                    self.nodes[w].color = Color::Red;
                    self.rotate_left(w);
                    let Some(next) = self.nodes[p].left else {
                        break;
                    };
                    w = next;
                }
                self.nodes[w].color = self.nodes[p].color;
                self.nodes[p].color = Color::Black;
                self.set_color(self.nodes[w].left, Color::Black);
                self.rotate_right(p);
                x = self.root;
            }
        }

        self.set_color(x, Color::Black);
    }

    /// Check every red-black and ordering invariant, returning the black height.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> Result<usize, String> {
        if self.is_red(self.root) {
            return Err("root is red".to_string());
        }
        if let Some(root) = self.root {
            if self.nodes[root].parent.is_some() {
                return Err("root has a parent".to_string());
            }
        }

        let mut count = 0;
        let height = self.check_subtree(self.root, None, None, &mut count)?;
        if count != self.len {
            return Err(format!("len is {} but tree holds {count} nodes", self.len));
        }
        Ok(height)
    }

    #[cfg(test)]
    fn check_subtree(
        &self,
        n: Option<NodeId>,
        lo: Option<StationId>,
        hi: Option<StationId>,
        count: &mut usize,
    ) -> Result<usize, String> {
        let Some(n) = n else {
            return Ok(1);
        };
        *count += 1;
        let node = &self.nodes[n];
        let id = node.station.id();

        if lo.is_some_and(|lo| id <= lo) || hi.is_some_and(|hi| id >= hi) {
            return Err(format!("station {id} is out of order"));
        }
        for child in [node.left, node.right].into_iter().flatten() {
            if self.nodes[child].parent != Some(n) {
                return Err(format!("child of {id} has a stale parent link"));
            }
        }
        if node.color == Color::Red && (self.is_red(node.left) || self.is_red(node.right)) {
            return Err(format!("red station {id} has a red child"));
        }

        let left = self.check_subtree(node.left, lo, Some(id), count)?;
        let right = self.check_subtree(node.right, Some(id), hi, count)?;
        if left != right {
            return Err(format!("black height differs under {id}: {left} vs {right}"));
        }
        Ok(left + usize::from(node.color == Color::Black))
    }
}

impl Default for StationIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(raw: u32) -> StationId {
        StationId::new(raw)
    }

    fn ids<'a>(stations: impl Iterator<Item = &'a Station>) -> Vec<u32> {
        stations.map(|s| s.id().get()).collect()
    }

    fn index_of(raw: &[u32]) -> StationIndex {
        let mut index = StationIndex::new();
        for &id in raw {
            index.insert(sid(id)).unwrap();
        }
        index
    }

    #[test]
    fn empty_index() {
        let index = StationIndex::new();
        assert!(index.is_empty());
        assert!(index.search(sid(1)).is_none());
        assert_eq!(index.iter().count(), 0);
        assert_eq!(index.iter_rev().count(), 0);
        assert_eq!(index.check_invariants().unwrap(), 1);
    }

    #[test]
    fn insert_keeps_order_and_balance() {
        // Sorted insertion is the worst case for an unbalanced tree
        let raw: Vec<u32> = (0..200).collect();
        let index = index_of(&raw);

        assert_eq!(index.len(), 200);
        assert_eq!(ids(index.iter()), raw);
        let black_height = index.check_invariants().unwrap();
        // Height is at most twice the black height
        assert!(black_height <= 9, "black height {black_height}");
    }

    #[test]
    fn duplicate_insert_leaves_station_untouched() {
        let mut index = StationIndex::new();
        index.insert(sid(5)).unwrap().cars_mut().insert(40).unwrap();

        let err = index.insert(sid(5)).unwrap_err();
        assert_eq!(err, DuplicateStation(sid(5)));
        assert_eq!(index.len(), 1);
        assert_eq!(index.search(sid(5)).unwrap().best_range(), 40);
    }

    #[test]
    fn search_finds_inserted() {
        let index = index_of(&[50, 20, 80, 10, 30]);
        for id in [50, 20, 80, 10, 30] {
            assert_eq!(index.search(sid(id)).unwrap().id(), sid(id));
        }
        assert!(index.search(sid(25)).is_none());
        assert!(index.contains(sid(80)));
        assert!(!index.contains(sid(81)));
    }

    #[test]
    fn remove_leaf_inner_and_root() {
        let mut index = index_of(&[50, 20, 80, 10, 30, 70, 90, 60]);

        assert!(index.remove(sid(60))); // leaf
        index.check_invariants().unwrap();
        assert!(index.remove(sid(20))); // two children
        index.check_invariants().unwrap();
        let root_id = index.node(index.root().unwrap()).station.id();
        assert!(index.remove(root_id));
        index.check_invariants().unwrap();

        assert_eq!(index.len(), 5);
        let mut expected = vec![10, 30, 50, 70, 80, 90];
        expected.retain(|&id| id != root_id.get());
        assert_eq!(ids(index.iter()), expected);
    }

    #[test]
    fn remove_twice_reports_missing() {
        let mut index = index_of(&[1, 2, 3]);
        assert!(index.remove(sid(2)));
        assert!(!index.remove(sid(2)));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn remove_with_two_children_keeps_successor_cars() {
        let mut index = index_of(&[20, 10, 30, 25, 35]);
        index.search_mut(sid(25)).unwrap().cars_mut().insert(7).unwrap();
        index.search_mut(sid(30)).unwrap().cars_mut().insert(3).unwrap();

        assert!(index.remove(sid(20)));
        index.check_invariants().unwrap();

        assert_eq!(index.search(sid(25)).unwrap().best_range(), 7);
        assert_eq!(index.search(sid(30)).unwrap().best_range(), 3);
        assert!(index.search(sid(20)).is_none());
    }

    #[test]
    fn slots_are_recycled() {
        let mut index = index_of(&[1, 2, 3, 4]);
        index.remove(sid(2));
        index.remove(sid(3));
        index.insert(sid(10)).unwrap();
        index.insert(sid(11)).unwrap();
        assert_eq!(index.nodes.len(), 4);
        assert_eq!(ids(index.iter()), vec![1, 4, 10, 11]);
        index.check_invariants().unwrap();
    }

    #[test]
    fn remove_everything() {
        let raw: Vec<u32> = (0..64).map(|i| (i * 37) % 64).collect();
        let mut index = index_of(&raw);
        for id in raw {
            assert!(index.remove(sid(id)));
            index.check_invariants().unwrap();
        }
        assert!(index.is_empty());
        assert!(index.root().is_none());
    }

    #[test]
    fn ascending_range_is_bounded() {
        let index = index_of(&[10, 20, 30, 40, 50]);
        assert_eq!(ids(index.range_ascending(sid(20), sid(40))), vec![20, 30, 40]);
        assert_eq!(ids(index.range_ascending(sid(15), sid(45))), vec![20, 30, 40]);
        assert_eq!(ids(index.range_ascending(sid(51), sid(90))), Vec::<u32>::new());
        assert_eq!(ids(index.range_ascending(sid(40), sid(20))), Vec::<u32>::new());
        assert_eq!(ids(index.range_ascending(sid(30), sid(30))), vec![30]);
    }

    #[test]
    fn descending_range_is_bounded() {
        let index = index_of(&[10, 20, 30, 40, 50]);
        assert_eq!(ids(index.range_descending(sid(40), sid(20))), vec![40, 30, 20]);
        assert_eq!(ids(index.range_descending(sid(45), sid(0))), vec![40, 30, 20, 10]);
        assert_eq!(ids(index.range_descending(sid(5), sid(0))), Vec::<u32>::new());
        assert_eq!(ids(index.iter_rev()), vec![50, 40, 30, 20, 10]);
    }

    #[test]
    fn extreme_ids() {
        let index = index_of(&[0, u32::MAX, 7]);
        assert_eq!(ids(index.iter()), vec![0, 7, u32::MAX]);
        assert_eq!(ids(index.iter_rev()), vec![u32::MAX, 7, 0]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u32),
        Remove(u32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0u32..128).prop_map(Op::Insert),
            2 => (0u32..128).prop_map(Op::Remove),
        ]
    }

    proptest! {
        /// Red-black invariants and ordering hold after every operation
        #[test]
        fn invariants_hold(ops in prop::collection::vec(op_strategy(), 0..300)) {
            let mut index = StationIndex::new();
            let mut reference = BTreeSet::new();

            for op in ops {
                match op {
                    Op::Insert(id) => {
                        let inserted = index.insert(StationId::new(id)).is_ok();
                        prop_assert_eq!(inserted, reference.insert(id));
                    }
                    Op::Remove(id) => {
                        prop_assert_eq!(index.remove(StationId::new(id)), reference.remove(&id));
                    }
                }

                if let Err(violation) = index.check_invariants() {
                    return Err(TestCaseError::fail(violation));
                }
                let in_order: Vec<u32> = index.iter().map(|s| s.id().get()).collect();
                let expected: Vec<u32> = reference.iter().copied().collect();
                prop_assert_eq!(in_order, expected);
            }
        }

        /// Range iteration agrees with filtering the full set
        #[test]
        fn ranges_match_reference(
            raw in prop::collection::btree_set(0u32..1000, 0..80),
            a in 0u32..1000,
            b in 0u32..1000,
        ) {
            let mut index = StationIndex::new();
            for &id in &raw {
                index.insert(StationId::new(id)).unwrap();
            }
            let (lo, hi) = (a.min(b), a.max(b));

            let asc: Vec<u32> = index
                .range_ascending(StationId::new(lo), StationId::new(hi))
                .map(|s| s.id().get())
                .collect();
            let expected: Vec<u32> = raw.range(lo..=hi).copied().collect();
            prop_assert_eq!(&asc, &expected);

            let desc: Vec<u32> = index
                .range_descending(StationId::new(hi), StationId::new(lo))
                .map(|s| s.id().get())
                .collect();
            let reversed: Vec<u32> = expected.into_iter().rev().collect();
            prop_assert_eq!(desc, reversed);
        }
    }
}
