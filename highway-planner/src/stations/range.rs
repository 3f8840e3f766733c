//! Bounded in-order iteration over the station index.
//!
//! Both iterators keep an explicit stack of ancestors still to be visited,
//! so memory is bounded by the tree height. Subtrees lying entirely outside
//! the requested interval are never entered.

use std::iter::FusedIterator;

use super::index::{NodeId, StationIndex};
use super::station::Station;
use crate::domain::StationId;

/// Stations in `[lo, hi]` in increasing id order.
///
/// Created by [`StationIndex::range_ascending`].
#[derive(Debug, Clone)]
pub struct Ascending<'a> {
    index: &'a StationIndex,
    stack: Vec<NodeId>,
    lo: StationId,
    hi: StationId,
}

impl<'a> Ascending<'a> {
    pub(super) fn new(index: &'a StationIndex, lo: StationId, hi: StationId) -> Self {
        let mut iter = Self {
            index,
            stack: Vec::new(),
            lo,
            hi,
        };
        iter.descend(index.root());
        iter
    }

    /// Push the leftmost path of `start`, skipping nodes left of `lo`.
    fn descend(&mut self, start: Option<NodeId>) {
        let mut cursor = start;
        while let Some(n) = cursor {
            let node = self.index.node(n);
            if node.station.id() < self.lo {
                cursor = node.right;
            } else {
                self.stack.push(n);
                cursor = node.left;
            }
        }
    }
}

impl<'a> Iterator for Ascending<'a> {
    type Item = &'a Station;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.stack.pop()?;
        let index = self.index;
        let node = index.node(n);
        if node.station.id() > self.hi {
            self.stack.clear();
            return None;
        }
        self.descend(node.right);
        Some(&node.station)
    }
}

impl FusedIterator for Ascending<'_> {}

/// Stations in `[lo, hi]` in decreasing id order.
///
/// Created by [`StationIndex::range_descending`].
#[derive(Debug, Clone)]
pub struct Descending<'a> {
    index: &'a StationIndex,
    stack: Vec<NodeId>,
    hi: StationId,
    lo: StationId,
}

impl<'a> Descending<'a> {
    pub(super) fn new(index: &'a StationIndex, hi: StationId, lo: StationId) -> Self {
        let mut iter = Self {
            index,
            stack: Vec::new(),
            hi,
            lo,
        };
        iter.descend(index.root());
        iter
    }

    /// Push the rightmost path of `start`, skipping nodes right of `hi`.
    fn descend(&mut self, start: Option<NodeId>) {
        let mut cursor = start;
        while let Some(n) = cursor {
            let node = self.index.node(n);
            if node.station.id() > self.hi {
                cursor = node.left;
            } else {
                self.stack.push(n);
                cursor = node.right;
            }
        }
    }
}

impl<'a> Iterator for Descending<'a> {
    type Item = &'a Station;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.stack.pop()?;
        let index = self.index;
        let node = index.node(n);
        if node.station.id() < self.lo {
            self.stack.clear();
            return None;
        }
        self.descend(node.left);
        Some(&node.station)
    }
}

impl FusedIterator for Descending<'_> {}
