//! Arena Treap
//!
//! A randomized balanced tree over an arena of nodes, shared by the two
//! public specializations:
//!
//! - the character rope orders nodes *implicitly* by their in-order rank,
//!   derived from subtree sizes (no stored key);
//! - the leaderboard orders nodes *explicitly* by comparing payloads.
//!
//! Structure:
//! - Nodes live in a `Vec<Option<Node<T>>>` addressed by `u32` handles,
//!   with a free list for slot reuse
//! - Each node carries a random priority, fixed at creation, maintained
//!   as a max-heap; expected height is O(log n) for any insertion order
//! - Each node carries its subtree size (self included), re-established
//!   bottom-up after every structural mutation
//!
//! Operations (expected complexity):
//! - merge: O(log n) - combine two ordered trees
//! - split_size / split_key: O(log n) - divide at a rank or a key
//! - insert_at / remove_at / insert_key / remove_key: O(log n)
//! - take_range: O(log n + k) - detach and drain a rank range
//! - visit_range: O(log n + k) - read a rank range without mutating
//! - get: O(log n) - order-statistics lookup
//! - iter: O(n) total, O(log n + k) for the first k items
//!
//! A dangling handle or a size/heap violation is a programming error, not
//! a recoverable condition; accessors panic immediately rather than let a
//! corrupted tree answer queries.

use std::cmp::Ordering;

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use smallvec::SmallVec;

/// Index into the node arena.
type Idx = u32;

/// Sentinel index for the absent subtree.
const NULL: Idx = Idx::MAX;

/// Inline capacity of traversal stacks. Expected depth is O(log n), so
/// this only spills for trees of roughly a billion nodes or a very
/// unlucky priority draw.
const STACK_DEPTH: usize = 48;

struct Node<T> {
    item: T,
    priority: u64,
    size: u32,
    left: Idx,
    right: Idx,
}

/// A treap with arena-allocated nodes.
///
/// Positional operations treat the tree as a sequence indexed by in-order
/// rank; keyed operations (requiring `T: Ord`) treat it as a sorted set.
/// One tree must stick to one of the two views: mixing positional inserts
/// with keyed lookups has no meaningful ordering.
pub(crate) struct Treap<T> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<Idx>,
    root: Idx,
    rng: StdRng,
}

impl<T> Treap<T> {
    /// Create an empty treap with entropy-seeded priorities.
    pub(crate) fn new() -> Treap<T> {
        return Treap::from_rng(StdRng::from_entropy());
    }

    /// Create an empty treap with a fixed priority seed, for tests and
    /// benchmarks that want a reproducible shape.
    pub(crate) fn with_seed(seed: u64) -> Treap<T> {
        return Treap::from_rng(StdRng::seed_from_u64(seed));
    }

    fn from_rng(rng: StdRng) -> Treap<T> {
        return Treap {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NULL,
            rng,
        };
    }

    /// Number of items in the tree. O(1): the root's size annotation.
    pub(crate) fn len(&self) -> usize {
        if self.root == NULL {
            return 0;
        }
        return self.node(self.root).size as usize;
    }

    pub(crate) fn is_empty(&self) -> bool {
        return self.root == NULL;
    }

    // -------------------------------------------------------------------
    // Arena plumbing
    // -------------------------------------------------------------------

    #[inline(always)]
    fn node(&self, idx: Idx) -> &Node<T> {
        return self.nodes[idx as usize]
            .as_ref()
            .expect("dangling treap handle");
    }

    #[inline(always)]
    fn node_mut(&mut self, idx: Idx) -> &mut Node<T> {
        return self.nodes[idx as usize]
            .as_mut()
            .expect("dangling treap handle");
    }

    #[inline(always)]
    fn size_of(&self, idx: Idx) -> u32 {
        if idx == NULL {
            return 0;
        }
        return self.node(idx).size;
    }

    /// Allocate a fresh single-node subtree. The priority is drawn once
    /// here and never mutated afterwards.
    fn alloc(&mut self, item: T) -> Idx {
        let node = Node {
            item,
            priority: self.rng.next_u64(),
            size: 1,
            left: NULL,
            right: NULL,
        };
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx as usize] = Some(node);
                return idx;
            }
            None => {
                let idx = self.nodes.len();
                assert!(idx < NULL as usize, "treap arena exhausted");
                self.nodes.push(Some(node));
                return idx as Idx;
            }
        }
    }

    /// Release a slot back to the free list, returning the node so the
    /// caller can keep walking its (still-allocated) children.
    fn release(&mut self, idx: Idx) -> Node<T> {
        let node = self.nodes[idx as usize]
            .take()
            .expect("treap slot released twice");
        self.free.push(idx);
        return node;
    }

    /// Re-establish the size annotation from the children's.
    fn update(&mut self, idx: Idx) {
        let left = self.node(idx).left;
        let right = self.node(idx).right;
        let size = 1 + self.size_of(left) + self.size_of(right);
        self.node_mut(idx).size = size;
    }

    // -------------------------------------------------------------------
    // Core primitives: merge and the two splits
    // -------------------------------------------------------------------

    /// Merge two trees where everything in `l` precedes everything in `r`.
    /// The root with the higher priority wins; the other tree sinks into
    /// the matching child. Consumes both roots.
    fn merge(&mut self, l: Idx, r: Idx) -> Idx {
        if l == NULL {
            return r;
        }
        if r == NULL {
            return l;
        }
        if self.node(l).priority >= self.node(r).priority {
            let mid = self.node(l).right;
            let merged = self.merge(mid, r);
            self.node_mut(l).right = merged;
            self.update(l);
            return l;
        } else {
            let mid = self.node(r).left;
            let merged = self.merge(l, mid);
            self.node_mut(r).left = merged;
            self.update(r);
            return r;
        }
    }

    /// Split by rank: the first `k` items in order go left, the rest right.
    fn split_size(&mut self, root: Idx, k: u32) -> (Idx, Idx) {
        if root == NULL {
            return (NULL, NULL);
        }
        let left = self.node(root).left;
        let right = self.node(root).right;
        let left_size = self.size_of(left);
        if left_size >= k {
            let (a, b) = self.split_size(left, k);
            self.node_mut(root).left = b;
            self.update(root);
            return (a, root);
        } else {
            let (a, b) = self.split_size(right, k - left_size - 1);
            self.node_mut(root).right = a;
            self.update(root);
            return (root, b);
        }
    }

    // -------------------------------------------------------------------
    // Positional (implicit-key) operations
    // -------------------------------------------------------------------

    /// Insert at a rank, clamped to `[0, len]`.
    pub(crate) fn insert_at(&mut self, index: usize, item: T) {
        let k = index.min(self.len()) as u32;
        let fresh = self.alloc(item);
        let root = self.root;
        let (l, r) = self.split_size(root, k);
        let lm = self.merge(l, fresh);
        self.root = self.merge(lm, r);
    }

    /// Append after the last item.
    pub(crate) fn push_back(&mut self, item: T) {
        let fresh = self.alloc(item);
        let root = self.root;
        self.root = self.merge(root, fresh);
    }

    /// Remove the item at a rank. `None` past the end.
    pub(crate) fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.len() {
            return None;
        }
        let root = self.root;
        let (l, rest) = self.split_size(root, index as u32);
        let (mid, r) = self.split_size(rest, 1);
        self.root = self.merge(l, r);
        let node = self.release(mid);
        return Some(node.item);
    }

    /// Detach the rank range `[start, end)` (clamped) and drain it in
    /// order. The drained slots go back on the free list.
    pub(crate) fn take_range(&mut self, start: usize, end: usize) -> Vec<T> {
        let len = self.len();
        let start = start.min(len);
        let end = end.min(len);
        if start >= end {
            return Vec::new();
        }
        let root = self.root;
        let (l, rest) = self.split_size(root, start as u32);
        let (mid, r) = self.split_size(rest, (end - start) as u32);
        self.root = self.merge(l, r);
        let mut out = Vec::with_capacity(end - start);
        self.drain_in_order(mid, &mut out);
        return out;
    }

    fn drain_in_order(&mut self, root: Idx, out: &mut Vec<T>) {
        if root == NULL {
            return;
        }
        let node = self.release(root);
        self.drain_in_order(node.left, out);
        out.push(node.item);
        self.drain_in_order(node.right, out);
    }

    /// Splice a run of items in at a rank (clamped): build a sub-tree from
    /// the items, then stitch it in with one split and two merges.
    pub(crate) fn splice_at(&mut self, index: usize, items: impl IntoIterator<Item = T>) {
        let mut sub = NULL;
        for item in items {
            let fresh = self.alloc(item);
            sub = self.merge(sub, fresh);
        }
        if sub == NULL {
            return;
        }
        let k = index.min(self.len()) as u32;
        let root = self.root;
        let (l, r) = self.split_size(root, k);
        let lm = self.merge(l, sub);
        self.root = self.merge(lm, r);
    }

    /// Order-statistics lookup: the item at a rank, without mutating.
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }
        let mut idx = self.root;
        let mut k = index as u32;
        loop {
            let node = self.node(idx);
            let left_size = self.size_of(node.left);
            match k.cmp(&left_size) {
                Ordering::Less => idx = node.left,
                Ordering::Equal => return Some(&node.item),
                Ordering::Greater => {
                    k -= left_size + 1;
                    idx = node.right;
                }
            }
        }
    }

    /// Visit the rank range `[start, end)` (clamped) in order without any
    /// structural change, pruning subtrees wholly outside the range.
    pub(crate) fn visit_range(&self, start: usize, end: usize, visit: &mut impl FnMut(&T)) {
        let len = self.len();
        let start = start.min(len);
        let end = end.min(len);
        if start < end {
            self.visit_nodes(self.root, 0, start, end, visit);
        }
    }

    /// `offset` is the rank of the subtree's first item in the whole tree.
    fn visit_nodes(
        &self,
        root: Idx,
        offset: usize,
        start: usize,
        end: usize,
        visit: &mut impl FnMut(&T),
    ) {
        if root == NULL {
            return;
        }
        let node = self.node(root);
        let pos = offset + self.size_of(node.left) as usize;
        if start < pos && end > offset {
            self.visit_nodes(node.left, offset, start, end, visit);
        }
        if start <= pos && pos < end {
            visit(&node.item);
        }
        let after = pos + 1;
        let subtree_end = offset + node.size as usize;
        if end > after && start < subtree_end {
            self.visit_nodes(node.right, after, start, end, visit);
        }
    }

    /// In-order iterator over the whole tree.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            treap: self,
            stack: SmallVec::new(),
        };
        iter.descend_left(self.root);
        return iter;
    }
}

impl<T: Ord> Treap<T> {
    /// Split by key: items strictly less than `key` go left, the rest
    /// right.
    fn split_key(&mut self, root: Idx, key: &T) -> (Idx, Idx) {
        if root == NULL {
            return (NULL, NULL);
        }
        let left = self.node(root).left;
        let right = self.node(root).right;
        if self.node(root).item < *key {
            let (a, b) = self.split_key(right, key);
            self.node_mut(root).right = a;
            self.update(root);
            return (root, b);
        } else {
            let (a, b) = self.split_key(left, key);
            self.node_mut(root).left = b;
            self.update(root);
            return (a, root);
        }
    }

    /// Number of items strictly before `key` in key order. O(log n):
    /// descends once, summing the left subtrees it passes.
    pub(crate) fn rank_of(&self, key: &T) -> usize {
        let mut idx = self.root;
        let mut before = 0usize;
        while idx != NULL {
            let node = self.node(idx);
            if node.item < *key {
                before += self.size_of(node.left) as usize + 1;
                idx = node.right;
            } else {
                idx = node.left;
            }
        }
        return before;
    }

    /// Insert into key order. Callers keep keys unique; a duplicate would
    /// land adjacent to its twin and confuse later removal.
    pub(crate) fn insert_key(&mut self, item: T) {
        let root = self.root;
        let (l, r) = self.split_key(root, &item);
        let fresh = self.alloc(item);
        let lm = self.merge(l, fresh);
        self.root = self.merge(lm, r);
    }

    /// Remove the item equal to `key`, replacing its node with the merge
    /// of its children.
    pub(crate) fn remove_key(&mut self, key: &T) -> Option<T> {
        let root = self.root;
        let (root, removed) = self.remove_node(root, key);
        self.root = root;
        return removed;
    }

    fn remove_node(&mut self, root: Idx, key: &T) -> (Idx, Option<T>) {
        if root == NULL {
            return (NULL, None);
        }
        match key.cmp(&self.node(root).item) {
            Ordering::Less => {
                let left = self.node(root).left;
                let (new_left, removed) = self.remove_node(left, key);
                self.node_mut(root).left = new_left;
                self.update(root);
                return (root, removed);
            }
            Ordering::Greater => {
                let right = self.node(root).right;
                let (new_right, removed) = self.remove_node(right, key);
                self.node_mut(root).right = new_right;
                self.update(root);
                return (root, removed);
            }
            Ordering::Equal => {
                let left = self.node(root).left;
                let right = self.node(root).right;
                let merged = self.merge(left, right);
                let node = self.release(root);
                return (merged, Some(node.item));
            }
        }
    }
}

impl<T> Default for Treap<T> {
    fn default() -> Treap<T> {
        return Treap::new();
    }
}

/// In-order iterator holding the path to the next item.
pub(crate) struct Iter<'t, T> {
    treap: &'t Treap<T>,
    stack: SmallVec<[Idx; STACK_DEPTH]>,
}

impl<'t, T> Iter<'t, T> {
    fn descend_left(&mut self, mut idx: Idx) {
        while idx != NULL {
            self.stack.push(idx);
            idx = self.treap.node(idx).left;
        }
    }
}

impl<'t, T> Iterator for Iter<'t, T> {
    type Item = &'t T;

    fn next(&mut self) -> Option<&'t T> {
        let idx = self.stack.pop()?;
        let treap = self.treap;
        let node = treap.node(idx);
        self.descend_left(node.right);
        return Some(&node.item);
    }
}

#[cfg(test)]
impl<T> Treap<T> {
    /// Walk the whole tree verifying the size and heap invariants, plus
    /// that no allocated slot leaked out of the reachable tree.
    pub(crate) fn check_invariants(&self) {
        let reachable = self.check_node(self.root, None);
        let live = self.nodes.len() - self.free.len();
        assert_eq!(reachable, live, "arena slots leaked");
    }

    fn check_node(&self, root: Idx, bound: Option<u64>) -> usize {
        if root == NULL {
            return 0;
        }
        let node = self.node(root);
        if let Some(parent_priority) = bound {
            assert!(node.priority <= parent_priority, "heap property violated");
        }
        let l = self.check_node(node.left, Some(node.priority));
        let r = self.check_node(node.right, Some(node.priority));
        assert_eq!(node.size as usize, l + r + 1, "size annotation out of sync");
        return l + r + 1;
    }
}
