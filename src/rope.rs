//! Character Rope
//!
//! An editable character sequence backed by the implicit arena treap: the
//! position of a character is never stored, it falls out of the subtree
//! sizes. Every edit is a split/merge composition, so a keystroke costs
//! O(log n) instead of rebuilding the whole string.
//!
//! # Index Semantics
//!
//! Indices are 0-based character offsets into the current content. Out of
//! range indices are clamped, never rejected: the editing layer above
//! tolerates stale cursor positions during fast typing, and the rope keeps
//! that promise rather than surface errors mid-run. An inverted or empty
//! range is a no-op.

use std::fmt;
use std::fmt::Write;

use crate::treap::Treap;

/// Result of comparing the rope against a target passage.
///
/// `mismatch` is the first index that needs the player's attention:
/// - `Some(i)` where the typed character differs from `target`'s,
/// - `Some(len())` when everything so far matches but the passage is not
///   finished,
/// - `Some(target.len())` when the rope has run past the target (anything
///   beyond the passage is wrong by definition),
/// - `None` exactly when the content equals the target.
///
/// `complete` is true only in the `None` case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub mismatch: Option<usize>,
    pub complete: bool,
}

/// An editable character sequence with O(log n) edits.
pub struct Rope {
    treap: Treap<char>,
}

impl Rope {
    /// Create an empty rope.
    pub fn new() -> Rope {
        Rope { treap: Treap::new() }
    }

    /// Create an empty rope with a fixed priority seed, so tests and
    /// benchmarks see a reproducible tree shape.
    pub fn with_seed(seed: u64) -> Rope {
        Rope { treap: Treap::with_seed(seed) }
    }

    /// Number of characters. O(1).
    pub fn len(&self) -> usize {
        self.treap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.treap.is_empty()
    }

    /// Insert one character at `index` (clamped to `[0, len]`).
    pub fn insert(&mut self, index: usize, ch: char) {
        self.treap.insert_at(index, ch);
    }

    /// Append one character at the end.
    pub fn push(&mut self, ch: char) {
        self.treap.push_back(ch);
    }

    /// Remove the character at `index`. Past-the-end is a silent no-op.
    pub fn erase(&mut self, index: usize) {
        self.treap.remove_at(index);
    }

    /// Remove the half-open range `[start, end)`, clamped. An empty or
    /// inverted range removes nothing.
    pub fn delete_range(&mut self, start: usize, end: usize) {
        self.treap.take_range(start, end);
    }

    /// Read the range `[start, end)` without mutating anything. Returns
    /// the empty string when the clamped range is empty.
    pub fn copy(&self, start: usize, end: usize) -> String {
        let mut out = String::new();
        self.treap.visit_range(start, end, &mut |ch| out.push(*ch));
        out
    }

    /// Remove the range `[start, end)` and return it: exactly what `copy`
    /// would have returned, with the rope shrunk by that many characters.
    pub fn cut(&mut self, start: usize, end: usize) -> String {
        self.treap.take_range(start, end).into_iter().collect()
    }

    /// Insert all of `content` at `index` (clamped). The end state is the
    /// same as typing the characters one by one, but the content is built
    /// into a sub-rope and stitched in with a single splice.
    pub fn paste(&mut self, index: usize, content: &str) {
        self.treap.splice_at(index, content.chars());
    }

    /// The character at `index`, if any. O(log n).
    pub fn get(&self, index: usize) -> Option<char> {
        self.treap.get(index).copied()
    }

    /// Iterate the content in order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.treap.iter().copied()
    }

    /// Compare the rope against `target` character by character, in index
    /// order, reporting the first divergence. Drives the per-keystroke
    /// correctness highlight and run-completion detection.
    pub fn check_equal_so_far(&self, target: &str) -> Progress {
        let mut expected = target.chars();
        let mut index = 0;
        for ch in self.chars() {
            match expected.next() {
                Some(want) if want == ch => index += 1,
                _ => {
                    return Progress {
                        mismatch: Some(index),
                        complete: false,
                    };
                }
            }
        }
        if expected.next().is_some() {
            // Everything typed so far is right, the passage just isn't
            // done: point at the next index to type.
            return Progress {
                mismatch: Some(index),
                complete: false,
            };
        }
        Progress { mismatch: None, complete: true }
    }
}

impl Default for Rope {
    fn default() -> Rope {
        Rope::new()
    }
}

impl From<&str> for Rope {
    fn from(content: &str) -> Rope {
        let mut rope = Rope::new();
        rope.paste(0, content);
        rope
    }
}

impl fmt::Display for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.chars() {
            f.write_char(ch)?;
        }
        Ok(())
    }
}
