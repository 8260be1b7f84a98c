//! Score Leaderboard
//!
//! A per-category leaderboard backed by the keyed arena treap. Entries are
//! ordered best-first (highest words-per-minute at the leftmost position),
//! so a top-K query is a bounded in-order walk: O(log n + k) instead of
//! re-sorting every record on each submission.
//!
//! One record per player. A side map from player name to their current
//! best supplies the O(log n) upsert: without it, replacing a superseded
//! record would mean a linear scan for the player's old key.

use rustc_hash::FxHashMap;

use std::cmp::Ordering;

use crate::treap::Treap;

/// One leaderboard record: a player's best completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub player: String,
    pub wpm: u32,
    pub time: f32,
}

// Times are finite (elapsed seconds), so `total_cmp` agrees with the
// derived `PartialEq` and the ordering below is a total order.
impl Eq for Entry {}

/// Best-first ordering: higher `wpm` sorts earlier, then lower `time`,
/// then player name. Left-to-right traversal of a tree of entries is the
/// display order of the score table.
impl Ord for Entry {
    fn cmp(&self, other: &Entry) -> Ordering {
        return other
            .wpm
            .cmp(&self.wpm)
            .then_with(|| self.time.total_cmp(&other.time))
            .then_with(|| self.player.cmp(&other.player));
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Entry) -> Option<Ordering> {
        return Some(self.cmp(other));
    }
}

/// A category's score table: one best record per player, ordered
/// best-first.
pub struct Leaderboard {
    tree: Treap<Entry>,
    /// Player name to their recorded `(wpm, time)`, for O(log n) upsert.
    best: FxHashMap<String, (u32, f32)>,
}

impl Leaderboard {
    /// Create an empty leaderboard.
    pub fn new() -> Leaderboard {
        return Leaderboard {
            tree: Treap::new(),
            best: FxHashMap::default(),
        };
    }

    /// Seeded variant for reproducible tree shapes in tests.
    pub fn with_seed(seed: u64) -> Leaderboard {
        return Leaderboard {
            tree: Treap::with_seed(seed),
            best: FxHashMap::default(),
        };
    }

    /// Number of distinct players with a record.
    pub fn len(&self) -> usize {
        return self.tree.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.tree.is_empty();
    }

    /// Record a completed run, keeping only the player's best.
    ///
    /// A first submission inserts; a strictly higher `wpm` replaces the
    /// old record; anything else leaves the table untouched. A tied `wpm`
    /// never updates, even with a better `time` - the stored `wpm` is
    /// monotonically non-decreasing per player.
    pub fn register_time(&mut self, player: &str, wpm: u32, time: f32) {
        match self.best.get(player) {
            None => {
                self.tree.insert_key(Entry {
                    player: player.to_owned(),
                    wpm,
                    time,
                });
                self.best.insert(player.to_owned(), (wpm, time));
            }
            Some(&(best_wpm, best_time)) => {
                if wpm <= best_wpm {
                    return;
                }
                // Rebuild the superseded key from the side map so the
                // keyed removal finds the exact node.
                let old = Entry {
                    player: player.to_owned(),
                    wpm: best_wpm,
                    time: best_time,
                };
                let removed = self.tree.remove_key(&old);
                debug_assert!(removed.is_some(), "index and tree disagree on {player:?}");
                self.tree.insert_key(Entry {
                    player: player.to_owned(),
                    wpm,
                    time,
                });
                self.best.insert(player.to_owned(), (wpm, time));
            }
        }
    }

    /// The player's recorded best, if any.
    pub fn personal_best(&self, player: &str) -> Option<(u32, f32)> {
        return self.best.get(player).copied();
    }

    /// The player's current 1-based position on the board, if recorded.
    pub fn rank(&self, player: &str) -> Option<usize> {
        let &(wpm, time) = self.best.get(player)?;
        let entry = Entry {
            player: player.to_owned(),
            wpm,
            time,
        };
        return Some(self.tree.rank_of(&entry) + 1);
    }

    /// The best `k` records in display order. Walks only as far as it
    /// has to: O(log n + k).
    pub fn top(&self, k: usize) -> Vec<Entry> {
        return self.tree.iter().take(k).cloned().collect();
    }

    /// The score table the UI renders.
    pub fn top10(&self) -> Vec<Entry> {
        return self.top(10);
    }
}

impl Default for Leaderboard {
    fn default() -> Leaderboard {
        return Leaderboard::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(player: &str, wpm: u32, time: f32) -> Entry {
        Entry { player: player.to_owned(), wpm, time }
    }

    #[test]
    fn first_submission_is_recorded() {
        let mut board = Leaderboard::with_seed(1);
        board.register_time("A", 50, 10.0);
        assert_eq!(board.len(), 1);
        assert_eq!(board.top10(), vec![entry("A", 50, 10.0)]);
    }

    #[test]
    fn worse_run_is_ignored() {
        let mut board = Leaderboard::with_seed(2);
        board.register_time("A", 50, 10.0);
        board.register_time("A", 40, 12.0);
        assert_eq!(board.top10(), vec![entry("A", 50, 10.0)]);
    }

    #[test]
    fn better_run_replaces_the_record() {
        let mut board = Leaderboard::with_seed(3);
        board.register_time("A", 50, 10.0);
        board.register_time("A", 65, 9.5);
        assert_eq!(board.len(), 1);
        assert_eq!(board.top10(), vec![entry("A", 65, 9.5)]);
        assert_eq!(board.personal_best("A"), Some((65, 9.5)));
    }

    #[test]
    fn tied_wpm_keeps_the_old_record_even_with_a_better_time() {
        let mut board = Leaderboard::with_seed(4);
        board.register_time("A", 50, 10.0);
        board.register_time("A", 50, 5.0);
        assert_eq!(board.top10(), vec![entry("A", 50, 10.0)]);
    }

    #[test]
    fn top10_is_descending_by_wpm() {
        let mut board = Leaderboard::with_seed(5);
        board.register_time("A", 50, 10.0);
        board.register_time("B", 80, 9.0);
        board.register_time("C", 60, 11.0);
        assert_eq!(
            board.top10(),
            vec![entry("B", 80, 9.0), entry("C", 60, 11.0), entry("A", 50, 10.0)]
        );
    }

    #[test]
    fn equal_wpm_breaks_ties_by_time_then_name() {
        let mut board = Leaderboard::with_seed(6);
        board.register_time("SLOW", 90, 40.0);
        board.register_time("FAST", 90, 30.0);
        board.register_time("ALSO", 90, 40.0);
        let table = board.top10();
        assert_eq!(table[0].player, "FAST");
        assert_eq!(table[1].player, "ALSO");
        assert_eq!(table[2].player, "SLOW");
    }

    #[test]
    fn rank_is_the_position_in_the_table() {
        let mut board = Leaderboard::with_seed(9);
        board.register_time("A", 50, 10.0);
        board.register_time("B", 80, 9.0);
        board.register_time("C", 60, 11.0);
        assert_eq!(board.rank("B"), Some(1));
        assert_eq!(board.rank("C"), Some(2));
        assert_eq!(board.rank("A"), Some(3));
        assert_eq!(board.rank("D"), None);
    }

    #[test]
    fn top10_caps_at_ten_entries() {
        let mut board = Leaderboard::with_seed(7);
        for i in 0..25u32 {
            board.register_time(&format!("P{i:02}"), 40 + i, 30.0);
        }
        let table = board.top10();
        assert_eq!(table.len(), 10);
        assert_eq!(table[0].wpm, 64);
        assert_eq!(table[9].wpm, 55);
        assert_eq!(board.len(), 25);
    }

    #[test]
    fn top_with_small_k() {
        let mut board = Leaderboard::with_seed(8);
        board.register_time("A", 50, 10.0);
        board.register_time("B", 80, 9.0);
        assert_eq!(board.top(1), vec![entry("B", 80, 9.0)]);
        assert!(board.top(0).is_empty());
    }

    #[test]
    fn empty_board() {
        let board = Leaderboard::new();
        assert!(board.is_empty());
        assert!(board.top10().is_empty());
        assert_eq!(board.personal_best("A"), None);
    }
}
