//! Panic Paste - the tree engine behind an arcade typing-race game.
//!
//! Two randomized balanced trees do the real work: a character rope for
//! the text being typed (position-indexed edits in O(log n)) and a
//! leaderboard keyed by score (best-score upsert and top-10 in
//! O(log n + k)). Both specialize the same split/merge treap machinery.
//!
//! # Quick Start
//!
//! ```
//! use panic_paste::rope::Rope;
//! use panic_paste::service::LeaderboardService;
//!
//! // The text of the current run.
//! let mut rope = Rope::new();
//! rope.paste(0, "Panic Paste is pure arcade chaos.");
//! assert!(rope.check_equal_so_far("Panic Paste is pure arcade chaos.").complete);
//!
//! // The process-wide score tables.
//! let mut service = LeaderboardService::new();
//! service.submit("Easy", "NOVA", 112, 28.42)?;
//! assert_eq!(service.top10("Easy")?.len(), 1);
//! # Ok::<(), panic_paste::service::LeaderboardError>(())
//! ```

mod treap;

pub mod engine;
pub mod leaderboard;
pub mod rope;
pub mod service;
