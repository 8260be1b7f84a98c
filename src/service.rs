//! Leaderboard Service
//!
//! Routes run submissions and score-table queries to the one leaderboard
//! per difficulty category. Lives for the whole process; the trees behind
//! it are never torn down, only grown.
//!
//! Category strings come straight from the UI. An unknown string is the
//! caller's bug and is rejected up front - routing never invents a new
//! category or falls back to a default table.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::leaderboard::Entry;
use crate::leaderboard::Leaderboard;

/// The four run categories the game ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Easy,
    Medium,
    Hard,
    TimeTrial,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Easy,
        Category::Medium,
        Category::Hard,
        Category::TimeTrial,
    ];

    /// The UI-facing spelling.
    pub fn name(self) -> &'static str {
        match self {
            Category::Easy => "Easy",
            Category::Medium => "Medium",
            Category::Hard => "Hard",
            Category::TimeTrial => "Time-Trial",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = LeaderboardError;

    fn from_str(s: &str) -> Result<Category, LeaderboardError> {
        match s {
            "Easy" => Ok(Category::Easy),
            "Medium" => Ok(Category::Medium),
            "Hard" => Ok(Category::Hard),
            "Time-Trial" => Ok(Category::TimeTrial),
            other => Err(LeaderboardError::UnknownCategory(other.to_owned())),
        }
    }
}

/// Recoverable failures at the service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaderboardError {
    #[error("unknown difficulty category: {0:?}")]
    UnknownCategory(String),
}

/// One leaderboard per category, routed by a single category-indexed
/// table.
pub struct LeaderboardService {
    boards: [Leaderboard; 4],
}

impl LeaderboardService {
    pub fn new() -> LeaderboardService {
        LeaderboardService {
            boards: std::array::from_fn(|_| Leaderboard::new()),
        }
    }

    /// The table for a (typed) category.
    pub fn board(&self, category: Category) -> &Leaderboard {
        &self.boards[category.index()]
    }

    pub fn board_mut(&mut self, category: Category) -> &mut Leaderboard {
        &mut self.boards[category.index()]
    }

    /// Record a completed run under the named category.
    pub fn submit(
        &mut self,
        category: &str,
        player: &str,
        wpm: u32,
        time: f32,
    ) -> Result<(), LeaderboardError> {
        let category = category.parse::<Category>()?;
        log::debug!("run submitted: {player:?} {wpm} wpm in {time:.2}s ({category})");
        self.board_mut(category).register_time(player, wpm, time);
        Ok(())
    }

    /// The score table for the named category, best first, at most ten
    /// rows.
    pub fn top10(&self, category: &str) -> Result<Vec<Entry>, LeaderboardError> {
        let category = category.parse::<Category>()?;
        Ok(self.board(category).top10())
    }
}

impl Default for LeaderboardService {
    fn default() -> LeaderboardService {
        LeaderboardService::new()
    }
}
