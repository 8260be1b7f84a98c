//! Run Scoring
//!
//! The pure-computation slice of the game engine: text normalization, the
//! words-per-minute formula, and a per-run session tying a rope to its
//! target passage. Timers, passage selection, and rendering stay with the
//! UI layer; this module only ever sees text and elapsed seconds.

use crate::rope::Progress;
use crate::rope::Rope;

/// Canonicalize text before any comparison: fold Windows line endings and
/// drop trailing newlines, so a stray Enter at the end of a run doesn't
/// read as a mistyped character.
pub fn normalize(s: &str) -> String {
    s.replace("\r\n", "\n").trim_end_matches('\n').to_owned()
}

/// Net words-per-minute: five characters to a word, and only correctly
/// typed characters count, so mashing the keyboard scores nothing.
/// Rounded half-up; the minutes floor keeps a sub-millisecond run from
/// dividing by zero.
pub fn net_wpm(correct_chars: usize, elapsed_seconds: f32) -> u32 {
    let minutes = (elapsed_seconds / 60.0).max(1e-6);
    let words = correct_chars as f32 / 5.0;
    (words / minutes + 0.5) as u32
}

/// What a finished run hands to the leaderboard service.
#[derive(Debug, Clone, PartialEq)]
pub struct GameResult {
    pub player: String,
    pub category: String,
    pub wpm: u32,
    pub time_seconds: f32,
}

/// One typing run: the rope being typed into and the passage it chases.
/// Created at run start, dropped (or reset) at run end.
pub struct Session {
    target: String,
    rope: Rope,
}

impl Session {
    /// Start a run against a passage. The target is normalized once here.
    pub fn new(target: &str) -> Session {
        Session {
            target: normalize(target),
            rope: Rope::new(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// The rope the key handler edits.
    pub fn rope_mut(&mut self) -> &mut Rope {
        &mut self.rope
    }

    /// The per-keystroke correctness query: first index to highlight and
    /// whether the passage is done.
    pub fn progress(&self) -> Progress {
        self.rope.check_equal_so_far(&self.target)
    }

    /// How many typed characters sit at the right place.
    pub fn correct_chars(&self) -> usize {
        self.rope
            .chars()
            .zip(self.target.chars())
            .filter(|(typed, want)| typed == want)
            .count()
    }

    /// Score the run: net WPM over the elapsed time.
    pub fn finish(&self, elapsed_seconds: f32) -> u32 {
        let wpm = net_wpm(self.correct_chars(), elapsed_seconds);
        log::debug!(
            "run finished: {}/{} correct in {elapsed_seconds:.2}s -> {wpm} wpm",
            self.correct_chars(),
            self.target.chars().count(),
        );
        wpm
    }

    /// Retry: same passage, fresh rope.
    pub fn reset(&mut self) {
        self.rope = Rope::new();
    }
}
