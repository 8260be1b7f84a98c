//! Property-based tests for the leaderboard, checked against a hash-map
//! "best score per player" reference model.

use std::collections::HashMap;

use proptest::prelude::*;

use panic_paste::leaderboard::Entry;
use panic_paste::leaderboard::Leaderboard;
use panic_paste::service::Category;
use panic_paste::service::LeaderboardService;

// =============================================================================
// Reference model
// =============================================================================

const PLAYERS: [&str; 8] = ["NOVA", "BYTE", "Z3RO", "LUNA", "KAI", "AXIS", "ECHO", "VOLT"];

#[derive(Clone, Debug)]
struct Submission {
    player: usize,
    wpm: u32,
    time: f32,
}

fn arbitrary_submission() -> impl Strategy<Value = Submission> {
    (0..PLAYERS.len(), 0u32..200, 1.0f32..120.0)
        .prop_map(|(player, wpm, time)| Submission { player, wpm, time })
}

/// The policy under test: first run records, a strictly higher wpm
/// replaces, everything else (ties included) is ignored.
fn model_apply(model: &mut HashMap<String, (u32, f32)>, sub: &Submission) {
    let player = PLAYERS[sub.player].to_owned();
    match model.get(&player) {
        None => {
            model.insert(player, (sub.wpm, sub.time));
        }
        Some(&(best_wpm, _)) if sub.wpm > best_wpm => {
            model.insert(player, (sub.wpm, sub.time));
        }
        Some(_) => {}
    }
}

/// Display order: wpm descending, then time ascending, then name.
fn model_table(model: &HashMap<String, (u32, f32)>, k: usize) -> Vec<Entry> {
    let mut entries: Vec<Entry> = model
        .iter()
        .map(|(player, &(wpm, time))| Entry { player: player.clone(), wpm, time })
        .collect();
    entries.sort();
    entries.truncate(k);
    entries
}

// =============================================================================
// Leaderboard properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// After any submission sequence, the table equals the model's top 10
    /// and every personal best matches.
    #[test]
    fn table_matches_best_per_player_model(
        subs in prop::collection::vec(arbitrary_submission(), 1..80),
    ) {
        let mut board = Leaderboard::new();
        let mut model: HashMap<String, (u32, f32)> = HashMap::new();

        for sub in &subs {
            board.register_time(PLAYERS[sub.player], sub.wpm, sub.time);
            model_apply(&mut model, sub);
        }

        prop_assert_eq!(board.len(), model.len());
        prop_assert_eq!(board.top10(), model_table(&model, 10));
        for (player, &best) in &model {
            prop_assert_eq!(board.personal_best(player), Some(best));
        }
    }

    /// A player's stored wpm never decreases, no matter the order of
    /// submissions.
    #[test]
    fn stored_wpm_is_monotonic(
        subs in prop::collection::vec(arbitrary_submission(), 1..80),
    ) {
        let mut board = Leaderboard::new();
        for sub in &subs {
            let before = board.personal_best(PLAYERS[sub.player]);
            board.register_time(PLAYERS[sub.player], sub.wpm, sub.time);
            let after = board.personal_best(PLAYERS[sub.player]).unwrap();
            if let Some((old_wpm, old_time)) = before {
                prop_assert!(after.0 >= old_wpm);
                // A tie changes nothing, time included.
                if sub.wpm == old_wpm {
                    prop_assert_eq!(after, (old_wpm, old_time));
                }
            }
        }
    }

    /// `top(k)` is always the k-prefix of the full table.
    #[test]
    fn top_k_is_a_prefix_of_the_table(
        subs in prop::collection::vec(arbitrary_submission(), 1..40),
        k in 0usize..12,
    ) {
        let mut board = Leaderboard::new();
        let mut model: HashMap<String, (u32, f32)> = HashMap::new();
        for sub in &subs {
            board.register_time(PLAYERS[sub.player], sub.wpm, sub.time);
            model_apply(&mut model, sub);
        }
        prop_assert_eq!(board.top(k), model_table(&model, k));
    }
}

// =============================================================================
// Service routing properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Submissions routed through the service land on the right category
    /// and nowhere else.
    #[test]
    fn categories_never_bleed_into_each_other(
        subs in prop::collection::vec(
            (0usize..4, arbitrary_submission()),
            1..60,
        ),
    ) {
        let mut service = LeaderboardService::new();
        let mut models: [HashMap<String, (u32, f32)>; 4] = Default::default();

        for (category, sub) in &subs {
            let name = Category::ALL[*category].name();
            service.submit(name, PLAYERS[sub.player], sub.wpm, sub.time).unwrap();
            model_apply(&mut models[*category], sub);
        }

        for (category, model) in Category::ALL.iter().zip(&models) {
            prop_assert_eq!(
                service.top10(category.name()).unwrap(),
                model_table(model, 10)
            );
        }
    }
}
