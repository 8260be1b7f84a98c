use panic_paste::engine::GameResult;
use panic_paste::engine::Session;
use panic_paste::service::LeaderboardService;

/// Scripted demo: type one passage, score it, and print the table.
fn main() {
    env_logger::init();

    let passage = "Keep calm and hit the keys.";
    let mut session = Session::new(passage);
    for (i, ch) in passage.chars().enumerate() {
        session.rope_mut().insert(i, ch);
    }
    let progress = session.progress();
    println!("typed:    {}", session.rope());
    println!("complete: {}", progress.complete);

    let elapsed = 12.5;
    let result = GameResult {
        player: "YOU".to_owned(),
        category: "Easy".to_owned(),
        wpm: session.finish(elapsed),
        time_seconds: elapsed,
    };

    let mut service = LeaderboardService::new();
    service
        .submit(&result.category, &result.player, result.wpm, result.time_seconds)
        .unwrap();
    service.submit("Easy", "LUNA", 72, 22.05).unwrap();
    service.submit("Easy", "MIRA", 68, 23.10).unwrap();
    service.submit("Easy", "SAGE", 74, 21.80).unwrap();

    println!("\n-- Easy --");
    for (rank, entry) in service.top10("Easy").unwrap().iter().enumerate() {
        println!(
            "{:>2}. {:<8} {:>4} wpm {:>8.2}s",
            rank + 1,
            entry.player,
            entry.wpm,
            entry.time
        );
    }
}
