use std::collections::HashMap;

use clap::Parser;
use serde::Serialize;

use hexfield::game::{Agent, Game, GameConfig, RandomAgent};
use hexfield::types::Color;

#[derive(Parser, Debug)]
#[command(about = "Run seeded random-agent games and report outcomes")]
struct Args {
    /// Number of games to simulate.
    #[arg(short, long, default_value_t = 100)]
    num: u32,

    /// Base seed; game i uses seed + i.
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Seats per game (2-4).
    #[arg(short, long, default_value_t = 4)]
    players: usize,

    /// Victory points needed to win.
    #[arg(short, long, default_value_t = 10)]
    vps_to_win: u8,

    /// Only print the final summary.
    #[arg(short, long)]
    quiet: bool,

    /// Emit one JSON record per game instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct GameRecord {
    game: u32,
    seed: u64,
    winner: Option<usize>,
    winner_color: Option<Color>,
    turns: u32,
}

fn main() {
    let args = Args::parse();

    let mut wins: HashMap<Color, u32> = HashMap::new();
    let mut unfinished = 0u32;
    let mut total_turns = 0u64;
    let mut roll_counts = [0u64; 11];

    for i in 0..args.num {
        let seed = args.seed + i as u64;
        let config = GameConfig {
            num_players: args.players,
            vps_to_win: args.vps_to_win,
            seed,
        };
        let mut game = Game::new(config);
        let mut agents: Vec<Box<dyn Agent>> = (0..args.players)
            .map(|seat| Box::new(RandomAgent::new(seed.wrapping_add(seat as u64 + 1))) as _)
            .collect();
        let winner = game.play(&mut agents);

        total_turns += game.state.turn as u64;
        for (slot, count) in game.state.roll_counts.iter().enumerate() {
            roll_counts[slot] += *count as u64;
        }
        match winner {
            Some(_) => {
                if let Some(color) = game.winner_color() {
                    *wins.entry(color).or_insert(0) += 1;
                }
            }
            None => unfinished += 1,
        }

        if args.json {
            let record = GameRecord {
                game: i,
                seed,
                winner,
                winner_color: game.winner_color(),
                turns: game.state.turn,
            };
            match serde_json::to_string(&record) {
                Ok(line) => println!("{line}"),
                Err(err) => eprintln!("game {i}: serialize failed: {err}"),
            }
        } else if !args.quiet {
            match game.winner_color() {
                Some(color) => println!(
                    "game {i} (seed {seed}): {color} wins after {} turns",
                    game.state.turn
                ),
                None => println!("game {i} (seed {seed}): no winner (turn limit)"),
            }
        }
    }

    if args.json {
        return;
    }

    println!();
    println!("=== {} games ===", args.num);
    let mut standings: Vec<(Color, u32)> = wins.into_iter().collect();
    standings.sort_by(|a, b| b.1.cmp(&a.1));
    for (color, count) in standings {
        println!("{color}: {count} wins");
    }
    if unfinished > 0 {
        println!("unfinished: {unfinished}");
    }
    if args.num > 0 {
        println!("avg turns: {:.1}", total_turns as f64 / args.num as f64);
    }
    println!("roll histogram (2..=12):");
    for (slot, count) in roll_counts.iter().enumerate() {
        println!("  {:>2}: {count}", slot + 2);
    }
}
