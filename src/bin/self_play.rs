//! Seeded random-vs-random matches.
//!
//! Usage: `self_play [seed] [games]`. Set `RUST_LOG=debug` to follow every
//! placement, move and capture.

use sa_jin::{GameRng, GameState, RandomPlayer, UniformRandom};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Steps after which a match is abandoned. Two random players can wander
/// for a long time without lining up a double attack.
const MAX_STEPS: usize = 2_000;

fn arg_or<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> T {
    args.get(index).and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().collect();
    let seed: u64 = arg_or(&args, 1, 42);
    let games: u64 = arg_or(&args, 2, 1);

    let mut root = GameRng::new(seed);
    let mut finished = 0;
    for game_index in 0..games {
        let mut game = GameState::default();
        let mut player = RandomPlayer::new(UniformRandom::from_rng(root.fork()));

        let steps = match player.play_out(&mut game, MAX_STEPS) {
            Ok(steps) => steps,
            Err(err) => {
                warn!(game = game_index, kind = ?err.kind, "rejected action: {err}");
                continue;
            }
        };

        if game.is_over() {
            finished += 1;
        }
        info!(game = game_index, steps, "{}", game.status_summary());
        println!("{}\n", game.board());
    }

    println!("{finished}/{games} matches reached a result");
}
