use anyhow::{Result, bail};
use casino_bot::{HeuristicPolicy, Policy, PolicyContext};
use casino_core::game::match_state::{MatchPhase, MatchState};
use casino_core::model::player::Seat;
use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::info;

/// A match that runs this long has stopped making progress.
const MAX_ROUNDS_PER_GAME: u32 = 1_000;

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub games: usize,
    pub seed: u64,
    pub target: u32,
}

/// One finished game, in the shape written to the JSONL report.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GameRow {
    pub game: usize,
    pub seed: u64,
    pub rounds: u32,
    pub winner: Seat,
    pub totals: [u32; 4],
}

#[derive(Debug, Clone)]
pub struct SimSummary {
    pub wins: [usize; 4],
    pub rows: Vec<GameRow>,
}

/// Plays `games` bot-vs-bot matches. Per-game seeds are drawn from one rng
/// seeded with the configured seed, so a run is reproducible end to end.
pub fn run(config: &SimConfig) -> Result<SimSummary> {
    let mut seed_rng = StdRng::seed_from_u64(config.seed);
    let mut wins = [0usize; 4];
    let mut rows = Vec::with_capacity(config.games);

    for game in 0..config.games {
        let game_seed = seed_rng.next_u64();
        let row = play_game(game, game_seed, config.target)?;
        wins[row.winner.index()] += 1;
        info!(
            target: "casino_sim",
            game,
            seed = game_seed,
            rounds = row.rounds,
            winner = %row.winner,
            "game finished"
        );
        rows.push(row);
    }

    Ok(SimSummary { wins, rows })
}

fn play_game(game: usize, seed: u64, target: u32) -> Result<GameRow> {
    let mut state = MatchState::with_seed_target([false; 4], seed, target);
    let mut policy = HeuristicPolicy::new();

    loop {
        while let Some(seat) = state.needs_bot_action() {
            let action = {
                let ctx = PolicyContext {
                    seat,
                    hand: state.round().hand(seat),
                    round: state.round(),
                    scores: state.scores(),
                };
                policy.choose_action(&ctx)
            };
            if let Err(reason) = state.submit(seat, &action) {
                bail!("game {game} (seed {seed}): bot move rejected: {reason:?}");
            }
        }

        match state.phase() {
            MatchPhase::GameOver => break,
            MatchPhase::RoundComplete => {
                if state.round_number() >= MAX_ROUNDS_PER_GAME {
                    bail!("game {game} (seed {seed}) exceeded {MAX_ROUNDS_PER_GAME} rounds");
                }
                let _ = state.start_next_round();
            }
            MatchPhase::Playing => {
                bail!("game {game} (seed {seed}): no bot to act in a live round");
            }
        }
    }

    let result = state
        .result()
        .cloned()
        .expect("finished match has a result");
    Ok(GameRow {
        game,
        seed,
        rounds: state.round_number(),
        winner: result.winner,
        totals: *state.scores().standings(),
    })
}
