use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use game_2048::config::{EngineConfig, DEFAULT_SIZE};
use game_2048::engine::{Direction, Engine, GameState, MoveOutcome};

#[derive(Parser, Debug)]
#[command(name = "game-2048", version, about = "Play or autoplay a game of 2048 in the terminal")]
struct Args {
    /// Board side length
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,
    /// Seed for tile spawning (and the random policy); random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Read moves from stdin (w/a/s/d, vi keys or direction names; q quits)
    #[arg(short, long)]
    interactive: bool,
    /// Move choice when autoplaying
    #[arg(long, value_enum, default_value_t = Policy::Greedy)]
    policy: Policy,
    /// Stop after this many grid-changing moves
    #[arg(long)]
    max_moves: Option<u64>,
    /// Print the final state as JSON instead of the summary line
    #[arg(long)]
    json: bool,
    /// Do not print the board after every move
    #[arg(short, long)]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Policy {
    /// Try up, down, left, right in turn
    Cycle,
    /// Uniformly random legal move
    Random,
    /// Legal move with the largest immediate merge score
    Greedy,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = EngineConfig::with_size(args.size);
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("starting {0}x{0} game with seed {seed}", config.size);
    let mut engine = Engine::new(config, StdRng::seed_from_u64(seed))?;
    // Separate stream so the policy never shifts tile spawns for a given seed.
    let mut policy_rng = StdRng::seed_from_u64(seed.wrapping_add(1));

    if !args.quiet {
        println!("{}", engine.state().grid());
    }
    let moves = if args.interactive {
        play_interactive(&mut engine, &args)?
    } else {
        autoplay(&mut engine, &args, &mut policy_rng)
    };

    let state = engine.into_state();
    info!("finished after {moves} moves");
    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print_summary(&state, moves);
    }
    Ok(())
}

fn autoplay(engine: &mut Engine<StdRng>, args: &Args, rng: &mut StdRng) -> u64 {
    let mut moves = 0u64;
    let mut turn = 0usize;
    while !engine.state().is_game_over() {
        if args.max_moves.is_some_and(|limit| moves >= limit) {
            break;
        }
        let Some(dir) = choose_move(engine.state(), args.policy, turn, rng) else {
            break;
        };
        turn += 1;
        if let MoveOutcome::Moved { gained, .. } = engine.apply_move(dir) {
            moves += 1;
            log::debug!("move {moves}: {dir} (+{gained})");
            if !args.quiet {
                println!("{dir} | score: {}{}", engine.state().score(), engine.state().grid());
            }
        }
    }
    moves
}

fn choose_move(state: &GameState, policy: Policy, turn: usize, rng: &mut StdRng) -> Option<Direction> {
    let legal = state.legal_moves();
    match policy {
        Policy::Cycle => (0..Direction::ALL.len())
            .map(|i| Direction::ALL[(turn + i) % Direction::ALL.len()])
            .find(|d| legal.contains(d)),
        Policy::Random => legal.choose(rng).copied(),
        // max_by_key keeps the last maximum; reverse so ties go to the first listed direction
        Policy::Greedy => legal
            .iter()
            .rev()
            .max_by_key(|&&d| state.grid().shift(d).1)
            .copied(),
    }
}

fn play_interactive(engine: &mut Engine<StdRng>, args: &Args) -> anyhow::Result<u64> {
    let stdin = io::stdin();
    let mut moves = 0u64;
    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            prompt()?;
            continue;
        }
        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            break;
        }
        let dir: Direction = match input.parse() {
            Ok(d) => d,
            Err(e) => {
                warn!("{e}");
                prompt()?;
                continue;
            }
        };
        match engine.apply_move(dir) {
            MoveOutcome::Moved { gained, game_over } => {
                moves += 1;
                println!("{dir} (+{gained}) | score: {}{}", engine.state().score(), engine.state().grid());
                if game_over {
                    break;
                }
            }
            MoveOutcome::Unchanged => println!("{dir} does not move anything"),
            MoveOutcome::Ignored => break,
        }
        if args.max_moves.is_some_and(|limit| moves >= limit) {
            break;
        }
        prompt()?;
    }
    Ok(moves)
}

fn prompt() -> io::Result<()> {
    print!("move> ");
    io::stdout().flush()
}

fn print_summary(state: &GameState, moves: u64) {
    if state.is_game_over() {
        println!("Game Over!");
    }
    println!(
        "Moves: {} | score: {} | highest tile: {}",
        moves,
        state.score(),
        state.grid().highest_tile()
    );
    if state.is_game_over() {
        println!("I scored {} in 2048!", state.score());
    }
}
