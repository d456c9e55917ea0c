// ═══════════════════════════════════════════════════════════════════════
// Runner — CLI entry point for single rounds, tournaments, and maps
// ═══════════════════════════════════════════════════════════════════════

use clap::{Args, Parser, Subcommand};
use conquest_agents::AgentKind;
use conquest_engine::*;
use conquest_tournament::database::{opponent_name, Database};
use conquest_tournament::runner::DEFAULT_FRAME_MS;
use conquest_tournament::{run_batch, BatchPlan, MatchResult, TournamentError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "conquest", about = "Territorial conquest against a scripted opponent")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Settings shared by every command that builds a map.
#[derive(Args)]
struct MapArgs {
    /// TOML file with map, difficulty, and session settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the number of regions
    #[arg(long)]
    regions: Option<usize>,
    /// Mirror one-way adjacency edges
    #[arg(long)]
    symmetric: bool,
    /// Apply combat ticks region by region instead of all at once
    #[arg(long)]
    sequential: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one round with an agent in the Player's seat
    Play {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Agent type: "idle", "random", or "heuristic"
        #[arg(short, long, default_value = "heuristic")]
        agent: AgentKind,
        /// Opponent preset: "easy", "normal", or "hard"
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
        #[arg(long, default_value_t = DEFAULT_FRAME_MS)]
        frame_ms: u32,
        /// Print the final map state as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        map: MapArgs,
    },
    /// Run N rounds per difficulty and store the results
    Tournament {
        #[arg(short, long, default_value_t = 20)]
        games: u32,
        /// Agent type, or "all" for every kind
        #[arg(short, long, default_value = "all")]
        agent: String,
        /// Restrict to one preset; all three by default
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = DEFAULT_FRAME_MS)]
        frame_ms: u32,
        #[arg(long, default_value = "results.db")]
        db: PathBuf,
        #[command(flatten)]
        map: MapArgs,
    },
    /// Show leaderboard from database
    Leaderboard {
        #[arg(long, default_value = "results.db")]
        db: PathBuf,
    },
    /// Generate a map and print its regions and neighbors
    Map {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        map: MapArgs,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("conquest=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Play { seed, agent, difficulty, frame_ms, json, map } => {
            cmd_play(seed, agent, difficulty, frame_ms, json, &map)
        }
        Commands::Tournament { games, agent, difficulty, seed, frame_ms, db, map } => {
            cmd_tournament(games, &agent, difficulty, seed, frame_ms, &db, &map)
        }
        Commands::Leaderboard { db } => cmd_leaderboard(&db),
        Commands::Map { seed, json, map } => cmd_map(seed, json, &map),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &MapArgs, difficulty: Option<Difficulty>) -> Result<GameConfig, TournamentError> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(n) = args.regions {
        config.map.region_count = n;
    }
    if args.symmetric {
        config.map.symmetric_adjacency = true;
    }
    if args.sequential {
        config.map.resolution = TickResolution::Sequential;
    }
    if let Some(d) = difficulty {
        config.difficulty = d;
    }
    config.validate()?;
    Ok(config)
}

fn cmd_play(
    seed: u64,
    kind: AgentKind,
    difficulty: Option<Difficulty>,
    frame_ms: u32,
    json: bool,
    args: &MapArgs,
) -> Result<(), TournamentError> {
    if frame_ms == 0 {
        return Err(ConfigError::Invalid("frame step must be positive".into()).into());
    }
    let config = load_config(args, difficulty)?;
    let mut session = Session::start(&config, &mut ChaCha8Rng::seed_from_u64(seed))?;
    let mut agent = kind.build(seed);

    println!("=== Conquest ===\n");
    println!(
        "seed={}, agent={}, difficulty={}, regions={}\n",
        seed,
        agent.name(),
        config.difficulty,
        config.map.region_count
    );

    while !session.is_finished() {
        let commands = agent.decide(&session.render_state(), frame_ms);
        for event in session.advance(frame_ms, &commands) {
            match event {
                SessionEvent::Map(MapEvent::RegionFlipped { region, new_owner }) => {
                    println!("  region {region} falls to {new_owner}");
                }
                SessionEvent::Map(MapEvent::OrderIssued { .. }) => {}
                SessionEvent::CountdownTick { seconds_left } => {
                    println!(
                        "[{:>2}s] player holds {}/{}",
                        seconds_left,
                        session.map().player_owned_count(),
                        session.map().regions().len()
                    );
                }
                SessionEvent::RoundEnded { outcome, player_owned } => {
                    println!("\nYOU {outcome}! ({player_owned} regions held)");
                }
            }
        }
    }

    if json {
        let report = serde_json::json!({
            "seed": seed,
            "agent": kind,
            "difficulty": config.difficulty,
            "outcome": session.outcome(),
            "final": session.render_state(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn cmd_tournament(
    games: u32,
    agent: &str,
    difficulty: Option<Difficulty>,
    seed: u64,
    frame_ms: u32,
    db_path: &Path,
    args: &MapArgs,
) -> Result<(), TournamentError> {
    let config = load_config(args, None)?;
    let kinds: Vec<AgentKind> = if agent.eq_ignore_ascii_case("all") {
        AgentKind::ALL.to_vec()
    } else {
        vec![agent.parse()?]
    };
    let difficulties = match difficulty {
        Some(d) => vec![d],
        None => Difficulty::ALL.to_vec(),
    };

    println!(
        "=== Tournament: {} games per preset, agents={:?}, presets={:?} ===\n",
        games, kinds, difficulties
    );

    let mut db = Database::new(db_path)?;
    let mut errors = 0u32;

    for kind in kinds {
        let plan = BatchPlan {
            agent: kind,
            difficulties: difficulties.clone(),
            games_per_difficulty: games,
            base_seed: seed,
            frame_ms,
        };
        let mut finished: Vec<MatchResult> = Vec::new();
        for outcome in run_batch(&plan, &config) {
            match outcome {
                Ok(result) => {
                    db.record_match(&result)?;
                    finished.push(result);
                }
                Err(e) => {
                    errors += 1;
                    eprintln!("{kind}: match failed -- {e}");
                }
            }
        }
        print_summary(kind, &difficulties, &finished);
    }

    println!("\n{} errors", errors);
    println!("Results saved to: {}", db_path.display());
    println!("Total matches in DB: {}", db.match_count()?);
    Ok(())
}

fn print_summary(kind: AgentKind, difficulties: &[Difficulty], results: &[MatchResult]) {
    println!("--- {kind} ---");
    for &d in difficulties {
        let played: Vec<&MatchResult> = results.iter().filter(|r| r.difficulty == d).collect();
        let count = |o: Outcome| played.iter().filter(|r| r.outcome == o).count();
        let pct = if played.is_empty() {
            0.0
        } else {
            count(Outcome::Win) as f64 / played.len() as f64 * 100.0
        };
        println!(
            "  vs {:10} W {:>4}  T {:>4}  L {:>4}  ({:.1}% wins)",
            opponent_name(d),
            count(Outcome::Win),
            count(Outcome::Tie),
            count(Outcome::Loss),
            pct
        );
    }
}

fn cmd_leaderboard(db_path: &Path) -> Result<(), TournamentError> {
    let db = Database::new(db_path)?;
    let board = db.leaderboard()?;
    if board.is_empty() {
        println!("No agents found. Run some tournaments first.");
        return Ok(());
    }
    println!("=== Leaderboard ===\n");
    println!("{:<20} {:>8} {:>8} {:>8} {:>8}", "Agent", "ELO", "Games", "Wins", "Ties");
    println!("{}", "-".repeat(56));
    for row in &board {
        println!(
            "{:<20} {:>8.1} {:>8} {:>8} {:>8}",
            row.name, row.elo, row.games, row.wins, row.ties
        );
    }
    Ok(())
}

fn cmd_map(seed: u64, json: bool, args: &MapArgs) -> Result<(), TournamentError> {
    let config = load_config(args, None)?;
    let map = Map::generate(&config, &mut ChaCha8Rng::seed_from_u64(seed))?;
    let view = map.render_state();

    if json {
        println!("{}", view.to_json()?);
        return Ok(());
    }

    println!("=== Map (seed {seed}) ===\n");
    for r in &view.regions {
        let neighbors: Vec<String> = r.neighbors.iter().map(|a| a.region.to_string()).collect();
        println!(
            "  {:>4} {:8} ({:>5.0}, {:>5.0})  -> {}",
            r.id.to_string(),
            r.owner.to_string(),
            r.center.x,
            r.center.y,
            neighbors.join(" ")
        );
    }
    let one_way = adjacency::one_way_edges(
        &view.regions.iter().map(|r| r.neighbors.clone()).collect::<Vec<_>>(),
    );
    if !one_way.is_empty() {
        println!("\n  one-way edges: {}", one_way.len());
    }
    Ok(())
}
