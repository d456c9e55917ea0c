use crate::database::{opponent_name, Database, STARTING_ELO};
use crate::runner::{run_batch, run_match, BatchPlan, MatchResult, DEFAULT_FRAME_MS};
use crate::TournamentError;
use conquest_agents::{AgentKind, HeuristicAgent, IdleAgent};
use conquest_engine::{ConfigError, Difficulty, GameConfig, Outcome};

fn result(agent: &str, difficulty: Difficulty, outcome: Outcome) -> MatchResult {
    MatchResult {
        seed: 7,
        map_seed: 7,
        agent_name: agent.to_string(),
        difficulty,
        outcome,
        player_owned: match outcome {
            Outcome::Win => 7,
            Outcome::Tie => 5,
            Outcome::Loss => 2,
        },
        region_count: 10,
        flips: 4,
        player_orders: 3,
        opponent_orders: 6,
        frames: 625,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// MATCH RUNNER
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_match_runs_full_round() {
    let config = GameConfig::default();
    let result = run_match(&mut IdleAgent, &config, 1, DEFAULT_FRAME_MS).unwrap();
    // 10 000 ms in 16 ms frames.
    assert_eq!(result.frames, 625);
    assert_eq!(result.region_count, 10);
    assert_eq!(result.player_orders, 0);
    assert!(result.opponent_orders > 0);
    assert_eq!(result.outcome, Outcome::from_score(result.player_owned, 10));
    assert_eq!(result.agent_name, "Idle");
}

#[test]
fn test_match_is_deterministic() {
    let config = GameConfig::default();
    let a = run_match(&mut HeuristicAgent::new(5), &config, 99, 20).unwrap();
    let b = run_match(&mut HeuristicAgent::new(5), &config, 99, 20).unwrap();
    assert_eq!(a, b);
    assert!(a.player_orders > 0);
}

#[test]
fn test_match_rejects_bad_settings() {
    let config = GameConfig::default();
    assert!(matches!(
        run_match(&mut IdleAgent, &config, 1, 0),
        Err(TournamentError::Config(ConfigError::Invalid(_)))
    ));

    let mut config = GameConfig::default();
    config.map.region_count = 1;
    assert!(matches!(
        run_match(&mut IdleAgent, &config, 1, DEFAULT_FRAME_MS),
        Err(TournamentError::Config(_))
    ));
}

#[test]
fn test_crowded_map_gives_up() {
    // Far more regions than fit 100px apart in the default viewport.
    let mut config = GameConfig::default();
    config.map.region_count = 200;
    assert!(matches!(
        run_match(&mut IdleAgent, &config, 1, DEFAULT_FRAME_MS),
        Err(TournamentError::Map(_))
    ));
}

#[test]
fn test_batch_covers_plan_in_order() {
    let mut plan = BatchPlan::new(AgentKind::Random, 2);
    plan.difficulties = vec![Difficulty::Easy, Difficulty::Hard];
    plan.frame_ms = 50;
    let results = run_batch(&plan, &GameConfig::default());
    assert_eq!(results.len(), 4);

    let results: Vec<MatchResult> = results.into_iter().map(|r| r.unwrap()).collect();
    let order: Vec<(Difficulty, u64)> = results.iter().map(|r| (r.difficulty, r.seed)).collect();
    assert_eq!(
        order,
        vec![
            (Difficulty::Easy, plan.seed_for(0)),
            (Difficulty::Easy, plan.seed_for(1)),
            (Difficulty::Hard, plan.seed_for(0)),
            (Difficulty::Hard, plan.seed_for(1)),
        ]
    );
    assert!(results.iter().all(|r| r.agent_name == "Random"));
}

// ═══════════════════════════════════════════════════════════════════════
// DATABASE
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_register_agent_is_idempotent() {
    let db = Database::in_memory().unwrap();
    let a = db.register_agent("Heuristic").unwrap();
    assert_eq!(db.register_agent("Heuristic").unwrap(), a);
    assert_ne!(db.register_agent("Random").unwrap(), a);
    assert_eq!(db.elo(a).unwrap(), Some(STARTING_ELO));
    assert_eq!(db.elo(999).unwrap(), None);
}

#[test]
fn test_record_win_moves_ratings() {
    let mut db = Database::in_memory().unwrap();
    db.record_match(&result("Heuristic", Difficulty::Normal, Outcome::Win)).unwrap();
    assert_eq!(db.match_count().unwrap(), 1);

    let board = db.leaderboard().unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].name, "Heuristic");
    assert_eq!(board[0].wins, 1);
    assert!((board[0].elo - 1516.0).abs() < 1e-9);
    assert_eq!(board[1].name, opponent_name(Difficulty::Normal));
    assert_eq!(board[1].games, 1);
    assert_eq!(board[1].wins, 0);
    assert!((board[1].elo - 1484.0).abs() < 1e-9);
}

#[test]
fn test_record_tie_between_equals_keeps_ratings() {
    let mut db = Database::in_memory().unwrap();
    db.record_match(&result("Random", Difficulty::Easy, Outcome::Tie)).unwrap();
    for row in db.leaderboard().unwrap() {
        assert!((row.elo - STARTING_ELO).abs() < 1e-9);
        assert_eq!(row.ties, 1);
        assert_eq!(row.wins, 0);
    }
}

#[test]
fn test_presets_rated_separately() {
    let mut db = Database::in_memory().unwrap();
    for d in Difficulty::ALL {
        db.record_match(&result("Idle", d, Outcome::Loss)).unwrap();
    }
    assert_eq!(db.match_count().unwrap(), 3);
    let board = db.leaderboard().unwrap();
    assert_eq!(board.len(), 4);
    assert_eq!(board.last().map(|r| r.name.as_str()), Some("Idle"));
    assert_eq!(board.last().map(|r| r.games), Some(3));
}

#[test]
fn test_failed_rating_update_rolls_back_match() {
    let mut db = Database::in_memory().unwrap();
    db.connection()
        .execute_batch(
            "CREATE TRIGGER lock_elo BEFORE UPDATE OF elo ON agents
             BEGIN SELECT RAISE(ABORT, 'ratings locked'); END;",
        )
        .unwrap();

    let err = db.record_match(&result("Heuristic", Difficulty::Hard, Outcome::Win));
    assert!(matches!(err, Err(TournamentError::Database(_))));
    assert_eq!(db.match_count().unwrap(), 0);
    for row in db.leaderboard().unwrap() {
        assert_eq!(row.games, 0);
        assert_eq!(row.wins, 0);
        assert!((row.elo - STARTING_ELO).abs() < 1e-9);
    }
}
