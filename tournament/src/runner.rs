// ═══════════════════════════════════════════════════════════════════════
// Match Runner — plays complete headless rounds against the opponent AI
//
// One match is one timed round: the agent stands in for the Player and
// is fed a fixed frame step until the round clock runs out. Maps that
// fail placement are regenerated from a derived seed a few times before
// the match is given up.
// ═══════════════════════════════════════════════════════════════════════

use crate::error::TournamentError;
use conquest_agents::{Agent, AgentKind};
use conquest_engine::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Frame step used when the caller has no preference (about 60 fps).
pub const DEFAULT_FRAME_MS: u32 = 16;
/// Regeneration attempts after a failed placement.
pub const MAX_GENERATION_RETRIES: u32 = 8;

const RETRY_SEED_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

/// Result of one completed round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Seed the match was requested with.
    pub seed: u64,
    /// Seed the played map was actually generated from.
    pub map_seed: u64,
    pub agent_name: String,
    pub difficulty: Difficulty,
    pub outcome: Outcome,
    pub player_owned: usize,
    pub region_count: usize,
    pub flips: u32,
    pub player_orders: u32,
    pub opponent_orders: u32,
    pub frames: u32,
}

/// Play one round with `agent` on a map generated from `seed`.
pub fn run_match(
    agent: &mut dyn Agent,
    config: &GameConfig,
    seed: u64,
    frame_ms: u32,
) -> Result<MatchResult, TournamentError> {
    if frame_ms == 0 {
        return Err(ConfigError::Invalid("frame step must be positive".into()).into());
    }
    config.validate()?;

    let (mut session, map_seed) = start_session(config, seed)?;
    let mut result = MatchResult {
        seed,
        map_seed,
        agent_name: agent.name().to_string(),
        difficulty: config.difficulty,
        outcome: Outcome::Tie,
        player_owned: 0,
        region_count: session.map().regions().len(),
        flips: 0,
        player_orders: 0,
        opponent_orders: 0,
        frames: 0,
    };

    while !session.is_finished() {
        let commands = agent.decide(&session.render_state(), frame_ms);
        for event in session.advance(frame_ms, &commands) {
            match event {
                SessionEvent::Map(MapEvent::RegionFlipped { .. }) => result.flips += 1,
                SessionEvent::Map(MapEvent::OrderIssued { faction, .. }) => match faction {
                    Faction::Player => result.player_orders += 1,
                    Faction::Opponent => result.opponent_orders += 1,
                },
                SessionEvent::CountdownTick { .. } => {}
                SessionEvent::RoundEnded { outcome, player_owned } => {
                    result.outcome = outcome;
                    result.player_owned = player_owned;
                }
            }
        }
        result.frames += 1;
    }

    tracing::info!(
        agent = %result.agent_name,
        difficulty = %result.difficulty,
        seed,
        outcome = %result.outcome,
        player_owned = result.player_owned,
        "match finished"
    );
    Ok(result)
}

fn start_session(config: &GameConfig, seed: u64) -> Result<(Session, u64), TournamentError> {
    let mut attempt = 0;
    loop {
        let map_seed = seed.wrapping_add(RETRY_SEED_STRIDE.wrapping_mul(attempt as u64));
        let mut rng = ChaCha8Rng::seed_from_u64(map_seed);
        match Session::start(config, &mut rng) {
            Ok(session) => return Ok((session, map_seed)),
            Err(e @ MapError::PlacementExhausted { .. }) if attempt < MAX_GENERATION_RETRIES => {
                tracing::warn!(seed, attempt, error = %e, "regenerating map");
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

// ── Batches ────────────────────────────────────────────────────────────

/// A block of matches for one agent kind across difficulties.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    pub agent: AgentKind,
    pub difficulties: Vec<Difficulty>,
    pub games_per_difficulty: u32,
    pub base_seed: u64,
    pub frame_ms: u32,
}

impl BatchPlan {
    pub fn new(agent: AgentKind, games_per_difficulty: u32) -> Self {
        BatchPlan {
            agent,
            difficulties: Difficulty::ALL.to_vec(),
            games_per_difficulty,
            base_seed: 42,
            frame_ms: DEFAULT_FRAME_MS,
        }
    }

    /// Seed of the `game`th match, shared by every difficulty so the
    /// presets are compared on the same maps.
    pub fn seed_for(&self, game: u32) -> u64 {
        self.base_seed.wrapping_add(game as u64 * 1000)
    }

    fn jobs(&self) -> Vec<(Difficulty, u64)> {
        self.difficulties
            .iter()
            .flat_map(|&d| (0..self.games_per_difficulty).map(move |g| (d, g)))
            .map(|(d, g)| (d, self.seed_for(g)))
            .collect()
    }
}

/// Run every match of `plan` in parallel. Results come back in plan
/// order: difficulty first, then game index.
pub fn run_batch(plan: &BatchPlan, base: &GameConfig) -> Vec<Result<MatchResult, TournamentError>> {
    plan.jobs()
        .into_par_iter()
        .map(|(difficulty, seed)| {
            let mut config = base.clone();
            config.difficulty = difficulty;
            let mut agent = plan.agent.build(seed);
            run_match(agent.as_mut(), &config, seed, plan.frame_ms)
        })
        .collect()
}
