// ═══════════════════════════════════════════════════════════════════════
// Heuristic Agent — plays the Player side with the opponent's planner.
//
// On every reaction it asks the planner which single order the Player
// would change and clicks it in. The reaction period is jittered a
// little so two heuristic runs on the same map do not stay in lockstep
// with the opponent's fixed cadence.
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::{order_clicks, Agent, ReactionTimer};
use conquest_engine::planner::plan_order;
use conquest_engine::{Command, Faction, MapSnapshot};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Mean time between two planned orders; about a fast human's pace.
pub const HEURISTIC_REACTION_MS: u32 = 600;
const JITTER_MS: u32 = 150;

pub struct HeuristicAgent {
    rng: ChaCha8Rng,
    reaction_ms: u32,
    timer: ReactionTimer,
}

impl HeuristicAgent {
    pub fn new(seed: u64) -> Self {
        Self::with_reaction(seed, HEURISTIC_REACTION_MS)
    }

    pub fn with_reaction(seed: u64, reaction_ms: u32) -> Self {
        HeuristicAgent {
            rng: ChaCha8Rng::seed_from_u64(seed),
            reaction_ms,
            timer: ReactionTimer::new(reaction_ms),
        }
    }

    fn rearm(&mut self) {
        let jitter = self.rng.gen_range(0..=2 * JITTER_MS);
        let interval = (self.reaction_ms + jitter).saturating_sub(JITTER_MS);
        self.timer.set_interval(interval);
    }
}

impl Agent for HeuristicAgent {
    fn name(&self) -> &str { "Heuristic" }

    fn decide(&mut self, view: &MapSnapshot, elapsed_ms: u32) -> Vec<Command> {
        if !self.timer.tick(elapsed_ms) {
            return Vec::new();
        }
        self.rearm();

        match plan_order(&view.regions, Faction::Player) {
            Some(change) => {
                tracing::trace!(source = %change.source, target = %change.target, "heuristic order");
                order_clicks(view, change.source, change.target)
            }
            None => Vec::new(),
        }
    }
}
