// ═══════════════════════════════════════════════════════════════════════
// Random Agent — orders a random region onto a random neighbor.
// Serves as baseline and for exercising the selection rules.
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::{order_clicks, Agent, ReactionTimer};
use conquest_engine::{Command, Faction, MapSnapshot, Region};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Time between two random orders.
pub const RANDOM_REACTION_MS: u32 = 700;

pub struct RandomAgent {
    rng: ChaCha8Rng,
    timer: ReactionTimer,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        RandomAgent {
            rng: ChaCha8Rng::seed_from_u64(seed),
            timer: ReactionTimer::new(RANDOM_REACTION_MS),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str { "Random" }

    fn decide(&mut self, view: &MapSnapshot, elapsed_ms: u32) -> Vec<Command> {
        if !self.timer.tick(elapsed_ms) {
            return Vec::new();
        }

        let mine: Vec<&Region> = view
            .owned_by(Faction::Player)
            .filter(|r| !r.neighbors.is_empty())
            .collect();
        let Some(source) = mine.choose(&mut self.rng) else {
            return Vec::new();
        };
        let Some(target) = source.neighbors.choose(&mut self.rng) else {
            return Vec::new();
        };
        if source.target == Some(target.region) {
            return Vec::new();
        }
        order_clicks(view, source.id, target.region)
    }
}
