// ═══════════════════════════════════════════════════════════════════════
// Agent Trait — stand-ins for the human player
//
// An agent sees the same snapshot a renderer would draw and answers
// with the clicks a person would make in that frame. It never touches
// the map directly, so everything it does goes through the same
// selection rules as real input.
// ═══════════════════════════════════════════════════════════════════════

use conquest_engine::{Command, ConfigError, MapSnapshot, RegionId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Trait that all player agents must implement.
pub trait Agent: Send + Sync {
    /// Human-readable name for this agent (e.g., "Random", "Heuristic").
    fn name(&self) -> &str;

    /// Called once per frame with the time since the previous frame.
    /// Returns the clicks to deliver with that frame, in order.
    fn decide(&mut self, view: &MapSnapshot, elapsed_ms: u32) -> Vec<Command>;
}

/// Never clicks. Baseline for how the opponent fares unopposed.
#[derive(Debug, Default)]
pub struct IdleAgent;

impl Agent for IdleAgent {
    fn name(&self) -> &str { "Idle" }

    fn decide(&mut self, _view: &MapSnapshot, _elapsed_ms: u32) -> Vec<Command> {
        Vec::new()
    }
}

// ── Shared helpers ─────────────────────────────────────────────────────

/// Fires at most once per `interval_ms` of accumulated frame time.
#[derive(Debug, Clone)]
pub struct ReactionTimer {
    interval_ms: u32,
    elapsed_ms: u32,
}

impl ReactionTimer {
    pub fn new(interval_ms: u32) -> Self {
        ReactionTimer { interval_ms, elapsed_ms: 0 }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms;
    }

    /// Add frame time; true (and reset) once the interval is exceeded.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if self.elapsed_ms > self.interval_ms {
            self.elapsed_ms = 0;
            true
        } else {
            false
        }
    }
}

/// Clicks that order `source` onto `target`, starting from whatever
/// the view shows as selected. A stale selection is cleared first.
pub fn order_clicks(view: &MapSnapshot, source: RegionId, target: RegionId) -> Vec<Command> {
    let (Some(src), Some(dst)) = (view.region(source), view.region(target)) else {
        return Vec::new();
    };

    let mut clicks = Vec::with_capacity(3);
    match view.selected {
        Some(s) if s == source => {}
        Some(s) => {
            if let Some(stale) = view.region(s) {
                clicks.push(Command::Select(stale.center));
            }
            clicks.push(Command::Select(src.center));
        }
        None => clicks.push(Command::Select(src.center)),
    }
    clicks.push(Command::Select(dst.center));
    clicks
}

// ── Agent kinds ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Idle,
    Random,
    Heuristic,
}

impl AgentKind {
    pub const ALL: [AgentKind; 3] = [AgentKind::Idle, AgentKind::Random, AgentKind::Heuristic];

    pub fn build(self, seed: u64) -> Box<dyn Agent> {
        match self {
            AgentKind::Idle => Box::new(IdleAgent),
            AgentKind::Random => Box::new(crate::RandomAgent::new(seed)),
            AgentKind::Heuristic => Box::new(crate::HeuristicAgent::new(seed)),
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentKind::Idle => write!(f, "idle"),
            AgentKind::Random => write!(f, "random"),
            AgentKind::Heuristic => write!(f, "heuristic"),
        }
    }
}

impl FromStr for AgentKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "idle" => Ok(AgentKind::Idle),
            "random" => Ok(AgentKind::Random),
            "heuristic" => Ok(AgentKind::Heuristic),
            other => Err(ConfigError::Invalid(format!("unknown agent '{other}'"))),
        }
    }
}
