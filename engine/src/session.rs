// ═══════════════════════════════════════════════════════════════════════
// Session — one timed round around a Map
//
// The round clock counts down from `round_length_ms`. When it runs out
// the map is frozen and the outcome is fixed by the score: holding more
// than half the regions wins, exactly half ties. After the round a
// short lockout keeps a stray click from dismissing the result screen.
// ═══════════════════════════════════════════════════════════════════════

use crate::config::{Difficulty, GameConfig, SessionConfig};
use crate::error::MapError;
use crate::map::Map;
use crate::snapshot::MapSnapshot;
use crate::types::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Tie,
    Loss,
}

impl Outcome {
    /// Result for the Player holding `player_owned` of `total` regions.
    pub fn from_score(player_owned: usize, total: usize) -> Outcome {
        match (2 * player_owned).cmp(&total) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Tie,
            std::cmp::Ordering::Less => Outcome::Loss,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "WIN"),
            Outcome::Tie => write!(f, "TIED"),
            Outcome::Loss => write!(f, "LOST"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Map(MapEvent),
    /// The whole-second countdown shown to the player changed.
    CountdownTick { seconds_left: u32 },
    RoundEnded { outcome: Outcome, player_owned: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    map: Map,
    config: SessionConfig,
    difficulty: Difficulty,
    elapsed_ms: u32,
    shown_seconds: u32,
    ended_for_ms: Option<u32>,
}

impl Session {
    pub fn new(map: Map, config: SessionConfig, difficulty: Difficulty) -> Self {
        let shown_seconds = rounded_seconds(config.round_length_ms);
        Session {
            map,
            config,
            difficulty,
            elapsed_ms: 0,
            shown_seconds,
            ended_for_ms: None,
        }
    }

    /// Generate a map from `config` and start a round on it.
    pub fn start<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self, MapError> {
        let map = Map::generate(config, rng)?;
        tracing::info!(
            difficulty = %config.difficulty,
            regions = config.map.region_count,
            "round started"
        );
        Ok(Session::new(map, config.session.clone(), config.difficulty))
    }

    pub fn advance(&mut self, elapsed_ms: u32, commands: &[Command]) -> Vec<SessionEvent> {
        if let Some(since) = self.ended_for_ms.as_mut() {
            *since = since.saturating_add(elapsed_ms);
            return Vec::new();
        }

        let mut events: Vec<SessionEvent> = self
            .map
            .advance(elapsed_ms, commands)
            .into_iter()
            .map(SessionEvent::Map)
            .collect();

        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms).min(self.config.round_length_ms);

        let seconds = self.seconds_left();
        if seconds != self.shown_seconds {
            self.shown_seconds = seconds;
            events.push(SessionEvent::CountdownTick { seconds_left: seconds });
        }

        if self.elapsed_ms >= self.config.round_length_ms {
            self.ended_for_ms = Some(0);
            let outcome = self.outcome();
            let player_owned = self.map.player_owned_count();
            tracing::info!(%outcome, player_owned, "round ended");
            events.push(SessionEvent::RoundEnded { outcome, player_owned });
        }
        events
    }

    /// Remaining time rounded to the nearest whole second.
    pub fn seconds_left(&self) -> u32 {
        rounded_seconds(self.config.round_length_ms - self.elapsed_ms)
    }

    pub fn remaining_ms(&self) -> u32 {
        self.config.round_length_ms - self.elapsed_ms
    }

    pub fn is_finished(&self) -> bool {
        self.ended_for_ms.is_some()
    }

    /// The result screen accepts a dismissing click.
    pub fn can_dismiss(&self) -> bool {
        self.ended_for_ms.map_or(false, |t| t > self.config.end_lockout_ms)
    }

    /// Outcome by the current score; final once the round has ended.
    pub fn outcome(&self) -> Outcome {
        Outcome::from_score(self.map.player_owned_count(), self.map.regions().len())
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn render_state(&self) -> MapSnapshot {
        self.map.render_state()
    }
}

fn rounded_seconds(ms: u32) -> u32 {
    ms / 1000 + u32::from(ms % 1000 >= 500)
}
