// ═══════════════════════════════════════════════════════════════════════
// Map — owns the region graph and drives both tick cadences
//
// The host loop calls `advance()` once per frame with the elapsed time
// and the clicks collected during that frame. Commands are applied
// first, then the two accumulators are checked:
//
//   simulation tick  every SIM_TICK_MS of accumulated time
//   planner tick     every `ai_tick_ms` (difficulty dependent)
//
// An accumulator that fires is reset to zero; the overshoot of that
// frame is dropped, not carried into the next period.
// ═══════════════════════════════════════════════════════════════════════

use crate::adjacency;
use crate::combat;
use crate::config::GameConfig;
use crate::error::MapError;
use crate::placement;
use crate::planner;
use crate::snapshot::MapSnapshot;
use crate::types::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Period of the combat simulation, in milliseconds.
pub const SIM_TICK_MS: u32 = 100;
/// Smallest region count a map can be built with.
pub const MIN_REGIONS: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Map {
    regions: Vec<Region>,
    viewport: Viewport,
    resolution: TickResolution,
    ai_tick_ms: u32,
    time_since_sim_tick: u32,
    time_since_ai_tick: u32,
    selected: Option<RegionId>,
}

impl Map {
    /// Place, wire, and assign owners for a fresh map.
    pub fn generate<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Map, MapError> {
        check_region_count(config.map.region_count)?;
        let centers = placement::place_centers(config.map.region_count, config.map.viewport, rng)?;
        Map::from_centers(centers, config)
    }

    /// Build a map around known centers. Ownership follows placement
    /// order exactly as for generated maps.
    pub fn from_centers(centers: Vec<Point>, config: &GameConfig) -> Result<Map, MapError> {
        check_region_count(centers.len())?;
        let viewport = config.map.viewport;
        let graph = adjacency::build_adjacency(&centers, viewport, config.map.symmetric_adjacency);
        let owners = placement::assign_owners(centers.len());

        let regions: Vec<Region> = centers
            .into_iter()
            .zip(owners)
            .zip(graph)
            .enumerate()
            .map(|(i, ((center, owner), neighbors))| {
                let mut region = Region::new(RegionId(i), center, owner);
                region.neighbors = neighbors;
                region
            })
            .collect();

        tracing::debug!(
            regions = regions.len(),
            edges = regions.iter().map(|r| r.neighbors.len()).sum::<usize>(),
            "map generated"
        );

        Ok(Map {
            regions,
            viewport,
            resolution: config.map.resolution,
            ai_tick_ms: config.ai_tick_ms(),
            time_since_sim_tick: 0,
            time_since_ai_tick: 0,
            selected: None,
        })
    }

    // ── Frame driver ───────────────────────────────────────────────────

    /// Apply this frame's commands, then run whichever ticks are due.
    pub fn advance(&mut self, elapsed_ms: u32, commands: &[Command]) -> Vec<MapEvent> {
        let mut events: Vec<MapEvent> = commands.iter().filter_map(|c| self.apply(*c)).collect();

        self.time_since_sim_tick = self.time_since_sim_tick.saturating_add(elapsed_ms);
        self.time_since_ai_tick = self.time_since_ai_tick.saturating_add(elapsed_ms);

        if self.time_since_sim_tick > SIM_TICK_MS {
            events.extend(self.tick());
            self.time_since_sim_tick = 0;
        }
        if self.time_since_ai_tick > self.ai_tick_ms {
            events.extend(self.ai_tick());
            self.time_since_ai_tick = 0;
        }
        events
    }

    pub fn apply(&mut self, command: Command) -> Option<MapEvent> {
        match command {
            Command::Select(point) => self.select_region(point),
        }
    }

    /// Run one combat tick immediately.
    pub fn tick(&mut self) -> Vec<MapEvent> {
        let flips = combat::simulate_tick(&mut self.regions, self.resolution);
        flips
            .into_iter()
            .map(|flip| {
                if self.selected == Some(flip.region) && flip.new_owner != Faction::Player {
                    self.clear_selection();
                }
                MapEvent::RegionFlipped {
                    region: flip.region,
                    new_owner: flip.new_owner,
                }
            })
            .collect()
    }

    /// Let the opponent change at most one order immediately.
    pub fn ai_tick(&mut self) -> Option<MapEvent> {
        planner::run_planner(&mut self.regions, Faction::Opponent).map(|c| MapEvent::OrderIssued {
            source: c.source,
            target: c.target,
            faction: Faction::Opponent,
        })
    }

    // ── Commands ───────────────────────────────────────────────────────

    /// Selection click. The region with the nearest center is hit, no
    /// matter how far away the click is.
    ///
    /// - clicking the selected region deselects it
    /// - with nothing selected, a Player region becomes selected
    /// - with a selection, clicking one of its neighbors orders it
    ///   there and clears the selection
    ///
    /// Anything else is ignored.
    pub fn select_region(&mut self, point: Point) -> Option<MapEvent> {
        let hit = self.closest_region(point)?;

        match self.selected {
            Some(selected) if selected == hit => {
                self.clear_selection();
                None
            }
            None => {
                if self.regions[hit.0].owner == Faction::Player {
                    self.regions[hit.0].selected = true;
                    self.selected = Some(hit);
                }
                None
            }
            Some(selected) => {
                if !self.issue_order(selected, hit) {
                    return None;
                }
                self.clear_selection();
                Some(MapEvent::OrderIssued {
                    source: selected,
                    target: hit,
                    faction: self.regions[selected.0].owner,
                })
            }
        }
    }

    /// Point `source` at `target`. Refused unless `target` is one of
    /// its neighbors.
    pub fn issue_order(&mut self, source: RegionId, target: RegionId) -> bool {
        match self.regions.get_mut(source.0) {
            Some(region) => region.set_target(Some(target)),
            None => false,
        }
    }

    /// Drop the outstanding order of `source`, if any.
    pub fn cancel_order(&mut self, source: RegionId) {
        if let Some(region) = self.regions.get_mut(source.0) {
            region.target = None;
        }
    }

    fn clear_selection(&mut self) {
        if let Some(id) = self.selected.take() {
            self.regions[id.0].selected = false;
        }
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn closest_region(&self, point: Point) -> Option<RegionId> {
        adjacency::nearest_region(&self.centers(), point)
    }

    pub fn centers(&self) -> Vec<Point> {
        self.regions.iter().map(|r| r.center).collect()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.0)
    }

    pub fn selected(&self) -> Option<RegionId> {
        self.selected
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resolution(&self) -> TickResolution {
        self.resolution
    }

    pub fn ai_tick_ms(&self) -> u32 {
        self.ai_tick_ms
    }

    pub fn owned_count(&self, faction: Faction) -> usize {
        self.regions.iter().filter(|r| r.owner == faction).count()
    }

    /// The score: regions currently held by the Player.
    pub fn player_owned_count(&self) -> usize {
        self.owned_count(Faction::Player)
    }

    /// One faction holds every region.
    pub fn is_decided(&self) -> bool {
        let p = self.player_owned_count();
        p == 0 || p == self.regions.len()
    }

    pub fn render_state(&self) -> MapSnapshot {
        MapSnapshot::capture(self)
    }
}

fn check_region_count(requested: usize) -> Result<(), MapError> {
    if requested < MIN_REGIONS {
        return Err(MapError::TooFewRegions {
            requested,
            min: MIN_REGIONS,
        });
    }
    Ok(())
}
