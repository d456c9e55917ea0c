// ═══════════════════════════════════════════════════════════════════════
// Snapshot — read-only copy of the map for renderers and agents
//
// Captured between frames, after every tick of the frame has finished,
// so a reader never sees a half-updated region set. Everything on this
// map is public information; there is nothing to hide from either side.
// ═══════════════════════════════════════════════════════════════════════

use crate::map::Map;
use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub viewport: Viewport,
    pub regions: Vec<Region>,
    pub selected: Option<RegionId>,
    /// Regions held by the Player (the score).
    pub player_owned: usize,
}

/// An order as the renderer draws it: an arrow in the source's color,
/// anchored on the shared border.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub from: RegionId,
    pub to: RegionId,
    pub owner: Faction,
    pub anchor: Point,
    /// Direction from the source center to the target center, radians.
    pub angle: f32,
}

impl MapSnapshot {
    pub fn capture(map: &Map) -> Self {
        MapSnapshot {
            viewport: map.viewport(),
            regions: map.regions().to_vec(),
            selected: map.selected(),
            player_owned: map.player_owned_count(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.0)
    }

    pub fn owned_by(&self, faction: Faction) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(move |r| r.owner == faction)
    }

    pub fn arrows(&self) -> Vec<Arrow> {
        self.regions
            .iter()
            .filter_map(|r| {
                let to = r.target?;
                let anchor = r.target_anchor()?;
                let dest = self.regions.get(to.0)?.center;
                Some(Arrow {
                    from: r.id,
                    to,
                    owner: r.owner,
                    anchor,
                    angle: (dest.y - r.center.y).atan2(dest.x - r.center.x),
                })
            })
            .collect()
    }

    /// Display intensity in [0, 1]: dimmed unless selected, scaled by health.
    pub fn shade(&self, id: RegionId) -> f32 {
        self.region(id).map_or(0.0, |r| {
            let base = if r.selected { 1.0 } else { 0.5 };
            base * r.health as f32 / MAX_HEALTH as f32
        })
    }
}
