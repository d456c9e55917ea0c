// ═══════════════════════════════════════════════════════════════════════
// Combat — one simulation tick over the whole region set
//
// Every region looks at its own neighbor list: neighbors ordering it
// and sharing its owner support it (+1 each), the rest attack it
// (-1 each). Health is capped at MAX_HEALTH; at zero or below the
// region changes hands, heals fully, and drops its own order. Orders
// that targeted it stay in place.
// ═══════════════════════════════════════════════════════════════════════

use crate::types::*;

/// Supporting and attacking neighbor counts for one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pressure {
    pub supporting: i32,
    pub attacking: i32,
}

impl Pressure {
    pub fn delta(self) -> i32 {
        self.supporting - self.attacking
    }
}

/// Count the neighbors of `id` currently ordered against or in favor of it.
pub fn pressure_on(regions: &[Region], id: RegionId) -> Pressure {
    let region = &regions[id.0];
    let mut p = Pressure::default();
    for adj in &region.neighbors {
        let neighbor = &regions[adj.region.0];
        if neighbor.target == Some(id) {
            if neighbor.owner == region.owner {
                p.supporting += 1;
            } else {
                p.attacking += 1;
            }
        }
    }
    p
}

/// Advance every region by one tick. Returns the flips in index order.
pub fn simulate_tick(regions: &mut [Region], mode: TickResolution) -> Vec<Flip> {
    let mut flips = Vec::new();
    match mode {
        TickResolution::Snapshot => {
            let deltas: Vec<i32> = (0..regions.len())
                .map(|i| pressure_on(regions, RegionId(i)).delta())
                .collect();
            for (region, delta) in regions.iter_mut().zip(deltas) {
                if let Some(flip) = apply_delta(region, delta) {
                    flips.push(flip);
                }
            }
        }
        TickResolution::Sequential => {
            for i in 0..regions.len() {
                let delta = pressure_on(regions, RegionId(i)).delta();
                if let Some(flip) = apply_delta(&mut regions[i], delta) {
                    flips.push(flip);
                }
            }
        }
    }
    tracing::debug!(regions = regions.len(), flips = flips.len(), "combat tick");
    flips
}

fn apply_delta(region: &mut Region, delta: i32) -> Option<Flip> {
    region.health = (region.health + delta).min(MAX_HEALTH);
    if region.health > 0 {
        return None;
    }
    region.owner = region.owner.rival();
    region.health = MAX_HEALTH;
    region.target = None;
    tracing::info!(region = %region.id, new_owner = %region.owner, "region flipped");
    Some(Flip {
        region: region.id,
        new_owner: region.owner,
    })
}
