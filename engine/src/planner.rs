// ═══════════════════════════════════════════════════════════════════════
// Planner — the scripted opponent's order heuristic
//
// Every call looks at all of one faction's regions and changes at most
// one order. Each (source, neighbor) pair is scored from how many other
// regions already target that neighbor on either side:
//
//   own neighbor    attackers == defenders + 1  →   100  (losing, help)
//                   attackers <  defenders - 1  →  -100  (over-defended)
//                   otherwise                   →     0
//   enemy neighbor  attackers == defenders      →  1000  (tip the balance)
//                   attackers - 1 > defenders   →   -10  (over-committed)
//                   otherwise                   →    10
//
// Ties keep the first candidate in region/neighbor order.
// ═══════════════════════════════════════════════════════════════════════

use crate::types::*;

pub const DEFEND_LOSING: i32 = 100;
pub const DEFEND_SURPLUS: i32 = -100;
pub const ATTACK_EVEN: i32 = 1000;
pub const ATTACK_SURPLUS: i32 = -10;
pub const ATTACK_PLAIN: i32 = 10;

/// Regions targeting `target`, excluding `exclude`, split by whether
/// they share the target's owner: `(attackers, defenders)`.
fn commitments(regions: &[Region], target: RegionId, exclude: RegionId) -> (i32, i32) {
    let target_owner = regions[target.0].owner;
    let mut attackers = 0;
    let mut defenders = 0;
    for r in regions {
        if r.id == exclude || r.target != Some(target) {
            continue;
        }
        if r.owner == target_owner {
            defenders += 1;
        } else {
            attackers += 1;
        }
    }
    (attackers, defenders)
}

/// Score of `source` (owned by `faction`) ordering against `candidate`.
pub fn score_candidate(
    regions: &[Region],
    faction: Faction,
    source: RegionId,
    candidate: RegionId,
) -> i32 {
    let (attackers, defenders) = commitments(regions, candidate, source);
    if regions[candidate.0].owner == faction {
        if attackers == defenders + 1 {
            DEFEND_LOSING
        } else if attackers < defenders - 1 {
            DEFEND_SURPLUS
        } else {
            0
        }
    } else if attackers == defenders {
        ATTACK_EVEN
    } else if attackers - 1 > defenders {
        ATTACK_SURPLUS
    } else {
        ATTACK_PLAIN
    }
}

/// Best neighbor of one source region and its score.
pub fn best_neighbor(
    regions: &[Region],
    faction: Faction,
    source: RegionId,
) -> Option<(RegionId, i32)> {
    let mut best: Option<(RegionId, i32)> = None;
    for adj in &regions[source.0].neighbors {
        let score = score_candidate(regions, faction, source, adj.region);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((adj.region, score));
        }
    }
    best
}

/// Pick the single order change `faction` would make right now.
/// `None` when the faction owns nothing or everything, or when every
/// region already holds its preferred order.
pub fn plan_order(regions: &[Region], faction: Faction) -> Option<OrderChange> {
    let owned = regions.iter().filter(|r| r.owner == faction).count();
    if owned == 0 || owned == regions.len() {
        return None;
    }

    let mut best: Option<OrderChange> = None;
    for source in regions.iter().filter(|r| r.owner == faction) {
        let Some((target, score)) = best_neighbor(regions, faction, source.id) else {
            continue;
        };
        if source.target == Some(target) {
            continue;
        }
        if best.map_or(true, |b| score > b.score) {
            best = Some(OrderChange {
                source: source.id,
                target,
                score,
            });
        }
    }
    best
}

/// Plan and apply one order change for `faction`.
pub fn run_planner(regions: &mut [Region], faction: Faction) -> Option<OrderChange> {
    let change = plan_order(regions, faction)?;
    let source = &mut regions[change.source.0];
    if !source.set_target(Some(change.target)) {
        return None;
    }
    tracing::debug!(
        faction = %faction,
        source = %change.source,
        target = %change.target,
        score = change.score,
        "planner issued order"
    );
    Some(change)
}
