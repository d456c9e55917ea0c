// ═══════════════════════════════════════════════════════════════════════
// Region placement — rejection sampling of region centers
// ═══════════════════════════════════════════════════════════════════════

use crate::error::MapError;
use crate::types::{Faction, Point, Viewport};
use rand::Rng;

/// Candidates are never drawn closer than this to the viewport edge.
pub const BORDER_WIDTH: u32 = 50;
/// Squared minimum distance between two accepted centers (100 units).
pub const MIN_DISTANCE_SQUARED: f32 = 10_000.0;
/// Candidates tried per region before generation gives up.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// Scatter `count` centers inside `viewport`, each at least 100 units
/// from every other one.
pub fn place_centers<R: Rng + ?Sized>(
    count: usize,
    viewport: Viewport,
    rng: &mut R,
) -> Result<Vec<Point>, MapError> {
    if viewport.width <= 2 * BORDER_WIDTH || viewport.height <= 2 * BORDER_WIDTH {
        return Err(MapError::ViewportTooSmall {
            width: viewport.width,
            height: viewport.height,
            border: BORDER_WIDTH,
        });
    }

    place_with(count, || candidate_center(viewport, rng))
}

/// Rejection loop over an arbitrary candidate stream. Each region gets
/// at most `MAX_PLACEMENT_ATTEMPTS` draws.
pub fn place_with<F>(count: usize, mut next_candidate: F) -> Result<Vec<Point>, MapError>
where
    F: FnMut() -> Point,
{
    let mut centers: Vec<Point> = Vec::with_capacity(count);
    for region in 0..count {
        let center = (0..MAX_PLACEMENT_ATTEMPTS)
            .map(|_| next_candidate())
            .find(|c| far_enough_apart(*c, &centers));

        match center {
            Some(c) => centers.push(c),
            None => {
                tracing::warn!(
                    region,
                    attempts = MAX_PLACEMENT_ATTEMPTS,
                    "region placement exhausted"
                );
                return Err(MapError::PlacementExhausted {
                    region,
                    attempts: MAX_PLACEMENT_ATTEMPTS,
                });
            }
        }
    }
    Ok(centers)
}

/// Starting owners in placement order: the first half goes to the
/// Player, the remainder (including the odd one out) to the Opponent.
pub fn assign_owners(count: usize) -> Vec<Faction> {
    (0..count)
        .map(|i| if i < count / 2 { Faction::Player } else { Faction::Opponent })
        .collect()
}

fn candidate_center<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Point {
    let x = rng.gen_range(BORDER_WIDTH..viewport.width - BORDER_WIDTH);
    let y = rng.gen_range(BORDER_WIDTH..viewport.height - BORDER_WIDTH);
    Point::new(x as f32, y as f32)
}

fn far_enough_apart(candidate: Point, accepted: &[Point]) -> bool {
    accepted
        .iter()
        .all(|c| candidate.distance_squared(*c) >= MIN_DISTANCE_SQUARED)
}
