// ═══════════════════════════════════════════════════════════════════════
// Adjacency — approximate Voronoi borders by radial sampling
//
// Each region casts rays from its center and walks them outward one
// unit at a time. The first sample whose nearest center belongs to a
// different region marks a border crossing. Crossings are grouped per
// neighbor and averaged into one boundary point.
//
// Every region is sampled independently, so the graph can come out
// asymmetric when a thin neighbor falls between two rays.
// ═══════════════════════════════════════════════════════════════════════

use crate::types::{AdjacentRegion, Point, RegionId, Viewport};
use std::f32::consts::TAU;

/// Angle between consecutive rays, in radians.
pub const RAY_STEP: f32 = 0.1;

/// Region whose center is closest to `point`. Ties go to the lowest
/// index. `None` only when there are no centers at all.
pub fn nearest_region(centers: &[Point], point: Point) -> Option<RegionId> {
    let mut best: Option<(usize, f32)> = None;
    for (i, c) in centers.iter().enumerate() {
        let d = c.distance_squared(point);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| RegionId(i))
}

/// Walk from the source center along `ray` (unit length) and report
/// the first region entered, with the sample point where it happened.
/// Returns `None` when the walk leaves the viewport first.
pub fn first_region_in_direction(
    centers: &[Point],
    source: RegionId,
    ray: Point,
    viewport: Viewport,
) -> Option<(RegionId, Point)> {
    let mut sample = centers[source.0];
    while viewport.contains(sample) {
        sample += ray;
        match nearest_region(centers, sample) {
            Some(r) if r != source => return Some((r, sample)),
            _ => {}
        }
    }
    None
}

/// Neighbors of one region, in the order their first crossing was found.
pub fn regions_adjacent_to(
    centers: &[Point],
    source: RegionId,
    viewport: Viewport,
) -> Vec<AdjacentRegion> {
    // (neighbor, sum of crossings, crossing count)
    let mut crossings: Vec<(RegionId, Point, u32)> = Vec::new();

    let mut angle = 0.0f32;
    while angle < TAU {
        let ray = Point::new(angle.cos(), angle.sin());
        if let Some((region, point)) = first_region_in_direction(centers, source, ray, viewport) {
            match crossings.iter_mut().find(|(r, _, _)| *r == region) {
                Some((_, sum, n)) => {
                    *sum += point;
                    *n += 1;
                }
                None => crossings.push((region, point, 1)),
            }
        }
        angle += RAY_STEP;
    }

    crossings
        .into_iter()
        .map(|(region, sum, n)| AdjacentRegion {
            region,
            boundary: sum / n as f32,
        })
        .collect()
}

/// Adjacency lists for every region. With `symmetric`, any edge A→B
/// that has no B→A counterpart gets a mirrored edge sharing its
/// boundary point.
pub fn build_adjacency(
    centers: &[Point],
    viewport: Viewport,
    symmetric: bool,
) -> Vec<Vec<AdjacentRegion>> {
    let mut graph: Vec<Vec<AdjacentRegion>> = (0..centers.len())
        .map(|i| regions_adjacent_to(centers, RegionId(i), viewport))
        .collect();

    if symmetric {
        let g = &graph;
        let missing: Vec<(RegionId, AdjacentRegion)> = g
            .iter()
            .enumerate()
            .flat_map(|(i, edges)| {
                edges.iter().filter_map(move |e| {
                    let back = g[e.region.0].iter().any(|b| b.region.0 == i);
                    (!back).then_some((
                        e.region,
                        AdjacentRegion { region: RegionId(i), boundary: e.boundary },
                    ))
                })
            })
            .collect();
        for (from, edge) in missing {
            tracing::debug!(from = %from, to = %edge.region, "mirroring one-way adjacency");
            graph[from.0].push(edge);
        }
    }

    graph
}

/// Pairs (A, B) where A lists B but B does not list A.
pub fn one_way_edges(graph: &[Vec<AdjacentRegion>]) -> Vec<(RegionId, RegionId)> {
    graph
        .iter()
        .enumerate()
        .flat_map(|(i, edges)| {
            edges
                .iter()
                .filter(move |e| !graph[e.region.0].iter().any(|b| b.region.0 == i))
                .map(move |e| (RegionId(i), e.region))
        })
        .collect()
}
