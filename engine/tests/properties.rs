//! Property-based tests for map generation, ticks, and the planner.

use conquest_engine::adjacency::one_way_edges;
use conquest_engine::combat::simulate_tick;
use conquest_engine::placement::MIN_DISTANCE_SQUARED;
use conquest_engine::planner::run_planner;
use conquest_engine::*;
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn generate(seed: u64, regions: usize) -> Result<Map, MapError> {
    let mut config = GameConfig::default();
    config.map.region_count = regions;
    Map::generate(&config, &mut ChaCha8Rng::seed_from_u64(seed))
}

/// Give roughly half the regions a random neighbor as their order.
fn scatter_orders(regions: &mut [Region], rng: &mut ChaCha8Rng) {
    for r in regions.iter_mut() {
        if rng.gen_bool(0.5) {
            let target = r.neighbors.choose(rng).map(|a| a.region);
            r.set_target(target);
        }
    }
}

fn resolution(sequential: bool) -> TickResolution {
    if sequential {
        TickResolution::Sequential
    } else {
        TickResolution::Snapshot
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Generation either fails on placement or yields a fully wired map.
    #[test]
    fn prop_generated_map_is_well_formed(seed in any::<u64>(), n in 2usize..=12) {
        match generate(seed, n) {
            Ok(map) => {
                let regions = map.regions();
                prop_assert_eq!(regions.len(), n);
                for (i, a) in regions.iter().enumerate() {
                    prop_assert!(!a.neighbors.is_empty());
                    for b in &regions[i + 1..] {
                        prop_assert!(a.center.distance_squared(b.center) >= MIN_DISTANCE_SQUARED);
                    }
                }
                prop_assert_eq!(map.player_owned_count(), n / 2);
            }
            Err(e) => prop_assert!(matches!(e, MapError::PlacementExhausted { attempts: 100, .. }), "unexpected error: {:?}", e),
        }
    }

    /// Health stays in range and every flip leaves a fresh, order-free region.
    #[test]
    fn prop_ticks_keep_health_in_range(seed in any::<u64>(), sequential in any::<bool>()) {
        let Ok(map) = generate(seed, 10) else { return Ok(()); };
        let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed);
        let mut regions = map.regions().to_vec();

        for _ in 0..60 {
            scatter_orders(&mut regions, &mut rng);
            let before: Vec<Faction> = regions.iter().map(|r| r.owner).collect();
            let flips = simulate_tick(&mut regions, resolution(sequential));

            for r in &regions {
                prop_assert!((0..=MAX_HEALTH).contains(&r.health));
                if let Some(t) = r.target {
                    prop_assert!(r.borders(t));
                }
            }
            for flip in &flips {
                let r = &regions[flip.region.0];
                prop_assert_eq!(r.owner, flip.new_owner);
                prop_assert_ne!(before[flip.region.0], flip.new_owner);
                prop_assert_eq!(r.health, MAX_HEALTH);
                prop_assert_eq!(r.target, None);
            }
        }
    }

    /// The planner changes at most one order, always to a neighbor.
    #[test]
    fn prop_planner_changes_one_neighbor_order(seed in any::<u64>()) {
        let Ok(map) = generate(seed, 10) else { return Ok(()); };
        let mut rng = ChaCha8Rng::seed_from_u64(seed.rotate_left(17));
        let mut regions = map.regions().to_vec();
        scatter_orders(&mut regions, &mut rng);

        let before = regions.clone();
        let change = run_planner(&mut regions, Faction::Opponent);
        let changed: Vec<usize> = (0..regions.len())
            .filter(|&i| regions[i].target != before[i].target)
            .collect();
        prop_assert!(changed.len() <= 1);
        if let Some(c) = change {
            prop_assert!(regions[c.source.0].borders(c.target));
            prop_assert_eq!(regions[c.source.0].owner, Faction::Opponent);
        }
    }

    /// A decided map is left untouched by the planner.
    #[test]
    fn prop_planner_idle_on_decided_map(seed in any::<u64>(), winner_is_player in any::<bool>()) {
        let Ok(map) = generate(seed, 8) else { return Ok(()); };
        let winner = if winner_is_player { Faction::Player } else { Faction::Opponent };
        let mut regions = map.regions().to_vec();
        for r in regions.iter_mut() {
            r.owner = winner;
        }
        let before = regions.clone();
        prop_assert_eq!(run_planner(&mut regions, Faction::Opponent), None);
        prop_assert_eq!(regions, before);
    }

    /// Random clicks never produce an order outside the neighbor list,
    /// and never more than one selected region.
    #[test]
    fn prop_clicks_keep_orders_valid(seed in any::<u64>(), clicks in prop::collection::vec((0f32..824.0, 0f32..768.0), 1..40)) {
        let Ok(mut map) = generate(seed, 10) else { return Ok(()); };
        for (x, y) in clicks {
            map.advance(16, &[Command::Select(Point::new(x, y))]);
            let selected = map.regions().iter().filter(|r| r.selected).count();
            prop_assert!(selected <= 1);
            prop_assert_eq!(selected == 1, map.selected().is_some());
            for r in map.regions() {
                if let Some(t) = r.target {
                    prop_assert!(r.borders(t));
                }
            }
        }
    }

    /// Symmetrised graphs have no one-way edges.
    #[test]
    fn prop_symmetric_adjacency(seed in any::<u64>()) {
        let mut config = GameConfig::default();
        config.map.symmetric_adjacency = true;
        let Ok(map) = Map::generate(&config, &mut ChaCha8Rng::seed_from_u64(seed)) else { return Ok(()); };
        let graph: Vec<_> = map.regions().iter().map(|r| r.neighbors.clone()).collect();
        prop_assert!(one_way_edges(&graph).is_empty());
    }
}
