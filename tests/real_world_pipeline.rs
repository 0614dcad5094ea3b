//! Real-world-style integration tests: noisy tunnel scans at production
//! scale, run with the default limits a user would get.

use rand::prelude::*;
use std::collections::HashSet;
use std::time::Instant;
use tunnelseg::{AnalysisConfig, AnalysisSession};
use tunnelseg_core::PointCloud;
use tunnelseg_segmentation::{FnObserver, StopReason};

// ────────────────── helpers ──────────────────

struct TunnelScene {
    cloud: PointCloud,
    floor: usize,
    wall: usize,
}

/// Straight 80 m tunnel along +Y with a 10 m wide floor, 6 m walls at
/// x = ±5, survey noise of ±3 cm and 1k points of scattered clutter.
fn build_tunnel(seed: u64) -> TunnelScene {
    let mut rng = StdRng::seed_from_u64(seed);
    let floor = 30_000;
    let wall = 22_000;
    let clutter = 1_000;
    let mut cloud = PointCloud::with_capacity(floor + 2 * wall + clutter);

    for _ in 0..floor {
        cloud.push([
            rng.gen_range(-5.0..5.0),
            rng.gen_range(0.0..80.0),
            rng.gen_range(-0.03..0.03),
        ]);
    }
    for side in [-5.0, 5.0] {
        for _ in 0..wall {
            cloud.push([
                side + rng.gen_range(-0.03..0.03),
                rng.gen_range(0.0..80.0),
                rng.gen_range(0.2..6.0),
            ]);
        }
    }
    // Cables, pipes, people
    for _ in 0..clutter {
        cloud.push([
            rng.gen_range(-4.5..4.5),
            rng.gen_range(0.0..80.0),
            rng.gen_range(0.5..5.5),
        ]);
    }

    TunnelScene { cloud, floor, wall }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn seeded_config(seed: u64) -> AnalysisConfig {
    AnalysisConfig {
        seed: Some(seed),
        ..AnalysisConfig::default()
    }
}

// ────────────────── tests ──────────────────

#[test]
fn noisy_tunnel_default_limits() {
    init_logging();
    let scene = build_tunnel(2024);
    let total = scene.cloud.len();
    let mut session = AnalysisSession::new(seeded_config(7));
    session.load_cloud(scene.cloud.clone(), "synthetic tunnel");

    let t0 = Instant::now();
    let result = session.analyze().unwrap();
    eprintln!("segmented {} points in {:?}", total, t0.elapsed());

    // Floor, wall, wall, then fewer than 20k points remain
    assert_eq!(result.stats.iterations, 3);
    assert_eq!(result.stats.walls_found, 2);
    assert_eq!(result.stats.stop_reason, StopReason::Exhausted);

    assert!(
        result.ground.len() >= scene.floor * 95 / 100,
        "ground has {} points",
        result.ground.len()
    );
    assert!(result.ground.len() <= scene.floor + 1_000);
    for wall in [&result.wall1, &result.wall2] {
        assert!(wall.len() >= scene.wall * 95 / 100, "wall has {} points", wall.len());
        assert!(wall.aabb().height() > 5.0);
    }
    assert!(result.wall1.len() >= result.wall2.len());

    let mut seen = HashSet::new();
    for (_, part) in result.partitions() {
        for &idx in &part.source_indices {
            assert!(seen.insert(idx));
        }
    }
    assert!(seen.len() <= total);
}

#[test]
fn noisy_tunnel_cross_section_profile() {
    let scene = build_tunnel(99);
    let mut session = AnalysisSession::new(seeded_config(3));
    session.load_cloud(scene.cloud, "synthetic tunnel");
    session.analyze().unwrap();

    let slice = session.cross_section(40.0, 0.5).unwrap();
    // ~1/80 of each surface lands in a 1 m slab
    assert!(slice.ground.len() > 200 && slice.ground.len() < 600);
    assert!(slice.wall1.len() > 150 && slice.wall2.len() > 150);
    assert!(slice
        .ground
        .iter_points()
        .chain(slice.wall1.iter_points())
        .all(|p| (p[1] - 40.0).abs() <= 0.5));

    let spacing = slice.wall_spacing().unwrap();
    assert!((spacing - 10.0).abs() < 0.1, "wall spacing {spacing}");
}

#[test]
fn progress_and_status_are_reported() {
    let scene = build_tunnel(5);
    let mut session = AnalysisSession::new(seeded_config(5));
    session.load_cloud(scene.cloud, "synthetic tunnel");

    let mut progress = Vec::new();
    let mut statuses = Vec::new();
    let mut observer = FnObserver::new(
        |p: f64| progress.push(p),
        |s: &str| statuses.push(s.to_string()),
    );
    session.analyze_with(&mut observer).unwrap();
    drop(observer);

    assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(progress.last(), Some(&100.0));
    assert_eq!(statuses.first().map(String::as_str), Some("Finding plane 1..."));
    assert_eq!(statuses.last().map(String::as_str), Some("Analysis complete."));
}

#[test]
fn unseeded_runs_record_their_seed() {
    let scene = build_tunnel(11);
    let mut session = AnalysisSession::default();
    session.load_cloud(scene.cloud.clone(), "synthetic tunnel");
    let first = session.analyze().unwrap().clone();

    // Replaying the recorded seed reproduces the run exactly
    let mut replay = AnalysisSession::new(seeded_config(first.stats.seed));
    replay.load_cloud(scene.cloud, "synthetic tunnel");
    assert_eq!(replay.analyze().unwrap(), &first);
}
