//! Adversarial edge-case integration tests.
//!
//! Degenerate, boundary and pathological inputs across the crate stack:
//! no panics, no endless loops, and the right error for each case.

use tunnelseg::{AnalysisConfig, AnalysisSession, SessionError};
use tunnelseg_core::PointCloud;
use tunnelseg_segmentation::{
    ransac_plane_seeded, InputError, PlaneSegmenter, SegmentError, SegmentationLimits,
    SegmentationParams, StopReason,
};

fn params() -> SegmentationParams {
    SegmentationParams {
        ransac_distance: 0.1,
        ground_angle_deg: 15.0,
        wall_angle_deg: 60.0,
        min_wall_height: 2.0,
    }
}

fn small_limits() -> SegmentationLimits {
    SegmentationLimits {
        stop_threshold: 100,
        min_plane_inliers: 100,
        ..SegmentationLimits::default()
    }
}

fn segmenter() -> PlaneSegmenter {
    PlaneSegmenter::new(params())
        .unwrap()
        .with_limits(small_limits())
        .with_seed(9)
}

// ────────────────── RANSAC ──────────────────

#[test]
fn ransac_on_fewer_than_three_points() {
    for n in 0..3 {
        let cloud: PointCloud = (0..n).map(|i| [i as f64, 0.0, 0.0]).collect();
        let (model, inliers) = ransac_plane_seeded(&cloud, 0.1, 100, 1);
        assert!(inliers.is_empty());
        assert_eq!(model.normal, [0.0, 0.0, 1.0]);
    }
}

#[test]
fn ransac_on_collinear_points_finds_nothing() {
    let cloud: PointCloud = (0..500).map(|i| [i as f64 * 0.1, 2.0, 1.0]).collect();
    let (_, inliers) = ransac_plane_seeded(&cloud, 0.1, 200, 3);
    assert!(inliers.is_empty());
}

#[test]
fn ransac_with_zero_trials() {
    let cloud: PointCloud = (0..50).map(|i| [(i % 7) as f64, (i / 7) as f64, 0.0]).collect();
    let (_, inliers) = ransac_plane_seeded(&cloud, 0.1, 0, 3);
    assert!(inliers.is_empty());
}

// ────────────────── Segmentation ──────────────────

#[test]
fn collinear_scan_stops_with_no_plane() {
    let cloud: PointCloud = (0..500).map(|i| [0.0, i as f64 * 0.05, 0.0]).collect();
    let err = segmenter().segment(&cloud).unwrap_err();
    assert_eq!(
        err,
        SegmentError::NotEnoughWalls {
            found: 0,
            iterations: 1,
            stop_reason: StopReason::NoSignificantPlane,
        }
    );
}

#[test]
fn identical_points_stop_with_no_plane() {
    let cloud: PointCloud = std::iter::repeat([1.0, 1.0, 1.0]).take(300).collect();
    let err = segmenter().segment(&cloud).unwrap_err();
    assert!(err.is_analysis_failure());
    assert_eq!(err.walls_found(), Some(0));
}

#[test]
fn infinite_coordinate_is_reported_by_index() {
    let mut cloud: PointCloud = (0..200).map(|i| [i as f64, 0.0, 0.0]).collect();
    cloud.y[123] = f64::NEG_INFINITY;
    cloud.x[150] = f64::NAN;
    let err = segmenter().segment(&cloud).unwrap_err();
    assert_eq!(err, SegmentError::Input(InputError::NonFinite { index: 123 }));
}

#[test]
fn single_point_never_iterates() {
    let cloud = PointCloud::from_xyz(vec![0.0], vec![0.0], vec![0.0]);
    let err = segmenter().segment(&cloud).unwrap_err();
    assert_eq!(
        err,
        SegmentError::NotEnoughWalls {
            found: 0,
            iterations: 0,
            stop_reason: StopReason::Exhausted,
        }
    );
}

#[test]
fn parameter_edges_are_validated() {
    let cases = [
        SegmentationParams { ransac_distance: 0.0, ..params() },
        SegmentationParams { ransac_distance: f64::NAN, ..params() },
        SegmentationParams { ground_angle_deg: -1.0, ..params() },
        SegmentationParams { wall_angle_deg: 90.5, ..params() },
        SegmentationParams { min_wall_height: f64::INFINITY, ..params() },
        SegmentationParams { min_wall_height: -2.0, ..params() },
    ];
    for p in cases {
        assert!(
            matches!(PlaneSegmenter::new(p), Err(SegmentError::InvalidParameter { .. })),
            "{p:?} accepted"
        );
    }

    // Boundary angles are allowed
    let p = SegmentationParams {
        ground_angle_deg: 0.0,
        wall_angle_deg: 90.0,
        ..params()
    };
    assert!(PlaneSegmenter::new(p).is_ok());
}

#[test]
fn georeferenced_offsets_keep_full_precision() {
    // The corridor moved to UTM-like coordinates
    let (ox, oy, oz) = (512_000.0, 5_403_000.0, 310.0);
    let mut cloud = PointCloud::new();
    for i in 0..40 {
        for j in 0..25 {
            cloud.push([ox - 9.0 + 0.45 * i as f64, oy + 0.8 * j as f64, oz]);
        }
    }
    for x in [-10.0, 10.0] {
        for k in 0..25 {
            for m in 0..20 {
                cloud.push([ox + x, oy + 0.8 * k as f64, oz + 0.5 + 0.4 * m as f64]);
            }
        }
    }

    let result = PlaneSegmenter::new(params())
        .unwrap()
        .with_limits(small_limits())
        .with_seed(42)
        .segment(&cloud)
        .unwrap();
    assert_eq!(result.ground.len(), 1000);
    assert_eq!(result.wall_point_count(), 1000);
    assert!(result.ground.iter_points().all(|p| p[2] == oz));
}

// ────────────────── Session ──────────────────

#[test]
fn session_surfaces_input_errors() {
    let mut session = AnalysisSession::new(AnalysisConfig::default());
    session.load_cloud(PointCloud::new(), "empty");
    match session.analyze() {
        Err(SessionError::Segmentation(SegmentError::Input(InputError::Empty))) => {}
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(session.result().is_none());
}

#[test]
fn session_rejects_invalid_config_before_running() {
    let mut session = AnalysisSession::new(AnalysisConfig {
        ransac_distance: -0.5,
        ..AnalysisConfig::default()
    });
    session.load_cloud(PointCloud::from_xyz(vec![0.0], vec![0.0], vec![0.0]), "one");
    assert!(matches!(
        session.analyze(),
        Err(SessionError::Segmentation(SegmentError::InvalidParameter {
            name: "ransac_distance",
            ..
        }))
    ));
}

#[test]
fn malformed_toml_is_a_config_error() {
    let err = AnalysisConfig::from_toml_str("min_wall_height = \"tall\"").unwrap_err();
    assert!(matches!(err, SessionError::Config(_)));
}
