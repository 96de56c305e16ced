use super::*;
use std::path::PathBuf;

fn pair(lattice: f64, basis: f64) -> ScorePair {
    ScorePair { lattice, basis }
}

#[test]
fn test_weight_endpoints() {
    let p = pair(0.25, 0.75);
    assert_eq!(weighted_score(p, 1.0), 0.25);
    assert_eq!(weighted_score(p, 0.0), 0.75);
    assert!((weighted_score(p, 0.5) - 0.5).abs() < 1e-15);
}

#[test]
fn test_weight_monotonic() {
    let p = pair(0.1, 0.6);
    let values = (0..=10)
        .map(|i| weighted_score(p, i as f64 / 10.0))
        .collect::<Vec<_>>();
    assert!(values.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn test_weight_not_clamped() {
    let p = pair(1.0, 0.0);
    assert!((weighted_score(p, 1.5) - 1.5).abs() < 1e-15);
    assert!((weighted_score(p, -0.5) + 0.5).abs() < 1e-15);
}

#[test]
fn test_build_rows() {
    let scored = vec![
        ScoredCandidate {
            path: PathBuf::from("a.vasp"),
            scores: pair(0.10, 0.20),
        },
        ScoredCandidate {
            path: PathBuf::from("b.vasp"),
            scores: pair(0.00, 0.50),
        },
    ];
    let rows = build_rows(&scored, 0.3);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].structure, "a.vasp");
    assert!((rows[0].weighted - 0.17).abs() < 1e-12);
    assert!((rows[1].weighted - 0.35).abs() < 1e-12);
}
