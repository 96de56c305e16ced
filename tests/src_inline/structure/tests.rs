use super::*;
use nalgebra::{Matrix3, Vector3};

fn rock_salt_like() -> Structure {
    Structure {
        title: "NaCl".to_string(),
        lattice: Matrix3::from_diagonal(&Vector3::new(2.0, 3.0, 4.0)),
        sites: vec![
            Site {
                species: "Na".to_string(),
                frac: Vector3::new(0.0, 0.0, 0.0),
            },
            Site {
                species: "Cl".to_string(),
                frac: Vector3::new(0.5, 0.5, 0.5),
            },
            Site {
                species: "Na".to_string(),
                frac: Vector3::new(0.5, 0.0, 0.0),
            },
        ],
    }
}

#[test]
fn test_volume_and_counts() {
    let s = rock_salt_like();
    assert!((s.volume() - 24.0).abs() < 1e-12);
    assert_eq!(s.n_sites(), 3);

    let counts = s.species_counts();
    assert_eq!(counts.get("Na"), Some(&2));
    assert_eq!(counts.get("Cl"), Some(&1));
}
