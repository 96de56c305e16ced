use nalgebra::{Matrix3, SymmetricEigen};

use crate::mapping::MappingError;

/// Lattice costs closer than this to the cheapest one count as tied.
pub const LATTICE_COST_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Clone)]
pub struct LatticeMapping {
    pub transform: Matrix3<i32>,
    pub deformation: Matrix3<f64>,
    pub stretch: Matrix3<f64>,
    pub cost: f64,
}

/// All integer matrices with entries in `[-range, range]` and determinant ±1.
pub fn unimodular_transforms(range: i32) -> Vec<Matrix3<i32>> {
    let values = (-range..=range).collect::<Vec<_>>();
    let mut out = Vec::new();
    let n = values.len();
    let total = n.pow(9);
    let mut entries = [0i32; 9];
    for mut code in 0..total {
        for slot in entries.iter_mut() {
            *slot = values[code % n];
            code /= n;
        }
        let m = Matrix3::from_row_slice(&entries);
        if det_i32(&m).abs() == 1 {
            out.push(m);
        }
    }
    out
}

fn det_i32(m: &Matrix3<i32>) -> i32 {
    m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)])
        - m[(0, 1)] * (m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)])
        + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
}

/// Right stretch tensor `sqrt(F^T F)` via symmetric eigendecomposition.
pub fn right_stretch(deformation: &Matrix3<f64>) -> Matrix3<f64> {
    let c = deformation.transpose() * deformation;
    let eig = SymmetricEigen::new(c);
    let sqrt_vals = eig.eigenvalues.map(|v| v.max(0.0).sqrt());
    eig.eigenvectors * Matrix3::from_diagonal(&sqrt_vals) * eig.eigenvectors.transpose()
}

/// Strain cost with the volume change factored out: `tr((U/det(U)^(1/3) - I)^2) / 3`.
pub fn isotropic_strain_cost(stretch: &Matrix3<f64>) -> f64 {
    let det = stretch.determinant();
    if det <= 0.0 {
        return f64::INFINITY;
    }
    let iso = *stretch / det.cbrt();
    let d = iso - Matrix3::identity();
    (d * d).trace() / 3.0
}

/// Ranks reorientations of `candidate` against `reference`, cheapest first.
/// Keeps the `keep` cheapest plus every reorientation tied with the best one;
/// site matching breaks those ties.
pub fn search_lattices(
    reference: &Matrix3<f64>,
    candidate: &Matrix3<f64>,
    range: i32,
    keep: usize,
) -> Result<Vec<LatticeMapping>, MappingError> {
    let ref_inv = reference
        .try_inverse()
        .ok_or(MappingError::SingularLattice { which: "reference" })?;
    if candidate.determinant().abs() < 1e-12 {
        return Err(MappingError::SingularLattice { which: "candidate" });
    }

    let mut found = unimodular_transforms(range)
        .into_iter()
        .filter_map(|transform| {
            let deformation = candidate * transform.map(f64::from) * ref_inv;
            // Proper rotations only; mirror images are separate structures.
            if deformation.determinant() <= 0.0 {
                return None;
            }
            let stretch = right_stretch(&deformation);
            let cost = isotropic_strain_cost(&stretch);
            cost.is_finite().then_some(LatticeMapping {
                transform,
                deformation,
                stretch,
                cost,
            })
        })
        .collect::<Vec<_>>();

    found.sort_by(|a, b| {
        a.cost
            .total_cmp(&b.cost)
            .then_with(|| a.transform.as_slice().cmp(b.transform.as_slice()))
    });
    let tied = match found.first() {
        Some(best) => {
            let limit = best.cost + LATTICE_COST_TOLERANCE;
            found.iter().take_while(|m| m.cost <= limit).count()
        }
        None => 0,
    };
    found.truncate(keep.max(tied));
    Ok(found)
}

#[cfg(test)]
#[path = "../../tests/src_inline/mapping/lattice.rs"]
mod tests;
