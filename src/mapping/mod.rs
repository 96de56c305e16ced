use nalgebra::{Matrix3, Vector3};
use thiserror::Error;

use crate::structure::Structure;

pub mod assignment;
pub mod lattice;
pub mod oracle;

pub use oracle::{DeviationOracle, MapperParams};

/// Raw (lattice, basis) deviation pair for one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorePair {
    pub lattice: f64,
    pub basis: f64,
}

/// One way of laying a candidate structure onto the reference.
#[derive(Debug, Clone)]
pub struct MappingReport {
    /// Integer change of basis applied to the candidate lattice vectors.
    pub lattice_transform: Matrix3<i32>,
    /// `F` such that `F * L_ref = L_cand * T`.
    pub deformation: Matrix3<f64>,
    /// Right stretch `U = sqrt(F^T F)`.
    pub stretch: Matrix3<f64>,
    /// Fractional shift (reference basis) applied to candidate sites.
    pub translation: Vector3<f64>,
    /// `permutation[i]` is the candidate site sitting on reference site `i`.
    pub permutation: Vec<usize>,
    /// Cartesian displacement of each reference site, net translation removed.
    pub displacements: Vec<Vector3<f64>>,
    pub lattice_cost: f64,
    pub basis_cost: f64,
}

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("incompatible compositions: reference has {reference}, candidate has {candidate}")]
    Incompatible { reference: String, candidate: String },
    #[error("{which} lattice is singular")]
    SingularLattice { which: &'static str },
    #[error("no mapping found between reference and candidate")]
    NoMapping,
}

/// Finds correspondences between two structures and scores them.
pub trait MappingOracle: Sync {
    /// Ranked mappings, best first. Never empty on success.
    fn map(
        &self,
        reference: &Structure,
        candidate: &Structure,
    ) -> Result<Vec<MappingReport>, MappingError>;

    fn score(&self, report: &MappingReport) -> ScorePair;
}
