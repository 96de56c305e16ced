//! Deterministic stand-ins for the structure parser and the mapping oracle.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use nalgebra::{Matrix3, Vector3};

use crate::input::InputError;
use crate::mapping::{MappingError, MappingOracle, MappingReport, ScorePair};
use crate::structure::{ParseError, Structure, StructureParser};

pub fn titled_structure(title: &str) -> Structure {
    Structure {
        title: title.to_string(),
        lattice: Matrix3::identity(),
        sites: Vec::new(),
    }
}

pub fn report_with_costs(lattice: f64, basis: f64) -> MappingReport {
    MappingReport {
        lattice_transform: Matrix3::identity(),
        deformation: Matrix3::identity(),
        stretch: Matrix3::identity(),
        translation: Vector3::zeros(),
        permutation: Vec::new(),
        displacements: Vec::new(),
        lattice_cost: lattice,
        basis_cost: basis,
    }
}

/// Serves in-memory structures titled after their path; records every load.
#[derive(Debug, Default)]
pub struct FakeParser {
    known: BTreeMap<PathBuf, Structure>,
    pub loads: Mutex<Vec<PathBuf>>,
}

impl FakeParser {
    pub fn with_paths(paths: &[&str]) -> Self {
        let known = paths
            .iter()
            .map(|p| (PathBuf::from(p), titled_structure(p)))
            .collect();
        Self {
            known,
            loads: Mutex::new(Vec::new()),
        }
    }

    pub fn loaded(&self) -> Vec<PathBuf> {
        self.loads.lock().unwrap().clone()
    }
}

impl StructureParser for FakeParser {
    fn parse(&self, path: &Path) -> Result<Structure, ParseError> {
        self.loads.lock().unwrap().push(path.to_path_buf());
        self.known.get(path).cloned().ok_or_else(|| {
            ParseError::Input(InputError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such structure"),
            ))
        })
    }
}

/// Returns ranked reports keyed by the candidate's title; the first entry
/// is the best match.
#[derive(Debug, Default)]
pub struct FakeOracle {
    ranked: BTreeMap<String, Vec<(f64, f64)>>,
}

impl FakeOracle {
    pub fn with_scores(scores: &[(&str, f64, f64)]) -> Self {
        let ranked = scores
            .iter()
            .map(|&(title, lattice, basis)| (title.to_string(), vec![(lattice, basis)]))
            .collect();
        Self { ranked }
    }

    pub fn ranked(mut self, title: &str, reports: Vec<(f64, f64)>) -> Self {
        self.ranked.insert(title.to_string(), reports);
        self
    }
}

impl MappingOracle for FakeOracle {
    fn map(
        &self,
        _reference: &Structure,
        candidate: &Structure,
    ) -> Result<Vec<MappingReport>, MappingError> {
        let reports = self
            .ranked
            .get(&candidate.title)
            .ok_or(MappingError::NoMapping)?;
        Ok(reports
            .iter()
            .map(|&(lattice, basis)| report_with_costs(lattice, basis))
            .collect())
    }

    fn score(&self, report: &MappingReport) -> ScorePair {
        ScorePair {
            lattice: report.lattice_cost,
            basis: report.basis_cost,
        }
    }
}
