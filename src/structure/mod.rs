use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use nalgebra::{Matrix3, Vector3};
use thiserror::Error;

use crate::input::InputError;

pub mod poscar;

pub use poscar::PoscarParser;

#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub species: String,
    /// Fractional coordinates in the owning structure's lattice.
    pub frac: Vector3<f64>,
}

/// A periodic crystal: lattice vectors as matrix columns plus a basis of sites.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub title: String,
    pub lattice: Matrix3<f64>,
    pub sites: Vec<Site>,
}

impl Structure {
    pub fn volume(&self) -> f64 {
        self.lattice.determinant().abs()
    }

    pub fn n_sites(&self) -> usize {
        self.sites.len()
    }

    pub fn species_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for site in &self.sites {
            *counts.entry(site.species.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("{}:{line}: {msg}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        msg: String,
    },
}

impl ParseError {
    pub fn malformed(path: &Path, line: usize, msg: impl Into<String>) -> Self {
        ParseError::Malformed {
            path: path.to_path_buf(),
            line,
            msg: msg.into(),
        }
    }
}

/// Loads a structure file into memory.
pub trait StructureParser: Sync {
    fn parse(&self, path: &Path) -> Result<Structure, ParseError>;
}

#[cfg(test)]
#[path = "../../tests/src_inline/structure/tests.rs"]
mod tests;
