use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::input::InputError;
use crate::input::batch::read_batch_file;

/// Deduplicated candidate paths in `Path` order.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    paths: BTreeSet<PathBuf>,
    n_inputs: usize,
}

impl CandidateSet {
    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut set = BTreeSet::new();
        let mut n_inputs = 0usize;
        for path in paths {
            n_inputs += 1;
            set.insert(path);
        }
        Self {
            paths: set,
            n_inputs,
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    /// Paths seen before deduplication.
    pub fn n_inputs(&self) -> usize {
        self.n_inputs
    }

    pub fn n_duplicates(&self) -> usize {
        self.n_inputs - self.paths.len()
    }
}

/// Merges direct `-m` paths with the lines of the optional batch file.
pub fn collect_candidates(
    mappable: &[PathBuf],
    batch: Option<&Path>,
) -> Result<CandidateSet, InputError> {
    let mut all = mappable.to_vec();
    if let Some(batch) = batch {
        all.extend(read_batch_file(batch)?);
    }
    let set = CandidateSet::from_paths(all);
    tracing::info!(
        candidates = set.len(),
        duplicates = set.n_duplicates(),
        "resolved candidate structures"
    );
    Ok(set)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_collect.rs"]
mod tests;
