use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::mapping::{MappingError, MappingOracle, ScorePair};
use crate::pipeline::PipelineError;
use crate::pipeline::stage1_collect::CandidateSet;
use crate::structure::{Structure, StructureParser};

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub path: PathBuf,
    pub scores: ScorePair,
}

#[derive(Debug, Clone)]
pub struct Stage2Output {
    /// Same order as the candidate set.
    pub scored: Vec<ScoredCandidate>,
    /// Longest candidate path, in characters.
    pub max_path_len: usize,
}

pub fn run_stage2(
    reference: &Structure,
    candidates: &CandidateSet,
    parser: &dyn StructureParser,
    oracle: &dyn MappingOracle,
    parallel: bool,
) -> Result<Stage2Output, PipelineError> {
    let score = |path: &Path| -> Result<(ScoredCandidate, usize), PipelineError> {
        let path_len = path.to_string_lossy().chars().count();
        let scored = score_candidate(reference, path, parser, oracle)?;
        Ok((scored, path_len))
    };

    let results = if parallel {
        // Every candidate is scored before errors are inspected, so the error
        // reported is the first one in candidate order, as in a sequential run.
        let paths = candidates.iter().collect::<Vec<_>>();
        paths
            .into_par_iter()
            .map(score)
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?
    } else {
        candidates.iter().map(score).collect::<Result<Vec<_>, _>>()?
    };

    let mut scored = Vec::with_capacity(results.len());
    let mut max_path_len = 0usize;
    for (candidate, path_len) in results {
        max_path_len = max_path_len.max(path_len);
        scored.push(candidate);
    }

    Ok(Stage2Output {
        scored,
        max_path_len,
    })
}

/// Loads one candidate and keeps the oracle's best-ranked mapping.
pub fn score_candidate(
    reference: &Structure,
    path: &Path,
    parser: &dyn StructureParser,
    oracle: &dyn MappingOracle,
) -> Result<ScoredCandidate, PipelineError> {
    let candidate = parser.parse(path).map_err(|source| PipelineError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let mapping_error = |source: MappingError| PipelineError::Mapping {
        path: path.to_path_buf(),
        source,
    };
    let best = oracle
        .map(reference, &candidate)
        .map_err(mapping_error)?
        .into_iter()
        .next()
        .ok_or_else(|| mapping_error(MappingError::NoMapping))?;
    let scores = oracle.score(&best);
    tracing::debug!(
        candidate = %path.display(),
        lattice = scores.lattice,
        basis = scores.basis,
        transform = ?best.lattice_transform,
        volume_ratio = best.deformation.determinant(),
        stretch = ?best.stretch,
        translation = ?best.translation,
        permutation = ?best.permutation,
        max_displacement = best
            .displacements
            .iter()
            .map(|d| d.norm())
            .fold(0.0, f64::max),
        "scored candidate"
    );
    Ok(ScoredCandidate {
        path: path.to_path_buf(),
        scores,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_score.rs"]
mod tests;
