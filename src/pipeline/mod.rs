use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use crate::input::InputError;
use crate::mapping::{MappingError, MappingOracle};
use crate::structure::{ParseError, StructureParser};

pub mod stage1_collect;
pub mod stage2_score;
pub mod stage3_combine;
pub mod stage4_report;

#[cfg(test)]
pub mod fakes;

use stage1_collect::collect_candidates;
use stage2_score::run_stage2;
use stage3_combine::build_rows;
use stage4_report::{ReportFormat, write_report};

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_NO_CANDIDATES: i32 = 2;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("You must provide at least one structure to map.")]
    NoCandidates,
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("failed to load {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("failed to map {}: {source}", path.display())]
    Mapping {
        path: PathBuf,
        #[source]
        source: MappingError,
    },
    #[error("failed to write report to {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write report: {0}")]
    Console(#[source] std::io::Error),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::NoCandidates => EXIT_NO_CANDIDATES,
            _ => EXIT_FAILURE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub reference: PathBuf,
    pub mappable: Vec<PathBuf>,
    pub batch: Option<PathBuf>,
    pub weight: f64,
    pub output: Option<PathBuf>,
    pub format: ReportFormat,
    pub parallel: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub n_inputs: usize,
    pub n_scored: usize,
}

/// Collect, score, combine, render. Stops before touching the reference or
/// the output when no candidate resolves.
pub fn run_pipeline(
    config: &PipelineConfig,
    parser: &dyn StructureParser,
    oracle: &dyn MappingOracle,
    console: &mut dyn Write,
) -> Result<RunSummary, PipelineError> {
    let candidates = collect_candidates(&config.mappable, config.batch.as_deref())?;
    if candidates.is_empty() {
        return Err(PipelineError::NoCandidates);
    }

    let reference = parser
        .parse(&config.reference)
        .map_err(|source| PipelineError::Parse {
            path: config.reference.clone(),
            source,
        })?;
    tracing::info!(
        reference = %config.reference.display(),
        sites = reference.n_sites(),
        "loaded reference structure"
    );

    let stage2 = run_stage2(&reference, &candidates, parser, oracle, config.parallel)?;
    let rows = build_rows(&stage2.scored, config.weight);

    write_report(
        &rows,
        candidates.len(),
        stage2.max_path_len,
        config.format,
        config.output.as_deref(),
        console,
    )?;

    Ok(RunSummary {
        n_inputs: candidates.n_inputs(),
        n_scored: rows.len(),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
