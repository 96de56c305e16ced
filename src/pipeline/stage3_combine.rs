use crate::mapping::ScorePair;
use crate::pipeline::stage2_score::ScoredCandidate;
use crate::report::ReportRow;

/// `weight * lattice + (1 - weight) * basis`. The weight is not clamped.
pub fn weighted_score(scores: ScorePair, weight: f64) -> f64 {
    weight * scores.lattice + (1.0 - weight) * scores.basis
}

pub fn build_rows(scored: &[ScoredCandidate], weight: f64) -> Vec<ReportRow> {
    scored
        .iter()
        .map(|c| ReportRow {
            structure: c.path.to_string_lossy().into_owned(),
            lattice: c.scores.lattice,
            basis: c.scores.basis,
            weighted: weighted_score(c.scores, weight),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_combine.rs"]
mod tests;
