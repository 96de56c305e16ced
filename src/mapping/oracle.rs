use std::collections::BTreeMap;
use std::f64::consts::PI;

use nalgebra::{Matrix3, Vector3};

use crate::mapping::assignment::solve_assignment;
use crate::mapping::lattice::{LatticeMapping, search_lattices};
use crate::mapping::{MappingError, MappingOracle, MappingReport, ScorePair};
use crate::structure::Structure;

#[derive(Debug, Clone)]
pub struct MapperParams {
    /// Largest absolute entry of the integer reorientations tried.
    pub search_range: i32,
    /// Lattice reorientations carried into the site assignment step.
    pub lattice_candidates: usize,
    pub max_reports: usize,
}

impl Default for MapperParams {
    fn default() -> Self {
        Self {
            search_range: 1,
            lattice_candidates: 10,
            max_reports: 5,
        }
    }
}

/// Built-in mapper: reorients the candidate cell, then assigns sites one to
/// one within each species, scoring lattice strain and site displacement.
#[derive(Debug, Clone, Default)]
pub struct DeviationOracle {
    pub params: MapperParams,
}

impl DeviationOracle {
    pub fn new(params: MapperParams) -> Self {
        Self { params }
    }
}

impl MappingOracle for DeviationOracle {
    fn map(
        &self,
        reference: &Structure,
        candidate: &Structure,
    ) -> Result<Vec<MappingReport>, MappingError> {
        let ref_counts = reference.species_counts();
        let cand_counts = candidate.species_counts();
        if ref_counts != cand_counts {
            return Err(MappingError::Incompatible {
                reference: format_counts(&ref_counts),
                candidate: format_counts(&cand_counts),
            });
        }

        let lattices = search_lattices(
            &reference.lattice,
            &candidate.lattice,
            self.params.search_range,
            self.params.lattice_candidates,
        )?;

        let mut reports = lattices
            .into_iter()
            .filter_map(|lm| map_sites(reference, candidate, lm))
            .collect::<Vec<_>>();
        if reports.is_empty() {
            return Err(MappingError::NoMapping);
        }

        reports.sort_by(|a, b| ranking_cost(a).total_cmp(&ranking_cost(b)));
        reports.truncate(self.params.max_reports.max(1));
        Ok(reports)
    }

    fn score(&self, report: &MappingReport) -> ScorePair {
        ScorePair {
            lattice: report.lattice_cost,
            basis: report.basis_cost,
        }
    }
}

fn ranking_cost(report: &MappingReport) -> f64 {
    0.5 * report.lattice_cost + 0.5 * report.basis_cost
}

fn format_counts(counts: &BTreeMap<&str, usize>) -> String {
    if counts.is_empty() {
        return "no sites".to_string();
    }
    counts
        .iter()
        .map(|(species, n)| format!("{species}{n}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn min_image(v: Vector3<f64>) -> Vector3<f64> {
    v - v.map(f64::round)
}

struct SiteMatch {
    translation: Vector3<f64>,
    permutation: Vec<usize>,
    displacements: Vec<Vector3<f64>>,
    cost: f64,
}

/// Best site assignment for one lattice reorientation, trying every
/// translation that lands a candidate site on the first reference site.
fn map_sites(
    reference: &Structure,
    candidate: &Structure,
    lm: LatticeMapping,
) -> Option<MappingReport> {
    let n = reference.n_sites();
    let transform_inv = lm.transform.map(f64::from).try_inverse()?;
    let cand_frac = candidate
        .sites
        .iter()
        .map(|s| transform_inv * s.frac)
        .collect::<Vec<_>>();

    let best = if n == 0 {
        SiteMatch {
            translation: Vector3::zeros(),
            permutation: Vec::new(),
            displacements: Vec::new(),
            cost: 0.0,
        }
    } else {
        let anchor = &reference.sites[0];
        let mut best: Option<SiteMatch> = None;
        for (j, site) in candidate.sites.iter().enumerate() {
            if site.species != anchor.species {
                continue;
            }
            let shift = cand_frac[j] - anchor.frac;
            let Some(found) = match_with_shift(reference, candidate, &cand_frac, shift) else {
                continue;
            };
            if best.as_ref().is_none_or(|b| found.cost < b.cost) {
                best = Some(found);
            }
        }
        best?
    };

    Some(MappingReport {
        lattice_transform: lm.transform,
        deformation: lm.deformation,
        stretch: lm.stretch,
        translation: best.translation,
        permutation: best.permutation,
        displacements: best.displacements,
        lattice_cost: lm.cost,
        basis_cost: best.cost,
    })
}

fn match_with_shift(
    reference: &Structure,
    candidate: &Structure,
    cand_frac: &[Vector3<f64>],
    shift: Vector3<f64>,
) -> Option<SiteMatch> {
    let n = reference.n_sites();
    let lattice: &Matrix3<f64> = &reference.lattice;
    let displacement = |ref_idx: usize, cand_idx: usize| -> Vector3<f64> {
        lattice * min_image(cand_frac[cand_idx] - shift - reference.sites[ref_idx].frac)
    };

    let mut permutation = vec![usize::MAX; n];
    let mut groups: BTreeMap<&str, (Vec<usize>, Vec<usize>)> = BTreeMap::new();
    for (i, site) in reference.sites.iter().enumerate() {
        groups.entry(site.species.as_str()).or_default().0.push(i);
    }
    for (j, site) in candidate.sites.iter().enumerate() {
        groups.entry(site.species.as_str()).or_default().1.push(j);
    }

    for (ref_idx, cand_idx) in groups.values() {
        if ref_idx.len() != cand_idx.len() {
            return None;
        }
        let cost = ref_idx
            .iter()
            .map(|&i| {
                cand_idx
                    .iter()
                    .map(|&j| displacement(i, j).norm_squared())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let (assignment, _) = solve_assignment(&cost);
        for (row, col) in assignment.into_iter().enumerate() {
            permutation[ref_idx[row]] = cand_idx[col];
        }
    }

    let mut displacements = permutation
        .iter()
        .enumerate()
        .map(|(i, &j)| displacement(i, j))
        .collect::<Vec<_>>();
    let mean = displacements
        .iter()
        .fold(Vector3::zeros(), |acc: Vector3<f64>, d| acc + d)
        / n as f64;
    for d in displacements.iter_mut() {
        *d -= mean;
    }

    let msd = displacements.iter().map(|d| d.norm_squared()).sum::<f64>() / n as f64;
    let volume_per_site = reference.volume() / n as f64;
    let length_scale = (3.0 * volume_per_site / (4.0 * PI)).powf(2.0 / 3.0);
    let cost = msd / length_scale;

    let translation = shift + lattice.try_inverse()? * mean;

    Some(SiteMatch {
        translation,
        permutation,
        displacements,
        cost,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/mapping/oracle.rs"]
mod tests;
