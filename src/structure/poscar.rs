use std::path::Path;

use nalgebra::{Matrix3, Vector3};

use crate::input::read_lines;
use crate::structure::{ParseError, Site, Structure, StructureParser};

/// VASP POSCAR/CONTCAR reader (VASP 4 and 5 layouts, optionally gzipped).
#[derive(Debug, Clone, Copy, Default)]
pub struct PoscarParser;

impl StructureParser for PoscarParser {
    fn parse(&self, path: &Path) -> Result<Structure, ParseError> {
        let lines = read_lines(path)?;
        parse_poscar_lines(path, &lines)
    }
}

struct Cursor<'a> {
    path: &'a Path,
    lines: &'a [String],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take_line(&mut self, what: &str) -> Result<(usize, &'a str), ParseError> {
        match self.lines.get(self.pos) {
            Some(line) => {
                self.pos += 1;
                Ok((self.pos, line.as_str()))
            }
            None => Err(ParseError::malformed(
                self.path,
                self.pos + 1,
                format!("unexpected end of file, expected {what}"),
            )),
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).map(|s| s.as_str())
    }
}

pub fn parse_poscar_lines(path: &Path, lines: &[String]) -> Result<Structure, ParseError> {
    let mut cur = Cursor {
        path,
        lines,
        pos: 0,
    };

    let (_, title) = cur.take_line("comment line")?;
    let title = title.trim().to_string();

    let (scale_no, scale_line) = cur.take_line("scale factor")?;
    let scale = parse_floats(path, scale_no, scale_line, 1)?[0];
    if scale == 0.0 {
        return Err(ParseError::malformed(path, scale_no, "scale factor is zero"));
    }

    let mut raw = Matrix3::<f64>::zeros();
    for col in 0..3 {
        let (no, line) = cur.take_line("lattice vector")?;
        let v = parse_floats(path, no, line, 3)?;
        raw.set_column(col, &Vector3::new(v[0], v[1], v[2]));
    }
    let raw_volume = raw.determinant().abs();
    if raw_volume < 1e-12 {
        return Err(ParseError::malformed(path, scale_no + 3, "lattice is singular"));
    }
    // Negative scale is a target cell volume.
    let factor = if scale < 0.0 {
        (scale.abs() / raw_volume).cbrt()
    } else {
        scale
    };
    let lattice = raw * factor;

    let (no, line) = cur.take_line("species or counts line")?;
    let first = line.split_whitespace().next().unwrap_or("");
    let (species, counts_no, counts_line) = if first.parse::<usize>().is_ok() {
        (None, no, line)
    } else {
        let names = line
            .split_whitespace()
            .map(|tok| tok.split('/').next().unwrap_or(tok).to_string())
            .collect::<Vec<_>>();
        let (cno, cline) = cur.take_line("counts line")?;
        (Some(names), cno, cline)
    };

    let counts = counts_line
        .split_whitespace()
        .map(|tok| {
            tok.parse::<usize>().map_err(|_| {
                ParseError::malformed(path, counts_no, format!("invalid site count {tok:?}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if counts.is_empty() {
        return Err(ParseError::malformed(path, counts_no, "no site counts"));
    }
    let species = match species {
        Some(names) => {
            if names.len() != counts.len() {
                return Err(ParseError::malformed(
                    path,
                    counts_no,
                    format!(
                        "{} species names but {} counts",
                        names.len(),
                        counts.len()
                    ),
                ));
            }
            names
        }
        None => (1..=counts.len()).map(|i| format!("X{i}")).collect(),
    };

    if cur
        .peek()
        .is_some_and(|l| l.trim_start().starts_with(['s', 'S']))
    {
        cur.take_line("selective dynamics")?;
    }

    let (_, mode_line) = cur.take_line("coordinate mode")?;
    let cartesian = mode_line.trim_start().starts_with(['c', 'C', 'k', 'K']);
    let inverse = lattice.try_inverse().ok_or_else(|| {
        ParseError::malformed(path, scale_no + 3, "lattice is not invertible")
    })?;

    let total = counts.iter().sum::<usize>();
    let mut sites = Vec::with_capacity(total);
    for (name, &count) in species.iter().zip(&counts) {
        for _ in 0..count {
            let (no, line) = cur.take_line("site coordinates")?;
            let v = parse_floats(path, no, line, 3)?;
            let coords = Vector3::new(v[0], v[1], v[2]);
            let frac = if cartesian {
                inverse * (coords * factor)
            } else {
                coords
            };
            sites.push(Site {
                species: name.clone(),
                frac,
            });
        }
    }

    Ok(Structure {
        title,
        lattice,
        sites,
    })
}

fn parse_floats(path: &Path, line_no: usize, line: &str, n: usize) -> Result<Vec<f64>, ParseError> {
    let values = line
        .split_whitespace()
        .take(n)
        .map(|tok| {
            tok.parse::<f64>().map_err(|_| {
                ParseError::malformed(path, line_no, format!("invalid number {tok:?}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if values.len() < n {
        return Err(ParseError::malformed(
            path,
            line_no,
            format!("expected {n} numbers, found {}", values.len()),
        ));
    }
    Ok(values)
}

#[cfg(test)]
#[path = "../../tests/src_inline/structure/poscar.rs"]
mod tests;
