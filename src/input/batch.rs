use std::path::{Path, PathBuf};

use crate::input::{InputError, read_lines};

/// One candidate path per line. Blank and whitespace-only lines are skipped;
/// every other line is taken verbatim, surrounding spaces included.
pub fn read_batch_file(path: &Path) -> Result<Vec<PathBuf>, InputError> {
    let lines = read_lines(path)?;
    let mut out = Vec::with_capacity(lines.len());
    let mut skipped = 0usize;
    for line in lines {
        if line.trim().is_empty() {
            skipped += 1;
            continue;
        }
        out.push(PathBuf::from(line));
    }
    tracing::debug!(
        batch = %path.display(),
        entries = out.len(),
        blank_lines = skipped,
        "read batch file"
    );
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/batch.rs"]
mod tests;
