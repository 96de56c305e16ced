use crate::report::ReportRow;

/// Pretty-printed array of `{structure, lattice, basis, weighted}` objects.
pub fn render_json(rows: &[ReportRow]) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(rows)?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
