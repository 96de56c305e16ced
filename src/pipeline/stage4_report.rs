use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::pipeline::PipelineError;
use crate::report::ReportRow;
use crate::report::json::render_json;
use crate::report::table::render_table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
}

/// Renders the report and writes it to `output`, or to `console` when no
/// file was requested. The file is created (or truncated) only here.
pub fn write_report(
    rows: &[ReportRow],
    n_candidates: usize,
    max_path_len: usize,
    format: ReportFormat,
    output: Option<&Path>,
    console: &mut dyn Write,
) -> Result<(), PipelineError> {
    assert_eq!(
        rows.len(),
        n_candidates,
        "report rows must match scored candidates"
    );

    let rendered = match format {
        ReportFormat::Table => render_table(rows, max_path_len),
        ReportFormat::Json => render_json(rows)?,
    };

    match output {
        Some(path) => {
            let output_error = |source: std::io::Error| PipelineError::Output {
                path: path.to_path_buf(),
                source,
            };
            let file = File::create(path).map_err(output_error)?;
            let mut w = BufWriter::new(file);
            w.write_all(rendered.as_bytes()).map_err(output_error)?;
            w.flush().map_err(output_error)?;
            tracing::info!(output = %path.display(), rows = rows.len(), "wrote report");
        }
        None => {
            console
                .write_all(rendered.as_bytes())
                .and_then(|_| console.flush())
                .map_err(PipelineError::Console)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
