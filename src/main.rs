mod input;
mod logging;
mod mapping;
mod pipeline;
mod report;
mod structure;

use std::path::PathBuf;

use clap::Parser;

use crate::mapping::{DeviationOracle, MapperParams};
use crate::pipeline::stage4_report::ReportFormat;
use crate::pipeline::{EXIT_FAILURE, PipelineConfig, run_pipeline};
use crate::structure::PoscarParser;

#[derive(Debug, Parser)]
#[command(name = "struc-score")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Score candidate structures against a reference by lattice and basis deviation")]
struct Cli {
    /// POS.vasp like file to use as reference structure
    #[arg(short, long)]
    reference: PathBuf,

    /// POS.vasp like file(s) to map and score
    #[arg(short, long, num_args = 1..)]
    mappable: Vec<PathBuf>,

    /// File listing one structure path per line to score
    #[arg(short, long)]
    batch: Option<PathBuf>,

    /// Weight w in the structure score: w*lattice + (1-w)*basis
    #[arg(short, long, default_value_t = 0.5, allow_negative_numbers = true)]
    weight: f64,

    /// Target output file (console when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report layout
    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    format: ReportFormat,

    /// Ranked mappings the built-in mapper keeps per candidate
    #[arg(long, default_value_t = 5)]
    max_reports: usize,

    /// Score candidates on a thread pool (row order is unchanged)
    #[arg(long)]
    parallel: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            reference: self.reference.clone(),
            mappable: self.mappable.clone(),
            batch: self.batch.clone(),
            weight: self.weight,
            output: self.output.clone(),
            format: self.format,
            parallel: self.parallel,
        }
    }

    fn mapper_params(&self) -> MapperParams {
        MapperParams {
            max_reports: self.max_reports,
            ..MapperParams::default()
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print().ok();
            std::process::exit(usage_exit_code(&err));
        }
    };
    logging::init_tracing(cli.verbose);
    std::process::exit(run(&cli));
}

/// `--help` and `--version` succeed; usage errors exit 1 so that code 2 keeps
/// meaning "no candidates".
fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() { EXIT_FAILURE } else { 0 }
}

fn run(cli: &Cli) -> i32 {
    let oracle = DeviationOracle::new(cli.mapper_params());
    let stdout = std::io::stdout();
    let mut console = stdout.lock();
    match run_pipeline(&cli.pipeline_config(), &PoscarParser, &oracle, &mut console) {
        Ok(summary) => {
            tracing::info!(
                inputs = summary.n_inputs,
                scored = summary.n_scored,
                "structure scoring finished"
            );
            0
        }
        Err(err) => {
            eprintln!("{err}");
            err.exit_code()
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
