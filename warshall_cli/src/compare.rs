use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Args;
use comfy_table::Table;
use tracing::error;
use warshall_matrix::{
    compare::{DEFAULT_PRECISION, MatrixComparison, compare},
    text_format::MatrixReader,
};

/// Rows shown in the mismatch table, the count is always reported.
const MAX_DISPLAYED_MISMATCHES: usize = 20;

#[derive(Args, Debug)]
pub struct CompareArgs {
    left: PathBuf,

    right: PathBuf,

    /// Largest difference for two distances to be considered equal
    #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
    precision: f64,

    /// Both files start with a header line
    #[arg(long)]
    header: bool,

    /// Only report the result through the exit code
    #[arg(short, long)]
    silent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOutcome {
    Equal,
    Different,
}

pub fn compare_files(args: &CompareArgs) -> Result<MatrixComparison, anyhow::Error> {
    let reader = MatrixReader::new().skip_header(args.header);
    let left = reader
        .read_file(&args.left)
        .with_context(|| format!("Unable to read {:?}", args.left))?;
    let right = reader
        .read_file(&args.right)
        .with_context(|| format!("Unable to read {:?}", args.right))?;

    Ok(compare(&left, &right, args.precision)?)
}

fn mismatch_table(comparison: &MatrixComparison) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["from", "to", "left", "right", "delta"]);

    for mismatch in comparison
        .mismatches()
        .iter()
        .take(MAX_DISPLAYED_MISMATCHES)
    {
        table.add_row(vec![
            mismatch.from.to_string(),
            mismatch.to.to_string(),
            format!("{:.4}", mismatch.left),
            format!("{:.4}", mismatch.right),
            mismatch
                .delta()
                .map(|delta| format!("{delta:.4}"))
                .unwrap_or_default(),
        ]);
    }

    table
}

pub fn outcome(args: &CompareArgs) -> Result<CompareOutcome, anyhow::Error> {
    let comparison = compare_files(args)?;
    let equal = comparison.is_equal();

    if !args.silent {
        if !equal {
            println!("{}", mismatch_table(&comparison));
            println!("{} differing cells", comparison.mismatches().len());
        }
        println!(
            "{:?} and {:?} are {}equal!",
            args.left,
            args.right,
            if equal { "" } else { "not " }
        );
    }

    Ok(if equal {
        CompareOutcome::Equal
    } else {
        CompareOutcome::Different
    })
}

pub fn run(args: CompareArgs) -> ExitCode {
    match outcome(&args) {
        Ok(CompareOutcome::Equal) => ExitCode::SUCCESS,
        Ok(CompareOutcome::Different) => ExitCode::from(1),
        Err(err) => {
            error!("{:#}", err);
            ExitCode::from(2)
        }
    }
}
