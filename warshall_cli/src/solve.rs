use std::{path::PathBuf, time::Instant};

use anyhow::Context;
use clap::{Args, ValueEnum};
use tracing::{debug, info};
use warshall_engine::{
    floyd_warshall::solve,
    path_algebra::{Bottleneck, Reachability, ShortestPath},
    solve_listener::SolveListener,
    solve_params::{SolveParams, Strategy},
};
use warshall_matrix::{
    distance_matrix::DistanceMatrix,
    text_format::{
        DEFAULT_PRECISION, MatrixReader, MatrixWriter, read_matrix_json, write_matrix_json,
    },
};

use crate::{parsers, progress::ProgressListener};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Algebra {
    /// Minimum total weight of any path
    #[default]
    ShortestPath,
    /// Largest minimum edge weight along any path (max-min)
    Bottleneck,
    /// Whether any path exists (transitive closure)
    Reachability,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MatrixFormat {
    /// Comma-separated rows, empty fields for missing edges
    #[default]
    Csv,
    Json,
}

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// File to read the matrix from
    #[arg(short, long)]
    input_filename: PathBuf,

    /// File to write the matrix to
    #[arg(short, long)]
    output_filename: PathBuf,

    #[arg(short, long, value_enum, default_value_t = Algebra::ShortestPath)]
    algebra: Algebra,

    /// Visit the matrix in tiles, e.g. "16x4" or "8"
    #[arg(short, long, value_parser = parsers::parse_tile)]
    tile: Option<Strategy>,

    /// Fractional digits of the written distances (2 by default, 0 for reachability)
    #[arg(short, long)]
    precision: Option<usize>,

    /// Write the number of nodes as the first line of the output
    #[arg(long)]
    header: bool,

    #[arg(long, value_enum, default_value_t = MatrixFormat::Csv)]
    input_format: MatrixFormat,

    #[arg(long, value_enum, default_value_t = MatrixFormat::Csv)]
    output_format: MatrixFormat,

    /// Show a progress bar while solving
    #[arg(long)]
    progress: bool,
}

/// Everything a solve run needs, built once from the command line.
#[derive(Debug)]
pub struct SolveConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub input_format: MatrixFormat,
    pub output_format: MatrixFormat,
    pub reader: MatrixReader,
    pub writer: MatrixWriter,
    pub algebra: Algebra,
    pub params: SolveParams,
    pub progress: bool,
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = anyhow::Error;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let params = SolveParams {
            strategy: args.tile.unwrap_or_default(),
        };
        params.validate()?;

        let precision = args.precision.unwrap_or(match args.algebra {
            Algebra::Reachability => 0,
            Algebra::ShortestPath | Algebra::Bottleneck => DEFAULT_PRECISION,
        });

        Ok(SolveConfig {
            input: args.input_filename,
            output: args.output_filename,
            input_format: args.input_format,
            output_format: args.output_format,
            reader: MatrixReader::default(),
            writer: MatrixWriter::new()
                .precision(precision)
                .write_header(args.header),
            algebra: args.algebra,
            params,
            progress: args.progress,
        })
    }
}

fn read_input(config: &SolveConfig) -> Result<DistanceMatrix, anyhow::Error> {
    let matrix = match config.input_format {
        MatrixFormat::Csv => config.reader.read_file(&config.input),
        MatrixFormat::Json => read_matrix_json(&config.input),
    }
    .with_context(|| format!("Failed to load matrix from {:?}", config.input))?;

    Ok(matrix)
}

fn write_output(config: &SolveConfig, matrix: &DistanceMatrix) -> Result<(), anyhow::Error> {
    match config.output_format {
        MatrixFormat::Csv => config.writer.write_file(&config.output, matrix),
        MatrixFormat::Json => write_matrix_json(&config.output, matrix),
    }
    .with_context(|| format!("Failed to write matrix to {:?}", config.output))?;

    Ok(())
}

fn solve_matrix<L: SolveListener>(
    matrix: &mut DistanceMatrix,
    config: &SolveConfig,
    listener: &mut L,
) -> Result<(), anyhow::Error> {
    match config.algebra {
        Algebra::ShortestPath => solve(matrix, &ShortestPath, &config.params, listener)?,
        Algebra::Bottleneck => solve(matrix, &Bottleneck, &config.params, listener)?,
        Algebra::Reachability => solve(matrix, &Reachability, &config.params, listener)?,
    }

    Ok(())
}

pub fn run(config: SolveConfig) -> Result<(), anyhow::Error> {
    info!("Loading matrix from {:?}", config.input);
    let mut matrix = read_input(&config)?;
    debug!(
        "Loaded {} nodes with {} edges (symmetric: {})",
        matrix.num_nodes(),
        matrix.count_finite(),
        matrix.is_symmetric()
    );

    let start = Instant::now();
    if config.progress {
        solve_matrix(&mut matrix, &config, &mut ProgressListener::new()?)?;
    } else {
        solve_matrix(&mut matrix, &config, &mut ())?;
    }
    info!(
        "Solved {} nodes with {:?} in {:?}",
        matrix.num_nodes(),
        config.algebra,
        start.elapsed()
    );

    write_output(&config, &matrix)?;
    info!("Wrote matrix to {:?}", config.output);

    Ok(())
}
