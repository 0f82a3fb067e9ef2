use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;
use warshall_matrix::{
    generate::{GraphParams, generate_graph},
    text_format::MatrixWriter,
};

/// Fractional digits of generated weights.
const GENERATED_PRECISION: usize = 6;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of nodes in the graph
    #[arg(short, long, default_value_t = 30)]
    nodes: usize,

    /// Number of edges in the graph
    #[arg(short = 'm', long, default_value_t = 42)]
    edges: usize,

    /// Generate a directed graph
    #[arg(short, long)]
    directed: bool,

    #[arg(long, default_value_t = 0.0)]
    min_weight: f64,

    #[arg(long, default_value_t = 10.0)]
    max_weight: f64,

    /// Seed of the random generator, for reproducible graphs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output file name
    #[arg(short, long, default_value = "graph.txt")]
    output: PathBuf,
}

impl From<&GenerateArgs> for GraphParams {
    fn from(args: &GenerateArgs) -> Self {
        GraphParams {
            nodes: args.nodes,
            edges: args.edges,
            directed: args.directed,
            min_weight: args.min_weight,
            max_weight: args.max_weight,
            seed: args.seed,
        }
    }
}

pub fn run(args: GenerateArgs) -> Result<(), anyhow::Error> {
    let matrix = generate_graph(&GraphParams::from(&args))?;

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    MatrixWriter::new()
        .precision(GENERATED_PRECISION)
        .write_header(true)
        .write_file(&args.output, &matrix)
        .with_context(|| format!("Failed to write graph to {:?}", args.output))?;

    info!(
        "Generated graph with {} nodes and {} edges into {:?}",
        args.nodes, args.edges, args.output
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use warshall_matrix::text_format::read_matrix_file;

    use super::*;

    #[test]
    fn test_generate_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("graphs/graph.txt");

        run(GenerateArgs {
            nodes: 12,
            edges: 20,
            directed: true,
            min_weight: 1.0,
            max_weight: 3.0,
            seed: Some(11),
            output: output.clone(),
        })
        .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("12\n"));

        let matrix = read_matrix_file(&output).unwrap();
        assert_eq!(matrix.num_nodes(), 12);
        assert_eq!(matrix.count_finite(), 20);
    }

    #[test]
    fn test_generate_rejects_too_many_edges() {
        let dir = tempfile::tempdir().unwrap();

        let result = run(GenerateArgs {
            nodes: 3,
            edges: 4,
            directed: false,
            min_weight: 0.0,
            max_weight: 1.0,
            seed: None,
            output: dir.path().join("graph.txt"),
        });

        assert!(result.is_err());
    }
}
