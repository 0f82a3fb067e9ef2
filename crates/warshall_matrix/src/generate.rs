use rand::{
    SeedableRng,
    distr::{Distribution, Uniform},
    rngs::SmallRng,
    seq::index::sample,
};
use tracing::debug;

use crate::{
    distance::Distance, distance_matrix::DistanceMatrix, error::MatrixError, node_idx::NodeIdx,
};

#[derive(Debug, Clone)]
pub struct GraphParams {
    pub nodes: usize,
    pub edges: usize,
    pub directed: bool,
    pub min_weight: f64,
    pub max_weight: f64,

    /// Fixed seed for reproducible graphs, a random one is drawn otherwise.
    pub seed: Option<u64>,
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            nodes: 30,
            edges: 42,
            directed: false,
            min_weight: 0.0,
            max_weight: 10.0,
            seed: None,
        }
    }
}

impl GraphParams {
    pub fn max_edges(&self) -> usize {
        let pairs = self.nodes * self.nodes.saturating_sub(1);
        if self.directed { pairs } else { pairs / 2 }
    }
}

/// Generates a random graph with exactly `edges` distinct edges between distinct nodes.
///
/// Node pairs without an edge, including the diagonal, hold `NoEdge`. Undirected
/// graphs produce a symmetric matrix.
pub fn generate_graph(params: &GraphParams) -> Result<DistanceMatrix, MatrixError> {
    // Also rejects bounds whose span overflows, e.g. [-f64::MAX, f64::MAX]
    let weights = Uniform::new_inclusive(params.min_weight, params.max_weight).map_err(|_| {
        MatrixError::InvalidWeightRange {
            min: params.min_weight,
            max: params.max_weight,
        }
    })?;

    let max_edges = params.max_edges();
    if params.edges > max_edges {
        return Err(MatrixError::TooManyEdges {
            edges: params.edges,
            max_edges,
        });
    }

    let mut rng = match params.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_rng(&mut rand::rng()),
    };

    let n = params.nodes;
    let candidates = (0..n)
        .flat_map(|from| {
            let first_to = if params.directed { 0 } else { from + 1 };
            (first_to..n)
                .filter(move |&to| to != from)
                .map(move |to| (from, to))
        })
        .collect::<Vec<_>>();

    let mut matrix = DistanceMatrix::filled(n, Distance::NoEdge);
    for index in sample(&mut rng, candidates.len(), params.edges) {
        let (from, to) = candidates[index];
        let weight = Distance::Finite(weights.sample(&mut rng));

        matrix.set(NodeIdx::new(from), NodeIdx::new(to), weight);
        if !params.directed {
            matrix.set(NodeIdx::new(to), NodeIdx::new(from), weight);
        }
    }

    debug!(
        "Generated graph with {} nodes and {} edges (directed: {}, {} weighted cells)",
        n,
        params.edges,
        params.directed,
        matrix.count_finite()
    );

    Ok(matrix)
}
