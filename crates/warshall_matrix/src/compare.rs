use crate::{
    distance::Distance, distance_matrix::DistanceMatrix, error::MatrixError, node_idx::NodeIdx,
};

pub const DEFAULT_PRECISION: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub from: NodeIdx,
    pub to: NodeIdx,
    pub left: Distance,
    pub right: Distance,
}

impl Mismatch {
    /// Absolute difference between the two cells, `None` when only one of them has an edge.
    pub fn delta(&self) -> Option<f64> {
        match (self.left, self.right) {
            (Distance::Finite(left), Distance::Finite(right)) => Some((left - right).abs()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatrixComparison {
    num_nodes: usize,
    mismatches: Vec<Mismatch>,
}

impl MatrixComparison {
    pub fn is_equal(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }
}

fn cells_match(left: Distance, right: Distance, precision: f64) -> bool {
    match (left, right) {
        (Distance::Finite(left), Distance::Finite(right)) => (left - right).abs() <= precision,
        (Distance::NoEdge, Distance::NoEdge) => true,
        _ => false,
    }
}

/// Compares two matrices cell by cell.
///
/// Finite cells match when they differ by at most `precision`. A missing edge only
/// matches another missing edge.
pub fn compare(
    left: &DistanceMatrix,
    right: &DistanceMatrix,
    precision: f64,
) -> Result<MatrixComparison, MatrixError> {
    if left.num_nodes() != right.num_nodes() {
        return Err(MatrixError::DimensionMismatch {
            left: left.num_nodes(),
            right: right.num_nodes(),
        });
    }

    let num_nodes = left.num_nodes();
    let mismatches = NodeIdx::all(num_nodes)
        .flat_map(|from| NodeIdx::all(num_nodes).map(move |to| (from, to)))
        .filter_map(|(from, to)| {
            let (l, r) = (left.get(from, to), right.get(from, to));
            (!cells_match(l, r, precision)).then_some(Mismatch {
                from,
                to,
                left: l,
                right: r,
            })
        })
        .collect();

    Ok(MatrixComparison {
        num_nodes,
        mismatches,
    })
}
