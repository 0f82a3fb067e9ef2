use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid distance {field:?} at row {row}, column {column}")]
    Parse {
        row: usize,
        column: usize,
        field: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("Distance at row {row}, column {column} is not a finite number")]
    NonFinite { row: usize, column: usize },

    #[error("Matrix is not square: row {row} has {found} fields, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("A matrix of {num_nodes} nodes needs {num_nodes}x{num_nodes} cells, found {found}")]
    CellCount { num_nodes: usize, found: usize },

    #[error("Matrix dimensions differ: {left}x{left} and {right}x{right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Cannot place {edges} edges in a graph with {max_edges} possible edges")]
    TooManyEdges { edges: usize, max_edges: usize },

    #[error("Invalid weight range [{min}, {max}]")]
    InvalidWeightRange { min: f64, max: f64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MatrixError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MatrixError::Io {
            path: path.into(),
            source,
        }
    }
}
