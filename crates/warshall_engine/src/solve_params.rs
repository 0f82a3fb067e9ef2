use std::fmt;

use crate::error::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Row by row over the whole matrix for each pivot.
    #[default]
    Naive,
    /// The matrix is visited in `tile_rows x tile_cols` blocks for each pivot.
    /// Tiles on the last rows and columns may be smaller.
    Tiled { tile_rows: usize, tile_cols: usize },
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Naive => write!(f, "naive"),
            Strategy::Tiled {
                tile_rows,
                tile_cols,
            } => write!(f, "tiled {tile_rows}x{tile_cols}"),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SolveParams {
    pub strategy: Strategy,
}

impl SolveParams {
    pub fn validate(&self) -> Result<(), EngineError> {
        match self.strategy {
            Strategy::Tiled {
                tile_rows,
                tile_cols,
            } if tile_rows == 0 || tile_cols == 0 => Err(EngineError::InvalidTile {
                rows: tile_rows,
                cols: tile_cols,
            }),
            _ => Ok(()),
        }
    }
}
