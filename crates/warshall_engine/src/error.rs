use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid tile size {rows}x{cols}, both dimensions must be at least 1")]
    InvalidTile { rows: usize, cols: usize },
}
