pub mod compare;
pub mod distance;
pub mod distance_matrix;
pub mod error;
pub mod generate;
pub mod node_idx;
pub mod text_format;
mod utils;
