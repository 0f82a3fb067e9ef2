pub mod error;
pub mod floyd_warshall;
pub mod path_algebra;
pub mod solve_listener;
pub mod solve_params;

#[cfg(test)]
pub(crate) mod test_utils;
