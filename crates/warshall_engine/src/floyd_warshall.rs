//! In-place Floyd-Warshall closure over a dense distance matrix.
//!
//! Pivots are processed in increasing order. For a fixed pivot `k` every pair
//! `(i, j)` is relaxed through `k`:
//! `M[i][j] = select(M[i][j], extend(M[i][k], M[k][j]))`.
//! The matrix is updated destructively, no intermediate layer is allocated.
//!
//! Negative cycles are not detected. The computation still terminates but the
//! distances of nodes on or behind such a cycle are meaningless, and a node on
//! a negative cycle ends up with a negative self-distance.

use tracing::debug;
use warshall_matrix::{distance::Distance, distance_matrix::DistanceMatrix, node_idx::NodeIdx};

use crate::{
    error::EngineError,
    path_algebra::{PathAlgebra, ShortestPath},
    solve_listener::SolveListener,
    solve_params::{SolveParams, Strategy},
};

/// All-pairs shortest distances, computed in place.
///
/// Cell `(i, j)` ends up holding the minimum weight of any path from `i` to `j`,
/// or `NoEdge` if there is none. Self-distances start from the input diagonal,
/// they are never reset to zero.
///
/// `M[i][k]` is read once per row of a pass rather than once per cell. This only
/// changes the result when `M[k][k] < 0`, i.e. when `k` lies on a negative cycle.
pub fn floyd_warshall(matrix: &mut DistanceMatrix) {
    run(matrix, &ShortestPath, Strategy::Naive, &mut ());
}

/// Computes the closure of `matrix` under `algebra`, in place.
pub fn solve<A, L>(
    matrix: &mut DistanceMatrix,
    algebra: &A,
    params: &SolveParams,
    listener: &mut L,
) -> Result<(), EngineError>
where
    A: PathAlgebra,
    L: SolveListener,
{
    params.validate()?;
    run(matrix, algebra, params.strategy, listener);
    Ok(())
}

fn run<A, L>(matrix: &mut DistanceMatrix, algebra: &A, strategy: Strategy, listener: &mut L)
where
    A: PathAlgebra,
    L: SolveListener,
{
    let n = matrix.num_nodes();
    debug!(
        "Computing {} closure of {} nodes ({})",
        algebra.name(),
        n,
        strategy
    );

    listener.solve_start(n);

    let cells = matrix.cells_mut();
    for cell in cells.iter_mut() {
        *cell = algebra.prepare(*cell);
    }

    for k in 0..n {
        match strategy {
            Strategy::Naive => relax_pivot(cells, n, k, algebra),
            Strategy::Tiled {
                tile_rows,
                tile_cols,
            } => relax_pivot_tiled(cells, n, k, tile_rows, tile_cols, algebra),
        }

        listener.pivot_relaxed(NodeIdx::new(k));
    }

    listener.solve_end();
}

/// Relaxes row `i`, columns `columns`, through pivot `k`.
#[inline(always)]
fn relax_row<A: PathAlgebra>(
    cells: &mut [Distance],
    n: usize,
    k: usize,
    i: usize,
    columns: std::ops::Range<usize>,
    algebra: &A,
) {
    let head = cells[i * n + k];
    // NoEdge absorbs extend, nothing in this row can improve
    if head.is_no_edge() {
        return;
    }

    for j in columns {
        let tail = cells[k * n + j];
        if tail.is_no_edge() {
            continue;
        }

        let index = i * n + j;
        cells[index] = algebra.relax(cells[index], head, tail);
    }
}

fn relax_pivot<A: PathAlgebra>(cells: &mut [Distance], n: usize, k: usize, algebra: &A) {
    for i in 0..n {
        relax_row(cells, n, k, i, 0..n, algebra);
    }
}

fn relax_pivot_tiled<A: PathAlgebra>(
    cells: &mut [Distance],
    n: usize,
    k: usize,
    tile_rows: usize,
    tile_cols: usize,
    algebra: &A,
) {
    for i0 in (0..n).step_by(tile_rows) {
        for j0 in (0..n).step_by(tile_cols) {
            for i in i0..(i0 + tile_rows).min(n) {
                relax_row(cells, n, k, i, j0..(j0 + tile_cols).min(n), algebra);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        path_algebra::{Bottleneck, Reachability},
        test_utils::{matrix, random_matrix, random_permutation, reachable_pairs},
    };

    fn tiled(tile_rows: usize, tile_cols: usize) -> SolveParams {
        SolveParams {
            strategy: Strategy::Tiled {
                tile_rows,
                tile_cols,
            },
        }
    }

    #[test]
    fn test_three_nodes() {
        let mut m = matrix(vec![
            vec![Some(0.0), Some(5.0), None],
            vec![Some(2.0), Some(0.0), Some(1.0)],
            vec![None, None, Some(0.0)],
        ]);

        floyd_warshall(&mut m);

        assert_eq!(
            m.to_options(),
            vec![
                vec![Some(0.0), Some(5.0), Some(6.0)],
                vec![Some(2.0), Some(0.0), Some(1.0)],
                vec![None, None, Some(0.0)],
            ]
        );
    }

    #[test]
    fn test_single_node() {
        let mut m = matrix(vec![vec![Some(0.0)]]);
        floyd_warshall(&mut m);
        assert_eq!(m.to_options(), vec![vec![Some(0.0)]]);
    }

    #[test]
    fn test_empty_matrix() {
        let mut m = DistanceMatrix::empty();
        floyd_warshall(&mut m);
        assert!(m.is_empty());
    }

    #[test]
    fn test_self_distance_is_not_reset() {
        let mut m = matrix(vec![vec![Some(3.0), Some(1.0)], vec![Some(1.0), None]]);
        floyd_warshall(&mut m);

        // 0 -> 1 -> 0 is cheaper than the given self-loop, 1 -> 0 -> 1 fills the missing one
        assert_eq!(
            m.to_options(),
            vec![vec![Some(2.0), Some(1.0)], vec![Some(1.0), Some(2.0)]]
        );
    }

    #[test]
    fn test_self_distance_stays_no_edge_without_cycle() {
        let mut m = matrix(vec![vec![None, Some(1.0)], vec![None, None]]);
        floyd_warshall(&mut m);
        assert_eq!(
            m.to_options(),
            vec![vec![None, Some(1.0)], vec![None, None]]
        );
    }

    #[test]
    fn test_negative_edges_without_cycle() {
        let mut m = matrix(vec![
            vec![Some(0.0), Some(4.0), Some(1.0)],
            vec![None, Some(0.0), None],
            vec![None, Some(-2.0), Some(0.0)],
        ]);
        floyd_warshall(&mut m);

        assert_eq!(
            m.get(NodeIdx::new(0), NodeIdx::new(1)),
            Distance::Finite(-1.0)
        );
    }

    #[test]
    fn test_negative_cycle_terminates_with_negative_self_distance() {
        let mut m = matrix(vec![vec![Some(0.0), Some(1.0)], vec![Some(-3.0), Some(0.0)]]);
        floyd_warshall(&mut m);

        assert!(m.get(NodeIdx::new(0), NodeIdx::new(0)) < Distance::ZERO);
        assert!(m.get(NodeIdx::new(1), NodeIdx::new(1)) < Distance::ZERO);
    }

    #[test]
    fn test_row_head_is_read_once_per_row() {
        let mut m = matrix(vec![vec![Some(-1.0), Some(1.0)], vec![Some(2.0), Some(5.0)]]);
        floyd_warshall(&mut m);

        // Pass 0 lowers M[1][0] from 2 to 0 while row 1 is relaxed, M[1][1] still
        // uses the head read at the start of the row: min(5, 2 + 0) = 2
        assert_eq!(
            m.row(NodeIdx::new(1)),
            &[Distance::Finite(0.0), Distance::Finite(2.0)]
        );
    }

    #[test]
    fn test_large_weights_do_not_overflow_into_small_values() {
        let mut m = matrix(vec![
            vec![Some(0.0), Some(f64::MAX), None],
            vec![None, Some(0.0), Some(f64::MAX)],
            vec![None, None, Some(0.0)],
        ]);
        floyd_warshall(&mut m);

        assert_eq!(
            m.get(NodeIdx::new(0), NodeIdx::new(2)),
            Distance::Finite(f64::MAX)
        );
        assert_eq!(m.get(NodeIdx::new(2), NodeIdx::new(0)), Distance::NoEdge);
    }

    #[test]
    fn test_idempotence() {
        for seed in 0..10 {
            let mut once = random_matrix(seed, 12, 0.3, 20);
            floyd_warshall(&mut once);

            let mut twice = once.clone();
            floyd_warshall(&mut twice);

            assert_eq!(once, twice, "seed {seed}");
        }
    }

    #[test]
    fn test_distances_never_increase() {
        for seed in 0..10 {
            let input = random_matrix(seed, 10, 0.4, 50);
            let mut output = input.clone();
            floyd_warshall(&mut output);

            for (before, after) in input.cells().iter().zip(output.cells()) {
                assert!(after <= before, "seed {seed}: {after:?} > {before:?}");
            }
        }
    }

    #[test]
    fn test_triangle_inequality() {
        for seed in 0..10 {
            let mut m = random_matrix(seed, 10, 0.3, 30);
            floyd_warshall(&mut m);

            let n = m.num_nodes();
            for i in NodeIdx::all(n) {
                for j in NodeIdx::all(n) {
                    for k in NodeIdx::all(n) {
                        let via = m.get(i, k).extend(m.get(k, j));
                        assert!(m.get(i, j) <= via, "seed {seed}: ({i}, {j}) via {k}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_unreachable_pairs_keep_no_edge() {
        for seed in 0..10 {
            let input = random_matrix(seed, 15, 0.08, 10);
            let reachable = reachable_pairs(&input);

            let mut output = input.clone();
            floyd_warshall(&mut output);

            for i in NodeIdx::all(15) {
                for j in NodeIdx::all(15) {
                    let expected_edge = reachable[i.get()][j.get()] || i == j;
                    assert_eq!(
                        output.get(i, j).is_finite(),
                        expected_edge,
                        "seed {seed}: ({i}, {j})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_order_invariance() {
        for seed in 0..10 {
            let input = random_matrix(seed, 9, 0.35, 25);
            let permutation = random_permutation(seed + 100, 9);

            let mut solved_then_permuted = input.clone();
            floyd_warshall(&mut solved_then_permuted);
            let solved_then_permuted = solved_then_permuted.permuted(&permutation);

            let mut permuted_then_solved = input.permuted(&permutation);
            floyd_warshall(&mut permuted_then_solved);

            assert_eq!(solved_then_permuted, permuted_then_solved, "seed {seed}");
        }
    }

    #[test]
    fn test_tiled_matches_naive() {
        for seed in 0..5 {
            let input = random_matrix(seed, 13, 0.3, 40);

            let mut expected = input.clone();
            floyd_warshall(&mut expected);

            for (rows, cols) in [(1, 1), (2, 2), (4, 3), (5, 16), (13, 13), (32, 32)] {
                let mut m = input.clone();
                solve(&mut m, &ShortestPath, &tiled(rows, cols), &mut ()).unwrap();
                assert_eq!(m, expected, "seed {seed}, tile {rows}x{cols}");
            }
        }
    }

    #[test]
    fn test_invalid_tile_leaves_matrix_untouched() {
        let input = random_matrix(1, 4, 0.5, 10);
        let mut m = input.clone();

        let result = solve(&mut m, &ShortestPath, &tiled(0, 4), &mut ());
        assert_eq!(result, Err(EngineError::InvalidTile { rows: 0, cols: 4 }));
        assert_eq!(m, input);
    }

    #[test]
    fn test_bottleneck() {
        let mut m = matrix(vec![
            vec![None, Some(5.0), Some(1.0)],
            vec![None, None, Some(3.0)],
            vec![None, None, None],
        ]);
        solve(&mut m, &Bottleneck, &SolveParams::default(), &mut ()).unwrap();

        assert_eq!(
            m.to_options(),
            vec![
                vec![None, Some(5.0), Some(3.0)],
                vec![None, None, Some(3.0)],
                vec![None, None, None],
            ]
        );
    }

    #[test]
    fn test_reachability_matches_search() {
        for seed in 0..5 {
            let input = random_matrix(seed, 12, 0.1, 5);
            let reachable = reachable_pairs(&input);

            let mut m = input.clone();
            solve(&mut m, &Reachability, &SolveParams::default(), &mut ()).unwrap();

            for i in NodeIdx::all(12) {
                for j in NodeIdx::all(12) {
                    let expected = if reachable[i.get()][j.get()] || i == j {
                        Distance::Finite(1.0)
                    } else {
                        Distance::NoEdge
                    };
                    assert_eq!(m.get(i, j), expected, "seed {seed}: ({i}, {j})");
                }
            }
        }
    }

    #[derive(Default)]
    struct RecordingListener {
        num_nodes: Option<usize>,
        pivots: Vec<NodeIdx>,
        ended: bool,
    }

    impl SolveListener for RecordingListener {
        fn solve_start(&mut self, num_nodes: usize) {
            self.num_nodes = Some(num_nodes);
        }

        fn pivot_relaxed(&mut self, pivot: NodeIdx) {
            self.pivots.push(pivot);
        }

        fn solve_end(&mut self) {
            self.ended = true;
        }
    }

    #[test]
    fn test_listener_sees_pivots_in_order() {
        let mut m = random_matrix(3, 4, 0.5, 10);
        let mut listener = RecordingListener::default();

        solve(&mut m, &ShortestPath, &SolveParams::default(), &mut listener).unwrap();

        assert_eq!(listener.num_nodes, Some(4));
        assert_eq!(listener.pivots, NodeIdx::all(4).collect::<Vec<_>>());
        assert!(listener.ended);
    }
}
