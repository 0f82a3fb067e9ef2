use rand::{Rng, SeedableRng, rngs::SmallRng};
use warshall_matrix::{distance::Distance, distance_matrix::DistanceMatrix, node_idx::NodeIdx};

pub fn matrix(rows: Vec<Vec<Option<f64>>>) -> DistanceMatrix {
    DistanceMatrix::from_options(rows).unwrap()
}

/// Random matrix with integral weights in `[0, max_weight]`, so sums are exact.
/// Each off-diagonal edge exists with probability `density`, the diagonal is 0.
pub fn random_matrix(seed: u64, num_nodes: usize, density: f64, max_weight: u32) -> DistanceMatrix {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut matrix = DistanceMatrix::filled(num_nodes, Distance::NoEdge);

    for i in NodeIdx::all(num_nodes) {
        for j in NodeIdx::all(num_nodes) {
            if i == j {
                matrix.set(i, j, Distance::ZERO);
            } else if rng.random_bool(density) {
                let weight = rng.random_range(0..=max_weight);
                matrix.set(i, j, Distance::Finite(weight as f64));
            }
        }
    }

    matrix
}

pub fn random_permutation(seed: u64, num_nodes: usize) -> Vec<usize> {
    use rand::seq::SliceRandom;

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut permutation = (0..num_nodes).collect::<Vec<_>>();
    permutation.shuffle(&mut rng);
    permutation
}

/// Pairs connected by a path of one or more edges, computed by a search from every node.
pub fn reachable_pairs(matrix: &DistanceMatrix) -> Vec<Vec<bool>> {
    let n = matrix.num_nodes();
    let mut reachable = vec![vec![false; n]; n];

    for source in 0..n {
        let mut stack = vec![source];
        while let Some(node) = stack.pop() {
            for next in 0..n {
                if matrix.get(NodeIdx::new(node), NodeIdx::new(next)).is_finite()
                    && !reachable[source][next]
                {
                    reachable[source][next] = true;
                    stack.push(next);
                }
            }
        }
    }

    reachable
}
