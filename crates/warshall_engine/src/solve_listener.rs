use warshall_matrix::node_idx::NodeIdx;

/// Observes the progress of a closure computation. Every hook defaults to a no-op.
pub trait SolveListener {
    fn solve_start(&mut self, _num_nodes: usize) {}
    /// Called once every pair has been relaxed through `pivot`.
    fn pivot_relaxed(&mut self, _pivot: NodeIdx) {}
    fn solve_end(&mut self) {}
}

impl SolveListener for () {}
