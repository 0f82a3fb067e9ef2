use indicatif::{ProgressBar, ProgressStyle};
use warshall_engine::solve_listener::SolveListener;
use warshall_matrix::node_idx::NodeIdx;

/// Displays one tick per relaxed pivot.
pub struct ProgressListener {
    bar: ProgressBar,
}

impl ProgressListener {
    pub fn new() -> Result<Self, anyhow::Error> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len} pivots ({elapsed})")?,
        );
        Ok(Self { bar })
    }
}

impl SolveListener for ProgressListener {
    fn solve_start(&mut self, num_nodes: usize) {
        self.bar.set_length(num_nodes as u64);
    }

    fn pivot_relaxed(&mut self, _pivot: NodeIdx) {
        self.bar.inc(1);
    }

    fn solve_end(&mut self) {
        self.bar.finish_and_clear();
    }
}
