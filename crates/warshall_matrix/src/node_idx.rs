use crate::define_index_newtype;

define_index_newtype!(NodeIdx);

impl NodeIdx {
    /// Iterates over the nodes of a graph with `num_nodes` nodes, in index order.
    pub fn all(num_nodes: usize) -> impl DoubleEndedIterator<Item = NodeIdx> + ExactSizeIterator {
        (0..num_nodes).map(NodeIdx::new)
    }
}
