use serde::{Deserialize, Serialize};

use crate::{distance::Distance, error::MatrixError, node_idx::NodeIdx};

/// Square matrix of distances between `num_nodes` nodes.
///
/// Cells are stored in a flat row-major vector. The cell for a pair of nodes
/// lives at `index = from * num_nodes + to`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(try_from = "RawDistanceMatrix")]
pub struct DistanceMatrix {
    num_nodes: usize,
    cells: Vec<Distance>,
}

#[derive(Deserialize)]
struct RawDistanceMatrix {
    num_nodes: usize,
    cells: Vec<Distance>,
}

impl TryFrom<RawDistanceMatrix> for DistanceMatrix {
    type Error = MatrixError;

    fn try_from(raw: RawDistanceMatrix) -> Result<Self, Self::Error> {
        if raw.num_nodes.checked_mul(raw.num_nodes) != Some(raw.cells.len()) {
            return Err(MatrixError::CellCount {
                num_nodes: raw.num_nodes,
                found: raw.cells.len(),
            });
        }

        Ok(DistanceMatrix {
            num_nodes: raw.num_nodes,
            cells: raw.cells,
        })
    }
}

impl DistanceMatrix {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn filled(num_nodes: usize, cell: Distance) -> Self {
        DistanceMatrix {
            num_nodes,
            cells: vec![cell; num_nodes * num_nodes],
        }
    }

    pub fn from_rows(rows: Vec<Vec<Distance>>) -> Result<Self, MatrixError> {
        let num_nodes = rows.len();

        if let Some((row, found)) = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i, row.len()))
            .find(|&(_, len)| len != num_nodes)
        {
            return Err(MatrixError::NotSquare {
                row,
                expected: num_nodes,
                found,
            });
        }

        Ok(DistanceMatrix {
            num_nodes,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn from_options(rows: Vec<Vec<Option<f64>>>) -> Result<Self, MatrixError> {
        Self::from_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(Distance::from).collect())
                .collect(),
        )
    }

    #[inline(always)]
    fn index(&self, from: NodeIdx, to: NodeIdx) -> usize {
        from.get() * self.num_nodes + to.get()
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    #[inline(always)]
    pub fn get(&self, from: NodeIdx, to: NodeIdx) -> Distance {
        self.cells[self.index(from, to)]
    }

    #[inline(always)]
    pub fn set(&mut self, from: NodeIdx, to: NodeIdx, cell: Distance) {
        let index = self.index(from, to);
        self.cells[index] = cell;
    }

    pub fn row(&self, from: NodeIdx) -> &[Distance] {
        let start = from.get() * self.num_nodes;
        &self.cells[start..start + self.num_nodes]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Distance]> {
        // chunks_exact panics on a zero chunk size
        self.cells.chunks_exact(self.num_nodes.max(1))
    }

    /// Flat row-major view of every cell.
    pub fn cells(&self) -> &[Distance] {
        &self.cells
    }

    /// Mutable flat row-major view. The length is fixed, only values may change.
    pub fn cells_mut(&mut self) -> &mut [Distance] {
        &mut self.cells
    }

    pub fn to_rows(&self) -> Vec<Vec<Distance>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    pub fn to_options(&self) -> Vec<Vec<Option<f64>>> {
        self.rows()
            .map(|row| row.iter().map(Distance::value).collect())
            .collect()
    }

    /// Relabels the nodes so that node `i` of the result is node `permutation[i]`
    /// of `self`. Rows and columns are permuted together.
    ///
    /// # Panics
    ///
    /// Panics if `permutation` does not hold exactly `num_nodes` indices, or if
    /// one of them is out of range.
    pub fn permuted(&self, permutation: &[usize]) -> Self {
        assert_eq!(permutation.len(), self.num_nodes);

        let n = self.num_nodes;
        let mut cells = Vec::with_capacity(n * n);
        for &from in permutation {
            for &to in permutation {
                cells.push(self.cells[from * n + to]);
            }
        }

        DistanceMatrix {
            num_nodes: n,
            cells,
        }
    }

    pub fn is_symmetric(&self) -> bool {
        NodeIdx::all(self.num_nodes).all(|i| {
            NodeIdx::all(self.num_nodes).all(|j| self.get(i, j) == self.get(j, i))
        })
    }

    pub fn count_finite(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_finite()).count()
    }
}
