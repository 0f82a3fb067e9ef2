//! Closures computed with the Floyd-Warshall triple loop.
//!
//! Each algebra says how two paths are chained (`extend`) and which of two
//! candidate paths is kept (`select`). `NoEdge` must be absorbing for `extend`
//! and neutral for `select`: pairs whose head or tail is missing are skipped
//! by the engine without being evaluated.

use warshall_matrix::distance::Distance;

pub trait PathAlgebra {
    fn name(&self) -> &'static str;

    /// Normalizes an input cell before the first pivot.
    fn prepare(&self, cell: Distance) -> Distance {
        cell
    }

    fn extend(&self, head: Distance, tail: Distance) -> Distance;

    fn select(&self, current: Distance, candidate: Distance) -> Distance;

    #[inline(always)]
    fn relax(&self, current: Distance, head: Distance, tail: Distance) -> Distance {
        self.select(current, self.extend(head, tail))
    }
}

/// Minimum total weight of any path.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestPath;

impl PathAlgebra for ShortestPath {
    fn name(&self) -> &'static str {
        "shortest-path"
    }

    #[inline(always)]
    fn extend(&self, head: Distance, tail: Distance) -> Distance {
        head.extend(tail)
    }

    #[inline(always)]
    fn select(&self, current: Distance, candidate: Distance) -> Distance {
        current.min(candidate)
    }
}

/// Widest path: the path whose smallest edge is the largest (max-min).
#[derive(Debug, Clone, Copy, Default)]
pub struct Bottleneck;

impl PathAlgebra for Bottleneck {
    fn name(&self) -> &'static str {
        "bottleneck"
    }

    #[inline(always)]
    fn extend(&self, head: Distance, tail: Distance) -> Distance {
        match (head, tail) {
            (Distance::Finite(head), Distance::Finite(tail)) => Distance::Finite(head.min(tail)),
            _ => Distance::NoEdge,
        }
    }

    #[inline(always)]
    fn select(&self, current: Distance, candidate: Distance) -> Distance {
        current.max_present(candidate)
    }
}

/// Transitive closure. Every reachable pair holds `1`, the others `NoEdge`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reachability;

const REACHABLE: Distance = Distance::Finite(1.0);

impl PathAlgebra for Reachability {
    fn name(&self) -> &'static str {
        "reachability"
    }

    fn prepare(&self, cell: Distance) -> Distance {
        if cell.is_finite() {
            REACHABLE
        } else {
            Distance::NoEdge
        }
    }

    #[inline(always)]
    fn extend(&self, head: Distance, tail: Distance) -> Distance {
        if head.is_finite() && tail.is_finite() {
            REACHABLE
        } else {
            Distance::NoEdge
        }
    }

    #[inline(always)]
    fn select(&self, current: Distance, candidate: Distance) -> Distance {
        if current.is_finite() {
            current
        } else {
            candidate
        }
    }
}
