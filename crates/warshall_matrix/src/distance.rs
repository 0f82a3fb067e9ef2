use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

/// Weight of a direct edge or of the best path known so far between two nodes.
///
/// `NoEdge` orders after every finite distance and absorbs addition.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Distance {
    Finite(f64),
    #[default]
    NoEdge,
}

impl Distance {
    pub const ZERO: Distance = Distance::Finite(0.0);

    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    pub fn is_no_edge(&self) -> bool {
        matches!(self, Distance::NoEdge)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Distance::Finite(value) => Some(*value),
            Distance::NoEdge => None,
        }
    }

    /// Weight of the path `self` followed by `other`.
    ///
    /// The sum saturates at `±f64::MAX`, a finite distance never becomes infinite.
    #[inline(always)]
    pub fn extend(self, other: Distance) -> Distance {
        match (self, other) {
            (Distance::Finite(head), Distance::Finite(tail)) => {
                Distance::Finite((head + tail).clamp(-f64::MAX, f64::MAX))
            }
            _ => Distance::NoEdge,
        }
    }

    /// Smaller of the two distances, `NoEdge` acting as positive infinity.
    #[inline(always)]
    pub fn min(self, other: Distance) -> Distance {
        match (self, other) {
            (Distance::Finite(a), Distance::Finite(b)) => {
                if b < a {
                    other
                } else {
                    self
                }
            }
            (Distance::NoEdge, _) => other,
            (_, Distance::NoEdge) => self,
        }
    }

    /// Larger of the two distances, `NoEdge` acting as the absence of any capacity.
    #[inline(always)]
    pub fn max_present(self, other: Distance) -> Distance {
        match (self, other) {
            (Distance::Finite(a), Distance::Finite(b)) => {
                if b > a {
                    other
                } else {
                    self
                }
            }
            (Distance::NoEdge, _) => other,
            (_, Distance::NoEdge) => self,
        }
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Distance::Finite(a), Distance::Finite(b)) => a.partial_cmp(b),
            (Distance::Finite(_), Distance::NoEdge) => Some(Ordering::Less),
            (Distance::NoEdge, Distance::Finite(_)) => Some(Ordering::Greater),
            (Distance::NoEdge, Distance::NoEdge) => Some(Ordering::Equal),
        }
    }
}

impl From<f64> for Distance {
    fn from(value: f64) -> Self {
        Distance::Finite(value)
    }
}

impl From<Option<f64>> for Distance {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(value) => Distance::Finite(value),
            None => Distance::NoEdge,
        }
    }
}

impl From<Distance> for Option<f64> {
    fn from(distance: Distance) -> Self {
        distance.value()
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(value) => match f.precision() {
                Some(precision) => write!(f, "{value:.precision$}"),
                None => write!(f, "{value}"),
            },
            Distance::NoEdge => Ok(()),
        }
    }
}
