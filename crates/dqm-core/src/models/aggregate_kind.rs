use std::fmt;

use serde::{Deserialize, Serialize};

/// Variant tag of a statistical aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    Scalar,
    Histogram1D,
    Histogram2D,
    Histogram3D,
    Profile,
}

impl AggregateKind {
    /// Number of binned axes (0 for scalars).
    pub fn dimension(self) -> usize {
        match self {
            Self::Scalar => 0,
            Self::Histogram1D | Self::Profile => 1,
            Self::Histogram2D => 2,
            Self::Histogram3D => 3,
        }
    }

    /// Histogram kind for a given number of axes.
    pub fn histogram(dimension: usize) -> Option<Self> {
        match dimension {
            1 => Some(Self::Histogram1D),
            2 => Some(Self::Histogram2D),
            3 => Some(Self::Histogram3D),
            _ => None,
        }
    }

    pub fn is_binned(self) -> bool {
        self != Self::Scalar
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.write_str("scalar"),
            Self::Histogram1D => f.write_str("histogram_1d"),
            Self::Histogram2D => f.write_str("histogram_2d"),
            Self::Histogram3D => f.write_str("histogram_3d"),
            Self::Profile => f.write_str("profile"),
        }
    }
}
