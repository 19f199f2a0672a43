use std::fmt;

use serde::{Deserialize, Serialize};

/// Values passed to a fill call. The arity alone selects the capability:
/// one value, a 2-D point or weighted 1-D value, a 3-D point or weighted
/// 2-D point, or a weighted 3-D point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillPoint {
    One(f64),
    Two(f64, f64),
    Three(f64, f64, f64),
    Four(f64, f64, f64, f64),
}

impl FillPoint {
    pub fn arity(&self) -> usize {
        match self {
            Self::One(..) => 1,
            Self::Two(..) => 2,
            Self::Three(..) => 3,
            Self::Four(..) => 4,
        }
    }
}

impl From<f64> for FillPoint {
    fn from(v: f64) -> Self {
        Self::One(v)
    }
}

impl From<(f64, f64)> for FillPoint {
    fn from((a, b): (f64, f64)) -> Self {
        Self::Two(a, b)
    }
}

impl From<(f64, f64, f64)> for FillPoint {
    fn from((a, b, c): (f64, f64, f64)) -> Self {
        Self::Three(a, b, c)
    }
}

impl From<(f64, f64, f64, f64)> for FillPoint {
    fn from((a, b, c, d): (f64, f64, f64, f64)) -> Self {
        Self::Four(a, b, c, d)
    }
}

/// Bin coordinates, 1-based per axis; 0 is underflow and `nbins + 1` overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinIndex {
    X(usize),
    XY(usize, usize),
    XYZ(usize, usize, usize),
}

impl BinIndex {
    pub fn dimension(&self) -> usize {
        match self {
            Self::X(..) => 1,
            Self::XY(..) => 2,
            Self::XYZ(..) => 3,
        }
    }

    /// Coordinates padded with zeros up to three axes.
    pub fn coords(&self) -> [usize; 3] {
        match *self {
            Self::X(x) => [x, 0, 0],
            Self::XY(x, y) => [x, y, 0],
            Self::XYZ(x, y, z) => [x, y, z],
        }
    }
}

impl From<usize> for BinIndex {
    fn from(x: usize) -> Self {
        Self::X(x)
    }
}

impl From<(usize, usize)> for BinIndex {
    fn from((x, y): (usize, usize)) -> Self {
        Self::XY(x, y)
    }
}

impl From<(usize, usize, usize)> for BinIndex {
    fn from((x, y, z): (usize, usize, usize)) -> Self {
        Self::XYZ(x, y, z)
    }
}

/// Axis selector for statistics and axis settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Zero-based position.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Axis from its conventional number (1 = x, 2 = y, 3 = z).
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::X),
            2 => Some(Self::Y),
            3 => Some(Self::Z),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
            Self::Z => f.write_str("z"),
        }
    }
}
