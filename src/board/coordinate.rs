//! Dot coordinates and the edges between them

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A dot on the grid, addressed by `(row, col)`.
///
/// The derived ordering compares the row first, then the column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Coordinate { row, col }
    }

    /// Manhattan distance between two dots
    pub fn distance(&self, other: &Coordinate) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Whether the two dots can be joined by an edge
    pub fn is_adjacent(&self, other: &Coordinate) -> bool {
        self.distance(other) == 1
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Coordinate { row, col }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = |reason: &str| Error::ParseCoordinate {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (row, col) = s
            .trim()
            .split_once(',')
            .ok_or_else(|| parse_err("expected 'row,col'"))?;
        let row = row
            .trim()
            .parse()
            .map_err(|_| parse_err("row is not a non-negative integer"))?;
        let col = col
            .trim()
            .parse()
            .map_err(|_| parse_err("column is not a non-negative integer"))?;

        Ok(Coordinate { row, col })
    }
}

/// An undirected edge between two dots.
///
/// The endpoints are always stored with the lesser coordinate first, so two
/// edges built from the same dots in either order compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    first: Coordinate,
    second: Coordinate,
}

impl Edge {
    pub fn new(a: impl Into<Coordinate>, b: impl Into<Coordinate>) -> Self {
        let (a, b) = (a.into(), b.into());
        if b < a {
            Edge {
                first: b,
                second: a,
            }
        } else {
            Edge {
                first: a,
                second: b,
            }
        }
    }

    /// The lesser endpoint
    pub fn first(&self) -> Coordinate {
        self.first
    }

    /// The greater endpoint
    pub fn second(&self) -> Coordinate {
        self.second
    }

    pub fn endpoints(&self) -> (Coordinate, Coordinate) {
        (self.first, self.second)
    }

    /// Whether the edge runs along a row (left to right)
    pub fn is_horizontal(&self) -> bool {
        self.first.row == self.second.row
    }
}

impl<A: Into<Coordinate>, B: Into<Coordinate>> From<(A, B)> for Edge {
    fn from((a, b): (A, B)) -> Self {
        Edge::new(a, b)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.second)
    }
}

impl FromStr for Edge {
    type Err = Error;

    /// Parses `"r,c r,c"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), None) => Ok(Edge::new(
                a.parse::<Coordinate>()?,
                b.parse::<Coordinate>()?,
            )),
            _ => Err(Error::ParseCoordinate {
                input: s.to_string(),
                reason: "expected two coordinates such as '0,0 0,1'".to_string(),
            }),
        }
    }
}
