//! Bijective mapping between legal edges and bit positions
//!
//! Every dot `(i, j)` owns two consecutive bits: the first for the edge to its
//! right neighbour, the second for the edge to the dot below. Dots on the last
//! column only use the second bit and dots on the last row only use the first.

use super::coordinate::{Coordinate, Edge};
use crate::error::{Error, Result};

/// Encodes edges of a `size × size` box grid (`size + 1` dots per side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeEncoder {
    size: usize,
}

impl EdgeEncoder {
    pub fn new(size: usize) -> Self {
        EdgeEncoder { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Length of the bit-vector, `2 * (size + 1)^2`
    pub fn num_bits(&self) -> usize {
        2 * (self.size + 1) * (self.size + 1)
    }

    /// Number of legal edges, `2 * size * (size + 1)`
    pub fn num_edges(&self) -> usize {
        2 * self.size * (self.size + 1)
    }

    /// Every legal edge in the fixed traversal order.
    ///
    /// Inner dots `(i, j)` with `i, j < size` come first in row-major order,
    /// each yielding its rightward then its downward edge. The last-column
    /// vertical edges follow, then the last-row horizontal edges. Calling this
    /// again restarts the same sequence.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + Clone + use<> {
        let size = self.size;

        let inner = (0..size)
            .flat_map(move |i| (0..size).map(move |j| (i, j)))
            .flat_map(|(i, j)| {
                [
                    Edge::new((i, j), (i, j + 1)),
                    Edge::new((i, j), (i + 1, j)),
                ]
            });
        let last_column = (0..size).map(move |row| Edge::new((row, size), (row + 1, size)));
        let last_row = (0..size).map(move |col| Edge::new((size, col), (size, col + 1)));

        inner.chain(last_column).chain(last_row)
    }

    /// Bit position of the edge from `first` to `second`.
    ///
    /// `first` must be the upper or left endpoint. Fails with
    /// [`Error::OutOfBounds`] when either dot lies outside the grid and with
    /// [`Error::InvalidEdge`] when the dots do not form a legal edge.
    pub fn bit_position(&self, first: Coordinate, second: Coordinate) -> Result<usize> {
        self.check_bounds(first)?;
        self.check_bounds(second)?;
        Self::check_edge(first, second)?;

        Ok(self.bit_position_unchecked(first, second))
    }

    /// Bit position of an already normalized edge, with validation
    pub fn edge_position(&self, edge: &Edge) -> Result<usize> {
        self.bit_position(edge.first(), edge.second())
    }

    /// Bit position without validation, for edges known to be legal.
    pub fn bit_position_unchecked(&self, first: Coordinate, second: Coordinate) -> usize {
        debug_assert!(first.is_adjacent(&second));
        let base = 2 * (first.row * (self.size + 1) + first.col);
        if second.col == first.col + 1 {
            base
        } else {
            base + 1
        }
    }

    fn check_bounds(&self, coordinate: Coordinate) -> Result<()> {
        if coordinate.row > self.size || coordinate.col > self.size {
            return Err(Error::OutOfBounds {
                coordinate,
                size: self.size,
            });
        }
        Ok(())
    }

    fn check_edge(first: Coordinate, second: Coordinate) -> Result<()> {
        let invalid = |reason| Error::InvalidEdge {
            first,
            second,
            reason,
        };

        if first == second {
            return Err(invalid("endpoints are identical"));
        }
        if second.row < first.row || second.col < first.col {
            return Err(invalid("first endpoint is not above or left of the second"));
        }
        if !first.is_adjacent(&second) {
            return Err(invalid("endpoints are not adjacent"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn test_enumeration_order_size_two() {
        let encoder = EdgeEncoder::new(2);
        let edges: Vec<Edge> = encoder.edges().collect();
        let expected = vec![
            Edge::new(c(0, 0), c(0, 1)),
            Edge::new(c(0, 0), c(1, 0)),
            Edge::new(c(0, 1), c(0, 2)),
            Edge::new(c(0, 1), c(1, 1)),
            Edge::new(c(1, 0), c(1, 1)),
            Edge::new(c(1, 0), c(2, 0)),
            Edge::new(c(1, 1), c(1, 2)),
            Edge::new(c(1, 1), c(2, 1)),
            Edge::new(c(0, 2), c(1, 2)),
            Edge::new(c(1, 2), c(2, 2)),
            Edge::new(c(2, 0), c(2, 1)),
            Edge::new(c(2, 1), c(2, 2)),
        ];
        assert_eq!(edges, expected);
    }

    #[test]
    fn test_enumeration_is_restartable() {
        let encoder = EdgeEncoder::new(3);
        let first: Vec<Edge> = encoder.edges().collect();
        let second: Vec<Edge> = encoder.edges().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), encoder.num_edges());
    }

    #[test]
    fn test_positions_are_unique_and_in_range() {
        for size in 1..=5 {
            let encoder = EdgeEncoder::new(size);
            let positions: HashSet<usize> = encoder
                .edges()
                .map(|edge| encoder.edge_position(&edge).unwrap())
                .collect();
            assert_eq!(positions.len(), encoder.num_edges());
            assert!(positions.iter().all(|&p| p < encoder.num_bits()));
        }
    }

    #[test]
    fn test_bit_position_formula() {
        let encoder = EdgeEncoder::new(2);
        assert_eq!(encoder.bit_position(c(0, 0), c(0, 1)).unwrap(), 0);
        assert_eq!(encoder.bit_position(c(0, 0), c(1, 0)).unwrap(), 1);
        assert_eq!(encoder.bit_position(c(1, 0), c(2, 0)).unwrap(), 7);
        assert_eq!(encoder.bit_position(c(2, 1), c(2, 2)).unwrap(), 14);
        assert_eq!(encoder.bit_position(c(1, 2), c(2, 2)).unwrap(), 11);
    }

    #[test]
    fn test_out_of_bounds() {
        let encoder = EdgeEncoder::new(2);
        assert!(matches!(
            encoder.bit_position(c(0, 2), c(0, 3)),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            encoder.bit_position(c(3, 0), c(3, 1)),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_invalid_edges() {
        let encoder = EdgeEncoder::new(2);
        // identical endpoints
        assert!(matches!(
            encoder.bit_position(c(1, 1), c(1, 1)),
            Err(Error::InvalidEdge { .. })
        ));
        // reversed endpoints
        assert!(matches!(
            encoder.bit_position(c(0, 1), c(0, 0)),
            Err(Error::InvalidEdge { .. })
        ));
        // diagonal
        assert!(matches!(
            encoder.bit_position(c(0, 0), c(1, 1)),
            Err(Error::InvalidEdge { .. })
        ));
        // too long
        assert!(matches!(
            encoder.bit_position(c(0, 0), c(0, 2)),
            Err(Error::InvalidEdge { .. })
        ));
    }
}
