//! Packed edge-occupancy bit-vector for one board state

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use super::{
    coordinate::Edge,
    encoder::EdgeEncoder,
    rotator::{Rotator, Symmetric, SymmetryImages},
};
use crate::error::Result;

const WORD_BITS: usize = 64;

/// The set of drawn edges on a board of `size × size` boxes.
///
/// Bit `i` is set when the edge at encoder position `i` has been drawn. Two
/// boards are equal when their sizes and all bits match.
///
/// Boards are totally ordered by the unsigned integer whose bit `i` is bit `i`
/// of the vector. That integer is the board's hash value in the canonical
/// sense: the canonical image of a board is the one with the smallest value.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    words: Vec<u64>,
}

impl Board {
    /// An empty board
    pub fn empty(size: usize) -> Self {
        let bits = EdgeEncoder::new(size).num_bits();
        Board {
            size,
            words: vec![0; bits.div_ceil(WORD_BITS)],
        }
    }

    /// Build a board with the given edges drawn.
    ///
    /// Input order does not matter and repeated edges are harmless.
    pub fn new(size: usize, taken_edges: &[Edge]) -> Result<Self> {
        let mut board = Board::empty(size);
        for edge in taken_edges {
            board.take(edge)?;
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn encoder(&self) -> EdgeEncoder {
        EdgeEncoder::new(self.size)
    }

    pub fn rotator(&self) -> Rotator {
        Rotator::new(self.size)
    }

    /// Mark an edge as drawn
    pub fn take(&mut self, edge: &Edge) -> Result<()> {
        let position = self.encoder().edge_position(edge)?;
        self.set_bit(position);
        Ok(())
    }

    /// Whether an edge has been drawn
    pub fn is_taken(&self, edge: &Edge) -> Result<bool> {
        let position = self.encoder().edge_position(edge)?;
        Ok(self.bit(position))
    }

    /// Number of drawn edges
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Whether every legal edge has been drawn
    pub fn is_full(&self) -> bool {
        self.count() == self.encoder().num_edges()
    }

    /// The drawn edges, in encoder order.
    pub fn taken_edges(&self) -> Vec<Edge> {
        let encoder = self.encoder();
        encoder
            .edges()
            .filter(|edge| self.bit(encoder.bit_position_unchecked(edge.first(), edge.second())))
            .collect()
    }

    /// The edges not yet drawn, in encoder order.
    pub fn free_edges(&self) -> Vec<Edge> {
        let encoder = self.encoder();
        encoder
            .edges()
            .filter(|edge| !self.bit(encoder.bit_position_unchecked(edge.first(), edge.second())))
            .collect()
    }

    /// The 8 symmetry images of this board, identity first.
    pub fn rotations(&self) -> SymmetryImages<Board> {
        Symmetric::rotations(self)
    }

    /// Quarter-turn image of this board.
    ///
    /// Bits cannot simply be permuted because the rightward/downward slot
    /// assignment changes with orientation, so each drawn edge is moved
    /// geometrically and re-encoded.
    pub fn rotate(&self) -> Board {
        let rotator = self.rotator();
        self.map_edges(|edge| rotator.rotate_edge(edge))
    }

    /// Mirror image of this board.
    pub fn reflect(&self) -> Board {
        let rotator = self.rotator();
        self.map_edges(|edge| rotator.reflect_edge(edge))
    }

    fn map_edges(&self, transform: impl Fn(Edge) -> Edge) -> Board {
        let encoder = self.encoder();
        let mut image = Board::empty(self.size);
        for edge in self.taken_edges() {
            let moved = transform(edge);
            image.set_bit(encoder.bit_position_unchecked(moved.first(), moved.second()));
        }
        image
    }

    fn bit(&self, position: usize) -> bool {
        self.words[position / WORD_BITS] & (1u64 << (position % WORD_BITS)) != 0
    }

    fn set_bit(&mut self, position: usize) {
        self.words[position / WORD_BITS] |= 1u64 << (position % WORD_BITS);
    }
}

impl Symmetric for Board {
    fn rotated(&self) -> Self {
        self.rotate()
    }

    fn reflected(&self) -> Self {
        self.reflect()
    }
}

impl Ord for Board {
    fn cmp(&self, other: &Self) -> Ordering {
        // most significant word first
        self.size.cmp(&other.size).then_with(|| {
            self.words
                .iter()
                .rev()
                .cmp(other.words.iter().rev())
        })
    }
}

impl PartialOrd for Board {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits: String = (0..self.encoder().num_bits())
            .map(|p| if self.bit(p) { '1' } else { '0' })
            .collect();
        f.debug_struct("Board")
            .field("size", &self.size)
            .field("bits", &bits)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::error::Error;

    fn edge(a: (usize, usize), b: (usize, usize)) -> Edge {
        Edge::new(a, b)
    }

    fn sample_edges() -> Vec<Edge> {
        vec![
            edge((0, 0), (1, 0)),
            edge((0, 1), (0, 2)),
            edge((0, 2), (1, 2)),
            edge((1, 0), (1, 1)),
            edge((1, 2), (2, 2)),
            edge((2, 0), (2, 1)),
        ]
    }

    #[test]
    fn test_new_sets_one_bit_per_edge() {
        let board = Board::new(2, &sample_edges()).unwrap();
        assert_eq!(board.count(), 6);
        assert!(board.is_taken(&edge((0, 0), (1, 0))).unwrap());
        assert!(!board.is_taken(&edge((0, 0), (0, 1))).unwrap());
    }

    #[test]
    fn test_input_order_and_duplicates_are_irrelevant() {
        let mut edges = sample_edges();
        let forward = Board::new(2, &edges).unwrap();
        edges.reverse();
        edges.push(edge((0, 0), (1, 0)));
        let backward = Board::new(2, &edges).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_taken_edges_round_trip() {
        let edges = sample_edges();
        let board = Board::new(2, &edges).unwrap();
        let taken = board.taken_edges();
        assert_eq!(taken.len(), edges.len());
        let expected: HashSet<Edge> = edges.into_iter().collect();
        let actual: HashSet<Edge> = taken.into_iter().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_free_and_taken_partition_all_edges() {
        let board = Board::new(2, &sample_edges()).unwrap();
        assert_eq!(
            board.free_edges().len() + board.taken_edges().len(),
            board.encoder().num_edges()
        );
    }

    #[test]
    fn test_rejects_illegal_edges() {
        assert!(matches!(
            Board::new(2, &[edge((0, 2), (0, 3))]),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            Board::new(2, &[edge((0, 0), (1, 1))]),
            Err(Error::InvalidEdge { .. })
        ));
    }

    #[test]
    fn test_rotations_preserve_bit_count() {
        let board = Board::new(2, &sample_edges()).unwrap();
        let images: Vec<Board> = board.rotations().collect();
        assert_eq!(images.len(), 8);
        for image in &images {
            assert_eq!(image.count(), board.count());
            assert_eq!(image.taken_edges().len(), board.count());
        }
        assert_eq!(images[0], board);
    }

    #[test]
    fn test_four_rotations_return_original() {
        let board = Board::new(3, &[edge((0, 0), (0, 1)), edge((2, 3), (3, 3))]).unwrap();
        let back = board.rotate().rotate().rotate().rotate();
        assert_eq!(back, board);
        assert_eq!(board.reflect().reflect(), board);
    }

    #[test]
    fn test_rotation_matches_edge_rotation() {
        let board = Board::new(2, &[edge((0, 1), (1, 1)), edge((2, 1), (2, 2))]).unwrap();
        let expected = Board::new(2, &[edge((1, 0), (1, 1)), edge((0, 2), (1, 2))]).unwrap();
        assert_eq!(board.rotate(), expected);
    }

    #[test]
    fn test_ordering_follows_integer_value() {
        let low = Board::new(3, &[edge((0, 0), (0, 1))]).unwrap();
        let high = Board::new(3, &[edge((3, 2), (3, 3))]).unwrap();
        let both = Board::new(3, &[edge((0, 0), (0, 1)), edge((3, 2), (3, 3))]).unwrap();
        assert!(Board::empty(3) < low);
        assert!(low < high);
        assert!(high < both);
    }

    #[test]
    fn test_large_board_spans_several_words() {
        let board = Board::new(6, &[edge((6, 5), (6, 6))]).unwrap();
        assert_eq!(board.count(), 1);
        assert_eq!(board.taken_edges(), vec![edge((6, 5), (6, 6))]);
        assert!(Board::empty(6) < board);
    }
}
