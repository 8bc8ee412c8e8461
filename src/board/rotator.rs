//! D4 symmetry group operations on dots and edges

use serde::{Deserialize, Serialize};

use super::coordinate::{Coordinate, Edge};
use crate::error::{Error, Result};

/// Geometric transforms of the dot grid for a board of `size × size` boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rotator {
    size: usize,
}

impl Rotator {
    pub fn new(size: usize) -> Self {
        Rotator { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Quarter turn about the board centre: `(r, c) -> (size - c, r)`.
    ///
    /// Fails with [`Error::OutOfBounds`] for a dot off the grid.
    pub fn rotate_coordinate(&self, coordinate: Coordinate) -> Result<Coordinate> {
        self.check_bounds(coordinate)?;
        Ok(self.rotate_on_grid(coordinate))
    }

    /// Mirror image: `(r, c) -> (size - r, c)`.
    ///
    /// Fails with [`Error::OutOfBounds`] for a dot off the grid.
    pub fn reflect_coordinate(&self, coordinate: Coordinate) -> Result<Coordinate> {
        self.check_bounds(coordinate)?;
        Ok(self.reflect_on_grid(coordinate))
    }

    /// Rotate both endpoints; the result keeps its lesser endpoint first.
    ///
    /// Both endpoints must lie on the grid, which holds for every edge taken
    /// from a [`Board`](super::Board) or accepted by an
    /// [`EdgeEncoder`](super::EdgeEncoder). Off-grid edges panic.
    pub fn rotate_edge(&self, edge: Edge) -> Edge {
        Edge::new(
            self.rotate_on_grid(edge.first()),
            self.rotate_on_grid(edge.second()),
        )
    }

    /// Reflect both endpoints; the result keeps its lesser endpoint first.
    ///
    /// Same precondition as [`rotate_edge`](Self::rotate_edge).
    pub fn reflect_edge(&self, edge: Edge) -> Edge {
        Edge::new(
            self.reflect_on_grid(edge.first()),
            self.reflect_on_grid(edge.second()),
        )
    }

    /// Apply a whole group element: rotate first, then reflect.
    ///
    /// Same precondition as [`rotate_edge`](Self::rotate_edge).
    pub fn transform_edge(&self, edge: Edge, transform: D4Transform) -> Edge {
        let mut edge = edge;
        for _ in 0..transform.quarter_turns {
            edge = self.rotate_edge(edge);
        }
        if transform.reflection {
            edge = self.reflect_edge(edge);
        }
        edge
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

    fn rotate_on_grid(&self, coordinate: Coordinate) -> Coordinate {
        assert!(
            coordinate.row <= self.size && coordinate.col <= self.size,
            "{coordinate} is off a grid of size {}",
            self.size
        );
        Coordinate::new(self.size - coordinate.col, coordinate.row)
    }

    fn reflect_on_grid(&self, coordinate: Coordinate) -> Coordinate {
        assert!(
            coordinate.row <= self.size && coordinate.col <= self.size,
            "{coordinate} is off a grid of size {}",
            self.size
        );
        Coordinate::new(self.size - coordinate.row, coordinate.col)
    }
}

/// D4 symmetry transformation (dihedral group of the square)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct D4Transform {
    /// Number of quarter turns (0 to 3)
    pub quarter_turns: u8,
    /// Whether to reflect after rotating
    pub reflection: bool,
}

impl D4Transform {
    pub fn identity() -> Self {
        D4Transform {
            quarter_turns: 0,
            reflection: false,
        }
    }

    /// All 8 transforms, in the order [`SymmetryImages`] yields them:
    /// each rotation followed by its reflection.
    pub fn all() -> [D4Transform; 8] {
        let mut transforms = [D4Transform::identity(); 8];
        for (index, transform) in transforms.iter_mut().enumerate() {
            transform.quarter_turns = (index / 2) as u8;
            transform.reflection = index % 2 == 1;
        }
        transforms
    }

    pub fn inverse(&self) -> D4Transform {
        if self.reflection {
            // a reflection composed with any rotation is again a reflection
            *self
        } else {
            D4Transform {
                quarter_turns: (4 - self.quarter_turns) % 4,
                reflection: false,
            }
        }
    }
}

/// Values that move under the board symmetries.
pub trait Symmetric: Clone {
    fn rotated(&self) -> Self;
    fn reflected(&self) -> Self;

    /// The 8 symmetry images in fixed order, see [`SymmetryImages`].
    fn rotations(&self) -> SymmetryImages<Self> {
        SymmetryImages::new(self.clone())
    }
}

/// Lazy sequence of the 8 images of a value:
/// `[id, reflect(id), rot, reflect(rot), rot², reflect(rot²), rot³, reflect(rot³)]`.
///
/// Each rotation is computed from the previous rotation, so only one rotated
/// copy is alive at a time. Boards and actions share this iterator, which is
/// what keeps their images positionally aligned when zipped.
#[derive(Debug, Clone)]
pub struct SymmetryImages<T> {
    current: T,
    index: usize,
}

impl<T: Symmetric> SymmetryImages<T> {
    fn new(origin: T) -> Self {
        SymmetryImages {
            current: origin,
            index: 0,
        }
    }
}

impl<T: Symmetric> Iterator for SymmetryImages<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let index = self.index;
        if index >= 8 {
            return None;
        }
        self.index += 1;

        if index % 2 == 1 {
            return Some(self.current.reflected());
        }
        if index > 0 {
            self.current = self.current.rotated();
        }
        Some(self.current.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = 8 - self.index.min(8);
        (remaining, Some(remaining))
    }
}

impl<T: Symmetric> ExactSizeIterator for SymmetryImages<T> {}
