//! The edge under evaluation, transformed in lockstep with its board

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    coordinate::{Coordinate, Edge},
    rotator::{Rotator, Symmetric},
};

/// A single candidate move.
///
/// Equality is undirected: an action built from `(a, b)` equals one built
/// from `(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Action {
    edge: Edge,
}

impl Action {
    pub fn new(edge: Edge) -> Self {
        Action { edge }
    }

    pub fn between(a: impl Into<Coordinate>, b: impl Into<Coordinate>) -> Self {
        Action {
            edge: Edge::new(a, b),
        }
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// The 8 symmetry images of this action on a board handled by `rotator`,
    /// in the same order as [`Board::rotations`](super::Board::rotations).
    pub fn rotations(&self, rotator: Rotator) -> impl ExactSizeIterator<Item = Action> + use<> {
        Oriented {
            action: *self,
            rotator,
        }
        .rotations()
        .map(|oriented| oriented.action)
    }

    pub fn rotate(&self, rotator: &Rotator) -> Action {
        Action::new(rotator.rotate_edge(self.edge))
    }

    pub fn reflect(&self, rotator: &Rotator) -> Action {
        Action::new(rotator.reflect_edge(self.edge))
    }
}

impl From<Edge> for Action {
    fn from(edge: Edge) -> Self {
        Action::new(edge)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.edge, f)
    }
}

/// An action paired with the grid it lives on, so it can be transformed
/// without a separate size argument.
#[derive(Debug, Clone, Copy)]
struct Oriented {
    action: Action,
    rotator: Rotator,
}

impl Symmetric for Oriented {
    fn rotated(&self) -> Self {
        Oriented {
            action: self.action.rotate(&self.rotator),
            rotator: self.rotator,
        }
    }

    fn reflected(&self) -> Self {
        Oriented {
            action: self.action.reflect(&self.rotator),
            rotator: self.rotator,
        }
    }
}
