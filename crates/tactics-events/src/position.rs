//! Board Geometry
//!
//! Grid positions, compass directions and the Chebyshev metric shared by
//! vision range and movement adjacency.
//!
//! # Example
//!
//! ```
//! use tactics_events::{distance, Direction, Position};
//!
//! let from = Position::new(6, 2);
//! let to = Position::new(12, 10);
//! assert_eq!(distance(from, to), 8);
//! assert_eq!(Direction::from_positions(from, to), Direction::new(1, 1));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell on the board. Origin is top-left, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position one step away in `direction`.
    pub fn offset(self, direction: Direction) -> Self {
        Self::new(self.x + direction.dx, self.y + direction.dy)
    }

    /// Returns true if the position lies on a square board of `size` cells per side.
    pub fn in_bounds(self, size: i32) -> bool {
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }

    /// Chebyshev distance to another position.
    pub fn distance_to(self, other: Position) -> i32 {
        distance(self, other)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A unit step on the board; each axis is -1, 0 or 1 for compass moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    /// The eight compass directions, x-major then y, zero vector excluded.
    pub const COMPASS: [Direction; 8] = [
        Direction::new(-1, -1),
        Direction::new(-1, 0),
        Direction::new(-1, 1),
        Direction::new(0, -1),
        Direction::new(0, 1),
        Direction::new(1, -1),
        Direction::new(1, 0),
        Direction::new(1, 1),
    ];

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Per-axis sign of the vector from `from` to `to`.
    pub fn from_positions(from: Position, to: Position) -> Self {
        Self::new((to.x - from.x).signum(), (to.y - from.y).signum())
    }

    pub fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.dx, self.dy)
    }
}

/// Chebyshev distance: the larger of the two axis deltas.
pub fn distance(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Every position within Chebyshev `radius` of `center`, center excluded.
///
/// Ordered x-major then y. Positions may fall off the board; callers filter
/// with [`Position::in_bounds`].
pub fn generate_movements(center: Position, radius: i32) -> impl Iterator<Item = Position> {
    (-radius..=radius).flat_map(move |mx| {
        (-radius..=radius)
            .filter(move |&my| mx != 0 || my != 0)
            .map(move |my| Position::new(center.x + mx, center.y + my))
    })
}
