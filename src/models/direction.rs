use std::fmt;
use crate::models::Vector3;

/// One of the six world-axis probe directions.
///
/// The declaration order is the order in which contacts are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardinalDirection {
    /// +X
    Right,
    /// -X
    Left,
    /// +Y
    Up,
    /// -Y
    Down,
    /// +Z
    Front,
    /// -Z
    Back,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 6] = [
        CardinalDirection::Right,
        CardinalDirection::Left,
        CardinalDirection::Up,
        CardinalDirection::Down,
        CardinalDirection::Front,
        CardinalDirection::Back,
    ];

    /// Slot of this direction in a six-entry table.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// # Example
    /// ```
    /// use rs_point_physics::models::{CardinalDirection, Vector3};
    ///
    /// assert_eq!(CardinalDirection::Down.unit_vector(), Vector3::new(0.0, -1.0, 0.0));
    /// ```
    pub fn unit_vector(self) -> Vector3 {
        match self {
            CardinalDirection::Right => Vector3::new(1.0, 0.0, 0.0),
            CardinalDirection::Left => Vector3::new(-1.0, 0.0, 0.0),
            CardinalDirection::Up => Vector3::new(0.0, 1.0, 0.0),
            CardinalDirection::Down => Vector3::new(0.0, -1.0, 0.0),
            CardinalDirection::Front => Vector3::new(0.0, 0.0, 1.0),
            CardinalDirection::Back => Vector3::new(0.0, 0.0, -1.0),
        }
    }

    pub fn opposite(self) -> CardinalDirection {
        match self {
            CardinalDirection::Right => CardinalDirection::Left,
            CardinalDirection::Left => CardinalDirection::Right,
            CardinalDirection::Up => CardinalDirection::Down,
            CardinalDirection::Down => CardinalDirection::Up,
            CardinalDirection::Front => CardinalDirection::Back,
            CardinalDirection::Back => CardinalDirection::Front,
        }
    }
}

impl fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            CardinalDirection::Right => "+x",
            CardinalDirection::Left => "-x",
            CardinalDirection::Up => "+y",
            CardinalDirection::Down => "-y",
            CardinalDirection::Front => "+z",
            CardinalDirection::Back => "-z",
        };
        write!(f, "{}", name)
    }
}
