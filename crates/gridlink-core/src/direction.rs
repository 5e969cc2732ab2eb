//! Movement directions on the grid.

use std::cmp::Ordering::{Equal, Greater, Less};
use std::fmt;

use crate::geom::Point;

/// One of the eight compass directions, or [`Stay`](Direction::Stay).
///
/// `Up` is negative Y (screen coordinates). The enumeration is closed:
/// there is no invalid direction value to guard against at runtime.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    #[default]
    Stay,
}

impl Direction {
    /// The four cardinal directions, in enumeration order.
    pub const CARDINAL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The four diagonal directions, in enumeration order.
    pub const DIAGONAL: [Self; 4] = [Self::UpLeft, Self::UpRight, Self::DownLeft, Self::DownRight];

    /// Cardinal directions followed by diagonal directions.
    pub const ROUND: [Self; 8] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::UpLeft,
        Self::UpRight,
        Self::DownLeft,
        Self::DownRight,
    ];

    /// Unit coordinate delta of one step along `self`.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Self::Up => Point::new(0, -1),
            Self::Down => Point::new(0, 1),
            Self::Left => Point::new(-1, 0),
            Self::Right => Point::new(1, 0),
            Self::UpLeft => Point::new(-1, -1),
            Self::UpRight => Point::new(1, -1),
            Self::DownLeft => Point::new(-1, 1),
            Self::DownRight => Point::new(1, 1),
            Self::Stay => Point::ZERO,
        }
    }

    /// The direction pointing the opposite way. `Stay` is its own opposite.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::UpLeft => Self::DownRight,
            Self::UpRight => Self::DownLeft,
            Self::DownLeft => Self::UpRight,
            Self::DownRight => Self::UpLeft,
            Self::Stay => Self::Stay,
        }
    }

    /// Direction from `from` to `to`, derived from the signs of the
    /// coordinate delta.
    ///
    /// Only the signs matter: `(0, 0)` to `(5, 2)` is `DownRight`. Callers
    /// stepping across a torus seam therefore see the long-way-round
    /// direction of the raw coordinates.
    pub fn between(from: Point, to: Point) -> Self {
        let d = to - from;
        match (d.x.cmp(&0), d.y.cmp(&0)) {
            (Less, Less) => Self::UpLeft,
            (Less, Equal) => Self::Left,
            (Less, Greater) => Self::DownLeft,
            (Equal, Less) => Self::Up,
            (Equal, Equal) => Self::Stay,
            (Equal, Greater) => Self::Down,
            (Greater, Less) => Self::UpRight,
            (Greater, Equal) => Self::Right,
            (Greater, Greater) => Self::DownRight,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::UpLeft => "up-left",
            Self::UpRight => "up-right",
            Self::DownLeft => "down-left",
            Self::DownRight => "down-right",
            Self::Stay => "stay",
        };
        f.write_str(name)
    }
}
