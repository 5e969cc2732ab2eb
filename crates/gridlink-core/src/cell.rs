//! The [`Cell`] handle — a copyable, non-owning view of one grid slot.
//!
//! A handle is a grid reference plus a flat arena index. Equality is
//! identity: two handles are equal when they name the same slot of the
//! same grid. The grid exclusively owns all cells; handles only traverse.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::direction::Direction;
use crate::geom::Point;
use crate::grid::{DOWN, DOWN_LEFT, DOWN_RIGHT, Grid, LEFT, RIGHT, UP, UP_LEFT, UP_RIGHT};
use crate::neighbors::{Neighborhood, Neighbors};

/// Handle to one cell of a [`Grid`].
pub struct Cell<'g, T> {
    grid: &'g Grid<T>,
    idx: usize,
}

impl<'g, T> Cell<'g, T> {
    #[inline]
    pub(crate) fn new(grid: &'g Grid<T>, idx: usize) -> Self {
        Self { grid, idx }
    }

    /// Position of this cell.
    #[inline]
    pub fn pos(self) -> Point {
        self.grid.point(self.idx)
    }

    /// X coordinate.
    #[inline]
    pub fn x(self) -> i32 {
        self.pos().x
    }

    /// Y coordinate.
    #[inline]
    pub fn y(self) -> i32 {
        self.pos().y
    }

    /// Flat row-major index; stable for the grid's lifetime.
    #[inline]
    pub fn index(self) -> usize {
        self.idx
    }

    /// The grid this handle points into.
    #[inline]
    pub fn grid(self) -> &'g Grid<T> {
        self.grid
    }

    /// Payload of this cell.
    #[inline]
    pub fn get(self) -> &'g T {
        self.grid.payload(self.idx)
    }

    // --- stored cardinal links ---

    /// Neighbor above, if linked.
    #[inline]
    pub fn up(self) -> Option<Self> {
        self.cardinal(UP)
    }

    /// Neighbor below, if linked.
    #[inline]
    pub fn down(self) -> Option<Self> {
        self.cardinal(DOWN)
    }

    /// Neighbor to the left, if linked.
    #[inline]
    pub fn left(self) -> Option<Self> {
        self.cardinal(LEFT)
    }

    /// Neighbor to the right, if linked.
    #[inline]
    pub fn right(self) -> Option<Self> {
        self.cardinal(RIGHT)
    }

    // --- derived diagonal links ---

    /// Upper-left neighbor: `up()`'s left when `up()` is present, otherwise
    /// `left()`'s up. Computed once and cached.
    ///
    /// The first present cardinal decides; a present `up()` whose own left
    /// link is absent yields `None` without consulting `left()`. Near flat
    /// edges this is a deliberate approximation, not a geometric truth.
    #[inline]
    pub fn up_left(self) -> Option<Self> {
        self.corner(UP_LEFT)
    }

    /// Upper-right neighbor, derived like [`up_left`](Cell::up_left) from
    /// `up()` then `right()`.
    #[inline]
    pub fn up_right(self) -> Option<Self> {
        self.corner(UP_RIGHT)
    }

    /// Lower-left neighbor, derived from `down()` then `left()`.
    #[inline]
    pub fn down_left(self) -> Option<Self> {
        self.corner(DOWN_LEFT)
    }

    /// Lower-right neighbor, derived from `down()` then `right()`.
    #[inline]
    pub fn down_right(self) -> Option<Self> {
        self.corner(DOWN_RIGHT)
    }

    /// Neighbor along `dir`. [`Direction::Stay`] returns the cell itself.
    pub fn neighbor(self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::Stay => Some(self),
            Direction::Up => self.up(),
            Direction::Down => self.down(),
            Direction::Left => self.left(),
            Direction::Right => self.right(),
            Direction::UpLeft => self.up_left(),
            Direction::UpRight => self.up_right(),
            Direction::DownLeft => self.down_left(),
            Direction::DownRight => self.down_right(),
        }
    }

    /// Lazy enumeration of present neighbors in `mode`'s fixed order.
    #[inline]
    pub fn neighbors(self, mode: Neighborhood) -> Neighbors<'g, T> {
        Neighbors::new(self, mode)
    }

    #[inline]
    fn cardinal(self, slot: usize) -> Option<Self> {
        self.grid.link(self.idx, slot).map(|j| Self::new(self.grid, j))
    }

    #[inline]
    fn corner(self, slot: usize) -> Option<Self> {
        self.grid.corner(self.idx, slot).map(|j| Self::new(self.grid, j))
    }
}

// Manual impls: a derive would demand the same bound of `T`, but handles
// copy and compare regardless of the payload type.

impl<T> Copy for Cell<'_, T> {}

impl<T> Clone for Cell<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Cell<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.grid, other.grid) && self.idx == other.idx
    }
}

impl<T> Eq for Cell<'_, T> {}

impl<T> Hash for Cell<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.grid, state);
        self.idx.hash(state);
    }
}

impl<T> fmt::Debug for Cell<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell").field("pos", &self.pos()).finish()
    }
}
