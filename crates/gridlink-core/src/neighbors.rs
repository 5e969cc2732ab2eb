//! Neighbor-selection modes and the lazy neighbor enumerator.

use crate::cell::Cell;
use crate::direction::Direction;

/// Which neighbor set [`Cell::neighbors`] walks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Neighborhood {
    /// The four cardinal neighbors, in the order Up, Down, Left, Right.
    #[default]
    Cross,
    /// The four diagonal neighbors, in the order UpLeft, UpRight,
    /// DownLeft, DownRight.
    Diagonal,
    /// Cardinal neighbors first, then diagonal.
    Round,
}

impl Neighborhood {
    /// Directions walked by this mode, in enumeration order.
    #[inline]
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Self::Cross => &Direction::CARDINAL,
            Self::Diagonal => &Direction::DIAGONAL,
            Self::Round => &Direction::ROUND,
        }
    }
}

/// Lazy iterator over the present neighbors of one cell.
///
/// Directions whose neighbor is absent are skipped. On small toroidal
/// grids two directions can resolve to the same cell; each direction still
/// yields its cell, so duplicates are possible. Consumers needing distinct
/// cells deduplicate themselves.
pub struct Neighbors<'g, T> {
    cell: Cell<'g, T>,
    dirs: std::slice::Iter<'static, Direction>,
}

impl<'g, T> Neighbors<'g, T> {
    pub(crate) fn new(cell: Cell<'g, T>, mode: Neighborhood) -> Self {
        Self {
            cell,
            dirs: mode.directions().iter(),
        }
    }
}

impl<'g, T> Iterator for Neighbors<'g, T> {
    type Item = Cell<'g, T>;

    fn next(&mut self) -> Option<Self::Item> {
        for &dir in self.dirs.by_ref() {
            if let Some(n) = self.cell.neighbor(dir) {
                return Some(n);
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.dirs.len()))
    }
}
