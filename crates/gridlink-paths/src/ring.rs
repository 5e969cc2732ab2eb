//! Ring and disc enumeration around a cell.

use gridlink_core::Cell;
use rustc_hash::FxHashSet;

/// Mirror offsets emitted for octant state `(x, y)`, in emission order.
#[inline]
fn mirrors(x: i32, y: i32) -> [(i32, i32); 8] {
    [
        (x, y),
        (x, -y),
        (-x, y),
        (-x, -y),
        (y, x),
        (y, -x),
        (-y, x),
        (-y, -x),
    ]
}

/// Cells approximating the discrete circle of `radius` around `center`.
///
/// One octant is walked with a Bresenham-style integer decision variable
/// and mirrored eight ways; the output shape is the recurrence's, not a
/// Euclidean distance test. Within one call every cell is distinct and the
/// center itself never yields. Mirror points outside the grid are clipped;
/// lookups never wrap, so rings clip at the edges of toroidal grids too.
/// `radius <= 0` yields nothing.
///
/// The iterator is lazy and single-use: once exhausted it stays empty.
pub fn ring<T>(center: Cell<'_, T>, radius: i32) -> Ring<'_, T> {
    let mut seen = FxHashSet::default();
    seen.insert(center.index());
    Ring {
        center,
        radius,
        x: 0,
        y: radius,
        d: radius - 1,
        k: 0,
        seen,
    }
}

/// Lazy ring iterator produced by [`ring`].
pub struct Ring<'g, T> {
    center: Cell<'g, T>,
    radius: i32,
    x: i32,
    y: i32,
    d: i32,
    k: usize,
    seen: FxHashSet<usize>,
}

impl<'g, T> Iterator for Ring<'g, T> {
    type Item = Cell<'g, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let grid = self.center.grid();
        let origin = self.center.pos();
        while self.y >= self.x {
            let batch = mirrors(self.x, self.y);
            while self.k < batch.len() {
                let (dx, dy) = batch[self.k];
                self.k += 1;
                let Some(cell) = grid.cell(origin.shift(dx, dy)) else {
                    continue;
                };
                if self.seen.insert(cell.index()) {
                    return Some(cell);
                }
            }
            self.k = 0;
            if self.d >= 2 * (self.x - 1) {
                self.d -= 2 * self.x;
                self.x += 1;
            } else if self.d <= 2 * (self.radius - self.y) {
                self.d += 2 * self.y - 1;
                self.y -= 1;
            } else {
                self.d += 2 * (self.y - self.x - 1);
                self.y -= 1;
                self.x += 1;
            }
        }
        None
    }
}

/// Cells within `radius` of `center`: the union of [`ring`]s for radii
/// `radius` down to 1, deduplicated across the whole call so a cell
/// reachable at several radii yields once, on first encounter.
/// `radius <= 0` yields nothing; the center never does.
pub fn disc<T>(center: Cell<'_, T>, radius: i32) -> Disc<'_, T> {
    Disc {
        center,
        next_radius: radius,
        current: None,
        seen: FxHashSet::default(),
    }
}

/// Lazy disc iterator produced by [`disc`].
pub struct Disc<'g, T> {
    center: Cell<'g, T>,
    next_radius: i32,
    current: Option<Ring<'g, T>>,
    seen: FxHashSet<usize>,
}

impl<'g, T> Iterator for Disc<'g, T> {
    type Item = Cell<'g, T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(cur) = &mut self.current {
                for cell in cur {
                    if self.seen.insert(cell.index()) {
                        return Some(cell);
                    }
                }
                self.current = None;
            }
            if self.next_radius < 1 {
                return None;
            }
            self.current = Some(ring(self.center, self.next_radius));
            self.next_radius -= 1;
        }
    }
}
