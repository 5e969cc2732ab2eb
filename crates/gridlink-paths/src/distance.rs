use gridlink_core::{Neighborhood, Point};

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Minimum number of steps from `a` to `b` when moving through `mode`
/// neighbors on an unobstructed flat grid; a lower bound for any path
/// [`find_path`](crate::find_path) returns there.
///
/// Diagonal-only movement flips the parity of both coordinates each step,
/// so points whose deltas differ in parity are unreachable: `None`.
/// Ignores toroidal wrap, which can only shorten paths.
pub fn min_steps(a: Point, b: Point, mode: Neighborhood) -> Option<i32> {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    match mode {
        Neighborhood::Cross => Some(dx + dy),
        Neighborhood::Round => Some(dx.max(dy)),
        Neighborhood::Diagonal => (dx % 2 == dy % 2).then_some(dx.max(dy)),
    }
}
