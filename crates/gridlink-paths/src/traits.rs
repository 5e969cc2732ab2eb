use gridlink_core::Cell;

/// Payload capabilities consulted by the path search.
pub trait PathCell {
    /// Per-cell weight added to a path's value when it steps into this
    /// cell. Must be non-negative.
    fn cost(&self) -> i32;

    /// Whether the cell admits movement at all.
    ///
    /// The search itself gates movement through the caller's predicate;
    /// this is the capability most predicates read (see [`walkable_into`]).
    fn walkable(&self) -> bool;
}

/// The plain admission predicate: step into `to` only if its payload is
/// [`walkable`](PathCell::walkable). Usable directly as the `can_walk`
/// argument of [`find_path`](crate::find_path).
pub fn walkable_into<T: PathCell>(to: Cell<'_, T>, _from: Cell<'_, T>) -> bool {
    to.get().walkable()
}
