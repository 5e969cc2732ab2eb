//! The [`Grid`] arena — dense payload storage plus the stored neighbor
//! link table.
//!
//! Links are flat arena indices, never owning pointers: the cardinal graph
//! is cyclic by nature, and indices keep it free of ownership cycles. The
//! link table is built in a single sequential row-major pass that writes
//! each link together with its reciprocal, so the symmetry invariant
//! (`a.right == b` iff `b.left == a`) holds after every step of the pass.
//! Payload construction is a separate phase and may be parallelized (see
//! [`Grid::new_parallel`]).

use std::sync::OnceLock;

use crate::cell::Cell;
use crate::direction::Direction;
use crate::error::GridError;
use crate::geom::Point;

// ---------------------------------------------------------------------------
// Topology
// ---------------------------------------------------------------------------

/// Edge behavior of the link graph, chosen at construction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Links stop at the edges; border cells have absent outward neighbors.
    #[default]
    Flat,
    /// Links wrap modulo width/height; every cell has four cardinal
    /// neighbors. A dimension of size 1 wraps onto itself.
    Torus,
}

// ---------------------------------------------------------------------------
// Link storage
// ---------------------------------------------------------------------------

pub(crate) const UP: usize = 0;
pub(crate) const DOWN: usize = 1;
pub(crate) const LEFT: usize = 2;
pub(crate) const RIGHT: usize = 3;

/// Stored cardinal links of one cell, indexed by `UP`..`RIGHT`.
pub(crate) type Links = [Option<usize>; 4];

pub(crate) const UP_LEFT: usize = 0;
pub(crate) const UP_RIGHT: usize = 1;
pub(crate) const DOWN_LEFT: usize = 2;
pub(crate) const DOWN_RIGHT: usize = 3;

/// Cardinal pair deriving each diagonal slot: vertical link first,
/// horizontal link as the fallback.
const CORNERS: [(usize, usize); 4] = [(UP, LEFT), (UP, RIGHT), (DOWN, LEFT), (DOWN, RIGHT)];

/// Diagonal derivation: follow the vertical link then its horizontal link;
/// only when the vertical link is absent, try horizontal-then-vertical.
/// A present vertical link with an absent horizontal continuation does
/// *not* fall through to the second form.
fn derive_corner(links: &[Links], i: usize, v: usize, h: usize) -> Option<usize> {
    match links[i][v] {
        Some(j) => links[j][h],
        None => match links[i][h] {
            Some(j) => links[j][v],
            None => None,
        },
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A `width x height` arena of cell payloads wired into a bidirectional
/// neighbor graph.
///
/// The graph shape is immutable after construction; payloads stay mutable
/// through [`get_mut`](Grid::get_mut). Diagonal links are derived from the
/// cardinal table and cached per cell with exactly-once writes, so shared
/// references can be read from multiple threads (`Grid<T>` is `Sync`
/// whenever `T` is).
#[derive(Debug)]
pub struct Grid<T> {
    width: i32,
    height: i32,
    topology: Topology,
    payload: Vec<T>,
    links: Vec<Links>,
    corners: Vec<[OnceLock<Option<usize>>; 4]>,
}

impl<T> Grid<T> {
    /// Build a grid, invoking `factory` exactly once per coordinate in
    /// row-major order.
    ///
    /// The link table is wired before the first factory call, so the
    /// [`PartialGrid`] view passed to the factory resolves neighbors of any
    /// coordinate; payloads are visible only for coordinates already built.
    pub fn new<F>(width: i32, height: i32, topology: Topology, mut factory: F) -> Result<Self, GridError>
    where
        F: FnMut(Point, &PartialGrid<'_, T>) -> T,
    {
        let len = checked_len(width, height)?;
        let links = build_links(width, height, topology, len);
        let mut payload = Vec::with_capacity(len);
        for i in 0..len {
            let view = PartialGrid {
                width,
                height,
                topology,
                links: &links,
                built: &payload,
            };
            let value = factory(point_of(i, width), &view);
            payload.push(value);
        }
        log::debug!("grid built: {width}x{height} {topology:?}, {len} cells");
        Ok(Self::assemble(width, height, topology, payload, links))
    }

    /// Build a grid with payloads evaluated in parallel.
    ///
    /// The factory must be pure per coordinate; it runs without a grid
    /// view. Link wiring still happens in the single sequential pass, which
    /// keeps reciprocal link writes race-free.
    #[cfg(feature = "parallel")]
    pub fn new_parallel<F>(
        width: i32,
        height: i32,
        topology: Topology,
        factory: F,
    ) -> Result<Self, GridError>
    where
        T: Send,
        F: Fn(Point) -> T + Sync,
    {
        use rayon::prelude::*;

        let len = checked_len(width, height)?;
        let payload: Vec<T> = (0..len)
            .into_par_iter()
            .map(|i| factory(point_of(i, width)))
            .collect();
        let links = build_links(width, height, topology, len);
        log::debug!("grid built (parallel): {width}x{height} {topology:?}, {len} cells");
        Ok(Self::assemble(width, height, topology, payload, links))
    }

    fn assemble(
        width: i32,
        height: i32,
        topology: Topology,
        payload: Vec<T>,
        links: Vec<Links>,
    ) -> Self {
        let corners = (0..payload.len()).map(|_| Default::default()).collect();
        Self {
            width,
            height,
            topology,
            payload,
            links,
            corners,
        }
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Edge behavior this grid was built with.
    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Total number of cells (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Always `false`: construction rejects zero-sized grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.index(p).is_some()
    }

    /// Handle to the cell at `p`, or `None` out of range.
    ///
    /// Lookup never wraps, regardless of topology: wrapping lives in the
    /// link table only. Repeated lookups of the same coordinate return the
    /// same cell identity.
    #[inline]
    pub fn cell(&self, p: Point) -> Option<Cell<'_, T>> {
        self.index(p).map(|i| Cell::new(self, i))
    }

    /// Payload at `p`, or `None` out of range.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&T> {
        self.index(p).map(|i| &self.payload[i])
    }

    /// Mutable payload at `p`, or `None` out of range.
    ///
    /// Payload mutation never changes the link graph.
    #[inline]
    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        let i = self.index(p)?;
        Some(&mut self.payload[i])
    }

    /// Row-major iterator over cell handles.
    pub fn iter(&self) -> Cells<'_, T> {
        Cells { grid: self, idx: 0 }
    }

    /// Row-major iterator over `(Point, &mut T)` payload pairs.
    pub fn iter_mut(&mut self) -> CellsMut<'_, T> {
        CellsMut {
            width: self.width,
            inner: self.payload.iter_mut().enumerate(),
        }
    }

    // --- internals used by Cell ---

    #[inline]
    pub(crate) fn index(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height {
            Some(index_of(p, self.width))
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn point(&self, i: usize) -> Point {
        point_of(i, self.width)
    }

    #[inline]
    pub(crate) fn payload(&self, i: usize) -> &T {
        &self.payload[i]
    }

    #[inline]
    pub(crate) fn link(&self, i: usize, slot: usize) -> Option<usize> {
        self.links[i][slot]
    }

    /// Memoized diagonal link. Computed on first read, cached in a
    /// [`OnceLock`] so concurrent readers race at most to an identical
    /// exactly-once write.
    pub(crate) fn corner(&self, i: usize, slot: usize) -> Option<usize> {
        *self.corners[i][slot].get_or_init(|| {
            let (v, h) = CORNERS[slot];
            derive_corner(&self.links, i, v, h)
        })
    }
}

// ---------------------------------------------------------------------------
// PartialGrid
// ---------------------------------------------------------------------------

/// Read-only view of a grid under construction, passed to the factory.
///
/// The link table is already complete; payloads exist only for coordinates
/// earlier in row-major order than the one being built.
pub struct PartialGrid<'a, T> {
    width: i32,
    height: i32,
    topology: Topology,
    links: &'a [Links],
    built: &'a [T],
}

impl<'a, T> PartialGrid<'a, T> {
    /// Width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Edge behavior of the grid being built.
    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.index(p).is_some()
    }

    /// Payload already produced for `p`, if any.
    pub fn get(&self, p: Point) -> Option<&'a T> {
        self.built.get(self.index(p)?)
    }

    /// Coordinate of `p`'s neighbor through the completed link table.
    ///
    /// Diagonals are derived on the fly with the same vertical-first
    /// fallback the finished grid uses; `Stay` returns `p` itself.
    pub fn neighbor_of(&self, p: Point, dir: Direction) -> Option<Point> {
        let i = self.index(p)?;
        let j = match dir {
            Direction::Stay => Some(i),
            Direction::Up => self.links[i][UP],
            Direction::Down => self.links[i][DOWN],
            Direction::Left => self.links[i][LEFT],
            Direction::Right => self.links[i][RIGHT],
            Direction::UpLeft => derive_corner(self.links, i, UP, LEFT),
            Direction::UpRight => derive_corner(self.links, i, UP, RIGHT),
            Direction::DownLeft => derive_corner(self.links, i, DOWN, LEFT),
            Direction::DownRight => derive_corner(self.links, i, DOWN, RIGHT),
        }?;
        Some(point_of(j, self.width))
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height {
            Some(index_of(p, self.width))
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Construction internals
// ---------------------------------------------------------------------------

fn checked_len(width: i32, height: i32) -> Result<usize, GridError> {
    if width <= 0 || height <= 0 {
        return Err(GridError::InvalidSize { width, height });
    }
    let total = width as i64 * height as i64;
    if total > i32::MAX as i64 {
        return Err(GridError::TooLarge { width, height });
    }
    Ok(total as usize)
}

/// Single sequential row-major pass. Each step resolves the cell's Up and
/// Left links and writes the reciprocal Down/Right links in the same step,
/// so every edge is written exactly once and symmetry holds throughout.
fn build_links(width: i32, height: i32, topology: Topology, len: usize) -> Vec<Links> {
    let mut links: Vec<Links> = vec![[None; 4]; len];
    for i in 0..len {
        let p = point_of(i, width);
        if let Some(u) = step(p, 0, -1, width, height, topology) {
            let ui = index_of(u, width);
            links[i][UP] = Some(ui);
            links[ui][DOWN] = Some(i);
        }
        if let Some(l) = step(p, -1, 0, width, height, topology) {
            let li = index_of(l, width);
            links[i][LEFT] = Some(li);
            links[li][RIGHT] = Some(i);
        }
    }
    links
}

fn step(p: Point, dx: i32, dy: i32, width: i32, height: i32, topology: Topology) -> Option<Point> {
    let q = p.shift(dx, dy);
    match topology {
        Topology::Flat => {
            (q.x >= 0 && q.x < width && q.y >= 0 && q.y < height).then_some(q)
        }
        Topology::Torus => Some(Point::new(q.x.rem_euclid(width), q.y.rem_euclid(height))),
    }
}

#[inline]
fn point_of(i: usize, width: i32) -> Point {
    Point::new(i as i32 % width, i as i32 / width)
}

#[inline]
fn index_of(p: Point, width: i32) -> usize {
    (p.y * width + p.x) as usize
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Row-major iterator over the cell handles of a [`Grid`].
pub struct Cells<'g, T> {
    grid: &'g Grid<T>,
    idx: usize,
}

impl<'g, T> Iterator for Cells<'g, T> {
    type Item = Cell<'g, T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.grid.len() {
            return None;
        }
        let cell = Cell::new(self.grid, self.idx);
        self.idx += 1;
        Some(cell)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.grid.len() - self.idx;
        (rest, Some(rest))
    }
}

impl<T> ExactSizeIterator for Cells<'_, T> {}

/// Row-major iterator over `(Point, &mut T)` payload pairs.
pub struct CellsMut<'g, T> {
    width: i32,
    inner: std::iter::Enumerate<std::slice::IterMut<'g, T>>,
}

impl<'g, T> Iterator for CellsMut<'g, T> {
    type Item = (Point, &'g mut T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (i, value) = self.inner.next()?;
        Some((point_of(i, self.width), value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for CellsMut<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn unit_grid(w: i32, h: i32, topology: Topology) -> Grid<()> {
        Grid::new(w, h, topology, |_, _| ()).unwrap()
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn rejects_non_positive_dimensions() {
        assert_eq!(
            Grid::<()>::new(0, 5, Topology::Flat, |_, _| ()).unwrap_err(),
            GridError::InvalidSize { width: 0, height: 5 }
        );
        assert_eq!(
            Grid::<()>::new(3, -1, Topology::Torus, |_, _| ()).unwrap_err(),
            GridError::InvalidSize { width: 3, height: -1 }
        );
    }

    #[test]
    fn rejects_oversized_dimensions() {
        assert_eq!(
            Grid::<()>::new(i32::MAX, 2, Topology::Flat, |_, _| ()).unwrap_err(),
            GridError::TooLarge {
                width: i32::MAX,
                height: 2
            }
        );
    }

    #[test]
    fn factory_runs_once_per_coordinate_in_row_major_order() {
        let mut seen = Vec::new();
        let grid = Grid::new(3, 2, Topology::Flat, |pos, _| {
            seen.push(pos);
            0u8
        })
        .unwrap();
        assert_eq!(grid.len(), 6);
        assert_eq!(
            seen,
            vec![p(0, 0), p(1, 0), p(2, 0), p(0, 1), p(1, 1), p(2, 1)]
        );
    }

    #[test]
    fn factory_view_resolves_links_and_built_prefix() {
        // Payload = number of present cardinal links, read through the view.
        let grid = Grid::new(3, 3, Topology::Flat, |pos, view| {
            if pos != p(0, 0) {
                // Earlier coordinates are visible, the current one is not.
                assert!(view.get(p(0, 0)).is_some());
            }
            assert!(view.get(pos).is_none());
            Direction::CARDINAL
                .iter()
                .filter(|&&d| view.neighbor_of(pos, d).is_some())
                .count() as u32
        })
        .unwrap();
        assert_eq!(*grid.get(p(0, 0)).unwrap(), 2);
        assert_eq!(*grid.get(p(1, 0)).unwrap(), 3);
        assert_eq!(*grid.get(p(1, 1)).unwrap(), 4);
        assert_eq!(*grid.get(p(2, 2)).unwrap(), 2);
    }

    #[test]
    fn factory_view_wraps_on_torus() {
        let grid = Grid::new(3, 3, Topology::Torus, |pos, view| {
            view.neighbor_of(pos, Direction::Up).unwrap()
        })
        .unwrap();
        assert_eq!(*grid.get(p(0, 0)).unwrap(), p(0, 2));
        assert_eq!(*grid.get(p(1, 2)).unwrap(), p(1, 1));
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    #[test]
    fn lookup_in_and_out_of_bounds() {
        let grid = unit_grid(4, 3, Topology::Flat);
        assert!(grid.cell(p(0, 0)).is_some());
        assert!(grid.cell(p(3, 2)).is_some());
        assert!(grid.cell(p(-1, 0)).is_none());
        assert!(grid.cell(p(0, -1)).is_none());
        assert!(grid.cell(p(4, 0)).is_none());
        assert!(grid.cell(p(0, 3)).is_none());
    }

    #[test]
    fn lookup_never_wraps_even_on_torus() {
        let grid = unit_grid(4, 3, Topology::Torus);
        assert!(grid.cell(p(-1, 0)).is_none());
        assert!(grid.cell(p(4, 2)).is_none());
    }

    #[test]
    fn repeated_lookup_returns_same_identity() {
        let grid = unit_grid(4, 3, Topology::Flat);
        let a = grid.cell(p(2, 1)).unwrap();
        let b = grid.cell(p(2, 1)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.index(), b.index());
        assert!(std::ptr::eq(a.get(), b.get()));
    }

    // -----------------------------------------------------------------------
    // Link graph
    // -----------------------------------------------------------------------

    #[test]
    fn flat_edges_are_absent() {
        let grid = unit_grid(4, 3, Topology::Flat);
        let corner = grid.cell(p(0, 0)).unwrap();
        assert!(corner.up().is_none());
        assert!(corner.left().is_none());
        assert_eq!(corner.down().unwrap().pos(), p(0, 1));
        assert_eq!(corner.right().unwrap().pos(), p(1, 0));
        let far = grid.cell(p(3, 2)).unwrap();
        assert!(far.down().is_none());
        assert!(far.right().is_none());
    }

    #[test]
    fn torus_wraps_both_axes() {
        let grid = unit_grid(4, 3, Topology::Torus);
        let origin = grid.cell(p(0, 0)).unwrap();
        assert_eq!(origin.up(), grid.cell(p(0, 2)));
        assert_eq!(origin.left(), grid.cell(p(3, 0)));
        assert_eq!(origin.down(), grid.cell(p(0, 1)));
        assert_eq!(origin.right(), grid.cell(p(1, 0)));
    }

    #[test]
    fn unit_torus_links_to_itself() {
        let grid = unit_grid(1, 1, Topology::Torus);
        let only = grid.cell(p(0, 0)).unwrap();
        assert_eq!(only.up(), Some(only));
        assert_eq!(only.down(), Some(only));
        assert_eq!(only.left(), Some(only));
        assert_eq!(only.right(), Some(only));
    }

    #[test]
    fn unit_flat_grid_has_no_links() {
        let grid = unit_grid(1, 1, Topology::Flat);
        let only = grid.cell(p(0, 0)).unwrap();
        assert!(only.up().is_none());
        assert!(only.down().is_none());
        assert!(only.left().is_none());
        assert!(only.right().is_none());
    }

    // -----------------------------------------------------------------------
    // Payload access and iteration
    // -----------------------------------------------------------------------

    #[test]
    fn payload_mutation_keeps_graph_intact() {
        let mut grid = Grid::new(2, 2, Topology::Flat, |pos, _| pos.x + pos.y).unwrap();
        *grid.get_mut(p(1, 1)).unwrap() = 99;
        assert_eq!(*grid.get(p(1, 1)).unwrap(), 99);
        assert_eq!(
            grid.cell(p(0, 1)).unwrap().right().map(|c| *c.get()),
            Some(99)
        );
    }

    #[test]
    fn iteration_is_row_major() {
        let grid = Grid::new(3, 2, Topology::Flat, |pos, _| pos).unwrap();
        let positions: Vec<Point> = grid.iter().map(|c| c.pos()).collect();
        assert_eq!(
            positions,
            vec![p(0, 0), p(1, 0), p(2, 0), p(0, 1), p(1, 1), p(2, 1)]
        );
        assert_eq!(grid.iter().len(), 6);
    }

    #[test]
    fn iter_mut_reaches_every_payload() {
        let mut grid = Grid::new(3, 2, Topology::Flat, |_, _| 0i32).unwrap();
        for (pos, value) in grid.iter_mut() {
            *value = pos.x * 10 + pos.y;
        }
        assert_eq!(*grid.get(p(2, 1)).unwrap(), 21);
        assert_eq!(*grid.get(p(0, 0)).unwrap(), 0);
    }

    #[test]
    fn len_and_is_empty() {
        let grid = unit_grid(4, 3, Topology::Flat);
        assert_eq!(grid.len(), 12);
        assert!(!grid.is_empty());
    }

    #[test]
    fn grid_and_cell_are_send_sync() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<Grid<i32>>();
        assert_send_sync::<Cell<'static, i32>>();
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_construction_matches_sequential() {
        let seq = Grid::new(16, 9, Topology::Torus, |pos, _| pos.x * 31 + pos.y).unwrap();
        let par = Grid::new_parallel(16, 9, Topology::Torus, |pos| pos.x * 31 + pos.y).unwrap();
        for cell in seq.iter() {
            let other = par.cell(cell.pos()).unwrap();
            assert_eq!(cell.get(), other.get());
            assert_eq!(
                cell.up().map(|c| c.pos()),
                other.up().map(|c| c.pos())
            );
        }
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    fn arb_topology() -> impl Strategy<Value = Topology> {
        prop_oneof![Just(Topology::Flat), Just(Topology::Torus)]
    }

    proptest! {
        #[test]
        fn links_are_symmetric(
            w in 1i32..8,
            h in 1i32..8,
            topology in arb_topology(),
        ) {
            let grid = unit_grid(w, h, topology);
            for cell in grid.iter() {
                if let Some(n) = cell.up() {
                    prop_assert_eq!(n.down(), Some(cell));
                }
                if let Some(n) = cell.down() {
                    prop_assert_eq!(n.up(), Some(cell));
                }
                if let Some(n) = cell.left() {
                    prop_assert_eq!(n.right(), Some(cell));
                }
                if let Some(n) = cell.right() {
                    prop_assert_eq!(n.left(), Some(cell));
                }
            }
        }

        #[test]
        fn lookup_matches_bounds(
            w in 1i32..8,
            h in 1i32..8,
            topology in arb_topology(),
            x in -4i32..12,
            y in -4i32..12,
        ) {
            let grid = unit_grid(w, h, topology);
            let inside = x >= 0 && y >= 0 && x < w && y < h;
            prop_assert_eq!(grid.cell(Point::new(x, y)).is_some(), inside);
            prop_assert_eq!(grid.contains(Point::new(x, y)), inside);
        }

        #[test]
        fn torus_cells_have_four_neighbors(
            w in 1i32..8,
            h in 1i32..8,
        ) {
            let grid = unit_grid(w, h, Topology::Torus);
            for cell in grid.iter() {
                prop_assert!(cell.up().is_some());
                prop_assert!(cell.down().is_some());
                prop_assert!(cell.left().is_some());
                prop_assert!(cell.right().is_some());
            }
        }
    }
}
