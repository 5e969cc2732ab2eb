//! Graph queries over linked-cell grids.
//!
//! This crate builds three query families on top of the `gridlink-core`
//! neighbor graph:
//!
//! - **Ring enumeration** ([`ring`]) — the discrete circle of integer
//!   radius around a cell, rasterized with an octant-mirrored decision
//!   variable.
//! - **Disc enumeration** ([`disc`]) — the union of rings out to a radius,
//!   each cell yielded once.
//! - **Path search** ([`find_path`]) — a depth-first cost-relaxation
//!   search that commits to the first branch reaching the goal. Not
//!   Dijkstra or A*; see the [`search`](find_path) docs.
//!
//! All queries read an immutable grid and keep their working state
//! call-local, so independent queries may run concurrently over the same
//! grid.

mod distance;
mod ring;
mod search;
mod traits;

pub use distance::{chebyshev, manhattan, min_steps};
pub use ring::{Disc, Ring, disc, ring};
pub use search::{PathError, Step, find_path};
pub use traits::{PathCell, walkable_into};
