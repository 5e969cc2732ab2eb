//! **gridlink-core** — a dense 2D grid wired into a bidirectional neighbor
//! graph.
//!
//! Cell payloads live in a flat arena owned by [`Grid`]; neighbor links are
//! stored as indices back into that arena, so the inherently cyclic cardinal
//! graph involves no ownership cycles. [`Cell`] is a copyable, non-owning
//! handle through which payloads, the four stored cardinal links, the four
//! derived diagonal links, and lazy [`Neighbors`] enumeration are reached.
//!
//! The link graph is wired exactly once at construction (wrapping at the
//! edges when built with [`Topology::Torus`]) and its shape never changes
//! afterwards; payloads remain mutable through [`Grid::get_mut`].

pub mod cell;
pub mod direction;
pub mod error;
pub mod geom;
pub mod grid;
pub mod neighbors;

pub use cell::Cell;
pub use direction::Direction;
pub use error::GridError;
pub use geom::Point;
pub use grid::{Grid, PartialGrid, Topology};
pub use neighbors::{Neighborhood, Neighbors};
