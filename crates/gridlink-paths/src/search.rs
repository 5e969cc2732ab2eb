//! Cost-relaxation path search over the neighbor graph.
//!
//! This is deliberately *not* Dijkstra or A*: the search expands
//! depth-first in neighbor-enumeration order, relaxing per-cell best
//! values as it goes, and commits to the first branch that reaches the
//! goal. Enumeration order is the effective priority, so the result is a
//! valid path but not necessarily the cheapest one.

use gridlink_core::{Cell, Direction, Grid, Neighborhood, Neighbors, Point};
use thiserror::Error;

use crate::traits::PathCell;

/// Relaxation values start here; any real candidate improves on it.
const UNREACHABLE: i32 = i32::MAX;

/// Path-search failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// An endpoint lies outside the grid.
    #[error("{0} is outside the grid")]
    OutOfBounds(Point),
    /// Every branch was exhausted without reaching the goal.
    #[error("no path from {from} to {to}")]
    NoPath { from: Point, to: Point },
}

/// One movement of a reconstructed path: the cell stepped into and the
/// direction of that step.
///
/// Directions derive from coordinate-delta signs, so a step across a
/// torus seam reads as the long way round (wrapping left comes out as
/// [`Direction::Right`]).
pub struct Step<'g, T> {
    pub cell: Cell<'g, T>,
    pub direction: Direction,
}

impl<T> Copy for Step<'_, T> {}

impl<T> Clone for Step<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Step<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cell == other.cell && self.direction == other.direction
    }
}

impl<T> Eq for Step<'_, T> {}

impl<T> std::fmt::Debug for Step<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("pos", &self.cell.pos())
            .field("direction", &self.direction)
            .finish()
    }
}

/// Transient per-cell relaxation state, fresh for every search call.
struct Slot<'g, T> {
    value: i32,
    parent: Option<Cell<'g, T>>,
}

/// One suspended expansion: a cell, the value accumulated reaching it,
/// and its partially consumed neighbor enumeration. Popping a frame is
/// the backtrack of the recursion this stack replaces.
struct Frame<'g, T> {
    cell: Cell<'g, T>,
    value: i32,
    neighbors: Neighbors<'g, T>,
}

/// Find a path from `start` to `end`, expanding through `mode` neighbors.
///
/// `can_walk(candidate, from)` decides whether movement from `from` into
/// `candidate` is permitted. The goal is exempt: it may terminate a path
/// even when `can_walk` would refuse it. Per-cell weights come from
/// [`PathCell::cost`]; a neighbor is entered only when the accumulated
/// candidate value improves on the cell's best known value.
///
/// `start == end` returns an empty sequence; an unreachable goal is the
/// distinguished [`PathError::NoPath`]. The first branch to reach the
/// goal wins and the search unwinds immediately (see the module docs).
pub fn find_path<'g, T, F>(
    grid: &'g Grid<T>,
    start: Point,
    end: Point,
    mode: Neighborhood,
    mut can_walk: F,
) -> Result<Vec<Step<'g, T>>, PathError>
where
    T: PathCell,
    F: FnMut(Cell<'g, T>, Cell<'g, T>) -> bool,
{
    let start_cell = grid.cell(start).ok_or(PathError::OutOfBounds(start))?;
    let end_cell = grid.cell(end).ok_or(PathError::OutOfBounds(end))?;

    if start_cell == end_cell {
        return Ok(Vec::new());
    }

    let mut slots: Vec<Slot<'g, T>> = (0..grid.len())
        .map(|_| Slot {
            value: UNREACHABLE,
            parent: None,
        })
        .collect();
    slots[start_cell.index()].value = 0;

    let mut frames = vec![Frame {
        cell: start_cell,
        value: 0,
        neighbors: start_cell.neighbors(mode),
    }];

    'search: loop {
        let Some(frame) = frames.last_mut() else {
            break 'search;
        };
        let Some(next) = frame.neighbors.next() else {
            frames.pop();
            continue;
        };
        let (from, value) = (frame.cell, frame.value);
        let candidate = value.saturating_add(next.get().cost());

        if next == end_cell {
            if slots[next.index()].value > candidate {
                slots[next.index()] = Slot {
                    value: candidate,
                    parent: Some(from),
                };
                break 'search;
            }
        } else if can_walk(next, from) && slots[next.index()].value > candidate {
            slots[next.index()] = Slot {
                value: candidate,
                parent: Some(from),
            };
            frames.push(Frame {
                cell: next,
                value: candidate,
                neighbors: next.neighbors(mode),
            });
        }
    }

    // Success is recorded solely through the goal's parent link.
    if slots[end_cell.index()].parent.is_none() {
        log::debug!("no path from {start} to {end} ({mode:?})");
        return Err(PathError::NoPath {
            from: start,
            to: end,
        });
    }

    // Walk the parent chain goal -> start, then flip it.
    let mut steps = Vec::new();
    let mut cur = end_cell;
    while let Some(parent) = slots[cur.index()].parent {
        steps.push(Step {
            cell: cur,
            direction: Direction::between(parent.pos(), cur.pos()),
        });
        cur = parent;
    }
    steps.reverse();
    Ok(steps)
}
