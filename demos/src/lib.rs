//! Shared map model used by the gridlink demos.
//!
//! Demonstrates: building a linked grid from an ASCII sketch, weighted
//! terrain, ring scans around a point of interest, and depth-first
//! path search with a rendered overlay.

use gridlink_core::{Grid, Point, Topology};
use gridlink_paths::PathCell;
use rand::{Rng, RngExt};

/// A small vault: `@` marks the start, `>` the goal, `#` walls.
pub const MAP: &str = "\
############
#@...#.....#
#....#.###.#
#.##.#.#...#
#.#..#.#.###
#.#....#...#
#.####.##.>#
############";

/// Movement cost of a rubble tile; plain floor costs 1.
pub const RUBBLE_COST: i32 = 3;

// ---------------------------------------------------------------------------
// Tiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    Wall,
    Floor,
    Rubble,
}

#[derive(Debug, Clone, Copy)]
pub struct Tile {
    pub terrain: Terrain,
}

impl Tile {
    pub fn glyph(self) -> char {
        match self.terrain {
            Terrain::Wall => '#',
            Terrain::Floor => '.',
            Terrain::Rubble => '%',
        }
    }
}

impl PathCell for Tile {
    fn cost(&self) -> i32 {
        match self.terrain {
            Terrain::Rubble => RUBBLE_COST,
            _ => 1,
        }
    }

    fn walkable(&self) -> bool {
        self.terrain != Terrain::Wall
    }
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

pub struct DemoMap {
    pub grid: Grid<Tile>,
    pub start: Point,
    pub goal: Point,
}

/// Build a linked grid from an ASCII sketch. Rows must share one width;
/// `@` and `>` are floor tiles whose positions are reported separately.
pub fn parse_map(text: &str) -> Result<DemoMap, String> {
    let rows: Vec<&str> = text.lines().collect();
    let height = rows.len() as i32;
    let width = rows.first().map_or(0, |r| r.chars().count() as i32);
    if rows.iter().any(|r| r.chars().count() as i32 != width) {
        return Err("map rows differ in width".into());
    }

    let mut start = None;
    let mut goal = None;
    let grid = Grid::new(width, height, Topology::Flat, |pos, _| {
        let ch = rows[pos.y as usize]
            .chars()
            .nth(pos.x as usize)
            .unwrap_or('#');
        match ch {
            '#' => Tile {
                terrain: Terrain::Wall,
            },
            '@' => {
                start = Some(pos);
                Tile {
                    terrain: Terrain::Floor,
                }
            }
            '>' => {
                goal = Some(pos);
                Tile {
                    terrain: Terrain::Floor,
                }
            }
            _ => Tile {
                terrain: Terrain::Floor,
            },
        }
    })
    .map_err(|e| e.to_string())?;

    let start = start.ok_or("map has no `@` start marker")?;
    let goal = goal.ok_or("map has no `>` goal marker")?;
    Ok(DemoMap { grid, start, goal })
}

/// Turn some random floor tiles into rubble, sparing the start and goal.
pub fn scatter_rubble(map: &mut DemoMap, rng: &mut impl Rng, count: usize) {
    let mut placed = 0;
    let mut attempts = 0;
    while placed < count && attempts < 500 {
        attempts += 1;
        let p = Point::new(
            rng.random_range(0..map.grid.width()),
            rng.random_range(0..map.grid.height()),
        );
        if p == map.start || p == map.goal {
            continue;
        }
        let Some(tile) = map.grid.get_mut(p) else {
            continue;
        };
        if tile.terrain == Terrain::Floor {
            tile.terrain = Terrain::Rubble;
            placed += 1;
        }
    }
}

/// Render the map with overlays: `*` for path cells, `,` for scanned
/// cells, with the start and goal markers drawn on top.
pub fn render(map: &DemoMap, path: &[Point], scan: &[Point]) -> String {
    let mut out = String::new();
    for (pos, tile) in map.grid.iter().map(|c| (c.pos(), c.get())) {
        if pos.x == 0 && pos.y > 0 {
            out.push('\n');
        }
        let ch = if pos == map.start {
            '@'
        } else if pos == map.goal {
            '>'
        } else if path.contains(&pos) {
            '*'
        } else if scan.contains(&pos) {
            ','
        } else {
            tile.glyph()
        };
        out.push(ch);
    }
    out
}
