//! Terminal pathfinding demo.
//!
//! Run: cargo run --bin pathdemo

use gridlink_core::{Neighborhood, Point};
use gridlink_demos::{MAP, parse_map, render, scatter_rubble};
use gridlink_paths::{PathCell, disc, find_path, walkable_into};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn run() -> Result<(), String> {
    let mut map = parse_map(MAP)?;
    let mut rng = StdRng::seed_from_u64(42);
    scatter_rubble(&mut map, &mut rng, 6);

    // Scan the goal's surroundings, then walk there.
    let goal_cell = map.grid.cell(map.goal).ok_or("goal is out of bounds")?;
    let scan: Vec<Point> = disc(goal_cell, 2).map(|c| c.pos()).collect();

    let steps = find_path(
        &map.grid,
        map.start,
        map.goal,
        Neighborhood::Round,
        walkable_into,
    )
    .map_err(|e| e.to_string())?;
    let path: Vec<Point> = steps.iter().map(|s| s.cell.pos()).collect();

    println!("{}", render(&map, &path, &scan));
    println!();
    let mut total = 0;
    for (i, step) in steps.iter().enumerate() {
        total += step.cell.get().cost();
        println!("{:>2}. {:<10} {}", i + 1, step.direction.to_string(), step.cell.pos());
    }
    println!("{} steps, accumulated cost {total}", steps.len());
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
