//! # Reachability
//!
//! Flood fills over a tile grid, used to check corridor connectivity.

use crate::{Position, TileGrid};
use pathfinding::prelude::{bfs, bfs_reach};
use std::collections::HashSet;

/// Passable cardinal neighbours of a tile.
fn passable_neighbours(grid: &TileGrid, pos: Position) -> Vec<Position> {
    pos.cardinal_adjacent_positions()
        .into_iter()
        .filter(|&next| grid.is_walkable(next))
        .collect()
}

/// Every tile reachable from `start` by walking over passable tiles.
///
/// The start tile is always included, even when it is not passable itself.
pub fn reachable_tiles(grid: &TileGrid, start: Position) -> HashSet<Position> {
    bfs_reach(start, |&pos| passable_neighbours(grid, pos)).collect()
}

/// Shortest walkable path between two tiles, both ends included.
pub fn walkable_path(grid: &TileGrid, from: Position, to: Position) -> Option<Vec<Position>> {
    bfs(&from, |&pos| passable_neighbours(grid, pos), |&pos| pos == to)
}
