//! # Secret Rooms
//!
//! Hides one extra room behind a wall tile of an existing room. The entrance is
//! marked [`TileType::SecretWall`]: it blocks like a wall until the game reveals
//! it.

use crate::{config, DelveResult, Direction, Position, Room, TileGrid, TileType};
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};

/// The hidden room of a level and the disguised wall leading into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRoom {
    /// Footprint of the secret room
    pub room: Room,
    /// The `SecretWall` tile between the parent room and the secret room
    pub entrance: Position,
    /// Direction from the entrance into the secret room
    pub direction: Direction,
}

impl SecretRoom {
    /// Direction from the entrance into the secret room as `(dx, dy)`.
    pub fn direction_vector(&self) -> (i32, i32) {
        let delta = self.direction.to_delta();
        (delta.x, delta.y)
    }

    /// The parent room's floor tile the entrance is set into.
    pub fn parent_side(&self) -> Position {
        self.entrance - self.direction.to_delta()
    }
}

/// Picks and carves one secret room.
///
/// Every wall tile along the edges of every room but the first is a possible
/// entrance when it is still wall, backs onto room floor and keeps its distance
/// from the stairs. A 5 or 6 tile square room is fitted flush against each such
/// entrance on the far side; it must stay inside the grid and cover only rock.
/// One surviving candidate is chosen at random and carved. If none survive the
/// grid is left untouched.
pub fn place_secret_room(
    grid: &mut TileGrid,
    rooms: &[Room],
    rng: &mut StdRng,
) -> DelveResult<Option<SecretRoom>> {
    if rooms.len() < 2 {
        return Ok(None);
    }

    let stairs = grid.find_first(TileType::Stairs);
    let secret_id = rooms.len() as u32;
    let mut candidates = Vec::new();

    for room in &rooms[1..] {
        for direction in Direction::cardinal() {
            for entrance in room.edge_wall_positions(direction) {
                if !is_entrance_candidate(grid, entrance, direction, stairs) {
                    continue;
                }

                let size = rng.gen_range(config::SECRET_ROOM_MIN_SIZE..=config::SECRET_ROOM_MAX_SIZE);
                let top_left = secret_room_origin(entrance, direction, size);
                let proposed = Room::new(secret_id, top_left, size, size);

                if !footprint_is_free(grid, &proposed, entrance) {
                    trace!("Secret room at {} off room {} does not fit", top_left, room.id);
                    continue;
                }

                candidates.push(SecretRoom {
                    room: proposed,
                    entrance,
                    direction,
                });
            }
        }
    }

    let Some(chosen) = candidates.choose(rng).copied() else {
        debug!("No valid secret room candidates");
        return Ok(None);
    };

    debug!(
        "Secret room chosen from {} candidates: entrance {} heading {:?}",
        candidates.len(),
        chosen.entrance,
        chosen.direction
    );

    for pos in chosen.room.positions() {
        grid.set_tile(pos, TileType::Floor)?;
    }

    if rng.gen_bool(config::SECRET_TUNNEL_CHANCE) {
        let length = rng.gen_range(1..=config::SECRET_TUNNEL_MAX_LENGTH);
        carve_tunnel(grid, chosen.entrance, chosen.direction, length)?;
    }

    grid.set_tile(chosen.entrance, TileType::SecretWall)?;

    Ok(Some(chosen))
}

/// Whether a tile outside a room edge could become the secret entrance.
fn is_entrance_candidate(
    grid: &TileGrid,
    entrance: Position,
    direction: Direction,
    stairs: Option<Position>,
) -> bool {
    if grid.get_tile(entrance) != Some(TileType::Wall) {
        return false;
    }

    let room_side = entrance - direction.to_delta();
    if grid.get_tile(room_side) != Some(TileType::Floor) {
        return false;
    }

    match stairs {
        Some(stairs) => entrance.manhattan_distance(stairs) >= config::SECRET_MIN_STAIRS_DISTANCE,
        None => true,
    }
}

/// Top-left corner of a `size` square room sitting flush beyond `entrance`,
/// centred on the entrance along the wall.
fn secret_room_origin(entrance: Position, direction: Direction, size: u32) -> Position {
    let size = size as i32;
    let half = size / 2;

    match direction {
        Direction::North => Position::new(entrance.x - half, entrance.y - size),
        Direction::South => Position::new(entrance.x - half, entrance.y + 1),
        Direction::West => Position::new(entrance.x - size, entrance.y - half),
        Direction::East => Position::new(entrance.x + 1, entrance.y - half),
    }
}

/// The room keeps a tile of border inside the grid and covers nothing but wall.
fn footprint_is_free(grid: &TileGrid, room: &Room, entrance: Position) -> bool {
    let size_x = room.width as i32;
    let size_y = room.height as i32;
    let Position { x, y } = room.top_left;

    let in_bounds =
        x > 0 && x < grid.width as i32 - size_x && y > 0 && y < grid.height as i32 - size_y;
    if !in_bounds {
        return false;
    }

    room.positions()
        .into_iter()
        .filter(|&pos| pos != entrance)
        .all(|pos| grid.get_tile(pos) == Some(TileType::Wall))
}

/// Extends floor straight from the entrance, leaving anything that is not wall alone.
fn carve_tunnel(
    grid: &mut TileGrid,
    entrance: Position,
    direction: Direction,
    length: i32,
) -> DelveResult<()> {
    for step in 1..=length {
        let pos = entrance.step(direction, step);
        if grid.get_tile(pos) == Some(TileType::Wall) {
            grid.set_tile(pos, TileType::Floor)?;
        }
    }
    Ok(())
}
