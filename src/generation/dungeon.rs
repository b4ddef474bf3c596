//! # Dungeon Generation
//!
//! Room-and-corridor dungeon layout.
//!
//! Rooms are sampled at random and kept when they do not overlap anything
//! placed before them. Each accepted room is joined to the previous one by an
//! L-shaped corridor, so the rooms form a single chain from the start room to
//! the stairs. One secret room is then tucked behind a disguised wall.

use crate::generation::{secret, utils};
use crate::utils::reach::reachable_tiles;
use crate::{
    config, Biome, DelveError, DelveResult, DungeonConfig, Generator, Position, Room, SecretRoom,
    TileGrid, TileType,
};
use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A generated dungeon level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    /// Carved tile grid
    pub grid: TileGrid,
    /// Accepted rooms in placement order; the secret room is not among them
    pub rooms: Vec<Room>,
    /// Where the player starts
    pub start: Position,
    /// The level exit, at the centre of the last room
    pub stairs: Option<Position>,
    /// The hidden room, if one fit
    pub secret: Option<SecretRoom>,
    /// Theme of the level
    pub biome: Biome,
}

impl Dungeon {
    /// Splits the dungeon into its grid, rooms and start position.
    pub fn into_parts(self) -> (TileGrid, Vec<Room>, Position) {
        (self.grid, self.rooms, self.start)
    }

    /// Gets the tile at a position; outside the grid reads as wall.
    pub fn tile_at(&self, pos: Position) -> TileType {
        self.grid.tile_or_wall(pos)
    }

    /// Whether a creature may stand on this position.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.grid.is_walkable(pos)
    }

    /// The first room containing the position.
    pub fn room_at(&self, pos: Position) -> Option<&Room> {
        self.rooms.iter().find(|room| room.contains(pos))
    }

    /// Whether the position lies inside the secret room.
    pub fn is_secret_room(&self, pos: Position) -> bool {
        self.secret
            .as_ref()
            .is_some_and(|secret| secret.room.contains(pos))
    }

    /// Picks a random floor tile.
    ///
    /// Probes random tiles a fixed number of times; stairs are accepted only
    /// when `avoid_stairs` is false. Falls back to the start room centre, then
    /// the grid centre.
    pub fn random_floor_position(&self, rng: &mut StdRng, avoid_stairs: bool) -> Position {
        if self.grid.width > 0 && self.grid.height > 0 {
            for _ in 0..config::RANDOM_FLOOR_ATTEMPTS {
                let pos = Position::new(
                    rng.gen_range(0..self.grid.width) as i32,
                    rng.gen_range(0..self.grid.height) as i32,
                );
                match self.grid.tile_or_wall(pos) {
                    TileType::Floor => return pos,
                    TileType::Stairs if !avoid_stairs => return pos,
                    _ => {}
                }
            }
        }

        self.rooms
            .first()
            .map(Room::center)
            .unwrap_or_else(|| self.grid.center())
    }

    /// Opens the secret entrance, turning it into floor.
    ///
    /// Returns `false` when there is no secret room or it was already opened.
    pub fn reveal_secret_wall(&mut self) -> bool {
        let Some(entrance) = self.secret.as_ref().map(|secret| secret.entrance) else {
            return false;
        };
        if self.grid.tile_or_wall(entrance) != TileType::SecretWall {
            return false;
        }
        let revealed = self.grid.set_tile(entrance, TileType::Floor).is_ok();
        if revealed {
            debug!("Secret wall at {} revealed", entrance);
        }
        revealed
    }

    /// All tiles reachable from `from` over passable tiles.
    pub fn reachable_from(&self, from: Position) -> HashSet<Position> {
        reachable_tiles(&self.grid, from)
    }
}

/// Primary dungeon generator using the room-and-corridor algorithm.
///
/// This generator creates dungeons by:
/// 1. Sampling rooms at random, skipping any that overlap earlier rooms
/// 2. Connecting each new room to the previous one with an L-shaped corridor
/// 3. Putting the stairs at the centre of the last room
/// 4. Hiding one secret room behind a disguised wall
#[derive(Debug, Clone, Default)]
pub struct DungeonGenerator;

impl DungeonGenerator {
    /// Creates a new dungeon generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use deepdelve::{DungeonConfig, DungeonGenerator, Generator};
    /// use deepdelve::generation::utils::create_rng;
    ///
    /// let config = DungeonConfig::new(7);
    /// let mut rng = create_rng(&config);
    /// let dungeon = DungeonGenerator::new().generate(&config, &mut rng).unwrap();
    /// assert!(!dungeon.rooms.is_empty());
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Places rooms and corridors, returning rooms in placement order.
    fn place_rooms(
        &self,
        grid: &mut TileGrid,
        config: &DungeonConfig,
        rng: &mut StdRng,
    ) -> DelveResult<Vec<Room>> {
        let mut rooms: Vec<Room> = Vec::new();

        for attempt in 0..config.max_rooms {
            let room = self.generate_room_candidate(config, rng, rooms.len() as u32);

            if rooms.iter().any(|existing| room.intersects(existing)) {
                debug!("Room attempt {} at {} rejected (overlap)", attempt, room.top_left);
                continue;
            }

            self.carve_room(grid, &room)?;

            if let Some(previous) = rooms.last() {
                let horizontal_first = rng.gen_bool(0.5);
                self.carve_l_corridor(grid, previous.center(), room.center(), horizontal_first)?;
            }

            debug!(
                "Room {} placed at {} ({}x{})",
                room.id, room.top_left, room.width, room.height
            );
            rooms.push(room);
        }

        Ok(rooms)
    }

    /// Samples a room that fits inside the grid border.
    fn generate_room_candidate(&self, config: &DungeonConfig, rng: &mut StdRng, id: u32) -> Room {
        let width = rng.gen_range(config.min_room_size..=config.max_room_size);
        let height = rng.gen_range(config.min_room_size..=config.max_room_size);

        let x = rng.gen_range(1..=(config.width - width - 1)) as i32;
        let y = rng.gen_range(1..=(config.height - height - 1)) as i32;

        Room::new(id, Position::new(x, y), width, height)
    }

    /// Carves out every tile of a room.
    fn carve_room(&self, grid: &mut TileGrid, room: &Room) -> DelveResult<()> {
        for pos in room.positions() {
            grid.set_tile(pos, TileType::Floor)?;
        }
        Ok(())
    }

    /// Carves an L-shaped corridor between two points.
    fn carve_l_corridor(
        &self,
        grid: &mut TileGrid,
        start: Position,
        end: Position,
        horizontal_first: bool,
    ) -> DelveResult<()> {
        if horizontal_first {
            self.carve_h_corridor(grid, start.x, end.x, start.y)?;
            self.carve_v_corridor(grid, start.y, end.y, end.x)
        } else {
            self.carve_v_corridor(grid, start.y, end.y, start.x)?;
            self.carve_h_corridor(grid, start.x, end.x, end.y)
        }
    }

    fn carve_h_corridor(&self, grid: &mut TileGrid, x1: i32, x2: i32, y: i32) -> DelveResult<()> {
        for x in x1.min(x2)..=x1.max(x2) {
            let pos = Position::new(x, y);
            if grid.is_valid_position(pos) {
                grid.set_tile(pos, TileType::Floor)?;
            }
        }
        Ok(())
    }

    fn carve_v_corridor(&self, grid: &mut TileGrid, y1: i32, y2: i32, x: i32) -> DelveResult<()> {
        for y in y1.min(y2)..=y1.max(y2) {
            let pos = Position::new(x, y);
            if grid.is_valid_position(pos) {
                grid.set_tile(pos, TileType::Floor)?;
            }
        }
        Ok(())
    }

    /// Puts the stairs at the centre of the last room.
    fn add_stairs(&self, grid: &mut TileGrid, rooms: &[Room]) -> DelveResult<Option<Position>> {
        let Some(last_room) = rooms.last() else {
            return Ok(None);
        };
        let stairs = last_room.center();
        grid.set_tile(stairs, TileType::Stairs)?;
        Ok(Some(stairs))
    }

    /// Validates that every regular room is reachable from the start.
    fn validate_connectivity(&self, dungeon: &Dungeon) -> DelveResult<()> {
        if dungeon.rooms.is_empty() {
            return Ok(());
        }

        let reachable = dungeon.reachable_from(dungeon.start);
        for room in &dungeon.rooms {
            if !reachable.contains(&room.center()) {
                return Err(DelveError::GenerationFailed(format!(
                    "Room {} is not connected to the start room",
                    room.id
                )));
            }
        }

        Ok(())
    }
}

impl Generator<Dungeon> for DungeonGenerator {
    fn generate(&self, config: &DungeonConfig, rng: &mut StdRng) -> DelveResult<Dungeon> {
        config.validate()?;

        // Create empty level (all walls)
        let mut grid = TileGrid::new(config.width, config.height);

        let rooms = self.place_rooms(&mut grid, config, rng)?;
        let stairs = self.add_stairs(&mut grid, &rooms)?;
        let secret = secret::place_secret_room(&mut grid, &rooms, rng)?;

        let start = match rooms.first() {
            Some(room) => room.center(),
            None => {
                warn!("No rooms could be placed; starting at the grid centre");
                grid.center()
            }
        };

        info!(
            "Generated {}x{} {} level: {} of {} rooms placed, secret room: {}",
            config.width,
            config.height,
            config.biome.name(),
            rooms.len(),
            config.max_rooms,
            if secret.is_some() { "yes" } else { "no" }
        );

        Ok(Dungeon {
            grid,
            rooms,
            start,
            stairs,
            secret,
            biome: config.biome,
        })
    }

    fn validate(&self, dungeon: &Dungeon, config: &DungeonConfig) -> DelveResult<()> {
        if dungeon.grid.width != config.width || dungeon.grid.height != config.height {
            return Err(DelveError::GenerationFailed(format!(
                "Grid is {}x{}, expected {}x{}",
                dungeon.grid.width, dungeon.grid.height, config.width, config.height
            )));
        }

        if dungeon.rooms.is_empty() {
            return Ok(());
        }

        if dungeon.grid.count(TileType::Floor) == 0 {
            return Err(DelveError::GenerationFailed(
                "Level has no floor tiles".to_string(),
            ));
        }

        for (i, room) in dungeon.rooms.iter().enumerate() {
            if !utils::room_fits(room, config.width, config.height) {
                return Err(DelveError::GenerationFailed(format!(
                    "Room {} lies outside the grid border",
                    room.id
                )));
            }
            if let Some(other) = dungeon.rooms[i + 1..].iter().find(|o| room.intersects(o)) {
                return Err(DelveError::GenerationFailed(format!(
                    "Rooms {} and {} overlap",
                    room.id, other.id
                )));
            }
        }

        let stairs_count = dungeon.grid.count(TileType::Stairs);
        if stairs_count != 1 {
            return Err(DelveError::GenerationFailed(format!(
                "Expected exactly one stairs tile, found {}",
                stairs_count
            )));
        }

        self.validate_connectivity(dungeon)
    }

    fn generator_type(&self) -> &'static str {
        "DungeonGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(config: &DungeonConfig) -> Dungeon {
        let mut rng = utils::create_rng(config);
        DungeonGenerator::new().generate(config, &mut rng).unwrap()
    }

    #[test]
    fn test_generation_is_deterministic() {
        let config = DungeonConfig::new(4242);
        assert_eq!(generate(&config), generate(&config));
    }

    #[test]
    fn test_generation_with_default_config() {
        let config = DungeonConfig::new(12345);
        let dungeon = generate(&config);

        assert_eq!(dungeon.grid.width, 50);
        assert_eq!(dungeon.grid.height, 30);
        assert!(!dungeon.rooms.is_empty());
        assert!(dungeon.rooms.len() <= config.max_rooms as usize);
        assert_eq!(dungeon.start, dungeon.rooms[0].center());
        assert!(DungeonGenerator::new().validate(&dungeon, &config).is_ok());
    }

    #[test]
    fn test_room_ids_follow_placement_order() {
        let dungeon = generate(&DungeonConfig::new(77));
        for (i, room) in dungeon.rooms.iter().enumerate() {
            assert_eq!(room.id, i as u32);
        }
    }

    #[test]
    fn test_stairs_in_last_room_center() {
        let dungeon = generate(&DungeonConfig::new(2024));
        let last = dungeon.rooms.last().unwrap();

        assert_eq!(dungeon.stairs, Some(last.center()));
        assert_eq!(dungeon.tile_at(last.center()), TileType::Stairs);
        assert_eq!(dungeon.grid.count(TileType::Stairs), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected_before_generation() {
        let mut config = DungeonConfig::new(1);
        config.min_room_size = 9;
        config.max_room_size = 4;
        let mut rng = utils::create_rng(&config);

        let result = DungeonGenerator::new().generate(&config, &mut rng);
        assert!(matches!(result, Err(DelveError::InvalidConfig(_))));

        let mut config = DungeonConfig::new(1);
        config.max_room_size = u32::MAX - 1;
        let result = DungeonGenerator::new().generate(&config, &mut rng);
        assert!(matches!(result, Err(DelveError::InvalidConfig(_))));
    }

    #[test]
    fn test_tight_grid_still_places_a_room() {
        // Only one room can ever fit: the first attempt always succeeds.
        let mut config = DungeonConfig::with_dimensions(5, 12, 12);
        config.min_room_size = 10;
        config.max_room_size = 10;
        let dungeon = generate(&config);

        assert_eq!(dungeon.rooms.len(), 1);
        assert_eq!(dungeon.start, Position::new(6, 6));
        assert_eq!(dungeon.stairs, Some(dungeon.start));
        assert!(dungeon.secret.is_none());
    }

    #[test]
    fn test_l_corridor_carving() {
        let generator = DungeonGenerator::new();
        let start = Position::new(5, 5);
        let end = Position::new(15, 12);

        let mut grid = TileGrid::new(20, 20);
        generator.carve_l_corridor(&mut grid, start, end, true).unwrap();
        assert_eq!(grid.get_tile(start), Some(TileType::Floor));
        assert_eq!(grid.get_tile(end), Some(TileType::Floor));
        assert_eq!(grid.get_tile(Position::new(15, 5)), Some(TileType::Floor)); // bend
        assert_eq!(grid.get_tile(Position::new(5, 12)), Some(TileType::Wall));
        assert_eq!(grid.count(TileType::Floor), 11 + 7);

        let mut grid = TileGrid::new(20, 20);
        generator.carve_l_corridor(&mut grid, start, end, false).unwrap();
        assert_eq!(grid.get_tile(Position::new(5, 12)), Some(TileType::Floor)); // bend
        assert_eq!(grid.get_tile(Position::new(15, 5)), Some(TileType::Wall));
    }

    #[test]
    fn test_room_at_and_walkability() {
        let dungeon = generate(&DungeonConfig::new(31337));
        let room = dungeon.rooms[0];

        assert_eq!(dungeon.room_at(room.center()), Some(&room));
        assert!(dungeon.is_walkable(room.center()));
        assert!(!dungeon.is_walkable(Position::new(0, 0)));
        assert!(dungeon.room_at(Position::new(0, 0)).is_none());
    }

    #[test]
    fn test_random_floor_position() {
        let config = DungeonConfig::new(555);
        let dungeon = generate(&config);
        let mut rng = utils::create_rng(&config);

        for _ in 0..50 {
            let pos = dungeon.random_floor_position(&mut rng, true);
            assert_eq!(dungeon.tile_at(pos), TileType::Floor);
        }
    }

    #[test]
    fn test_random_floor_position_falls_back_to_grid_center() {
        let dungeon = Dungeon {
            grid: TileGrid::new(20, 10),
            rooms: Vec::new(),
            start: Position::new(10, 5),
            stairs: None,
            secret: None,
            biome: Biome::Dungeon,
        };
        let mut rng = utils::create_rng(&DungeonConfig::new(1));
        assert_eq!(dungeon.random_floor_position(&mut rng, true), Position::new(10, 5));
    }

    #[test]
    fn test_validate_catches_broken_dungeons() {
        let generator = DungeonGenerator::new();
        let config = DungeonConfig::new(8);
        let mut dungeon = generate(&config);

        let stairs = dungeon.stairs.unwrap();
        dungeon.grid.set_tile(stairs, TileType::Floor).unwrap();
        assert!(generator.validate(&dungeon, &config).is_err());

        let mut dungeon = generate(&config);
        let duplicate = dungeon.rooms[0];
        dungeon.rooms.push(duplicate);
        assert!(generator.validate(&dungeon, &config).is_err());
    }

    #[test]
    fn test_generator_type() {
        assert_eq!(DungeonGenerator::new().generator_type(), "DungeonGenerator");
    }
}
