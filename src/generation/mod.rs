//! # Generation Module
//!
//! Procedural dungeon generation.
//!
//! This module provides the configuration, room geometry and the `Generator`
//! trait shared by the generators. The room-and-corridor layout lives in
//! [`dungeon`], the hidden room carved next to it in [`secret`].

pub mod dungeon;
pub mod secret;

pub use dungeon::*;
pub use secret::*;

use crate::{config, Biome, DelveError, DelveResult, Direction, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for dungeon generation.
///
/// Controls the grid size, how many room placements are attempted and how
/// big rooms may be. The seed makes generation reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Number of room placement attempts; rejected attempts are not retried
    pub max_rooms: u32,
    /// Minimum room side
    pub min_room_size: u32,
    /// Maximum room side
    pub max_room_size: u32,
    /// Theme of the generated level
    pub biome: Biome,
}

impl DungeonConfig {
    /// Creates the standard configuration used by the game.
    ///
    /// # Examples
    ///
    /// ```
    /// use deepdelve::DungeonConfig;
    ///
    /// let config = DungeonConfig::new(7);
    /// assert!(config.min_room_size >= 3);
    /// assert!(config.max_room_size >= config.min_room_size);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: config::DEFAULT_DUNGEON_WIDTH,
            height: config::DEFAULT_DUNGEON_HEIGHT,
            max_rooms: config::DEFAULT_MAX_ROOMS,
            min_room_size: config::DEFAULT_MIN_ROOM_SIZE,
            max_room_size: config::DEFAULT_MAX_ROOM_SIZE,
            biome: Biome::Dungeon,
        }
    }

    /// Standard configuration with the biome matching a dungeon level.
    pub fn for_level(seed: u64, level: u32) -> Self {
        Self {
            biome: Biome::for_level(level),
            ..Self::new(seed)
        }
    }

    /// Standard configuration on a custom grid size.
    pub fn with_dimensions(seed: u64, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::new(seed)
        }
    }

    /// Creates a configuration for testing with smaller, simpler levels.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            width: 40,
            height: 30,
            max_rooms: 8,
            min_room_size: 3,
            max_room_size: 6,
            biome: Biome::Dungeon,
        }
    }

    /// Rejects configurations that cannot produce a dungeon.
    pub fn validate(&self) -> DelveResult<()> {
        if self.min_room_size == 0 {
            return Err(DelveError::InvalidConfig(
                "min_room_size must be at least 1".to_string(),
            ));
        }
        if self.min_room_size > self.max_room_size {
            return Err(DelveError::InvalidConfig(format!(
                "min_room_size ({}) is larger than max_room_size ({})",
                self.min_room_size, self.max_room_size
            )));
        }
        if self.max_rooms == 0 {
            return Err(DelveError::InvalidConfig(
                "max_rooms must be at least 1".to_string(),
            ));
        }
        // Tile coordinates are i32.
        if self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return Err(DelveError::InvalidConfig(format!(
                "{}x{} grid exceeds the addressable tile range",
                self.width, self.height
            )));
        }
        // Every room needs a one tile border on each side.
        let fits = self
            .max_room_size
            .checked_add(2)
            .is_some_and(|needed| self.width >= needed && self.height >= needed);
        if !fits {
            return Err(DelveError::InvalidConfig(format!(
                "{}x{} grid cannot hold a {} tile room with a border",
                self.width, self.height, self.max_room_size
            )));
        }
        Ok(())
    }
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Represents a rectangular room in the dungeon.
///
/// Every tile of the rectangle is floor once carved. Rooms are never changed
/// after placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    /// Index of the room in placement order
    pub id: u32,
    /// Top-left corner of the room
    pub top_left: Position,
    /// Width of the room
    pub width: u32,
    /// Height of the room
    pub height: u32,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use deepdelve::{Room, Position};
    ///
    /// let room = Room::new(1, Position::new(5, 5), 10, 8);
    /// assert_eq!(room.id, 1);
    /// assert_eq!(room.width, 10);
    /// assert_eq!(room.height, 8);
    /// ```
    pub fn new(id: u32, top_left: Position, width: u32, height: u32) -> Self {
        Self {
            id,
            top_left,
            width,
            height,
        }
    }

    /// Gets the bottom-right corner of the room.
    pub fn bottom_right(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 - 1,
            self.top_left.y + self.height as i32 - 1,
        )
    }

    /// Gets the center position of the room.
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 / 2,
            self.top_left.y + self.height as i32 / 2,
        )
    }

    /// Gets the area of the room in tiles.
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Checks if a position is inside this room.
    ///
    /// # Examples
    ///
    /// ```
    /// use deepdelve::{Room, Position};
    ///
    /// let room = Room::new(1, Position::new(5, 5), 10, 8);
    /// assert!(room.contains(Position::new(7, 7)));
    /// assert!(!room.contains(Position::new(20, 20)));
    /// ```
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x < self.top_left.x + self.width as i32
            && pos.y < self.top_left.y + self.height as i32
    }

    /// Checks if this room overlaps another one.
    ///
    /// Touching edges and a single tile gap both count, so accepted rooms always
    /// keep at least one wall tile between them.
    pub fn intersects(&self, other: &Room) -> bool {
        self.top_left.x <= other.top_left.x + other.width as i32
            && self.top_left.x + self.width as i32 >= other.top_left.x
            && self.top_left.y <= other.top_left.y + other.height as i32
            && self.top_left.y + self.height as i32 >= other.top_left.y
    }

    /// Gets all positions within this room.
    pub fn positions(&self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(self.area() as usize);

        for y in self.top_left.y..(self.top_left.y + self.height as i32) {
            for x in self.top_left.x..(self.top_left.x + self.width as i32) {
                positions.push(Position::new(x, y));
            }
        }

        positions
    }

    /// Tiles directly outside one edge of the room.
    pub fn edge_wall_positions(&self, side: Direction) -> Vec<Position> {
        let Position { x, y } = self.top_left;
        let (w, h) = (self.width as i32, self.height as i32);

        match side {
            Direction::North => (x..x + w).map(|wx| Position::new(wx, y - 1)).collect(),
            Direction::South => (x..x + w).map(|wx| Position::new(wx, y + h)).collect(),
            Direction::West => (y..y + h).map(|wy| Position::new(x - 1, wy)).collect(),
            Direction::East => (y..y + h).map(|wy| Position::new(x + w, wy)).collect(),
        }
    }

    /// Picks a random point away from the room's outer ring.
    ///
    /// Rooms thinner than three tiles have no such point along that axis, so the
    /// full span is used instead.
    pub fn random_point(&self, rng: &mut StdRng) -> Position {
        fn inner_span(start: i32, len: u32) -> (i32, i32) {
            let len = len as i32;
            if len >= 3 {
                (start + 1, start + len - 2)
            } else {
                (start, start + len.max(1) - 1)
            }
        }

        let (min_x, max_x) = inner_span(self.top_left.x, self.width);
        let (min_y, max_y) = inner_span(self.top_left.y, self.height);
        Position::new(rng.gen_range(min_x..=max_x), rng.gen_range(min_y..=max_y))
    }
}

/// Trait for procedural generators.
///
/// Generators take their randomness from the caller so a seed fully determines
/// the result.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &DungeonConfig, rng: &mut StdRng) -> DelveResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &DungeonConfig) -> DelveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &DungeonConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Checks that a room and its one tile border fit inside a `width` x `height` grid.
    pub fn room_fits(room: &Room, width: u32, height: u32) -> bool {
        room.top_left.x >= 1
            && room.top_left.y >= 1
            && room.top_left.x + room.width as i32 <= width as i32 - 1
            && room.top_left.y + room.height as i32 <= height as i32 - 1
    }
}
