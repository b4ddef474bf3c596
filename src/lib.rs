//! # Deepdelve
//!
//! Procedural content for a 2D/3D roguelike: dungeon layouts with hidden rooms,
//! and creature DNA that changes smoothly as the player descends.
//!
//! ## Architecture Overview
//!
//! The crate is split into a handful of small modules:
//!
//! - **Game**: Coordinates, directions, the tile grid and biome lookup
//! - **Generation**: Room-and-corridor dungeon generation with secret-room placement
//! - **Library**: Level ranges, parameter values and level-based interpolation
//!   of creature parameters, grouped into enemy packs
//! - **Utils**: Small math helpers and reachability queries over a tile grid
//!
//! Everything here is synchronous and pure apart from the random source, which
//! is always passed in explicitly so that a seed fully determines the output.

pub mod game;
pub mod generation;
pub mod library;
pub mod utils;

pub use game::*;
pub use generation::*;
pub use library::*;

pub use game::{Biome, Direction, Position, TileGrid, TileType};
pub use generation::{Dungeon, DungeonConfig, DungeonGenerator, Generator, Room, SecretRoom};
pub use library::{
    blend, interpolate_value, interpolation_factor, resolve, CreatureType, EnemyPack, EnemyType,
    LevelRange, ParamValue, Parameters,
};

/// Core error type for the Deepdelve crate.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DelveError {
    /// Generation parameters cannot produce a dungeon
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A tile write fell outside the grid
    #[error("Position ({x}, {y}) is out of bounds")]
    OutOfBounds { x: i32, y: i32 },

    /// A generated dungeon failed validation
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Level range outside the playable levels or inverted
    #[error("Invalid level range: ({start}, {end}). Must be between 1-25.")]
    InvalidLevelRange { start: u32, end: u32 },

    /// A level range collides with one already registered
    #[error("Overlapping level range: {0}")]
    OverlappingRange(String),

    /// Nothing to work with
    #[error("Empty input: {0}")]
    EmptyInput(String),
}

/// Result type used throughout the Deepdelve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation and library constants.
pub mod config {
    /// Default dungeon width in tiles
    pub const DEFAULT_DUNGEON_WIDTH: u32 = 50;

    /// Default dungeon height in tiles
    pub const DEFAULT_DUNGEON_HEIGHT: u32 = 30;

    /// Default number of room placement attempts
    pub const DEFAULT_MAX_ROOMS: u32 = 15;

    /// Default smallest room side
    pub const DEFAULT_MIN_ROOM_SIZE: u32 = 4;

    /// Default largest room side
    pub const DEFAULT_MAX_ROOM_SIZE: u32 = 10;

    /// Shallowest dungeon level
    pub const MIN_LEVEL: u32 = 1;

    /// Deepest dungeon level
    pub const MAX_LEVEL: u32 = 25;

    /// Smallest secret room side
    pub const SECRET_ROOM_MIN_SIZE: u32 = 5;

    /// Largest secret room side
    pub const SECRET_ROOM_MAX_SIZE: u32 = 6;

    /// Secret entrances closer than this (Manhattan) to the stairs are skipped
    pub const SECRET_MIN_STAIRS_DISTANCE: u32 = 5;

    /// Chance of a short tunnel behind the secret entrance
    pub const SECRET_TUNNEL_CHANCE: f64 = 0.5;

    /// Longest tunnel behind the secret entrance
    pub const SECRET_TUNNEL_MAX_LENGTH: i32 = 2;

    /// Random probes before `random_floor_position` falls back
    pub const RANDOM_FLOOR_ATTEMPTS: u32 = 100;
}
