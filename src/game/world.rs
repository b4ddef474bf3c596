//! # World Representation
//!
//! The tile grid a dungeon is carved into, and the biome a level belongs to.

use crate::{config, DelveError, DelveResult, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of tile a dungeon grid is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    /// Walkable ground
    Floor,
    /// Solid rock, the initial state of every tile
    #[default]
    Wall,
    /// Level exit
    Stairs,
    /// Looks and blocks like a wall until revealed, then becomes floor
    SecretWall,
}

impl TileType {
    /// Whether creatures can walk over this tile.
    pub fn is_passable(self) -> bool {
        matches!(self, TileType::Floor | TileType::Stairs)
    }

    /// Character used when dumping a grid as text.
    pub fn glyph(self) -> char {
        match self {
            TileType::Floor => '.',
            TileType::Wall => '#',
            TileType::Stairs => '>',
            TileType::SecretWall => '+',
        }
    }
}

/// A rectangular, row-major grid of tiles.
///
/// # Examples
///
/// ```
/// use deepdelve::{Position, TileGrid, TileType};
///
/// let mut grid = TileGrid::new(10, 8);
/// assert_eq!(grid.get_tile(Position::new(3, 3)), Some(TileType::Wall));
///
/// grid.set_tile(Position::new(3, 3), TileType::Floor).unwrap();
/// assert!(grid.is_walkable(Position::new(3, 3)));
/// assert!(grid.set_tile(Position::new(10, 0), TileType::Floor).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    /// Width in tiles
    pub width: u32,
    /// Height in tiles
    pub height: u32,
    /// Rows of tiles, indexed `tiles[y][x]`
    pub tiles: Vec<Vec<TileType>>,
}

impl TileGrid {
    /// Creates a grid filled with walls.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![vec![TileType::Wall; width as usize]; height as usize],
        }
    }

    /// Checks whether a position lies inside the grid.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    /// Gets the tile at a position, if it is inside the grid.
    pub fn get_tile(&self, pos: Position) -> Option<TileType> {
        if !self.is_valid_position(pos) {
            return None;
        }
        Some(self.tiles[pos.y as usize][pos.x as usize])
    }

    /// Gets the tile at a position, treating everything outside the grid as wall.
    pub fn tile_or_wall(&self, pos: Position) -> TileType {
        self.get_tile(pos).unwrap_or(TileType::Wall)
    }

    /// Sets the tile at a position.
    pub fn set_tile(&mut self, pos: Position, tile: TileType) -> DelveResult<()> {
        if !self.is_valid_position(pos) {
            return Err(DelveError::OutOfBounds { x: pos.x, y: pos.y });
        }
        self.tiles[pos.y as usize][pos.x as usize] = tile;
        Ok(())
    }

    /// Whether a creature may stand on this position.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get_tile(pos).is_some_and(TileType::is_passable)
    }

    /// Counts tiles of a given type.
    pub fn count(&self, tile: TileType) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&t| t == tile)
            .count()
    }

    /// First tile of a given type in row-major order.
    pub fn find_first(&self, tile: TileType) -> Option<Position> {
        self.positions_of(tile).next()
    }

    /// All positions holding a given tile type, in row-major order.
    pub fn positions_of(&self, tile: TileType) -> impl Iterator<Item = Position> + '_ {
        self.tiles.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .enumerate()
                .filter(move |(_, &t)| t == tile)
                .map(move |(x, _)| Position::new(x as i32, y as i32))
        })
    }

    /// The middle of the grid.
    pub fn center(&self) -> Position {
        Position::new(self.width as i32 / 2, self.height as i32 / 2)
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.tiles {
            let line: String = row.iter().map(|t| t.glyph()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Visual theme of a dungeon level, chosen by depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Biome {
    /// Levels 1-5
    #[default]
    Dungeon,
    /// Levels 6-10
    Catacombs,
    /// Levels 11-15
    Caves,
    /// Levels 16-20
    Hell,
    /// Levels 21-25
    Abyss,
}

impl Biome {
    /// Determines the biome for a dungeon level.
    ///
    /// # Examples
    ///
    /// ```
    /// use deepdelve::Biome;
    ///
    /// assert_eq!(Biome::for_level(1), Biome::Dungeon);
    /// assert_eq!(Biome::for_level(12), Biome::Caves);
    /// assert_eq!(Biome::for_level(25), Biome::Abyss);
    /// ```
    pub fn for_level(level: u32) -> Biome {
        match level.clamp(config::MIN_LEVEL, config::MAX_LEVEL) {
            0..=5 => Biome::Dungeon,
            6..=10 => Biome::Catacombs,
            11..=15 => Biome::Caves,
            16..=20 => Biome::Hell,
            _ => Biome::Abyss,
        }
    }

    /// Lowercase name of the biome.
    pub fn name(self) -> &'static str {
        match self {
            Biome::Dungeon => "dungeon",
            Biome::Catacombs => "catacombs",
            Biome::Caves => "caves",
            Biome::Hell => "hell",
            Biome::Abyss => "abyss",
        }
    }
}
