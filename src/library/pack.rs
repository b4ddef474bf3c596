//! # Enemy Packs
//!
//! A named collection of level ranges for each enemy slot the game spawns.

use crate::{resolve, DelveError, DelveResult, LevelRange, Parameters};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Enemy slots the game spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyType {
    #[serde(rename = "ENEMY_STARTLE")]
    Startle,
    #[serde(rename = "ENEMY_SLIME")]
    Slime,
    #[serde(rename = "ENEMY_SKELETON")]
    Skeleton,
    #[serde(rename = "ENEMY_ORC")]
    Orc,
    #[serde(rename = "ENEMY_DEMON")]
    Demon,
    #[serde(rename = "ENEMY_DRAGON")]
    Dragon,
}

impl EnemyType {
    /// Every enemy slot.
    pub fn all() -> [EnemyType; 6] {
        [
            EnemyType::Startle,
            EnemyType::Slime,
            EnemyType::Skeleton,
            EnemyType::Orc,
            EnemyType::Demon,
            EnemyType::Dragon,
        ]
    }

    /// Name used in enemy pack documents.
    pub fn name(self) -> &'static str {
        match self {
            EnemyType::Startle => "ENEMY_STARTLE",
            EnemyType::Slime => "ENEMY_SLIME",
            EnemyType::Skeleton => "ENEMY_SKELETON",
            EnemyType::Orc => "ENEMY_ORC",
            EnemyType::Demon => "ENEMY_DEMON",
            EnemyType::Dragon => "ENEMY_DRAGON",
        }
    }

    /// Levels on which the game spawns this enemy.
    pub fn spawn_range(self) -> (u32, u32) {
        match self {
            EnemyType::Startle | EnemyType::Slime => (1, 5),
            EnemyType::Skeleton => (2, 14),
            EnemyType::Orc => (4, 19),
            EnemyType::Demon => (6, 25),
            EnemyType::Dragon => (10, 25),
        }
    }

    /// Creature model the game builds for this enemy by default.
    pub fn default_creature(self) -> CreatureType {
        match self {
            EnemyType::Startle => CreatureType::Starfish,
            EnemyType::Slime => CreatureType::Blob,
            EnemyType::Skeleton => CreatureType::Polyp,
            EnemyType::Orc => CreatureType::Tentacle,
            EnemyType::Demon => CreatureType::Medusa,
            EnemyType::Dragon => CreatureType::Dragon,
        }
    }
}

impl fmt::Display for EnemyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Procedural creature models a level range can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatureType {
    Starfish,
    Blob,
    Polyp,
    Tentacle,
    Medusa,
    Dragon,
}

impl CreatureType {
    /// Looks up a creature model by its lowercase name.
    pub fn from_name(name: &str) -> Option<CreatureType> {
        match name {
            "starfish" => Some(CreatureType::Starfish),
            "blob" => Some(CreatureType::Blob),
            "polyp" => Some(CreatureType::Polyp),
            "tentacle" => Some(CreatureType::Tentacle),
            "medusa" => Some(CreatureType::Medusa),
            "dragon" => Some(CreatureType::Dragon),
            _ => None,
        }
    }

    /// Lowercase name of the creature model.
    pub fn name(self) -> &'static str {
        match self {
            CreatureType::Starfish => "starfish",
            CreatureType::Blob => "blob",
            CreatureType::Polyp => "polyp",
            CreatureType::Tentacle => "tentacle",
            CreatureType::Medusa => "medusa",
            CreatureType::Dragon => "dragon",
        }
    }
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Complete enemy appearance configuration across all levels.
///
/// Ranges added through [`EnemyPack::add_mapping`] never overlap within one
/// enemy slot and are kept sorted by start level. Deserialized packs are taken
/// as-is.
///
/// # Examples
///
/// ```
/// use deepdelve::{EnemyPack, EnemyType, LevelRange, ParamValue, Parameters};
///
/// let mut pack = EnemyPack::new("Default");
/// let small = Parameters::from([("num_tentacles".to_string(), ParamValue::Int(2))]);
/// let large = Parameters::from([("num_tentacles".to_string(), ParamValue::Int(12))]);
///
/// pack.add_mapping(EnemyType::Orc, LevelRange::new(4, 8, "tentacle", small).unwrap()).unwrap();
/// pack.add_mapping(EnemyType::Orc, LevelRange::new(14, 19, "tentacle", large).unwrap()).unwrap();
///
/// let params = pack.parameters_for_level(EnemyType::Orc, 11).unwrap();
/// assert_eq!(params["num_tentacles"], ParamValue::Int(6));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyPack {
    /// Human-readable name of the pack
    pub pack_name: String,
    /// Pack format version
    #[serde(default = "default_version")]
    pub version: String,
    /// Level ranges per enemy slot
    #[serde(default)]
    pub enemies: BTreeMap<EnemyType, Vec<LevelRange>>,
}

impl EnemyPack {
    /// Creates an empty pack with a slot for every enemy type.
    pub fn new(pack_name: impl Into<String>) -> Self {
        Self {
            pack_name: pack_name.into(),
            version: default_version(),
            enemies: EnemyType::all()
                .into_iter()
                .map(|enemy| (enemy, Vec::new()))
                .collect(),
        }
    }

    /// Adds a level range to an enemy slot.
    ///
    /// Fails if the range shares a level with one already in the slot.
    pub fn add_mapping(&mut self, enemy: EnemyType, range: LevelRange) -> DelveResult<()> {
        let mappings = self.enemies.entry(enemy).or_default();

        if let Some(existing) = mappings.iter().find(|m| m.overlaps_with(&range)) {
            return Err(DelveError::OverlappingRange(format!(
                "{}: {} overlaps existing {}",
                enemy, range, existing
            )));
        }

        debug!("{}: added {}", enemy, range);
        mappings.push(range);
        mappings.sort_by_key(LevelRange::start_level);
        Ok(())
    }

    /// Removes the range starting at `start_level` from an enemy slot.
    pub fn remove_mapping(&mut self, enemy: EnemyType, start_level: u32) -> Option<LevelRange> {
        let mappings = self.enemies.get_mut(&enemy)?;
        let index = mappings
            .iter()
            .position(|m| m.start_level() == start_level)?;
        Some(mappings.remove(index))
    }

    /// The range covering a level, if any.
    pub fn mapping_for_level(&self, enemy: EnemyType, level: u32) -> Option<&LevelRange> {
        self.mappings(enemy)
            .iter()
            .find(|m| m.contains_level(level))
    }

    /// All ranges of an enemy slot.
    pub fn mappings(&self, enemy: EnemyType) -> &[LevelRange] {
        self.enemies.get(&enemy).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of ranges across all slots.
    pub fn total_mappings(&self) -> usize {
        self.enemies.values().map(Vec::len).sum()
    }

    /// Creature parameters for an enemy on a dungeon level, interpolating
    /// across gaps between ranges.
    pub fn parameters_for_level(&self, enemy: EnemyType, level: i32) -> DelveResult<Parameters> {
        let mappings = self.mappings(enemy);
        if mappings.is_empty() {
            return Err(DelveError::EmptyInput(format!(
                "{} has no level ranges",
                enemy
            )));
        }
        resolve(mappings, level)
    }

    /// Checks the pack against the game's spawn rules.
    ///
    /// Returns warnings; an empty list means the pack covers everything. Missing
    /// coverage is not an error because the game falls back to its default
    /// creature generation.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for enemy in EnemyType::all() {
            let mappings = self.mappings(enemy);

            if mappings.is_empty() {
                warnings.push(format!(
                    "{}: No mappings defined (will use default generation)",
                    enemy
                ));
                continue;
            }

            let (spawn_start, spawn_end) = enemy.spawn_range();

            let covered: BTreeSet<u32> = mappings
                .iter()
                .flat_map(|m| m.start_level()..=m.end_level())
                .collect();
            let missing: Vec<u32> = (spawn_start..=spawn_end)
                .filter(|level| !covered.contains(level))
                .collect();

            if !missing.is_empty() {
                warnings.push(format!(
                    "{}: Partial coverage in spawn range {}-{}. Missing levels: {:?} (will use default generation)",
                    enemy, spawn_start, spawn_end, missing
                ));
            }

            for mapping in mappings {
                if mapping.start_level() < spawn_start || mapping.end_level() > spawn_end {
                    warnings.push(format!(
                        "{}: Mapping {}-{} extends outside spawn range {}-{}",
                        enemy,
                        mapping.start_level(),
                        mapping.end_level(),
                        spawn_start,
                        spawn_end
                    ));
                }
            }

            for mapping in mappings {
                if CreatureType::from_name(&mapping.creature_type).is_none() {
                    warnings.push(format!(
                        "{}: Invalid creature type '{}'",
                        enemy, mapping.creature_type
                    ));
                }
            }
        }

        warnings
    }
}

impl fmt::Display for EnemyPack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EnemyPack '{}' v{} ({} mappings)",
            self.pack_name,
            self.version,
            self.total_mappings()
        )
    }
}
