//! # Creature Library
//!
//! Creature DNA parameters assigned to ranges of dungeon levels.
//!
//! An enemy pack maps each enemy slot to a handful of non-overlapping level
//! ranges, each carrying the parameter bundle used to build the creature on
//! those levels. Levels that fall between two ranges get a blend of both
//! bundles, so creatures change gradually as the player goes deeper.

pub mod interpolator;
pub mod pack;

pub use interpolator::*;
pub use pack::*;

use crate::{config, DelveError, DelveResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Named creature parameters, ordered by name.
pub type Parameters = BTreeMap<String, ParamValue>;

/// A single creature parameter.
///
/// Numbers interpolate, fixed-length sequences (colours, mostly) interpolate
/// element by element, nested maps interpolate key by key, and everything else
/// is categorical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Categorical flag
    Bool(bool),
    /// Discrete count; stays integral when interpolated
    Int(i64),
    /// Continuous value
    Float(f64),
    /// Categorical name, such as an algorithm
    Text(String),
    /// Variable sequence
    List(Vec<ParamValue>),
    /// Fixed-length sequence such as an RGB colour. Serialized as an array,
    /// which reads back as `List`.
    Tuple(Vec<ParamValue>),
    /// Nested parameter bundle
    Map(Parameters),
}

impl ParamValue {
    /// An RGB colour tuple.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        ParamValue::Tuple(vec![r.into(), g.into(), b.into()])
    }

    /// Numeric value as a float, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            ParamValue::Int(v) => Some(v as f64),
            ParamValue::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Integer value, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            ParamValue::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Text value, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of a list or tuple.
    pub fn as_slice(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::List(items) | ParamValue::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v.into())
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<Parameters> for ParamValue {
    fn from(v: Parameters) -> Self {
        ParamValue::Map(v)
    }
}

/// A closed range of dungeon levels and the creature used on them.
///
/// # Examples
///
/// ```
/// use deepdelve::{LevelRange, Parameters};
///
/// let range = LevelRange::new(3, 7, "tentacle", Parameters::new()).unwrap();
/// assert!(range.contains_level(5));
/// assert!(LevelRange::new(7, 3, "tentacle", Parameters::new()).is_err());
/// assert!(LevelRange::new(0, 3, "tentacle", Parameters::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLevelRange", into = "RawLevelRange")]
pub struct LevelRange {
    start_level: u32,
    end_level: u32,
    /// Creature model used on these levels
    pub creature_type: String,
    /// DNA parameters for the creature
    pub parameters: Parameters,
    /// Name of the saved creation the parameters came from
    pub creation_name: Option<String>,
}

impl LevelRange {
    /// Creates a level range, rejecting bounds outside 1-25 or inverted ones.
    pub fn new(
        start_level: u32,
        end_level: u32,
        creature_type: impl Into<String>,
        parameters: Parameters,
    ) -> DelveResult<Self> {
        if !(config::MIN_LEVEL <= start_level
            && start_level <= end_level
            && end_level <= config::MAX_LEVEL)
        {
            return Err(DelveError::InvalidLevelRange {
                start: start_level,
                end: end_level,
            });
        }

        Ok(Self {
            start_level,
            end_level,
            creature_type: creature_type.into(),
            parameters,
            creation_name: None,
        })
    }

    /// Records which saved creation the parameters came from.
    pub fn with_creation_name(mut self, name: impl Into<String>) -> Self {
        self.creation_name = Some(name.into());
        self
    }

    /// First level covered.
    pub fn start_level(&self) -> u32 {
        self.start_level
    }

    /// Last level covered.
    pub fn end_level(&self) -> u32 {
        self.end_level
    }

    /// `(start, end)` bounds.
    pub fn level_range(&self) -> (u32, u32) {
        (self.start_level, self.end_level)
    }

    /// Checks whether this range covers a level.
    pub fn contains_level(&self, level: u32) -> bool {
        self.start_level <= level && level <= self.end_level
    }

    /// Checks whether two ranges share at least one level.
    pub fn overlaps_with(&self, other: &LevelRange) -> bool {
        !(self.end_level < other.start_level || self.start_level > other.end_level)
    }
}

impl fmt::Display for LevelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "levels {}-{} ({})",
            self.start_level, self.end_level, self.creature_type
        )
    }
}

/// Wire shape of a level range: `{"level_range": [start, end], ...}`.
#[derive(Serialize, Deserialize)]
struct RawLevelRange {
    level_range: (u32, u32),
    creature_type: String,
    parameters: Parameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    creation_name: Option<String>,
}

impl TryFrom<RawLevelRange> for LevelRange {
    type Error = DelveError;

    fn try_from(raw: RawLevelRange) -> DelveResult<Self> {
        let (start, end) = raw.level_range;
        let mut range = LevelRange::new(start, end, raw.creature_type, raw.parameters)?;
        range.creation_name = raw.creation_name;
        Ok(range)
    }
}

impl From<LevelRange> for RawLevelRange {
    fn from(range: LevelRange) -> Self {
        Self {
            level_range: (range.start_level, range.end_level),
            creature_type: range.creature_type,
            parameters: range.parameters,
            creation_name: range.creation_name,
        }
    }
}
