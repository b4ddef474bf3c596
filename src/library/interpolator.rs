//! # Level Interpolation
//!
//! Resolves a dungeon level to a creature parameter bundle.
//!
//! A level inside a range gets that range's parameters untouched. A level in a
//! gap between two ranges gets a blend of the neighbouring bundles, weighted by
//! how far into the gap it sits. Levels before the first or after the last range
//! reuse the nearest bundle; nothing is extrapolated.

use crate::utils::math::{clamp_unit, lerp, lerp_rounded};
use crate::{config, DelveError, DelveResult, LevelRange, ParamValue, Parameters};
use log::trace;

/// Picks the parameters for a dungeon level.
///
/// The level is clamped to 1-25 first. Ranges may be given in any order.
///
/// # Examples
///
/// ```
/// use deepdelve::{resolve, LevelRange, ParamValue, Parameters};
///
/// let bundle = |n: i64| Parameters::from([("n".to_string(), ParamValue::Int(n))]);
/// let ranges = vec![
///     LevelRange::new(1, 5, "tentacle", bundle(2)).unwrap(),
///     LevelRange::new(11, 15, "tentacle", bundle(12)).unwrap(),
/// ];
///
/// assert_eq!(resolve(&ranges, 3).unwrap(), bundle(2));
/// assert_eq!(resolve(&ranges, 8).unwrap(), bundle(6));
/// assert_eq!(resolve(&ranges, 20).unwrap(), bundle(12));
/// ```
pub fn resolve(ranges: &[LevelRange], level: i32) -> DelveResult<Parameters> {
    if ranges.is_empty() {
        return Err(DelveError::EmptyInput(
            "no level ranges to resolve against".to_string(),
        ));
    }

    let level = level.clamp(config::MIN_LEVEL as i32, config::MAX_LEVEL as i32) as u32;

    let mut sorted: Vec<&LevelRange> = ranges.iter().collect();
    sorted.sort_by_key(|range| range.start_level());

    if let Some(exact) = sorted.iter().find(|range| range.contains_level(level)) {
        return Ok(exact.parameters.clone());
    }

    let mut prev = None;
    let mut next = None;
    for &range in &sorted {
        if range.end_level() < level {
            prev = Some(range);
        } else if range.start_level() > level {
            next = Some(range);
            break;
        }
    }

    let (prev, next) = match (prev, next) {
        (None, _) => return Ok(sorted[0].parameters.clone()),
        (_, None) => return Ok(sorted[sorted.len() - 1].parameters.clone()),
        (Some(prev), Some(next)) => (prev, next),
    };

    let gap_start = i64::from(prev.end_level()) + 1;
    let gap_end = i64::from(next.start_level()) - 1;
    let gap_size = gap_end - gap_start + 1;
    if gap_size <= 0 {
        return Ok(prev.parameters.clone());
    }

    let factor = (i64::from(level) - gap_start) as f64 / gap_size as f64;
    trace!(
        "Level {} blends {} and {} at {:.3}",
        level,
        prev,
        next,
        factor
    );

    Ok(blend(&prev.parameters, &next.parameters, factor))
}

/// Blends two parameter bundles key by key.
///
/// Keys present in only one bundle pass through unchanged. `factor` is clamped
/// to `[0, 1]`; 0 favours `a`, 1 favours `b`.
pub fn blend(a: &Parameters, b: &Parameters, factor: f64) -> Parameters {
    let factor = clamp_unit(factor);
    let mut result = Parameters::new();

    for (key, value_a) in a {
        let value = match b.get(key) {
            Some(value_b) => interpolate_value(value_a, value_b, factor),
            None => value_a.clone(),
        };
        result.insert(key.clone(), value);
    }

    for (key, value_b) in b {
        if !a.contains_key(key) {
            result.insert(key.clone(), value_b.clone());
        }
    }

    result
}

/// Interpolates a single parameter value.
///
/// | `a` and `b`                        | result                                  |
/// |------------------------------------|-----------------------------------------|
/// | both integers                      | linear, rounded half to even            |
/// | both numbers                       | linear float                            |
/// | sequences of equal length          | element-wise, container kind of `a`     |
/// | both maps                          | [`blend`]                               |
/// | anything else                      | `a` below 0.5, otherwise `b`            |
pub fn interpolate_value(a: &ParamValue, b: &ParamValue, factor: f64) -> ParamValue {
    let factor = clamp_unit(factor);

    if let (ParamValue::Int(x), ParamValue::Int(y)) = (a, b) {
        return ParamValue::Int(lerp_rounded(*x, *y, factor));
    }
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return ParamValue::Float(lerp(x, y, factor));
    }

    match (a, b) {
        (ParamValue::List(xs) | ParamValue::Tuple(xs), ParamValue::List(ys) | ParamValue::Tuple(ys))
            if xs.len() == ys.len() =>
        {
            let items = xs
                .iter()
                .zip(ys)
                .map(|(x, y)| interpolate_value(x, y, factor))
                .collect();
            match a {
                ParamValue::Tuple(_) => ParamValue::Tuple(items),
                _ => ParamValue::List(items),
            }
        }
        (ParamValue::Map(x), ParamValue::Map(y)) => ParamValue::Map(blend(x, y, factor)),
        _ => closest(a, b, factor),
    }
}

/// Categorical choice: whichever side the factor is nearer.
fn closest(a: &ParamValue, b: &ParamValue, factor: f64) -> ParamValue {
    if factor < 0.5 {
        a.clone()
    } else {
        b.clone()
    }
}

/// Where a level sits between two ranges, from 0.0 (first) to 1.0 (second).
///
/// Levels inside either range give 0.0 or 1.0. Adjacent or overlapping ranges
/// leave no gap and give 0.5.
///
/// # Examples
///
/// ```
/// use deepdelve::interpolation_factor;
///
/// assert_eq!(interpolation_factor(3, (1, 5), (11, 15)), 0.0);
/// assert_eq!(interpolation_factor(8, (1, 5), (11, 15)), 0.4);
/// assert_eq!(interpolation_factor(12, (1, 5), (11, 15)), 1.0);
/// ```
pub fn interpolation_factor(level: i32, range1: (u32, u32), range2: (u32, u32)) -> f64 {
    let level = i64::from(level);
    let (start1, end1) = (i64::from(range1.0), i64::from(range1.1));
    let (start2, end2) = (i64::from(range2.0), i64::from(range2.1));

    if start1 <= level && level <= end1 {
        return 0.0;
    }
    if start2 <= level && level <= end2 {
        return 1.0;
    }

    let gap_start = end1 + 1;
    let gap_end = start2 - 1;
    let gap_size = gap_end - gap_start + 1;
    if gap_size <= 0 {
        return 0.5;
    }

    clamp_unit((level - gap_start) as f64 / gap_size as f64)
}
