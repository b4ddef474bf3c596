//! Integration tests for level-based creature parameter interpolation.

use deepdelve::{
    interpolation_factor, resolve, DelveError, DelveResult, EnemyPack, EnemyType, LevelRange,
    ParamValue, Parameters,
};
use proptest::prelude::*;

fn bundle(n: i64) -> Parameters {
    Parameters::from([("n".to_string(), ParamValue::Int(n))])
}

fn two_ranges() -> Vec<LevelRange> {
    vec![
        LevelRange::new(1, 5, "tentacle", bundle(2)).unwrap(),
        LevelRange::new(11, 15, "tentacle", bundle(12)).unwrap(),
    ]
}

#[test]
fn test_gap_level_is_blended() -> DelveResult<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    assert_eq!(interpolation_factor(8, (1, 5), (11, 15)), 0.4);
    assert_eq!(resolve(&two_ranges(), 8)?, bundle(6));
    Ok(())
}

#[test]
fn test_level_inside_range_is_exact() -> DelveResult<()> {
    assert_eq!(resolve(&two_ranges(), 3)?, bundle(2));
    assert_eq!(resolve(&two_ranges(), 11)?, bundle(12));
    Ok(())
}

#[test]
fn test_level_past_last_range_reuses_it() -> DelveResult<()> {
    assert_eq!(resolve(&two_ranges(), 20)?, bundle(12));
    assert_eq!(resolve(&two_ranges(), 99)?, bundle(12));
    assert_eq!(resolve(&two_ranges(), -4)?, bundle(2));
    Ok(())
}

#[test]
fn test_no_ranges_is_an_error() {
    assert!(matches!(resolve(&[], 5), Err(DelveError::EmptyInput(_))));
}

#[test]
fn test_gap_walk_changes_gradually() -> DelveResult<()> {
    let ranges = two_ranges();
    let values = (5..=11)
        .map(|level| {
            resolve(&ranges, level).map(|params| params["n"].as_i64().unwrap_or_default())
        })
        .collect::<DelveResult<Vec<_>>>()?;

    assert_eq!(values, vec![2, 2, 4, 6, 8, 10, 12]);
    Ok(())
}

#[test]
fn test_enemy_pack_document_loads() -> DelveResult<()> {
    let document = r#"{
        "pack_name": "Abyssal Horrors",
        "version": "1.0",
        "enemies": {
            "ENEMY_ORC": [
                {
                    "level_range": [4, 8],
                    "creature_type": "tentacle",
                    "creation_name": "Young Grasper",
                    "parameters": {
                        "num_segments": 8,
                        "thickness_base": 0.2,
                        "algorithm": "bezier",
                        "color": [0.8, 0.2, 0.4]
                    }
                },
                {
                    "level_range": [14, 19],
                    "creature_type": "tentacle",
                    "parameters": {
                        "num_segments": 16,
                        "thickness_base": 0.4,
                        "algorithm": "fourier",
                        "color": [0.4, 0.2, 0.8]
                    }
                }
            ],
            "ENEMY_SLIME": []
        }
    }"#;

    let pack: EnemyPack = serde_json::from_str(document).expect("valid pack document");
    assert_eq!(pack.pack_name, "Abyssal Horrors");
    assert_eq!(pack.total_mappings(), 2);
    assert_eq!(
        pack.mappings(EnemyType::Orc)[0].creation_name.as_deref(),
        Some("Young Grasper")
    );

    // Gap 9-13, level 11 is 40% of the way through it
    let params = pack.parameters_for_level(EnemyType::Orc, 11)?;
    assert_eq!(params["num_segments"], ParamValue::Int(11));
    assert_eq!(params["algorithm"], ParamValue::from("bezier"));
    let thickness = params["thickness_base"].as_f64().unwrap_or_default();
    assert!((thickness - 0.28).abs() < 1e-9);
    let color = params["color"].as_slice().expect("color stays a sequence");
    assert_eq!(color.len(), 3);
    assert!((color[0].as_f64().unwrap_or_default() - 0.64).abs() < 1e-9);

    let params = pack.parameters_for_level(EnemyType::Orc, 12)?;
    assert_eq!(params["algorithm"], ParamValue::from("fourier"));

    assert!(matches!(
        pack.parameters_for_level(EnemyType::Slime, 2),
        Err(DelveError::EmptyInput(_))
    ));
    Ok(())
}

#[test]
fn test_invalid_level_range_rejected_on_load() {
    let document = r#"{"level_range": [0, 30], "creature_type": "blob", "parameters": {}}"#;
    assert!(serde_json::from_str::<LevelRange>(document).is_err());
}

#[test]
fn test_level_range_round_trips_wire_shape() {
    let range = LevelRange::new(2, 6, "polyp", bundle(3)).unwrap();
    let value = serde_json::to_value(&range).expect("range serializes");

    assert_eq!(value["level_range"], serde_json::json!([2, 6]));
    assert_eq!(value["parameters"]["n"], serde_json::json!(3));
    assert!(value.get("creation_name").is_none());
}

proptest! {
    #[test]
    fn test_resolve_is_monotonic_across_gap(
        first_end in 1u32..10,
        gap in 1u32..10,
        low in -50i64..50,
        rise in -100i64..100,
    ) {
        let second_start = first_end + gap + 1;
        let high = low + rise;
        let ranges = vec![
            LevelRange::new(1, first_end, "blob", bundle(low)).unwrap(),
            LevelRange::new(second_start, 25, "blob", bundle(high)).unwrap(),
        ];

        let mut previous = low;
        for level in 1..=25 {
            let n = resolve(&ranges, level).unwrap()["n"].as_i64().unwrap();
            if rise >= 0 {
                prop_assert!(n >= previous);
            } else {
                prop_assert!(n <= previous);
            }
            prop_assert!(n >= low.min(high) && n <= low.max(high));
            previous = n;
        }
        prop_assert_eq!(previous, high);
    }

    #[test]
    fn test_resolve_is_repeatable(
        level in -5i32..30,
        low in -50i64..50,
        high in -50i64..50,
    ) {
        let ranges = vec![
            LevelRange::new(3, 6, "polyp", bundle(low)).unwrap(),
            LevelRange::new(14, 18, "polyp", bundle(high)).unwrap(),
        ];

        let first = resolve(&ranges, level).unwrap();
        let second = resolve(&ranges, level).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_inside_range_returns_its_parameters(
        start in 1u32..=25,
        len in 0u32..10,
        offset in 0u32..10,
        n in any::<i64>(),
    ) {
        let end = (start + len).min(25);
        let level = (start + offset).min(end);
        let ranges = vec![LevelRange::new(start, end, "medusa", bundle(n)).unwrap()];

        prop_assert_eq!(resolve(&ranges, level as i32).unwrap(), bundle(n));
    }
}
