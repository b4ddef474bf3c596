//! Integration tests for dungeon layout and secret room placement.

use deepdelve::generation::utils::create_rng;
use deepdelve::{
    DelveResult, Dungeon, DungeonConfig, DungeonGenerator, Generator, Position, TileType,
};
use proptest::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn generate(config: &DungeonConfig) -> DelveResult<Dungeon> {
    let mut rng = create_rng(config);
    DungeonGenerator::new().generate(config, &mut rng)
}

#[test]
fn test_rooms_stay_inside_grid_and_apart() -> DelveResult<()> {
    init_logging();

    for seed in 0..40 {
        let config = DungeonConfig::new(seed);
        let dungeon = generate(&config)?;

        for (i, room) in dungeon.rooms.iter().enumerate() {
            assert!(room.top_left.x >= 1 && room.top_left.y >= 1);
            let bottom_right = room.bottom_right();
            assert!(bottom_right.x < config.width as i32 - 1, "seed {}", seed);
            assert!(bottom_right.y < config.height as i32 - 1, "seed {}", seed);

            for other in &dungeon.rooms[i + 1..] {
                assert!(!room.intersects(other), "seed {}: rooms {} and {}", seed, room.id, other.id);
            }
        }

        DungeonGenerator::new().validate(&dungeon, &config)?;
    }

    Ok(())
}

#[test]
fn test_every_room_reachable_from_start() -> DelveResult<()> {
    init_logging();

    for seed in [1, 7, 99, 1234, 98765] {
        let dungeon = generate(&DungeonConfig::new(seed))?;
        let reachable = dungeon.reachable_from(dungeon.start);

        for room in &dungeon.rooms {
            assert!(reachable.contains(&room.center()), "seed {}: room {}", seed, room.id);
        }
        if let Some(stairs) = dungeon.stairs {
            assert!(reachable.contains(&stairs));
        }
    }

    Ok(())
}

#[test]
fn test_single_stairs_tile_in_last_room() -> DelveResult<()> {
    let dungeon = generate(&DungeonConfig::new(31))?;
    let last = dungeon.rooms.last().copied().expect("default config places rooms");

    assert_eq!(dungeon.grid.count(TileType::Stairs), 1);
    assert_eq!(dungeon.grid.find_first(TileType::Stairs), Some(last.center()));
    assert_eq!(dungeon.stairs, Some(last.center()));

    Ok(())
}

#[test]
fn test_max_rooms_caps_room_count() -> DelveResult<()> {
    for seed in 0..20 {
        let mut config = DungeonConfig::with_dimensions(seed, 50, 50);
        config.max_rooms = 10;
        let dungeon = generate(&config)?;

        assert!(!dungeon.rooms.is_empty());
        assert!(dungeon.rooms.len() <= 10);
    }

    Ok(())
}

#[test]
fn test_secret_room_invariants() -> DelveResult<()> {
    init_logging();
    let mut found = 0;

    for seed in 0..60 {
        let dungeon = generate(&DungeonConfig::new(seed))?;
        let Some(secret) = dungeon.secret else {
            continue;
        };
        found += 1;

        assert_eq!(dungeon.tile_at(secret.entrance), TileType::SecretWall);
        assert_eq!(dungeon.grid.count(TileType::SecretWall), 1);
        assert!(!dungeon.is_walkable(secret.entrance));

        // The entrance backs onto a regular room other than the start room
        let parent = dungeon
            .room_at(secret.parent_side())
            .expect("entrance sits on a room edge");
        assert_ne!(parent.id, 0);
        assert_eq!(dungeon.tile_at(secret.parent_side()), TileType::Floor);

        for pos in secret.room.positions() {
            assert_eq!(dungeon.tile_at(pos), TileType::Floor);
            assert!(dungeon.is_secret_room(pos));
        }

        let stairs = dungeon.stairs.expect("secret rooms need stairs");
        assert!(secret.entrance.manhattan_distance(stairs) >= 5);
        assert!((5..=6).contains(&secret.room.width));
        assert!(!dungeon.rooms.contains(&secret.room));
    }

    assert!(found > 0, "no seed produced a secret room");
    Ok(())
}

#[test]
fn test_revealing_secret_wall_connects_secret_room() -> DelveResult<()> {
    let mut dungeon = (0..60)
        .map(|seed| generate(&DungeonConfig::new(seed)))
        .collect::<DelveResult<Vec<_>>>()?
        .into_iter()
        .find(|dungeon| dungeon.secret.is_some())
        .expect("some seed produces a secret room");
    let secret = dungeon.secret.expect("checked above");
    let inside = secret.entrance.step(secret.direction, 1);

    assert!(dungeon.reveal_secret_wall());
    assert_eq!(dungeon.tile_at(secret.entrance), TileType::Floor);
    assert!(dungeon.reachable_from(dungeon.start).contains(&inside));

    // Second reveal is a no-op
    assert!(!dungeon.reveal_secret_wall());
    Ok(())
}

#[test]
fn test_same_seed_same_dungeon() -> DelveResult<()> {
    let config = DungeonConfig::for_level(8080, 12);
    let first = generate(&config)?;
    let second = generate(&config)?;

    assert_eq!(first, second);
    assert_eq!(first.grid.to_string(), second.grid.to_string());
    Ok(())
}

#[test]
fn test_dungeon_serializes() -> DelveResult<()> {
    let dungeon = generate(&DungeonConfig::for_testing(5))?;
    let json = serde_json::to_string(&dungeon).expect("dungeon serializes");
    let restored: Dungeon = serde_json::from_str(&json).expect("dungeon deserializes");

    assert_eq!(restored, dungeon);
    Ok(())
}

#[test]
fn test_into_parts() -> DelveResult<()> {
    let dungeon = generate(&DungeonConfig::new(3))?;
    let start = dungeon.start;
    let room_count = dungeon.rooms.len();

    let (grid, rooms, start_pos) = dungeon.into_parts();
    assert_eq!(grid.width, 50);
    assert_eq!(rooms.len(), room_count);
    assert_eq!(start_pos, start);
    assert_eq!(start_pos, rooms[0].center());
    assert_eq!(grid.get_tile(Position::new(0, 0)), Some(TileType::Wall));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_generated_dungeons_validate(
        seed in any::<u64>(),
        width in 30u32..80,
        height in 20u32..50,
        max_rooms in 1u32..20,
    ) {
        let mut config = DungeonConfig::with_dimensions(seed, width, height);
        config.max_rooms = max_rooms;

        let dungeon = generate(&config).unwrap();
        prop_assert!(dungeon.rooms.len() <= max_rooms as usize);
        prop_assert!(!dungeon.rooms.is_empty());
        prop_assert!(DungeonGenerator::new().validate(&dungeon, &config).is_ok());

        // Border stays solid
        for x in 0..width as i32 {
            prop_assert_eq!(dungeon.tile_at(Position::new(x, 0)), TileType::Wall);
            prop_assert_eq!(dungeon.tile_at(Position::new(x, height as i32 - 1)), TileType::Wall);
        }
    }
}
