use super::{
    BUILTIN_LEVEL, BoxDef, ContentLoadError, GameplayDefaults, LevelDef, LevelLibrary,
    MoveDirection, TrapDef, parse_ron, validate_level, validate_trap,
};
use bevy::math::Vec2;

use crate::movement::PLAYER_SIZE;

const DEFAULTS_FILE: &str = include_str!("../../assets/data/gameplay_defaults.ron");
const SECOND_LEVEL: &str = include_str!("../../assets/data/level_1_2.ron");

fn builtin_level() -> LevelDef {
    match parse_ron::<LevelDef>("level_1_1.ron", BUILTIN_LEVEL) {
        Ok(level) => level,
        Err(e) => panic!("bundled level should parse: {}", e),
    }
}

fn zone() -> BoxDef {
    BoxDef {
        position: (0.0, 0.0),
        size: (40.0, 100.0),
    }
}

// ---------------------------------------------------------------------------
// Bundled data
// ---------------------------------------------------------------------------

#[test]
fn test_bundled_level_parses_and_validates() {
    let level = builtin_level();
    assert_eq!(level.key(), (1, 1));
    assert!(level.goal.is_some());
    assert!(level.traps.iter().any(|t| matches!(t, TrapDef::CrushingWalls { .. })));
    assert!(level.traps.iter().any(|t| matches!(t, TrapDef::MovingPlatforms { .. })));

    let problems = validate_level(&level);
    assert!(problems.is_empty(), "unexpected problems: {:?}", problems);
}

#[test]
fn test_second_level_parses_and_validates() {
    let level: LevelDef = parse_ron("level_1_2.ron", SECOND_LEVEL).expect("level 1-2 parses");
    assert_eq!(level.key(), (1, 2));
    assert!(validate_level(&level).is_empty());
}

#[test]
fn test_transport_traps_are_classified() {
    let level = builtin_level();
    let transport: Vec<&str> = level
        .traps
        .iter()
        .filter(|t| t.is_transport())
        .map(TrapDef::id)
        .collect();
    assert_eq!(transport, vec!["sinking_bridge", "crusher"]);
}

/// A player standing between the walls must sit fully inside the crush probe,
/// which is centred on the walls and `probe_height` tall.
#[test]
fn test_crusher_probe_covers_standing_player() {
    let defaults = GameplayDefaults::default();
    let half_probe = defaults.crush.probe_height / 2.0;
    let second: LevelDef = parse_ron("level_1_2.ron", SECOND_LEVEL).expect("level 1-2 parses");

    let mut checked = 0;
    for level in [builtin_level(), second] {
        for trap in &level.traps {
            let TrapDef::CrushingWalls { left_wall, .. } = trap else {
                continue;
            };
            let floor = left_wall.center().y - left_wall.extents().y / 2.0;
            let player_center = floor + PLAYER_SIZE.y / 2.0;
            let reach = (player_center - left_wall.center().y).abs() + PLAYER_SIZE.y / 2.0;
            assert!(
                reach <= half_probe + 1e-3,
                "{}: player reaches {} past the wall centre, probe covers {}",
                trap.id(),
                reach,
                half_probe
            );
            checked += 1;
        }
    }
    assert_eq!(checked, 2);
}

#[test]
fn test_bundled_defaults_match_builtin_defaults() {
    let parsed: GameplayDefaults =
        parse_ron("gameplay_defaults.ron", DEFAULTS_FILE).expect("defaults parse");
    assert_eq!(parsed, GameplayDefaults::default());
}

#[test]
fn test_optional_trap_fields_take_defaults() {
    let level = builtin_level();
    let falling = level
        .traps
        .iter()
        .find(|t| matches!(t, TrapDef::FallingPlatform { .. }))
        .expect("level has a falling platform");

    match falling {
        TrapDef::FallingPlatform {
            delay_before_fall,
            shake_duration,
            despawn_delay,
            ..
        } => {
            assert_eq!(*delay_before_fall, 0.2);
            assert_eq!(*shake_duration, 0.2);
            assert_eq!(*despawn_delay, 0.5);
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_omitted_repeat_settings_mean_one_shot_without_return() {
    let level: LevelDef = parse_ron("level_1_2.ron", SECOND_LEVEL).expect("level 1-2 parses");
    let press = level
        .traps
        .iter()
        .find(|t| t.id() == "one_way_press")
        .expect("press exists");
    match press {
        TrapDef::CrushingWalls {
            repeatable,
            return_delay,
            ..
        } => {
            assert!(!repeatable);
            assert_eq!(*return_delay, 0.0);
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_parse_error_names_the_file() {
    let result = parse_ron::<LevelDef>("broken.ron", "(world: 1,");
    match result {
        Err(ContentLoadError::Parse { file, .. }) => assert_eq!(file, "broken.ron"),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_zero_speed_transport_is_rejected() {
    let trap = TrapDef::MovingPlatforms {
        id: "bad".to_string(),
        zone: zone(),
        platforms: vec![zone()],
        direction: MoveDirection::Up,
        distance: 100.0,
        move_speed: 0.0,
        repeatable: true,
        return_delay: 1.0,
    };
    let problems = validate_trap("test", &trap);
    assert_eq!(problems.len(), 1);
    assert!(problems[0].problem.contains("move_speed"));
}

#[test]
fn test_transport_without_objects_is_rejected() {
    let trap = TrapDef::MovingPlatforms {
        id: "empty".to_string(),
        zone: zone(),
        platforms: Vec::new(),
        direction: MoveDirection::Left,
        distance: 100.0,
        move_speed: 50.0,
        repeatable: false,
        return_delay: 0.0,
    };
    assert!(!validate_trap("test", &trap).is_empty());
}

#[test]
fn test_negative_delays_are_rejected() {
    let trap = TrapDef::CrushingWalls {
        id: "walls".to_string(),
        zone: zone(),
        left_wall: zone(),
        right_wall: zone(),
        final_gap: 0.5,
        move_speed: 5.0,
        repeatable: true,
        return_delay: -1.0,
    };
    let problems = validate_trap("test", &trap);
    assert_eq!(problems.len(), 1);
    assert!(problems[0].to_string().contains("return_delay"));
}

#[test]
fn test_duplicate_trap_ids_are_reported() {
    let mut level = builtin_level();
    let copy = level.traps[0].clone();
    level.traps.push(copy);

    let problems = validate_level(&level);
    assert!(problems.iter().any(|p| p.problem == "duplicate trap id"));
}

// ---------------------------------------------------------------------------
// Library and helpers
// ---------------------------------------------------------------------------

#[test]
fn test_library_orders_and_replaces_levels() {
    let first = builtin_level();
    let mut second = first.clone();
    second.stage = 2;

    let mut library = LevelLibrary::default();
    library.insert(first.clone());
    library.insert(second.clone());
    assert_eq!(library.next_after(1, 1).map(LevelDef::key), Some((1, 2)));
    assert!(library.next_after(1, 2).is_none());

    let mut renamed = first.clone();
    renamed.name = "Renamed".to_string();
    library.insert(renamed);
    assert_eq!(library.levels().len(), 2);
    assert_eq!(library.get(1, 1).map(|l| l.name.as_str()), Some("Renamed"));
}

#[test]
fn test_move_direction_vectors() {
    assert_eq!(MoveDirection::Left.vector(2.0), Vec2::new(-2.0, 0.0));
    assert_eq!(MoveDirection::Right.vector(2.0), Vec2::new(2.0, 0.0));
    assert_eq!(MoveDirection::Up.vector(3.0), Vec2::new(0.0, 3.0));
    assert_eq!(MoveDirection::Down.vector(3.0), Vec2::new(0.0, -3.0));
}
