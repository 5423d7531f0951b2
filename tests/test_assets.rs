use std::collections::HashMap;

use shuriken_storm::assets::*;
use shuriken_storm::entities::{BombColor, Direction, EnemyKind};

#[test]
fn builtin_library_has_every_required_sprite() {
    let library = AssetLibrary::builtin();
    assert!(library.check().is_ok());
    for name in REQUIRED {
        assert!(library.get(name).is_ok(), "missing {name}");
    }
}

#[test]
fn player_sprite_heading_matches_each_direction() {
    let sprites = SpriteSet::load(&AssetLibrary::builtin()).unwrap();
    for dir in Direction::ALL {
        let surface = sprites.player.facing(dir, false);
        assert_eq!(surface.heading, Some(dir.degrees()), "{dir:?}");
        assert!(!surface.translucent);
    }
}

#[test]
fn west_and_east_sprites_are_mirror_images() {
    let sprites = SpriteSet::load(&AssetLibrary::builtin()).unwrap();
    let east = sprites.player.facing(Direction::East, false);
    let west = sprites.player.facing(Direction::West, false);
    assert_ne!(east.mirrored, west.mirrored);
    assert_eq!(east.glyph, west.glyph);
}

#[test]
fn faded_variants_are_translucent() {
    let sprites = SpriteSet::load(&AssetLibrary::builtin()).unwrap();
    for dir in Direction::ALL {
        let faded = sprites.player.facing(dir, true);
        assert!(faded.translucent);
        assert_eq!(faded.heading, Some(dir.degrees()));
    }
}

#[test]
fn mirror_twice_is_identity() {
    let s = Surface::new("@", crossterm::style::Color::White).facing(45);
    assert_eq!(s.mirror().heading, Some(135));
    assert_eq!(s.mirror().mirror(), s);
}

#[test]
fn rotation_wraps_around() {
    let s = Surface::new("@", crossterm::style::Color::White).facing(300);
    assert_eq!(s.rotate(90).heading, Some(30));
    assert_eq!(s.rotate(-330).heading, Some(330));
}

#[test]
fn arrows_point_at_nearest_octant() {
    assert_eq!(arrow(0), '→');
    assert_eq!(arrow(90), '↑');
    assert_eq!(arrow(180), '←');
    assert_eq!(arrow(270), '↓');
    assert_eq!(arrow(-45), '↘');
    assert_eq!(arrow(50), '↗');
}

#[test]
fn shuriken_is_rotated_to_its_flight_direction() {
    let sprites = SpriteSet::load(&AssetLibrary::builtin()).unwrap();
    assert_eq!(sprites.shuriken(Direction::North).heading, Some(90));
    assert_eq!(sprites.shuriken(Direction::SouthWest).heading, Some(225));
}

#[test]
fn bombs_and_aliens_resolve_per_variant() {
    let sprites = SpriteSet::load(&AssetLibrary::builtin()).unwrap();
    let colors: Vec<_> = BombColor::ALL.iter().map(|c| sprites.bomb(*c).color).collect();
    for (i, a) in colors.iter().enumerate() {
        assert!(!colors[i + 1..].contains(a));
    }
    assert_ne!(
        sprites.alien(EnemyKind::Saucer).glyph,
        sprites.alien(EnemyKind::Crab).glyph
    );
}

#[test]
fn glyph_override_replaces_builtin() {
    let overrides = HashMap::from([("bomb".to_string(), "o".to_string())]);
    let library = AssetLibrary::with_overrides(&overrides).unwrap();
    assert_eq!(library.get("bomb").unwrap().glyph, "o");
}

#[test]
fn unknown_override_is_rejected() {
    let overrides = HashMap::from([("ghost".to_string(), "G".to_string())]);
    let err = AssetLibrary::with_overrides(&overrides).unwrap_err();
    assert_eq!(err, AssetError::Unknown("ghost".to_string()));
}

#[test]
fn blank_override_is_rejected() {
    let overrides = HashMap::from([("bird".to_string(), " ".to_string())]);
    let err = AssetLibrary::with_overrides(&overrides).unwrap_err();
    assert_eq!(err, AssetError::Empty("bird".to_string()));
}
