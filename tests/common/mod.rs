#![allow(dead_code)]

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use shuriken_storm::compute::init_state_with;
use shuriken_storm::config::Rules;
use shuriken_storm::entities::*;
use shuriken_storm::geometry::{Playfield, Rect};

pub const FIELD: Playfield = Playfield { width: 1600.0, height: 900.0 };

/// Default rules, player at (900, 400), nothing else on screen.
pub fn make_state() -> EntireGameStateInfo {
    init_state_with(Rules::default(), FIELD)
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

pub fn enemy_at(x: f32, y: f32, phase: EnemyPhase) -> Enemy {
    Enemy {
        rect: Rect::from_center(x, y, 90.0, 70.0),
        vy: if phase == EnemyPhase::Holding { 0.0 } else { 6.0 },
        phase,
        hold_altitude: 450.0,
        bomb_interval: 300,
        kind: EnemyKind::Saucer,
    }
}

pub fn bomb_at(x: f32, y: f32, radius: f32) -> Bomb {
    Bomb {
        rect: Rect::from_center(x, y, radius * 2.0, radius * 2.0),
        velocity: Vector2::new(0.0, 1.0),
        speed: 6.0,
        color: BombColor::Red,
    }
}

pub fn shuriken_at(x: f32, y: f32) -> Shuriken {
    Shuriken {
        rect: Rect::from_center(x, y, 48.0, 48.0),
        velocity: Vector2::new(1.0, 0.0),
        speed: 20.0,
        facing: Direction::East,
    }
}
