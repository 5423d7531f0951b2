mod common;

use nalgebra::Vector2;

use shuriken_storm::compute::{Body, Lifecycle};
use shuriken_storm::entities::*;
use shuriken_storm::geometry::Rect;

use common::{bomb_at, enemy_at, shuriken_at, FIELD};

#[test]
fn direction_round_trips_through_delta() {
    for dir in Direction::ALL {
        let (dx, dy) = dir.delta();
        assert_eq!(Direction::from_delta(dx, dy), Some(dir));
    }
    assert_eq!(Direction::from_delta(0, 0), None);
}

#[test]
fn direction_units_point_the_right_way() {
    assert_eq!(Direction::North.unit(), Vector2::new(0.0, -1.0));
    assert_eq!(Direction::West.unit(), Vector2::new(-1.0, 0.0));
    let ne = Direction::NorthEast.unit();
    assert!((ne.norm() - 1.0).abs() < 1e-6);
    assert!(ne.x > 0.0 && ne.y < 0.0);
}

#[test]
fn enemy_stops_once_it_reaches_hold_altitude() {
    let mut e = enemy_at(400.0, 95.0, EnemyPhase::Descending);
    e.hold_altitude = 100.0;

    assert_eq!(e.advance(&FIELD), Lifecycle::Alive);
    assert_eq!(e.phase, EnemyPhase::Descending);
    assert_eq!(e.rect.center.y, 101.0);

    e.advance(&FIELD);
    assert_eq!(e.phase, EnemyPhase::Holding);
    assert_eq!(e.vy, 0.0);
    assert_eq!(e.rect.center.y, 101.0);
}

#[test]
fn holding_enemy_never_moves_or_resumes_descent() {
    let mut e = enemy_at(400.0, 200.0, EnemyPhase::Descending);
    e.hold_altitude = 150.0;
    e.advance(&FIELD);
    let parked = e.rect.center.y;

    for _ in 0..500 {
        assert_eq!(e.advance(&FIELD), Lifecycle::Alive);
        assert_eq!(e.phase, EnemyPhase::Holding);
        assert_eq!(e.rect.center.y, parked);
    }
}

#[test]
fn bomb_expires_on_leaving_the_playfield() {
    let mut b = bomb_at(400.0, 870.0, 20.0);
    assert_eq!(b.advance(&FIELD), Lifecycle::Alive); // bottom 896
    assert_eq!(b.advance(&FIELD), Lifecycle::Expired); // bottom 902
}

#[test]
fn shuriken_expires_on_any_axis() {
    let mut s = shuriken_at(800.0, 30.0);
    s.velocity = Vector2::new(0.0, -1.0);
    assert_eq!(s.advance(&FIELD), Lifecycle::Expired); // top 10 - 24 < 0
}

#[test]
fn explosion_lives_its_full_count_then_expires() {
    let mut x = Explosion {
        rect: Rect::from_center(100.0, 100.0, 100.0, 90.0),
        life: 2,
    };
    assert_eq!(x.advance(&FIELD), Lifecycle::Alive); // 1
    assert_eq!(x.advance(&FIELD), Lifecycle::Alive); // 0
    assert_eq!(x.advance(&FIELD), Lifecycle::Expired); // -1
}

#[test]
fn explosion_frame_alternates_every_ten_ticks() {
    let mut x = Explosion {
        rect: Rect::from_center(100.0, 100.0, 100.0, 90.0),
        life: 100,
    };
    assert_eq!(x.frame(), 0);
    x.life = 95;
    assert_eq!(x.frame(), 1);
    x.life = 89;
    assert_eq!(x.frame(), 0);
}

#[test]
fn life_gauge_last_point() {
    let mut gauge = LifeGauge::full(10);
    assert!(!gauge.is_last_point());
    gauge.value = 1;
    assert!(gauge.is_last_point());
}

#[test]
fn game_state_clone_is_independent() {
    let original = common::make_state();
    let mut cloned = original.clone();

    cloned.player.rect.center.x = 99.0;
    cloned.score = 999;
    cloned.enemies.insert(enemy_at(5.0, 5.0, EnemyPhase::Descending));

    assert_eq!(original.player.rect.center.x, 900.0);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}
