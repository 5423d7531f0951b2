/// Pure game-logic functions.
///
/// State transitions take an immutable reference to the current
/// `EntireGameStateInfo` (and, where needed, an RNG handle) and return a brand-new
/// `EntireGameStateInfo`.  Side effects are limited to the injected RNG.
/// Collision rules live in `collision`, per-entity motion in `motion`.

pub mod collision;
pub mod motion;

use rand::seq::SliceRandom;
use rand::Rng;
use slotmap::SlotMap;

use crate::config::{GameConfig, Rules};
use crate::entities::{
    Bomb, BombColor, Direction, Enemy, EnemyKind, EnemyPhase, EntireGameStateInfo, GameStatus,
    Guard, LifeGauge, Player, Pose, Shuriken,
};
use crate::geometry::{direction_to, fully_in_bounds, Playfield, Rect};
use crate::input::FrameInput;

pub use collision::CollisionReport;
pub use motion::{Body, Lifecycle};

// ── Hitbox sizes (world units) ───────────────────────────────────────────────

pub const PLAYER_SIZE: (f32, f32) = (96.0, 96.0);
pub const ENEMY_SIZE: (f32, f32) = (90.0, 70.0);
pub const SHURIKEN_SIZE: (f32, f32) = (48.0, 48.0);
pub const EXPLOSION_SIZE: (f32, f32) = (100.0, 90.0);


const ENEMY_KINDS: [EnemyKind; 3] = [EnemyKind::Saucer, EnemyKind::Squid, EnemyKind::Crab];

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state from a loaded config.
pub fn init_state(config: &GameConfig) -> EntireGameStateInfo {
    init_state_with(config.rules, config.playfield())
}

/// The player's box at session start: (900, 400) on the default
/// 1600×900 field, scaled for any other size.
pub fn player_start(field: &Playfield) -> Rect {
    let (w, h) = PLAYER_SIZE;
    Rect::from_center(field.width * 9.0 / 16.0, field.height * 4.0 / 9.0, w, h)
}

pub fn init_state_with(rules: Rules, field: Playfield) -> EntireGameStateInfo {
    EntireGameStateInfo {
        player: Player {
            rect: player_start(&field),
            facing: Direction::East,
            speed: rules.base_speed,
            guard: Guard::Normal,
            pose: Pose::Normal,
        },
        enemies: SlotMap::with_key(),
        bombs: SlotMap::with_key(),
        shurikens: SlotMap::with_key(),
        explosions: SlotMap::with_key(),
        score: 0,
        life: LifeGauge::full(rules.initial_life),
        status: GameStatus::Playing,
        timer: 0,
        frame: 0,
        field,
        rules,
    }
}

/// A fresh enemy at the top edge with randomized hold altitude and
/// bomb cadence.
pub fn spawn_enemy(rules: &Rules, field: &Playfield, rng: &mut impl Rng) -> Enemy {
    let (w, h) = ENEMY_SIZE;
    let x = rng.gen_range(0.0..=field.width);
    let hold_altitude = rng.gen_range(rules.hold_altitude_min..=field.height / 2.0);
    let bomb_interval = rng.gen_range(rules.bomb_interval_min..=rules.bomb_interval_max);
    let kind = *ENEMY_KINDS.choose(rng).unwrap_or(&EnemyKind::Saucer);
    Enemy {
        rect: Rect::from_center(x, 0.0, w, h),
        vy: rules.enemy_descent_speed,
        phase: EnemyPhase::Descending,
        hold_altitude,
        bomb_interval,
        kind,
    }
}

/// A bomb released from just below `enemy`, aimed at where the player is
/// right now.  The aim is never recomputed.
pub fn drop_bomb(enemy: &Enemy, player: &Player, rules: &Rules, rng: &mut impl Rng) -> Bomb {
    let radius = rng.gen_range(rules.bomb_radius_min..=rules.bomb_radius_max) as f32;
    let rect = Rect::from_center(
        enemy.rect.center.x,
        enemy.rect.center.y + enemy.rect.size.y / 2.0,
        radius * 2.0,
        radius * 2.0,
    );
    let velocity = direction_to(&rect, &player.rect).unwrap_or_else(|| {
        log::warn!("Bomb spawned on top of the player; dropping straight down");
        Direction::South.unit()
    });
    let color = *BombColor::ALL.choose(rng).unwrap_or(&BombColor::Red);
    Bomb {
        rect,
        velocity,
        speed: rules.bomb_speed,
        color,
    }
}

/// A shuriken leaving the player one body-length ahead along its facing.
pub fn make_shuriken(player: &Player, rules: &Rules) -> Shuriken {
    let velocity = player.facing.unit();
    let (w, h) = SHURIKEN_SIZE;
    let center = player.rect.center + player.rect.size.component_mul(&velocity);
    Shuriken {
        rect: Rect::from_center(center.x, center.y, w, h),
        velocity,
        speed: rules.shuriken_speed,
        facing: player.facing,
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Apply one frame of input to the player: reset the pose, then boost,
/// guard countdown and movement, then one shuriken per Fire event.
pub fn apply_input(state: &mut EntireGameStateInfo, input: &FrameInput) {
    let rules = state.rules;
    state.player.pose = Pose::Normal;
    motion::update_player(&mut state.player, input.held, &rules, &state.field);
    for _ in 0..input.fire_count() {
        state.shurikens.insert(make_shuriken(&state.player, &rules));
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// A defeated state is returned unchanged: the loop is frozen.
pub fn tick(state: &EntireGameStateInfo, input: &FrameInput, rng: &mut impl Rng) -> EntireGameStateInfo {
    let mut next = state.clone();
    if next.status != GameStatus::Playing {
        return next;
    }
    let rules = next.rules;
    let field = next.field;
    next.frame += 1;

    // ── 1. Player input ──────────────────────────────────────────────────────
    apply_input(&mut next, input);

    // ── 2. Pseudo-time ───────────────────────────────────────────────────────
    next.timer += rules.tick_step;

    // ── 3. Spawn a new enemy ─────────────────────────────────────────────────
    if next.timer % rules.enemy_spawn_period == 0 {
        let enemy = spawn_enemy(&rules, &field, rng);
        log::debug!(
            "Enemy spawned at x={:.0}, holds at y={:.0}, bombs every {}",
            enemy.rect.center.x,
            enemy.hold_altitude,
            enemy.bomb_interval
        );
        next.enemies.insert(enemy);
    }

    // ── 4. Holding enemies drop bombs on their own cadence ──────────────────
    let timer = next.timer;
    let bombs: Vec<Bomb> = next
        .enemies
        .values()
        .filter(|e| e.phase == EnemyPhase::Holding && timer % e.bomb_interval == 0)
        .map(|e| drop_bomb(e, &next.player, &rules, &mut *rng))
        .collect();
    for bomb in bombs {
        next.bombs.insert(bomb);
    }

    // ── 5–8. Collisions ──────────────────────────────────────────────────────
    let report = collision::resolve(&mut next);
    if report.fatal {
        // Frozen: nothing advances, but the final frame only shows what
        // is on the playfield.
        next.bombs.retain(|_, b| fully_in_bounds(&b.rect, &field));
        next.shurikens.retain(|_, s| fully_in_bounds(&s.rect, &field));
        return next;
    }

    // ── 9. Advance everything that survived ──────────────────────────────────
    next.enemies.retain(|_, e| e.advance(&field) == Lifecycle::Alive);
    next.bombs.retain(|_, b| b.advance(&field) == Lifecycle::Alive);
    next.shurikens.retain(|_, s| s.advance(&field) == Lifecycle::Alive);
    next.explosions.retain(|_, x| x.advance(&field) == Lifecycle::Alive);

    next
}
