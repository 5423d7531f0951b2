/// All game entity types — pure data, no logic.

use nalgebra::Vector2;
use slotmap::{new_key_type, SlotMap};

use crate::config::Rules;
use crate::geometry::{Playfield, Rect};

new_key_type! {
    pub struct EnemyKey;
    pub struct BombKey;
    pub struct ShurikenKey;
    pub struct ExplosionKey;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Life reached zero. The loop freezes on this state.
    Defeated,
}

// ── Facing ────────────────────────────────────────────────────────────────────

/// The eight compass directions the player can face.
/// Screen coordinates: y grows downward, so `North` is `(0, -1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Map a summed key delta (each component in -1..=1) to a direction.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        match (dx.signum(), dy.signum()) {
            (1, 0) => Some(Direction::East),
            (1, -1) => Some(Direction::NorthEast),
            (0, -1) => Some(Direction::North),
            (-1, -1) => Some(Direction::NorthWest),
            (-1, 0) => Some(Direction::West),
            (-1, 1) => Some(Direction::SouthWest),
            (0, 1) => Some(Direction::South),
            (1, 1) => Some(Direction::SouthEast),
            _ => None,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::NorthEast => (1, -1),
            Direction::North => (0, -1),
            Direction::NorthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::SouthWest => (-1, 1),
            Direction::South => (0, 1),
            Direction::SouthEast => (1, 1),
        }
    }

    /// Counter-clockwise screen angle in degrees, East = 0.
    pub fn degrees(self) -> i32 {
        match self {
            Direction::East => 0,
            Direction::NorthEast => 45,
            Direction::North => 90,
            Direction::NorthWest => 135,
            Direction::West => 180,
            Direction::SouthWest => 225,
            Direction::South => 270,
            Direction::SouthEast => 315,
        }
    }

    pub fn unit(self) -> Vector2<f32> {
        let (dx, dy) = self.delta();
        Vector2::new(dx as f32, dy as f32).normalize()
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Damage guard. `remaining` counts down once per tick and the player
/// reverts to `Normal` when it drops below zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    Normal,
    Invulnerable { remaining: i32 },
}

/// Cosmetic expression picked by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pose {
    Normal,
    /// Shown for the frame in which an enemy was shot down.
    Joy,
    Defeated,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub facing: Direction,
    pub speed: f32,
    pub guard: Guard,
    pub pose: Pose,
}

impl Player {
    pub fn is_invulnerable(&self) -> bool {
        matches!(self.guard, Guard::Invulnerable { .. })
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyPhase {
    Descending,
    Holding,
}

/// Which of the three alien sprites an enemy wears.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Saucer,
    Squid,
    Crab,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub vy: f32,
    pub phase: EnemyPhase,
    /// y at which descent stops.
    pub hold_altitude: f32,
    /// Bombs drop when the tick counter is a multiple of this.
    pub bomb_interval: u64,
    pub kind: EnemyKind,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombColor {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
}

impl BombColor {
    pub const ALL: [BombColor; 6] = [
        BombColor::Red,
        BombColor::Green,
        BombColor::Blue,
        BombColor::Yellow,
        BombColor::Magenta,
        BombColor::Cyan,
    ];
}

/// Dropped by a holding enemy. `velocity` is a unit vector fixed at spawn.
#[derive(Clone, Debug)]
pub struct Bomb {
    pub rect: Rect,
    pub velocity: Vector2<f32>,
    pub speed: f32,
    pub color: BombColor,
}

/// Thrown by the player along its facing at the moment of the throw.
#[derive(Clone, Debug)]
pub struct Shuriken {
    pub rect: Rect,
    pub velocity: Vector2<f32>,
    pub speed: f32,
    pub facing: Direction,
}

/// A purely visual flash left behind by a destroyed enemy or bomb.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub rect: Rect,
    /// Remaining frames; removed once negative.
    pub life: i32,
}

// ── Counters ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifeGauge {
    pub value: u32,
    pub max: u32,
}

impl LifeGauge {
    pub fn full(max: u32) -> Self {
        Self { value: max, max }
    }

    pub fn is_last_point(&self) -> bool {
        self.value == 1
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct EntireGameStateInfo {
    pub player: Player,
    pub enemies: SlotMap<EnemyKey, Enemy>,
    pub bombs: SlotMap<BombKey, Bomb>,
    pub shurikens: SlotMap<ShurikenKey, Shuriken>,
    pub explosions: SlotMap<ExplosionKey, Explosion>,
    pub score: u32,
    pub life: LifeGauge,
    pub status: GameStatus,
    /// Pseudo-time used for spawn gating; advances by `rules.tick_step`.
    pub timer: u64,
    /// Frames simulated so far; drives the background scroll.
    pub frame: u64,
    pub field: Playfield,
    pub rules: Rules,
}
