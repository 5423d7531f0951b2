/// Per-entity motion.  Every moving population implements `Body`; the
/// player has its own input-driven update.

use nalgebra::Vector2;

use crate::config::{BoostMode, Rules};
use crate::entities::{Bomb, Direction, Enemy, EnemyPhase, Explosion, Guard, Player, Shuriken};
use crate::geometry::{fully_in_bounds, Playfield, Rect};
use crate::input::HeldKeys;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Alive,
    Expired,
}

/// Shared surface of everything the game loop advances and collides.
pub trait Body {
    fn bounds(&self) -> Rect;

    /// Advance one tick.  `Expired` means the caller should drop it.
    fn advance(&mut self, field: &Playfield) -> Lifecycle;
}

impl Body for Enemy {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn advance(&mut self, _field: &Playfield) -> Lifecycle {
        if self.rect.center.y >= self.hold_altitude {
            self.vy = 0.0;
            self.phase = EnemyPhase::Holding;
        }
        self.rect.center.y += self.vy;
        // Enemies only leave play by being destroyed.
        Lifecycle::Alive
    }
}

impl Body for Bomb {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn advance(&mut self, field: &Playfield) -> Lifecycle {
        ballistic(&mut self.rect, self.velocity, self.speed, field)
    }
}

impl Body for Shuriken {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn advance(&mut self, field: &Playfield) -> Lifecycle {
        ballistic(&mut self.rect, self.velocity, self.speed, field)
    }
}

impl Body for Explosion {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn advance(&mut self, _field: &Playfield) -> Lifecycle {
        self.life -= 1;
        if self.life < 0 {
            Lifecycle::Expired
        } else {
            Lifecycle::Alive
        }
    }
}

impl Explosion {
    /// Which of the two flicker frames to show; swaps every 10 ticks.
    pub fn frame(&self) -> usize {
        (self.life / 10).rem_euclid(2) as usize
    }
}

fn ballistic(rect: &mut Rect, velocity: Vector2<f32>, speed: f32, field: &Playfield) -> Lifecycle {
    rect.translate(velocity * speed);
    if fully_in_bounds(rect, field) {
        Lifecycle::Alive
    } else {
        Lifecycle::Expired
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Apply one tick of held keys: speed boost, invulnerability countdown,
/// movement and facing.
///
/// A move that would push the player out of bounds on either axis is
/// undone entirely; there is no sliding along the free axis.
pub fn update_player(player: &mut Player, held: HeldKeys, rules: &Rules, field: &Playfield) {
    if held.contains(HeldKeys::BOOST) {
        player.speed = rules.boost_speed;
    } else if rules.boost_mode == BoostMode::Momentary {
        player.speed = rules.base_speed;
    }

    if let Guard::Invulnerable { remaining } = player.guard {
        let remaining = remaining - 1;
        player.guard = if remaining < 0 {
            Guard::Normal
        } else {
            Guard::Invulnerable { remaining }
        };
    }

    let (dx, dy) = held.delta();
    let step = Vector2::new(dx as f32, dy as f32) * player.speed;
    player.rect.translate(step);
    if !fully_in_bounds(&player.rect, field) {
        player.rect.translate(-step);
    }

    if let Some(direction) = Direction::from_delta(dx, dy) {
        player.facing = direction;
    }
}
