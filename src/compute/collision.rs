/// Collision resolution for one frame.
///
/// Four passes run in a fixed order: shuriken×enemy, shuriken×bomb,
/// player×bomb, player×enemy.  Each pass collects the keys it destroys and
/// removes them once the pass is complete, so nothing destroyed in one
/// pass takes part in a later one.

use slotmap::{Key, SlotMap};

use crate::entities::{
    EntireGameStateInfo, Explosion, ExplosionKey, GameStatus, Guard, Pose, Shuriken, ShurikenKey,
};
use crate::geometry::Rect;

use super::motion::Body;
use super::EXPLOSION_SIZE;

/// What the collision passes did this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub enemies_shot: u32,
    pub bombs_shot: u32,
    /// Life points lost this frame (0 or 1).
    pub damage_taken: u32,
    /// Contacts soaked up while invulnerable.
    pub absorbed: u32,
    /// The last life point was lost; the frame must freeze here.
    pub fatal: bool,
}

pub fn resolve(state: &mut EntireGameStateInfo) -> CollisionReport {
    let mut report = CollisionReport::default();
    let rules = state.rules;

    // ── 1. Shuriken ↔ enemies ────────────────────────────────────────────────
    for rect in shoot_down(&mut state.enemies, &mut state.shurikens) {
        spawn_explosion(&mut state.explosions, &rect, rules.enemy_explosion_life);
        state.score += rules.enemy_score;
        report.enemies_shot += 1;
    }
    if report.enemies_shot > 0 {
        state.player.pose = Pose::Joy;
        log::debug!("{} enemies down, score {}", report.enemies_shot, state.score);
    }

    // ── 2. Shuriken ↔ bombs ──────────────────────────────────────────────────
    for rect in shoot_down(&mut state.bombs, &mut state.shurikens) {
        spawn_explosion(&mut state.explosions, &rect, rules.bomb_explosion_life);
        state.score += rules.bomb_score;
        report.bombs_shot += 1;
    }

    // ── 3. Bombs ↔ player ────────────────────────────────────────────────────
    let hits = take_overlapping(&mut state.bombs, &state.player.rect);
    absorb_hits(state, &hits, &mut report);
    if report.fatal {
        return report;
    }

    // ── 4. Enemies ↔ player ──────────────────────────────────────────────────
    let hits = take_overlapping(&mut state.enemies, &state.player.rect);
    absorb_hits(state, &hits, &mut report);

    report
}

/// Destroy every target touched by at least one live shuriken, along with
/// all shuriken touching it.  A shuriken spent on one target is not
/// offered to the next.  Returns the bounds of the destroyed targets.
fn shoot_down<K: Key, T: Body>(
    targets: &mut SlotMap<K, T>,
    shurikens: &mut SlotMap<ShurikenKey, Shuriken>,
) -> Vec<Rect> {
    let mut spent: Vec<ShurikenKey> = Vec::new();
    let mut downed: Vec<K> = Vec::new();

    for (key, target) in targets.iter() {
        let bounds = target.bounds();
        let hits: Vec<ShurikenKey> = shurikens
            .iter()
            .filter(|(sk, s)| !spent.contains(sk) && s.rect.overlaps(&bounds))
            .map(|(sk, _)| sk)
            .collect();
        if !hits.is_empty() {
            spent.extend(hits);
            downed.push(key);
        }
    }

    for sk in spent {
        shurikens.remove(sk);
    }
    downed
        .into_iter()
        .filter_map(|key| targets.remove(key))
        .map(|target| target.bounds())
        .collect()
}

/// Remove every body overlapping `target`; contact always destroys it.
fn take_overlapping<K: Key, T: Body>(bodies: &mut SlotMap<K, T>, target: &Rect) -> Vec<Rect> {
    let touching: Vec<K> = bodies
        .iter()
        .filter(|(_, body)| body.bounds().overlaps(target))
        .map(|(key, _)| key)
        .collect();
    touching
        .into_iter()
        .filter_map(|key| bodies.remove(key))
        .map(|body| body.bounds())
        .collect()
}

/// Apply hazard contacts to the player, one at a time:
/// * invulnerable → flash at the hazard, stop looking at further contacts;
/// * last life point → defeat, no flash;
/// * otherwise → lose a point and turn invulnerable, so any further
///   contact this frame lands in the first branch.
fn absorb_hits(state: &mut EntireGameStateInfo, hits: &[Rect], report: &mut CollisionReport) {
    for rect in hits {
        if state.player.is_invulnerable() {
            spawn_explosion(&mut state.explosions, rect, state.rules.contact_explosion_life);
            report.absorbed += 1;
            break;
        }

        if state.life.is_last_point() {
            state.life.value = 0;
            state.player.pose = Pose::Defeated;
            state.status = GameStatus::Defeated;
            report.fatal = true;
            log::info!("Player defeated, final score {}", state.score);
            return;
        }

        state.life.value = state.life.value.saturating_sub(1);
        state.player.guard = Guard::Invulnerable {
            remaining: state.rules.invulnerable_ticks,
        };
        report.damage_taken += 1;
        log::info!("Player hit, life {}/{}", state.life.value, state.life.max);
    }
}

fn spawn_explosion(
    explosions: &mut SlotMap<ExplosionKey, Explosion>,
    source: &Rect,
    life: i32,
) {
    let (w, h) = EXPLOSION_SIZE;
    explosions.insert(Explosion {
        rect: Rect::from_center(source.center.x, source.center.y, w, h),
        life,
    });
}
