/// Input resolution — turns raw terminal key events into one
/// `FrameInput` per tick.
///
/// Movement and boost are level-triggered: we keep a `key_frame` map that
/// records the frame number of the last press/repeat event for every key,
/// and a key counts as held while that record is fresh.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire after `HOLD_WINDOW` frames of silence.
///
/// Fire and quit are edge-triggered and queued as discrete events that
/// are drained exactly once per tick.

use std::collections::HashMap;

use bitflags::bitflags;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key counts as held if its last press/repeat arrived within this many
/// frames.  At 50 FPS, 6 frames ≈ 120 ms, shorter than the OS repeat
/// interval once repeat has kicked in.
pub const HOLD_WINDOW: u64 = 6;

bitflags! {
    /// Level-triggered keys held during a tick.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct HeldKeys: u8 {
        const UP = 0b0000_0001;
        const DOWN = 0b0000_0010;
        const LEFT = 0b0000_0100;
        const RIGHT = 0b0000_1000;
        const BOOST = 0b0001_0000;
    }
}

impl HeldKeys {
    /// Summed movement delta, each component in -1..=1.
    pub fn delta(self) -> (i32, i32) {
        let mut dx = 0;
        let mut dy = 0;
        if self.contains(HeldKeys::UP) {
            dy -= 1;
        }
        if self.contains(HeldKeys::DOWN) {
            dy += 1;
        }
        if self.contains(HeldKeys::LEFT) {
            dx -= 1;
        }
        if self.contains(HeldKeys::RIGHT) {
            dx += 1;
        }
        (dx, dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Throw one shuriken.
    Fire,
    /// Close request; ends the session without saving anything.
    Quit,
}

/// Everything the simulation needs from the keyboard for one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub held: HeldKeys,
    pub events: Vec<InputEvent>,
}

impl FrameInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn holding(held: HeldKeys) -> Self {
        Self { held, events: Vec::new() }
    }

    pub fn fire_count(&self) -> usize {
        self.events.iter().filter(|e| **e == InputEvent::Fire).count()
    }

    pub fn quit_requested(&self) -> bool {
        self.events.contains(&InputEvent::Quit)
    }
}

/// Accumulates key events between ticks.
#[derive(Debug, Default)]
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
    /// Last frame a movement key arrived with Shift held.
    shift_frame: Option<u64>,
    /// Set once the terminal has reported any key release.
    saw_release: bool,
    pending: Vec<InputEvent>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, key: &KeyEvent, frame: u64) {
        match key.kind {
            // Press: record key + handle one-shot actions
            KeyEventKind::Press => {
                // Classic terminals report a held key as repeated presses.
                if !self.saw_release && self.is_held(&key.code, frame) {
                    self.key_frame.insert(key.code, frame);
                    self.note_shift(key, frame);
                    return;
                }
                self.key_frame.insert(key.code, frame);
                self.note_shift(key, frame);
                match key.code {
                    KeyCode::Char(' ') => self.pending.push(InputEvent::Fire),
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        self.pending.push(InputEvent::Quit);
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.pending.push(InputEvent::Quit);
                    }
                    _ => {}
                }
            }
            // Repeat: refresh timestamp so key stays "held"; never fires
            KeyEventKind::Repeat => {
                self.key_frame.insert(key.code, frame);
                self.note_shift(key, frame);
            }
            // Release: remove key immediately (keyboard-enhancement path)
            KeyEventKind::Release => {
                self.saw_release = true;
                self.key_frame.remove(&key.code);
                if is_movement(&key.code) {
                    self.shift_frame = None;
                }
            }
        }
    }

    /// Snapshot the held keys and drain queued events.
    pub fn collect(&mut self, frame: u64) -> FrameInput {
        let mut held = HeldKeys::empty();
        let bindings: [(HeldKeys, &[KeyCode]); 5] = [
            (HeldKeys::UP, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
            (HeldKeys::DOWN, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
            (HeldKeys::LEFT, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            (HeldKeys::RIGHT, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
            (HeldKeys::BOOST, &[KeyCode::Char('x'), KeyCode::Char('X')]),
        ];
        for (flag, keys) in bindings {
            if keys.iter().any(|k| self.is_held(k, frame)) {
                held |= flag;
            }
        }
        if self.shift_frame.is_some_and(|last| fresh(last, frame)) {
            held |= HeldKeys::BOOST;
        }

        FrameInput {
            held,
            events: std::mem::take(&mut self.pending),
        }
    }

    /// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
    fn is_held(&self, key: &KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| fresh(last, frame))
            .unwrap_or(false)
    }

    fn note_shift(&mut self, key: &KeyEvent, frame: u64) {
        if is_movement(&key.code) && key.modifiers.contains(KeyModifiers::SHIFT) {
            self.shift_frame = Some(frame);
        }
    }
}

fn fresh(last: u64, frame: u64) -> bool {
    frame.saturating_sub(last) <= HOLD_WINDOW
}

fn is_movement(code: &KeyCode) -> bool {
    matches!(code, KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right)
}
