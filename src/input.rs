//! Input events and the per-frame input buffer
//!
//! Browser callbacks never touch the simulation directly. They push
//! `InputEvent`s into an `InputQueue`; the session drains it at the top of
//! each frame and folds the events into `HeldKeys` and a `TickInput`.

use std::collections::VecDeque;

use crate::sim::{MoveIntent, TickInput};

/// Maximum buffered events between frames
pub const INPUT_QUEUE_CAPACITY: usize = 64;

/// Keys the gallery reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyW" => Some(Key::Forward),
            "ArrowDown" | "KeyS" => Some(Key::Backward),
            "ArrowLeft" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "KeyD" => Some(Key::Right),
            "Space" => Some(Key::Jump),
            _ => None,
        }
    }
}

/// A raw notification from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    LockAcquired,
    LockReleased,
    KeyDown(Key),
    KeyUp(Key),
    Fire,
    /// Pointer movement in pixels
    Look { dx: f32, dy: f32 },
    Resize { width: u32, height: u32 },
}

/// FIFO of events waiting for the next frame, bounded for pointer motion
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: VecDeque::with_capacity(INPUT_QUEUE_CAPACITY),
        }
    }

    /// Queue an event.
    ///
    /// Consecutive look events merge into one delta. When the buffer is full
    /// the oldest look or fire event is evicted; lock, key and resize events
    /// are always kept.
    pub fn push(&mut self, event: InputEvent) {
        if let InputEvent::Look { dx, dy } = event {
            if let Some(InputEvent::Look { dx: px, dy: py }) = self.events.back_mut() {
                *px += dx;
                *py += dy;
                return;
            }
        }

        if self.events.len() >= INPUT_QUEUE_CAPACITY {
            let evictable = self
                .events
                .iter()
                .position(|e| matches!(e, InputEvent::Look { .. }))
                .or_else(|| self.events.iter().position(|e| *e == InputEvent::Fire));
            match evictable.and_then(|i| self.events.remove(i)) {
                Some(dropped) => log::warn!("Input queue full, dropping {:?}", dropped),
                None => log::warn!("Input queue full of state changes, growing past {}", INPUT_QUEUE_CAPACITY),
            }
        }
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Movement keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    intent: MoveIntent,
}

impl HeldKeys {
    /// Record a key press; returns true for a jump request
    pub fn press(&mut self, key: Key) -> bool {
        self.set(key, true)
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    /// Forget everything held (on pause)
    pub fn clear(&mut self) {
        self.intent = MoveIntent::default();
    }

    pub fn intent(&self) -> MoveIntent {
        self.intent
    }

    fn set(&mut self, key: Key, down: bool) -> bool {
        match key {
            Key::Forward => self.intent.forward = down,
            Key::Backward => self.intent.backward = down,
            Key::Left => self.intent.left = down,
            Key::Right => self.intent.right = down,
            Key::Jump => return down,
        }
        false
    }
}

/// Fold a key event into the held keys and the pending tick input.
///
/// Look, fire, lock and resize events act on the session directly and are
/// left to the caller.
pub fn apply_event(held: &mut HeldKeys, pending: &mut TickInput, event: InputEvent) {
    match event {
        InputEvent::KeyDown(key) => {
            if held.press(key) {
                pending.jump = true;
            }
        }
        InputEvent::KeyUp(key) => held.release(key),
        _ => {}
    }
    pending.movement = held.intent();
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_code("KeyW"), Some(Key::Forward));
        assert_eq!(Key::from_code("ArrowUp"), Some(Key::Forward));
        assert_eq!(Key::from_code("KeyS"), Some(Key::Backward));
        assert_eq!(Key::from_code("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_code("KeyD"), Some(Key::Right));
        assert_eq!(Key::from_code("Space"), Some(Key::Jump));
        assert_eq!(Key::from_code("KeyQ"), None);
        assert_eq!(Key::from_code("w"), None);
    }

    #[test]
    fn test_consecutive_looks_merge() {
        let mut queue = InputQueue::new();
        for _ in 0..200 {
            queue.push(InputEvent::Look { dx: 1.0, dy: -0.5 });
        }
        queue.push(InputEvent::Fire);
        queue.push(InputEvent::Look { dx: 2.0, dy: 0.0 });
        let events: Vec<_> = queue.drain().collect();
        assert_eq!(
            events,
            vec![
                InputEvent::Look { dx: 200.0, dy: -100.0 },
                InputEvent::Fire,
                InputEvent::Look { dx: 2.0, dy: 0.0 },
            ]
        );
    }

    #[test]
    fn test_full_queue_keeps_lock_and_keys() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::LockAcquired);
        queue.push(InputEvent::KeyUp(Key::Forward));
        for _ in 0..INPUT_QUEUE_CAPACITY {
            queue.push(InputEvent::Look { dx: 1.0, dy: 0.0 });
            queue.push(InputEvent::Fire);
        }
        queue.push(InputEvent::LockReleased);

        assert_eq!(queue.len(), INPUT_QUEUE_CAPACITY);
        let events: Vec<_> = queue.drain().collect();
        assert_eq!(events[0], InputEvent::LockAcquired);
        assert_eq!(events[1], InputEvent::KeyUp(Key::Forward));
        assert_eq!(events.last(), Some(&InputEvent::LockReleased));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_full_queue_evicts_looks_before_fire() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::Look { dx: 5.0, dy: 0.0 });
        for _ in 1..INPUT_QUEUE_CAPACITY {
            queue.push(InputEvent::Fire);
        }
        queue.push(InputEvent::KeyDown(Key::Jump));
        let events: Vec<_> = queue.drain().collect();
        assert_eq!(events.len(), INPUT_QUEUE_CAPACITY);
        assert!(!events.iter().any(|e| matches!(e, InputEvent::Look { .. })));
        assert_eq!(events.last(), Some(&InputEvent::KeyDown(Key::Jump)));
    }

    #[test]
    fn test_queue_of_state_changes_is_never_dropped() {
        let mut queue = InputQueue::new();
        for i in 0..INPUT_QUEUE_CAPACITY + 2 {
            let key = if i % 2 == 0 { InputEvent::KeyDown(Key::Left) } else { InputEvent::KeyUp(Key::Left) };
            queue.push(key);
        }
        assert_eq!(queue.len(), INPUT_QUEUE_CAPACITY + 2);
    }

    #[test]
    fn test_apply_events() {
        let mut held = HeldKeys::default();
        let mut pending = TickInput::default();
        for event in [
            InputEvent::KeyDown(Key::Forward),
            InputEvent::KeyDown(Key::Jump),
            InputEvent::Fire,
            InputEvent::Look { dx: 10.0, dy: -5.0 },
        ] {
            apply_event(&mut held, &mut pending, event);
        }
        assert!(pending.movement.forward);
        assert!(pending.jump);
        assert_eq!(pending.fire, 0);
        assert_eq!(pending.look, Vec2::ZERO);

        apply_event(&mut held, &mut pending, InputEvent::KeyUp(Key::Forward));
        assert!(!pending.movement.forward);
    }

    #[test]
    fn test_clear_releases_keys() {
        let mut held = HeldKeys::default();
        held.press(Key::Left);
        held.press(Key::Backward);
        held.clear();
        assert_eq!(held.intent(), MoveIntent::default());
    }
}
