//=========================================================================
// Keyboard Move Strategy
//
// Maps held keys to a motion direction.
//
// Responsibilities:
// - Maintain key → direction bindings and the set of currently held keys
// - Recompute the direction whenever a relevant key changes state
// - Expose the result as an ordinary MotionVector
//
// Behavior knobs:
// - `always_move`: when no bound key is held, keep the last direction
//   (entity keeps gliding) instead of dropping to a standstill
// - `combine_directions`: sum all held directions (diagonals) instead of
//   taking the earliest still-held key
//
// Held keys are tracked in press order so that the non-combining mode is
// deterministic: the earliest still-held bound key wins.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{Direction, MotionVector};
use crate::core::input::{KeyCode, KeyEvent};
use super::MoveStrategy;

//=== KeyboardMoveStrategy ================================================

/// Move strategy driven by key state reported from the external driver.
///
/// Starts with no bindings; [`bind_key`] attaches a direction to a key,
/// and [`arrow_keys`] builds the conventional arrow-key setup. The driver
/// forwards key transitions via [`key_pressed`] / [`key_released`] or in
/// batches via [`digest`].
///
/// # Example
///
/// ```
/// use ludic_engine::prelude::*;
///
/// let mut strategy = KeyboardMoveStrategy::arrow_keys(3);
/// strategy.key_pressed(KeyCode::ArrowRight);
///
/// assert_eq!(
///     strategy.motion_vector(),
///     MotionVector::new(Direction::RIGHT, 3)
/// );
/// ```
///
/// [`bind_key`]: KeyboardMoveStrategy::bind_key
/// [`arrow_keys`]: KeyboardMoveStrategy::arrow_keys
/// [`key_pressed`]: KeyboardMoveStrategy::key_pressed
/// [`key_released`]: KeyboardMoveStrategy::key_released
/// [`digest`]: KeyboardMoveStrategy::digest
pub struct KeyboardMoveStrategy {
    vector: MotionVector,
    directions: HashMap<KeyCode, Direction>,
    held: Vec<KeyCode>,
    always_move: bool,
    combine_directions: bool,
}

impl KeyboardMoveStrategy {
    //--- Construction -----------------------------------------------------

    /// Creates a strategy with no bindings.
    ///
    /// `always_move` keeps the last direction when no bound key is held;
    /// `combine_directions` sums concurrently held directions.
    pub fn new(speed: i32, always_move: bool, combine_directions: bool) -> Self {
        Self {
            vector: MotionVector::new(Direction::NONE, speed),
            directions: HashMap::new(),
            held: Vec::new(),
            always_move,
            combine_directions,
        }
    }

    /// Conventional arrow-key setup: arrows mapped to the four axis
    /// directions, gliding enabled, no diagonal combination.
    pub fn arrow_keys(speed: i32) -> Self {
        let mut strategy = Self::new(speed, true, false);
        strategy.bind_key(KeyCode::ArrowRight, Direction::RIGHT);
        strategy.bind_key(KeyCode::ArrowLeft, Direction::LEFT);
        strategy.bind_key(KeyCode::ArrowDown, Direction::DOWN);
        strategy.bind_key(KeyCode::ArrowUp, Direction::UP);
        strategy
    }

    //--- Configuration ----------------------------------------------------

    /// Binds a key to a direction, replacing any previous binding.
    pub fn bind_key(&mut self, key: KeyCode, direction: Direction) {
        self.directions.insert(key, direction);
    }

    //--- Key State --------------------------------------------------------

    /// Records a key going down and recomputes the direction.
    ///
    /// Repeats of an already-held key are ignored, so OS key-repeat
    /// streams are harmless.
    pub fn key_pressed(&mut self, key: KeyCode) {
        if !self.held.contains(&key) {
            self.held.push(key);
        }
        self.update_direction();
    }

    /// Records a key coming back up and recomputes the direction.
    pub fn key_released(&mut self, key: KeyCode) {
        self.held.retain(|&k| k != key);
        self.update_direction();
    }

    /// Applies a batch of key transitions in order.
    pub fn digest(&mut self, events: &[KeyEvent]) {
        for event in events {
            match *event {
                KeyEvent::Pressed(key) => self.key_pressed(key),
                KeyEvent::Released(key) => self.key_released(key),
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Recomputes the direction from the held keys, in press order.
    fn update_direction(&mut self) {
        let mut new_direction = Direction::NONE;

        for key in &self.held {
            if let Some(&key_direction) = self.directions.get(key) {
                new_direction = new_direction + key_direction;

                if !self.combine_directions {
                    break;
                }
            }
        }

        // With gliding enabled, an all-keys-up state keeps the previous
        // heading instead of stalling.
        if !new_direction.is_none() || !self.always_move {
            self.vector.direction = new_direction;
        }
    }
}

impl MoveStrategy for KeyboardMoveStrategy {
    fn motion_vector(&self) -> MotionVector {
        self.vector
    }

    fn set_speed(&mut self, speed: i32) {
        self.vector.speed = speed;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_strategy_stays_put() {
        let mut strategy = KeyboardMoveStrategy::new(5, true, false);

        strategy.key_pressed(KeyCode::Space);

        assert_eq!(strategy.motion_vector().direction, Direction::NONE);
    }

    #[test]
    fn pressing_a_bound_key_sets_the_direction() {
        let mut strategy = KeyboardMoveStrategy::arrow_keys(2);

        strategy.key_pressed(KeyCode::ArrowLeft);

        assert_eq!(strategy.motion_vector(), MotionVector::new(Direction::LEFT, 2));
    }

    #[test]
    fn gliding_keeps_direction_after_release() {
        let mut strategy = KeyboardMoveStrategy::arrow_keys(2);

        strategy.key_pressed(KeyCode::ArrowUp);
        strategy.key_released(KeyCode::ArrowUp);

        // always_move: the entity glides on in the last direction.
        assert_eq!(strategy.motion_vector().direction, Direction::UP);
    }

    #[test]
    fn non_gliding_stops_when_all_keys_are_up() {
        let mut strategy = KeyboardMoveStrategy::new(2, false, false);
        strategy.bind_key(KeyCode::KeyD, Direction::RIGHT);

        strategy.key_pressed(KeyCode::KeyD);
        assert_eq!(strategy.motion_vector().direction, Direction::RIGHT);

        strategy.key_released(KeyCode::KeyD);
        assert_eq!(strategy.motion_vector().direction, Direction::NONE);
    }

    #[test]
    fn earliest_held_key_wins_without_combination() {
        let mut strategy = KeyboardMoveStrategy::arrow_keys(1);

        strategy.key_pressed(KeyCode::ArrowRight);
        strategy.key_pressed(KeyCode::ArrowDown);

        assert_eq!(strategy.motion_vector().direction, Direction::RIGHT);

        // Releasing the earlier key promotes the later one.
        strategy.key_released(KeyCode::ArrowRight);
        assert_eq!(strategy.motion_vector().direction, Direction::DOWN);
    }

    #[test]
    fn combination_sums_held_directions() {
        let mut strategy = KeyboardMoveStrategy::new(1, true, true);
        strategy.bind_key(KeyCode::KeyW, Direction::UP);
        strategy.bind_key(KeyCode::KeyD, Direction::RIGHT);

        strategy.key_pressed(KeyCode::KeyW);
        strategy.key_pressed(KeyCode::KeyD);

        assert_eq!(strategy.motion_vector().direction, Direction::new(1, -1));
    }

    #[test]
    fn opposing_keys_cancel_when_combined() {
        let mut strategy = KeyboardMoveStrategy::new(1, false, true);
        strategy.bind_key(KeyCode::ArrowLeft, Direction::LEFT);
        strategy.bind_key(KeyCode::ArrowRight, Direction::RIGHT);

        strategy.key_pressed(KeyCode::ArrowLeft);
        strategy.key_pressed(KeyCode::ArrowRight);

        assert_eq!(strategy.motion_vector().direction, Direction::NONE);
    }

    #[test]
    fn key_repeat_does_not_duplicate_held_state() {
        let mut strategy = KeyboardMoveStrategy::arrow_keys(1);

        strategy.key_pressed(KeyCode::ArrowDown);
        strategy.key_pressed(KeyCode::ArrowDown);
        strategy.key_released(KeyCode::ArrowDown);
        strategy.key_pressed(KeyCode::ArrowUp);

        // A lingering duplicate ArrowDown would win here.
        assert_eq!(strategy.motion_vector().direction, Direction::UP);
    }

    #[test]
    fn digest_applies_events_in_order() {
        let mut strategy = KeyboardMoveStrategy::arrow_keys(4);

        strategy.digest(&[
            KeyEvent::Pressed(KeyCode::ArrowRight),
            KeyEvent::Released(KeyCode::ArrowRight),
            KeyEvent::Pressed(KeyCode::ArrowDown),
        ]);

        assert_eq!(strategy.motion_vector(), MotionVector::new(Direction::DOWN, 4));
    }

    #[test]
    fn set_speed_preserves_heading() {
        let mut strategy = KeyboardMoveStrategy::arrow_keys(1);
        strategy.key_pressed(KeyCode::ArrowRight);

        strategy.set_speed(9);

        assert_eq!(strategy.motion_vector(), MotionVector::new(Direction::RIGHT, 9));
        assert_eq!(strategy.speed(), 9);
    }
}
