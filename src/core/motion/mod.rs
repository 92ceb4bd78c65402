//=========================================================================
// Move Strategies
//=========================================================================
//
// Pluggable policies that own and update an entity's motion vector.
//
// The overlap engine never writes motion state; it only reads each
// mover's current vector to project its next-tick box. Strategies are
// where that state actually lives: an entity delegates its
// `motion_vector()` to the strategy it carries, and the driver feeds the
// strategy whatever stimulus it reacts to (key events, AI decisions,
// a fixed heading).
//
// Flow:
// ```text
//   Driver ──KeyEvent──► KeyboardMoveStrategy
//                              │ owns MotionVector
//   Entity::motion_vector() ◄──┘
//                              │
//                       OverlapProcessor (read-only)
// ```
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::geometry::MotionVector;

//=== Module Declarations =================================================

mod keyboard;

//=== Public API ==========================================================

pub use keyboard::KeyboardMoveStrategy;

//=== MoveStrategy Trait ==================================================

/// Policy that decides how an entity moves.
///
/// Implementations own the motion vector and mutate it in response to
/// whatever stimulus they model. Consumers read the vector through this
/// trait; speed is adjustable without replacing the strategy.
pub trait MoveStrategy: Send {
    /// The vector the entity should move by next tick.
    fn motion_vector(&self) -> MotionVector;

    /// Current per-tick speed.
    fn speed(&self) -> i32 {
        self.motion_vector().speed
    }

    /// Replaces the per-tick speed, keeping the direction.
    fn set_speed(&mut self, speed: i32);
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Direction;

    /// Minimal strategy that always heads the same way.
    struct FixedHeading {
        vector: MotionVector,
    }

    impl MoveStrategy for FixedHeading {
        fn motion_vector(&self) -> MotionVector {
            self.vector
        }

        fn set_speed(&mut self, speed: i32) {
            self.vector.speed = speed;
        }
    }

    #[test]
    fn default_speed_reads_through_the_vector() {
        let strategy = FixedHeading {
            vector: MotionVector::new(Direction::DOWN, 3),
        };

        assert_eq!(strategy.speed(), 3);
    }

    #[test]
    fn set_speed_keeps_direction() {
        let mut strategy = FixedHeading {
            vector: MotionVector::new(Direction::DOWN, 3),
        };

        strategy.set_speed(7);

        assert_eq!(strategy.motion_vector(), MotionVector::new(Direction::DOWN, 7));
    }
}
