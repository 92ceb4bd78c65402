//=========================================================================
// Motion Types
//
// Direction and speed values used to predict an entity's next position.
//
// Responsibilities:
// - Represent a 2D direction with integer components
// - Pair a direction with a scalar speed into a per-tick motion vector
// - Compute the effective displacement (direction × speed)
//
// Design:
// Directions are "unit-ish": components are typically -1, 0 or 1 so that
// speed alone controls magnitude, but nothing enforces this — keyboard
// strategies legitimately produce combined diagonals like (1, -1).
//
// The overlap engine only ever reads motion vectors. Ownership and
// mutation belong to the entity's move strategy.
//
//=========================================================================

use std::ops::Add;

//=== Direction ===========================================================

/// 2D integer direction.
///
/// Positive `dx` points right, positive `dy` points down, matching screen
/// coordinates. Axis constants cover the common cases:
///
/// ```
/// use ludic_engine::prelude::*;
///
/// assert_eq!(Direction::RIGHT + Direction::UP, Direction::new(1, -1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    /// Horizontal component.
    pub dx: i32,

    /// Vertical component.
    pub dy: i32,
}

impl Direction {
    /// No movement.
    pub const NONE: Direction = Direction::new(0, 0);

    /// One step left (negative x).
    pub const LEFT: Direction = Direction::new(-1, 0);

    /// One step right (positive x).
    pub const RIGHT: Direction = Direction::new(1, 0);

    /// One step up (negative y, screen coordinates).
    pub const UP: Direction = Direction::new(0, -1);

    /// One step down (positive y, screen coordinates).
    pub const DOWN: Direction = Direction::new(0, 1);

    /// Creates a direction from raw components.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Returns true if both components are zero.
    pub const fn is_none(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Scales both components by `factor`.
    pub const fn scaled(&self, factor: i32) -> Self {
        Self::new(self.dx * factor, self.dy * factor)
    }
}

impl Add for Direction {
    type Output = Direction;

    fn add(self, rhs: Direction) -> Direction {
        Direction::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::NONE
    }
}

//=== MotionVector ========================================================

/// Direction and speed pair describing one tick of movement.
///
/// The effective per-tick displacement is `direction * speed`,
/// component-wise. Speed must be non-negative; reversal is expressed by
/// the direction, not by a negative speed.
///
/// Motion vectors are owned and updated by the entity's move strategy.
/// The overlap engine reads them to project a mover's next-tick box and
/// never writes them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotionVector {
    /// Where the entity is headed.
    pub direction: Direction,

    /// How far it travels per tick, in direction units. Non-negative.
    pub speed: i32,
}

impl MotionVector {
    /// Creates a motion vector from a direction and a speed.
    pub const fn new(direction: Direction, speed: i32) -> Self {
        Self { direction, speed }
    }

    /// A vector that goes nowhere.
    pub const fn stationary() -> Self {
        Self::new(Direction::NONE, 0)
    }

    /// Effective displacement for one tick: `direction * speed`.
    pub const fn displacement(&self) -> Direction {
        self.direction.scaled(self.speed)
    }
}

impl Default for MotionVector {
    fn default() -> Self {
        Self::stationary()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
