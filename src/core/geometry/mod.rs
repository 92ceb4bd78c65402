//=========================================================================
// Geometry
//=========================================================================
//
// Pure value types for 2D spatial math.
//
// Architecture:
//   BoundingBox  — axis-aligned rectangle, the unit of overlap testing
//   Direction    — 2D integer direction (unit-ish components)
//   MotionVector — direction × speed, a per-tick displacement
//
// All types are Copy and total over well-formed inputs. There is no
// state machine here: the overlap engine reads these values, it never
// owns or mutates them.
//
//=========================================================================

//=== Module Declarations =================================================

mod bounding_box;
mod motion;

//=== Public API ==========================================================

pub use bounding_box::BoundingBox;
pub use motion::{Direction, MotionVector};
