//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use ludic_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine facade
pub use crate::engine::{Engine, EngineBuilder, EngineError, EngineHandle};

// Geometry
pub use crate::core::geometry::{BoundingBox, Direction, MotionVector};

// Overlap detection core
pub use crate::core::overlap::{
    EntityHandle, Overlap, OverlapError, OverlapProcessor, OverlapRuleApplier, Overlappable,
};

// World commands
pub use crate::core::WorldCommand;

// Move strategies
pub use crate::core::motion::{KeyboardMoveStrategy, MoveStrategy};

// Input vocabulary
pub use crate::core::input::{KeyCode, KeyEvent};
