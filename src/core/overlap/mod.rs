//=========================================================================
// Overlap Detection
//=========================================================================
//
// The framework's core: per-tick detection of spatially overlapping
// entity pairs, with motion prediction on the moving side.
//
// Architecture:
// ```text
//   Driver ──add/remove──► OverlapProcessor
//                            ├─ movables:     Vec<EntityHandle>
//                            ├─ non_movables: Vec<EntityHandle>
//                            └─ rules:        Box<dyn OverlapRuleApplier>
//
//   process_tick():
//     projected(mover) × current(other)  →  Vec<Overlap>  →  rules.apply()
// ```
//
// Key Design Decisions:
// - **Capability query over downcast**: `motion_vector()` returns an
//   `Option` instead of requiring a separate movable trait object, so the
//   processor never downcasts to reach a mover's vector.
// - **Pointer identity**: self-pairs are excluded by `Arc::ptr_eq`, not by
//   comparing box values. Two distinct entities standing on the same
//   coordinates are a legitimate overlap.
// - **Asymmetric pair test**: the mover side uses its projected box, the
//   other side its current box. Detection therefore fires on the tick
//   *before* the mover would occupy the contested space.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::sync::Arc;

//=== Internal Dependencies ===============================================

use crate::core::geometry::{BoundingBox, MotionVector};

//=== Module Declarations =================================================

mod processor;

//=== Public API ==========================================================

pub use processor::{OverlapError, OverlapProcessor};

//=== EntityHandle ========================================================

/// Shared, non-owning view of a detectable entity.
///
/// The driver owns entity lifetime; the processor and the overlaps it
/// emits only hold cheap clones of this handle. Handle identity
/// (`Arc::ptr_eq`) is entity identity.
pub type EntityHandle = Arc<dyn Overlappable>;

//=== Overlappable Trait ==================================================

/// Capability contract for entities the detector can test.
///
/// Implemented by game entities and registered with the
/// [`OverlapProcessor`]. The processor only ever reads through this trait;
/// it never mutates an entity.
///
/// # Movability
///
/// `is_movable()` is read once, at registration, to partition the entity
/// into the movable or stationary set. An entity whose movability changes
/// while registered must be removed and re-added to reclassify.
///
/// Movable entities must return `Some` from [`motion_vector`]; the default
/// `None` is only correct for stationary entities. A registered movable
/// returning `None` is a contract violation the processor reports as
/// [`OverlapError::MissingMotionVector`].
///
/// # Example
///
/// ```
/// use ludic_engine::prelude::*;
///
/// struct Wall {
///     bounds: BoundingBox,
/// }
///
/// impl Overlappable for Wall {
///     fn bounding_box(&self) -> BoundingBox {
///         self.bounds
///     }
/// }
/// ```
///
/// [`motion_vector`]: Overlappable::motion_vector
pub trait Overlappable: Send + Sync {
    /// Current, authoritative bounding box of the entity.
    fn bounding_box(&self) -> BoundingBox;

    /// Whether the entity moves and should be tested with a projected box.
    ///
    /// Defaults to stationary.
    fn is_movable(&self) -> bool {
        false
    }

    /// Current motion vector, for movable entities.
    ///
    /// Stationary entities keep the default `None`.
    fn motion_vector(&self) -> Option<MotionVector> {
        None
    }
}

//=== Overlap =============================================================

/// An unordered pair of entities detected as overlapping in one tick.
///
/// One side is always the mover whose projected position triggered the
/// test; the other may be movable or stationary and was tested at its
/// current position. Overlaps are fresh values each tick and carry no
/// identity across ticks.
#[derive(Clone)]
pub struct Overlap {
    mover: EntityHandle,
    other: EntityHandle,
}

impl Overlap {
    /// Creates an overlap record from the mover and the entity it hit.
    pub(crate) fn new(mover: &EntityHandle, other: &EntityHandle) -> Self {
        Self {
            mover: Arc::clone(mover),
            other: Arc::clone(other),
        }
    }

    /// The entity whose projected box triggered the detection.
    pub fn mover(&self) -> &EntityHandle {
        &self.mover
    }

    /// The entity the mover overlapped, tested at its current position.
    pub fn other(&self) -> &EntityHandle {
        &self.other
    }

    /// Both entities, mover first.
    pub fn pair(&self) -> (&EntityHandle, &EntityHandle) {
        (&self.mover, &self.other)
    }

    /// Tests whether `entity` is one of the two parties, by identity.
    pub fn involves(&self, entity: &EntityHandle) -> bool {
        Arc::ptr_eq(&self.mover, entity) || Arc::ptr_eq(&self.other, entity)
    }
}

impl fmt::Debug for Overlap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overlap")
            .field("mover", &self.mover.bounding_box())
            .field("other", &self.other.bounding_box())
            .finish()
    }
}

//=== OverlapRuleApplier Trait ============================================

/// Game-specific reaction policy for a tick's overlap set.
///
/// Installed once via [`OverlapProcessor::set_rule_applier`] and invoked
/// exactly once per tick with the full set, even when it is empty.
///
/// The applier may mutate entity state through the entities' own interior
/// mutability (flagging for removal, bouncing, scoring), but it must not
/// change registry membership mid-tick — spawn and despawn requests belong
/// in the driver's command queue and take effect at the next tick
/// boundary.
pub trait OverlapRuleApplier: Send {
    /// Reacts to all overlaps detected in the current tick.
    fn apply(&mut self, overlaps: &[Overlap]);
}

//=========================================================================
// Unit Tests
//=========================================================================
