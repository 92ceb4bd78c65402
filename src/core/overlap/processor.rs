//=========================================================================
// Overlap Processor
//
// Owns the entity registry and runs the per-tick detection pass.
//
// Responsibilities:
// - Partition registered entities into movable and stationary sets
// - Each tick, test every mover's projected box against every candidate
// - Emit each unordered movable pair at most once per tick
// - Hand the complete overlap set to the installed rule applier
//
// Algorithm (one tick):
// ```text
//   remaining = movables.clone()            // insertion order
//   for mover in movables:                  // insertion order
//       remaining.remove(mover)             // identity removal
//       target = mover.box + dir × speed    // projected box
//       for other in non_movables: test target vs other.box
//       for other in remaining:    test target vs other.box
//   rules.apply(overlaps)                   // exactly once, even if empty
// ```
//
// Removing each mover from `remaining` before its scan guarantees the
// dedup invariant: for movables A added before B, only "A as mover vs
// B as other" is ever tested within a tick, never the reverse. The
// candidate scan additionally skips any candidate identical to the
// mover: duplicate registration is accepted, so a second instance of the
// mover can still sit in the candidate pool, and a self-pair must never
// be emitted.
//
// Stationary pairs are excluded outright: two entities that cannot move
// cannot newly overlap.
//
// Complexity is O(movables × entities) per tick, a flat scan with no
// broad phase. That is the intended ceiling for the entity counts this
// framework targets.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::sync::Arc;

//=== External Crates =====================================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::geometry::BoundingBox;
use super::{EntityHandle, Overlap, OverlapRuleApplier};

//=== OverlapError ========================================================

/// Contract violations surfaced by the detection pass.
///
/// Both variants are programmer errors on the driver side, reported
/// loudly rather than skipped so that missing collision logic cannot ship
/// unnoticed.
#[derive(Debug)]
pub enum OverlapError {
    /// `process_tick()` was called before any rule applier was installed.
    NoRuleApplier,

    /// A registered movable returned `None` from `motion_vector()`.
    MissingMotionVector {
        /// Current box of the offending entity, for diagnostics.
        bounding_box: BoundingBox,
    },
}

impl fmt::Display for OverlapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRuleApplier => {
                write!(f, "process_tick called with no rule applier installed")
            }
            Self::MissingMotionVector { bounding_box } => write!(
                f,
                "registered movable at {:?} has no motion vector",
                bounding_box
            ),
        }
    }
}

impl std::error::Error for OverlapError {}

//=== OverlapProcessor ====================================================

/// Registry of detectable entities plus the per-tick detection pass.
///
/// The driver adds and removes entities as they spawn and despawn,
/// installs a rule applier once at setup, and calls [`process_tick`] once
/// per simulation frame. All of that is expected from a single writer:
/// mutations land between ticks, never during one.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ludic_engine::prelude::*;
///
/// struct Wall(BoundingBox);
///
/// impl Overlappable for Wall {
///     fn bounding_box(&self) -> BoundingBox {
///         self.0
///     }
/// }
///
/// struct Silent;
///
/// impl OverlapRuleApplier for Silent {
///     fn apply(&mut self, _overlaps: &[Overlap]) {}
/// }
///
/// let mut processor = OverlapProcessor::new();
/// processor.set_rule_applier(Box::new(Silent));
/// processor.add(Arc::new(Wall(BoundingBox::new(0, 0, 32, 32))));
/// processor.process_tick().unwrap();
/// ```
///
/// [`process_tick`]: OverlapProcessor::process_tick
pub struct OverlapProcessor {
    /// Entities tested as movers, in insertion order.
    movables: Vec<EntityHandle>,

    /// Entities only ever tested as targets, in insertion order.
    non_movables: Vec<EntityHandle>,

    /// Reaction policy, invoked once per tick.
    rules: Option<Box<dyn OverlapRuleApplier>>,
}

impl OverlapProcessor {
    //--- Construction -----------------------------------------------------

    /// Creates an empty processor with no rule applier installed.
    pub fn new() -> Self {
        Self {
            movables: Vec::new(),
            non_movables: Vec::new(),
            rules: None,
        }
    }

    //--- Registry ---------------------------------------------------------

    /// Registers an entity for overlap testing.
    ///
    /// Movability is read here, once, to pick the set. Registering the
    /// same entity twice is accepted: it will be tested once per
    /// registered instance each tick.
    pub fn add(&mut self, entity: EntityHandle) {
        if entity.is_movable() {
            debug!("Registering movable at {:?}", entity.bounding_box());
            self.movables.push(entity);
        } else {
            debug!("Registering stationary at {:?}", entity.bounding_box());
            self.non_movables.push(entity);
        }
    }

    /// Unregisters an entity, by identity.
    ///
    /// Removes one registered instance from whichever set holds it.
    /// Removing an entity that was never added is a no-op; entity
    /// lifecycle churn should not have to track registration state.
    pub fn remove(&mut self, entity: &EntityHandle) {
        if let Some(pos) = self.movables.iter().position(|e| Arc::ptr_eq(e, entity)) {
            self.movables.remove(pos);
        } else if let Some(pos) = self.non_movables.iter().position(|e| Arc::ptr_eq(e, entity)) {
            self.non_movables.remove(pos);
        } else {
            debug!(
                "Entity at {:?} not registered, skipping removal",
                entity.bounding_box()
            );
        }
    }

    /// Installs or replaces the reaction policy.
    ///
    /// Must happen before the first [`process_tick`] call.
    ///
    /// [`process_tick`]: OverlapProcessor::process_tick
    pub fn set_rule_applier(&mut self, rules: Box<dyn OverlapRuleApplier>) {
        self.rules = Some(rules);
    }

    /// Number of registered movable entities.
    pub fn movable_count(&self) -> usize {
        self.movables.len()
    }

    /// Number of registered stationary entities.
    pub fn stationary_count(&self) -> usize {
        self.non_movables.len()
    }

    //--- Detection Pass ---------------------------------------------------

    /// Runs one full detection pass and dispatches the result.
    ///
    /// Computes the tick's complete overlap set and hands it to the rule
    /// applier exactly once, even when empty. Runs to completion with no
    /// suspension points; the driver must not mutate the registry while a
    /// tick is in flight.
    ///
    /// # Errors
    ///
    /// - [`OverlapError::NoRuleApplier`] if no applier is installed; the
    ///   pass does not run.
    /// - [`OverlapError::MissingMotionVector`] if a registered movable
    ///   breaks the capability contract; the applier is not invoked for
    ///   this tick.
    pub fn process_tick(&mut self) -> Result<(), OverlapError> {
        let rules = self.rules.as_mut().ok_or(OverlapError::NoRuleApplier)?;

        let mut overlaps = Vec::new();

        // Shrinking candidate pool; starts as a handle-level snapshot of
        // the movable set so the outer iteration stays stable.
        let mut remaining: Vec<EntityHandle> = self.movables.clone();

        for mover in &self.movables {
            if let Some(pos) = remaining.iter().position(|e| Arc::ptr_eq(e, mover)) {
                remaining.remove(pos);
            }

            let target = Self::projected_box(mover)?;

            Self::scan_candidates(mover, target, &self.non_movables, &mut overlaps);
            Self::scan_candidates(mover, target, &remaining, &mut overlaps);
        }

        debug!(
            "Tick complete: {} overlap(s) across {} movable(s), {} stationary",
            overlaps.len(),
            self.movables.len(),
            self.non_movables.len()
        );

        rules.apply(&overlaps);
        Ok(())
    }

    //--- Internal Helpers -------------------------------------------------

    /// Tests the mover's projected box against every candidate's current
    /// box, recording an overlap per intersection.
    ///
    /// Candidates identical to the mover are skipped: with duplicate
    /// registration the pool can still hold another instance of the
    /// mover, and an entity never overlaps itself.
    fn scan_candidates(
        mover: &EntityHandle,
        target: BoundingBox,
        candidates: &[EntityHandle],
        overlaps: &mut Vec<Overlap>,
    ) {
        for other in candidates {
            if Arc::ptr_eq(other, mover) {
                continue;
            }

            if target.intersects(&other.bounding_box()) {
                overlaps.push(Overlap::new(mover, other));
            }
        }
    }

    /// Predicted next-tick box of a mover: its current box translated by
    /// direction × speed.
    fn projected_box(mover: &EntityHandle) -> Result<BoundingBox, OverlapError> {
        let current = mover.bounding_box();
        let vector = mover
            .motion_vector()
            .ok_or(OverlapError::MissingMotionVector {
                bounding_box: current,
            })?;

        Ok(current.translated(vector.displacement()))
    }
}

impl Default for OverlapProcessor {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{Direction, MotionVector};
    use crate::core::overlap::Overlappable;
    use std::sync::Mutex;

    //--- Test Entities ----------------------------------------------------

    struct Block {
        bounds: BoundingBox,
    }

    impl Overlappable for Block {
        fn bounding_box(&self) -> BoundingBox {
            self.bounds
        }
    }

    struct Runner {
        bounds: BoundingBox,
        vector: MotionVector,
    }

    impl Overlappable for Runner {
        fn bounding_box(&self) -> BoundingBox {
            self.bounds
        }

        fn is_movable(&self) -> bool {
            true
        }

        fn motion_vector(&self) -> Option<MotionVector> {
            Some(self.vector)
        }
    }

    /// Claims movability but breaks the capability contract.
    struct Liar {
        bounds: BoundingBox,
    }

    impl Overlappable for Liar {
        fn bounding_box(&self) -> BoundingBox {
            self.bounds
        }

        fn is_movable(&self) -> bool {
            true
        }
    }

    fn block(x: i32, y: i32, w: i32, h: i32) -> EntityHandle {
        Arc::new(Block {
            bounds: BoundingBox::new(x, y, w, h),
        })
    }

    fn runner(x: i32, y: i32, direction: Direction, speed: i32) -> EntityHandle {
        Arc::new(Runner {
            bounds: BoundingBox::new(x, y, 10, 10),
            vector: MotionVector::new(direction, speed),
        })
    }

    //--- Recording Applier ------------------------------------------------

    /// Captures every dispatched overlap set for later assertions.
    struct Recorder {
        ticks: Arc<Mutex<Vec<Vec<Overlap>>>>,
    }

    fn recording_processor() -> (OverlapProcessor, Arc<Mutex<Vec<Vec<Overlap>>>>) {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let mut processor = OverlapProcessor::new();
        processor.set_rule_applier(Box::new(Recorder {
            ticks: Arc::clone(&ticks),
        }));
        (processor, ticks)
    }

    impl OverlapRuleApplier for Recorder {
        fn apply(&mut self, overlaps: &[Overlap]) {
            self.ticks.lock().unwrap().push(overlaps.to_vec());
        }
    }

    fn last_tick(ticks: &Arc<Mutex<Vec<Vec<Overlap>>>>) -> Vec<Overlap> {
        ticks.lock().unwrap().last().cloned().unwrap()
    }

    //--- Error Policy -----------------------------------------------------

    #[test]
    fn tick_without_applier_fails_loudly() {
        let mut processor = OverlapProcessor::new();

        assert!(matches!(
            processor.process_tick(),
            Err(OverlapError::NoRuleApplier)
        ));
    }

    #[test]
    fn movable_without_vector_is_a_contract_violation() {
        let (mut processor, ticks) = recording_processor();
        processor.add(Arc::new(Liar {
            bounds: BoundingBox::new(0, 0, 10, 10),
        }));

        assert!(matches!(
            processor.process_tick(),
            Err(OverlapError::MissingMotionVector { .. })
        ));
        // The applier never saw the broken tick.
        assert!(ticks.lock().unwrap().is_empty());
    }

    //--- Dispatch Contract ------------------------------------------------

    #[test]
    fn applier_invoked_once_even_with_no_entities() {
        let (mut processor, ticks) = recording_processor();

        processor.process_tick().unwrap();

        let recorded = ticks.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].is_empty());
    }

    #[test]
    fn applier_invoked_with_empty_set_when_nothing_overlaps() {
        let (mut processor, ticks) = recording_processor();
        processor.add(runner(0, 0, Direction::RIGHT, 1));
        processor.add(block(50, 50, 10, 10));

        processor.process_tick().unwrap();

        assert!(last_tick(&ticks).is_empty());
    }

    //--- Self-Pair Exclusion ----------------------------------------------

    #[test]
    fn lone_movable_never_overlaps_itself() {
        let (mut processor, ticks) = recording_processor();
        // Zero speed: the projected box coincides with the current box.
        processor.add(runner(0, 0, Direction::NONE, 0));

        processor.process_tick().unwrap();

        assert!(last_tick(&ticks).is_empty());
    }

    #[test]
    fn lone_movable_never_overlaps_itself_regardless_of_motion() {
        let (mut processor, ticks) = recording_processor();
        // Speed 2 still leaves the projected box intersecting the current
        // one; only identity keeps this from being a self-pair.
        processor.add(runner(0, 0, Direction::RIGHT, 2));

        processor.process_tick().unwrap();

        assert!(last_tick(&ticks).is_empty());
    }

    //--- Motion Prediction ------------------------------------------------

    #[test]
    fn mover_hits_stationary_via_projected_box() {
        // Mover at (0,0,10,10), direction (1,0), speed 5: projected box
        // spans 5..15 on x and overlaps a block spanning 8..18, even
        // though the current boxes are disjoint.
        let (mut processor, ticks) = recording_processor();
        let mover = runner(0, 0, Direction::RIGHT, 5);
        let wall = block(8, 0, 10, 10);
        processor.add(Arc::clone(&mover));
        processor.add(Arc::clone(&wall));

        processor.process_tick().unwrap();

        let overlaps = last_tick(&ticks);
        assert_eq!(overlaps.len(), 1);
        assert!(Arc::ptr_eq(overlaps[0].mover(), &mover));
        assert!(Arc::ptr_eq(overlaps[0].other(), &wall));
    }

    #[test]
    fn mover_misses_stationary_out_of_reach() {
        // Projected box ends at x = 15, block starts at x = 20.
        let (mut processor, ticks) = recording_processor();
        processor.add(runner(0, 0, Direction::RIGHT, 5));
        processor.add(block(20, 0, 10, 10));

        processor.process_tick().unwrap();

        assert!(last_tick(&ticks).is_empty());
    }

    #[test]
    fn current_position_alone_does_not_trigger() {
        // The mover currently overlaps the block, but its projected box
        // has moved clear. Detection is strictly projected-vs-current.
        let (mut processor, ticks) = recording_processor();
        processor.add(runner(0, 0, Direction::RIGHT, 20));
        processor.add(block(5, 0, 10, 10));

        processor.process_tick().unwrap();

        assert!(last_tick(&ticks).is_empty());
    }

    //--- Dedup Invariant --------------------------------------------------

    #[test]
    fn movable_pair_emitted_exactly_once() {
        let (mut processor, ticks) = recording_processor();
        let first = runner(0, 0, Direction::RIGHT, 5);
        let second = runner(8, 0, Direction::LEFT, 5);
        processor.add(Arc::clone(&first));
        processor.add(Arc::clone(&second));

        processor.process_tick().unwrap();

        let overlaps = last_tick(&ticks);
        assert_eq!(overlaps.len(), 1);
        // The first-added movable is the mover (projected side); the
        // second is tested at its current, unprojected position.
        assert!(Arc::ptr_eq(overlaps[0].mover(), &first));
        assert!(Arc::ptr_eq(overlaps[0].other(), &second));
    }

    #[test]
    fn three_movers_in_a_pile_yield_each_pair_once() {
        let (mut processor, ticks) = recording_processor();
        let a = runner(0, 0, Direction::NONE, 0);
        let b = runner(2, 0, Direction::NONE, 0);
        let c = runner(4, 0, Direction::NONE, 0);
        processor.add(Arc::clone(&a));
        processor.add(Arc::clone(&b));
        processor.add(Arc::clone(&c));

        processor.process_tick().unwrap();

        let overlaps = last_tick(&ticks);
        assert_eq!(overlaps.len(), 3);

        // Earlier-added entity is always the mover side of its pairs.
        assert!(Arc::ptr_eq(overlaps[0].mover(), &a));
        assert!(Arc::ptr_eq(overlaps[0].other(), &b));
        assert!(Arc::ptr_eq(overlaps[1].mover(), &a));
        assert!(Arc::ptr_eq(overlaps[1].other(), &c));
        assert!(Arc::ptr_eq(overlaps[2].mover(), &b));
        assert!(Arc::ptr_eq(overlaps[2].other(), &c));
    }

    //--- Stationary Exclusion ---------------------------------------------

    #[test]
    fn stationary_pairs_are_never_tested() {
        let (mut processor, ticks) = recording_processor();
        // Identical, fully overlapping boxes — but neither can move.
        processor.add(block(0, 0, 10, 10));
        processor.add(block(0, 0, 10, 10));

        processor.process_tick().unwrap();

        assert!(last_tick(&ticks).is_empty());
    }

    //--- Identity Semantics -----------------------------------------------

    #[test]
    fn distinct_entities_on_same_coordinates_do_overlap() {
        // Identity replaces the box-equality proxy: co-located distinct
        // entities are a real overlap, not a suspected self-pair.
        let (mut processor, ticks) = recording_processor();
        let mover = runner(0, 0, Direction::NONE, 0);
        let wall = block(0, 0, 10, 10);
        processor.add(Arc::clone(&mover));
        processor.add(Arc::clone(&wall));

        processor.process_tick().unwrap();

        let overlaps = last_tick(&ticks);
        assert_eq!(overlaps.len(), 1);
        assert!(overlaps[0].involves(&mover));
        assert!(overlaps[0].involves(&wall));
    }

    //--- Registry Lifecycle -----------------------------------------------

    #[test]
    fn removal_takes_effect_from_the_next_tick() {
        let (mut processor, ticks) = recording_processor();
        let mover = runner(0, 0, Direction::RIGHT, 5);
        let wall = block(8, 0, 10, 10);
        processor.add(Arc::clone(&mover));
        processor.add(Arc::clone(&wall));

        processor.process_tick().unwrap();
        assert_eq!(last_tick(&ticks).len(), 1);

        processor.remove(&wall);
        processor.process_tick().unwrap();
        assert!(last_tick(&ticks).is_empty());
    }

    #[test]
    fn removing_an_absent_entity_is_a_no_op() {
        let (mut processor, _ticks) = recording_processor();
        let never_added = block(0, 0, 10, 10);

        processor.remove(&never_added);

        assert_eq!(processor.movable_count(), 0);
        assert_eq!(processor.stationary_count(), 0);
    }

    #[test]
    fn duplicate_registration_is_tested_per_instance() {
        let (mut processor, ticks) = recording_processor();
        let mover = runner(0, 0, Direction::RIGHT, 5);
        let wall = block(8, 0, 10, 10);
        processor.add(Arc::clone(&mover));
        processor.add(Arc::clone(&mover));
        processor.add(Arc::clone(&wall));

        processor.process_tick().unwrap();

        // One overlap against the wall per registered mover instance,
        // and nothing else in the set.
        let overlaps = last_tick(&ticks);
        assert_eq!(overlaps.len(), 2);
        for overlap in &overlaps {
            assert!(Arc::ptr_eq(overlap.mover(), &mover));
            assert!(Arc::ptr_eq(overlap.other(), &wall));
        }
    }

    #[test]
    fn duplicate_registration_never_pairs_an_entity_with_itself() {
        let (mut processor, ticks) = recording_processor();
        // Speed 2 leaves the projected box intersecting the current one,
        // so the second registered instance is a live candidate.
        let mover = runner(0, 0, Direction::RIGHT, 2);
        processor.add(Arc::clone(&mover));
        processor.add(Arc::clone(&mover));

        processor.process_tick().unwrap();

        for overlap in &last_tick(&ticks) {
            assert!(
                !Arc::ptr_eq(overlap.mover(), overlap.other()),
                "same entity on both sides of an overlap"
            );
        }
    }

    #[test]
    fn remove_drops_one_instance_at_a_time() {
        let (mut processor, _ticks) = recording_processor();
        let mover = runner(0, 0, Direction::RIGHT, 5);
        processor.add(Arc::clone(&mover));
        processor.add(Arc::clone(&mover));
        assert_eq!(processor.movable_count(), 2);

        processor.remove(&mover);
        assert_eq!(processor.movable_count(), 1);

        processor.remove(&mover);
        assert_eq!(processor.movable_count(), 0);
    }

    #[test]
    fn counts_track_partition_by_movability() {
        let (mut processor, _ticks) = recording_processor();
        processor.add(runner(0, 0, Direction::NONE, 0));
        processor.add(block(0, 0, 10, 10));
        processor.add(block(20, 0, 10, 10));

        assert_eq!(processor.movable_count(), 1);
        assert_eq!(processor.stationary_count(), 2);
    }

    #[test]
    fn replacing_the_applier_redirects_dispatch() {
        let (mut processor, first_ticks) = recording_processor();
        processor.process_tick().unwrap();
        assert_eq!(first_ticks.lock().unwrap().len(), 1);

        let second_ticks = Arc::new(Mutex::new(Vec::new()));
        processor.set_rule_applier(Box::new(Recorder {
            ticks: Arc::clone(&second_ticks),
        }));

        processor.process_tick().unwrap();

        assert_eq!(first_ticks.lock().unwrap().len(), 1);
        assert_eq!(second_ticks.lock().unwrap().len(), 1);
    }
}
