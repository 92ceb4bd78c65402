//=========================================================================
// Core Systems Orchestrator
//
// Central coordinator for the simulation running on the logic thread.
//
// Responsibilities:
// - Own the overlap processor for the lifetime of the simulation
// - Apply driver commands (spawn, despawn, rule installation) strictly at
//   tick boundaries
// - Run the detection pass at a fixed tick rate (TPS)
// - Exit cleanly on shutdown or channel disconnect, loudly on contract
//   violations
//
// Notes:
// The orchestrator is the single writer of the registry. The driver never
// touches the processor directly while the simulation runs; every
// structural change travels through the command channel and lands between
// ticks. That is what makes rule appliers safe: by the time one runs, the
// registry is structurally frozen until the next boundary.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{error, info};

//=== Module Declarations =================================================

pub mod geometry;
pub mod input;
pub mod motion;
pub mod overlap;

//=== Internal Dependencies ===============================================

use overlap::{EntityHandle, OverlapProcessor, OverlapRuleApplier};

//=== WorldCommand ========================================================

/// Registry mutations sent from the driver to the simulation thread.
///
/// Commands are drained and applied at the start of each tick, so a
/// despawn requested during tick N is guaranteed to be absent from tick
/// N+1 onward and can never invalidate an in-flight detection pass.
pub enum WorldCommand {
    /// Register an entity for overlap testing.
    Spawn(EntityHandle),

    /// Unregister an entity, by identity. Unknown entities are ignored.
    Despawn(EntityHandle),

    /// Install or replace the overlap reaction policy.
    InstallRules(Box<dyn OverlapRuleApplier>),

    /// Terminate the simulation thread after the current boundary.
    Shutdown,
}

//=== TickControl =========================================================

/// Control flow for the simulation loop: each boundary either continues
/// into the next tick or terminates the thread.
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== SimulationOrchestrator ==============================================

/// Owns the overlap processor and drives it at a fixed tick rate.
pub(crate) struct SimulationOrchestrator {
    processor: OverlapProcessor,
}

impl SimulationOrchestrator {
    //--- Construction -----------------------------------------------------

    /// Creates an orchestrator around an empty processor.
    pub fn new() -> Self {
        Self {
            processor: OverlapProcessor::new(),
        }
    }

    /// Pre-run access to the processor, used by `Engine::init` before the
    /// simulation thread exists.
    pub fn processor_mut(&mut self) -> &mut OverlapProcessor {
        &mut self.processor
    }

    //--- spawn_core_thread() ---------------------------------------------

    /// Spawns the logic thread ticking the processor at `tps`.
    ///
    /// Each tick:
    ///  1. Drains and applies all pending driver commands
    ///  2. Runs one detection pass and dispatches the overlap set
    ///  3. Sleeps out the remainder of the tick to hold the pace
    ///
    /// The thread exits cleanly on [`WorldCommand::Shutdown`] or when the
    /// driver drops its sender, and exits with an error log if the
    /// processor reports a contract violation.
    pub fn spawn_core_thread(
        self,
        receiver: Receiver<WorldCommand>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let tick_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut processor = self.processor;

            loop {
                let tick_start = Instant::now();

                //--- Step 1: Apply driver commands at the boundary --------
                if let TickControl::Exit =
                    Self::collect_world_commands(&receiver, &mut processor)
                {
                    info!("Simulation thread exiting.");
                    break;
                }

                //--- Step 2: Run the detection pass -----------------------
                if let Err(e) = processor.process_tick() {
                    error!("Detection pass aborted: {}", e);
                    break;
                }

                //--- Step 3: Maintain deterministic pacing ----------------
                let elapsed = tick_start.elapsed();
                if elapsed < tick_duration {
                    thread::sleep(tick_duration - elapsed);
                }
            }
        })
    }

    //--- collect_world_commands() ----------------------------------------

    /// Applies every command queued since the previous boundary.
    ///
    /// Returns whether the loop should continue or exit.
    fn collect_world_commands(
        receiver: &Receiver<WorldCommand>,
        processor: &mut OverlapProcessor,
    ) -> TickControl {
        loop {
            match receiver.try_recv() {
                Ok(WorldCommand::Spawn(entity)) => processor.add(entity),
                Ok(WorldCommand::Despawn(entity)) => processor.remove(&entity),
                Ok(WorldCommand::InstallRules(rules)) => processor.set_rule_applier(rules),
                Ok(WorldCommand::Shutdown) => return TickControl::Exit,
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => return TickControl::Continue,
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
