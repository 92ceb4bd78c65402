//=========================================================================
// Ludic Engine
//
// Main entry point and driver-facing surface of the framework.
//
// Architecture:
// ```text
//     EngineBuilder ──build()──► Engine ──start()──► EngineHandle
//         │                        │                     │
//         ├─ with_tps()            ├─ init(|processor|)  ├─ spawn()
//         └─ with_channel_         └─ spawns the         ├─ despawn()
//            capacity()               simulation thread  ├─ install_rules()
//                                                        └─ shutdown()
//
// Communication: bounded channel (WorldCommand), drained at tick
// boundaries by the simulation thread.
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::thread::JoinHandle;

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::overlap::{EntityHandle, OverlapProcessor, OverlapRuleApplier};
use crate::core::{SimulationOrchestrator, WorldCommand};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (detection passes per second)
/// - **Channel capacity**: 128 queued world commands
///
/// # Examples
///
/// ```no_run
/// use ludic_engine::EngineBuilder;
///
/// let engine = EngineBuilder::new()
///     .with_tps(120.0)
///     .with_channel_capacity(256)
///     .build();
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
        }
    }

    /// Sets the target ticks per second for the simulation thread.
    ///
    /// Each tick runs one full detection pass. Higher values detect
    /// overlaps sooner at the cost of CPU time.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the capacity of the driver → simulation command channel.
    ///
    /// Larger values buffer more entity churn between ticks; smaller
    /// values apply backpressure to the driver sooner.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the engine instance.
    ///
    /// Consumes the builder and produces a configured [`Engine`] ready
    /// for initialization or execution.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, channel: {})",
            self.tps, self.channel_capacity
        );

        Engine {
            orchestrator: SimulationOrchestrator::new(),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== EngineError =========================================================

/// Errors surfaced by the driver-facing engine handle.
#[derive(Debug)]
pub enum EngineError {
    /// The simulation thread has stopped and no longer accepts commands.
    SimulationStopped,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SimulationStopped => write!(f, "simulation thread has stopped"),
        }
    }
}

impl std::error::Error for EngineError {}

//=== Engine ==============================================================

/// Framework runtime owning the overlap detection simulation.
///
/// Create via [`EngineBuilder`], configure with [`Engine::init`], then
/// call [`Engine::start`] to spawn the simulation thread and receive the
/// driver-side [`EngineHandle`].
///
/// # Example
///
/// ```no_run
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
/// let handle = EngineBuilder::new()
///     .build()
///     .init(|processor| {
///         processor.set_rule_applier(Box::new(Silent));
///         processor.add(Arc::new(Wall(BoundingBox::new(0, 0, 32, 32))));
///     })
///     .start();
///
/// // ... per-frame driver loop elsewhere ...
/// handle.shutdown();
/// ```
pub struct Engine {
    orchestrator: SimulationOrchestrator,
    tps: f64,
    channel_capacity: usize,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Configures the overlap processor before the simulation starts.
    ///
    /// This is the place to install the rule applier and seed the initial
    /// entity set; once [`Engine::start`] runs, all registry changes go
    /// through the command channel instead.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut OverlapProcessor),
    {
        info!("Initializing engine systems");
        init_fn(self.orchestrator.processor_mut());
        self
    }

    //--- Execution --------------------------------------------------------

    /// Spawns the simulation thread and returns the driver handle.
    ///
    /// The thread ticks at the configured TPS, applying queued commands
    /// at each boundary, until the handle shuts it down or is dropped.
    pub fn start(self) -> EngineHandle {
        info!("Starting engine runtime (TPS: {})", self.tps);

        let (tx, rx): (Sender<WorldCommand>, _) = bounded(self.channel_capacity);

        let thread = self.orchestrator.spawn_core_thread(rx, self.tps);
        info!("Simulation thread spawned");

        EngineHandle {
            commands: tx,
            thread,
        }
    }
}

//=== EngineHandle ========================================================

/// Driver-side handle to a running simulation.
///
/// All methods queue a [`WorldCommand`] that takes effect at the next
/// tick boundary; nothing here touches the registry mid-pass. Dropping
/// the handle without calling [`shutdown`] disconnects the channel, which
/// also terminates the simulation thread, just without joining it.
///
/// [`shutdown`]: EngineHandle::shutdown
pub struct EngineHandle {
    commands: Sender<WorldCommand>,
    thread: JoinHandle<()>,
}

impl EngineHandle {
    /// Queues an entity registration for the next tick boundary.
    pub fn spawn(&self, entity: EntityHandle) -> Result<(), EngineError> {
        self.send(WorldCommand::Spawn(entity))
    }

    /// Queues an entity removal for the next tick boundary.
    pub fn despawn(&self, entity: EntityHandle) -> Result<(), EngineError> {
        self.send(WorldCommand::Despawn(entity))
    }

    /// Queues installation of a new rule applier.
    pub fn install_rules(&self, rules: Box<dyn OverlapRuleApplier>) -> Result<(), EngineError> {
        self.send(WorldCommand::InstallRules(rules))
    }

    /// Stops the simulation and waits for the thread to terminate.
    pub fn shutdown(self) {
        // The thread may already be gone (e.g. it failed loudly); the
        // join below reports either way.
        let _ = self.commands.send(WorldCommand::Shutdown);

        match self.thread.join() {
            Ok(()) => info!("Simulation thread terminated cleanly"),
            Err(e) => error!("Simulation thread panicked: {:?}", e),
        }
    }

    fn send(&self, command: WorldCommand) -> Result<(), EngineError> {
        self.commands
            .send(command)
            .map_err(|_| EngineError::SimulationStopped)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
