//=========================================================================
// Ludic Engine — Library Root
//
// This crate defines the public API surface of the Ludic Engine, a small
// 2D game framework built around motion-predictive overlap detection.
//
// Responsibilities:
// - Expose the overlap detection core (`OverlapProcessor` and friends)
// - Expose the driver-facing runtime facade (`Engine`, `EngineHandle`)
// - Keep the simulation internals (orchestrator, tick loop) private
//
// Typical usage:
// ```no_run
// use ludic_engine::EngineBuilder;
//
// fn main() {
//     let handle = EngineBuilder::new().build().start();
//     // drive the game, then:
//     handle.shutdown();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the framework systems: geometry, the overlap engine,
// move strategies and the input vocabulary. It is exposed publicly for
// framework-level extensibility, but most application code will use the
// top-level `Engine` facade or the prelude.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the driver-facing entry point: the builder, the
// runtime and the command handle over the simulation thread.
//
mod engine;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the engine surface so applications can simply
// `use ludic_engine::EngineBuilder;` without knowing the module layout.
//
pub use engine::{Engine, EngineBuilder, EngineError, EngineHandle};
