// Mutuals - app/mod.rs
//
// Application layer: orchestration and session state.
// Dependencies: core layer, platform config (for defaults only).
// Must NOT depend on: ui.

pub mod banner;
pub mod fetch;
pub mod session;
