// Mutuals - lib.rs
//
// Library entry point, exposing all non-GUI-shell modules for integration
// testing and headless use.
//
// The eframe `App` implementation lives in `gui.rs` (binary only).

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
