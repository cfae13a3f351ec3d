// Mutuals - platform/mod.rs
//
// Platform abstraction layer: config directories and the HTTP transport.
// Dependencies: directories, reqwest, core (model and Transport trait only).
// Must NOT depend on: app, ui.

pub mod config;
pub mod http;
