// Mutuals - core/mod.rs
//
// Core business logic layer.
// Dependencies: serde, async-trait (for the Transport seam).
// Must NOT depend on: ui, platform, app, or any HTTP/runtime crate directly.

pub mod aggregate;
pub mod fetch;
pub mod model;
pub mod registry;
