// Mutuals - ui/panels/mod.rs

pub mod followers;
pub mod status;
pub mod users;
