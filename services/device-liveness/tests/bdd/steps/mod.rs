//! BDD step definitions for device liveness service

pub mod lifecycle_steps;
pub mod registry_steps;
pub mod sweeper_steps;
