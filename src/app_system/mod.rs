//! System orchestration, configuration, startup, and shutdown logic.

pub mod config;
pub mod registry_system;
pub mod telemetry;

pub use config::*;
pub use registry_system::*;
pub use telemetry::*;
