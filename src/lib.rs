//! # Student Registry
//!
//! In-memory registration of students: register, look up by id, unregister.
//!
//! - **Domain types** - [`domain::UnregisteredStudent`] before registration, [`domain::Student`] after
//! - **Store actor** - a task that owns the record map; [`actor_framework::StoreClient`] is its handle
//! - **Registration service** - validation and id assignment → [`registration::RegistrationService`]
//! - **Routes** - request shape checks and status mapping → [`transport::StudentRoutes`]
//! - **System coordinator** - startup and shutdown → [`app_system::RegistrySystem`]
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use student_registry::app_system::{RegistryConfig, RegistrySystem};
//! use student_registry::domain::UnregisteredStudent;
//!
//! let system = RegistrySystem::new(&RegistryConfig::default());
//! let student = system.service.register(UnregisteredStudent::new("Student", 16)).await?;
//! assert!(system.service.find(student.id()).await?.is_some());
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod domain;
pub mod error;
pub mod registration;
pub mod transport;

#[cfg(test)]
mod mock_framework;
