use thiserror::Error;

use crate::actor_framework::StoreError;

/// Business-rule violations on a student's name or age.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,
    #[error("name must not be empty")]
    EmptyName,
    #[error("age is required")]
    MissingAge,
    #[error("age must be at least {min}, got {age}")]
    AgeBelowMinimum { age: i64, min: u32 },
    #[error("age is out of range: {0}")]
    AgeOutOfRange(i64),
}

/// Errors surfaced by the registration service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Student validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
    #[error("Invalid student state: {0}")]
    InvalidState(String),
    #[error("No free student identifier after {0} attempts")]
    IdentifierExhausted(usize),
    #[error("Student store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

/// Errors from starting or stopping the registry system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Store actor task failed: {0}")]
    ActorTaskFailed(#[from] tokio::task::JoinError),
}
