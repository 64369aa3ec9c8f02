//! Student registration: identity assignment and record lifecycle.

pub mod entity;
pub mod service;

pub use service::*;
