//! Business-rule checks applied before a student is registered.

use crate::domain::UnregisteredStudent;
use crate::error::ValidationError;

/// Youngest age accepted for registration, inclusive.
pub const MIN_AGE: u32 = 16;

pub fn validate_name(name: Option<&str>) -> Result<&str, ValidationError> {
    match name {
        None => Err(ValidationError::MissingName),
        Some("") => Err(ValidationError::EmptyName),
        Some(name) => Ok(name),
    }
}

pub fn validate_age(age: Option<i64>) -> Result<u32, ValidationError> {
    let age = age.ok_or(ValidationError::MissingAge)?;
    if age < i64::from(MIN_AGE) {
        return Err(ValidationError::AgeBelowMinimum { age, min: MIN_AGE });
    }
    u32::try_from(age).map_err(|_| ValidationError::AgeOutOfRange(age))
}

/// Validates every field, returning the name and age to store.
pub fn validate(student: &UnregisteredStudent) -> Result<(String, u32), ValidationError> {
    let name = validate_name(student.name.as_deref())?;
    let age = validate_age(student.age)?;
    Ok((name.to_string(), age))
}
