use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RegistrationError;

/// Opaque identifier assigned to a student on registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    /// A fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StudentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A registered student, as held by the store.
///
/// Only the registration service builds these, so name and age have
/// always passed validation. Identity is the `id` alone: two students with
/// the same id are the same student whatever their other fields say.
#[derive(Debug, Clone, Serialize)]
pub struct Student {
    id: StudentId,
    name: String,
    age: u32,
}

impl Student {
    pub(crate) fn new(id: StudentId, name: impl Into<String>, age: u32) -> Self {
        Self {
            id,
            name: name.into(),
            age,
        }
    }

    pub fn id(&self) -> &StudentId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }
}

impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Student {}

impl Hash for Student {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A client-built student that has not been registered yet.
///
/// Fields stay optional: the registration service validates presence itself
/// instead of trusting whoever built the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnregisteredStudent {
    pub name: Option<String>,
    pub age: Option<i64>,
}

impl UnregisteredStudent {
    pub fn new(name: impl Into<String>, age: i64) -> Self {
        Self {
            name: Some(name.into()),
            age: Some(age),
        }
    }
}

/// Wire shape of a student record. Every field may be missing or null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
}

impl From<&Student> for StudentPayload {
    fn from(student: &Student) -> Self {
        Self {
            id: Some(student.id.to_string()),
            name: Some(student.name.clone()),
            age: Some(i64::from(student.age)),
        }
    }
}

impl From<UnregisteredStudent> for StudentPayload {
    fn from(student: UnregisteredStudent) -> Self {
        Self {
            id: None,
            name: student.name,
            age: student.age,
        }
    }
}

impl TryFrom<StudentPayload> for UnregisteredStudent {
    type Error = RegistrationError;

    /// Any payload that already carries an id is rejected, whatever its body.
    fn try_from(payload: StudentPayload) -> Result<Self, Self::Error> {
        if let Some(id) = payload.id {
            return Err(RegistrationError::InvalidState(format!(
                "student is already identified as {id:?}"
            )));
        }
        Ok(Self {
            name: payload.name,
            age: payload.age,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_is_by_id_only() {
        let a = Student::new(StudentId::from("s1"), "Alice", 20);
        let b = Student::new(StudentId::from("s1"), "Bob", 30);
        let c = Student::new(StudentId::from("s2"), "Alice", 20);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let ids: HashSet<_> = (0..1000).map(|_| StudentId::generate()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| !id.as_str().is_empty()));
    }

    #[test]
    fn test_payload_with_id_is_invalid_state() {
        let payload = StudentPayload {
            id: Some("id-registered".to_string()),
            name: Some("Student".to_string()),
            age: Some(16),
        };

        let result = UnregisteredStudent::try_from(payload);
        assert!(matches!(result, Err(RegistrationError::InvalidState(_))));
    }

    #[test]
    fn test_payload_without_id_converts() {
        let payload: StudentPayload = serde_json::from_str(r#"{"age": 16}"#).unwrap();
        let student = UnregisteredStudent::try_from(payload).unwrap();

        assert_eq!(student.name, None);
        assert_eq!(student.age, Some(16));
    }

    #[test]
    fn test_student_serializes_all_fields() {
        let student = Student::new(StudentId::from("s1"), "Student", 16);
        let json = serde_json::to_value(&student).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"id": "s1", "name": "Student", "age": 16})
        );
    }
}
