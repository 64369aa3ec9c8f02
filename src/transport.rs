//! Request-level contract between callers and the registration service.
//!
//! [`StudentRoutes`] mirrors `GET /student/{id}`, `POST /student` and
//! `DELETE /student/{id}`: it checks the request shape, calls the service
//! and maps the outcome to a [`RouteResponse`] carrying the status code a server
//! would send. Access control lives outside this crate.

use tracing::{debug, error, info, instrument, warn};

use crate::domain::{Student, StudentId, StudentPayload, UnregisteredStudent};
use crate::error::RegistrationError;
use crate::registration::RegistrationService;

#[derive(Debug, Clone, PartialEq)]
pub enum RouteResponse {
    Found(Student),
    Created { location: String, student: Student },
    Ok,
    NotFound,
    BadRequest(String),
    Unavailable(String),
}

impl RouteResponse {
    pub fn status(&self) -> u16 {
        match self {
            RouteResponse::Found(_) | RouteResponse::Ok => 200,
            RouteResponse::Created { .. } => 201,
            RouteResponse::BadRequest(_) => 400,
            RouteResponse::NotFound => 404,
            RouteResponse::Unavailable(_) => 503,
        }
    }

    /// JSON body, for responses that carry a student.
    pub fn body(&self) -> Option<String> {
        match self {
            RouteResponse::Found(student) | RouteResponse::Created { student, .. } => {
                serde_json::to_string(student).ok()
            }
            _ => None,
        }
    }
}

impl From<RegistrationError> for RouteResponse {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::ValidationFailed(_) | RegistrationError::InvalidState(_) => {
                RouteResponse::BadRequest(err.to_string())
            }
            RegistrationError::IdentifierExhausted(_) | RegistrationError::StoreUnavailable(_) => {
                RouteResponse::Unavailable(err.to_string())
            }
        }
    }
}

/// Names of required fields missing from the payload.
fn missing_fields(payload: &StudentPayload) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if payload.name.is_none() {
        missing.push("name");
    }
    if payload.age.is_none() {
        missing.push("age");
    }
    missing
}

#[derive(Clone)]
pub struct StudentRoutes {
    service: RegistrationService,
    location_prefix: String,
}

impl StudentRoutes {
    pub fn new(
        service: RegistrationService,
        location_prefix: impl Into<String>,
    ) -> Self {
        Self {
            service,
            location_prefix: location_prefix.into(),
        }
    }

    fn location(&self, student: &Student) -> String {
        format!(
            "{}/{}",
            self.location_prefix.trim_end_matches('/'),
            student.id()
        )
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> RouteResponse {
        if id.is_empty() {
            return RouteResponse::NotFound;
        }
        match self.service.find(&StudentId::from(id)).await {
            Ok(Some(student)) => RouteResponse::Found(student),
            Ok(None) => RouteResponse::NotFound,
            Err(e) => e.into(),
        }
    }

    #[instrument(skip(self, body))]
    pub async fn post(&self, body: &str) -> RouteResponse {
        let payload: StudentPayload = match serde_json::from_str(body) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Malformed student payload");
                return RouteResponse::BadRequest(format!("malformed payload: {e}"));
            }
        };

        let missing = missing_fields(&payload);
        if !missing.is_empty() {
            debug!(?missing, "Student payload incomplete");
            return RouteResponse::BadRequest(format!("missing fields: {}", missing.join(", ")));
        }

        let result = match UnregisteredStudent::try_from(payload) {
            Ok(student) => self.service.register(student).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(student) => {
                let location = self.location(&student);
                info!(%location, "Student created");
                RouteResponse::Created { location, student }
            }
            Err(e) => {
                if matches!(e, RegistrationError::StoreUnavailable(_)) {
                    error!(error = %e, "Registration failed");
                }
                e.into()
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> RouteResponse {
        if id.is_empty() {
            return RouteResponse::NotFound;
        }
        let student = match self.service.find(&StudentId::from(id)).await {
            Ok(Some(student)) => student,
            Ok(None) => return RouteResponse::NotFound,
            Err(e) => return e.into(),
        };
        match self.service.unregister(&student).await {
            Ok(()) => RouteResponse::Ok,
            Err(e) => e.into(),
        }
    }
}
