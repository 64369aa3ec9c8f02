use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::StoreClient;
use crate::domain::{validate, Student, StudentId, UnregisteredStudent};
use crate::error::RegistrationError;

/// Upper bound on identifier draws per registration before giving up.
pub const MAX_ID_ATTEMPTS: usize = 8;

pub type IdGenerator = Arc<dyn Fn() -> StudentId + Send + Sync>;

/// The only way in to the student store.
///
/// Validates registrations, assigns identifiers and removes students. Clones
/// share the same store and can be used from any number of tasks.
#[derive(Clone)]
pub struct RegistrationService {
    store: StoreClient<Student>,
    next_id: IdGenerator,
}

impl RegistrationService {
    pub fn new(store: StoreClient<Student>) -> Self {
        Self::with_id_generator(store, StudentId::generate)
    }

    pub fn with_id_generator(
        store: StoreClient<Student>,
        next_id: impl Fn() -> StudentId + Send + Sync + 'static,
    ) -> Self {
        Self {
            store,
            next_id: Arc::new(next_id),
        }
    }

    /// Validates the student, gives it a fresh id and stores it.
    ///
    /// Nothing reaches the store when validation fails. A generated id that
    /// is already taken is redrawn, up to [`MAX_ID_ATTEMPTS`] times.
    #[instrument(skip(self, student))]
    pub async fn register(
        &self,
        student: UnregisteredStudent,
    ) -> Result<Student, RegistrationError> {
        let (name, age) = validate(&student).inspect_err(|e| {
            warn!(error = %e, "Registration rejected");
        })?;

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let record = Student::new((self.next_id)(), name.clone(), age);
            let inserted = self
                .store
                .insert(record.clone())
                .await
                .inspect_err(|e| error!(error = %e, "Store unavailable"))?;
            if inserted {
                info!(student_id = %record.id(), "Student registered");
                return Ok(record);
            }
            warn!(attempt, student_id = %record.id(), "Generated id already taken");
        }

        error!(attempts = MAX_ID_ATTEMPTS, "Could not allocate a student id");
        Err(RegistrationError::IdentifierExhausted(MAX_ID_ATTEMPTS))
    }

    #[instrument(skip(self, id), fields(student_id = %id))]
    pub async fn find(&self, id: &StudentId) -> Result<Option<Student>, RegistrationError> {
        debug!("Looking up student");
        let found = self
            .store
            .get(id.clone())
            .await
            .inspect_err(|e| error!(error = %e, "Store unavailable"))?;
        if found.is_none() {
            debug!("Student not found");
        }
        Ok(found)
    }

    /// Removes the student. Unregistering an absent student is not an error.
    #[instrument(skip(self, student), fields(student_id = %student.id()))]
    pub async fn unregister(&self, student: &Student) -> Result<(), RegistrationError> {
        self.store
            .remove(student.id().clone())
            .await
            .inspect_err(|e| error!(error = %e, "Store unavailable"))?;
        info!("Student unregistered");
        Ok(())
    }
}
