use crate::actor_framework::Entity;
use crate::domain::{Student, StudentId};

impl Entity for Student {
    type Id = StudentId;

    fn id(&self) -> &StudentId {
        Student::id(self)
    }
}
