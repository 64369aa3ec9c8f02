pub mod student;
pub mod validation;

pub use student::*;
pub use validation::*;
