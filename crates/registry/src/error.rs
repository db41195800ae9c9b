use core_types::Severity;
use database::DbError;
use thiserror::Error;

/// Every way a registry workflow can fail.
///
/// The first group are validation failures, recovered by re-displaying the
/// form. `NotFound` becomes a not-found response. The storage kinds are
/// reported with a generic message and never stop the process.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("{0} is required")]
    Blank(&'static str),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("age must be a positive number")]
    InvalidAge,

    #[error("roll number already exists")]
    DuplicateRollNo,

    #[error("email already exists")]
    DuplicateEmail,

    #[error("student not found")]
    NotFound,

    #[error("write rejected by the database: {0}")]
    ConstraintViolation(String),

    #[error("storage failure: {0}")]
    StorageFailure(DbError),
}

impl From<DbError> for RegistryError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => RegistryError::NotFound,
            DbError::ConstraintViolation(detail) => RegistryError::ConstraintViolation(detail),
            other => RegistryError::StorageFailure(other),
        }
    }
}

impl RegistryError {
    /// True for failures caused by the submitted input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RegistryError::Blank(_)
                | RegistryError::InvalidEmail
                | RegistryError::InvalidAge
                | RegistryError::DuplicateRollNo
                | RegistryError::DuplicateEmail
        )
    }

    /// The message shown to the user. Storage details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            RegistryError::Blank(field) => format!("{} is required.", capitalize(field)),
            RegistryError::InvalidEmail => "Invalid email address.".to_string(),
            RegistryError::InvalidAge => "Age must be a positive number.".to_string(),
            RegistryError::DuplicateRollNo => "Roll number already exists.".to_string(),
            RegistryError::DuplicateEmail => "Email already exists.".to_string(),
            RegistryError::NotFound => "Student not found.".to_string(),
            RegistryError::ConstraintViolation(_) | RegistryError::StorageFailure(_) => {
                "The student record could not be saved. Please try again.".to_string()
            }
        }
    }

    pub fn severity(&self) -> Severity {
        Severity::Danger
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
