use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted student row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub roll_no: String,
    pub email: String,
    pub age: i64,
}

/// The raw text of a submitted student form.
///
/// Every field defaults to an empty string so that a missing field is
/// reported by validation rather than rejected by the form extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub roll_no: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: String,
}

impl StudentForm {
    pub fn new(name: &str, roll_no: &str, email: &str, age: &str) -> Self {
        Self {
            name: name.to_string(),
            roll_no: roll_no.to_string(),
            email: email.to_string(),
            age: age.to_string(),
        }
    }
}

/// Pre-fills the update form with the stored values.
impl From<&Student> for StudentForm {
    fn from(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            roll_no: student.roll_no.clone(),
            email: student.email.clone(),
            age: student.age.to_string(),
        }
    }
}

/// A validated, normalized field set ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub roll_no: String,
    pub email: String,
    pub age: i64,
}
