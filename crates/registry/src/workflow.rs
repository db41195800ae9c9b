use core_types::{Student, StudentForm};
use database::StudentRepository;

use crate::error::RegistryError;
use crate::validation::validate;

/// The student workflows, independent of any transport.
///
/// Each call runs to completion against the store; validation failures come
/// back as errors for the caller to report and leave the store untouched.
#[derive(Debug, Clone)]
pub struct Registry {
    repo: StudentRepository,
}

impl Registry {
    pub fn new(repo: StudentRepository) -> Self {
        Self { repo }
    }

    /// All students, in insertion order.
    pub async fn list(&self) -> Result<Vec<Student>, RegistryError> {
        Ok(self.repo.list_all().await?)
    }

    pub async fn view(&self, id: i64) -> Result<Student, RegistryError> {
        Ok(self.repo.get(id).await?)
    }

    /// Validates the form and creates a new student.
    pub async fn register(&self, form: &StudentForm) -> Result<Student, RegistryError> {
        let candidate = match validate(form, &self.repo, None).await {
            Ok(candidate) => candidate,
            Err(err) => return Err(reject("register", None, err)),
        };

        match self.repo.create(&candidate).await {
            Ok(student) => {
                tracing::info!(id = student.id, roll_no = %student.roll_no, "Student registered.");
                Ok(student)
            }
            Err(err) => Err(reject("register", None, err.into())),
        }
    }

    /// Replaces every field of an existing student.
    ///
    /// The record is loaded first, so an unknown id is `NotFound` regardless of
    /// what was submitted.
    pub async fn update(&self, id: i64, form: &StudentForm) -> Result<Student, RegistryError> {
        self.repo.get(id).await?;

        let candidate = match validate(form, &self.repo, Some(id)).await {
            Ok(candidate) => candidate,
            Err(err) => return Err(reject("update", Some(id), err)),
        };

        match self.repo.update(id, &candidate).await {
            Ok(student) => {
                tracing::info!(id, roll_no = %student.roll_no, "Student updated.");
                Ok(student)
            }
            Err(err) => Err(reject("update", Some(id), err.into())),
        }
    }

    /// Deletes a student and returns the removed record.
    pub async fn delete(&self, id: i64) -> Result<Student, RegistryError> {
        let student = self.repo.get(id).await?;

        match self.repo.delete(id).await {
            Ok(()) => {
                tracing::info!(id, roll_no = %student.roll_no, "Student deleted.");
                Ok(student)
            }
            Err(err) => Err(reject("delete", Some(id), err.into())),
        }
    }
}

/// Logs a failed workflow at a level matching its cause and passes the error on.
fn reject(workflow: &'static str, id: Option<i64>, err: RegistryError) -> RegistryError {
    if err.is_validation() || matches!(err, RegistryError::NotFound) {
        tracing::warn!(workflow, ?id, reason = %err, "Student input rejected.");
    } else {
        tracing::error!(workflow, ?id, error = ?err, "Student write failed.");
    }
    err
}
