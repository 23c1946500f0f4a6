use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use models::student::{self, Student};

use crate::errors::ServiceError;
use crate::student::domain::{CreateStudentInput, NewStudent, UpdateStudentInput};
use crate::student::repository::StudentRepository;

/// Absent keeps `current`; an explicit `null` clears the field.
fn merge_field(supplied: Option<Option<String>>, current: String) -> Option<String> {
    supplied.unwrap_or(Some(current))
}

/// Application service encapsulating student business rules.
/// Validates input and merges partial updates; storage enforces email uniqueness.
pub struct StudentService<R: StudentRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: StudentRepository + ?Sized> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<Student>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Student, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("student"))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateStudentInput) -> Result<Student, ServiceError> {
        student::validate_fields(input.name.as_deref(), input.grade.as_deref(), input.email.as_deref())?;
        let new = NewStudent {
            name: input.name.unwrap_or_default(),
            grade: input.grade.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
        };
        let created = self.repo.insert(new).await?;
        info!(id = created.id, "student_created");
        Ok(created)
    }

    /// Merge the supplied fields onto the stored record, then validate the result as a whole.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: UpdateStudentInput) -> Result<Student, ServiceError> {
        let existing = self.get(id).await?;
        let name = merge_field(input.name, existing.name);
        let grade = merge_field(input.grade, existing.grade);
        let email = merge_field(input.email, existing.email);
        student::validate_fields(name.as_deref(), grade.as_deref(), email.as_deref())?;

        let merged = Student {
            id: existing.id,
            name: name.unwrap_or_default(),
            grade: grade.unwrap_or_default(),
            email: email.unwrap_or_default(),
            created_at: existing.created_at,
            updated_at: Utc::now().into(),
        };
        let updated = self.repo.update(merged).await?;
        info!(id = updated.id, "student_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if self.repo.delete(id).await? {
            info!(id, "student_deleted");
            Ok(())
        } else {
            Err(ServiceError::not_found("student"))
        }
    }
}
