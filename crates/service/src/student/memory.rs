use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use models::student::Student;

use crate::errors::ServiceError;
use crate::student::domain::NewStudent;
use crate::student::repository::StudentRepository;

/// In-process store keyed by id, with ids handed out from 1 upwards.
///
/// Mutations check email uniqueness (exact match) and write under one write
/// lock, so concurrent requests cannot both claim the same email.
pub struct MemoryStudentRepository {
    inner: RwLock<MemoryState>,
}

struct MemoryState {
    students: BTreeMap<i64, Student>,
    next_id: i64,
}

impl MemoryState {
    /// Exact comparison; only the database backend folds case.
    fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> bool {
        self.students
            .values()
            .any(|s| Some(s.id) != exclude_id && s.email == email)
    }
}

impl MemoryStudentRepository {
    pub fn new() -> Self {
        Self { inner: RwLock::new(MemoryState { students: BTreeMap::new(), next_id: 1 }) }
    }
}

impl Default for MemoryStudentRepository {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl StudentRepository for MemoryStudentRepository {
    /// Ascending id, which is insertion order.
    async fn list(&self) -> Result<Vec<Student>, ServiceError> {
        let state = self.inner.read().await;
        Ok(state.students.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Student>, ServiceError> {
        let state = self.inner.read().await;
        Ok(state.students.get(&id).cloned())
    }

    async fn insert(&self, new: NewStudent) -> Result<Student, ServiceError> {
        let mut state = self.inner.write().await;
        if state.email_taken(&new.email, None) {
            return Err(ServiceError::DuplicateEmail);
        }
        let id = state.next_id;
        state.next_id += 1;
        let now = Utc::now().into();
        let student = Student {
            id,
            name: new.name,
            grade: new.grade,
            email: new.email,
            created_at: now,
            updated_at: now,
        };
        state.students.insert(id, student.clone());
        Ok(student)
    }

    async fn update(&self, changed: Student) -> Result<Student, ServiceError> {
        let mut state = self.inner.write().await;
        if !state.students.contains_key(&changed.id) {
            return Err(ServiceError::not_found("student"));
        }
        if state.email_taken(&changed.email, Some(changed.id)) {
            return Err(ServiceError::DuplicateEmail);
        }
        let stored = state
            .students
            .get_mut(&changed.id)
            .ok_or_else(|| ServiceError::not_found("student"))?;
        stored.name = changed.name;
        stored.grade = changed.grade;
        stored.email = changed.email;
        stored.updated_at = changed.updated_at;
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let mut state = self.inner.write().await;
        Ok(state.students.remove(&id).is_some())
    }
}
