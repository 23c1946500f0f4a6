use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryOrder, Set, SqlErr,
};

use models::student::{self, Entity as StudentEntity, Student};

use crate::errors::ServiceError;
use crate::student::domain::NewStudent;

/// Storage backend for student records.
///
/// Implementations own email uniqueness: `insert` and `update` must fail with
/// `ServiceError::DuplicateEmail` when another record holds the same email.
/// The memory backend compares emails exactly; the database backend ignores case.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Student>, ServiceError>;
    async fn get(&self, id: i64) -> Result<Option<Student>, ServiceError>;
    /// Assign an id and timestamps, then store.
    async fn insert(&self, new: NewStudent) -> Result<Student, ServiceError>;
    /// Replace name, grade, email and `updated_at` of the record with `student.id`.
    /// `id` and `created_at` of the stored record are kept.
    async fn update(&self, student: Student) -> Result<Student, ServiceError>;
    /// Returns true if a record was removed.
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn map_db_err(e: DbErr) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::DuplicateEmail,
        _ => ServiceError::Db(e.to_string()),
    }
}

/// A row deleted between the lookup and the write leaves nothing to update.
fn map_update_err(e: DbErr) -> ServiceError {
    match e {
        DbErr::RecordNotUpdated => ServiceError::not_found("student"),
        other => map_db_err(other),
    }
}

#[async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    /// Newest first.
    async fn list(&self) -> Result<Vec<Student>, ServiceError> {
        let rows = StudentEntity::find()
            .order_by_desc(student::Column::CreatedAt)
            .order_by_desc(student::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> Result<Option<Student>, ServiceError> {
        StudentEntity::find_by_id(id).one(&self.db).await.map_err(map_db_err)
    }

    async fn insert(&self, new: NewStudent) -> Result<Student, ServiceError> {
        // the unique index still catches a concurrent insert that slips past this check
        if student::find_by_email(&self.db, &new.email, None).await?.is_some() {
            return Err(ServiceError::DuplicateEmail);
        }
        let now = Utc::now().into();
        let am = student::ActiveModel {
            id: NotSet,
            name: Set(new.name),
            grade: Set(new.grade),
            email: Set(new.email),
            created_at: Set(now),
            updated_at: Set(now),
        };
        am.insert(&self.db).await.map_err(map_db_err)
    }

    async fn update(&self, changed: Student) -> Result<Student, ServiceError> {
        let existing = StudentEntity::find_by_id(changed.id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| ServiceError::not_found("student"))?;
        if student::find_by_email(&self.db, &changed.email, Some(changed.id)).await?.is_some() {
            return Err(ServiceError::DuplicateEmail);
        }
        let mut am: student::ActiveModel = existing.into();
        am.name = Set(changed.name);
        am.grade = Set(changed.grade);
        am.email = Set(changed.email);
        am.updated_at = Set(changed.updated_at);
        am.update(&self.db).await.map_err(map_update_err)
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = StudentEntity::delete_by_id(id).exec(&self.db).await.map_err(map_db_err)?;
        Ok(res.rows_affected > 0)
    }
}
