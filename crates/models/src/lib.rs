//! Persistence models for student records.
//! - `student`: SeaORM entity plus field validation shared by every backend.
//! - `db`: connection pool setup and migrations.

pub mod errors;
pub mod db;
pub mod student;
