//! Service layer providing business-oriented CRUD operations on student records.
//! - Separates business rules (validation, email uniqueness) from storage.
//! - Storage is pluggable through `student::StudentRepository`.
//! - Reuses validation and entity definitions in the `models` crate.

pub mod errors;
#[cfg(test)]
pub mod test_support;
pub mod student;
