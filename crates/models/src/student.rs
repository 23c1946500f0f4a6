use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{
    entity::prelude::*,
    sea_query::{Expr, Func},
    DatabaseConnection, QueryFilter,
};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const NAME_MAX_CHARS: usize = 100;
pub const GRADE_MAX_CHARS: usize = 2;

pub const NAME_REQUIRED: &str = "Name is required";
pub const GRADE_REQUIRED: &str = "Grade is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email format";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// A student record. The same shape is returned by every storage backend.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub grade: String,
    pub email: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub type Student = Model;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Key used for email uniqueness; comparisons ignore case.
pub fn email_key(email: &str) -> String {
    email.to_lowercase()
}

fn is_blank(v: Option<&str>) -> bool {
    v.map(|s| s.trim().is_empty()).unwrap_or(true)
}

/// Check all three fields and report every problem at once.
///
/// `None` and whitespace-only values count as missing.
pub fn validate_fields(
    name: Option<&str>,
    grade: Option<&str>,
    email: Option<&str>,
) -> Result<(), ModelError> {
    let mut errors = Vec::new();

    match name {
        _ if is_blank(name) => errors.push(NAME_REQUIRED.to_string()),
        Some(n) if n.chars().count() > NAME_MAX_CHARS => {
            errors.push(format!("Name must be at most {NAME_MAX_CHARS} characters"))
        }
        _ => {}
    }

    match grade {
        _ if is_blank(grade) => errors.push(GRADE_REQUIRED.to_string()),
        Some(g) if g.chars().count() > GRADE_MAX_CHARS => {
            errors.push(format!("Grade must be at most {GRADE_MAX_CHARS} characters"))
        }
        _ => {}
    }

    match email {
        _ if is_blank(email) => errors.push(EMAIL_REQUIRED.to_string()),
        Some(e) if !is_valid_email(e) => errors.push(EMAIL_INVALID.to_string()),
        _ => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ModelError::Validation(errors))
    }
}

/// Find a student whose email matches case-insensitively, ignoring `exclude_id`.
pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
    exclude_id: Option<i64>,
) -> Result<Option<Model>, ModelError> {
    let mut finder = Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col(Column::Email))).eq(email_key(email)));
    if let Some(id) = exclude_id {
        finder = finder.filter(Column::Id.ne(id));
    }
    finder.one(db).await.map_err(|e| ModelError::Db(e.to_string()))
}
