//! Create `student` table.
//!
//! Email uniqueness is case-insensitive, enforced by a unique index on
//! `LOWER(email)` that the query builder cannot express, so it is issued as raw SQL.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(big_integer(Student::Id).auto_increment().primary_key())
                    .col(string_len(Student::Name, 100).not_null())
                    .col(string_len(Student::Grade, 2).not_null())
                    .col(text(Student::Email).not_null())
                    .col(timestamp_with_time_zone(Student::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Student::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_student_email_lower ON student (LOWER(email))",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_created_at")
                    .table(Student::Table)
                    .col(Student::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Student::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Student {
    Table,
    Id,
    Name,
    Grade,
    Email,
    CreatedAt,
    UpdatedAt,
}
