//! Widen `student.email` to unbounded `text`.
//!
//! Tables created by the first migration before it switched to `text` carried
//! a `varchar(320)` column; valid addresses are not length-limited.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Student::Table)
                    .modify_column(ColumnDef::new(Student::Email).text().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // narrowing could truncate stored addresses
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Student {
    Table,
    Email,
}
