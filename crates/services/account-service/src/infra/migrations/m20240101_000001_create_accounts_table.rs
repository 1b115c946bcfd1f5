//! Migration: create the accounts table.
//!
//! The unique indexes on `username` and `email` are what ultimately rejects
//! concurrent registrations of the same identity.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(accounts_table())
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await
    }
}

/// Email is unbounded text: only presence is required of it.
fn accounts_table() -> TableCreateStatement {
    Table::create()
        .table(Accounts::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Accounts::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Accounts::Username)
                .string_len(50)
                .not_null()
                .unique_key(),
        )
        .col(
            ColumnDef::new(Accounts::Email)
                .text()
                .not_null()
                .unique_key(),
        )
        .col(ColumnDef::new(Accounts::PasswordHash).string().not_null())
        .col(
            ColumnDef::new(Accounts::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Accounts::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_bounds_match_validation() {
        let sql = accounts_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#""username" varchar(50) NOT NULL UNIQUE"#), "{}", sql);
        assert!(sql.contains(r#""email" text NOT NULL UNIQUE"#), "{}", sql);
    }
}
