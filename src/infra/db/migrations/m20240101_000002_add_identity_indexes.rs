//! Migration: Uniqueness of email and of verified usernames.
//!
//! Email is unique across all rows because an unverified account is
//! overwritten in place instead of duplicated. Usernames only clash once
//! verified, which needs a partial index (raw SQL, Postgres only).

use sea_orm_migration::prelude::*;

pub const EMAIL_INDEX: &str = "idx_users_email";
pub const VERIFIED_USERNAME_INDEX: &str = "idx_users_username_verified";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name(EMAIL_INDEX)
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(&format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {} ON users (username) WHERE is_verified",
                VERIFIED_USERNAME_INDEX
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(VERIFIED_USERNAME_INDEX)
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(EMAIL_INDEX)
                    .table(Users::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Email,
}
