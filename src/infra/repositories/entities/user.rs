//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Message, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub verify_code: String,
    pub verify_code_expiry: DateTimeUtc,
    pub is_verified: bool,
    pub is_accepting_messages: bool,
    /// Messages as a JSON array of `{content, created_at}`
    #[sea_orm(column_type = "JsonBinary")]
    pub messages: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        let messages: Vec<Message> = serde_json::from_value(model.messages).unwrap_or_else(|e| {
            tracing::warn!(user_id = %model.id, "Unreadable messages column: {}", e);
            Vec::new()
        });

        User {
            id: model.id,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            verify_code: model.verify_code,
            verify_code_expiry: model.verify_code_expiry,
            is_verified: model.is_verified,
            is_accepting_messages: model.is_accepting_messages,
            messages,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
