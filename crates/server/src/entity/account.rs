//! Account entity - a user record with identity and permission capabilities.
//!
//! Every row carries the common base columns: a 32 character hex id generated on
//! creation, `created_at`/`updated_at` timestamps and a soft-delete flag.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Something with a stable identifier.
pub trait HasIdentity {
    fn identity(&self) -> &str;
}

/// Something that can be asked whether it holds a permission.
pub trait HasPermission {
    fn has_permission(&self, permission: &str) -> bool;
}

/// Role assigned to accounts that do not specify one.
pub const DEFAULT_ROLE: &str = "user";

/// Generate a primary key: a UUID v4 rendered as 32 lowercase hex digits.
pub fn generate_uid() -> String {
    Uuid::new_v4().simple().to_string()
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub role: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Set(generate_uid()),
            role: Set(DEFAULT_ROLE.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            is_deleted: Set(false),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(OffsetDateTime::now_utc());
        }
        Ok(self)
    }
}

impl HasIdentity for Model {
    fn identity(&self) -> &str {
        &self.id
    }
}

impl HasPermission for Model {
    /// Permission checks are not implemented yet; every permission is denied.
    fn has_permission(&self, permission: &str) -> bool {
        tracing::trace!(account = %self.id, permission, "permission check denied");
        false
    }
}
