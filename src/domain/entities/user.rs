use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A visitor known to this system, keyed to the identity provider by
/// `clerk_id`. Created on first profile save; name/email are refreshed from
/// the provider on every save.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub clerk_id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Provider-derived fields folded into a user upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpsert {
    pub clerk_id: String,
    pub name: String,
    pub email: String,
}
