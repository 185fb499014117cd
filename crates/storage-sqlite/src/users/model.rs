//! Database models for users.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use nestegg_core::users::User;

use crate::utils::parse_datetime_tolerant;

/// Database model for users.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct UserDB {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub preferred_currency: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            email: db.email,
            password_hash: db.password_hash,
            preferred_currency: db.preferred_currency,
            created_at: parse_datetime_tolerant(&db.created_at, "users.created_at"),
            updated_at: parse_datetime_tolerant(&db.updated_at, "users.updated_at"),
        }
    }
}
