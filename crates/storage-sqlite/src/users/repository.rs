use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use nestegg_core::constants::DEFAULT_CURRENCY;
use nestegg_core::users::{NewUser, User, UserRepositoryTrait};
use nestegg_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;
use crate::utils::format_datetime;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let user_db = users::table
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(User::from(user_db))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user_db = users::table
            .filter(users::email.eq(email))
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(user_db.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let now = format_datetime(Utc::now().naive_utc());
                let user_db = UserDB {
                    id: new_user.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    name: new_user.name,
                    email: new_user.email,
                    password_hash: new_user.password_hash,
                    preferred_currency: DEFAULT_CURRENCY.to_string(),
                    created_at: now.clone(),
                    updated_at: now,
                };

                let result_db = diesel::insert_into(users::table)
                    .values(&user_db)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(User::from(result_db))
            })
            .await
    }

    async fn set_preferred_currency(&self, user_id: &str, currency: &str) -> Result<User> {
        let user_id = user_id.to_string();
        let currency = currency.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                diesel::update(users::table.find(&user_id))
                    .set((
                        users::preferred_currency.eq(&currency),
                        users::updated_at.eq(format_datetime(Utc::now().naive_utc())),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let updated = users::table
                    .find(&user_id)
                    .first::<UserDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(User::from(updated))
            })
            .await
    }

    async fn delete(&self, user_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // Investments and interest records go with the user (FK cascade).
                Ok(diesel::delete(users::table.find(&user_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
