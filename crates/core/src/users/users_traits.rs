use async_trait::async_trait;

use crate::errors::Result;
use crate::users::users_model::{NewUser, User};

/// Trait for user repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str) -> Result<User>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn create(&self, new_user: NewUser) -> Result<User>;
    async fn set_preferred_currency(&self, user_id: &str, currency: &str) -> Result<User>;
    /// Deleting a user cascades to their investments and interest records.
    async fn delete(&self, user_id: &str) -> Result<usize>;
}

/// Trait for user service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn register(&self, new_user: NewUser) -> Result<User>;
    async fn set_preferred_currency(&self, user_id: &str, currency: &str) -> Result<User>;
    async fn delete_user(&self, user_id: &str) -> Result<usize>;
}
