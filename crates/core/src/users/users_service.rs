use std::sync::Arc;

use log::debug;

use super::users_model::{NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{DatabaseError, Error, Result, ValidationError};

/// Service for managing user accounts.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repository.find_by_email(email)
    }

    async fn register(&self, new_user: NewUser) -> Result<User> {
        if new_user.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        let email = new_user.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(ValidationError::MissingField("email".to_string()).into());
        }
        if !email.contains('@') {
            return Err(
                ValidationError::InvalidInput(format!("'{email}' is not an email address")).into(),
            );
        }
        if self.repository.find_by_email(&email)?.is_some() {
            return Err(ValidationError::InvalidInput(
                "a user with this email already exists".to_string(),
            )
            .into());
        }

        debug!("Registering user {email}");
        let result = self
            .repository
            .create(NewUser {
                email,
                ..new_user
            })
            .await;
        // The unique index on email backstops concurrent registrations.
        match result {
            Err(Error::Database(DatabaseError::UniqueViolation(_))) => {
                Err(ValidationError::InvalidInput(
                    "a user with this email already exists".to_string(),
                )
                .into())
            }
            other => other,
        }
    }

    async fn set_preferred_currency(&self, user_id: &str, currency: &str) -> Result<User> {
        let currency = currency.trim().to_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidInput(format!(
                "'{currency}' is not a three-letter currency code"
            ))
            .into());
        }
        self.repository
            .set_preferred_currency(user_id, &currency)
            .await
    }

    async fn delete_user(&self, user_id: &str) -> Result<usize> {
        debug!("Deleting user {user_id} and their investments");
        self.repository.delete(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    struct MockUserRepository {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserRepositoryTrait for MockUserRepository {
        fn get_by_id(&self, user_id: &str) -> Result<User> {
            self.users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == user_id)
                .cloned()
                .ok_or_else(|| DatabaseError::NotFound(user_id.to_string()).into())
        }

        fn find_by_email(&self, email: &str) -> Result<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn create(&self, new_user: NewUser) -> Result<User> {
            let now = Utc::now().naive_utc();
            let user = User {
                id: new_user.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                name: new_user.name,
                email: new_user.email,
                password_hash: new_user.password_hash,
                preferred_currency: crate::constants::DEFAULT_CURRENCY.to_string(),
                created_at: now,
                updated_at: now,
            };
            self.users.lock().unwrap().push(user.clone());
            Ok(user)
        }

        async fn set_preferred_currency(&self, user_id: &str, currency: &str) -> Result<User> {
            let mut users = self.users.lock().unwrap();
            let user = users
                .iter_mut()
                .find(|u| u.id == user_id)
                .ok_or_else(|| Error::from(DatabaseError::NotFound(user_id.to_string())))?;
            user.preferred_currency = currency.to_string();
            Ok(user.clone())
        }

        async fn delete(&self, user_id: &str) -> Result<usize> {
            let mut users = self.users.lock().unwrap();
            let before = users.len();
            users.retain(|u| u.id != user_id);
            Ok(before - users.len())
        }
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            id: None,
            name: "Ada".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[tokio::test]
    async fn register_normalizes_and_defaults() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));
        let user = service.register(new_user("Ada@Example.COM")).await.unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.preferred_currency, "USD");
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));
        service.register(new_user("ada@example.com")).await.unwrap();
        assert!(matches!(
            service.register(new_user("ADA@example.com")).await,
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn register_rejects_malformed_input() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));
        assert!(matches!(
            service.register(new_user("not-an-email")).await,
            Err(Error::Validation(_))
        ));
        let mut nameless = new_user("ada@example.com");
        nameless.name = "".to_string();
        assert!(matches!(
            service.register(nameless).await,
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn currency_codes_are_validated_and_uppercased() {
        let service = UserService::new(Arc::new(MockUserRepository::default()));
        let user = service.register(new_user("ada@example.com")).await.unwrap();

        let updated = service
            .set_preferred_currency(&user.id, "eur")
            .await
            .unwrap();
        assert_eq!(updated.preferred_currency, "EUR");

        assert!(matches!(
            service.set_preferred_currency(&user.id, "EURO").await,
            Err(Error::Validation(_))
        ));
    }
}
