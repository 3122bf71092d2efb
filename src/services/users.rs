//! User directory service

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, NewUser, UpdateUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new user; the email must not be taken
    pub async fn create_user(&self, request: CreateUser) -> AppResult<User> {
        let user = NewUser::try_from(request)?;

        if self.repository.users.email_exists(&user.email, None).await? {
            tracing::warn!("Registration rejected: email {} already used", user.email);
            return Err(AppError::BadRequest("User with this email already exists".to_string()));
        }

        let created = self.repository.users.create(&user).await?;
        tracing::info!("Created user {}", created.id);
        Ok(created)
    }

    /// Update the present fields of a user
    pub async fn update_user(&self, id: i64, update: UpdateUser) -> AppResult<User> {
        update.check()?;
        self.repository.users.get_by_id(id).await?;

        if let Some(ref email) = update.email {
            if self.repository.users.email_exists(email, Some(id)).await? {
                tracing::warn!("Update of user {} rejected: email {} already used", id, email);
                return Err(AppError::BadRequest("User with this email already exists".to_string()));
            }
        }

        let updated = self.repository.users.update(id, &update).await?;
        tracing::info!("Updated user {}", id);
        Ok(updated)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        self.repository.users.delete(id).await?;
        tracing::info!("Deleted user {}", id);
        Ok(())
    }
}
