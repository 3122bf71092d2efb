//! User model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// User model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(required(message = "User name is required"))]
    pub name: Option<String>,
    #[validate(
        required(message = "User email is required"),
        email(message = "Invalid email format")
    )]
    pub email: Option<String>,
}

/// Update user request; absent fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// A registration that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl TryFrom<CreateUser> for NewUser {
    type Error = AppError;

    fn try_from(request: CreateUser) -> AppResult<Self> {
        request.validate()?;

        let name = request.name.unwrap_or_default();
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("User name is required".to_string()));
        }

        Ok(NewUser {
            name,
            email: request.email.unwrap_or_default(),
        })
    }
}

impl UpdateUser {
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        if matches!(self.name.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(AppError::BadRequest("User name can't be blank".to_string()));
        }
        Ok(())
    }
}
