use crate::domain::{RegisteredUser, UserId};
use crate::infrastructure::db::UserRepository;
use crate::infrastructure::security::InputValidator;
use favameal_errors::{AppError, AppResult};
use sea_orm::DatabaseConnection;

/// Provisions users and maps request tokens back to them.
pub struct UserService {
    users: UserRepository,
}

impl UserService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: UserRepository::new(db),
        }
    }

    pub async fn register(&self, username: &str) -> AppResult<RegisteredUser> {
        let username = InputValidator::username(username)?;
        if self.users.find_by_username(&username).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "A user named {username} already exists"
            )));
        }

        let token = uuid::Uuid::new_v4().simple().to_string();
        let user = self.users.create(&username, &token).await?;
        tracing::info!(user_id = user.id, "User registered");

        Ok(RegisteredUser {
            id: user.id,
            username: user.username,
            token,
        })
    }

    pub async fn resolve_token(&self, token: &str) -> AppResult<UserId> {
        self.users
            .find_by_token(token)
            .await?
            .map(|u| UserId(u.id))
            .ok_or(AppError::Unauthorized)
    }
}
