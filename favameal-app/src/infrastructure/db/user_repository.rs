use super::entities::{user, User};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};

#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::Token.eq(token))
            .one(&self.db)
            .await
    }

    pub async fn create(&self, username: &str, token: &str) -> Result<user::Model, DbErr> {
        let active = user::ActiveModel {
            username: Set(username.to_string()),
            token: Set(token.to_string()),
            created_at: Set(Some(chrono::Utc::now())),
            ..Default::default()
        };
        active.insert(&self.db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::test_utils::{create_test_user, setup_test_db};
    use crate::infrastructure::db::RatingRepository;
    use favameal_errors::AppError;

    #[tokio::test]
    async fn test_unique_violation_hides_driver_text() {
        let db = setup_test_db().await;
        let repo = UserRepository::new(db);
        repo.create("alice", "token-1").await.unwrap();

        let err = AppError::from(repo.create("alice", "token-2").await.unwrap_err());
        assert_eq!(err, AppError::Conflict("This record already exists".to_string()));
        assert!(!err.user_message().contains("UNIQUE"));
        assert!(!err.user_message().contains("users"));
    }

    #[tokio::test]
    async fn test_foreign_key_violation_hides_driver_text() {
        let db = setup_test_db().await;
        let user = create_test_user(&db, "alice").await;

        let err = RatingRepository::new(db)
            .create(user, 404, 3)
            .await
            .map_err(AppError::from)
            .unwrap_err();
        assert_eq!(
            err,
            AppError::NotFound("A referenced record does not exist".to_string())
        );
        assert!(!err.user_message().contains("FOREIGN KEY"));
    }
}
