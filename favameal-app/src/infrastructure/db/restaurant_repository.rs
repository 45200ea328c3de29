use super::entities::{restaurant, Restaurant};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};

#[derive(Clone)]
pub struct RestaurantRepository {
    db: DatabaseConnection,
}

impl RestaurantRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: &str, address: &str) -> Result<restaurant::Model, DbErr> {
        let active = restaurant::ActiveModel {
            name: Set(name.to_string()),
            address: Set(address.to_string()),
            created_at: Set(Some(chrono::Utc::now())),
            ..Default::default()
        };
        active.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<restaurant::Model>, DbErr> {
        Restaurant::find_by_id(id).one(&self.db).await
    }

    pub async fn find_all(&self) -> Result<Vec<restaurant::Model>, DbErr> {
        Restaurant::find()
            .order_by_asc(restaurant::Column::Id)
            .all(&self.db)
            .await
    }

    /// Deletes the restaurant; the schema cascades to its meals and their ratings/favorites.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = Restaurant::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
