use super::entities::{meal_favorite, restaurant_favorite, MealFavorite, RestaurantFavorite};
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, PaginatorTrait};
use std::collections::HashSet;

#[derive(Clone)]
pub struct MealFavoriteRepository {
    db: DatabaseConnection,
}

impl MealFavoriteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn exists(&self, user_id: i32, meal_id: i32) -> Result<bool, DbErr> {
        let row = MealFavorite::find_by_id((user_id, meal_id)).one(&self.db).await?;
        Ok(row.is_some())
    }

    /// Returns `true` if the row was inserted, `false` if it was already present.
    pub async fn add(&self, user_id: i32, meal_id: i32) -> Result<bool, DbErr> {
        let active = meal_favorite::ActiveModel {
            user_id: Set(user_id),
            meal_id: Set(meal_id),
            created_at: Set(Some(chrono::Utc::now())),
        };
        let inserted = MealFavorite::insert(active)
            .on_conflict(
                OnConflict::columns([meal_favorite::Column::UserId, meal_favorite::Column::MealId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(inserted > 0)
    }

    /// Returns `true` if a row was deleted.
    pub async fn remove(&self, user_id: i32, meal_id: i32) -> Result<bool, DbErr> {
        let result = MealFavorite::delete_by_id((user_id, meal_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn meal_ids_for_user(&self, user_id: i32) -> Result<HashSet<i32>, DbErr> {
        let ids: Vec<i32> = MealFavorite::find()
            .select_only()
            .column(meal_favorite::Column::MealId)
            .filter(meal_favorite::Column::UserId.eq(user_id))
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(ids.into_iter().collect())
    }

    pub async fn count_for_meal(&self, meal_id: i32) -> Result<u64, DbErr> {
        MealFavorite::find()
            .filter(meal_favorite::Column::MealId.eq(meal_id))
            .count(&self.db)
            .await
    }
}

#[derive(Clone)]
pub struct RestaurantFavoriteRepository {
    db: DatabaseConnection,
}

impl RestaurantFavoriteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn exists(&self, user_id: i32, restaurant_id: i32) -> Result<bool, DbErr> {
        let row = RestaurantFavorite::find_by_id((user_id, restaurant_id))
            .one(&self.db)
            .await?;
        Ok(row.is_some())
    }

    pub async fn add(&self, user_id: i32, restaurant_id: i32) -> Result<bool, DbErr> {
        let active = restaurant_favorite::ActiveModel {
            user_id: Set(user_id),
            restaurant_id: Set(restaurant_id),
            created_at: Set(Some(chrono::Utc::now())),
        };
        let inserted = RestaurantFavorite::insert(active)
            .on_conflict(
                OnConflict::columns([
                    restaurant_favorite::Column::UserId,
                    restaurant_favorite::Column::RestaurantId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(inserted > 0)
    }

    pub async fn remove(&self, user_id: i32, restaurant_id: i32) -> Result<bool, DbErr> {
        let result = RestaurantFavorite::delete_by_id((user_id, restaurant_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn restaurant_ids_for_user(&self, user_id: i32) -> Result<HashSet<i32>, DbErr> {
        let ids: Vec<i32> = RestaurantFavorite::find()
            .select_only()
            .column(restaurant_favorite::Column::RestaurantId)
            .filter(restaurant_favorite::Column::UserId.eq(user_id))
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(ids.into_iter().collect())
    }
}
