use super::entities::{meal, restaurant, Meal, Restaurant};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, PaginatorTrait};

#[derive(Clone)]
pub struct MealRepository {
    db: DatabaseConnection,
}

impl MealRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: &str, restaurant_id: i32) -> Result<meal::Model, DbErr> {
        let active = meal::ActiveModel {
            name: Set(name.to_string()),
            restaurant_id: Set(restaurant_id),
            created_at: Set(Some(chrono::Utc::now())),
            ..Default::default()
        };
        active.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<meal::Model>, DbErr> {
        Meal::find_by_id(id).one(&self.db).await
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    pub async fn find_with_restaurant(
        &self,
        id: i32,
    ) -> Result<Option<(meal::Model, restaurant::Model)>, DbErr> {
        let row = Meal::find_by_id(id)
            .find_also_related(Restaurant)
            .one(&self.db)
            .await?;

        // The foreign key guarantees the restaurant, but a missing one reads as a missing meal.
        Ok(row.and_then(|(m, r)| r.map(|r| (m, r))))
    }

    pub async fn find_all_with_restaurant(
        &self,
    ) -> Result<Vec<(meal::Model, restaurant::Model)>, DbErr> {
        let rows = Meal::find()
            .find_also_related(Restaurant)
            .order_by_asc(meal::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(m, r)| r.map(|r| (m, r)))
            .collect())
    }

    pub async fn count_by_restaurant(&self, restaurant_id: i32) -> Result<u64, DbErr> {
        Meal::find()
            .filter(meal::Column::RestaurantId.eq(restaurant_id))
            .count(&self.db)
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = Meal::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
