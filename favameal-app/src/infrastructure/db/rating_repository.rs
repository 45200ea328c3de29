use super::entities::{meal_rating, MealRating};
use crate::domain::RatingStats;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, PaginatorTrait};
use std::collections::HashMap;

#[derive(Clone)]
pub struct RatingRepository {
    db: DatabaseConnection,
}

impl RatingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(
        &self,
        user_id: i32,
        meal_id: i32,
    ) -> Result<Option<meal_rating::Model>, DbErr> {
        MealRating::find_by_id((user_id, meal_id)).one(&self.db).await
    }

    /// Inserts a rating unless one already exists for the pair.
    ///
    /// Returns `false` when the row was already there. The check and the
    /// insert are a single statement, so two racing inserts cannot both win.
    pub async fn create(&self, user_id: i32, meal_id: i32, rating: i32) -> Result<bool, DbErr> {
        let now = chrono::Utc::now();
        let active = meal_rating::ActiveModel {
            user_id: Set(user_id),
            meal_id: Set(meal_id),
            rating: Set(rating),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };

        let inserted = MealRating::insert(active)
            .on_conflict(
                OnConflict::columns([meal_rating::Column::UserId, meal_rating::Column::MealId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(inserted > 0)
    }

    /// Overwrites an existing rating; `None` if the user never rated the meal.
    pub async fn update(
        &self,
        user_id: i32,
        meal_id: i32,
        rating: i32,
    ) -> Result<Option<meal_rating::Model>, DbErr> {
        let Some(existing) = self.find(user_id, meal_id).await? else {
            return Ok(None);
        };

        let mut active: meal_rating::ActiveModel = existing.into();
        active.rating = Set(rating);
        active.updated_at = Set(Some(chrono::Utc::now()));
        active.update(&self.db).await.map(Some)
    }

    pub async fn delete(&self, user_id: i32, meal_id: i32) -> Result<bool, DbErr> {
        let result = MealRating::delete_by_id((user_id, meal_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count_for_meal(&self, meal_id: i32) -> Result<u64, DbErr> {
        MealRating::find()
            .filter(meal_rating::Column::MealId.eq(meal_id))
            .count(&self.db)
            .await
    }

    /// Sum and count of every rating for one meal.
    pub async fn stats_for_meal(&self, meal_id: i32) -> Result<RatingStats, DbErr> {
        let row: Option<(Option<i64>, i64)> = MealRating::find()
            .select_only()
            .column_as(Expr::col(meal_rating::Column::Rating).sum(), "total")
            .column_as(Expr::col(meal_rating::Column::Rating).count(), "count")
            .filter(meal_rating::Column::MealId.eq(meal_id))
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(match row {
            Some((total, count)) => RatingStats::new(total.unwrap_or(0), count),
            None => RatingStats::default(),
        })
    }

    /// Sum and count per meal, for every meal that has at least one rating.
    pub async fn stats_by_meal(&self) -> Result<HashMap<i32, RatingStats>, DbErr> {
        let rows: Vec<(i32, i64, i64)> = MealRating::find()
            .select_only()
            .column(meal_rating::Column::MealId)
            .column_as(Expr::col(meal_rating::Column::Rating).sum(), "total")
            .column_as(Expr::col(meal_rating::Column::Rating).count(), "count")
            .group_by(meal_rating::Column::MealId)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(meal_id, total, count)| (meal_id, RatingStats::new(total, count)))
            .collect())
    }

    /// The given user's rating of each meal they rated, keyed by meal id.
    pub async fn ratings_by_user(&self, user_id: i32) -> Result<HashMap<i32, i32>, DbErr> {
        let rows = MealRating::find()
            .filter(meal_rating::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|r| (r.meal_id, r.rating)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::test_utils::{create_test_user, setup_test_db};
    use crate::infrastructure::db::{MealRepository, RestaurantRepository};

    async fn seed_meal(db: &DatabaseConnection) -> i32 {
        let restaurant = RestaurantRepository::new(db.clone())
            .create("Hattie B's", "112 19th Ave S")
            .await
            .unwrap();
        MealRepository::new(db.clone())
            .create("Hot Chicken", restaurant.id)
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_rejects_second_rating_for_same_pair() {
        let db = setup_test_db().await;
        let user = create_test_user(&db, "alice").await;
        let meal = seed_meal(&db).await;
        let repo = RatingRepository::new(db);

        assert!(repo.create(user, meal, 3).await.unwrap());
        assert!(!repo.create(user, meal, 5).await.unwrap());

        assert_eq!(repo.count_for_meal(meal).await.unwrap(), 1);
        assert_eq!(repo.find(user, meal).await.unwrap().unwrap().rating, 3);
    }

    #[tokio::test]
    async fn test_update_requires_existing_rating() {
        let db = setup_test_db().await;
        let user = create_test_user(&db, "alice").await;
        let meal = seed_meal(&db).await;
        let repo = RatingRepository::new(db);

        assert!(repo.update(user, meal, 4).await.unwrap().is_none());

        repo.create(user, meal, 2).await.unwrap();
        let updated = repo.update(user, meal, 4).await.unwrap().unwrap();
        assert_eq!(updated.rating, 4);
        assert_eq!(repo.count_for_meal(meal).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_stats_for_meal() {
        let db = setup_test_db().await;
        let alice = create_test_user(&db, "alice").await;
        let bob = create_test_user(&db, "bob").await;
        let meal = seed_meal(&db).await;
        let repo = RatingRepository::new(db);

        assert_eq!(repo.stats_for_meal(meal).await.unwrap(), RatingStats::default());

        repo.create(alice, meal, 4).await.unwrap();
        repo.create(bob, meal, 1).await.unwrap();

        let stats = repo.stats_for_meal(meal).await.unwrap();
        assert_eq!(stats, RatingStats::new(5, 2));
        assert_eq!(stats.average(), Some(2.5));
    }

    #[tokio::test]
    async fn test_stats_by_meal_and_ratings_by_user() {
        let db = setup_test_db().await;
        let alice = create_test_user(&db, "alice").await;
        let bob = create_test_user(&db, "bob").await;
        let first = seed_meal(&db).await;
        let second = seed_meal(&db).await;
        let repo = RatingRepository::new(db);

        repo.create(alice, first, 5).await.unwrap();
        repo.create(bob, first, 3).await.unwrap();
        repo.create(bob, second, 2).await.unwrap();

        let stats = repo.stats_by_meal().await.unwrap();
        assert_eq!(stats[&first], RatingStats::new(8, 2));
        assert_eq!(stats[&second], RatingStats::new(2, 1));

        let alices = repo.ratings_by_user(alice).await.unwrap();
        assert_eq!(alices.len(), 1);
        assert_eq!(alices[&first], 5);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = setup_test_db().await;
        let user = create_test_user(&db, "alice").await;
        let meal = seed_meal(&db).await;
        let repo = RatingRepository::new(db);

        assert!(!repo.delete(user, meal).await.unwrap());
        repo.create(user, meal, 3).await.unwrap();
        assert!(repo.delete(user, meal).await.unwrap());
        assert!(repo.find(user, meal).await.unwrap().is_none());
    }
}
