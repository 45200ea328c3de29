use crate::domain::{
    FavoriteResult, MealView, NewMeal, RateRequest, RatingStats, RestaurantSummary, UserId,
};
use crate::infrastructure::db::entities::{meal, restaurant};
use crate::infrastructure::db::{
    MealFavoriteRepository, MealRepository, RatingRepository, RestaurantRepository,
};
use crate::infrastructure::security::InputValidator;
use favameal_errors::{AppError, AppResult};
use sea_orm::DatabaseConnection;

pub struct MealService {
    meals: MealRepository,
    restaurants: RestaurantRepository,
    ratings: RatingRepository,
    favorites: MealFavoriteRepository,
}

impl MealService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            meals: MealRepository::new(db.clone()),
            restaurants: RestaurantRepository::new(db.clone()),
            ratings: RatingRepository::new(db.clone()),
            favorites: MealFavoriteRepository::new(db),
        }
    }

    pub async fn create(&self, input: NewMeal) -> AppResult<MealView> {
        let name = InputValidator::meal_name(&input.name)?;
        let restaurant = self
            .restaurants
            .find_by_id(input.restaurant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Restaurant", input.restaurant_id))?;

        let meal = self.meals.create(&name, restaurant.id).await?;
        tracing::info!(meal_id = meal.id, restaurant_id = restaurant.id, "Meal created");

        Ok(build_view(meal, restaurant, None, RatingStats::default(), false))
    }

    pub async fn retrieve(&self, id: i32, user: UserId) -> AppResult<MealView> {
        let (meal, restaurant) = self
            .meals
            .find_with_restaurant(id)
            .await?
            .ok_or_else(|| AppError::not_found("Meal", id))?;

        let user_rating = self.ratings.find(user.0, id).await?.map(|r| r.rating);
        let stats = self.ratings.stats_for_meal(id).await?;
        let is_favorite = self.favorites.exists(user.0, id).await?;

        Ok(build_view(meal, restaurant, user_rating, stats, is_favorite))
    }

    /// Every meal annotated for `user`.
    ///
    /// Issues a fixed number of queries regardless of how many meals exist:
    /// the user's own ratings and favorites are loaded once and the averages
    /// come from one grouped aggregate.
    pub async fn list(&self, user: UserId) -> AppResult<Vec<MealView>> {
        let rows = self.meals.find_all_with_restaurant().await?;
        let user_ratings = self.ratings.ratings_by_user(user.0).await?;
        let stats = self.ratings.stats_by_meal().await?;
        let favorites = self.favorites.meal_ids_for_user(user.0).await?;

        Ok(rows
            .into_iter()
            .map(|(meal, restaurant)| {
                let id = meal.id;
                build_view(
                    meal,
                    restaurant,
                    user_ratings.get(&id).copied(),
                    stats.get(&id).copied().unwrap_or_default(),
                    favorites.contains(&id),
                )
            })
            .collect())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.meals.delete(id).await? {
            return Err(AppError::not_found("Meal", id));
        }
        tracing::info!(meal_id = id, "Meal deleted");
        Ok(())
    }

    pub async fn rate(&self, meal_id: i32, user: UserId, request: RateRequest) -> AppResult<()> {
        self.ensure_exists(meal_id).await?;

        match request {
            RateRequest::Create(value) => {
                let value = InputValidator::rating(value)?;
                if !self.ratings.create(user.0, meal_id, value).await? {
                    return Err(AppError::Conflict(
                        "You have already rated this meal".to_string(),
                    ));
                }
                tracing::info!(meal_id, user_id = %user, rating = value, "Meal rated");
            }
            RateRequest::Update(value) => {
                let value = InputValidator::rating(value)?;
                if self.ratings.update(user.0, meal_id, value).await?.is_none() {
                    return Err(AppError::NotFound(
                        "You have not rated this meal yet".to_string(),
                    ));
                }
                tracing::info!(meal_id, user_id = %user, rating = value, "Meal rating updated");
            }
            RateRequest::Delete => {
                if !self.ratings.delete(user.0, meal_id).await? {
                    return Err(AppError::NotFound(
                        "You have not rated this meal yet".to_string(),
                    ));
                }
                tracing::info!(meal_id, user_id = %user, "Meal rating deleted");
            }
        }

        Ok(())
    }

    pub async fn favorite(&self, meal_id: i32, user: UserId) -> AppResult<FavoriteResult> {
        self.ensure_exists(meal_id).await?;
        let changed = self.favorites.add(user.0, meal_id).await?;
        tracing::debug!(meal_id, user_id = %user, changed, "Meal favorited");
        Ok(FavoriteResult {
            is_favorite: true,
            changed,
        })
    }

    pub async fn unfavorite(&self, meal_id: i32, user: UserId) -> AppResult<FavoriteResult> {
        self.ensure_exists(meal_id).await?;
        let changed = self.favorites.remove(user.0, meal_id).await?;
        tracing::debug!(meal_id, user_id = %user, changed, "Meal unfavorited");
        Ok(FavoriteResult {
            is_favorite: false,
            changed,
        })
    }

    async fn ensure_exists(&self, meal_id: i32) -> AppResult<()> {
        if !self.meals.exists(meal_id).await? {
            return Err(AppError::not_found("Meal", meal_id));
        }
        Ok(())
    }
}

fn build_view(
    meal: meal::Model,
    restaurant: restaurant::Model,
    user_rating: Option<i32>,
    stats: RatingStats,
    is_favorite: bool,
) -> MealView {
    MealView {
        id: meal.id,
        name: meal.name,
        restaurant: RestaurantSummary {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
        },
        user_rating,
        avg_rating: stats.average(),
        is_favorite,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::test_utils::{
        create_test_user, setup_file_test_db, setup_test_db,
    };
    use std::sync::Arc;

    async fn setup() -> (MealService, DatabaseConnection, i32) {
        let db = setup_test_db().await;
        let restaurant = RestaurantRepository::new(db.clone())
            .create("Biscuit Love", "316 11th Ave S")
            .await
            .unwrap();
        (MealService::new(db.clone()), db, restaurant.id)
    }

    async fn new_meal(service: &MealService, restaurant_id: i32, name: &str) -> i32 {
        service
            .create(NewMeal {
                name: name.to_string(),
                restaurant_id,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_requires_restaurant() {
        let (service, _db, _) = setup().await;
        let result = service
            .create(NewMeal {
                name: "Bonuts".to_string(),
                restaurant_id: 999,
            })
            .await;
        assert_eq!(result, Err(AppError::not_found("Restaurant", 999)));
    }

    #[tokio::test]
    async fn test_created_meal_has_empty_derived_fields() {
        let (service, _db, restaurant_id) = setup().await;
        let view = service
            .create(NewMeal {
                name: "East Nasty".to_string(),
                restaurant_id,
            })
            .await
            .unwrap();

        assert_eq!(view.name, "East Nasty");
        assert_eq!(view.restaurant.id, restaurant_id);
        assert_eq!(view.user_rating, None);
        assert_eq!(view.avg_rating, None);
        assert!(!view.is_favorite);
    }

    #[tokio::test]
    async fn test_retrieve_missing_meal() {
        let (service, db, _) = setup().await;
        let user = UserId(create_test_user(&db, "alice").await);
        assert_eq!(
            service.retrieve(42, user).await,
            Err(AppError::not_found("Meal", 42))
        );
    }

    #[tokio::test]
    async fn test_rate_then_retrieve_shows_user_rating() {
        let (service, db, restaurant_id) = setup().await;
        let user = UserId(create_test_user(&db, "alice").await);
        let meal = new_meal(&service, restaurant_id, "Bonuts").await;

        service.rate(meal, user, RateRequest::Create(3)).await.unwrap();

        let view = service.retrieve(meal, user).await.unwrap();
        assert_eq!(view.user_rating, Some(3));
        assert_eq!(view.avg_rating, Some(3.0));
    }

    #[tokio::test]
    async fn test_duplicate_rate_is_conflict() {
        let (service, db, restaurant_id) = setup().await;
        let user = UserId(create_test_user(&db, "alice").await);
        let meal = new_meal(&service, restaurant_id, "Bonuts").await;

        service.rate(meal, user, RateRequest::Create(3)).await.unwrap();
        let second = service.rate(meal, user, RateRequest::Create(4)).await;

        assert!(matches!(second, Err(AppError::Conflict(_))));
        let ratings = RatingRepository::new(db);
        assert_eq!(ratings.count_for_meal(meal).await.unwrap(), 1);
        assert_eq!(ratings.find(user.0, meal).await.unwrap().unwrap().rating, 3);
    }

    #[tokio::test]
    async fn test_put_updates_in_place() {
        let (service, db, restaurant_id) = setup().await;
        let user = UserId(create_test_user(&db, "alice").await);
        let meal = new_meal(&service, restaurant_id, "Bonuts").await;

        assert!(matches!(
            service.rate(meal, user, RateRequest::Update(5)).await,
            Err(AppError::NotFound(_))
        ));

        service.rate(meal, user, RateRequest::Create(3)).await.unwrap();
        service.rate(meal, user, RateRequest::Update(5)).await.unwrap();

        assert_eq!(service.retrieve(meal, user).await.unwrap().user_rating, Some(5));
        assert_eq!(
            RatingRepository::new(db).count_for_meal(meal).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_delete_rating() {
        let (service, db, restaurant_id) = setup().await;
        let user = UserId(create_test_user(&db, "alice").await);
        let meal = new_meal(&service, restaurant_id, "Bonuts").await;

        assert!(matches!(
            service.rate(meal, user, RateRequest::Delete).await,
            Err(AppError::NotFound(_))
        ));
        service.rate(meal, user, RateRequest::Create(2)).await.unwrap();
        service.rate(meal, user, RateRequest::Delete).await.unwrap();

        let view = service.retrieve(meal, user).await.unwrap();
        assert_eq!(view.user_rating, None);
        assert_eq!(view.avg_rating, None);
    }

    #[tokio::test]
    async fn test_rate_validates_value_and_meal() {
        let (service, db, restaurant_id) = setup().await;
        let user = UserId(create_test_user(&db, "alice").await);
        let meal = new_meal(&service, restaurant_id, "Bonuts").await;

        assert!(matches!(
            service.rate(meal, user, RateRequest::Create(9)).await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(
            service.rate(404, user, RateRequest::Create(3)).await,
            Err(AppError::not_found("Meal", 404))
        );
    }

    #[tokio::test]
    async fn test_average_across_users() {
        let (service, db, restaurant_id) = setup().await;
        let alice = UserId(create_test_user(&db, "alice").await);
        let bob = UserId(create_test_user(&db, "bob").await);
        let carol = UserId(create_test_user(&db, "carol").await);
        let meal = new_meal(&service, restaurant_id, "Bonuts").await;

        service.rate(meal, alice, RateRequest::Create(5)).await.unwrap();
        service.rate(meal, bob, RateRequest::Create(2)).await.unwrap();

        let as_carol = service.retrieve(meal, carol).await.unwrap();
        assert_eq!(as_carol.user_rating, None);
        assert_eq!(as_carol.avg_rating, Some(3.5));
    }

    #[tokio::test]
    async fn test_favorite_round_trip_is_idempotent() {
        let (service, db, restaurant_id) = setup().await;
        let user = UserId(create_test_user(&db, "alice").await);
        let meal = new_meal(&service, restaurant_id, "Bonuts").await;

        assert!(service.favorite(meal, user).await.unwrap().changed);
        assert!(!service.favorite(meal, user).await.unwrap().changed);
        assert!(service.retrieve(meal, user).await.unwrap().is_favorite);

        assert!(service.unfavorite(meal, user).await.unwrap().changed);
        assert!(!service.unfavorite(meal, user).await.unwrap().changed);
        assert!(!service.retrieve(meal, user).await.unwrap().is_favorite);
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_user() {
        let (service, db, restaurant_id) = setup().await;
        let alice = UserId(create_test_user(&db, "alice").await);
        let bob = UserId(create_test_user(&db, "bob").await);
        let first = new_meal(&service, restaurant_id, "Bonuts").await;
        let second = new_meal(&service, restaurant_id, "Biscuit Sandwich").await;

        service.rate(first, alice, RateRequest::Create(4)).await.unwrap();
        service.favorite(second, alice).await.unwrap();
        service.rate(first, bob, RateRequest::Create(2)).await.unwrap();

        let alices = service.list(alice).await.unwrap();
        assert_eq!(alices.len(), 2);
        assert_eq!(alices[0].id, first);
        assert_eq!(alices[0].user_rating, Some(4));
        assert_eq!(alices[0].avg_rating, Some(3.0));
        assert!(!alices[0].is_favorite);
        assert_eq!(alices[1].user_rating, None);
        assert_eq!(alices[1].avg_rating, None);
        assert!(alices[1].is_favorite);

        let bobs = service.list(bob).await.unwrap();
        assert_eq!(bobs[0].user_rating, Some(2));
        assert_eq!(bobs[0].avg_rating, Some(3.0));
        assert!(!bobs[1].is_favorite);
    }

    #[tokio::test]
    async fn test_delete_meal() {
        let (service, db, restaurant_id) = setup().await;
        let user = UserId(create_test_user(&db, "alice").await);
        let meal = new_meal(&service, restaurant_id, "Bonuts").await;
        service.rate(meal, user, RateRequest::Create(3)).await.unwrap();

        service.delete(meal).await.unwrap();

        assert_eq!(service.delete(meal).await, Err(AppError::not_found("Meal", meal)));
        assert_eq!(
            RatingRepository::new(db).count_for_meal(meal).await.unwrap(),
            0
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_rate_posts_admit_exactly_one() {
        let temp = setup_file_test_db(8).await;
        let restaurant = RestaurantRepository::new(temp.db.clone())
            .create("Biscuit Love", "316 11th Ave S")
            .await
            .unwrap();
        let service = Arc::new(MealService::new(temp.db.clone()));
        let user = UserId(create_test_user(&temp.db, "alice").await);
        let meal = new_meal(&service, restaurant.id, "Bonuts").await;

        let tasks: Vec<_> = (1..=16)
            .map(|i| {
                let service = Arc::clone(&service);
                let rating = i % 5 + 1;
                tokio::spawn(async move {
                    service
                        .rate(meal, user, RateRequest::Create(rating))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        let mut conflicts = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(()) => created += 1,
                Err(AppError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(
            RatingRepository::new(temp.db.clone())
                .count_for_meal(meal)
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_favorites_converge_to_one_row() {
        let temp = setup_file_test_db(8).await;
        let restaurant = RestaurantRepository::new(temp.db.clone())
            .create("Biscuit Love", "316 11th Ave S")
            .await
            .unwrap();
        let service = Arc::new(MealService::new(temp.db.clone()));
        let user = UserId(create_test_user(&temp.db, "alice").await);
        let meal = new_meal(&service, restaurant.id, "Bonuts").await;

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.favorite(meal, user).await })
            })
            .collect();

        let mut changed = 0;
        for task in tasks {
            if task.await.unwrap().unwrap().changed {
                changed += 1;
            }
        }
        assert_eq!(changed, 1);
        assert_eq!(
            MealFavoriteRepository::new(temp.db.clone())
                .count_for_meal(meal)
                .await
                .unwrap(),
            1
        );
    }
}
