use crate::domain::{FavoriteResult, NewRestaurant, RestaurantView, UserId};
use crate::infrastructure::db::entities::restaurant;
use crate::infrastructure::db::{RestaurantFavoriteRepository, RestaurantRepository};
use crate::infrastructure::security::InputValidator;
use favameal_errors::{AppError, AppResult};
use sea_orm::DatabaseConnection;

pub struct RestaurantService {
    restaurants: RestaurantRepository,
    favorites: RestaurantFavoriteRepository,
}

impl RestaurantService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            restaurants: RestaurantRepository::new(db.clone()),
            favorites: RestaurantFavoriteRepository::new(db),
        }
    }

    pub async fn create(&self, input: NewRestaurant) -> AppResult<RestaurantView> {
        let name = InputValidator::restaurant_name(&input.name)?;
        let address = InputValidator::address(&input.address)?;

        let restaurant = self.restaurants.create(&name, &address).await?;
        tracing::info!(restaurant_id = restaurant.id, "Restaurant created");

        Ok(build_view(restaurant, false))
    }

    pub async fn retrieve(&self, id: i32, user: UserId) -> AppResult<RestaurantView> {
        let restaurant = self
            .restaurants
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Restaurant", id))?;
        let is_favorite = self.favorites.exists(user.0, id).await?;
        Ok(build_view(restaurant, is_favorite))
    }

    pub async fn list(&self, user: UserId) -> AppResult<Vec<RestaurantView>> {
        let restaurants = self.restaurants.find_all().await?;
        let favorites = self.favorites.restaurant_ids_for_user(user.0).await?;

        Ok(restaurants
            .into_iter()
            .map(|r| {
                let is_favorite = favorites.contains(&r.id);
                build_view(r, is_favorite)
            })
            .collect())
    }

    /// Removes the restaurant together with all of its meals.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.restaurants.delete(id).await? {
            return Err(AppError::not_found("Restaurant", id));
        }
        tracing::info!(restaurant_id = id, "Restaurant deleted");
        Ok(())
    }

    pub async fn favorite(&self, restaurant_id: i32, user: UserId) -> AppResult<FavoriteResult> {
        self.ensure_exists(restaurant_id).await?;
        let changed = self.favorites.add(user.0, restaurant_id).await?;
        tracing::debug!(restaurant_id, user_id = %user, changed, "Restaurant favorited");
        Ok(FavoriteResult {
            is_favorite: true,
            changed,
        })
    }

    pub async fn unfavorite(&self, restaurant_id: i32, user: UserId) -> AppResult<FavoriteResult> {
        self.ensure_exists(restaurant_id).await?;
        let changed = self.favorites.remove(user.0, restaurant_id).await?;
        tracing::debug!(restaurant_id, user_id = %user, changed, "Restaurant unfavorited");
        Ok(FavoriteResult {
            is_favorite: false,
            changed,
        })
    }

    async fn ensure_exists(&self, restaurant_id: i32) -> AppResult<()> {
        if self.restaurants.find_by_id(restaurant_id).await?.is_none() {
            return Err(AppError::not_found("Restaurant", restaurant_id));
        }
        Ok(())
    }
}

fn build_view(restaurant: restaurant::Model, is_favorite: bool) -> RestaurantView {
    RestaurantView {
        id: restaurant.id,
        name: restaurant.name,
        address: restaurant.address,
        is_favorite,
    }
}
