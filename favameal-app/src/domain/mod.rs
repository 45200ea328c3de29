mod favorite;
mod meal;
mod rating;
mod restaurant;
mod user;

pub use favorite::FavoriteResult;
pub use meal::{MealView, NewMeal};
pub use rating::{RateRequest, RatingStats};
pub use restaurant::{NewRestaurant, RestaurantSummary, RestaurantView};
pub use user::{RegisteredUser, UserId};
