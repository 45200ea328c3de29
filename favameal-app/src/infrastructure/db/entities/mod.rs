pub mod meal;
pub mod meal_favorite;
pub mod meal_rating;
pub mod restaurant;
pub mod restaurant_favorite;
pub mod user;

pub use meal::Entity as Meal;
pub use meal_favorite::Entity as MealFavorite;
pub use meal_rating::Entity as MealRating;
pub use restaurant::Entity as Restaurant;
pub use restaurant_favorite::Entity as RestaurantFavorite;
pub use user::Entity as User;
