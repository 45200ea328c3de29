mod meals;
mod restaurants;
mod users;

pub use meals::MealService;
pub use restaurants::RestaurantService;
pub use users::UserService;
