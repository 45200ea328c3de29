use super::RestaurantSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMeal {
    pub name: String,
    pub restaurant_id: i32,
}

/// Meal with the requesting user's derived fields.
///
/// Built per request and never stored; `user_rating` and `avg_rating`
/// serialize as `null` when there is nothing to report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealView {
    pub id: i32,
    pub name: String,
    pub restaurant: RestaurantSummary,
    pub user_rating: Option<i32>,
    pub avg_rating: Option<f64>,
    pub is_favorite: bool,
}
