use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
}

/// Restaurant as embedded inside a meal response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantSummary {
    pub id: i32,
    pub name: String,
    pub address: String,
}

/// Restaurant as seen by one user, assembled fresh for each response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantView {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub is_favorite: bool,
}
