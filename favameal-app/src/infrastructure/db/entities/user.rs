use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    #[serde(skip_serializing)]
    pub token: String,
    pub created_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::meal_rating::Entity")]
    MealRatings,
    #[sea_orm(has_many = "super::meal_favorite::Entity")]
    MealFavorites,
    #[sea_orm(has_many = "super::restaurant_favorite::Entity")]
    RestaurantFavorites,
}

impl Related<super::meal_rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MealRatings.def()
    }
}

impl Related<super::meal_favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MealFavorites.def()
    }
}

impl Related<super::restaurant_favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RestaurantFavorites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
