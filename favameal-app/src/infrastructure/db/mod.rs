pub mod entities;
mod favorite_repository;
mod meal_repository;
mod rating_repository;
mod restaurant_repository;
mod user_repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use favorite_repository::{MealFavoriteRepository, RestaurantFavoriteRepository};
pub use meal_repository::MealRepository;
pub use rating_repository::RatingRepository;
pub use restaurant_repository::RestaurantRepository;
pub use user_repository::UserRepository;

use entities::{meal_rating, Meal, MealFavorite, MealRating, Restaurant, RestaurantFavorite, User};
use sea_orm::sea_query::Index;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr,
    EntityTrait, Schema,
};
use std::time::Duration;

pub async fn create_connection(
    database_url: &str,
    max_connections: u32,
) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// Creates every table the service needs, in foreign-key order.
///
/// DDL is generated from the entities for whichever backend the connection
/// talks to, so Postgres in production and SQLite in tests share one schema.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    if backend == DatabaseBackend::Sqlite {
        db.execute_unprepared("PRAGMA foreign_keys = ON").await?;
    }

    let schema = Schema::new(backend);
    create_table(db, &schema, User).await?;
    create_table(db, &schema, Restaurant).await?;
    create_table(db, &schema, Meal).await?;
    create_table(db, &schema, MealRating).await?;
    create_table(db, &schema, MealFavorite).await?;
    create_table(db, &schema, RestaurantFavorite).await?;

    // Aggregates filter on meal_id alone, which the (user_id, meal_id) key does not cover.
    let index = Index::create()
        .if_not_exists()
        .name("idx_meal_ratings_meal_id")
        .table(MealRating)
        .col(meal_rating::Column::MealId)
        .to_owned();
    db.execute(backend.build(&index)).await?;

    tracing::info!(?backend, "Database schema ready");
    Ok(())
}

async fn create_table<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(db.get_database_backend().build(&stmt)).await?;
    Ok(())
}
