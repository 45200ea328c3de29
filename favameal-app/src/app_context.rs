use crate::application::{MealService, RestaurantService, UserService};
use crate::config::AppConfig;
use crate::infrastructure::db::{create_connection, run_migrations};
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub meals: Arc<MealService>,
    pub restaurants: Arc<RestaurantService>,
    pub users: Arc<UserService>,
}

impl AppContext {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            meals: Arc::new(MealService::new(db.clone())),
            restaurants: Arc::new(RestaurantService::new(db.clone())),
            users: Arc::new(UserService::new(db)),
        }
    }

    /// Connects to the configured database and makes sure the schema exists.
    pub async fn connect(config: &AppConfig) -> Result<Self, DbErr> {
        let db = create_connection(&config.database_url, config.max_connections).await?;
        run_migrations(&db).await?;
        tracing::info!(max_connections = config.max_connections, "Connected to database");
        Ok(Self::new(db))
    }
}
