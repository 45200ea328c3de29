//! Helpers for tests that need a real database.
//!
//! Each call returns a fresh SQLite database with the full schema, so tests
//! never share state.

use super::entities::user;
use super::{create_connection, run_migrations};
use sea_orm::{entity::*, DatabaseConnection};
use std::path::PathBuf;

pub async fn setup_test_db() -> DatabaseConnection {
    // An in-memory database lives as long as its connection, so the pool holds exactly one.
    let db = create_connection("sqlite::memory:", 1)
        .await
        .expect("failed to open in-memory database");
    run_migrations(&db).await.expect("failed to create schema");
    db
}

/// A file-backed database, for tests that need several pooled connections.
///
/// The file and its journal are removed on drop.
pub struct TempDatabase {
    pub db: DatabaseConnection,
    path: PathBuf,
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub async fn setup_file_test_db(max_connections: u32) -> TempDatabase {
    let path = std::env::temp_dir().join(format!("favameal-{}.db", uuid::Uuid::new_v4()));
    let url = format!("sqlite://{}?mode=rwc", path.display());
    let db = create_connection(&url, max_connections)
        .await
        .expect("failed to open file database");
    run_migrations(&db).await.expect("failed to create schema");
    TempDatabase { db, path }
}

/// Inserts a user with a token derived from the username and returns its id.
pub async fn create_test_user(db: &DatabaseConnection, username: &str) -> i32 {
    let active = user::ActiveModel {
        username: Set(username.to_string()),
        token: Set(format!("token-{username}")),
        created_at: Set(Some(chrono::Utc::now())),
        ..Default::default()
    };
    active.insert(db).await.expect("failed to insert user").id
}
