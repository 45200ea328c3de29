pub mod meals;
pub mod restaurants;
pub mod users;

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse { message: "ok" })
}
