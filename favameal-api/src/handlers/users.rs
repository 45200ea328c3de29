use crate::extractors::JsonBody;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use favameal_app::domain::RegisteredUser;
use favameal_app::AppContext;
use favameal_errors::AppResult;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub username: String,
}

pub async fn register(
    State(ctx): State<AppContext>,
    JsonBody(body): JsonBody<RegisterBody>,
) -> AppResult<(StatusCode, Json<RegisteredUser>)> {
    let user = ctx.users.register(&body.username).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
