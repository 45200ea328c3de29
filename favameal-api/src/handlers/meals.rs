use super::MessageResponse;
use crate::extractors::{CurrentUser, JsonBody, PathId};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use favameal_app::domain::{FavoriteResult, MealView, NewMeal, RateRequest};
use favameal_app::AppContext;
use favameal_errors::AppResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RatingBody {
    pub rating: i32,
}

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub result: FavoriteResult,
}

pub async fn create(
    State(ctx): State<AppContext>,
    _user: CurrentUser,
    JsonBody(body): JsonBody<NewMeal>,
) -> AppResult<(StatusCode, Json<MealView>)> {
    let meal = ctx.meals.create(body).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}

pub async fn retrieve(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId<i32>,
) -> AppResult<Json<MealView>> {
    Ok(Json(ctx.meals.retrieve(id, user).await?))
}

pub async fn list(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<MealView>>> {
    Ok(Json(ctx.meals.list(user).await?))
}

pub async fn destroy(
    State(ctx): State<AppContext>,
    _user: CurrentUser,
    PathId(id): PathId<i32>,
) -> AppResult<StatusCode> {
    ctx.meals.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn rate(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId<i32>,
    JsonBody(body): JsonBody<RatingBody>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    ctx.meals
        .rate(id, user, RateRequest::Create(body.rating))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Thanks for rating your meal!",
        }),
    ))
}

pub async fn update_rating(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId<i32>,
    JsonBody(body): JsonBody<RatingBody>,
) -> AppResult<StatusCode> {
    ctx.meals
        .rate(id, user, RateRequest::Update(body.rating))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_rating(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId<i32>,
) -> AppResult<StatusCode> {
    ctx.meals.rate(id, user, RateRequest::Delete).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn favorite(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId<i32>,
) -> AppResult<(StatusCode, Json<FavoriteResponse>)> {
    let result = ctx.meals.favorite(id, user).await?;
    Ok((
        StatusCode::CREATED,
        Json(FavoriteResponse {
            message: "Meal added to favorites",
            result,
        }),
    ))
}

pub async fn unfavorite(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId<i32>,
) -> AppResult<StatusCode> {
    ctx.meals.unfavorite(id, user).await?;
    Ok(StatusCode::NO_CONTENT)
}
