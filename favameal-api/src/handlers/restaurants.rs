use super::meals::FavoriteResponse;
use crate::extractors::{CurrentUser, JsonBody, PathId};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use favameal_app::domain::{NewRestaurant, RestaurantView};
use favameal_app::AppContext;
use favameal_errors::AppResult;

pub async fn create(
    State(ctx): State<AppContext>,
    _user: CurrentUser,
    JsonBody(body): JsonBody<NewRestaurant>,
) -> AppResult<(StatusCode, Json<RestaurantView>)> {
    let restaurant = ctx.restaurants.create(body).await?;
    Ok((StatusCode::CREATED, Json(restaurant)))
}

pub async fn retrieve(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId<i32>,
) -> AppResult<Json<RestaurantView>> {
    Ok(Json(ctx.restaurants.retrieve(id, user).await?))
}

pub async fn list(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<RestaurantView>>> {
    Ok(Json(ctx.restaurants.list(user).await?))
}

pub async fn destroy(
    State(ctx): State<AppContext>,
    _user: CurrentUser,
    PathId(id): PathId<i32>,
) -> AppResult<StatusCode> {
    ctx.restaurants.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn favorite(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId<i32>,
) -> AppResult<(StatusCode, Json<FavoriteResponse>)> {
    let result = ctx.restaurants.favorite(id, user).await?;
    Ok((
        StatusCode::CREATED,
        Json(FavoriteResponse {
            message: "Restaurant added to favorites",
            result,
        }),
    ))
}

pub async fn unfavorite(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    PathId(id): PathId<i32>,
) -> AppResult<StatusCode> {
    ctx.restaurants.unfavorite(id, user).await?;
    Ok(StatusCode::NO_CONTENT)
}
