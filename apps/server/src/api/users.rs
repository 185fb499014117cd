use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::{CurrencyResponse, UpdateCurrencyRequest, UserResponse};

async fn me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.get_user(&user.0)?;
    Ok(Json(UserResponse::from(user)))
}

async fn delete_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    let _ = state.user_service.delete_user(&user.0).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_currency(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<CurrencyResponse>> {
    let user = state.user_service.get_user(&user.0)?;
    Ok(Json(CurrencyResponse {
        currency: user.preferred_currency,
    }))
}

async fn update_currency(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UpdateCurrencyRequest>,
) -> ApiResult<Json<CurrencyResponse>> {
    let user = state
        .user_service
        .set_preferred_currency(&user.0, &payload.currency)
        .await?;
    Ok(Json(CurrencyResponse {
        currency: user.preferred_currency,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/me", get(me).delete(delete_me))
        .route("/users/currency", get(get_currency).put(update_currency))
}
