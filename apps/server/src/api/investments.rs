use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};

use nestegg_core::investments::{
    ConfirmInterest, Investment, InvestmentUpdate, NewInvestment, ScheduleEntry,
};

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::models::UpdateInvestmentRequest;

async fn list_investments(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Investment>>> {
    let investments = state.investment_service.list_investments(&user.0)?;
    Ok(Json(investments))
}

async fn create_investment(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(new_investment): Json<NewInvestment>,
) -> ApiResult<Json<Investment>> {
    let investment = state
        .investment_service
        .create_investment(&user.0, new_investment)
        .await?;
    Ok(Json(investment))
}

async fn get_investment(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Investment>> {
    let investment = state.investment_service.get_investment(&user.0, &id)?;
    Ok(Json(investment))
}

async fn update_investment(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(update): Json<UpdateInvestmentRequest>,
) -> ApiResult<Json<Investment>> {
    let investment = state
        .investment_service
        .update_investment(
            &user.0,
            InvestmentUpdate {
                id,
                name: update.name,
                interest_rate: update.interest_rate,
            },
        )
        .await?;
    Ok(Json(investment))
}

async fn delete_investment(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    let _ = state
        .investment_service
        .delete_investment(&user.0, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_schedule(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<ScheduleEntry>>> {
    let schedule = state.investment_service.get_schedule(&user.0, &id)?;
    Ok(Json(schedule))
}

async fn confirm_interest(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(confirmation): Json<ConfirmInterest>,
) -> ApiResult<Json<Investment>> {
    let investment = state
        .investment_service
        .confirm_interest(&user.0, &id, confirmation)
        .await?;
    Ok(Json(investment))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/investments",
            get(list_investments).post(create_investment),
        )
        .route(
            "/investments/{id}",
            get(get_investment)
                .patch(update_investment)
                .delete(delete_investment),
        )
        .route("/investments/{id}/schedule", get(get_schedule))
        .route(
            "/investments/{id}/confirm-interest",
            post(confirm_interest),
        )
}
