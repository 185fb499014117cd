//! Request/response models for the HTTP API.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use nestegg_core::users as core_users;

/// User representation returned by the API; never carries the password hash.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub preferred_currency: String,
    pub created_at: NaiveDateTime,
}

impl From<core_users::User> for UserResponse {
    fn from(u: core_users::User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            preferred_currency: u.preferred_currency,
            created_at: u.created_at,
        }
    }
}

/// PATCH body for an investment; the id comes from the path.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvestmentRequest {
    pub name: Option<String>,
    pub interest_rate: Option<Decimal>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CurrencyResponse {
    pub currency: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateCurrencyRequest {
    pub currency: String,
}
