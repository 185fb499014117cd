use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::{rngs::OsRng, RngCore};
use tempfile::tempdir;
use tower::ServiceExt;

use nestegg_server::{api::app_router, build_state, config::Config};

async fn build_test_router() -> (Router, tempfile::TempDir) {
    let tmp = tempdir().unwrap();
    std::env::set_var("NE_DATA_DIR", tmp.path());

    let mut secret_bytes = [0u8; 32];
    OsRng.fill_bytes(&mut secret_bytes);
    std::env::set_var("NE_SECRET_KEY", BASE64.encode(secret_bytes));

    let config = Config::from_env();
    let state = build_state(&config).await.unwrap();
    (app_router(state), tmp)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (u16, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn full_investment_journey() {
    let (app, _tmp) = build_test_router().await;

    // The investment surface requires a token.
    let (status, _) = send(&app, Method::GET, "/api/v1/investments", None, None).await;
    assert_eq!(status, 401);

    // Register; the response never exposes the password hash.
    let (status, user) = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "super-secret",
        })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(user["email"], "ada@example.com");
    assert!(user.get("passwordHash").is_none());

    // Duplicate registration is rejected.
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(serde_json::json!({
            "name": "Ada again",
            "email": "ada@example.com",
            "password": "super-secret",
        })),
    )
    .await;
    assert_eq!(status, 400);

    // Wrong password is a 401; the right one yields a bearer token.
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(serde_json::json!({
            "email": "ada@example.com",
            "password": "wrong",
        })),
    )
    .await;
    assert_eq!(status, 401);

    let (status, login) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(serde_json::json!({
            "email": "ada@example.com",
            "password": "super-secret",
        })),
    )
    .await;
    assert_eq!(status, 200);
    let token = login["accessToken"].as_str().unwrap().to_string();

    // Create an investment: 10k at 12% annual, started Jan 15 2024,
    // profits locked for two months.
    let (status, investment) = send(
        &app,
        Method::POST,
        "/api/v1/investments",
        Some(&token),
        Some(serde_json::json!({
            "name": "Bond ladder",
            "initialCapital": 10000,
            "interestRate": 12,
            "rateType": "ANNUAL",
            "startDate": "2024-01-15",
            "profitLockPeriod": 2,
        })),
    )
    .await;
    assert_eq!(status, 200);
    let investment_id = investment["id"].as_str().unwrap().to_string();
    assert_eq!(investment["currentCapital"].as_f64().unwrap(), 10000.0);
    assert_eq!(investment["totalInterestEarned"].as_f64().unwrap(), 0.0);

    // The schedule starts the month after the start date; February is still
    // inside the two-month lock.
    let (status, schedule) = send(
        &app,
        Method::GET,
        &format!("/api/v1/investments/{investment_id}/schedule"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    let first = &schedule.as_array().unwrap()[0];
    assert_eq!(first["month"], "2024-02-01");
    assert_eq!(first["status"], "LOCKED");
    assert_eq!(first["expectedAmount"].as_f64().unwrap(), 100.0);

    // Confirming a locked month is rejected.
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/investments/{investment_id}/confirm-interest"),
        Some(&token),
        Some(serde_json::json!({
            "month": "2024-02-01",
            "amount": 100,
            "reinvestedAmount": 100,
        })),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["message"].as_str().unwrap().contains("2024-03-01"));

    // March clears the lock; 70 of the 100 is reinvested.
    let (status, updated) = send(
        &app,
        Method::POST,
        &format!("/api/v1/investments/{investment_id}/confirm-interest"),
        Some(&token),
        Some(serde_json::json!({
            "month": "2024-03-01",
            "amount": 100,
            "reinvestedAmount": 70,
        })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["currentCapital"].as_f64().unwrap(), 10070.0);
    assert_eq!(updated["totalInterestEarned"].as_f64().unwrap(), 100.0);
    assert_eq!(updated["totalReinvested"].as_f64().unwrap(), 70.0);
    assert_eq!(updated["totalExpenses"].as_f64().unwrap(), 30.0);

    // A second confirmation of the same month is a conflict.
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/investments/{investment_id}/confirm-interest"),
        Some(&token),
        Some(serde_json::json!({
            "month": "2024-03-01",
            "amount": 100,
            "reinvestedAmount": 70,
        })),
    )
    .await;
    assert_eq!(status, 409);

    // Raising the rate never rewrites confirmed history, only future months:
    // April expects (10000 + 70) * 18 / 12 / 100 = 151.05.
    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/investments/{investment_id}"),
        Some(&token),
        Some(serde_json::json!({ "interestRate": 18 })),
    )
    .await;
    assert_eq!(status, 200);

    let (_, schedule) = send(
        &app,
        Method::GET,
        &format!("/api/v1/investments/{investment_id}/schedule"),
        Some(&token),
        None,
    )
    .await;
    let entries = schedule.as_array().unwrap();
    let march = entries.iter().find(|e| e["month"] == "2024-03-01").unwrap();
    assert_eq!(march["status"], "CONFIRMED");
    assert_eq!(march["confirmedAmount"].as_f64().unwrap(), 100.0);
    let april = entries.iter().find(|e| e["month"] == "2024-04-01").unwrap();
    assert_eq!(april["status"], "PENDING");
    assert_eq!(april["expectedAmount"].as_f64().unwrap(), 151.05);

    // An out-of-range rate for the investment's rate type is rejected.
    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/investments/{investment_id}"),
        Some(&token),
        Some(serde_json::json!({ "interestRate": 101 })),
    )
    .await;
    assert_eq!(status, 400);

    // Currency preference round-trips, normalized to uppercase.
    let (status, currency) = send(
        &app,
        Method::GET,
        "/api/v1/users/currency",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(currency["currency"], "USD");

    let (status, currency) = send(
        &app,
        Method::PUT,
        "/api/v1/users/currency",
        Some(&token),
        Some(serde_json::json!({ "currency": "eur" })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(currency["currency"], "EUR");

    // A different user cannot see or touch Ada's investment.
    let (_, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(serde_json::json!({
            "name": "Eve",
            "email": "eve@example.com",
            "password": "super-secret",
        })),
    )
    .await;
    let (_, login) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(serde_json::json!({
            "email": "eve@example.com",
            "password": "super-secret",
        })),
    )
    .await;
    let eve_token = login["accessToken"].as_str().unwrap().to_string();

    let (status, list) = send(
        &app,
        Method::GET,
        "/api/v1/investments",
        Some(&eve_token),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert!(list.as_array().unwrap().is_empty());

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/v1/investments/{investment_id}"),
        Some(&eve_token),
        None,
    )
    .await;
    assert_eq!(status, 404);

    for key in ["NE_DATA_DIR", "NE_SECRET_KEY"] {
        std::env::remove_var(key);
    }
}
