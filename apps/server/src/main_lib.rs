use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use nestegg_core::investments::{InvestmentService, InvestmentServiceTrait};
use nestegg_core::users::{UserService, UserServiceTrait};
use nestegg_storage_sqlite::db;
use nestegg_storage_sqlite::investments::InvestmentRepository;
use nestegg_storage_sqlite::users::UserRepository;

use crate::auth::{self, AuthManager};
use crate::config::Config;

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait + Send + Sync>,
    pub investment_service: Arc<dyn InvestmentServiceTrait + Send + Sync>,
    pub auth: Arc<AuthManager>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("NE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.data_dir)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let user_service: Arc<dyn UserServiceTrait + Send + Sync> =
        Arc::new(UserService::new(user_repo));

    let investment_repo = Arc::new(InvestmentRepository::new(pool.clone(), writer.clone()));
    let investment_service: Arc<dyn InvestmentServiceTrait + Send + Sync> =
        Arc::new(InvestmentService::new(investment_repo));

    let secret = auth::decode_secret_key(&config.secret_key)?;
    let auth = Arc::new(AuthManager::new(
        &secret,
        Duration::from_secs(config.token_ttl_secs),
    ));

    Ok(Arc::new(AppState {
        user_service,
        investment_service,
        auth,
        db_path,
    }))
}
