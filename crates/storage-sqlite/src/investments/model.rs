//! Database models for investments and monthly interest records.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use nestegg_core::investments::{Investment, MonthlyInterest, RateType};

use crate::utils::{parse_date_tolerant, parse_datetime_tolerant, parse_decimal_tolerant};

fn parse_rate_type(value: &str) -> RateType {
    match value {
        "MONTHLY" => RateType::Monthly,
        "ANNUAL" => RateType::Annual,
        other => {
            log::error!("Unknown rate type '{}', falling back to ANNUAL", other);
            RateType::Annual
        }
    }
}

/// Database model for investments.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::investments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct InvestmentDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub initial_capital: String,
    pub current_capital: String,
    pub interest_rate: String,
    pub rate_type: String,
    pub start_date: String,
    pub profit_lock_period: i32,
    pub total_interest_earned: String,
    pub total_reinvested: String,
    pub total_expenses: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Database model for monthly interest records.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Associations,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(InvestmentDB, foreign_key = investment_id))]
#[diesel(table_name = crate::schema::monthly_interests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct MonthlyInterestDB {
    pub id: String,
    pub investment_id: String,
    pub month: String,
    pub amount: String,
    pub reinvested: bool,
    pub reinvested_amount: String,
    pub expenses_amount: String,
    pub confirmed: bool,
    pub confirmed_at: Option<String>,
    pub interest_rate: String,
    pub created_at: String,
}

// Conversion to domain models
impl From<InvestmentDB> for Investment {
    fn from(db: InvestmentDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            initial_capital: parse_decimal_tolerant(&db.initial_capital, "initial_capital"),
            current_capital: parse_decimal_tolerant(&db.current_capital, "current_capital"),
            interest_rate: parse_decimal_tolerant(&db.interest_rate, "interest_rate"),
            rate_type: parse_rate_type(&db.rate_type),
            start_date: parse_date_tolerant(&db.start_date, "start_date"),
            profit_lock_period: db.profit_lock_period,
            total_interest_earned: parse_decimal_tolerant(
                &db.total_interest_earned,
                "total_interest_earned",
            ),
            total_reinvested: parse_decimal_tolerant(&db.total_reinvested, "total_reinvested"),
            total_expenses: parse_decimal_tolerant(&db.total_expenses, "total_expenses"),
            created_at: parse_datetime_tolerant(&db.created_at, "investments.created_at"),
            updated_at: parse_datetime_tolerant(&db.updated_at, "investments.updated_at"),
        }
    }
}

impl From<MonthlyInterestDB> for MonthlyInterest {
    fn from(db: MonthlyInterestDB) -> Self {
        Self {
            id: db.id,
            investment_id: db.investment_id,
            month: parse_date_tolerant(&db.month, "month"),
            amount: parse_decimal_tolerant(&db.amount, "amount"),
            reinvested: db.reinvested,
            reinvested_amount: parse_decimal_tolerant(&db.reinvested_amount, "reinvested_amount"),
            expenses_amount: parse_decimal_tolerant(&db.expenses_amount, "expenses_amount"),
            confirmed: db.confirmed,
            confirmed_at: db
                .confirmed_at
                .map(|ts| parse_datetime_tolerant(&ts, "confirmed_at")),
            interest_rate: parse_decimal_tolerant(&db.interest_rate, "interest_rate"),
            created_at: parse_datetime_tolerant(&db.created_at, "monthly_interests.created_at"),
        }
    }
}
