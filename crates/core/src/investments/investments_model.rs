//! Investment domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// How an investment's `interest_rate` is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RateType {
    /// The rate is a per-month percentage.
    #[serde(rename = "MONTHLY")]
    Monthly,
    /// The rate is a per-year percentage, accrued in twelfths.
    #[default]
    #[serde(rename = "ANNUAL")]
    Annual,
}

impl RateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateType::Monthly => "MONTHLY",
            RateType::Annual => "ANNUAL",
        }
    }

    /// Upper policy bound for rates of this type, in percent.
    /// Applied at creation/update time, never inside the accrual math.
    pub fn max_rate(&self) -> Decimal {
        match self {
            RateType::Monthly => dec!(20),
            RateType::Annual => dec!(100),
        }
    }
}

/// Domain model representing an investment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// Principal at creation; never changes afterwards.
    pub initial_capital: Decimal,
    /// Running capital; grows by the reinvested portion of confirmed interest.
    pub current_capital: Decimal,
    pub interest_rate: Decimal,
    pub rate_type: RateType,
    /// Interest accrual begins the month after this date's month.
    pub start_date: NaiveDate,
    /// Months after `start_date` before any confirmation may be claimed.
    pub profit_lock_period: i32,
    pub total_interest_earned: Decimal,
    pub total_reinvested: Decimal,
    pub total_expenses: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new investment.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestment {
    pub id: Option<String>,
    pub name: String,
    pub initial_capital: Decimal,
    pub interest_rate: Decimal,
    pub rate_type: RateType,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub profit_lock_period: i32,
}

/// Input model for updating an investment.
///
/// Only the display name and the current rate are editable; everything else
/// is fixed at creation or owned by the confirmation flow.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentUpdate {
    pub id: String,
    pub name: Option<String>,
    pub interest_rate: Option<Decimal>,
}

/// A confirmed month of interest for an investment.
///
/// At most one record exists per `(investment_id, month)` pair, and a
/// confirmed record is never modified afterwards; `interest_rate` is the
/// rate snapshot taken at confirmation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyInterest {
    pub id: String,
    pub investment_id: String,
    /// Calendar month, normalized to its first day.
    pub month: NaiveDate,
    pub amount: Decimal,
    pub reinvested: bool,
    pub reinvested_amount: Decimal,
    pub expenses_amount: Decimal,
    pub confirmed: bool,
    pub confirmed_at: Option<NaiveDateTime>,
    pub interest_rate: Decimal,
    pub created_at: NaiveDateTime,
}

/// Fully-validated confirmation record, handed to the repository to be
/// persisted atomically together with the aggregate update.
#[derive(Debug, Clone)]
pub struct NewMonthlyInterest {
    pub investment_id: String,
    pub month: NaiveDate,
    pub amount: Decimal,
    pub reinvested: bool,
    pub reinvested_amount: Decimal,
    pub expenses_amount: Decimal,
    pub interest_rate: Decimal,
}

/// Caller input for confirming a month of interest.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmInterest {
    pub month: NaiveDate,
    pub amount: Decimal,
    #[serde(default)]
    pub reinvested_amount: Decimal,
}

/// Derived per-month state; Confirmed is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthStatus {
    #[serde(rename = "LOCKED")]
    Locked,
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "CONFIRMED")]
    Confirmed,
}

/// One row of the accrual schedule shown for an investment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub month: NaiveDate,
    pub expected_amount: Decimal,
    pub status: MonthStatus,
    pub confirmed_amount: Option<Decimal>,
    pub confirmed_at: Option<NaiveDateTime>,
}
