//! Investment-specific error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use super::investments_model::RateType;

/// Errors raised by the investment service and accrual flow.
///
/// Each precondition failure gets its own variant so the API layer can map
/// them 1:1 to status codes and user-facing messages.
#[derive(Error, Debug)]
pub enum InvestmentError {
    #[error("Interest for {month} is already confirmed")]
    AlreadyConfirmed { month: NaiveDate },

    #[error("{month} is inside the profit-lock period; the earliest claimable month is {first_claimable}")]
    LockedPeriod {
        month: NaiveDate,
        first_claimable: NaiveDate,
    },

    #[error("{month} is outside the confirmable window ({first_eligible} through {last_eligible})")]
    OutsideWindow {
        month: NaiveDate,
        first_eligible: NaiveDate,
        last_eligible: NaiveDate,
    },

    #[error("Rate {rate} is outside the allowed range 0..={max} for {rate_type:?} investments")]
    InvalidRate {
        rate: Decimal,
        max: Decimal,
        rate_type: RateType,
    },

    #[error("Reinvested amount {reinvested_amount} must be between 0 and the confirmed amount {amount}")]
    InvalidSplit {
        amount: Decimal,
        reinvested_amount: Decimal,
    },
}
