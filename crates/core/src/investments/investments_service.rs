use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;

use super::accrual::{
    eligible_months, expected_interest, first_claimable_month, first_eligible_month, is_claimable,
    last_eligible_month, month_status, round_money,
};
use super::investments_errors::InvestmentError;
use super::investments_model::{
    ConfirmInterest, Investment, InvestmentUpdate, MonthlyInterest, NewInvestment,
    NewMonthlyInterest, RateType, ScheduleEntry,
};
use super::investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};
use crate::constants::ACCRUAL_HORIZON_MONTHS;
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::utils::time_utils::{accrual_date_today, start_of_month};

/// Service for managing investments and interest confirmations.
///
/// The persistence backend is injected as a repository trait object; the
/// service owns every validation and accrual decision, the repository only
/// moves records.
pub struct InvestmentService {
    repository: Arc<dyn InvestmentRepositoryTrait>,
}

impl InvestmentService {
    pub fn new(repository: Arc<dyn InvestmentRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn validate_rate(rate: Decimal, rate_type: RateType) -> Result<()> {
        let max = rate_type.max_rate();
        if rate < Decimal::ZERO || rate > max {
            return Err(InvestmentError::InvalidRate {
                rate,
                max,
                rate_type,
            }
            .into());
        }
        Ok(())
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl InvestmentServiceTrait for InvestmentService {
    fn get_investment(&self, user_id: &str, investment_id: &str) -> Result<Investment> {
        self.repository.get_by_id(user_id, investment_id)
    }

    fn list_investments(&self, user_id: &str) -> Result<Vec<Investment>> {
        self.repository.list_by_user(user_id)
    }

    fn get_monthly_interests(
        &self,
        user_id: &str,
        investment_id: &str,
    ) -> Result<Vec<MonthlyInterest>> {
        // Ownership check before touching the child records.
        let investment = self.repository.get_by_id(user_id, investment_id)?;
        self.repository.list_monthly_interests(&investment.id)
    }

    /// Builds the per-month accrual schedule: every displayable month with
    /// its expected interest and derived Locked/Pending/Confirmed state.
    fn get_schedule(&self, user_id: &str, investment_id: &str) -> Result<Vec<ScheduleEntry>> {
        let investment = self.repository.get_by_id(user_id, investment_id)?;
        let records = self.repository.list_monthly_interests(&investment.id)?;
        let today = accrual_date_today();

        let schedule = eligible_months(investment.start_date, today, ACCRUAL_HORIZON_MONTHS)
            .into_iter()
            .map(|month| {
                let confirmed = records
                    .iter()
                    .find(|r| r.confirmed && start_of_month(r.month) == month);
                ScheduleEntry {
                    month,
                    expected_amount: expected_interest(&investment, &records, month),
                    status: month_status(&investment, &records, month),
                    confirmed_amount: confirmed.map(|r| r.amount),
                    confirmed_at: confirmed.and_then(|r| r.confirmed_at),
                }
            })
            .collect();
        Ok(schedule)
    }

    async fn create_investment(
        &self,
        user_id: &str,
        new_investment: NewInvestment,
    ) -> Result<Investment> {
        Self::validate_name(&new_investment.name)?;
        if new_investment.initial_capital <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "initial capital must be positive".to_string(),
            )
            .into());
        }
        if new_investment.profit_lock_period < 0 {
            return Err(ValidationError::InvalidInput(
                "profit lock period cannot be negative".to_string(),
            )
            .into());
        }
        Self::validate_rate(new_investment.interest_rate, new_investment.rate_type)?;

        debug!(
            "Creating investment '{}' for user {}",
            new_investment.name, user_id
        );
        self.repository.create(user_id, new_investment).await
    }

    /// Updates the display name and/or the current rate.
    ///
    /// Already-confirmed months keep their rate snapshots; a rate change
    /// only affects expected interest for months confirmed afterwards.
    async fn update_investment(
        &self,
        user_id: &str,
        update: InvestmentUpdate,
    ) -> Result<Investment> {
        let existing = self.repository.get_by_id(user_id, &update.id)?;
        if let Some(name) = &update.name {
            Self::validate_name(name)?;
        }
        if let Some(rate) = update.interest_rate {
            Self::validate_rate(rate, existing.rate_type)?;
        }
        self.repository.update(user_id, update).await
    }

    async fn delete_investment(&self, user_id: &str, investment_id: &str) -> Result<usize> {
        self.repository.delete(user_id, investment_id).await
    }

    /// Confirms a month of interest, splitting it into a reinvested portion
    /// (which compounds into the running capital) and an expensed portion.
    ///
    /// Every precondition failure is a classified error; the record insert
    /// and the aggregate update are applied in one transaction by the
    /// repository.
    async fn confirm_interest(
        &self,
        user_id: &str,
        investment_id: &str,
        confirmation: ConfirmInterest,
    ) -> Result<Investment> {
        let investment = self.repository.get_by_id(user_id, investment_id)?;
        let month = start_of_month(confirmation.month);
        let amount = round_money(confirmation.amount);
        let reinvested_amount = round_money(confirmation.reinvested_amount);

        if amount < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "interest amount cannot be negative".to_string(),
            )
            .into());
        }
        if reinvested_amount < Decimal::ZERO || reinvested_amount > amount {
            return Err(InvestmentError::InvalidSplit {
                amount,
                reinvested_amount,
            }
            .into());
        }

        let records = self.repository.list_monthly_interests(&investment.id)?;
        if records
            .iter()
            .any(|r| r.confirmed && start_of_month(r.month) == month)
        {
            return Err(InvestmentError::AlreadyConfirmed { month }.into());
        }

        let today = accrual_date_today();
        let first_eligible = first_eligible_month(investment.start_date);
        let last_eligible = last_eligible_month(today);
        if month < first_eligible || month > last_eligible {
            return Err(InvestmentError::OutsideWindow {
                month,
                first_eligible,
                last_eligible,
            }
            .into());
        }

        if !is_claimable(investment.start_date, investment.profit_lock_period, month) {
            return Err(InvestmentError::LockedPeriod {
                month,
                first_claimable: first_claimable_month(
                    investment.start_date,
                    investment.profit_lock_period,
                ),
            }
            .into());
        }

        let record = NewMonthlyInterest {
            investment_id: investment.id.clone(),
            month,
            amount,
            reinvested: reinvested_amount > Decimal::ZERO,
            reinvested_amount,
            expenses_amount: amount - reinvested_amount,
            interest_rate: investment.interest_rate,
        };

        debug!(
            "Confirming interest for investment {}: month {}, amount {}, reinvested {}",
            investment.id, month, amount, reinvested_amount
        );

        // A concurrent confirmation for the same month loses the race on the
        // (investment_id, month) unique index; surface that as the same
        // already-confirmed rejection the precondition check produces.
        match self.repository.confirm_interest(&investment.id, record).await {
            Err(Error::Database(DatabaseError::UniqueViolation(_))) => {
                Err(InvestmentError::AlreadyConfirmed { month }.into())
            }
            other => other,
        }
    }
}
