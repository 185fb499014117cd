use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use nestegg_core::investments::{
    Investment, InvestmentRepositoryTrait, InvestmentUpdate, MonthlyInterest, NewInvestment,
    NewMonthlyInterest,
};
use nestegg_core::Result;

use super::model::{InvestmentDB, MonthlyInterestDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{investments, monthly_interests};
use crate::utils::{format_date, format_datetime};

pub struct InvestmentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InvestmentRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        InvestmentRepository { pool, writer }
    }
}

#[async_trait]
impl InvestmentRepositoryTrait for InvestmentRepository {
    fn get_by_id(&self, user_id: &str, investment_id: &str) -> Result<Investment> {
        let mut conn = get_connection(&self.pool)?;
        let investment_db = investments::table
            .filter(investments::id.eq(investment_id))
            .filter(investments::user_id.eq(user_id))
            .first::<InvestmentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Investment::from(investment_db))
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Investment>> {
        let mut conn = get_connection(&self.pool)?;
        let investments_db = investments::table
            .filter(investments::user_id.eq(user_id))
            .order(investments::created_at.desc())
            .load::<InvestmentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(investments_db.into_iter().map(Investment::from).collect())
    }

    fn list_monthly_interests(&self, investment_id: &str) -> Result<Vec<MonthlyInterest>> {
        let mut conn = get_connection(&self.pool)?;
        let records_db = monthly_interests::table
            .filter(monthly_interests::investment_id.eq(investment_id))
            .order(monthly_interests::month.asc())
            .load::<MonthlyInterestDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(records_db.into_iter().map(MonthlyInterest::from).collect())
    }

    async fn create(&self, user_id: &str, new_investment: NewInvestment) -> Result<Investment> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Investment> {
                let now = format_datetime(Utc::now().naive_utc());
                let principal = new_investment.initial_capital.to_string();
                let investment_db = InvestmentDB {
                    id: new_investment
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    user_id,
                    name: new_investment.name,
                    initial_capital: principal.clone(),
                    // Running capital starts at the principal.
                    current_capital: principal,
                    interest_rate: new_investment.interest_rate.to_string(),
                    rate_type: new_investment.rate_type.as_str().to_string(),
                    start_date: format_date(new_investment.start_date),
                    profit_lock_period: new_investment.profit_lock_period,
                    total_interest_earned: "0".to_string(),
                    total_reinvested: "0".to_string(),
                    total_expenses: "0".to_string(),
                    created_at: now.clone(),
                    updated_at: now,
                };

                let result_db = diesel::insert_into(investments::table)
                    .values(&investment_db)
                    .returning(InvestmentDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Investment::from(result_db))
            })
            .await
    }

    async fn update(&self, user_id: &str, update: InvestmentUpdate) -> Result<Investment> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Investment> {
                let mut row = investments::table
                    .filter(investments::id.eq(&update.id))
                    .filter(investments::user_id.eq(&user_id))
                    .first::<InvestmentDB>(conn)
                    .map_err(StorageError::from)?;

                if let Some(name) = update.name {
                    row.name = name;
                }
                if let Some(rate) = update.interest_rate {
                    row.interest_rate = rate.to_string();
                }
                row.updated_at = format_datetime(Utc::now().naive_utc());

                diesel::update(investments::table.find(&row.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let result_db = investments::table
                    .find(&row.id)
                    .first::<InvestmentDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Investment::from(result_db))
            })
            .await
    }

    async fn delete(&self, user_id: &str, investment_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let investment_id = investment_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // Monthly interest records go with the investment (FK cascade).
                Ok(diesel::delete(
                    investments::table
                        .filter(investments::id.eq(&investment_id))
                        .filter(investments::user_id.eq(&user_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    /// Inserts the confirmed interest record and applies the aggregate
    /// deltas to the investment. Runs as a single job on the writer actor,
    /// so both writes share one immediate transaction; a duplicate month
    /// trips the unique index before any aggregate is touched.
    async fn confirm_interest(
        &self,
        investment_id: &str,
        record: NewMonthlyInterest,
    ) -> Result<Investment> {
        let investment_id = investment_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Investment> {
                let confirmed_at = Utc::now().naive_utc();
                let now = format_datetime(confirmed_at);

                let record_db = MonthlyInterestDB {
                    id: Uuid::new_v4().to_string(),
                    investment_id: record.investment_id.clone(),
                    month: format_date(record.month),
                    amount: record.amount.to_string(),
                    reinvested: record.reinvested,
                    reinvested_amount: record.reinvested_amount.to_string(),
                    expenses_amount: record.expenses_amount.to_string(),
                    confirmed: true,
                    confirmed_at: Some(now.clone()),
                    interest_rate: record.interest_rate.to_string(),
                    created_at: now.clone(),
                };
                diesel::insert_into(monthly_interests::table)
                    .values(&record_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let investment_db = investments::table
                    .find(&investment_id)
                    .first::<InvestmentDB>(conn)
                    .map_err(StorageError::from)?;
                let mut investment = Investment::from(investment_db);
                investment.current_capital += record.reinvested_amount;
                investment.total_interest_earned += record.amount;
                investment.total_reinvested += record.reinvested_amount;
                investment.total_expenses += record.expenses_amount;
                investment.updated_at = confirmed_at;

                diesel::update(investments::table.find(&investment_id))
                    .set((
                        investments::current_capital.eq(investment.current_capital.to_string()),
                        investments::total_interest_earned
                            .eq(investment.total_interest_earned.to_string()),
                        investments::total_reinvested
                            .eq(investment.total_reinvested.to_string()),
                        investments::total_expenses.eq(investment.total_expenses.to_string()),
                        investments::updated_at.eq(&now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(investment)
            })
            .await
    }
}
