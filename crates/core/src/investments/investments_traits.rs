use async_trait::async_trait;

use crate::errors::Result;
use crate::investments::investments_model::{
    ConfirmInterest, Investment, InvestmentUpdate, MonthlyInterest, NewInvestment,
    NewMonthlyInterest, ScheduleEntry,
};

/// Trait for investment repository operations.
///
/// All lookups are scoped to the owning user; a missing or unowned
/// investment surfaces as a not-found error. `confirm_interest` must persist
/// the interest record and the aggregate update as one transaction.
#[async_trait]
pub trait InvestmentRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str, investment_id: &str) -> Result<Investment>;
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Investment>>;
    fn list_monthly_interests(&self, investment_id: &str) -> Result<Vec<MonthlyInterest>>;
    async fn create(&self, user_id: &str, new_investment: NewInvestment) -> Result<Investment>;
    async fn update(&self, user_id: &str, update: InvestmentUpdate) -> Result<Investment>;
    async fn delete(&self, user_id: &str, investment_id: &str) -> Result<usize>;
    async fn confirm_interest(
        &self,
        investment_id: &str,
        record: NewMonthlyInterest,
    ) -> Result<Investment>;
}

/// Trait for investment service operations.
#[async_trait]
pub trait InvestmentServiceTrait: Send + Sync {
    fn get_investment(&self, user_id: &str, investment_id: &str) -> Result<Investment>;
    fn list_investments(&self, user_id: &str) -> Result<Vec<Investment>>;
    fn get_monthly_interests(
        &self,
        user_id: &str,
        investment_id: &str,
    ) -> Result<Vec<MonthlyInterest>>;
    fn get_schedule(&self, user_id: &str, investment_id: &str) -> Result<Vec<ScheduleEntry>>;
    async fn create_investment(
        &self,
        user_id: &str,
        new_investment: NewInvestment,
    ) -> Result<Investment>;
    async fn update_investment(
        &self,
        user_id: &str,
        update: InvestmentUpdate,
    ) -> Result<Investment>;
    async fn delete_investment(&self, user_id: &str, investment_id: &str) -> Result<usize>;
    async fn confirm_interest(
        &self,
        user_id: &str,
        investment_id: &str,
        confirmation: ConfirmInterest,
    ) -> Result<Investment>;
}
