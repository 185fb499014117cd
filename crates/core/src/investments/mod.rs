pub mod accrual;
pub mod investments_errors;
pub mod investments_model;
pub mod investments_service;
pub mod investments_traits;


pub use investments_errors::InvestmentError;
pub use investments_model::*;
pub use investments_service::InvestmentService;
pub use investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};
