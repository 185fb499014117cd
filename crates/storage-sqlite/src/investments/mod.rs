pub mod model;
pub mod repository;

pub use model::{InvestmentDB, MonthlyInterestDB};
pub use repository::InvestmentRepository;
