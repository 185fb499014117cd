//! Domain logic for the Nestegg investment tracker.
//!
//! This crate is storage-agnostic: it defines the domain models, the
//! repository traits implemented by `nestegg-storage-sqlite`, the services
//! consumed by the HTTP layer, and the interest accrual engine.

pub mod constants;
pub mod errors;
pub mod investments;
pub mod users;
pub mod utils;

pub use errors::{DatabaseError, Error, Result, ValidationError};
