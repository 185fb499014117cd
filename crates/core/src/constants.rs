//! Application-wide constants.

/// How many calendar months past the current month the accrual schedule
/// extends. Confirmations beyond this horizon are rejected.
pub const ACCRUAL_HORIZON_MONTHS: i32 = 12;

/// Display currency assigned to users who have not picked one.
pub const DEFAULT_CURRENCY: &str = "USD";
