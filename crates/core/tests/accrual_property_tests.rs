//! Property-based tests for the interest accrual calculations.
//!
//! These verify the calendar and rate invariants across all valid inputs,
//! using the `proptest` crate for random test case generation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use nestegg_core::investments::accrual::{
    eligible_months, first_claimable_month, first_eligible_month, is_claimable, monthly_rate,
    round_money,
};
use nestegg_core::investments::RateType;
use nestegg_core::utils::time_utils::{add_months, months_between, start_of_month};

// =============================================================================
// Generators
// =============================================================================

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2035, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0f64..100.0).prop_map(|r| Decimal::from_f64(r).unwrap().round_dp(4))
}

fn arb_principal() -> impl Strategy<Value = Decimal> {
    (1f64..10_000_000.0).prop_map(|p| Decimal::from_f64(p).unwrap().round_dp(2))
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// An annual rate accrues exactly a twelfth of itself per month, so the
    /// no-history expectation equals `principal * rate / 12 / 100` in cents.
    #[test]
    fn prop_annual_rate_accrues_in_twelfths(
        principal in arb_principal(),
        rate in arb_rate(),
    ) {
        let expected = round_money(principal * rate / dec!(12) / dec!(100));
        prop_assert_eq!(round_money(principal * monthly_rate(rate, RateType::Annual)), expected);
    }

    /// A monthly rate is applied as-is: `principal * rate / 100`.
    #[test]
    fn prop_monthly_rate_is_applied_directly(
        principal in arb_principal(),
        rate in 0f64..20.0,
    ) {
        let rate = Decimal::from_f64(rate).unwrap().round_dp(4);
        let expected = round_money(principal * rate / dec!(100));
        prop_assert_eq!(round_money(principal * monthly_rate(rate, RateType::Monthly)), expected);
    }

    /// The eligible sequence starts exactly one month after the start date's
    /// month and is strictly ascending with no gaps.
    #[test]
    fn prop_eligible_months_are_gapless(
        start in arb_date(),
        today in arb_date(),
        horizon in 0i32..24,
    ) {
        let months = eligible_months(start, today, horizon);
        if let Some(first) = months.first() {
            prop_assert_eq!(*first, add_months(start_of_month(start), 1));
        }
        for pair in months.windows(2) {
            prop_assert_eq!(pair[1], add_months(pair[0], 1));
        }
        if let Some(last) = months.last() {
            prop_assert!(*last <= add_months(start_of_month(today), horizon));
        }
    }

    /// Claimability is exactly the months-from-start >= lock-period predicate.
    #[test]
    fn prop_claimability_matches_lock_boundary(
        start in arb_date(),
        lock in 0i32..60,
        offset in -24i32..84,
    ) {
        let month = add_months(start_of_month(start), offset);
        let claimable = is_claimable(start, lock, month);
        prop_assert_eq!(claimable, months_between(month, start_of_month(start)) >= lock);
    }

    /// The first claimable month is claimable, the month before it is not
    /// (or is the start month, which never accrues interest at all).
    #[test]
    fn prop_first_claimable_month_is_a_boundary(
        start in arb_date(),
        lock in 0i32..60,
    ) {
        let first = first_claimable_month(start, lock);
        prop_assert!(is_claimable(start, lock, first));
        prop_assert!(first >= first_eligible_month(start));
        let previous = add_months(first, -1);
        prop_assert!(!is_claimable(start, lock, previous) || previous < first_eligible_month(start));
    }

    /// Money rounding is idempotent and keeps at most two decimal places.
    #[test]
    fn prop_round_money_is_idempotent(value in -1_000_000f64..1_000_000.0) {
        let rounded = round_money(Decimal::from_f64(value).unwrap());
        prop_assert_eq!(round_money(rounded), rounded);
        prop_assert!(rounded.scale() <= 2);
    }
}
