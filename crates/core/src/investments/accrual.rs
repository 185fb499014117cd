//! Interest accrual calculations.
//!
//! Pure functions over domain models: no clock, no I/O. "Today" is always an
//! explicit parameter so callers (and tests) control the reference month.
//!
//! Months are identified by the first day of the calendar month. Every
//! function normalizes its date arguments, so callers may pass any day of
//! the month they mean.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::constants::ACCRUAL_HORIZON_MONTHS;
use crate::investments::investments_model::{Investment, MonthlyInterest, MonthStatus, RateType};
use crate::utils::time_utils::{add_months, months_between, start_of_month};

/// Rounds a money value to cent precision, ties away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a stored rate into the effective per-month fraction.
///
/// Bounds are a policy concern enforced when the rate is set, not here.
pub fn monthly_rate(interest_rate: Decimal, rate_type: RateType) -> Decimal {
    match rate_type {
        RateType::Annual => interest_rate / dec!(12) / dec!(100),
        RateType::Monthly => interest_rate / dec!(100),
    }
}

/// The first month for which interest can exist: the calendar month
/// immediately following the start date's month.
pub fn first_eligible_month(start_date: NaiveDate) -> NaiveDate {
    add_months(start_of_month(start_date), 1)
}

/// The last month in the displayable/confirmable window relative to `today`.
pub fn last_eligible_month(today: NaiveDate) -> NaiveDate {
    add_months(start_of_month(today), ACCRUAL_HORIZON_MONTHS)
}

/// Every calendar month from the first eligible month through
/// `start_of_month(today) + horizon_months`, ascending, no gaps.
///
/// This sequence defines which months are displayable; claimability is
/// gated separately by the profit-lock period.
pub fn eligible_months(
    start_date: NaiveDate,
    today: NaiveDate,
    horizon_months: i32,
) -> Vec<NaiveDate> {
    let first = first_eligible_month(start_date);
    let last = add_months(start_of_month(today), horizon_months);
    let mut months = Vec::new();
    let mut current = first;
    while current <= last {
        months.push(current);
        current = add_months(current, 1);
    }
    months
}

/// Whether `month` has cleared the investment's profit-lock period.
pub fn is_claimable(start_date: NaiveDate, profit_lock_period: i32, month: NaiveDate) -> bool {
    months_between(start_of_month(month), start_of_month(start_date)) >= profit_lock_period
}

/// The earliest month that clears the profit-lock period.
pub fn first_claimable_month(start_date: NaiveDate, profit_lock_period: i32) -> NaiveDate {
    // The lock can never open earlier than interest exists at all.
    let unlocked = add_months(start_of_month(start_date), profit_lock_period);
    unlocked.max(first_eligible_month(start_date))
}

/// Expected interest for `target_month`.
///
/// A month that already has a confirmed record returns that record's stored
/// amount verbatim. For any other month, the capital base is reconstructed
/// from the initial capital plus the reinvested portion of every confirmed
/// month that precedes the target, then multiplied by the investment's
/// current monthly rate. Rate edits therefore affect only unconfirmed
/// months, never retroactively.
pub fn expected_interest(
    investment: &Investment,
    records: &[MonthlyInterest],
    target_month: NaiveDate,
) -> Decimal {
    let target = start_of_month(target_month);

    if let Some(existing) = records
        .iter()
        .find(|r| r.confirmed && start_of_month(r.month) == target)
    {
        return existing.amount;
    }

    let capital_base = records
        .iter()
        .filter(|r| r.confirmed && start_of_month(r.month) < target)
        .fold(investment.initial_capital, |base, r| {
            base + r.reinvested_amount
        });

    round_money(capital_base * monthly_rate(investment.interest_rate, investment.rate_type))
}

/// Derived Locked/Pending/Confirmed state for a month.
///
/// Locked -> Pending happens implicitly once the lock clears; Confirmed is
/// terminal and recorded, the other two are computed at read time.
pub fn month_status(
    investment: &Investment,
    records: &[MonthlyInterest],
    month: NaiveDate,
) -> MonthStatus {
    let target = start_of_month(month);
    if records
        .iter()
        .any(|r| r.confirmed && start_of_month(r.month) == target)
    {
        MonthStatus::Confirmed
    } else if is_claimable(investment.start_date, investment.profit_lock_period, target) {
        MonthStatus::Pending
    } else {
        MonthStatus::Locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_investment(
        initial_capital: Decimal,
        interest_rate: Decimal,
        rate_type: RateType,
        start_date: NaiveDate,
        profit_lock_period: i32,
    ) -> Investment {
        Investment {
            id: "inv-1".to_string(),
            user_id: "user-1".to_string(),
            name: "Test".to_string(),
            initial_capital,
            current_capital: initial_capital,
            interest_rate,
            rate_type,
            start_date,
            profit_lock_period,
            total_interest_earned: Decimal::ZERO,
            total_reinvested: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn confirmed_record(month: NaiveDate, amount: Decimal, reinvested: Decimal) -> MonthlyInterest {
        MonthlyInterest {
            id: format!("mi-{month}"),
            investment_id: "inv-1".to_string(),
            month,
            amount,
            reinvested: reinvested > Decimal::ZERO,
            reinvested_amount: reinvested,
            expenses_amount: amount - reinvested,
            confirmed: true,
            confirmed_at: Some(NaiveDateTime::default()),
            interest_rate: dec!(12),
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn monthly_rate_converts_annual_to_twelfths() {
        assert_eq!(monthly_rate(dec!(12), RateType::Annual), dec!(0.01));
        assert_eq!(monthly_rate(dec!(1.5), RateType::Monthly), dec!(0.015));
        assert_eq!(monthly_rate(Decimal::ZERO, RateType::Annual), Decimal::ZERO);
    }

    #[test]
    fn expected_interest_without_history() {
        // 10000 at 12% annual -> 100.00 per month
        let inv = test_investment(dec!(10000), dec!(12), RateType::Annual, date(2024, 1, 15), 2);
        assert_eq!(expected_interest(&inv, &[], date(2024, 2, 1)), dec!(100.00));

        // 10000 at 1% monthly -> same monthly amount
        let inv = test_investment(dec!(10000), dec!(1), RateType::Monthly, date(2024, 1, 15), 0);
        assert_eq!(expected_interest(&inv, &[], date(2024, 2, 1)), dec!(100.00));
    }

    #[test]
    fn expected_interest_rounds_to_cents() {
        let inv = test_investment(dec!(1234.56), dec!(7), RateType::Annual, date(2024, 1, 1), 0);
        // 1234.56 * 7 / 12 / 100 = 7.2016
        assert_eq!(expected_interest(&inv, &[], date(2024, 3, 1)), dec!(7.20));
    }

    #[test]
    fn expected_interest_walks_reinvested_history() {
        let inv = test_investment(dec!(10000), dec!(12), RateType::Annual, date(2024, 1, 15), 2);
        let records = vec![confirmed_record(date(2024, 3, 1), dec!(100), dec!(70))];

        // April's base is 10000 + 70 reinvested from March.
        assert_eq!(
            expected_interest(&inv, &records, date(2024, 4, 1)),
            dec!(100.70)
        );
        // February precedes the confirmed month, so its base is untouched.
        assert_eq!(
            expected_interest(&inv, &records, date(2024, 2, 1)),
            dec!(100.00)
        );
    }

    #[test]
    fn expected_interest_ignores_expensed_portion() {
        let inv = test_investment(dec!(10000), dec!(12), RateType::Annual, date(2024, 1, 15), 0);
        let records = vec![confirmed_record(date(2024, 2, 1), dec!(100), Decimal::ZERO)];
        // Fully expensed interest does not compound.
        assert_eq!(
            expected_interest(&inv, &records, date(2024, 3, 1)),
            dec!(100.00)
        );
    }

    #[test]
    fn expected_interest_returns_stored_amount_for_confirmed_month() {
        let inv = test_investment(dec!(10000), dec!(12), RateType::Annual, date(2024, 1, 15), 0);
        let records = vec![confirmed_record(date(2024, 3, 1), dec!(95.50), dec!(50))];
        // Stored amount wins even though the formula would say 100.00.
        assert_eq!(
            expected_interest(&inv, &records, date(2024, 3, 1)),
            dec!(95.50)
        );
    }

    #[test]
    fn eligible_months_start_one_month_after_start_date() {
        let months = eligible_months(date(2024, 1, 15), date(2024, 3, 10), 12);
        assert_eq!(months.first(), Some(&date(2024, 2, 1)));
        assert_eq!(months.last(), Some(&date(2025, 3, 1)));
        assert_eq!(months.len(), 14);
        // Strictly ascending, no gaps.
        for pair in months.windows(2) {
            assert_eq!(add_months(pair[0], 1), pair[1]);
        }
    }

    #[test]
    fn eligible_months_empty_for_far_future_start() {
        let months = eligible_months(date(2026, 6, 1), date(2024, 3, 10), 12);
        assert!(months.is_empty());
    }

    #[test]
    fn claimability_respects_lock_period() {
        let start = date(2024, 1, 15);
        // Lock of 2 months from a January start: February is month 1 (locked),
        // March is month 2 (claimable).
        assert!(!is_claimable(start, 2, date(2024, 2, 1)));
        assert!(is_claimable(start, 2, date(2024, 3, 1)));
        assert!(is_claimable(start, 2, date(2024, 12, 1)));

        // Zero lock period leaves every eligible month claimable.
        assert!(is_claimable(start, 0, date(2024, 2, 1)));

        // Months before the start are never claimable for a positive lock.
        assert!(!is_claimable(start, 1, date(2023, 12, 1)));
    }

    #[test]
    fn first_claimable_month_never_precedes_first_eligible() {
        let start = date(2024, 1, 15);
        assert_eq!(first_claimable_month(start, 2), date(2024, 3, 1));
        // A zero lock still cannot make the start month claimable.
        assert_eq!(first_claimable_month(start, 0), date(2024, 2, 1));
    }

    #[test]
    fn month_status_is_derived() {
        let inv = test_investment(dec!(10000), dec!(12), RateType::Annual, date(2024, 1, 15), 2);
        let records = vec![confirmed_record(date(2024, 3, 1), dec!(100), dec!(70))];

        assert_eq!(
            month_status(&inv, &records, date(2024, 2, 1)),
            MonthStatus::Locked
        );
        assert_eq!(
            month_status(&inv, &records, date(2024, 3, 1)),
            MonthStatus::Confirmed
        );
        assert_eq!(
            month_status(&inv, &records, date(2024, 4, 1)),
            MonthStatus::Pending
        );
    }

    #[test]
    fn round_money_is_cent_precision_away_from_zero() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round_money(dec!(1.004)), dec!(1.00));
    }
}
