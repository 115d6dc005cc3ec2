//! Property-based tests for ledger aggregation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::aggregate::LedgerAggregator;
use super::types::LedgerLine;

/// Strategy for a line in a small chart, dated around the 2025 exercice.
fn line_strategy() -> impl Strategy<Value = LedgerLine> {
    (
        prop::sample::select(vec!["101000", "211000", "411001", "521000", "601000", "701001"]),
        0i64..10_000_000,
        0i64..10_000_000,
        -30i64..400,
    )
        .prop_map(|(code, debit, credit, offset)| {
            let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
            LedgerLine {
                entry_date: start + chrono::Duration::days(offset),
                debit: Decimal::new(debit, 2),
                credit: Decimal::new(credit, 2),
                ..LedgerLine::debit(code, Decimal::ZERO, start)
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The sum of account balances equals total debits minus total credits
    /// of the lines dated inside the period.
    #[test]
    fn prop_balances_sum_to_period_net(lines in prop::collection::vec(line_strategy(), 0..60)) {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();

        let balances = LedgerAggregator::aggregate(&lines, start, end);

        let expected: Decimal = lines
            .iter()
            .filter(|l| l.entry_date >= start && l.entry_date <= end)
            .map(|l| l.debit - l.credit)
            .sum();
        let actual: Decimal = balances.iter().map(|(_, m)| m.balance()).sum();

        prop_assert_eq!(actual, expected);
    }

    /// Line order does not change the result.
    #[test]
    fn prop_aggregation_is_order_independent(lines in prop::collection::vec(line_strategy(), 0..60)) {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();

        let mut reversed = lines.clone();
        reversed.reverse();

        prop_assert_eq!(
            LedgerAggregator::aggregate(&lines, start, end),
            LedgerAggregator::aggregate(&reversed, start, end)
        );
    }

    /// Opening and period aggregations partition the lines up to the period end.
    #[test]
    fn prop_opening_and_period_partition(lines in prop::collection::vec(line_strategy(), 0..60)) {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();

        let opening = LedgerAggregator::aggregate_before(&lines, start);
        let period = LedgerAggregator::aggregate(&lines, start, end);
        let up_to_end = lines.iter().filter(|l| l.entry_date <= end).count();

        prop_assert_eq!(opening.line_count() + period.line_count(), up_to_end);
    }
}
