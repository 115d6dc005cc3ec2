//! Classification tests.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::service::AccountClassifier;
use super::types::{Bucket, ResultLayer};
use crate::ledger::{LedgerAggregator, LedgerLine};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

#[rstest]
#[case("101000", dec!(-5000), Bucket::Equity, dec!(5000))]
#[case("131000", dec!(200), Bucket::Equity, dec!(-200))]
#[case("162000", dec!(-3000), Bucket::FinancialDebt, dec!(3000))]
#[case("191000", dec!(-100), Bucket::FinancialDebt, dec!(100))]
#[case("211000", dec!(1000), Bucket::FixedAsset, dec!(1000))]
#[case("281100", dec!(-300), Bucket::FixedAssetContra, dec!(300))]
#[case("291000", dec!(-50), Bucket::FixedAssetContra, dec!(50))]
#[case("311000", dec!(750), Bucket::Inventory, dec!(750))]
#[case("401000", dec!(-900), Bucket::Payable, dec!(900))]
#[case("401000", dec!(120), Bucket::Payable, dec!(120))]
#[case("411001", dec!(500), Bucket::Receivable, dec!(500))]
#[case("411001", dec!(-200), Bucket::Payable, dec!(200))]
#[case("445000", dec!(0), Bucket::Receivable, dec!(0))]
#[case("521000", dec!(2500), Bucket::Cash, dec!(2500))]
#[case("521000", dec!(-400), Bucket::Overdraft, dec!(400))]
#[case("601000", dec!(800), Bucket::Expense(ResultLayer::Operating), dec!(800))]
#[case("661000", dec!(40), Bucket::Expense(ResultLayer::Financial), dec!(40))]
#[case("681000", dec!(300), Bucket::Expense(ResultLayer::Extraordinary), dec!(300))]
#[case("701001", dec!(-1000), Bucket::Revenue(ResultLayer::Operating), dec!(1000))]
#[case("771000", dec!(-15), Bucket::Revenue(ResultLayer::Financial), dec!(15))]
#[case("791000", dec!(-60), Bucket::Revenue(ResultLayer::Extraordinary), dec!(60))]
#[case("821000", dec!(-700), Bucket::Revenue(ResultLayer::Extraordinary), dec!(700))]
#[case("811000", dec!(450), Bucket::Expense(ResultLayer::Extraordinary), dec!(450))]
#[case("891000", dec!(25), Bucket::Expense(ResultLayer::Extraordinary), dec!(25))]
fn test_classify_account(
    #[case] code: &str,
    #[case] net: Decimal,
    #[case] bucket: Bucket,
    #[case] amount: Decimal,
) {
    let classifier = AccountClassifier::new();
    assert_eq!(classifier.classify_account(code, net), Some((bucket, amount)));
}

#[rstest]
#[case("801000")]
#[case("901000")]
#[case("001000")]
#[case("4")]
#[case("ABC")]
#[case("")]
fn test_unmatched_codes(#[case] code: &str) {
    assert_eq!(AccountClassifier::new().classify_account(code, dec!(10)), None);
}

#[test]
fn test_unclassified_accounts_are_collected() {
    let lines = vec![
        LedgerLine::debit("411001", dec!(100), date()),
        LedgerLine::debit("471000", dec!(0), date()),
        LedgerLine::debit("901000", dec!(75), date()),
    ];
    let balances = LedgerAggregator::aggregate(
        &lines,
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
    );

    let classification = AccountClassifier::new().classify(&balances, &BTreeMap::new());

    assert_eq!(classification.balances.len(), 2);
    assert_eq!(classification.unclassified.len(), 1);
    assert_eq!(classification.unclassified[0].account_code, "901000");
    assert_eq!(classification.unclassified[0].net_amount, dec!(75));
}

#[test]
fn test_labels_come_from_chart_then_bucket() {
    let lines = vec![
        LedgerLine::debit("411001", dec!(100), date()),
        LedgerLine::credit("521000", dec!(40), date()),
    ];
    let balances = LedgerAggregator::aggregate(
        &lines,
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
    );
    let labels = BTreeMap::from([("521000".to_string(), "Banque BICICI".to_string())]);

    let classification = AccountClassifier::new().classify(&balances, &labels);

    assert_eq!(classification.balances[0].label, "Receivable 411001");
    assert_eq!(classification.balances[1].label, "Banque BICICI (Overdraft)");
    assert_eq!(classification.balances[1].bucket, Bucket::Overdraft);
    assert_eq!(classification.bucket_total(Bucket::Overdraft), dec!(40));
}

fn code_strategy() -> impl Strategy<Value = String> {
    (0u32..100, 0u32..10_000).prop_map(|(prefix, rest)| format!("{prefix:02}{rest:04}"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every account lands either in exactly one bucket or in the
    /// unclassified list, never both and never twice.
    #[test]
    fn prop_classification_is_complete_and_exclusive(
        entries in prop::collection::vec((code_strategy(), -1_000_000i64..1_000_000), 1..40),
    ) {
        let lines: Vec<LedgerLine> = entries
            .iter()
            .map(|(code, amount)| {
                if *amount >= 0 {
                    LedgerLine::debit(code.clone(), Decimal::from(*amount), date())
                } else {
                    LedgerLine::credit(code.clone(), Decimal::from(-amount), date())
                }
            })
            .collect();
        let balances = LedgerAggregator::aggregate(
            &lines,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        );

        let classification = AccountClassifier::new().classify(&balances, &BTreeMap::new());

        prop_assert_eq!(
            classification.balances.len() + classification.unclassified.len(),
            balances.len()
        );
        for (code, _) in balances.iter() {
            let classified = classification.balances.iter().filter(|b| b.account_code == code).count();
            let unclassified = classification.unclassified.iter().filter(|u| u.account_code == code).count();
            prop_assert_eq!(classified + unclassified, 1);
        }
    }

    /// Presented amounts of sign-dependent buckets are never negative.
    #[test]
    fn prop_sign_dependent_buckets_are_non_negative(
        class in prop::sample::select(vec!["40", "41", "47", "52", "57"]),
        net in -1_000_000i64..1_000_000,
    ) {
        let code = format!("{class}1000");
        let (_, amount) = AccountClassifier::new()
            .classify_account(&code, Decimal::from(net))
            .unwrap();
        prop_assert!(amount >= Decimal::ZERO);
        prop_assert_eq!(amount, Decimal::from(net).abs());
    }
}
