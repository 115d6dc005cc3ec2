//! Period-over-period comparison.

use rust_decimal::Decimal;

use super::types::{BalanceSheet, IncomeStatement, LayeredSection, StatementItem, StatementSection};

/// Variation between two amounts: `(current - prior, percent of |prior|)`.
///
/// The percentage is absent when the prior amount is zero.
#[must_use]
pub fn variation(current: Decimal, prior: Decimal) -> (Decimal, Option<Decimal>) {
    let delta = current - prior;
    let pct = if prior.is_zero() {
        None
    } else {
        delta
            .checked_div(prior.abs())
            .map(|ratio| (ratio * Decimal::ONE_HUNDRED).round_dp(2))
    };
    (delta, pct)
}

/// Fills the prior-period columns of `current` from `prior`.
///
/// Items are matched by code. A line present only in the prior period is
/// kept with a zero current amount, so disappearing balances stay visible.
pub fn attach_prior_period(current: &mut StatementSection, prior: &StatementSection) {
    for item in &mut current.items {
        let prior_amount = prior.item(&item.code).map_or(Decimal::ZERO, |p| p.amount_current_period);
        set_prior(item, prior_amount);
    }

    for prior_item in &prior.items {
        if current.item(&prior_item.code).is_none() {
            let mut item = StatementItem::new(&prior_item.code, &prior_item.label, Decimal::ZERO);
            item.accounts.clone_from(&prior_item.accounts);
            if prior_item.gross_amount.is_some() {
                item.gross_amount = Some(Decimal::ZERO);
                item.contra_amount = Some(Decimal::ZERO);
            }
            set_prior(&mut item, prior_item.amount_current_period);
            current.items.push(item);
        }
    }

    current.items.sort_by(|a, b| a.code.cmp(&b.code));
    current.prior_total = Some(prior.total);
}

fn set_prior(item: &mut StatementItem, prior_amount: Decimal) {
    let (delta, pct) = variation(item.amount_current_period, prior_amount);
    item.amount_prior_period = Some(prior_amount);
    item.variation = Some(delta);
    item.variation_pct = pct;
}

/// Compares a balance sheet with the preceding exercice's.
pub fn compare_balance_sheets(current: &mut BalanceSheet, prior: &BalanceSheet) {
    let assets = &mut current.assets;
    attach_prior_period(&mut assets.immobilized, &prior.assets.immobilized);
    attach_prior_period(&mut assets.current, &prior.assets.current);
    attach_prior_period(&mut assets.treasury, &prior.assets.treasury);
    assets.prior_total = Some(prior.assets.total);

    let liabilities = &mut current.liabilities_equity;
    attach_prior_period(&mut liabilities.equity, &prior.liabilities_equity.equity);
    attach_prior_period(&mut liabilities.debt, &prior.liabilities_equity.debt);
    liabilities.prior_total = Some(prior.liabilities_equity.total);
}

/// Compares an income statement with the preceding exercice's.
pub fn compare_income_statements(current: &mut IncomeStatement, prior: &IncomeStatement) {
    compare_layers(&mut current.revenue, &prior.revenue);
    compare_layers(&mut current.expenses, &prior.expenses);
    current.prior_results = Some(prior.results());
}

fn compare_layers(current: &mut LayeredSection, prior: &LayeredSection) {
    attach_prior_period(&mut current.operating, &prior.operating);
    attach_prior_period(&mut current.financial, &prior.financial);
    attach_prior_period(&mut current.extraordinary, &prior.extraordinary);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_variation() {
        assert_eq!(variation(dec!(1200), dec!(1000)), (dec!(200), Some(dec!(20.00))));
        assert_eq!(variation(dec!(500), dec!(1000)), (dec!(-500), Some(dec!(-50.00))));
        assert_eq!(variation(dec!(-50), dec!(-100)), (dec!(50), Some(dec!(50.00))));
    }

    #[test]
    fn test_variation_without_prior_amount() {
        assert_eq!(variation(dec!(300), Decimal::ZERO), (dec!(300), None));
    }

    #[test]
    fn test_attach_prior_period_matches_by_code() {
        let mut current = StatementSection::from_items(vec![
            StatementItem::new("411001", "Client A", dec!(1500)),
            StatementItem::new("411002", "Client B", dec!(200)),
        ]);
        let prior = StatementSection::from_items(vec![
            StatementItem::new("411001", "Client A", dec!(1000)),
            StatementItem::new("411003", "Client C", dec!(80)),
        ]);

        attach_prior_period(&mut current, &prior);

        assert_eq!(current.prior_total, Some(dec!(1080)));
        assert_eq!(current.total, dec!(1700));
        assert_eq!(current.items.len(), 3);

        let a = current.item("411001").unwrap();
        assert_eq!(a.amount_prior_period, Some(dec!(1000)));
        assert_eq!(a.variation, Some(dec!(500)));
        assert_eq!(a.variation_pct, Some(dec!(50.00)));

        let b = current.item("411002").unwrap();
        assert_eq!(b.amount_prior_period, Some(Decimal::ZERO));
        assert_eq!(b.variation_pct, None);

        let c = current.item("411003").unwrap();
        assert_eq!(c.amount_current_period, Decimal::ZERO);
        assert_eq!(c.variation, Some(dec!(-80)));
    }
}
