//! Income statement builder.

use rust_decimal::Decimal;

use super::types::{IncomeStatement, LayeredSection, SalesRecord, StatementItem, StatementSection};
use crate::classification::{Bucket, Classification, ResultLayer};

/// Builds the income statement from classified balances.
pub struct IncomeStatementBuilder;

impl IncomeStatementBuilder {
    /// Income statement with no data.
    #[must_use]
    pub fn empty() -> IncomeStatement {
        IncomeStatement::default()
    }

    /// Builds the income statement.
    ///
    /// `additional_levy` is reported as is and kept out of the results.
    #[must_use]
    pub fn build(classification: &Classification, additional_levy: Decimal) -> IncomeStatement {
        let revenue = Self::layered(classification, Bucket::Revenue);
        let expenses = Self::layered(classification, Bucket::Expense);

        let result_operating = revenue.operating.total - expenses.operating.total;
        let result_financial = revenue.financial.total - expenses.financial.total;
        let result_extraordinary = revenue.extraordinary.total - expenses.extraordinary.total;
        let net_result = result_operating + result_financial + result_extraordinary;

        IncomeStatement {
            revenue,
            expenses,
            result_operating,
            result_financial,
            result_extraordinary,
            net_result,
            additional_levy,
            prior_results: None,
            has_data: !classification.balances.is_empty(),
        }
    }

    /// Sums the levy collected on sales dated within the period.
    #[must_use]
    pub fn additional_levy(
        records: &[SalesRecord],
        date_start: chrono::NaiveDate,
        date_end: chrono::NaiveDate,
    ) -> Decimal {
        records
            .iter()
            .filter(|r| r.date >= date_start && r.date <= date_end)
            .map(|r| r.levy_amount)
            .sum()
    }

    fn layered(classification: &Classification, bucket: fn(ResultLayer) -> Bucket) -> LayeredSection {
        let section = |layer: ResultLayer| {
            StatementSection::from_items(
                classification
                    .in_bucket(bucket(layer))
                    .map(|b| StatementItem::new(&b.account_code, &b.label, b.amount))
                    .collect(),
            )
        };

        let operating = section(ResultLayer::Operating);
        let financial = section(ResultLayer::Financial);
        let extraordinary = section(ResultLayer::Extraordinary);
        let total = operating.total + financial.total + extraordinary.total;

        LayeredSection {
            operating,
            financial,
            extraordinary,
            total,
        }
    }
}
