//! Prefix lookup table for the OHADA chart of accounts.

use super::types::ResultLayer;

/// Placement rule attached to a code prefix.
///
/// Sign-dependent rules (`ThirdParty`, `Treasury`) are resolved into a
/// bucket by the classifier once the net balance is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Capital and reserves.
    Equity,
    /// Borrowings.
    FinancialDebt,
    /// Fixed asset (gross).
    FixedAsset,
    /// Depreciation or impairment of a fixed asset heading.
    FixedAssetContra,
    /// Stocks.
    Inventory,
    /// Suppliers: always a payable.
    Payable,
    /// Other third parties: receivable or payable depending on sign.
    ThirdParty,
    /// Bank and cash: cash or overdraft depending on sign.
    Treasury,
    /// Expense account.
    Expense(ResultLayer),
    /// Revenue account.
    Revenue(ResultLayer),
}

/// Sorted `(prefix, rule)` table queried by longest-prefix match.
#[derive(Debug, Clone)]
pub struct PrefixTable {
    entries: Vec<(String, Rule)>,
    max_prefix_len: usize,
}

impl PrefixTable {
    /// Builds a table from arbitrary entries.
    ///
    /// When a prefix appears twice, the last entry wins.
    #[must_use]
    pub fn new<P: Into<String>>(entries: impl IntoIterator<Item = (P, Rule)>) -> Self {
        let mut entries: Vec<(String, Rule)> =
            entries.into_iter().map(|(p, r)| (p.into(), r)).collect();
        // Stable sort keeps insertion order among equal prefixes; keep the last.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let mut deduped: Vec<(String, Rule)> = Vec::with_capacity(entries.len());
        for entry in entries {
            match deduped.last_mut() {
                Some(last) if last.0 == entry.0 => *last = entry,
                _ => deduped.push(entry),
            }
        }
        let max_prefix_len = deduped.iter().map(|(p, _)| p.len()).max().unwrap_or(0);

        Self {
            entries: deduped,
            max_prefix_len,
        }
    }

    /// The OHADA (SYSCOHADA) placement rules.
    #[must_use]
    pub fn ohada() -> Self {
        use ResultLayer::{Extraordinary, Financial, Operating};

        let mut entries: Vec<(String, Rule)> = Vec::new();
        let mut range = |from: u8, to: u8, rule: Rule| {
            for n in from..=to {
                entries.push((n.to_string(), rule));
            }
        };

        range(10, 15, Rule::Equity);
        range(16, 19, Rule::FinancialDebt);
        range(20, 27, Rule::FixedAsset);
        range(28, 29, Rule::FixedAssetContra);
        range(30, 39, Rule::Inventory);
        range(40, 40, Rule::Payable);
        range(41, 49, Rule::ThirdParty);
        range(50, 59, Rule::Treasury);
        range(60, 65, Rule::Expense(Operating));
        range(66, 67, Rule::Expense(Financial));
        range(68, 69, Rule::Expense(Extraordinary));
        range(70, 75, Rule::Revenue(Operating));
        range(76, 77, Rule::Revenue(Financial));
        range(78, 79, Rule::Revenue(Extraordinary));
        for n in [82u8, 84, 86, 88] {
            range(n, n, Rule::Revenue(Extraordinary));
        }
        for n in [81u8, 83, 85, 87, 89] {
            range(n, n, Rule::Expense(Extraordinary));
        }

        Self::new(entries)
    }

    /// Finds the rule of the longest prefix matching `code`.
    ///
    /// Codes must be at least two ASCII digits long; anything else has no rule.
    #[must_use]
    pub fn lookup(&self, code: &str) -> Option<(&str, Rule)> {
        if code.len() < 2 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        (1..=code.len().min(self.max_prefix_len))
            .rev()
            .find_map(|len| {
                let candidate = &code[..len];
                self.entries
                    .binary_search_by(|(prefix, _)| prefix.as_str().cmp(candidate))
                    .ok()
                    .map(|idx| (self.entries[idx].0.as_str(), self.entries[idx].1))
            })
    }

    /// Number of prefixes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no prefix.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PrefixTable {
    fn default() -> Self {
        Self::ohada()
    }
}

/// Two-digit balance sheet heading a class-2 account is presented under.
///
/// Base accounts use their own first two digits; contra accounts `28k...`
/// and `29k...` map to heading `2k`. Returns `None` for codes that are not
/// class 2 or for contra codes too short to name a heading.
#[must_use]
pub fn fixed_asset_heading(code: &str) -> Option<String> {
    let bytes = code.as_bytes();
    match bytes {
        [b'2', b'8' | b'9', third, ..] if third.is_ascii_digit() => {
            Some(format!("2{}", char::from(*third)))
        }
        [b'2', b'8' | b'9', ..] => None,
        [b'2', second, ..] if second.is_ascii_digit() => Some(code[..2].to_string()),
        _ => None,
    }
}

/// Label of a fixed-asset heading.
#[must_use]
pub fn heading_label(heading: &str) -> &'static str {
    match heading {
        "20" => "Capitalised charges",
        "21" => "Intangible assets",
        "22" => "Land",
        "23" => "Buildings, installations and fixtures",
        "24" => "Equipment, furniture and biological assets",
        "25" => "Advances paid on fixed assets",
        "26" => "Equity investments",
        "27" => "Other financial assets",
        _ => "Fixed assets",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ohada_table_covers_expected_prefixes() {
        let table = PrefixTable::ohada();
        // 10-79 plus 81-89.
        assert_eq!(table.len(), 70 + 9);
    }

    #[test]
    fn test_longest_prefix_wins() {
        let table = PrefixTable::new([
            ("4", Rule::ThirdParty),
            ("40", Rule::Payable),
            ("409", Rule::ThirdParty),
        ]);
        assert_eq!(table.lookup("401100"), Some(("40", Rule::Payable)));
        assert_eq!(table.lookup("409000"), Some(("409", Rule::ThirdParty)));
        assert_eq!(table.lookup("411000"), Some(("4", Rule::ThirdParty)));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let table = PrefixTable::new([("60", Rule::Equity), ("60", Rule::Inventory)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("601"), Some(("60", Rule::Inventory)));
    }

    #[test]
    fn test_rejects_short_and_non_numeric_codes() {
        let table = PrefixTable::ohada();
        assert_eq!(table.lookup(""), None);
        assert_eq!(table.lookup("4"), None);
        assert_eq!(table.lookup("41A001"), None);
        assert_eq!(table.lookup("801000"), None);
        assert_eq!(table.lookup("901000"), None);
    }

    #[test]
    fn test_fixed_asset_heading() {
        assert_eq!(fixed_asset_heading("211000").as_deref(), Some("21"));
        assert_eq!(fixed_asset_heading("281100").as_deref(), Some("21"));
        assert_eq!(fixed_asset_heading("2845").as_deref(), Some("24"));
        assert_eq!(fixed_asset_heading("29").as_deref(), None);
        assert_eq!(fixed_asset_heading("411000"), None);
    }
}
