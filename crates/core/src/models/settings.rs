use serde::{Deserialize, Serialize};

/// Newest tax year covered by the built-in IRS tables.
pub const LATEST_TAX_YEAR: i32 = 2025;

/// How a transaction's custom value combines with its host holding's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionPolicy {
    /// Every transaction delta is added on top of the holding's value.
    #[default]
    Additive,
    /// Only the last transaction applies: the holding shows its position after that transaction.
    Replace,
}

/// User-configurable settings, stored inside the household snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Tax year whose IRS tables drive every contribution limit.
    pub tax_year: i32,

    /// Applied consistently to account values and category totals.
    pub transaction_policy: TransactionPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tax_year: LATEST_TAX_YEAR,
            transaction_policy: TransactionPolicy::default(),
        }
    }
}
