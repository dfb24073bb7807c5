use serde::{Deserialize, Serialize};

use super::asset::{AssetClass, AssetType, BlendedAllocation};

/// Kind of pending adjustment recorded against a holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionKind {
    /// Add `value` to the host position
    Buy,
    /// Remove `value` from the host position
    Sell,
    /// Liquidate the whole host position
    SellAll,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Buy => write!(f, "Buy"),
            TransactionKind::Sell => write!(f, "Sell"),
            TransactionKind::SellAll => write!(f, "Sell All"),
        }
    }
}

/// A buy/sell/rebalance entry planned against a host holding.
///
/// Transactions never mutate the holding they target. They produce a value
/// delta (see [`Transaction::custom_value`]) that reporting layers apply on
/// top of the recorded position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Ticker of the holding this transaction adjusts (within the same account)
    pub host_ticker: String,

    pub kind: TransactionKind,

    /// Dollar amount for Buy/Sell; ignored for SellAll
    #[serde(default)]
    pub value: Option<f64>,

    #[serde(default)]
    pub note: Option<String>,
}

impl Transaction {
    pub fn buy(host_ticker: impl Into<String>, value: f64) -> Self {
        Self::new(host_ticker, TransactionKind::Buy, Some(value))
    }

    pub fn sell(host_ticker: impl Into<String>, value: f64) -> Self {
        Self::new(host_ticker, TransactionKind::Sell, Some(value))
    }

    pub fn sell_all(host_ticker: impl Into<String>) -> Self {
        Self::new(host_ticker, TransactionKind::SellAll, None)
    }

    fn new(host_ticker: impl Into<String>, kind: TransactionKind, value: Option<f64>) -> Self {
        Self {
            host_ticker: host_ticker.into().to_uppercase(),
            kind,
            value,
            note: None,
        }
    }

    /// Signed value delta this transaction applies to `host`.
    ///
    /// `None` when the delta cannot be determined: no amount recorded for a
    /// Buy/Sell, or no host (or host value) for a SellAll.
    pub fn custom_value(&self, host: Option<&Investment>) -> Option<f64> {
        match self.kind {
            TransactionKind::Buy => self.value,
            TransactionKind::Sell => self.value.map(|v| -v),
            TransactionKind::SellAll => host.and_then(|h| h.value).map(|v| -v),
        }
    }
}

/// A single holding inside an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    /// Ticker symbol, uppercased (e.g., "VTI", "VTSAX"); may be empty for bank accounts
    #[serde(default)]
    pub ticker: String,

    #[serde(default)]
    pub name: Option<String>,

    /// `None` means the holding has not been classified yet
    #[serde(default)]
    pub asset_type: Option<AssetType>,

    #[serde(default)]
    pub value: Option<f64>,

    #[serde(default)]
    pub cost_basis: Option<f64>,

    /// Annual expense ratio in percent (0.03 means 0.03%)
    #[serde(default)]
    pub expense_ratio: Option<f64>,

    /// Sub-allocation for blended (stocks-and-bonds) funds
    #[serde(default)]
    pub allocation: Option<BlendedAllocation>,

    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Investment {
    pub fn new(ticker: impl Into<String>, asset_type: Option<AssetType>, value: Option<f64>) -> Self {
        Self {
            ticker: ticker.into().to_uppercase(),
            name: None,
            asset_type,
            value,
            cost_basis: None,
            expense_ratio: None,
            allocation: None,
            transactions: Vec::new(),
        }
    }

    pub fn with_cost_basis(mut self, cost_basis: f64) -> Self {
        self.cost_basis = Some(cost_basis);
        self
    }

    pub fn with_expense_ratio(mut self, expense_ratio: f64) -> Self {
        self.expense_ratio = Some(expense_ratio);
        self
    }

    pub fn with_allocation(mut self, allocation: BlendedAllocation) -> Self {
        self.allocation = Some(allocation);
        self
    }

    pub fn with_transaction(mut self, transaction: Transaction) -> Self {
        self.transactions.push(transaction);
        self
    }

    pub fn is_cash(&self) -> bool {
        self.asset_type.is_some_and(|t| t.is_cash())
    }

    /// Funds and ETFs are expected to publish an expense ratio.
    pub fn expects_expense_ratio(&self) -> bool {
        self.asset_type.is_some_and(|t| t.is_etf() || t.is_fund())
    }

    /// Fraction (0..1) of this holding's value attributable to `class`.
    ///
    /// Non-blended holdings are wholly in their own class. Blended holdings
    /// use the recorded allocation; whatever it leaves unassigned (all of it,
    /// when nothing is recorded) counts as `Other`. The fractions across
    /// [`AssetClass::ALL`] always sum to 1.0 for allocations up to 100%.
    pub fn get_percentage(&self, class: AssetClass) -> f64 {
        let own_class = match self.asset_type {
            None => AssetClass::Other,
            Some(t) => match t.class() {
                Some(c) => c,
                None => {
                    return match &self.allocation {
                        Some(allocation) => allocation.fraction(class),
                        None => BlendedAllocation::default().fraction(class),
                    };
                }
            },
        };

        if own_class == class {
            1.0
        } else {
            0.0
        }
    }

    /// Blended holding whose allocation is missing or does not sum to 100%.
    pub fn has_incomplete_allocation(&self) -> bool {
        self.asset_type.is_some_and(|t| t.is_blended())
            && !self.allocation.as_ref().is_some_and(|a| a.is_complete())
    }
}
