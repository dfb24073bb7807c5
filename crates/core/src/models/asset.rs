use serde::{Deserialize, Serialize};

/// The type/category of a holding.
/// Determines which balance bucket the holding's value lands in.
///
/// Serialized names keep the underscore suffixes (`USStock_ETF`) used by
/// existing profile snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    Cash,
    #[serde(rename = "Cash_BankAccount")]
    CashBankAccount,
    #[serde(rename = "Cash_MoneyMarket")]
    CashMoneyMarket,
    Stock,
    #[serde(rename = "USStock")]
    UsStock,
    #[serde(rename = "USStock_ETF")]
    UsStockEtf,
    #[serde(rename = "USStock_Fund")]
    UsStockFund,
    InternationalStock,
    #[serde(rename = "InternationalStock_ETF")]
    InternationalStockEtf,
    #[serde(rename = "InternationalStock_Fund")]
    InternationalStockFund,
    Bond,
    #[serde(rename = "Bond_ETF")]
    BondEtf,
    #[serde(rename = "Bond_Fund")]
    BondFund,
    IBond,
    InternationalBond,
    #[serde(rename = "InternationalBond_ETF")]
    InternationalBondEtf,
    #[serde(rename = "InternationalBond_Fund")]
    InternationalBondFund,
    /// Target-date / balanced ETF whose value is split by a recorded allocation
    #[serde(rename = "StocksAndBonds_ETF")]
    StocksAndBondsEtf,
    /// Target-date / balanced mutual fund whose value is split by a recorded allocation
    #[serde(rename = "StocksAndBonds_Fund")]
    StocksAndBondsFund,
    Unknown,
}

impl AssetType {
    pub const ALL: [AssetType; 20] = [
        AssetType::Cash,
        AssetType::CashBankAccount,
        AssetType::CashMoneyMarket,
        AssetType::Stock,
        AssetType::UsStock,
        AssetType::UsStockEtf,
        AssetType::UsStockFund,
        AssetType::InternationalStock,
        AssetType::InternationalStockEtf,
        AssetType::InternationalStockFund,
        AssetType::Bond,
        AssetType::BondEtf,
        AssetType::BondFund,
        AssetType::IBond,
        AssetType::InternationalBond,
        AssetType::InternationalBondEtf,
        AssetType::InternationalBondFund,
        AssetType::StocksAndBondsEtf,
        AssetType::StocksAndBondsFund,
        AssetType::Unknown,
    ];

    /// The balance bucket a non-blended holding belongs to.
    /// Returns `None` for blended types, whose value is split instead.
    pub fn class(&self) -> Option<AssetClass> {
        match self {
            AssetType::Stock
            | AssetType::UsStock
            | AssetType::UsStockEtf
            | AssetType::UsStockFund => Some(AssetClass::Stock),
            AssetType::InternationalStock
            | AssetType::InternationalStockEtf
            | AssetType::InternationalStockFund => Some(AssetClass::InternationalStock),
            AssetType::Bond
            | AssetType::BondEtf
            | AssetType::BondFund
            | AssetType::IBond
            | AssetType::InternationalBond
            | AssetType::InternationalBondEtf
            | AssetType::InternationalBondFund => Some(AssetClass::Bond),
            AssetType::Cash | AssetType::CashBankAccount | AssetType::CashMoneyMarket => {
                Some(AssetClass::Cash)
            }
            AssetType::Unknown => Some(AssetClass::Other),
            AssetType::StocksAndBondsEtf | AssetType::StocksAndBondsFund => None,
        }
    }

    pub fn is_blended(&self) -> bool {
        matches!(self, AssetType::StocksAndBondsEtf | AssetType::StocksAndBondsFund)
    }

    pub fn is_cash(&self) -> bool {
        matches!(
            self,
            AssetType::Cash | AssetType::CashBankAccount | AssetType::CashMoneyMarket
        )
    }

    pub fn is_etf(&self) -> bool {
        matches!(
            self,
            AssetType::UsStockEtf
                | AssetType::InternationalStockEtf
                | AssetType::BondEtf
                | AssetType::InternationalBondEtf
                | AssetType::StocksAndBondsEtf
        )
    }

    pub fn is_fund(&self) -> bool {
        matches!(
            self,
            AssetType::UsStockFund
                | AssetType::InternationalStockFund
                | AssetType::BondFund
                | AssetType::InternationalBondFund
                | AssetType::StocksAndBondsFund
        )
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AssetType::Cash => "Cash",
            AssetType::CashBankAccount => "Cash (Bank Account)",
            AssetType::CashMoneyMarket => "Cash (Money Market)",
            AssetType::Stock => "Stock",
            AssetType::UsStock => "US Stock",
            AssetType::UsStockEtf => "US Stock ETF",
            AssetType::UsStockFund => "US Stock Fund",
            AssetType::InternationalStock => "International Stock",
            AssetType::InternationalStockEtf => "International Stock ETF",
            AssetType::InternationalStockFund => "International Stock Fund",
            AssetType::Bond => "Bond",
            AssetType::BondEtf => "Bond ETF",
            AssetType::BondFund => "Bond Fund",
            AssetType::IBond => "I Bond",
            AssetType::InternationalBond => "International Bond",
            AssetType::InternationalBondEtf => "International Bond ETF",
            AssetType::InternationalBondFund => "International Bond Fund",
            AssetType::StocksAndBondsEtf => "Stocks and Bonds ETF",
            AssetType::StocksAndBondsFund => "Stocks and Bonds Fund",
            AssetType::Unknown => "Unknown",
        };
        write!(f, "{label}")
    }
}

/// Family-wide balance buckets used for allocation reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    Stock,
    InternationalStock,
    Bond,
    Cash,
    /// Unclassified holdings (`Unknown` or no asset type recorded)
    Other,
}

impl AssetClass {
    pub const ALL: [AssetClass; 5] = [
        AssetClass::Stock,
        AssetClass::InternationalStock,
        AssetClass::Bond,
        AssetClass::Cash,
        AssetClass::Other,
    ];
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetClass::Stock => write!(f, "Stock"),
            AssetClass::InternationalStock => write!(f, "International Stock"),
            AssetClass::Bond => write!(f, "Bond"),
            AssetClass::Cash => write!(f, "Cash"),
            AssetClass::Other => write!(f, "Other"),
        }
    }
}

/// Sub-allocation of a blended (stocks-and-bonds) fund, in percent (0–100).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlendedAllocation {
    pub us_stock: f64,
    pub international_stock: f64,
    pub bond: f64,
    pub international_bond: f64,
    pub cash: f64,
}

/// Allowed slack when checking that a blended allocation sums to 100%.
const ALLOCATION_TOLERANCE_PCT: f64 = 0.01;

impl BlendedAllocation {
    /// Sum of all recorded components, in percent.
    pub fn total_pct(&self) -> f64 {
        self.us_stock + self.international_stock + self.bond + self.international_bond + self.cash
    }

    /// True when the components account for the whole fund.
    pub fn is_complete(&self) -> bool {
        (self.total_pct() - 100.0).abs() <= ALLOCATION_TOLERANCE_PCT
    }

    /// Fraction (0..1) of the fund attributed to `class`.
    ///
    /// International bonds are reported inside the bond bucket. Any share the
    /// recorded components leave unassigned is attributed to `Other`.
    /// Components summing past 100% are scaled down to their own total, so
    /// the fractions always add up to 1.
    pub fn fraction(&self, class: AssetClass) -> f64 {
        let total = self.total_pct();
        let over_allocated = total > 100.0 + ALLOCATION_TOLERANCE_PCT;
        let pct = match class {
            AssetClass::Stock => self.us_stock,
            AssetClass::InternationalStock => self.international_stock,
            AssetClass::Bond => self.bond + self.international_bond,
            AssetClass::Cash => self.cash,
            AssetClass::Other if over_allocated || self.is_complete() => 0.0,
            AssetClass::Other => (100.0 - total).max(0.0),
        };
        if over_allocated {
            pct / total
        } else {
            pct / 100.0
        }
    }
}
