use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::asset::AssetClass;
use super::irs::Dollars;

/// Family-wide balances produced by one aggregation pass.
///
/// Built from zero on every pass and never updated incrementally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Total value of every account (after transactions)
    pub total_value: f64,

    pub stock_balance: f64,
    pub international_stock_balance: f64,
    pub bond_balance: f64,
    pub cash_balance: f64,
    /// Unclassified holdings and unassigned shares of blended funds
    pub other_balance: f64,

    /// Value-weighted expense ratio of the whole portfolio, in percent
    pub overall_expense_ratio: f64,

    /// Yearly fund expenses in dollars
    pub expenses_total: f64,

    /// Funds/ETFs without a recorded expense ratio (data-quality signal)
    pub investments_missing_expense_ratio: usize,

    /// Per-holding share of the portfolio, in account order
    pub holdings: Vec<HoldingShare>,
}

impl PortfolioTotals {
    pub fn balance(&self, class: AssetClass) -> f64 {
        match class {
            AssetClass::Stock => self.stock_balance,
            AssetClass::InternationalStock => self.international_stock_balance,
            AssetClass::Bond => self.bond_balance,
            AssetClass::Cash => self.cash_balance,
            AssetClass::Other => self.other_balance,
        }
    }

    pub fn add_to_balance(&mut self, class: AssetClass, amount: f64) {
        match class {
            AssetClass::Stock => self.stock_balance += amount,
            AssetClass::InternationalStock => self.international_stock_balance += amount,
            AssetClass::Bond => self.bond_balance += amount,
            AssetClass::Cash => self.cash_balance += amount,
            AssetClass::Other => self.other_balance += amount,
        }
    }

    /// Sum of every class balance.
    pub fn balances_total(&self) -> f64 {
        AssetClass::ALL.iter().map(|c| self.balance(*c)).sum()
    }

    /// Share of `class` in the classified total, in percent (0 when empty).
    pub fn allocation_pct(&self, class: AssetClass) -> f64 {
        let total = self.balances_total();
        if total.abs() > f64::EPSILON {
            self.balance(class) / total * 100.0
        } else {
            0.0
        }
    }
}

/// One holding's share of the whole portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingShare {
    pub account_id: Uuid,
    pub ticker: String,
    /// Holding value / total portfolio value × 100
    pub percentage: f64,
}

/// Contribution ceilings for one person. `None` means "needs more info".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSummary {
    pub person_index: usize,

    pub hsa_limit: Option<Dollars>,
    pub hsa_amount_to_save: Option<Dollars>,

    pub roth_ira_maximum_by_age: Option<Dollars>,
    pub roth_ira_contribution_allowed: Option<Dollars>,
    pub roth_ira_amount_to_save: Option<Dollars>,

    pub ira_maximum_by_age: Option<Dollars>,
    pub ira_amount_to_save: Option<Dollars>,

    pub employer_plan_limit: Option<Dollars>,
    pub employer_plan_amount_to_save: Option<Dollars>,
}

/// Everything one recompute pass produces, computed from a single snapshot
/// of the household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningSnapshot {
    pub tax_year: i32,
    pub totals: PortfolioTotals,
    pub contributions: Vec<ContributionSummary>,
}
