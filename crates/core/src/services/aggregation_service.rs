use log::{debug, warn};

use crate::models::account::Account;
use crate::models::analytics::{HoldingShare, PortfolioTotals};
use crate::models::asset::AssetClass;
use crate::models::household::Household;
use crate::models::investment::Investment;
use crate::models::settings::TransactionPolicy;

/// Rolls every account's holdings up into family-wide balances per asset class.
///
/// Pure business logic: each pass starts from zeroed totals and returns them,
/// so running it twice on an unchanged household gives identical results.
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Run one full aggregation pass over the household.
    pub fn aggregate(&self, household: &Household) -> PortfolioTotals {
        let policy = household.settings.transaction_policy;
        let total_value = household.total_value();

        let mut totals = PortfolioTotals {
            total_value,
            ..PortfolioTotals::default()
        };

        for account in &household.accounts {
            self.update_percentages(account, total_value, policy, &mut totals);
        }

        debug!(
            "aggregated {} accounts: total {:.2}, stock {:.2}, intl {:.2}, bond {:.2}, cash {:.2}, other {:.2}, missing ER {}",
            household.accounts.len(),
            totals.total_value,
            totals.stock_balance,
            totals.international_stock_balance,
            totals.bond_balance,
            totals.cash_balance,
            totals.other_balance,
            totals.investments_missing_expense_ratio,
        );

        totals
    }

    /// Fold one account's holdings into `totals`.
    ///
    /// For every holding:
    /// - record its share of `total_value`
    /// - route its value (and its transactions, per `policy`) into the class balances
    /// - accumulate the weighted expense ratio, or count it as missing for funds/ETFs
    pub fn update_percentages(
        &self,
        account: &Account,
        total_value: f64,
        policy: TransactionPolicy,
        totals: &mut PortfolioTotals,
    ) {
        for investment in &account.investments {
            let percentage = if total_value.abs() > f64::EPSILON {
                investment.value.unwrap_or(0.0) / total_value * 100.0
            } else {
                0.0
            };
            totals.holdings.push(HoldingShare {
                account_id: account.id,
                ticker: investment.ticker.clone(),
                percentage,
            });

            if investment.has_incomplete_allocation() {
                warn!(
                    "{} in '{}' has a blended allocation not summing to 100%; split adjusted",
                    investment.ticker,
                    account.title()
                );
            }

            for transaction in &investment.transactions {
                if account.transaction_host(investment, &transaction.host_ticker).is_none() {
                    warn!(
                        "transaction in '{}' targets unknown holding {}",
                        account.title(),
                        transaction.host_ticker
                    );
                }
            }

            match policy {
                TransactionPolicy::Additive => {
                    self.update_investment_category_totals(
                        investment,
                        investment.value.unwrap_or(0.0),
                        totals,
                    );
                    for transaction in &investment.transactions {
                        let host = account.transaction_host(investment, &transaction.host_ticker);
                        if let Some(delta) = transaction.custom_value(host) {
                            self.update_investment_category_totals(investment, delta, totals);
                        }
                    }
                }
                TransactionPolicy::Replace => {
                    let value = account.line_value(investment, policy);
                    self.update_investment_category_totals(investment, value, totals);
                }
            }

            match (investment.value, investment.expense_ratio) {
                (Some(value), Some(expense_ratio)) => {
                    totals.overall_expense_ratio += percentage / 100.0 * expense_ratio;
                    totals.expenses_total += value * expense_ratio / 100.0;
                }
                _ => {
                    if investment.expects_expense_ratio() {
                        totals.investments_missing_expense_ratio += 1;
                    }
                }
            }
        }
    }

    /// Add `value` to the balance of each class `investment` belongs to,
    /// split by [`Investment::get_percentage`] for blended funds.
    pub fn update_investment_category_totals(
        &self,
        investment: &Investment,
        value: f64,
        totals: &mut PortfolioTotals,
    ) {
        for class in AssetClass::ALL {
            let fraction = investment.get_percentage(class);
            if fraction != 0.0 {
                totals.add_to_balance(class, value * fraction);
            }
        }
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}
