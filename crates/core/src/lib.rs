pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use log::{debug, info};
use models::{
    account::Account,
    analytics::{ContributionSummary, PlanningSnapshot, PortfolioTotals},
    household::{FilingStatus, Household},
    investment::Investment,
    pension::Pension,
    person::Person,
    settings::{Settings, TransactionPolicy},
};
use providers::{registry::IrsTableRegistry, traits::IrsTableProvider};
use services::{aggregation_service::AggregationService, contribution_service::ContributionService};
use storage::{manager::ProfileManager, traits::ProfileStore};
use uuid::Uuid;

use errors::CoreError;

/// Main entry point for the household planner core library.
/// Holds the household graph, the IRS tables and all services needed to operate on it.
#[must_use]
pub struct HouseholdPlanner {
    household: Household,
    tables: Box<dyn IrsTableProvider>,
    aggregation_service: AggregationService,
    contribution_service: ContributionService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for HouseholdPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HouseholdPlanner")
            .field("filing_status", &self.household.filing_status)
            .field("people", &self.household.people.len())
            .field("accounts", &self.household.accounts.len())
            .field("settings", &self.household.settings)
            .field("tables", &self.tables.name())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl HouseholdPlanner {
    /// Create a brand new household with the built-in IRS tables.
    pub fn create_new(filing_status: FilingStatus) -> Result<Self, CoreError> {
        let tables = IrsTableRegistry::new_with_defaults()?;
        Self::with_tables(Household::new(filing_status), Box::new(tables))
    }

    /// Wrap an existing household with a custom IRS table provider.
    /// A tax year the provider has no tables for moves to its newest year.
    pub fn with_tables(
        mut household: Household,
        tables: Box<dyn IrsTableProvider>,
    ) -> Result<Self, CoreError> {
        household.validate()?;
        let years = tables.supported_years();
        if !years.contains(&household.settings.tax_year) {
            if let Some(&latest) = years.last() {
                info!(
                    "no IRS tables for {}, using {} from {}",
                    household.settings.tax_year,
                    latest,
                    tables.name()
                );
                household.settings.tax_year = latest;
            }
        }
        Ok(Self {
            household,
            tables,
            aggregation_service: AggregationService::new(),
            contribution_service: ContributionService::new(),
            dirty: false,
        })
    }

    /// Load a profile from a store, using the built-in IRS tables.
    pub async fn load_profile(store: &dyn ProfileStore, key: &str) -> Result<Self, CoreError> {
        let household = ProfileManager::load(store, key).await?;
        let tables = IrsTableRegistry::new_with_defaults()?;
        Self::with_tables(household, Box::new(tables))
    }

    /// Save the household under `key`. Clears the unsaved-changes flag on success.
    pub async fn save_profile(
        &mut self,
        store: &dyn ProfileStore,
        key: &str,
    ) -> Result<(), CoreError> {
        ProfileManager::save(store, key, &self.household).await?;
        self.dirty = false;
        Ok(())
    }

    /// Serialize the household snapshot to JSON.
    pub fn to_json(&self) -> Result<String, CoreError> {
        ProfileManager::to_json(&self.household)
    }

    #[must_use]
    pub fn household(&self) -> &Household {
        &self.household
    }

    #[must_use]
    pub fn tables(&self) -> &dyn IrsTableProvider {
        self.tables.as_ref()
    }

    /// Check whether there are unsaved changes since the last save/load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.household.settings
    }

    /// Switch the tax year. Only years the IRS table provider knows are accepted.
    pub fn set_tax_year(&mut self, tax_year: i32) -> Result<(), CoreError> {
        if !self.tables.supported_years().contains(&tax_year) {
            return Err(CoreError::TaxTableUnavailable(tax_year));
        }
        self.household.settings.tax_year = tax_year;
        self.dirty = true;
        Ok(())
    }

    pub fn set_transaction_policy(&mut self, policy: TransactionPolicy) {
        self.household.settings.transaction_policy = policy;
        self.dirty = true;
    }

    // ── Household & People ──────────────────────────────────────────

    /// Change the filing status; the second person is added or dropped to match.
    pub fn set_filing_status(&mut self, filing_status: FilingStatus) {
        self.household.set_filing_status(filing_status);
        self.dirty = true;
    }

    pub fn set_living_separately(&mut self, living_separately: bool) -> Result<(), CoreError> {
        if living_separately && self.household.filing_status != FilingStatus::MarriedFilingSeparately {
            return Err(CoreError::ValidationError(
                "Living separately only applies when married filing separately".into(),
            ));
        }
        self.household.living_separately = living_separately;
        self.dirty = true;
        Ok(())
    }

    /// Set (or clear) the household's adjusted gross income in dollars.
    pub fn set_adjusted_gross_income(&mut self, income: Option<i64>) -> Result<(), CoreError> {
        if income.is_some_and(|i| i < 0) {
            return Err(CoreError::ValidationError(
                "Adjusted gross income must not be negative".into(),
            ));
        }
        self.household.adjusted_gross_income = income;
        self.dirty = true;
        Ok(())
    }

    pub fn person(&self, index: usize) -> Result<&Person, CoreError> {
        self.household.person(index)
    }

    /// Edit one person in place.
    pub fn update_person(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut Person),
    ) -> Result<(), CoreError> {
        let person = self.household.person_mut(index)?;
        edit(person);
        person.index = index;
        self.dirty = true;
        Ok(())
    }

    pub fn add_pension(&mut self, pension: Pension) {
        self.household.pensions.push(pension);
        self.dirty = true;
    }

    // ── Account Management ──────────────────────────────────────────

    /// Add an account. Its owner must be a person in the household.
    pub fn add_account(&mut self, account: Account) -> Result<Uuid, CoreError> {
        if let Some(index) = account.owner.person_index() {
            self.household.person(index)?;
        }
        let id = account.id;
        self.household.accounts.push(account);
        self.dirty = true;
        Ok(id)
    }

    pub fn remove_account(&mut self, account_id: Uuid) -> Result<Account, CoreError> {
        let idx = self
            .household
            .accounts
            .iter()
            .position(|a| a.id == account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;
        self.dirty = true;
        Ok(self.household.accounts.remove(idx))
    }

    /// Edit one account in place.
    pub fn update_account(
        &mut self,
        account_id: Uuid,
        edit: impl FnOnce(&mut Account),
    ) -> Result<(), CoreError> {
        let account = self
            .household
            .account_mut(account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;
        edit(account);
        self.dirty = true;
        Ok(())
    }

    pub fn add_investment(
        &mut self,
        account_id: Uuid,
        investment: Investment,
    ) -> Result<(), CoreError> {
        self.update_account(account_id, |a| a.investments.push(investment))
    }

    #[must_use]
    pub fn get_account(&self, account_id: Uuid) -> Option<&Account> {
        self.household.account(account_id)
    }

    /// Accounts ordered for a portfolio review.
    #[must_use]
    pub fn accounts_in_review_order(&self) -> Vec<&Account> {
        self.household.accounts_in_review_order()
    }

    pub fn account_value(&self, account_id: Uuid) -> Result<f64, CoreError> {
        let account = self
            .get_account(account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;
        Ok(account.value(self.household.settings.transaction_policy))
    }

    /// Cost basis of one account; `Ok(None)` means it cannot be determined.
    pub fn account_cost_basis(&self, account_id: Uuid) -> Result<Option<f64>, CoreError> {
        let account = self
            .get_account(account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;
        Ok(account.calculate_cost_basis())
    }

    // ── Calculations ────────────────────────────────────────────────

    /// Family-wide balances per asset class.
    #[must_use]
    pub fn portfolio_totals(&self) -> PortfolioTotals {
        self.aggregation_service.aggregate(&self.household)
    }

    /// Contribution limits for every person.
    pub fn contribution_summaries(&self) -> Result<Vec<ContributionSummary>, CoreError> {
        self.contribution_service
            .summarize(&self.household, self.tables.as_ref())
    }

    /// Recompute every derived figure from the current household.
    pub fn recompute(&self) -> Result<PlanningSnapshot, CoreError> {
        let contributions = self.contribution_summaries()?;
        let totals = self.portfolio_totals();
        debug!(
            "recomputed tax year {}: total value {:.2}, {} contribution summaries",
            self.household.settings.tax_year,
            totals.total_value,
            contributions.len()
        );
        Ok(PlanningSnapshot {
            tax_year: self.household.settings.tax_year,
            totals,
            contributions,
        })
    }
}
