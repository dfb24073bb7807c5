use crate::models::irs::{EmployerPlanLimits, HsaLimits, IraLimits, RothIraLimits};

/// Source of IRS contribution-limit tables, keyed by tax year.
///
/// Implementations return `None` for a year (or a table) they do not carry.
/// Calculators treat that as "unknown" and never substitute a guessed number.
/// Lookups are synchronous: tables are read-only data loaded up front.
pub trait IrsTableProvider: Send + Sync {
    /// Human-readable name of this provider (for logs).
    fn name(&self) -> &str;

    fn hsa_limits(&self, tax_year: i32) -> Option<HsaLimits>;

    fn roth_ira_limits(&self, tax_year: i32) -> Option<RothIraLimits>;

    fn ira_limits(&self, tax_year: i32) -> Option<IraLimits>;

    fn employer_plan_limits(&self, tax_year: i32) -> Option<EmployerPlanLimits>;

    /// Tax years this provider has any table for, ascending.
    fn supported_years(&self) -> Vec<i32>;
}
