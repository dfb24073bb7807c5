use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::household::Household;
use crate::models::irs::Dollars;
use crate::models::person::{Coverage, TriState};
use crate::providers::traits::IrsTableProvider;

/// Health Savings Account contribution limits per person.
pub struct HsaService;

impl HsaService {
    pub fn new() -> Self {
        Self
    }

    /// Yearly HSA contribution limit for the person at `person_index`.
    ///
    /// - `None` when the person is not eligible and neither is their spouse.
    /// - Otherwise the self-only or family limit matching the coverage tier,
    ///   plus the catch-up amount from age 55. With no tier chosen yet the
    ///   catch-up alone is returned (when age-eligible).
    /// - `None` when no HSA table exists for the household's tax year.
    pub fn limit(
        &self,
        household: &Household,
        tables: &dyn IrsTableProvider,
        person_index: usize,
    ) -> Result<Option<Dollars>, CoreError> {
        let person = household.person(person_index)?;
        let spouse = household.spouse_of(person_index)?;

        if person.hsa.eligible == TriState::No && spouse.is_some_and(|s| s.hsa.not_eligible()) {
            debug!("HSA: person {person_index} and spouse both not eligible");
            return Ok(None);
        }

        let tax_year = household.settings.tax_year;
        let Some(limits) = tables.hsa_limits(tax_year) else {
            warn!("HSA: no limits for tax year {tax_year} from {}", tables.name());
            return Ok(None);
        };

        let base = person.hsa.family.map(|coverage| match coverage {
            Coverage::Family => limits.family,
            Coverage::SelfOnly => limits.self_only,
        });

        let limit = if person.is_fifty_five_or_over(tax_year) {
            Some(base.unwrap_or(0) + limits.catch_up)
        } else {
            base
        };

        Ok(limit)
    }

    /// Limit minus the employer's deposit (missing deposit counts as 0).
    ///
    /// Negative when the employer already covers more than the limit.
    pub fn amount_to_save(
        &self,
        household: &Household,
        tables: &dyn IrsTableProvider,
        person_index: usize,
    ) -> Result<Option<Dollars>, CoreError> {
        let limit = self.limit(household, tables, person_index)?;
        let employer = household
            .person(person_index)?
            .hsa
            .employer_contribution
            .unwrap_or(0);
        Ok(limit.map(|l| l - employer))
    }
}

impl Default for HsaService {
    fn default() -> Self {
        Self::new()
    }
}
