use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::household::{FilingStatus, Household};
use crate::models::irs::{Dollars, PhaseOutRange, RothIraLimits};
use crate::providers::traits::IrsTableProvider;

/// Roth IRA contribution limits, including the income phase-out.
pub struct RothIraService;

impl RothIraService {
    pub fn new() -> Self {
        Self
    }

    /// Base limit plus the age-50 catch-up. `None` without a Roth table.
    pub fn maximum_contribution_by_age(
        &self,
        household: &Household,
        tables: &dyn IrsTableProvider,
        person_index: usize,
    ) -> Result<Option<Dollars>, CoreError> {
        let person = household.person(person_index)?;
        let tax_year = household.settings.tax_year;
        Ok(self
            .limits(tables, tax_year)
            .map(|limits| Self::maximum_for(&limits, person.is_fifty_or_over(tax_year))))
    }

    /// What the person may contribute after the income phase-out.
    ///
    /// `None` until the person is part of the household and income is known,
    /// while the filing status is still undecided, or when the table for the
    /// applicable filing status is missing.
    pub fn contribution_allowed(
        &self,
        household: &Household,
        tables: &dyn IrsTableProvider,
        person_index: usize,
    ) -> Result<Option<Dollars>, CoreError> {
        if person_index > 1 {
            return Err(CoreError::InvalidPersonIndex(person_index));
        }
        if household.person_count() <= person_index {
            return Ok(None);
        }
        let Some(income) = household.adjusted_gross_income else {
            return Ok(None);
        };

        let person = household.person(person_index)?;
        let tax_year = household.settings.tax_year;
        let Some(limits) = self.limits(tables, tax_year) else {
            return Ok(None);
        };
        let Some(ranges) = limits.contribution_phase_out_range else {
            warn!("Roth IRA: no phase-out ranges for tax year {tax_year}");
            return Ok(None);
        };

        let range: Option<PhaseOutRange> = match household.filing_status {
            FilingStatus::Single | FilingStatus::HeadOfHousehold => ranges.single,
            FilingStatus::MarriedFilingJointly => ranges.married_filing_jointly,
            // Spouses who lived apart all year use the single range.
            FilingStatus::MarriedFilingSeparately if household.living_separately => ranges.single,
            FilingStatus::MarriedFilingSeparately => ranges.married_filing_separately,
            FilingStatus::ChoiceNeeded => return Ok(None),
        };
        let Some(range) = range else {
            warn!(
                "Roth IRA: no phase-out range for {} in tax year {tax_year}",
                household.filing_status
            );
            return Ok(None);
        };

        let maximum = Self::maximum_for(&limits, person.is_fifty_or_over(tax_year));
        let allowed = apply_range(range.start, range.end, income, maximum);
        debug!(
            "Roth IRA: person {person_index}, income {income}, range {}..{} → {allowed} of {maximum}",
            range.start, range.end
        );
        Ok(Some(allowed))
    }

    /// Same as [`Self::contribution_allowed`].
    pub fn amount_to_save(
        &self,
        household: &Household,
        tables: &dyn IrsTableProvider,
        person_index: usize,
    ) -> Result<Option<Dollars>, CoreError> {
        self.contribution_allowed(household, tables, person_index)
    }

    fn limits(&self, tables: &dyn IrsTableProvider, tax_year: i32) -> Option<RothIraLimits> {
        let limits = tables.roth_ira_limits(tax_year);
        if limits.is_none() {
            warn!("Roth IRA: no limits for tax year {tax_year} from {}", tables.name());
        }
        limits
    }

    fn maximum_for(limits: &RothIraLimits, catch_up_eligible: bool) -> Dollars {
        limits.contribution_limit
            + if catch_up_eligible {
                limits.catch_up_contribution_limit
            } else {
                0
            }
    }
}

impl Default for RothIraService {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear phase-out of `max_allowed` over the income range `low..high`.
///
/// At or below `low` the full amount is allowed, at or above `high` nothing.
/// In between the amount shrinks proportionally, in whole dollars rounded
/// toward zero.
pub fn apply_range(low: Dollars, high: Dollars, income: Dollars, max_allowed: Dollars) -> Dollars {
    if income <= low {
        return max_allowed;
    }
    if income >= high {
        return 0;
    }
    max_allowed * (high - income) / (high - low)
}
