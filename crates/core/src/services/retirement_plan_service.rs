use log::warn;

use crate::errors::CoreError;
use crate::models::household::Household;
use crate::models::irs::Dollars;
use crate::models::person::TriState;
use crate::providers::traits::IrsTableProvider;
use crate::services::roth_ira_service::RothIraService;

/// Traditional IRA and workplace plan (401(k)/403(b)/457(b)) limits.
pub struct RetirementPlanService {
    roth_ira_service: RothIraService,
}

impl RetirementPlanService {
    pub fn new() -> Self {
        Self {
            roth_ira_service: RothIraService::new(),
        }
    }

    /// Traditional IRA limit plus the age-50 catch-up.
    pub fn ira_maximum_by_age(
        &self,
        household: &Household,
        tables: &dyn IrsTableProvider,
        person_index: usize,
    ) -> Result<Option<Dollars>, CoreError> {
        let person = household.person(person_index)?;
        let tax_year = household.settings.tax_year;
        let Some(limits) = tables.ira_limits(tax_year) else {
            warn!("IRA: no limits for tax year {tax_year} from {}", tables.name());
            return Ok(None);
        };

        let catch_up = if person.is_fifty_or_over(tax_year) {
            limits.catch_up_contribution_limit
        } else {
            0
        };
        Ok(Some(limits.contribution_limit + catch_up))
    }

    /// Room left for Traditional IRA contributions.
    ///
    /// Traditional and Roth IRAs share one limit, so whatever the Roth phase-out
    /// allows is taken first. `None` when either figure is unknown.
    pub fn ira_amount_to_save(
        &self,
        household: &Household,
        tables: &dyn IrsTableProvider,
        person_index: usize,
    ) -> Result<Option<Dollars>, CoreError> {
        let Some(maximum) = self.ira_maximum_by_age(household, tables, person_index)? else {
            return Ok(None);
        };
        let Some(roth) = self
            .roth_ira_service
            .contribution_allowed(household, tables, person_index)?
        else {
            return Ok(None);
        };
        Ok(Some((maximum - roth).max(0)))
    }

    /// Elective-deferral limit plus the age-50 catch-up, for people in a plan.
    ///
    /// `None` until participation is confirmed, or without a table.
    pub fn employer_plan_limit(
        &self,
        household: &Household,
        tables: &dyn IrsTableProvider,
        person_index: usize,
    ) -> Result<Option<Dollars>, CoreError> {
        let person = household.person(person_index)?;
        if person.employer_plan.eligible != TriState::Yes {
            return Ok(None);
        }

        let tax_year = household.settings.tax_year;
        let Some(limits) = tables.employer_plan_limits(tax_year) else {
            warn!(
                "Employer plan: no limits for tax year {tax_year} from {}",
                tables.name()
            );
            return Ok(None);
        };

        let catch_up = if person.is_fifty_or_over(tax_year) {
            limits.catch_up_limit
        } else {
            0
        };
        Ok(Some(limits.elective_deferral_limit + catch_up))
    }

    /// The employee's own deferrals; employer matches do not count against it.
    pub fn employer_plan_amount_to_save(
        &self,
        household: &Household,
        tables: &dyn IrsTableProvider,
        person_index: usize,
    ) -> Result<Option<Dollars>, CoreError> {
        self.employer_plan_limit(household, tables, person_index)
    }
}

impl Default for RetirementPlanService {
    fn default() -> Self {
        Self::new()
    }
}
