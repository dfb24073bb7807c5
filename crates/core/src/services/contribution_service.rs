use crate::errors::CoreError;
use crate::models::analytics::ContributionSummary;
use crate::models::household::Household;
use crate::providers::traits::IrsTableProvider;
use crate::services::hsa_service::HsaService;
use crate::services::retirement_plan_service::RetirementPlanService;
use crate::services::roth_ira_service::RothIraService;

/// Collects every contribution limit for every person in the household.
pub struct ContributionService {
    hsa_service: HsaService,
    roth_ira_service: RothIraService,
    retirement_plan_service: RetirementPlanService,
}

impl ContributionService {
    pub fn new() -> Self {
        Self {
            hsa_service: HsaService::new(),
            roth_ira_service: RothIraService::new(),
            retirement_plan_service: RetirementPlanService::new(),
        }
    }

    /// One summary per person, in household order.
    ///
    /// Unknown limits stay `None`; only a corrupt household is an error.
    pub fn summarize(
        &self,
        household: &Household,
        tables: &dyn IrsTableProvider,
    ) -> Result<Vec<ContributionSummary>, CoreError> {
        household.validate()?;
        (0..household.person_count())
            .map(|index| self.summarize_person(household, tables, index))
            .collect()
    }

    pub fn summarize_person(
        &self,
        household: &Household,
        tables: &dyn IrsTableProvider,
        person_index: usize,
    ) -> Result<ContributionSummary, CoreError> {
        Ok(ContributionSummary {
            person_index,
            hsa_limit: self.hsa_service.limit(household, tables, person_index)?,
            hsa_amount_to_save: self
                .hsa_service
                .amount_to_save(household, tables, person_index)?,
            roth_ira_maximum_by_age: self
                .roth_ira_service
                .maximum_contribution_by_age(household, tables, person_index)?,
            roth_ira_contribution_allowed: self
                .roth_ira_service
                .contribution_allowed(household, tables, person_index)?,
            roth_ira_amount_to_save: self
                .roth_ira_service
                .amount_to_save(household, tables, person_index)?,
            ira_maximum_by_age: self
                .retirement_plan_service
                .ira_maximum_by_age(household, tables, person_index)?,
            ira_amount_to_save: self
                .retirement_plan_service
                .ira_amount_to_save(household, tables, person_index)?,
            employer_plan_limit: self
                .retirement_plan_service
                .employer_plan_limit(household, tables, person_index)?,
            employer_plan_amount_to_save: self
                .retirement_plan_service
                .employer_plan_amount_to_save(household, tables, person_index)?,
        })
    }
}

impl Default for ContributionService {
    fn default() -> Self {
        Self::new()
    }
}
