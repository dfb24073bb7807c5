use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Answer to a yes/no question the user may not have settled yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriState {
    #[default]
    ChoiceNeeded,
    Yes,
    No,
}

/// HSA coverage tier of the high-deductible health plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Coverage {
    SelfOnly,
    Family,
}

/// What a person has told us about their Health Savings Account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HsaElection {
    pub eligible: TriState,
    pub family: Option<Coverage>,
    /// Dollars the employer deposits this year
    pub employer_contribution: Option<i64>,
}

impl HsaElection {
    /// True unless eligibility has been confirmed; an open question counts as not eligible.
    pub fn not_eligible(&self) -> bool {
        match self.eligible {
            TriState::ChoiceNeeded | TriState::No => true,
            TriState::Yes => false,
        }
    }
}

/// What a person has told us about their workplace retirement plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployerPlanElection {
    /// Offered a plan and participating
    pub eligible: TriState,
}

/// Age at which IRA and employer-plan catch-up contributions start.
pub const RETIREMENT_CATCH_UP_AGE: i32 = 50;

/// Age at which HSA catch-up contributions start.
pub const HSA_CATCH_UP_AGE: i32 = 55;

/// One adult in the household.
///
/// The spouse is never stored here; it is looked up in the owning
/// [`Household`](super::household::Household) by the complementary index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// 0 for the first person, 1 for the spouse
    pub index: usize,

    #[serde(default)]
    pub name: Option<String>,

    /// When known, the age flags are derived from it
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,

    #[serde(default)]
    pub fifty_or_over: bool,

    #[serde(default)]
    pub fifty_five_or_over: bool,

    #[serde(default)]
    pub hsa: HsaElection,

    #[serde(default)]
    pub employer_plan: EmployerPlanElection,
}

impl Person {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            name: None,
            birth_date: None,
            fifty_or_over: false,
            fifty_five_or_over: false,
            hsa: HsaElection::default(),
            employer_plan: EmployerPlanElection::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Possessive label used as an account identifier (e.g., "Alex's").
    pub fn possessive_id(&self) -> Option<String> {
        self.name.as_ref().map(|n| format!("{n}'s"))
    }

    /// Age reached by December 31 of `tax_year`, the date the IRS uses for catch-up eligibility.
    pub fn age_at_year_end(&self, tax_year: i32) -> Option<i32> {
        self.birth_date.map(|b| tax_year - b.year())
    }

    /// Eligible for IRA and employer-plan catch-up contributions in `tax_year`.
    pub fn is_fifty_or_over(&self, tax_year: i32) -> bool {
        match self.age_at_year_end(tax_year) {
            Some(age) => age >= RETIREMENT_CATCH_UP_AGE,
            None => self.fifty_or_over,
        }
    }

    /// Eligible for HSA catch-up contributions in `tax_year`.
    pub fn is_fifty_five_or_over(&self, tax_year: i32) -> bool {
        match self.age_at_year_end(tax_year) {
            Some(age) => age >= HSA_CATCH_UP_AGE,
            None => self.fifty_five_or_over,
        }
    }
}
