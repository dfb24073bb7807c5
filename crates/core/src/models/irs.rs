use serde::{Deserialize, Serialize};

/// Whole US dollars, the unit of every IRS limit and income threshold.
pub type Dollars = i64;

/// HSA contribution limits for one tax year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HsaLimits {
    pub self_only: Dollars,
    pub family: Dollars,
    /// Extra allowance from age 55
    pub catch_up: Dollars,
}

/// Income interval over which a contribution limit shrinks linearly to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseOutRange {
    pub start: Dollars,
    pub end: Dollars,
}

/// Roth IRA phase-out ranges by filing status. Any of them may be missing
/// from a partial table; calculators fail closed in that case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhaseOutRanges {
    pub single: Option<PhaseOutRange>,
    pub married_filing_jointly: Option<PhaseOutRange>,
    pub married_filing_separately: Option<PhaseOutRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RothIraLimits {
    pub contribution_limit: Dollars,
    /// Extra allowance from age 50
    pub catch_up_contribution_limit: Dollars,
    #[serde(default)]
    pub contribution_phase_out_range: Option<PhaseOutRanges>,
}

/// Traditional IRA limits (shared with Roth IRA contributions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IraLimits {
    pub contribution_limit: Dollars,
    pub catch_up_contribution_limit: Dollars,
}

/// 401(k)/403(b)/457(b) elective deferral limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerPlanLimits {
    pub elective_deferral_limit: Dollars,
    pub catch_up_limit: Dollars,
}

/// Every table published for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrsYearTable {
    pub tax_year: i32,
    #[serde(default)]
    pub hsa: Option<HsaLimits>,
    #[serde(default)]
    pub roth_ira: Option<RothIraLimits>,
    #[serde(default)]
    pub ira: Option<IraLimits>,
    #[serde(default)]
    pub employer_plan: Option<EmployerPlanLimits>,
}
