use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::investment::Investment;
use super::settings::TransactionPolicy;

/// Kind of account, as chosen by the user.
///
/// Serialized as its display string. Legacy spellings (`401k`, `Roth 401k`, ...)
/// migrate to the current names when parsed; anything unrecognized is kept
/// verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountType {
    Plan401k,
    Plan403b,
    Plan457b,
    Plan457bGovernmental,
    SepIra,
    Solo401k,
    SimpleIra,
    AnnuityQualified,
    InheritedIra,
    TraditionalIra,
    RolloverIra,
    InheritedRothIra,
    Roth401k,
    RothIra,
    Hsa,
    AnnuityNonQualified,
    Brokerage,
    Individual,
    Taxable,
    RefundableDeposit,
    LifeInsurance,
    Plan529,
    Other(String),
}

/// Tax characterization of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaxType {
    /// Workplace pre-tax plans (401(k), 403(b), SEP, SIMPLE, ...)
    PreTaxWork,
    /// Other pre-tax accounts (Traditional/Rollover/Inherited IRA, qualified annuity)
    PreTaxOther,
    PostTax,
    Taxable,
    RefundableDeposits,
    ForBeneficiaries,
    EducationSavings,
    Other,
}

impl TaxType {
    pub fn is_pre_tax(&self) -> bool {
        matches!(self, TaxType::PreTaxWork | TaxType::PreTaxOther)
    }

    /// Coarse label that folds both pre-tax flavors into "Pre-Tax".
    pub fn category_label(&self) -> &'static str {
        if self.is_pre_tax() {
            "Pre-Tax"
        } else {
            self.label()
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaxType::PreTaxWork => "Pre-Tax(work)",
            TaxType::PreTaxOther => "Pre-Tax(other)",
            TaxType::PostTax => "Post-Tax",
            TaxType::Taxable => "Taxable",
            TaxType::RefundableDeposits => "Refundable Deposits",
            TaxType::ForBeneficiaries => "For Beneficiaries (POD)",
            TaxType::EducationSavings => "Education Savings",
            TaxType::Other => "Other",
        }
    }
}

impl std::fmt::Display for TaxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Group used to order accounts during a portfolio review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReviewGroup {
    Taxable,
    EmployerPlan,
    PreTaxIra,
    RothIra,
    Hsa,
    Other,
}

impl ReviewGroup {
    fn base(self) -> u32 {
        match self {
            ReviewGroup::Taxable => 1,
            ReviewGroup::EmployerPlan => 3,
            ReviewGroup::PreTaxIra => 4,
            ReviewGroup::RothIra => 5,
            ReviewGroup::Hsa => 6,
            ReviewGroup::Other => 7,
        }
    }
}

impl AccountType {
    /// The single table mapping each account type to its tax type and review group.
    fn profile(&self) -> (TaxType, ReviewGroup) {
        use AccountType::*;
        match self {
            Plan401k | Plan403b | Plan457b | Plan457bGovernmental | SepIra | Solo401k
            | SimpleIra => (TaxType::PreTaxWork, ReviewGroup::EmployerPlan),
            AnnuityQualified | InheritedIra | TraditionalIra | RolloverIra => {
                (TaxType::PreTaxOther, ReviewGroup::PreTaxIra)
            }
            Roth401k => (TaxType::PostTax, ReviewGroup::EmployerPlan),
            InheritedRothIra | RothIra => (TaxType::PostTax, ReviewGroup::RothIra),
            Hsa => (TaxType::PostTax, ReviewGroup::Hsa),
            AnnuityNonQualified | Brokerage | Individual | Taxable => {
                (TaxType::Taxable, ReviewGroup::Taxable)
            }
            RefundableDeposit => (TaxType::RefundableDeposits, ReviewGroup::Other),
            LifeInsurance => (TaxType::ForBeneficiaries, ReviewGroup::Other),
            Plan529 => (TaxType::EducationSavings, ReviewGroup::Other),
            Other(_) => (TaxType::Other, ReviewGroup::Other),
        }
    }

    pub fn tax_type(&self) -> TaxType {
        self.profile().0
    }

    pub fn as_str(&self) -> &str {
        use AccountType::*;
        match self {
            Plan401k => "401(k)",
            Plan403b => "403(b)",
            Plan457b => "457(b)",
            Plan457bGovernmental => "457(b) Governmental",
            SepIra => "SEP IRA",
            Solo401k => "Solo 401(k)",
            SimpleIra => "SIMPLE IRA",
            AnnuityQualified => "Annuity (Qualified)",
            InheritedIra => "Inherited IRA",
            TraditionalIra => "Traditional IRA",
            RolloverIra => "Rollover IRA",
            InheritedRothIra => "Inherited Roth IRA",
            Roth401k => "Roth 401(k)",
            RothIra => "Roth IRA",
            Hsa => "HSA",
            AnnuityNonQualified => "Annuity (Non-Qualified)",
            Brokerage => "Brokerage",
            Individual => "Individual",
            Taxable => "Taxable",
            RefundableDeposit => "Refundable Deposit",
            LifeInsurance => "Life Insurance",
            Plan529 => "529",
            Other(name) => name,
        }
    }
}

impl From<String> for AccountType {
    fn from(value: String) -> Self {
        use AccountType::*;
        match value.as_str() {
            "401(k)" | "401k" => Plan401k,
            "403(b)" | "403b" => Plan403b,
            "457(b)" | "457b" => Plan457b,
            "457(b) Governmental" => Plan457bGovernmental,
            "SEP IRA" => SepIra,
            "Solo 401(k)" | "Solo 401k" => Solo401k,
            "SIMPLE IRA" => SimpleIra,
            "Annuity (Qualified)" => AnnuityQualified,
            "Inherited IRA" => InheritedIra,
            "Traditional IRA" => TraditionalIra,
            "Rollover IRA" => RolloverIra,
            "Inherited Roth IRA" => InheritedRothIra,
            "Roth 401(k)" | "Roth 401k" => Roth401k,
            "Roth IRA" => RothIra,
            "HSA" => Hsa,
            "Annuity (Non-Qualified)" => AnnuityNonQualified,
            "Brokerage" => Brokerage,
            "Individual" => Individual,
            "Taxable" => Taxable,
            "Refundable Deposit" => RefundableDeposit,
            "Life Insurance" => LifeInsurance,
            "529" => Plan529,
            _ => Other(value),
        }
    }
}

impl From<&str> for AccountType {
    fn from(value: &str) -> Self {
        AccountType::from(value.to_string())
    }
}

impl From<AccountType> for String {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who owns an account. Serialized as 0 (joint), 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Owner {
    #[default]
    Joint,
    First,
    Second,
}

impl Owner {
    /// Index of the owning person in the household, `None` for joint accounts.
    pub fn person_index(&self) -> Option<usize> {
        match self {
            Owner::Joint => None,
            Owner::First => Some(0),
            Owner::Second => Some(1),
        }
    }

    pub fn for_person(index: usize) -> Option<Owner> {
        match index {
            0 => Some(Owner::First),
            1 => Some(Owner::Second),
            _ => None,
        }
    }

    fn number(&self) -> u32 {
        u8::from(*self) as u32
    }
}

impl TryFrom<u8> for Owner {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Owner::Joint),
            1 => Ok(Owner::First),
            2 => Ok(Owner::Second),
            other => Err(format!("account owner must be 0, 1 or 2, got {other}")),
        }
    }
}

impl From<Owner> for u8 {
    fn from(value: Owner) -> Self {
        match value {
            Owner::Joint => 0,
            Owner::First => 1,
            Owner::Second => 2,
        }
    }
}

/// Whether a workplace plan belongs to the current or a previous employer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmployerStatus {
    Current,
    Previous,
    NotApplicable,
}

impl EmployerStatus {
    /// Label shown next to the account; empty when not applicable.
    pub fn label(&self) -> &'static str {
        match self {
            EmployerStatus::Current => "current",
            EmployerStatus::Previous => "previous",
            EmployerStatus::NotApplicable => "",
        }
    }
}

/// Identifier used by joint accounts in older profiles.
pub const JOINT_IDENTIFIER: &str = "our";

/// An investment account: an ordered collection of holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Possessive owner label shown in the title (e.g., "Alex's", "our")
    #[serde(default)]
    pub identifier: Option<String>,

    #[serde(default)]
    pub account_type: Option<AccountType>,

    /// Brokerage or bank holding the account
    #[serde(default)]
    pub custodian: Option<String>,

    #[serde(default)]
    pub note: Option<String>,

    #[serde(default)]
    pub investments: Vec<Investment>,

    /// Funds offered by the plan, used when choosing where to invest
    #[serde(default)]
    pub available_funds: Vec<Investment>,

    #[serde(default)]
    pub owner: Owner,

    #[serde(default)]
    pub current_or_previous: Option<EmployerStatus>,
}

impl Account {
    pub fn new(account_type: impl Into<AccountType>, owner: Owner) -> Self {
        Self {
            id: Uuid::new_v4(),
            identifier: None,
            account_type: Some(account_type.into()),
            custodian: None,
            note: None,
            investments: Vec::new(),
            available_funds: Vec::new(),
            owner,
            current_or_previous: None,
        }
    }

    pub fn with_custodian(mut self, custodian: impl Into<String>) -> Self {
        self.custodian = Some(custodian.into());
        self
    }

    pub fn with_investment(mut self, investment: Investment) -> Self {
        self.investments.push(investment);
        self
    }

    /// Display title: `[identifier ]type[ at custodian][ (note)]`.
    pub fn title(&self) -> String {
        let mut title = self.full_name_with(self.custodian.as_deref().filter(|c| !c.is_empty()));
        if let Some(note) = &self.note {
            title.push_str(&format!(" ({note})"));
        }
        title
    }

    /// Title without the note.
    pub fn full_name(&self) -> String {
        self.full_name_with(self.custodian.as_deref())
    }

    fn full_name_with(&self, custodian: Option<&str>) -> String {
        let mut name = String::new();
        if let Some(identifier) = &self.identifier {
            name.push_str(identifier);
            name.push(' ');
        }
        if let Some(account_type) = &self.account_type {
            name.push_str(account_type.as_str());
        }
        if let Some(custodian) = custodian {
            name.push_str(" at ");
            name.push_str(custodian);
        }
        name
    }

    /// Change the account type. A retirement account cannot be joint, so a
    /// joint identifier is dropped when the new type is not taxable.
    pub fn set_account_type(&mut self, account_type: impl Into<AccountType>) {
        self.account_type = Some(account_type.into());
        let tax_type = self.tax_type();
        if self.identifier.as_deref() == Some(JOINT_IDENTIFIER)
            && tax_type != TaxType::Taxable
            && tax_type != TaxType::Other
        {
            self.identifier = None;
        }
    }

    /// Infer the account type from the free-text note (imported accounts).
    pub fn guess_account_type(&mut self) {
        let Some(note) = self.note.clone() else {
            return;
        };
        if note.contains("401K") || note.contains("401k") {
            self.set_account_type(AccountType::Plan401k);
        } else if note.contains("HSA") || note.contains("Health Savings Account") {
            self.set_account_type(AccountType::Hsa);
        }
    }

    pub fn tax_type(&self) -> TaxType {
        self.account_type
            .as_ref()
            .map(|t| t.tax_type())
            .unwrap_or(TaxType::Other)
    }

    /// Position of this account in a portfolio review.
    ///
    /// Taxable accounts come first (1 + owner). Everything else is grouped by
    /// owner in blocks of 7 (joint 7, first person 14, second person 21) and
    /// ordered within the block by kind. A current employer's pre-tax plan sorts
    /// one slot earlier than a previous employer's.
    pub fn portfolio_review_order(&self) -> u32 {
        let group = self
            .account_type
            .as_ref()
            .map(|t| t.profile().1)
            .unwrap_or(ReviewGroup::Other);
        let owner = self.owner.number();

        let mut order = match group {
            ReviewGroup::Taxable => group.base() + owner,
            other => other.base() + (owner + 1) * 7,
        };

        if self.tax_type() == TaxType::PreTaxWork
            && self.current_or_previous == Some(EmployerStatus::Current)
        {
            order -= 1;
        }

        order
    }

    /// Label for the employer status; empty when unset or not applicable.
    pub fn current_employer_label(&self) -> &'static str {
        self.current_or_previous.map(|s| s.label()).unwrap_or("")
    }

    /// First cash-like holding, where sale proceeds settle.
    pub fn settlement_investment(&self) -> Option<&Investment> {
        self.investments.iter().find(|i| i.is_cash())
    }

    /// Find a holding by ticker (case-insensitive).
    pub fn find_investment(&self, ticker: &str) -> Option<&Investment> {
        self.investments
            .iter()
            .find(|i| i.ticker.eq_ignore_ascii_case(ticker))
    }

    /// Holding a transaction carried by `carrier` applies to.
    /// An empty host ticker means the carrier itself.
    pub fn transaction_host<'a>(
        &'a self,
        carrier: &'a Investment,
        host_ticker: &str,
    ) -> Option<&'a Investment> {
        if host_ticker.is_empty() {
            Some(carrier)
        } else {
            self.find_investment(host_ticker)
        }
    }

    /// Value contributed by one holding line after its transactions.
    ///
    /// Under [`TransactionPolicy::Additive`] every known delta is added to the
    /// base value. Under [`TransactionPolicy::Replace`] only the last known
    /// delta applies, giving the position after that transaction (a SellAll
    /// leaves 0). A missing base value counts as 0.
    pub fn line_value(&self, investment: &Investment, policy: TransactionPolicy) -> f64 {
        let base = investment.value.unwrap_or(0.0);
        let deltas = investment.transactions.iter().filter_map(|t| {
            t.custom_value(self.transaction_host(investment, &t.host_ticker))
        });

        match policy {
            TransactionPolicy::Additive => base + deltas.sum::<f64>(),
            TransactionPolicy::Replace => base + deltas.last().unwrap_or(0.0),
        }
    }

    /// Total account value under the given transaction policy.
    pub fn value(&self, policy: TransactionPolicy) -> f64 {
        self.investments
            .iter()
            .map(|i| self.line_value(i, policy))
            .sum()
    }

    /// Cost basis for capital-gains purposes.
    ///
    /// Taxable accounts sum recorded cost basis, with cash holdings falling
    /// back to their value. If any other holding lacks a cost basis the result
    /// is `None`. Accounts that are not taxable have a cost basis of zero.
    pub fn calculate_cost_basis(&self) -> Option<f64> {
        if self.tax_type() != TaxType::Taxable {
            return Some(0.0);
        }

        let mut cost_basis = 0.0;
        for investment in &self.investments {
            match investment.cost_basis {
                Some(basis) => cost_basis += basis,
                None if investment.is_cash() => cost_basis += investment.value.unwrap_or(0.0),
                None => return None,
            }
        }
        Some(cost_basis)
    }
}
