use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

use super::account::{Account, Owner, JOINT_IDENTIFIER};
use super::pension::Pension;
use super::person::Person;
use super::settings::Settings;

/// Tax filing status of the household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilingStatus {
    /// Not answered yet; anything that depends on it is indeterminate
    #[default]
    ChoiceNeeded,
    Single,
    HeadOfHousehold,
    MarriedFilingJointly,
    MarriedFilingSeparately,
}

impl FilingStatus {
    pub fn is_married(&self) -> bool {
        matches!(
            self,
            FilingStatus::MarriedFilingJointly | FilingStatus::MarriedFilingSeparately
        )
    }

    /// Number of adults the household tracks under this status.
    pub fn person_count(&self) -> usize {
        if self.is_married() {
            2
        } else {
            1
        }
    }
}

impl std::fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilingStatus::ChoiceNeeded => write!(f, "Choice Needed"),
            FilingStatus::Single => write!(f, "Single"),
            FilingStatus::HeadOfHousehold => write!(f, "Head of Household"),
            FilingStatus::MarriedFilingJointly => write!(f, "Married Filing Jointly"),
            FilingStatus::MarriedFilingSeparately => write!(f, "Married Filing Separately"),
        }
    }
}

/// The main data container: one loaded profile.
///
/// The household is the sole owner of its people and accounts. Relationships
/// (spouse, account owner) are indices into these vectors, never references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    #[serde(default)]
    pub filing_status: FilingStatus,

    /// Married filing separately but lived apart all year (IRS Roth carve-out)
    #[serde(default)]
    pub living_separately: bool,

    /// Modified adjusted gross income in dollars, once the user provides it
    #[serde(default)]
    pub adjusted_gross_income: Option<i64>,

    #[serde(default)]
    pub people: Vec<Person>,

    #[serde(default)]
    pub accounts: Vec<Account>,

    #[serde(default)]
    pub pensions: Vec<Pension>,

    #[serde(default)]
    pub settings: Settings,
}

impl Default for Household {
    fn default() -> Self {
        Self::new(FilingStatus::default())
    }
}

impl Household {
    /// Create an empty household with as many people as `filing_status` implies.
    pub fn new(filing_status: FilingStatus) -> Self {
        Self {
            filing_status,
            living_separately: false,
            adjusted_gross_income: None,
            people: (0..filing_status.person_count()).map(Person::new).collect(),
            accounts: Vec::new(),
            pensions: Vec::new(),
            settings: Settings::default(),
        }
    }

    pub fn person_count(&self) -> usize {
        self.filing_status.person_count()
    }

    /// Look up a person, rejecting indices the household cannot have.
    pub fn person(&self, index: usize) -> Result<&Person, CoreError> {
        if index > 1 {
            return Err(CoreError::InvalidPersonIndex(index));
        }
        self.people.get(index).ok_or_else(|| {
            CoreError::InconsistentHousehold(format!(
                "person {index} requested but only {} recorded",
                self.people.len()
            ))
        })
    }

    pub fn person_mut(&mut self, index: usize) -> Result<&mut Person, CoreError> {
        if index > 1 {
            return Err(CoreError::InvalidPersonIndex(index));
        }
        let len = self.people.len();
        self.people.get_mut(index).ok_or_else(|| {
            CoreError::InconsistentHousehold(format!(
                "person {index} requested but only {len} recorded"
            ))
        })
    }

    /// Spouse of the person at `index`, or `None` when not filing as married.
    pub fn spouse_of(&self, index: usize) -> Result<Option<&Person>, CoreError> {
        if !self.filing_status.is_married() {
            return Ok(None);
        }
        let spouse_index = match index {
            0 => 1,
            1 => 0,
            other => return Err(CoreError::InvalidPersonIndex(other)),
        };
        self.person(spouse_index).map(Some)
    }

    /// Change the filing status, adding or dropping the second person to match.
    /// Accounts of a dropped person become joint.
    pub fn set_filing_status(&mut self, filing_status: FilingStatus) {
        self.filing_status = filing_status;
        let count = filing_status.person_count();
        self.people.truncate(count);
        while self.people.len() < count {
            self.people.push(Person::new(self.people.len()));
        }
        for account in &mut self.accounts {
            if account.owner.person_index().is_some_and(|i| i >= count) {
                warn!("account '{}' lost its owner; now joint", account.title());
                account.owner = Owner::Joint;
            }
        }
        if filing_status != FilingStatus::MarriedFilingSeparately {
            self.living_separately = false;
        }
    }

    /// Check the structural invariants the calculators rely on.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.people.len() != self.person_count() {
            return Err(CoreError::InconsistentHousehold(format!(
                "filing status {} expects {} people, found {}",
                self.filing_status,
                self.person_count(),
                self.people.len()
            )));
        }
        for (position, person) in self.people.iter().enumerate() {
            if person.index != position {
                return Err(CoreError::InconsistentHousehold(format!(
                    "person at position {position} carries index {}",
                    person.index
                )));
            }
        }
        for account in &self.accounts {
            if let Some(index) = account.owner.person_index() {
                if index >= self.people.len() {
                    return Err(CoreError::InconsistentHousehold(format!(
                        "account '{}' is owned by person {index} who does not exist",
                        account.title()
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.id == id)
    }

    /// Accounts in portfolio-review order (stable for equal positions).
    pub fn accounts_in_review_order(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.iter().collect();
        accounts.sort_by_key(|a| a.portfolio_review_order());
        accounts
    }

    /// Sum of every account's value under the configured transaction policy.
    pub fn total_value(&self) -> f64 {
        let policy = self.settings.transaction_policy;
        self.accounts.iter().map(|a| a.value(policy)).sum()
    }

    /// Re-derive account owners from their identifiers.
    ///
    /// Empty or "our" → joint; the first person's possessive → first person;
    /// the second person's possessive (married households only) → second
    /// person. Other identifiers leave the recorded owner untouched.
    pub fn assign_owners(&mut self) {
        let first = self.people.first().and_then(|p| p.possessive_id());
        let second = if self.person_count() == 2 {
            self.people.get(1).and_then(|p| p.possessive_id())
        } else {
            None
        };

        for account in &mut self.accounts {
            match account.identifier.as_deref() {
                None | Some("") | Some(JOINT_IDENTIFIER) => account.owner = Owner::Joint,
                Some(id) if first.as_deref() == Some(id) => account.owner = Owner::First,
                Some(id) if second.as_deref() == Some(id) => account.owner = Owner::Second,
                Some(_) => {}
            }
        }
    }
}
