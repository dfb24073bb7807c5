use std::collections::BTreeMap;

use log::debug;

use crate::errors::CoreError;
use crate::models::irs::{EmployerPlanLimits, HsaLimits, IraLimits, IrsYearTable, RothIraLimits};

use super::traits::IrsTableProvider;

/// Tables published by the IRS for the years this release knows about.
const BUILTIN_TABLES_JSON: &str = include_str!("irs_tables.json");

/// Registry of IRS tables, one entry per tax year.
///
/// Ships with the built-in years; callers can register newer (or corrected)
/// years without touching the calculators. Registering a year that already
/// exists replaces it.
#[derive(Debug, Clone, Default)]
pub struct IrsTableRegistry {
    years: BTreeMap<i32, IrsYearTable>,
}

impl IrsTableRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            years: BTreeMap::new(),
        }
    }

    /// Create a registry pre-loaded with the built-in tables.
    pub fn new_with_defaults() -> Result<Self, CoreError> {
        Self::from_json(BUILTIN_TABLES_JSON)
    }

    /// Build a registry from a JSON array of yearly tables.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let tables: Vec<IrsYearTable> = serde_json::from_str(json)
            .map_err(|e| CoreError::Deserialization(format!("Failed to parse IRS tables: {e}")))?;

        let mut registry = Self::new();
        for table in tables {
            registry.register(table);
        }
        debug!("loaded IRS tables for years {:?}", registry.supported_years());
        Ok(registry)
    }

    /// Register (or replace) the tables for one tax year.
    pub fn register(&mut self, table: IrsYearTable) {
        self.years.insert(table.tax_year, table);
    }

    pub fn year(&self, tax_year: i32) -> Option<&IrsYearTable> {
        self.years.get(&tax_year)
    }
}

impl IrsTableProvider for IrsTableRegistry {
    fn name(&self) -> &str {
        "IrsTableRegistry"
    }

    fn hsa_limits(&self, tax_year: i32) -> Option<HsaLimits> {
        self.year(tax_year).and_then(|t| t.hsa)
    }

    fn roth_ira_limits(&self, tax_year: i32) -> Option<RothIraLimits> {
        self.year(tax_year).and_then(|t| t.roth_ira)
    }

    fn ira_limits(&self, tax_year: i32) -> Option<IraLimits> {
        self.year(tax_year).and_then(|t| t.ira)
    }

    fn employer_plan_limits(&self, tax_year: i32) -> Option<EmployerPlanLimits> {
        self.year(tax_year).and_then(|t| t.employer_plan)
    }

    fn supported_years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }
}
