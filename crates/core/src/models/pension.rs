use serde::{Deserialize, Serialize};

/// A defined-benefit pension or one-time payout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pension {
    pub identifier: Option<String>,
    pub custodian: Option<String>,
    /// Yearly income in dollars (or the lump sum when `one_time`)
    pub income: f64,
    pub one_time: bool,
    pub beginning_age: u32,
    /// Cost-of-living adjustment
    pub has_cola: bool,
    /// Fraction of `income` paid to a surviving spouse
    pub survivors_benefit: f64,
}

impl Pension {
    pub fn full_name(&self) -> String {
        let mut name = String::new();
        if let Some(identifier) = &self.identifier {
            name.push_str(identifier);
            name.push(' ');
        }
        name.push_str("Pension");
        if let Some(custodian) = &self.custodian {
            name.push_str(" at ");
            name.push_str(custodian);
        }
        name
    }
}
