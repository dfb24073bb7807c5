pub mod account;
pub mod analytics;
pub mod asset;
pub mod household;
pub mod investment;
pub mod irs;
pub mod pension;
pub mod person;
pub mod settings;
