pub mod aggregation_service;
pub mod contribution_service;
pub mod hsa_service;
pub mod retirement_plan_service;
pub mod roth_ira_service;
