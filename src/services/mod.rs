pub mod lead_service;
pub mod scoring_service;
