pub mod advisor_service;
pub mod chart_service;
pub mod holdings_service;
pub mod import_service;
