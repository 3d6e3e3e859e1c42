pub mod accrual_service;
pub mod amortizer;
pub mod ledger_service;
pub mod spending_service;
pub mod summary_service;
