//! Reports module - pure derived views over the transaction history.

mod reports_model;
mod reports_service;


pub use reports_model::{CashflowSummary, CategorySpending, MemberFilter, ReportScope};
pub use reports_service::{
    cashflow_summary, featured_goal, spending_by_category, transactions_for_member,
};
