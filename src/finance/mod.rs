//! Derived money totals. Every screen that shows a paid or pending figure
//! goes through these functions; nothing here is ever stored.

mod balance;
mod dashboard;

pub use balance::{
    client_balance, client_portfolio, contract_client, contract_commission, labor_balance,
    portfolio, vendor_balance, Balance, Bucket, PaymentStatus,
};
pub use dashboard::{dashboard, payment_trends, DashboardSummary, MonthlyTrend, RECENT_TASK_LIMIT};
