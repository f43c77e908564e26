use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use super::balance::{client_portfolio, portfolio};
use crate::ledger::{EntityStatus, Ledger, Payment, PaymentType, Task, TaskStatus};

pub const RECENT_TASK_LIMIT: usize = 10;

/// Payments for one calendar month, split by type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTrend {
    pub year: i32,
    pub month: u32,
    pub client: Decimal,
    pub vendor: Decimal,
    pub labor: Decimal,
}

impl MonthlyTrend {
    /// "Jan 2026"
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month))
    }

    pub fn total(&self) -> Decimal {
        self.client + self.vendor + self.labor
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_clients: usize,
    pub active_clients: usize,
    pub total_vendors: usize,
    pub total_labors: usize,
    pub total_tasks: usize,
    pub total_payments: Decimal,
    pub total_commission: Decimal,
    pub pending_commission: Decimal,
    pub total_client_amount: Decimal,
    pub pending_client_amount: Decimal,
    pub payment_trends: Vec<MonthlyTrend>,
    /// Open tasks, earliest due first.
    pub upcoming_tasks: Vec<Task>,
}

pub fn dashboard(ledger: &Ledger) -> DashboardSummary {
    let commission = portfolio(&ledger.contracts, &ledger.payments);
    let clients = client_portfolio(&ledger.clients, &ledger.payments);

    let mut upcoming_tasks: Vec<Task> = ledger
        .tasks
        .iter()
        .filter(|t| t.status != TaskStatus::Completed)
        .cloned()
        .collect();
    upcoming_tasks.sort_by_key(|t| (t.due_date, t.id));
    upcoming_tasks.truncate(RECENT_TASK_LIMIT);

    DashboardSummary {
        total_clients: ledger.clients.len(),
        active_clients: ledger
            .clients
            .iter()
            .filter(|c| c.status == EntityStatus::Active)
            .count(),
        total_vendors: ledger.vendors.len(),
        total_labors: ledger.labors.len(),
        total_tasks: ledger.tasks.len(),
        total_payments: ledger.payments.iter().map(|p| p.amount).sum(),
        total_commission: commission.principal,
        pending_commission: commission.pending,
        total_client_amount: clients.principal,
        pending_client_amount: clients.pending,
        payment_trends: payment_trends(&ledger.payments),
        upcoming_tasks,
    }
}

/// Monthly sums per payment type, oldest month first.
pub fn payment_trends(payments: &[Payment]) -> Vec<MonthlyTrend> {
    let mut months: BTreeMap<(i32, u32), MonthlyTrend> = BTreeMap::new();
    for payment in payments {
        let key = (payment.date.year(), payment.date.month());
        let trend = months.entry(key).or_insert_with(|| MonthlyTrend {
            year: key.0,
            month: key.1,
            client: Decimal::ZERO,
            vendor: Decimal::ZERO,
            labor: Decimal::ZERO,
        });
        match payment.kind {
            PaymentType::Client => trend.client += payment.amount,
            PaymentType::Vendor => trend.vendor += payment.amount,
            PaymentType::Labor => trend.labor += payment.amount,
        }
    }
    months.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{money, sample_ledger};

    #[test]
    fn dashboard_totals_match_the_fixture() {
        let summary = dashboard(&sample_ledger());
        assert_eq!(summary.total_clients, 3);
        assert_eq!(summary.active_clients, 2);
        assert_eq!(summary.total_vendors, 2);
        assert_eq!(summary.total_labors, 1);
        assert_eq!(summary.total_tasks, 4);
        assert_eq!(summary.total_payments, money(156_500));
        assert_eq!(summary.total_commission, money(71_000));
        assert_eq!(summary.pending_commission, money(29_500));
        assert_eq!(summary.total_client_amount, money(350_000));
        assert_eq!(summary.pending_client_amount, money(240_000));
    }

    #[test]
    fn upcoming_tasks_skip_completed_and_sort_by_due_date() {
        let summary = dashboard(&sample_ledger());
        let ids: Vec<u32> = summary.upcoming_tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 4]);
    }

    #[test]
    fn trends_bucket_by_month_and_type() {
        let trends = payment_trends(&sample_ledger().payments);
        let labels: Vec<String> = trends.iter().map(MonthlyTrend::label).collect();
        assert_eq!(labels, vec!["Jan 2026", "Feb 2026", "Mar 2026"]);

        assert_eq!(trends[0].client, money(5_000));
        assert_eq!(trends[0].vendor, money(20_000));
        assert_eq!(trends[1].labor, money(15_000));
        assert_eq!(trends[1].client, money(40_000));
        assert_eq!(trends[2].total(), money(76_500));
    }
}
