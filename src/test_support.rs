//! Shared fixture for unit tests: a small studio with one vendor contract,
//! one labor contract, one overpaid contract and a client paid past their
//! agreed amount.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::ledger::{
    Client, Contract, Document, EntityStatus, Labor, Ledger, Payment, PaymentType, Task,
    TaskStatus, Vendor,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn money(units: i64) -> Decimal {
    Decimal::new(units, 0)
}

fn client(id: u32, name: &str, amount: Option<i64>, status: EntityStatus) -> Client {
    Client {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.split(' ').next().unwrap().to_lowercase()),
        phone: format!("98200 0000{id}"),
        address: "Mumbai".to_string(),
        contract_amount: amount.map(money),
        notes: None,
        status,
    }
}

#[allow(clippy::too_many_arguments)]
fn contract(
    id: u32,
    client_id: u32,
    vendor_id: Option<u32>,
    labor_id: Option<u32>,
    title: &str,
    amount: i64,
    commission: i64,
    status: EntityStatus,
) -> Contract {
    Contract {
        id,
        client_id,
        vendor_id,
        labor_id,
        title: title.to_string(),
        description: None,
        contract_amount: money(amount),
        commission_percentage: Decimal::new(commission * 100, 0) / money(amount),
        commission_amount: money(commission),
        status,
        start_date: date(2026, id, 10),
        end_date: None,
    }
}

fn payment(
    id: u32,
    amount: i64,
    date: NaiveDate,
    kind: PaymentType,
    contract_id: Option<u32>,
    client_id: Option<u32>,
    description: Option<&str>,
) -> Payment {
    Payment {
        id,
        amount: money(amount),
        date,
        kind,
        contract_id,
        client_id,
        description: description.map(str::to_string),
    }
}

fn task(id: u32, title: &str, status: TaskStatus, due: NaiveDate, client_id: Option<u32>) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: None,
        status,
        due_date: due,
        client_id,
    }
}

pub fn sample_ledger() -> Ledger {
    Ledger {
        clients: vec![
            client(1, "Mehta Residence", Some(100_000), EntityStatus::Active),
            client(2, "Kapoor Villa", Some(250_000), EntityStatus::Active),
            client(3, "Rao Office", None, EntityStatus::Inactive),
        ],
        vendors: vec![
            Vendor {
                id: 1,
                name: "Jaipur Rugs".to_string(),
                email: "sales@jaipurrugs.example".to_string(),
                phone: "0141 555 0101".to_string(),
                category: "Flooring".to_string(),
                status: EntityStatus::Active,
            },
            Vendor {
                id: 2,
                name: "Lumen Lighting".to_string(),
                email: "hello@lumen.example".to_string(),
                phone: "022 555 0199".to_string(),
                category: "Lighting".to_string(),
                status: EntityStatus::Inactive,
            },
        ],
        labors: vec![Labor {
            id: 1,
            name: "Suresh Carpentry".to_string(),
            phone: "98111 22233".to_string(),
            specialization: "Carpentry".to_string(),
            notes: None,
            status: EntityStatus::Active,
        }],
        contracts: vec![
            contract(1, 1, Some(1), None, "Living room rugs", 200_000, 50_000, EntityStatus::Active),
            contract(2, 2, None, Some(1), "Kitchen cabinets", 150_000, 15_000, EntityStatus::Active),
            contract(3, 2, Some(2), None, "Lighting plan", 60_000, 6_000, EntityStatus::Inactive),
        ],
        payments: vec![
            payment(1, 20_000, date(2026, 1, 20), PaymentType::Vendor, Some(1), None, Some("Advance")),
            payment(2, 5_000, date(2026, 1, 25), PaymentType::Client, Some(1), None, Some("Deposit")),
            payment(3, 15_000, date(2026, 2, 10), PaymentType::Labor, Some(2), None, None),
            payment(4, 40_000, date(2026, 2, 5), PaymentType::Client, None, Some(1), Some("First installment")),
            payment(5, 70_000, date(2026, 3, 5), PaymentType::Client, None, Some(1), Some("Second, final")),
            payment(6, 6_500, date(2026, 3, 1), PaymentType::Vendor, Some(3), None, None),
        ],
        tasks: vec![
            task(1, "Site measurement", TaskStatus::Completed, date(2026, 1, 5), Some(1)),
            task(2, "Order tiles", TaskStatus::InProgress, date(2026, 3, 20), Some(2)),
            task(3, "Fabric samples", TaskStatus::NotStarted, date(2026, 3, 10), None),
            task(4, "Invoice follow-up", TaskStatus::OnHold, date(2026, 4, 1), Some(1)),
        ],
        documents: vec![
            Document {
                id: 1,
                name: "Mehta floor plan".to_string(),
                category: "Plans".to_string(),
                file_path: "plans/mehta.pdf".to_string(),
                uploaded_on: date(2026, 1, 8),
            },
            Document {
                id: 2,
                name: "Kapoor quote".to_string(),
                category: "Quotes".to_string(),
                file_path: "quotes/kapoor.pdf".to_string(),
                uploaded_on: date(2026, 2, 2),
            },
        ],
    }
}
