//! CSV renderings of payment sets.
//!
//! The header row is always written, so an empty selection still produces a
//! valid file. Field quoting is left to `csv::Writer`.

use chrono::NaiveDate;
use csv::WriterBuilder;
use serde::Serialize;
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{AtelierError, Result};
use crate::finance::Bucket;
use crate::ledger::{Counterparty, Ledger, Payment, PaymentType};

const PAYMENTS_HEADER: [&str; 6] = [
    "Date",
    "Amount",
    "Type",
    "Contract",
    "Entity Name",
    "Description",
];
const STATEMENT_HEADER: [&str; 3] = ["Date", "Amount", "Description"];

#[derive(Serialize)]
struct PaymentRow<'a> {
    date: String,
    amount: String,
    kind: &'a str,
    contract: &'a str,
    entity: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
struct StatementRow<'a> {
    date: String,
    amount: String,
    description: &'a str,
}

/// Whose payments a statement lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementOwner {
    Client(u32),
    Vendor(u32),
    Labor(u32),
}

impl StatementOwner {
    pub fn kind(&self) -> &'static str {
        match self {
            StatementOwner::Client(_) => "client",
            StatementOwner::Vendor(_) => "vendor",
            StatementOwner::Labor(_) => "labor",
        }
    }
}

/// Name of the party a payment was made by or to. Empty when unknown.
pub fn entity_name<'a>(ledger: &'a Ledger, payment: &Payment) -> &'a str {
    let Some(contract_id) = payment.contract_id else {
        return payment
            .client_id
            .and_then(|id| ledger.client(id).ok())
            .map_or("", |c| c.name.as_str());
    };
    let Ok(contract) = ledger.contract(contract_id) else {
        return "";
    };
    let name = match payment.kind {
        PaymentType::Client => ledger.client(contract.client_id).ok().map(|c| c.name.as_str()),
        PaymentType::Vendor => contract
            .vendor_id
            .and_then(|id| ledger.vendor(id).ok())
            .map(|v| v.name.as_str()),
        PaymentType::Labor => contract
            .labor_id
            .and_then(|id| ledger.labor(id).ok())
            .map(|l| l.name.as_str()),
    };
    name.unwrap_or("")
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| AtelierError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        AtelierError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

/// Date, Amount, Type, Contract, Entity Name, Description
pub fn payments_csv(ledger: &Ledger, payments: &[&Payment]) -> Result<String> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    writer.write_record(PAYMENTS_HEADER)?;
    for payment in payments {
        let contract = payment
            .contract_id
            .and_then(|id| ledger.contract(id).ok())
            .map_or("", |c| c.title.as_str());
        writer.serialize(PaymentRow {
            date: payment.date.format("%Y-%m-%d").to_string(),
            amount: payment.amount.to_string(),
            kind: payment.kind.as_str(),
            contract,
            entity: entity_name(ledger, payment),
            description: payment.description.as_deref().unwrap_or(""),
        })?;
    }
    finish(writer)
}

/// Date, Amount, Description
pub fn statement_csv(payments: &[&Payment]) -> Result<String> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    writer.write_record(STATEMENT_HEADER)?;
    for payment in payments {
        writer.serialize(StatementRow {
            date: payment.date.format("%Y-%m-%d").to_string(),
            amount: payment.amount.to_string(),
            description: payment.description.as_deref().unwrap_or(""),
        })?;
    }
    finish(writer)
}

/// Owner's display name and the payments that feed their balance, most
/// recent first.
pub fn statement_payments(ledger: &Ledger, owner: StatementOwner) -> Result<(&str, Vec<&Payment>)> {
    let (name, mut payments) = match owner {
        StatementOwner::Client(id) => {
            let client = ledger.client(id)?;
            (client.name.as_str(), ledger.direct_payments(id))
        }
        StatementOwner::Vendor(id) => (
            ledger.vendor(id)?.name.as_str(),
            party_payments(ledger, Counterparty::Vendor(id)),
        ),
        StatementOwner::Labor(id) => (
            ledger.labor(id)?.name.as_str(),
            party_payments(ledger, Counterparty::Labor(id)),
        ),
    };
    payments.sort_by_key(|p| Reverse((p.date, p.id)));
    Ok((name, payments))
}

fn party_payments(ledger: &Ledger, party: Counterparty) -> Vec<&Payment> {
    ledger
        .contracts_for(party)
        .into_iter()
        .flat_map(|c| ledger.payments_for_contract(c.id))
        .filter(|p| Bucket::Commission.matches(p.kind))
        .collect()
}

fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

/// `payments_{type|all}_{yyyy-MM-dd}.csv`
pub fn payments_file_name(kind: Option<PaymentType>, today: NaiveDate) -> String {
    format!(
        "payments_{}_{}.csv",
        kind.map_or("all", |k| k.as_str()),
        today.format("%Y-%m-%d")
    )
}

/// `{kind}_{name}_payments_{yyyy-MM-dd}.csv`
pub fn statement_file_name(owner: StatementOwner, name: &str, today: NaiveDate) -> String {
    format!(
        "{}_{}_payments_{}.csv",
        owner.kind(),
        slug(name),
        today.format("%Y-%m-%d")
    )
}

pub fn write_export(path: &Path, content: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    info!(path = %path.display(), bytes = content.len(), "export written");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::PaymentQuery;
    use crate::test_support::{date, sample_ledger};

    #[test]
    fn empty_export_is_header_only() {
        let ledger = sample_ledger();
        let csv = payments_csv(&ledger, &[]).unwrap();
        assert_eq!(csv, "Date,Amount,Type,Contract,Entity Name,Description\n");
        assert_eq!(statement_csv(&[]).unwrap(), "Date,Amount,Description\n");
    }

    #[test]
    fn rows_resolve_contract_and_entity() {
        let ledger = sample_ledger();
        let payments = PaymentQuery {
            kind: Some(PaymentType::Vendor),
            ..PaymentQuery::default()
        }
        .apply(&ledger.payments);
        let csv = payments_csv(&ledger, &payments).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "2026-03-01,6500,vendor,Lighting plan,Lumen Lighting,");
        assert_eq!(lines[2], "2026-01-20,20000,vendor,Living room rugs,Jaipur Rugs,Advance");
    }

    #[test]
    fn direct_payments_name_their_client() {
        let ledger = sample_ledger();
        let payment = ledger.payment(4).unwrap();
        assert_eq!(entity_name(&ledger, payment), "Mehta Residence");
    }

    #[test]
    fn delimiters_in_text_are_quoted() {
        let ledger = sample_ledger();
        let payment = ledger.payment(5).unwrap();
        let out = statement_csv(&[payment]).unwrap();
        assert!(out.ends_with("2026-03-05,70000,\"Second, final\"\n"));

        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[2], "Second, final");
    }

    #[test]
    fn statements_follow_the_balance_buckets() {
        let ledger = sample_ledger();
        let (name, payments) = statement_payments(&ledger, StatementOwner::Vendor(1)).unwrap();
        assert_eq!(name, "Jaipur Rugs");
        let ids: Vec<u32> = payments.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);

        let (_, payments) = statement_payments(&ledger, StatementOwner::Client(1)).unwrap();
        let ids: Vec<u32> = payments.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 4]);

        assert!(matches!(
            statement_payments(&ledger, StatementOwner::Labor(9)),
            Err(AtelierError::LaborNotFound(9))
        ));
    }

    #[test]
    fn file_names() {
        let today = date(2026, 10, 14);
        assert_eq!(payments_file_name(None, today), "payments_all_2026-10-14.csv");
        assert_eq!(
            payments_file_name(Some(PaymentType::Labor), today),
            "payments_labor_2026-10-14.csv"
        );
        assert_eq!(
            statement_file_name(StatementOwner::Client(1), "Mehta Residence", today),
            "client_mehta-residence_payments_2026-10-14.csv"
        );
    }
}
