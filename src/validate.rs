//! Draft checks run before any row is written.
//!
//! Every rule that fails is collected, so a form can show all of its field
//! errors at once instead of one per attempt.

use rust_decimal::Decimal;
use std::fmt;

use crate::ledger::{
    ClientDraft, ContractDraft, CounterpartyKind, DocumentDraft, LaborDraft, Ledger,
    PaymentDraft, PaymentType, TaskDraft, VendorDraft,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    fn required(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "is required");
        }
    }

    fn email(&mut self, field: &'static str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.push(field, "is required");
            return;
        }
        let mut parts = value.split('@');
        let valid = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
        );
        if !valid {
            self.push(field, "must be a valid email address");
        }
    }

    fn non_negative(&mut self, field: &'static str, value: Decimal) {
        if value < Decimal::ZERO {
            self.push(field, "must not be negative");
        }
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed:")?;
        for error in &self.errors {
            write!(f, "\n  {}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

pub fn client(draft: &ClientDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.required("name", &draft.name);
    errors.email("email", &draft.email);
    errors.required("phone", &draft.phone);
    errors.required("address", &draft.address);
    if let Some(amount) = draft.contract_amount {
        errors.non_negative("contract_amount", amount);
    }
    errors.finish()
}

pub fn vendor(draft: &VendorDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.required("name", &draft.name);
    errors.email("email", &draft.email);
    errors.required("phone", &draft.phone);
    errors.required("category", &draft.category);
    errors.finish()
}

pub fn labor(draft: &LaborDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.required("name", &draft.name);
    errors.required("phone", &draft.phone);
    errors.required("specialization", &draft.specialization);
    errors.finish()
}

/// Contracts name one client and exactly one of vendor or labor.
pub fn contract(draft: &ContractDraft, ledger: &Ledger) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.required("title", &draft.title);

    if ledger.client(draft.client_id).is_err() {
        errors.push("client_id", format!("client #{} does not exist", draft.client_id));
    }

    match (draft.vendor_id, draft.labor_id) {
        (Some(_), Some(_)) => errors.push(
            "counterparty",
            "Contract must be either with a vendor or a labor, not both",
        ),
        (None, None) => errors.push("counterparty", "Contract must have either a vendor or a labor"),
        (Some(id), None) => {
            if ledger.vendor(id).is_err() {
                errors.push("vendor_id", format!("vendor #{id} does not exist"));
            }
        }
        (None, Some(id)) => {
            if ledger.labor(id).is_err() {
                errors.push("labor_id", format!("labor #{id} does not exist"));
            }
        }
    }

    errors.non_negative("contract_amount", draft.contract_amount);
    if draft.commission_percentage < Decimal::ZERO
        || draft.commission_percentage > Decimal::ONE_HUNDRED
    {
        errors.push("commission_percentage", "must be between 0 and 100");
    }
    if let Some(amount) = draft.commission_amount {
        errors.non_negative("commission_amount", amount);
    }
    if let Some(end) = draft.end_date {
        if end < draft.start_date {
            errors.push("end_date", "must not be before the start date");
        }
    }
    errors.finish()
}

/// An edit to contract `id` must keep its recorded payments valid: vendor and
/// labor payments follow the counterparty kind, and payments tagged with a
/// client stay with that client.
pub fn contract_change(
    id: u32,
    draft: &ContractDraft,
    ledger: &Ledger,
) -> Result<(), ValidationErrors> {
    let mut errors = contract(draft, ledger).err().unwrap_or_default();

    let kind = match (draft.vendor_id, draft.labor_id) {
        (Some(_), None) => Some(CounterpartyKind::Vendor),
        (None, Some(_)) => Some(CounterpartyKind::Labor),
        _ => None,
    };
    for payment in ledger.payments_for_contract(id) {
        let needs = match payment.kind {
            PaymentType::Client => None,
            PaymentType::Vendor => Some(CounterpartyKind::Vendor),
            PaymentType::Labor => Some(CounterpartyKind::Labor),
        };
        if needs.is_some() && kind.is_some() && needs != kind {
            errors.push(
                "counterparty",
                format!(
                    "payment #{} is a {} payment and would no longer match contract #{id}",
                    payment.id, payment.kind
                ),
            );
        }
        if let Some(client_id) = payment.client_id {
            if client_id != draft.client_id {
                errors.push(
                    "client_id",
                    format!(
                        "payment #{} on contract #{id} belongs to client #{client_id}",
                        payment.id
                    ),
                );
            }
        }
    }
    errors.finish()
}

pub fn payment(draft: &PaymentDraft, ledger: &Ledger) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if draft.amount <= Decimal::ZERO {
        errors.push("amount", "must be greater than zero");
    }

    match (draft.contract_id, draft.client_id) {
        (None, None) => errors.push("contract_id", "payment must belong to a contract or a client"),
        (Some(contract_id), _) => match ledger.contract(contract_id) {
            Ok(contract) => {
                let kind = contract.counterparty().map(|c| c.kind());
                let expected = match draft.kind {
                    PaymentType::Client => None,
                    PaymentType::Vendor => Some(CounterpartyKind::Vendor),
                    PaymentType::Labor => Some(CounterpartyKind::Labor),
                };
                if expected.is_some() && expected != kind {
                    errors.push(
                        "type",
                        format!(
                            "{} payment does not match contract #{contract_id}",
                            draft.kind
                        ),
                    );
                }
                if let Some(client_id) = draft.client_id {
                    if client_id != contract.client_id {
                        errors.push(
                            "client_id",
                            format!("contract #{contract_id} belongs to another client"),
                        );
                    }
                }
            }
            Err(_) => errors.push(
                "contract_id",
                format!("contract #{contract_id} does not exist"),
            ),
        },
        (None, Some(client_id)) => {
            if ledger.client(client_id).is_err() {
                errors.push("client_id", format!("client #{client_id} does not exist"));
            }
            if draft.kind != PaymentType::Client {
                errors.push("type", "direct payments must be of type client");
            }
        }
    }
    errors.finish()
}

pub fn task(draft: &TaskDraft, ledger: &Ledger) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.required("title", &draft.title);
    if let Some(client_id) = draft.client_id {
        if ledger.client(client_id).is_err() {
            errors.push("client_id", format!("client #{client_id} does not exist"));
        }
    }
    errors.finish()
}

pub fn document(draft: &DocumentDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.required("name", &draft.name);
    errors.required("category", &draft.category);
    errors.required("file_path", &draft.file_path);
    errors.finish()
}
