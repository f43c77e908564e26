use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::status::{EntityStatus, PaymentType};
use crate::error::AtelierError;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Contract {
    pub id: u32,
    pub client_id: u32,
    #[serde(default)]
    pub vendor_id: Option<u32>,
    #[serde(default)]
    pub labor_id: Option<u32>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub contract_amount: Decimal,
    pub commission_percentage: Decimal,
    /// Stored as entered; not re-derived from the percentage.
    pub commission_amount: Decimal,
    #[serde(default)]
    pub status: EntityStatus,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// The vendor or labor side of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counterparty {
    Vendor(u32),
    Labor(u32),
}

impl Counterparty {
    pub fn kind(&self) -> CounterpartyKind {
        match self {
            Counterparty::Vendor(_) => CounterpartyKind::Vendor,
            Counterparty::Labor(_) => CounterpartyKind::Labor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterpartyKind {
    Vendor,
    Labor,
}

impl CounterpartyKind {
    /// Payment type used when paying out to this kind of counterparty.
    pub fn payment_type(&self) -> PaymentType {
        match self {
            CounterpartyKind::Vendor => PaymentType::Vendor,
            CounterpartyKind::Labor => PaymentType::Labor,
        }
    }
}

impl fmt::Display for CounterpartyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterpartyKind::Vendor => write!(f, "vendor"),
            CounterpartyKind::Labor => write!(f, "labor"),
        }
    }
}

impl FromStr for CounterpartyKind {
    type Err = AtelierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vendor" => Ok(CounterpartyKind::Vendor),
            "labor" => Ok(CounterpartyKind::Labor),
            _ => Err(AtelierError::InvalidChoice {
                what: "contract kind",
                value: s.to_string(),
                expected: "vendor, labor",
            }),
        }
    }
}

impl Contract {
    /// Returns the counterparty, or `None` for a row that names both or neither.
    pub fn counterparty(&self) -> Option<Counterparty> {
        match (self.vendor_id, self.labor_id) {
            (Some(id), None) => Some(Counterparty::Vendor(id)),
            (None, Some(id)) => Some(Counterparty::Labor(id)),
            _ => None,
        }
    }

    pub fn to_draft(&self) -> ContractDraft {
        ContractDraft {
            client_id: self.client_id,
            vendor_id: self.vendor_id,
            labor_id: self.labor_id,
            title: self.title.clone(),
            description: self.description.clone(),
            contract_amount: self.contract_amount,
            commission_percentage: self.commission_percentage,
            commission_amount: Some(self.commission_amount),
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// `contract_amount × percentage / 100`, rounded half-up to cents.
pub fn commission_for(contract_amount: Decimal, percentage: Decimal) -> Decimal {
    (contract_amount * percentage / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone)]
pub struct ContractDraft {
    pub client_id: u32,
    pub vendor_id: Option<u32>,
    pub labor_id: Option<u32>,
    pub title: String,
    pub description: Option<String>,
    pub contract_amount: Decimal,
    pub commission_percentage: Decimal,
    /// Derived from the percentage when left empty.
    pub commission_amount: Option<Decimal>,
    pub status: EntityStatus,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl ContractDraft {
    pub fn resolved_commission(&self) -> Decimal {
        self.commission_amount
            .unwrap_or_else(|| commission_for(self.contract_amount, self.commission_percentage))
    }

    pub fn into_contract(self, id: u32) -> Contract {
        let commission_amount = self.resolved_commission();
        Contract {
            id,
            client_id: self.client_id,
            vendor_id: self.vendor_id,
            labor_id: self.labor_id,
            title: self.title.trim().to_string(),
            description: self.description,
            contract_amount: self.contract_amount,
            commission_percentage: self.commission_percentage,
            commission_amount,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commission_is_derived_when_missing() {
        let draft = ContractDraft {
            client_id: 1,
            vendor_id: Some(1),
            labor_id: None,
            title: "Living room".to_string(),
            description: None,
            contract_amount: Decimal::new(250_000, 0),
            commission_percentage: Decimal::new(125, 1),
            commission_amount: None,
            status: EntityStatus::Active,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: None,
        };
        assert_eq!(draft.resolved_commission(), Decimal::new(31_250, 0));

        let explicit = ContractDraft {
            commission_amount: Some(Decimal::new(30_000, 0)),
            ..draft
        };
        assert_eq!(explicit.into_contract(4).commission_amount, Decimal::new(30_000, 0));
    }

    #[test]
    fn counterparty_requires_exactly_one_side() {
        let mut contract = ContractDraft {
            client_id: 1,
            vendor_id: Some(2),
            labor_id: None,
            title: "Kitchen".to_string(),
            description: None,
            contract_amount: Decimal::ZERO,
            commission_percentage: Decimal::ZERO,
            commission_amount: None,
            status: EntityStatus::Active,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: None,
        }
        .into_contract(1);
        assert_eq!(contract.counterparty(), Some(Counterparty::Vendor(2)));

        contract.labor_id = Some(3);
        assert_eq!(contract.counterparty(), None);

        contract.vendor_id = None;
        assert_eq!(contract.counterparty().map(|c| c.kind()), Some(CounterpartyKind::Labor));
    }
}
