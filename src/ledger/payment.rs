use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::status::PaymentType;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Payment {
    pub id: u32,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: PaymentType,
    #[serde(default)]
    pub contract_id: Option<u32>,
    /// Set for direct client payments that are not tied to a contract.
    #[serde(default)]
    pub client_id: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Payment {
    pub fn is_direct(&self) -> bool {
        self.contract_id.is_none()
    }

    pub fn to_draft(&self) -> PaymentDraft {
        PaymentDraft {
            amount: self.amount,
            date: self.date,
            kind: self.kind,
            contract_id: self.contract_id,
            client_id: self.client_id,
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaymentDraft {
    pub amount: Decimal,
    pub date: NaiveDate,
    pub kind: PaymentType,
    pub contract_id: Option<u32>,
    pub client_id: Option<u32>,
    pub description: Option<String>,
}

impl PaymentDraft {
    pub fn into_payment(self, id: u32) -> Payment {
        Payment {
            id,
            amount: self.amount,
            date: self.date,
            kind: self.kind,
            contract_id: self.contract_id,
            client_id: self.client_id,
            description: self.description,
        }
    }
}
