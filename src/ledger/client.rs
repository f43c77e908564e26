use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::status::EntityStatus;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Client {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub contract_amount: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: EntityStatus,
}

impl Client {
    /// Agreed amount with the client, zero when none was recorded.
    pub fn principal(&self) -> Decimal {
        self.contract_amount.unwrap_or(Decimal::ZERO)
    }

    pub fn to_draft(&self) -> ClientDraft {
        ClientDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            contract_amount: self.contract_amount,
            notes: self.notes.clone(),
            status: self.status,
        }
    }
}

/// Client fields as entered, before an id is assigned.
#[derive(Debug, Clone, Default)]
pub struct ClientDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub contract_amount: Option<Decimal>,
    pub notes: Option<String>,
    pub status: EntityStatus,
}

impl ClientDraft {
    pub fn into_client(self, id: u32) -> Client {
        Client {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            contract_amount: self.contract_amount,
            notes: self.notes,
            status: self.status,
        }
    }
}
