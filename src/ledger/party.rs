//! Contract counterparties: vendors supply goods, labor supplies work.

use serde::{Deserialize, Serialize};

use super::status::EntityStatus;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Vendor {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category: String,
    #[serde(default)]
    pub status: EntityStatus,
}

impl Vendor {
    pub fn to_draft(&self) -> VendorDraft {
        VendorDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            category: self.category.clone(),
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VendorDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category: String,
    pub status: EntityStatus,
}

impl VendorDraft {
    pub fn into_vendor(self, id: u32) -> Vendor {
        Vendor {
            id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            category: self.category.trim().to_string(),
            status: self.status,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Labor {
    pub id: u32,
    pub name: String,
    pub phone: String,
    pub specialization: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: EntityStatus,
}

impl Labor {
    pub fn to_draft(&self) -> LaborDraft {
        LaborDraft {
            name: self.name.clone(),
            phone: self.phone.clone(),
            specialization: self.specialization.clone(),
            notes: self.notes.clone(),
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LaborDraft {
    pub name: String,
    pub phone: String,
    pub specialization: String,
    pub notes: Option<String>,
    pub status: EntityStatus,
}

impl LaborDraft {
    pub fn into_labor(self, id: u32) -> Labor {
        Labor {
            id,
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            specialization: self.specialization.trim().to_string(),
            notes: self.notes,
            status: self.status,
        }
    }
}
