use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Metadata for a file kept in external object storage.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Document {
    pub id: u32,
    pub name: String,
    pub category: String,
    /// Storage key of the blob. Never opened by this crate.
    pub file_path: String,
    pub uploaded_on: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct DocumentDraft {
    pub name: String,
    pub category: String,
    pub file_path: String,
    pub uploaded_on: NaiveDate,
}

impl DocumentDraft {
    pub fn into_document(self, id: u32) -> Document {
        Document {
            id,
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            file_path: self.file_path.trim().to_string(),
            uploaded_on: self.uploaded_on,
        }
    }
}
