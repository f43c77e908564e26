use std::path::PathBuf;
use thiserror::Error;

use crate::validate::ValidationErrors;

#[derive(Error, Debug)]
pub enum AtelierError {
    #[error("Data directory not found at {0}. Run 'atelier init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Data directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Client #{0} not found")]
    ClientNotFound(u32),

    #[error("Vendor #{0} not found")]
    VendorNotFound(u32),

    #[error("Labor #{0} not found")]
    LaborNotFound(u32),

    #[error("Contract #{0} not found")]
    ContractNotFound(u32),

    #[error("Payment #{0} not found")]
    PaymentNotFound(u32),

    #[error("Task #{0} not found")]
    TaskNotFound(u32),

    #[error("Document #{0} not found")]
    DocumentNotFound(u32),

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid {what} '{value}'. Expected one of: {expected}")]
    InvalidChoice {
        what: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write ledger: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ValidationErrors> for AtelierError {
    fn from(errors: ValidationErrors) -> Self {
        AtelierError::Validation(errors)
    }
}

pub type Result<T> = std::result::Result<T, AtelierError>;
