use serde::{Deserialize, Serialize};

use crate::filter::DEFAULT_PAGE_SIZE;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub firm: Firm,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub export: ExportSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Firm {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Rows per page on list screens.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExportSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_output_dir() -> String {
    "exports".to_string()
}
