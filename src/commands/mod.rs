pub mod clients;
pub mod contracts;
pub mod dashboard;
pub mod documents;
pub mod export;
pub mod parties;
pub mod payments;
pub mod setup;
pub mod tasks;

use std::path::PathBuf;

use atelier::config::{ensure_initialized, load_config, Config};
use atelier::error::Result;
use atelier::filter::Page;
use atelier::format::{format_money, parse_amount, parse_date};
use atelier::ledger::{load_ledger, save_ledger, Ledger};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tabled::{settings::Style, Table, Tabled};

/// Per-invocation state shared by every command.
pub struct Context {
    pub data_dir: PathBuf,
}

impl Context {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Config and ledger for a read; fails if `init` has not been run.
    pub fn open(&self) -> Result<(Config, Ledger)> {
        ensure_initialized(&self.data_dir)?;
        let config = load_config(&self.data_dir)?;
        let ledger = load_ledger(&self.data_dir)?;
        Ok((config, ledger))
    }

    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        save_ledger(&self.data_dir, ledger)
    }
}

pub fn money(config: &Config, value: Decimal) -> String {
    format_money(value, &config.display.currency_symbol)
}

pub fn optional_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    value.map(parse_date).transpose()
}

pub fn optional_amount(field: &'static str, value: Option<&str>) -> Result<Option<Decimal>> {
    value.map(|v| parse_amount(field, v)).transpose()
}

pub fn print_table<T: Tabled>(rows: Vec<T>) {
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
}

/// Table for one page plus a "Page x of y" line, or `empty` when nothing matched.
pub fn print_page<T: Tabled>(page: Page<T>, noun: &str, empty: &str) {
    if page.total_items == 0 {
        println!("{empty}");
        return;
    }
    let Page {
        items,
        page,
        total_pages,
        total_items,
    } = page;
    print_table(items);
    println!("Page {page} of {total_pages} ({total_items} {noun})");
}

/// Empty strings are treated as "not given" for optional text fields.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
