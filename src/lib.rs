pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod finance;
pub mod format;
pub mod ledger;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{Config, Firm};
pub use error::{AtelierError, Result};
pub use finance::{Balance, Bucket, DashboardSummary, PaymentStatus};
pub use ledger::{Client, Contract, Document, Labor, Ledger, Payment, PaymentType, Task, Vendor};
