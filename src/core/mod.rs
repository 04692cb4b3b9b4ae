pub mod client;
pub mod engine;
pub mod extract;
pub mod identifiers;

pub use crate::domain::model::{Credentials, InvoiceOutcome, OutcomeStatus, RunSummary};
pub use crate::domain::ports::{ConfigProvider, InvoiceApi, Storage};
pub use crate::utils::error::Result;
