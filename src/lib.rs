pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use crate::core::{client::HttpInvoiceClient, engine::FetchEngine};
pub use crate::domain::model::{Credentials, InvoiceOutcome, OutcomeStatus, RunSummary};
pub use crate::utils::error::{FetchError, Result};
