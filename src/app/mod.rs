//! Run orchestration shared by the binary and the integration tests.

use crate::config::cli::LocalStorage;
use crate::core::client::{request_url, HttpInvoiceClient};
use crate::core::engine::FetchEngine;
use crate::core::identifiers::load_identifiers;
use crate::core::{ConfigProvider, RunSummary};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::path::Path;
use url::Url;

/// Everything that must hold before the first request: valid settings,
/// credentials, and a non-empty identifier list.
pub fn preflight<C: ConfigProvider + Validate>(config: &C) -> Result<Vec<String>> {
    config.validate()?;
    load_identifiers(config.sec_file())
}

pub async fn fetch_all<C: ConfigProvider>(config: &C, identifiers: &[String]) -> Result<RunSummary> {
    let client = HttpInvoiceClient::from_config(config)?;
    let storage = LocalStorage::new(config.output_dir());
    tracing::debug!(
        "Using {} (timeout {}s), output to {}",
        config.base_url(),
        config.timeout_seconds(),
        storage.base_path().display()
    );

    Ok(FetchEngine::new(client, storage).run(identifiers).await)
}

pub fn dry_run_urls<C: ConfigProvider>(config: &C, identifiers: &[String]) -> Result<Vec<Url>> {
    identifiers
        .iter()
        .map(|id| request_url(config.base_url(), config.tax_id(), config.serial(), id))
        .collect()
}

pub fn write_report<P: AsRef<Path>>(path: P, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    Ok(())
}
