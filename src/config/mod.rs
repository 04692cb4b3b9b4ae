pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, Credentials};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "https://api.einvoice.fpt.com.vn/search-icr";

#[derive(Debug, Clone, Parser)]
#[command(name = "einvoice-fetch")]
#[command(about = "Download e-invoice PDFs for a list of lookup codes")]
pub struct CliConfig {
    #[arg(long, env = "FPT_EINV_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Seller tax id sent as `stax`
    #[arg(long, env = "FPT_EINV_STAX", default_value = "")]
    pub stax: String,

    #[arg(long, env = "FPT_EINV_SERIAL", default_value = "")]
    pub serial: String,

    #[arg(long, env = "FPT_EINV_USER", default_value = "")]
    pub username: String,

    #[arg(long, env = "FPT_EINV_PASS", default_value = "", hide_env_values = true)]
    pub password: String,

    /// File with one lookup code per line
    #[arg(long, default_value = "sec.txt")]
    pub sec_file: String,

    #[arg(long, default_value = "pdf")]
    pub output_dir: String,

    #[arg(long, default_value = "60")]
    pub timeout_seconds: u64,

    /// Load settings from a TOML file instead of flags/environment
    #[arg(long)]
    pub config: Option<String>,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<String>,

    /// Print the request URLs without sending anything
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tax_id(&self) -> &str {
        &self.stax
    }

    fn serial(&self) -> &str {
        &self.serial
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    fn sec_file(&self) -> &str {
        &self.sec_file
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

/// Shared checks for any configuration source. Credentials come first so
/// a missing login is reported before anything else.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    let credentials = config.credentials();
    validation::validate_credentials(&credentials.username, &credentials.password)?;
    validation::validate_url("base_url", config.base_url())?;
    validation::validate_path("sec_file", config.sec_file())?;
    validation::validate_path("output_dir", config.output_dir())?;
    validation::validate_positive_number("timeout_seconds", config.timeout_seconds(), 1)?;
    Ok(())
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
