use crate::config::{validate_provider, DEFAULT_BASE_URL};
use crate::core::{ConfigProvider, Credentials};
use crate::utils::error::{FetchError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub files: FilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub stax: String,
    pub serial: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    #[serde(default = "default_sec_file")]
    pub sec_file: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_sec_file() -> String {
    "sec.txt".to_string()
}

fn default_output_dir() -> String {
    "pdf".to_string()
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            sec_file: default_sec_file(),
            output_dir: default_output_dir(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FetchError::config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| FetchError::config(format!("TOML parsing error: {}", e)))
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| FetchError::config(format!("Invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        self.api.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn tax_id(&self) -> &str {
        &self.api.stax
    }

    fn serial(&self) -> &str {
        &self.api.serial
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            username: self.credentials.username.clone(),
            password: self.credentials.password.clone(),
        }
    }

    fn sec_file(&self) -> &str {
        &self.files.sec_file
    }

    fn output_dir(&self) -> &str {
        &self.files.output_dir
    }

    fn timeout_seconds(&self) -> u64 {
        self.api.timeout_seconds.unwrap_or(60)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
