use crate::utils::error::{FetchError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(FetchError::config(format!("{}: URL cannot be empty", field_name)));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(FetchError::config(format!(
                "{}: unsupported URL scheme '{}' in '{}'",
                field_name, scheme, url_str
            ))),
        },
        Err(e) => Err(FetchError::config(format!(
            "{}: invalid URL format '{}': {}",
            field_name, url_str, e
        ))),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FetchError::config(format!("{}: path cannot be empty", field_name)));
    }

    if path.contains('\0') {
        return Err(FetchError::config(format!(
            "{}: path contains null bytes",
            field_name
        )));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(FetchError::config(format!(
            "{}: value {} must be at least {}",
            field_name, value, min_value
        )));
    }
    Ok(())
}

/// Both halves of the Basic auth pair must be present before any request is sent.
pub fn validate_credentials(username: &str, password: &str) -> Result<()> {
    if username.is_empty() || password.is_empty() {
        return Err(FetchError::config(
            "Missing credentials: set FPT_EINV_USER and FPT_EINV_PASS or provide them in the config file",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("base_url", "https://example.com/search-icr").is_ok());
        assert!(validate_url("base_url", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("base_url", "").is_err());
        assert!(validate_url("base_url", "invalid-url").is_err());
        assert!(validate_url("base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_dir", "pdf").is_ok());
        assert!(validate_path("output_dir", "").is_err());
        assert!(validate_path("output_dir", "pd\0f").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("timeout_seconds", 60, 1).is_ok());
        assert!(validate_positive_number("timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_credentials() {
        assert!(validate_credentials("user", "secret").is_ok());

        let err = validate_credentials("", "secret").unwrap_err();
        assert!(err.is_fatal());
        assert!(validate_credentials("user", "").is_err());
        assert!(validate_credentials("", "").is_err());
    }
}
