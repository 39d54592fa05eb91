use crate::config::toml_config::{TomlConfig, DEFAULT_FLASH_DISMISS_MS};
use crate::core::{resolver::DEFAULT_MIN_LENGTH, ConfigProvider, LookupEndpoint, StalePolicy};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Parser)]
#[command(name = "househelp-autofill")]
#[command(about = "Resolve a pincode to state, city and society the way the admin forms do")]
pub struct CliConfig {
    /// Pincode typed into the form
    #[arg(long)]
    pub pincode: String,

    /// Feed every keystroke prefix as its own input event
    #[arg(long)]
    pub keystrokes: bool,

    /// Base URL of the HouseHelpNetwork backend
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long, value_enum)]
    pub endpoint: Option<LookupEndpoint>,

    #[arg(long)]
    pub min_length: Option<usize>,

    #[arg(long, value_enum)]
    pub stale_policy: Option<StalePolicy>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Cookie header sent with every request, e.g. "session=..."
    #[arg(long, env = "HOUSEHELP_SESSION_COOKIE")]
    pub session_cookie: Option<String>,

    /// TOML configuration file; flags given on the command line win
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 將命令列參數覆蓋到 TOML 配置上
    pub fn apply_to(&self, config: &mut TomlConfig) {
        if let Some(base_url) = &self.base_url {
            config.directory.base_url = base_url.clone();
        }
        if let Some(endpoint) = self.endpoint {
            config.directory.endpoint = endpoint;
        }
        if let Some(timeout) = self.timeout_seconds {
            config.directory.timeout_seconds = Some(timeout);
        }
        if let Some(cookie) = &self.session_cookie {
            config.directory.session_cookie = Some(cookie.clone());
        }
        if let Some(min_length) = self.min_length {
            config.autofill.min_length = Some(min_length);
        }
        if let Some(policy) = self.stale_policy {
            config.autofill.stale_policy = Some(policy);
        }
    }
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn endpoint(&self) -> LookupEndpoint {
        self.endpoint.unwrap_or_default()
    }

    fn min_length(&self) -> usize {
        self.min_length.unwrap_or(DEFAULT_MIN_LENGTH)
    }

    fn stale_policy(&self) -> StalePolicy {
        self.stale_policy.unwrap_or_default()
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn session_cookie(&self) -> Option<&str> {
        self.session_cookie.as_deref()
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        Vec::new()
    }

    fn flash_dismiss_after(&self) -> Duration {
        Duration::from_millis(DEFAULT_FLASH_DISMISS_MS)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", self.base_url())?;
        validation::validate_non_empty_string("pincode", &self.pincode)?;
        validation::validate_positive_number("min_length", self.min_length(), 1)?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_range(
                "timeout_seconds",
                timeout,
                1,
                crate::config::toml_config::MAX_TIMEOUT_SECONDS,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["househelp-autofill", "--pincode", "560001"]);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.endpoint(), LookupEndpoint::Search);
        assert_eq!(config.min_length(), 6);
        assert!(!config.keystrokes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_value_enums() {
        let config = CliConfig::parse_from([
            "househelp-autofill",
            "--pincode",
            "110001",
            "--endpoint",
            "exact",
            "--stale-policy",
            "latest-only",
        ]);
        assert_eq!(config.endpoint(), LookupEndpoint::Exact);
        assert_eq!(config.stale_policy(), StalePolicy::LatestOnly);
    }

    #[test]
    fn test_flags_override_file() {
        let mut file_config = TomlConfig::from_toml_str(
            r#"
[directory]
base_url = "http://from-file:5000"
timeout_seconds = 30

[autofill]
min_length = 4
"#,
        )
        .unwrap();
        let cli = CliConfig::parse_from([
            "househelp-autofill",
            "--pincode",
            "560001",
            "--base-url",
            "http://from-flag:5000",
            "--stale-policy",
            "latest-only",
        ]);

        cli.apply_to(&mut file_config);

        assert_eq!(file_config.base_url(), "http://from-flag:5000");
        assert_eq!(file_config.timeout_seconds(), Some(30));
        assert_eq!(file_config.min_length(), 4);
        assert_eq!(file_config.stale_policy(), StalePolicy::LatestOnly);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = CliConfig::parse_from([
            "househelp-autofill",
            "--pincode",
            "560001",
            "--base-url",
            "localhost:5000/x",
        ]);
        assert!(config.validate().is_err());
    }
}
