use crate::core::{ConfigProvider, LookupEndpoint, StalePolicy};
use crate::utils::error::{AutofillError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_FLASH_DISMISS_MS: u64 = 5000;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub autofill: AutofillConfig,
    #[serde(default)]
    pub page: PageConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub base_url: String,
    #[serde(default)]
    pub endpoint: LookupEndpoint,
    pub timeout_seconds: Option<u64>,
    pub session_cookie: Option<String>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutofillConfig {
    pub min_length: Option<usize>,
    pub stale_policy: Option<StalePolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageConfig {
    pub flash_dismiss_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AutofillError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AutofillError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOUSEHELP_SESSION})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AutofillError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("directory.base_url", &self.directory.base_url)?;

        if let Some(min_length) = self.autofill.min_length {
            validation::validate_positive_number("autofill.min_length", min_length, 1)?;
        }

        if let Some(timeout) = self.directory.timeout_seconds {
            validation::validate_range(
                "directory.timeout_seconds",
                timeout,
                1,
                MAX_TIMEOUT_SECONDS,
            )?;
        }

        if let Some(cookie) = &self.directory.session_cookie {
            validation::validate_non_empty_string("directory.session_cookie", cookie)?;
            if cookie.contains("${") {
                return Err(AutofillError::ConfigValidationError {
                    field: "directory.session_cookie".to_string(),
                    message: "unresolved environment variable".to_string(),
                });
            }
        }

        if let Some(ms) = self.page.flash_dismiss_ms {
            validation::validate_positive_number("page.flash_dismiss_ms", ms as usize, 1)?;
        }

        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.directory.base_url
    }

    fn endpoint(&self) -> LookupEndpoint {
        self.directory.endpoint
    }

    fn min_length(&self) -> usize {
        self.autofill
            .min_length
            .unwrap_or(crate::core::resolver::DEFAULT_MIN_LENGTH)
    }

    fn stale_policy(&self) -> StalePolicy {
        self.autofill.stale_policy.unwrap_or_default()
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.directory.timeout_seconds
    }

    fn session_cookie(&self) -> Option<&str> {
        self.directory.session_cookie.as_deref()
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        self.directory
            .headers
            .iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    fn flash_dismiss_after(&self) -> Duration {
        Duration::from_millis(self.page.flash_dismiss_ms.unwrap_or(DEFAULT_FLASH_DISMISS_MS))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
