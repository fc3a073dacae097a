use crate::core::{ConfigProvider, Page};
use crate::utils::error::{AuthError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_STORAGE_PATH: &str = "./.vsx/local_storage.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub pages: PagesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    #[serde(default = "default_login_page")]
    pub login: String,
    #[serde(default = "default_dashboard_page")]
    pub dashboard: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_storage_path() -> String {
    DEFAULT_STORAGE_PATH.to_string()
}

fn default_login_page() -> String {
    Page::Login.default_file_name().to_string()
}

fn default_dashboard_page() -> String {
    Page::Dashboard.default_file_name().to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_seconds: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            login: default_login_page(),
            dashboard: default_dashboard_page(),
        }
    }
}

impl AuthConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AuthError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AuthError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${VSX_API_URL}); 未設定的變數保留原文
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| AuthError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .format
            .as_deref()
            .and_then(LogFormat::parse)
            .unwrap_or_default()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;

        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_positive_number("api.timeout_seconds", timeout, 1)?;
        }

        validation::validate_path("storage.path", &self.storage.path)?;
        validation::validate_non_empty_string("pages.login", &self.pages.login)?;
        validation::validate_non_empty_string("pages.dashboard", &self.pages.dashboard)?;

        if let Some(format) = &self.logging.format {
            validation::validate_one_of("logging.format", format, &["compact", "json"])?;
        }

        if let Some(level) = &self.logging.level {
            validation::validate_one_of(
                "logging.level",
                level,
                &["trace", "debug", "info", "warn", "error"],
            )?;
        }

        Ok(())
    }
}

impl ConfigProvider for AuthConfig {
    fn api_url(&self) -> &str {
        &self.api.base_url
    }

    fn storage_path(&self) -> &str {
        &self.storage.path
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_seconds.map(Duration::from_secs)
    }

    fn page_file_name(&self, page: Page) -> &str {
        match page {
            Page::Login => &self.pages.login,
            Page::Dashboard => &self.pages.dashboard,
        }
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AuthConfig::from_toml_str("").unwrap();

        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.storage_path(), DEFAULT_STORAGE_PATH);
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.page_file_name(Page::Login), "login.html");
        assert_eq!(config.page_file_name(Page::Dashboard), "dashboard.html");
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
base_url = "https://api.vsxchange.example/api"
timeout_seconds = 15

[storage]
path = "/tmp/vsx/storage.json"

[pages]
login = "signin.html"
dashboard = "home.html"

[logging]
level = "debug"
format = "json"
"#;

        let config = AuthConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_url(), "https://api.vsxchange.example/api");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.storage_path(), "/tmp/vsx/storage.json");
        assert_eq!(config.page_file_name(Page::Dashboard), "home.html");
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("VSX_TEST_BASE_URL", "http://10.0.0.5:8000");

        let toml_content = r#"
[api]
base_url = "${VSX_TEST_BASE_URL}"

[storage]
path = "${VSX_TEST_UNSET_VARIABLE}/storage.json"
"#;

        let config = AuthConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.storage.path, "${VSX_TEST_UNSET_VARIABLE}/storage.json");

        std::env::remove_var("VSX_TEST_BASE_URL");
    }

    #[test]
    fn test_config_validation() {
        let config = AuthConfig::from_toml_str("[api]\nbase_url = \"localhost:5000\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = AuthConfig::from_toml_str("[api]\ntimeout_seconds = 0\n").unwrap();
        assert!(config.validate().is_err());

        let config = AuthConfig::from_toml_str("[pages]\nlogin = \"  \"\n").unwrap();
        assert!(config.validate().is_err());

        let config = AuthConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AuthConfig::from_toml_str("[api\nbase_url = 1").unwrap_err();
        assert!(matches!(err, AuthError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nbase_url = \"http://127.0.0.1:8000\"\n")
            .unwrap();

        let config = AuthConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api_url(), "http://127.0.0.1:8000");
    }
}
