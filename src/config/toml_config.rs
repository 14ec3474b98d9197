use crate::domain::model::SortOrder;
use crate::domain::ports::{StoreConfig, StoreKind};
use crate::utils::error::{ForumError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub store: StoreSection,
    pub logging: Option<LoggingConfig>,
    pub query: Option<QueryConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    pub r#type: String,
    pub path: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub default_order: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ForumError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ForumError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FORUM_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ForumError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn kind(&self) -> Result<StoreKind> {
        match self.store.r#type.as_str() {
            "memory" => Ok(StoreKind::Memory),
            "file" => Ok(StoreKind::File),
            "http" => Ok(StoreKind::Http),
            other => Err(ForumError::InvalidConfigValueError {
                field: "store.type".to_string(),
                value: other.to_string(),
                reason: "Valid store types: memory, file, http".to_string(),
            }),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        match self.kind()? {
            StoreKind::Memory => {}
            StoreKind::File => {
                let path = validation::validate_required_field("store.path", &self.store.path)?;
                validation::validate_path("store.path", path)?;
                validation::validate_file_extension("store.path", path, &["json"])?;
            }
            StoreKind::Http => {
                let endpoint =
                    validation::validate_required_field("store.endpoint", &self.store.endpoint)?;
                validation::validate_url("store.endpoint", endpoint)?;
            }
        }

        if let Some(timeout) = self.store.timeout_seconds {
            validation::validate_range("store.timeout_seconds", timeout, 1, 300)?;
        }

        let valid_formats = ["compact", "json"];
        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_ref()) {
            if !valid_formats.contains(&format.as_str()) {
                return Err(ForumError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.clone(),
                    reason: format!("Unsupported format. Valid formats: {}", valid_formats.join(", ")),
                });
            }
        }

        if let Some(order) = self.query.as_ref().and_then(|q| q.default_order.as_ref()) {
            order
                .parse::<SortOrder>()
                .map_err(|_| ForumError::InvalidConfigValueError {
                    field: "query.default_order".to_string(),
                    value: order.clone(),
                    reason: "Valid orders: newest, active, unanswered".to_string(),
                })?;
        }

        Ok(())
    }

    pub fn log_format(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .unwrap_or("compact")
    }

    pub fn verbose_logging(&self) -> bool {
        matches!(
            self.logging.as_ref().and_then(|l| l.level.as_deref()),
            Some("debug") | Some("trace")
        )
    }

    pub fn default_order(&self) -> Option<&str> {
        self.query.as_ref().and_then(|q| q.default_order.as_deref())
    }
}

impl StoreConfig for TomlConfig {
    fn store_kind(&self) -> StoreKind {
        self.kind().unwrap_or(StoreKind::Memory)
    }

    fn store_path(&self) -> Option<&str> {
        self.store.path.as_deref()
    }

    fn endpoint(&self) -> Option<&str> {
        self.store.endpoint.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.store.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
