use crate::adapters::vworld::{VWorldSettings, DEFAULT_ADDRESS_ENDPOINT, DEFAULT_SEARCH_ENDPOINT};
use crate::core::engine::DEFAULT_MAX_CANDIDATES;
use crate::domain::purpose::Purpose;
use crate::utils::error::{MeetError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_path, validate_positive_number,
    validate_required_field, validate_substituted, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const RESOLVER_KINDS: [&str; 2] = ["catalog", "vworld"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    pub catalog: Option<CatalogConfig>,
    pub engine: Option<EngineConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
    pub default_purpose: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            default_purpose: None,
        }
    }
}

fn default_service_name() -> String {
    "meetplanner".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_resolver_kind")]
    pub r#type: String,
    pub endpoint: Option<String>,
    pub search_endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            r#type: default_resolver_kind(),
            endpoint: None,
            search_endpoint: None,
            api_key: None,
            timeout_seconds: None,
            retry_attempts: None,
            retry_delay_ms: None,
        }
    }
}

fn default_resolver_kind() -> String {
    "catalog".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub max_candidates: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MeetError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MeetError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${VWORLD_API_KEY})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| MeetError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("service.name", &self.service.name)?;
        validate_one_of("resolver.type", &self.resolver.r#type, &RESOLVER_KINDS)?;

        if let Some(endpoint) = &self.resolver.endpoint {
            validate_url("resolver.endpoint", endpoint)?;
        }
        if let Some(endpoint) = &self.resolver.search_endpoint {
            validate_url("resolver.search_endpoint", endpoint)?;
        }

        if self.resolver.r#type == "vworld" {
            let api_key = validate_required_field("resolver.api_key", &self.resolver.api_key)?;
            validate_substituted("resolver.api_key", api_key)?;
            validate_non_empty_string("resolver.api_key", api_key)?;
        }

        if let Some(path) = self.catalog_path() {
            validate_path("catalog.path", path)?;
        }

        if let Some(max) = self.engine.as_ref().and_then(|e| e.max_candidates) {
            validate_positive_number("engine.max_candidates", max, 1)?;
        }

        Ok(())
    }

    pub fn resolver_kind(&self) -> &str {
        &self.resolver.r#type
    }

    pub fn catalog_path(&self) -> Option<&str> {
        self.catalog.as_ref().and_then(|c| c.path.as_deref())
    }

    pub fn max_candidates(&self) -> usize {
        self.engine
            .as_ref()
            .and_then(|e| e.max_candidates)
            .unwrap_or(DEFAULT_MAX_CANDIDATES)
    }

    pub fn default_purpose(&self) -> Purpose {
        self.service
            .default_purpose
            .as_deref()
            .map(Purpose::from_tag)
            .unwrap_or_default()
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// 組出 VWorld 解析器設定；未指定的欄位使用預設值
    pub fn vworld_settings(&self) -> Result<VWorldSettings> {
        let api_key = validate_required_field("resolver.api_key", &self.resolver.api_key)?;
        validate_substituted("resolver.api_key", api_key)?;

        let mut settings = VWorldSettings::new(api_key.clone());
        settings.address_endpoint = self
            .resolver
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ADDRESS_ENDPOINT.to_string());
        settings.search_endpoint = self
            .resolver
            .search_endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_SEARCH_ENDPOINT.to_string());
        if let Some(secs) = self.resolver.timeout_seconds {
            settings.timeout = Duration::from_secs(secs);
        }
        if let Some(attempts) = self.resolver.retry_attempts {
            settings.retry_attempts = attempts;
        }
        if let Some(ms) = self.resolver.retry_delay_ms {
            settings.retry_delay = Duration::from_millis(ms);
        }
        Ok(settings)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
