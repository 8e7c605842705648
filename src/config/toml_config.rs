use crate::adapters::gemini::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECONDS};
use crate::core::brief::DEFAULT_MODEL;
use crate::core::ConfigProvider;
use crate::domain::model::{FilterConfiguration, RegionFilter, ALL_REGIONS, DEFAULT_DAYS_HORIZON};
use crate::utils::error::{RadarError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder regex is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadarConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub filters: FiltersConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON contract file; the bundled dataset is used when absent.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersConfig {
    pub days_horizon: Option<i64>,
    pub region: Option<String>,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            days_horizon: Some(DEFAULT_DAYS_HORIZON),
            region: Some(ALL_REGIONS.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: Some(DEFAULT_MODEL.to_string()),
            endpoint: Some(DEFAULT_ENDPOINT.to_string()),
            timeout_seconds: Some(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl RadarConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RadarError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RadarError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url("generator.endpoint", self.endpoint())?;

        crate::utils::validation::validate_range(
            "generator.timeout_seconds",
            self.timeout_seconds(),
            1,
            300,
        )?;

        crate::utils::validation::validate_non_empty_string("generator.model", self.model())?;

        if let Some(path) = &self.data.path {
            crate::utils::validation::validate_path("data.path", path)?;
        }

        if self.days_horizon() < 0 {
            return Err(RadarError::InvalidConfigValueError {
                field: "filters.days_horizon".to_string(),
                value: self.days_horizon().to_string(),
                reason: "Days horizon cannot be negative".to_string(),
            });
        }

        self.region()?;
        Ok(())
    }

    pub fn days_horizon(&self) -> i64 {
        self.filters.days_horizon.unwrap_or(DEFAULT_DAYS_HORIZON)
    }

    pub fn region(&self) -> Result<RegionFilter> {
        match &self.filters.region {
            Some(region) => region.parse(),
            None => Ok(RegionFilter::All),
        }
    }

    /// Starting filter state for a radar session.
    pub fn initial_filter(&self) -> Result<FilterConfiguration> {
        Ok(FilterConfiguration {
            days_horizon: self.days_horizon(),
            region: self.region()?,
            ..FilterConfiguration::default()
        })
    }

    pub fn data_path(&self) -> Option<&str> {
        self.data.path.as_deref()
    }
}

impl ConfigProvider for RadarConfig {
    fn model(&self) -> &str {
        self.generator.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn endpoint(&self) -> &str {
        self.generator.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    fn timeout_seconds(&self) -> u64 {
        self.generator
            .timeout_seconds
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    /// A blank key or a `${VAR}` placeholder left unresolved counts as no key.
    fn api_key(&self) -> Option<&str> {
        self.generator
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !ENV_PLACEHOLDER.is_match(key))
    }
}

impl Validate for RadarConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
