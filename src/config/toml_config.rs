use crate::core::dedup::DEFAULT_SIMILARITY_THRESHOLD;
use crate::core::phone::PhoneNormalizer;
use crate::core::pipeline::DEFAULT_MAX_RECORDS_PER_SOURCE;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{MergeError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub dedup: DedupConfig,
    pub phone: PhoneConfig,
    pub sources: SourcesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    pub similarity_threshold: u8,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneConfig {
    pub default_region: String,
}

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            default_region: "IN".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub max_records_per_source: usize,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            max_records_per_source: DEFAULT_MAX_RECORDS_PER_SOURCE,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub format: LogFormat,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid"))
}

impl MergeConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MergeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MergeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LEAD_THRESHOLD})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_range(
            "dedup.similarity_threshold",
            self.dedup.similarity_threshold,
            0,
            100,
        )?;

        validate_non_empty_string("phone.default_region", &self.phone.default_region)?;
        PhoneNormalizer::from_region_code(&self.phone.default_region)?;

        validate_positive_number(
            "sources.max_records_per_source",
            self.sources.max_records_per_source,
            1,
        )?;

        Ok(())
    }
}

impl ConfigProvider for MergeConfig {
    fn similarity_threshold(&self) -> u8 {
        self.dedup.similarity_threshold
    }

    fn default_region(&self) -> &str {
        &self.phone.default_region
    }

    fn max_records_per_source(&self) -> usize {
        self.sources.max_records_per_source
    }
}

impl Validate for MergeConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
