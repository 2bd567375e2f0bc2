use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::{self, Validate};
use chrono::format::{Item, StrftimeItems};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycby96sNrHvf3eSDWZOrWCM1G_kyDkyGq6p9TcfxSowrzw-nv-0yRKbgg73XRdATKZnyemw/exec";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub endpoint: EndpointConfig,
    pub retry: RetryConfig,
    pub form: FormConfig,
    pub submission: SubmissionConfig,
}

/// 非 2xx 回應是否視為可重試的失敗
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    #[default]
    StatusAware,
    Opaque,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub url: String,
    pub delivery_mode: DeliveryMode,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub country_prefix: String,
    pub min_name_length: usize,
    pub phone_digits: usize,
    /// 空陣列表示接受任何非空選項
    pub age_brackets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    pub timezone: String,
    pub timestamp_format: String,
    pub settle_delay_ms: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            delivery_mode: DeliveryMode::default(),
            timeout_seconds: None,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1500,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            country_prefix: "+998".to_string(),
            min_name_length: 2,
            phone_digits: 9,
            age_brackets: Vec::new(),
        }
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            timezone: "Asia/Tashkent".to_string(),
            timestamp_format: "%d/%m/%Y, %H:%M:%S".to_string(),
            settle_delay_ms: 3500,
        }
    }
}

impl RetryConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

impl SubmissionConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| GatewayError::InvalidConfigValueError {
                field: "submission.timezone".to_string(),
                value: self.timezone.clone(),
                reason: e.to_string(),
            })
    }
}

impl GatewayConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GatewayError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，缺少的欄位使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GatewayError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LEAD_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| GatewayError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("endpoint.url", &self.endpoint.url)?;

        if let Some(timeout) = self.endpoint.timeout_seconds {
            validation::validate_range("endpoint.timeout_seconds", timeout, 1, 300)?;
        }

        validation::validate_range("retry.max_attempts", self.retry.max_attempts, 1, 10)?;
        validation::validate_range("retry.base_delay_ms", self.retry.base_delay_ms, 0, 60_000)?;

        validation::validate_non_empty_string("form.country_prefix", &self.form.country_prefix)?;
        validation::validate_range("form.min_name_length", self.form.min_name_length, 1, 100)?;
        validation::validate_range("form.phone_digits", self.form.phone_digits, 1, 15)?;

        if let Some(blank) = self.form.age_brackets.iter().find(|b| b.trim().is_empty()) {
            return Err(GatewayError::InvalidConfigValueError {
                field: "form.age_brackets".to_string(),
                value: blank.clone(),
                reason: "Age brackets cannot be blank".to_string(),
            });
        }

        self.submission.tz()?;
        validation::validate_non_empty_string(
            "submission.timestamp_format",
            &self.submission.timestamp_format,
        )?;
        if StrftimeItems::new(&self.submission.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(GatewayError::InvalidConfigValueError {
                field: "submission.timestamp_format".to_string(),
                value: self.submission.timestamp_format.clone(),
                reason: "Unsupported strftime pattern".to_string(),
            });
        }

        Ok(())
    }
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
