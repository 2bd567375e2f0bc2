use thiserror::Error;

/// 單次送出嘗試的傳輸層錯誤，會觸發重試
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Endpoint responded with status {status}")]
    Status { status: u16 },

    #[error("Endpoint unreachable: {message}")]
    Unreachable { message: String },
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Delivery failed after {attempts} attempt(s): {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: TransportError,
    },

    #[error("Validation error on '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GatewayError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            GatewayError::RetriesExhausted { .. } => {
                "Could not reach the lead endpoint".to_string()
            }
            GatewayError::Validation { field, .. } => {
                format!("The '{}' field is not filled in correctly", field)
            }
            GatewayError::ConfigError { .. }
            | GatewayError::ConfigValidationError { .. }
            | GatewayError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            GatewayError::IoError(e) => format!("File access failed: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GatewayError::RetriesExhausted { .. } => {
                "Check the network connection and the endpoint URL, then submit again"
            }
            GatewayError::Validation { .. } => {
                "Name needs at least 2 letters, phone needs 9 digits and an age bracket must be chosen"
            }
            GatewayError::ConfigError { .. }
            | GatewayError::ConfigValidationError { .. }
            | GatewayError::InvalidConfigValueError { .. } => {
                "Review the TOML configuration file and any ${VAR} placeholders it uses"
            }
            GatewayError::IoError(_) => "Make sure the file exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
