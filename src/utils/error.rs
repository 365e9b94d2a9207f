use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Cookie data schema error at row {row}: {message}")]
    SchemaError { row: usize, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AuditError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AuditError::ApiError(_) | AuditError::HttpStatusError { .. } => ErrorCategory::Network,
            AuditError::CsvError(_)
            | AuditError::SerializationError(_)
            | AuditError::SchemaError { .. } => ErrorCategory::Data,
            AuditError::ConfigValidationError { .. }
            | AuditError::InvalidConfigValueError { .. }
            | AuditError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AuditError::IoError(_) | AuditError::ZipError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路錯誤通常重跑即可
            AuditError::ApiError(_) | AuditError::HttpStatusError { .. } => ErrorSeverity::Medium,
            AuditError::CsvError(_)
            | AuditError::SerializationError(_)
            | AuditError::SchemaError { .. }
            | AuditError::ConfigValidationError { .. }
            | AuditError::InvalidConfigValueError { .. }
            | AuditError::MissingConfigError { .. } => ErrorSeverity::High,
            AuditError::IoError(_) | AuditError::ZipError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AuditError::ApiError(_) => {
                "Check network connectivity and the HubDB base URL, then rerun".to_string()
            }
            AuditError::HttpStatusError { status, .. } if *status == 404 => {
                "Verify the HubDB portal ID and table ID".to_string()
            }
            AuditError::HttpStatusError { .. } => {
                "The HubDB endpoint rejected the request; retry later or use --source embedded"
                    .to_string()
            }
            AuditError::CsvError(_) => "Check the output directory is writable".to_string(),
            AuditError::IoError(_) => {
                "Check file paths and permissions for the input and output locations".to_string()
            }
            AuditError::SerializationError(_) => {
                "The input or snapshot JSON is malformed; fix or delete the file".to_string()
            }
            AuditError::ZipError(_) => "Disable bundling or free disk space".to_string(),
            AuditError::ConfigValidationError { field, .. }
            | AuditError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' in your configuration", field)
            }
            AuditError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            AuditError::SchemaError { row, .. } => format!(
                "Fix row {} of the cookie table (category_key must be 1-4, cookie_name and provider non-empty)",
                row
            ),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not fetch cookie data: {}", self),
            ErrorCategory::Data => format!("Cookie data is invalid: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// 依嚴重程度決定程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;
