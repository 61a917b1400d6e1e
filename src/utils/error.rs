use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Source unavailable: {path} ({reason})")]
    SourceUnavailable { path: String, reason: String },

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("No graded records to aggregate")]
    EmptyInput,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::SourceUnavailable { .. } | EtlError::CsvError(_) => ErrorCategory::Input,
            EtlError::MalformedRow { .. } | EtlError::EmptyInput => ErrorCategory::Data,
            EtlError::ZipError(_) | EtlError::IoError(_) | EtlError::SerializationError(_) => {
                ErrorCategory::Output
            }
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::MalformedRow { .. } => ErrorSeverity::Low,
            EtlError::EmptyInput => ErrorSeverity::Medium,
            EtlError::CsvError(_)
            | EtlError::ZipError(_)
            | EtlError::SerializationError(_)
            | EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorSeverity::High,
            EtlError::SourceUnavailable { .. } | EtlError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 對應 CLI 的結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::SourceUnavailable { .. } => {
                "Check that the input file exists and is readable"
            }
            EtlError::CsvError(_) => "Check the input file encoding and delimiter setting",
            EtlError::MalformedRow { .. } => {
                "Fix the row so that all four test scores are integers"
            }
            EtlError::EmptyInput => "Provide at least one row with four integer test scores",
            EtlError::IoError(_) | EtlError::ZipError(_) => {
                "Check that the output directory is writable and has free space"
            }
            EtlError::SerializationError(_) => "Report this as a bug",
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::SourceUnavailable { path, .. } => {
                format!("Cannot read student scores from '{}'", path)
            }
            EtlError::EmptyInput => "No valid student rows were found".to_string(),
            EtlError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
