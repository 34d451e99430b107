use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatusError { status: u16, body: String },

    #[error("SOAP fault {code}: {reason}")]
    SoapFault { code: String, reason: String },

    #[error("Malformed SOAP response: {message}")]
    MalformedResponse { message: String },

    #[error("Worker task failed: {0}")]
    WorkerError(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Conversion scope already closed")]
    ScopeClosed,

    #[error("No tokio runtime available to run the conversion")]
    RuntimeUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Remote,
    Protocol,
    Configuration,
    Input,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ConvertError {
    pub fn malformed(message: impl std::fmt::Display) -> Self {
        ConvertError::MalformedResponse {
            message: message.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::TransportError(_) => ErrorCategory::Network,
            ConvertError::HttpStatusError { .. } | ConvertError::SoapFault { .. } => {
                ErrorCategory::Remote
            }
            ConvertError::MalformedResponse { .. } => ErrorCategory::Protocol,
            ConvertError::TomlError(_)
            | ConvertError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ConvertError::ValidationError { .. } => ErrorCategory::Input,
            ConvertError::WorkerError(_)
            | ConvertError::IoError(_)
            | ConvertError::ScopeClosed
            | ConvertError::RuntimeUnavailable => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Protocol | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ConvertError::TransportError(e) if e.is_timeout() => {
                "The conversion service did not answer in time".to_string()
            }
            ConvertError::TransportError(_) => "Could not reach the conversion service".to_string(),
            ConvertError::HttpStatusError { status, .. } => {
                format!("The conversion service answered with HTTP {}", status)
            }
            ConvertError::SoapFault { reason, .. } => {
                format!("The conversion service rejected the request: {}", reason)
            }
            ConvertError::MalformedResponse { .. } => {
                "The conversion service sent an unreadable answer".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the network connection and try again",
            ErrorCategory::Remote => "The service may be down or rejecting the value; retry later",
            ErrorCategory::Protocol => "The service contract may have changed; inspect the raw response with --verbose",
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
            ErrorCategory::Input => "Enter a non-blank Fahrenheit value",
            ErrorCategory::Internal => "Run again with --verbose and report the log",
        }
    }
}

impl ErrorSeverity {
    /// Process exit code for a run whose worst failure has this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,      // 警告，但成功
            ErrorSeverity::Medium => 2,   // 可重試
            ErrorSeverity::High => 1,     // 處理錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_message_carries_reason() {
        let err = ConvertError::SoapFault {
            code: "soap:Receiver".to_string(),
            reason: "Server was unable to process request.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "SOAP fault soap:Receiver: Server was unable to process request."
        );
        assert_eq!(err.category(), ErrorCategory::Remote);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_severity_ordering() {
        let input = ConvertError::ValidationError {
            message: "blank".to_string(),
        };
        let protocol = ConvertError::malformed("no Body");
        assert!(input.severity() < protocol.severity());
        assert!(protocol.severity() < ConvertError::ScopeClosed.severity());
    }

    #[test]
    fn test_exit_codes_follow_severity() {
        let malformed = ConvertError::malformed("no Body");
        let remote = ConvertError::HttpStatusError {
            status: 503,
            body: String::new(),
        };
        assert_eq!(remote.severity().exit_code(), 2);
        assert_eq!(malformed.severity().exit_code(), 1);
        assert_eq!(ConvertError::RuntimeUnavailable.severity().exit_code(), 3);
        assert_eq!(ErrorSeverity::Low.exit_code(), 0);
    }
}
