use crate::utils::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};

/// Shown when a failure carries no description of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Error occurred";

/// One user submission. The value is forwarded untouched; the remote service
/// decides whether it is a valid number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    fahrenheit_value: String,
}

impl ConversionRequest {
    pub fn new(fahrenheit_value: impl Into<String>) -> Result<Self> {
        let fahrenheit_value = fahrenheit_value.into();
        if fahrenheit_value.trim().is_empty() {
            return Err(ConvertError::ValidationError {
                message: "Fahrenheit value must not be blank".to_string(),
            });
        }
        Ok(Self { fahrenheit_value })
    }

    pub fn fahrenheit_value(&self) -> &str {
        &self.fahrenheit_value
    }
}

/// Verbatim payload of a successful call. Never parsed into a number: the
/// service may answer with text such as `Error` for non-numeric input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub celsius_text: String,
}

impl ConversionResult {
    pub fn new(celsius_text: impl Into<String>) -> Self {
        Self {
            celsius_text: celsius_text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PresentationState {
    #[default]
    Empty,
    Loading,
    Success { celsius_text: String },
    Error { message: String },
}

impl PresentationState {
    pub fn from_outcome(outcome: Result<ConversionResult>) -> Self {
        match outcome {
            Ok(result) => PresentationState::Success {
                celsius_text: result.celsius_text,
            },
            Err(err) => PresentationState::from_failure(&err),
        }
    }

    pub fn from_failure(err: &ConvertError) -> Self {
        let message = err.to_string();
        let message = if message.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        PresentationState::Error { message }
    }

    /// `Success` or `Error`: the submission that led here has resolved.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            PresentationState::Success { .. } | PresentationState::Error { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_request_is_rejected() {
        assert!(ConversionRequest::new("").is_err());
        assert!(ConversionRequest::new(" \t ").is_err());
        let request = ConversionRequest::new(" 98.6 ").unwrap();
        // no trimming, the service sees exactly what was typed
        assert_eq!(request.fahrenheit_value(), " 98.6 ");
    }

    #[test]
    fn test_success_keeps_text_verbatim() {
        let state = PresentationState::from_outcome(Ok(ConversionResult::new("37.0000")));
        assert_eq!(
            state,
            PresentationState::Success {
                celsius_text: "37.0000".to_string()
            }
        );
        assert!(state.is_settled());
    }

    #[test]
    fn test_failure_message_falls_back_when_blank() {
        let err = ConvertError::malformed("");
        // Display still adds the "Malformed SOAP response" prefix
        assert!(matches!(
            PresentationState::from_failure(&err),
            PresentationState::Error { message } if !message.is_empty()
        ));

        let state = PresentationState::from_failure(&ConvertError::malformed("no Body"));
        assert_eq!(
            state,
            PresentationState::Error {
                message: "Malformed SOAP response: no Body".to_string()
            }
        );
    }

    #[test]
    fn test_state_json_shape() {
        let json = serde_json::to_value(PresentationState::Success {
            celsius_text: "37".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"state": "success", "celsius_text": "37"}));
        assert_eq!(
            serde_json::to_value(PresentationState::Loading).unwrap(),
            serde_json::json!({"state": "loading"})
        );
        assert!(!PresentationState::Loading.is_settled());
        assert!(!PresentationState::Empty.is_settled());
    }
}
