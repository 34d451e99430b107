use crate::domain::model::{ConversionRequest, ConversionResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Synchronous remote call returning the raw response text. Implementations
/// block the calling thread for the whole round-trip.
pub trait BlockingConverter: Send + Sync + 'static {
    fn fahrenheit_to_celsius(&self, fahrenheit: &str) -> Result<String>;
}

#[async_trait]
pub trait TemperatureGateway: Send + Sync {
    async fn convert_fahrenheit(&self, request: &ConversionRequest) -> Result<ConversionResult>;
}
