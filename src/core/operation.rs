use crate::core::{ConversionRequest, ConversionResult, TemperatureGateway};
use crate::utils::error::Result;

/// Call boundary between presentation and data access. Forwards only.
pub struct ConvertTemperatureOperation<G: TemperatureGateway> {
    gateway: G,
}

impl<G: TemperatureGateway> ConvertTemperatureOperation<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, request: &ConversionRequest) -> Result<ConversionResult> {
        tracing::debug!("Converting {:?} °F", request.fahrenheit_value());
        self.gateway.convert_fahrenheit(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ConvertError;
    use async_trait::async_trait;

    struct EchoGateway;

    #[async_trait]
    impl TemperatureGateway for EchoGateway {
        async fn convert_fahrenheit(
            &self,
            request: &ConversionRequest,
        ) -> Result<ConversionResult> {
            if request.fahrenheit_value() == "fail" {
                return Err(ConvertError::malformed("no Body"));
            }
            Ok(ConversionResult::new(request.fahrenheit_value()))
        }
    }

    #[tokio::test]
    async fn test_forwards_without_transformation() {
        let operation = ConvertTemperatureOperation::new(EchoGateway);
        let request = ConversionRequest::new(" 212 ").unwrap();
        let result = operation.execute(&request).await.unwrap();
        assert_eq!(result.celsius_text, " 212 ");
    }

    #[tokio::test]
    async fn test_propagates_failure() {
        let operation = ConvertTemperatureOperation::new(EchoGateway);
        let request = ConversionRequest::new("fail").unwrap();
        tokio_test::assert_err!(operation.execute(&request).await);
    }
}
