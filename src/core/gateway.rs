use crate::core::{BlockingConverter, ConversionRequest, ConversionResult, TemperatureGateway};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Runs a [`BlockingConverter`] on tokio's blocking pool and wraps its text.
///
/// Failures pass through unchanged. Dropping the returned future abandons the
/// worker's result; the HTTP call itself runs to completion on its thread.
pub struct ConversionGateway<C: BlockingConverter> {
    client: Arc<C>,
}

impl<C: BlockingConverter> ConversionGateway<C> {
    pub fn new(client: C) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl<C: BlockingConverter> TemperatureGateway for ConversionGateway<C> {
    async fn convert_fahrenheit(&self, request: &ConversionRequest) -> Result<ConversionResult> {
        let client = Arc::clone(&self.client);
        let fahrenheit = request.fahrenheit_value().to_string();

        let celsius =
            tokio::task::spawn_blocking(move || client.fahrenheit_to_celsius(&fahrenheit))
                .await??;

        Ok(ConversionResult::new(celsius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ConvertError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread::ThreadId;
    use std::sync::Mutex;

    struct RecordingClient {
        calls: AtomicUsize,
        thread: Mutex<Option<ThreadId>>,
        answer: fn(&str) -> Result<String>,
    }

    impl RecordingClient {
        fn new(answer: fn(&str) -> Result<String>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                thread: Mutex::new(None),
                answer,
            }
        }
    }

    impl BlockingConverter for RecordingClient {
        fn fahrenheit_to_celsius(&self, fahrenheit: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.thread.lock().unwrap() = Some(std::thread::current().id());
            (self.answer)(fahrenheit)
        }
    }

    #[tokio::test]
    async fn test_wraps_raw_text() {
        let gateway = ConversionGateway::new(RecordingClient::new(|_| Ok("37".to_string())));
        let request = ConversionRequest::new("98.6").unwrap();

        let result = gateway.convert_fahrenheit(&request).await.unwrap();
        assert_eq!(result, ConversionResult::new("37"));
    }

    #[tokio::test]
    async fn test_call_runs_off_the_caller_thread() {
        let gateway = ConversionGateway::new(RecordingClient::new(|_| Ok("0".to_string())));
        let request = ConversionRequest::new("32").unwrap();

        gateway.convert_fahrenheit(&request).await.unwrap();

        let worker = gateway.client.thread.lock().unwrap().unwrap();
        assert_ne!(worker, std::thread::current().id());
    }

    #[tokio::test]
    async fn test_failure_propagates_unchanged() {
        let gateway = ConversionGateway::new(RecordingClient::new(|_| {
            Err(ConvertError::HttpStatusError {
                status: 503,
                body: "busy".to_string(),
            })
        }));
        let request = ConversionRequest::new("98.6").unwrap();

        let err = gateway.convert_fahrenheit(&request).await.unwrap_err();
        assert!(matches!(err, ConvertError::HttpStatusError { status: 503, .. }));
        // no retry
        assert_eq!(gateway.client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_memoization() {
        let gateway = ConversionGateway::new(RecordingClient::new(|v| Ok(v.to_string())));
        let request = ConversionRequest::new("50").unwrap();

        gateway.convert_fahrenheit(&request).await.unwrap();
        gateway.convert_fahrenheit(&request).await.unwrap();
        assert_eq!(gateway.client.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_worker_panic_becomes_error() {
        let gateway = ConversionGateway::new(RecordingClient::new(|_| panic!("boom")));
        let request = ConversionRequest::new("1").unwrap();

        let err = gateway.convert_fahrenheit(&request).await.unwrap_err();
        assert!(matches!(err, ConvertError::WorkerError(_)));
    }
}
