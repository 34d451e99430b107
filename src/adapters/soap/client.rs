use crate::adapters::soap::envelope::{
    build_envelope, parse_response, EnvelopeOptions, SoapRequest, SoapVersion,
};
use crate::domain::ports::BlockingConverter;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

pub const SERVICE_URL: &str = "https://www.w3schools.com/xml/tempconvert.asmx";
pub const SERVICE_NAMESPACE: &str = "https://www.w3schools.com/xml/";
pub const OPERATION_NAME: &str = "FahrenheitToCelsius";
pub const SOAP_ACTION: &str = "https://www.w3schools.com/xml/FahrenheitToCelsius";
pub const PARAMETER_NAME: &str = "Fahrenheit";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapEndpoint {
    pub url: String,
    pub namespace: String,
    pub operation: String,
    pub action: String,
    pub options: EnvelopeOptions,
}

impl SoapEndpoint {
    /// The public temperature conversion service.
    pub fn tempconvert() -> Self {
        Self {
            url: SERVICE_URL.to_string(),
            namespace: SERVICE_NAMESPACE.to_string(),
            operation: OPERATION_NAME.to_string(),
            action: SOAP_ACTION.to_string(),
            options: EnvelopeOptions {
                version: SoapVersion::V12,
                dot_net: true,
            },
        }
    }

    /// Same operation, different host. Used to aim at a local mock server.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

impl Default for SoapEndpoint {
    fn default() -> Self {
        Self::tempconvert()
    }
}

impl Validate for SoapEndpoint {
    fn validate(&self) -> Result<()> {
        validate_url("url", &self.url)?;
        validate_non_empty_string("namespace", &self.namespace)?;
        validate_non_empty_string("operation", &self.operation)?;
        validate_non_empty_string("action", &self.action)?;
        Ok(())
    }
}

/// Pass-through client for the `FahrenheitToCelsius` operation.
///
/// Every call builds its own HTTP client and performs exactly one POST. No
/// retries, no caching, and faults are surfaced rather than interpreted.
#[derive(Debug, Clone)]
pub struct SoapConversionClient {
    endpoint: SoapEndpoint,
    timeout: Duration,
}

impl SoapConversionClient {
    pub fn new() -> Self {
        Self::with_endpoint(SoapEndpoint::tempconvert())
    }

    pub fn with_endpoint(endpoint: SoapEndpoint) -> Self {
        Self {
            endpoint,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Blocks for the whole round-trip. Call from a blocking context only.
    pub fn call(&self, fahrenheit: &str) -> Result<String> {
        let endpoint = &self.endpoint;
        endpoint.validate()?;

        let request = SoapRequest::new(&endpoint.namespace, &endpoint.operation)
            .add_property(PARAMETER_NAME, fahrenheit);
        let envelope = build_envelope(&request, endpoint.options);
        let version = endpoint.options.version;

        tracing::debug!("POST {} ({} bytes)", endpoint.url, envelope.len());
        tracing::trace!("Request envelope: {}", envelope);

        let http = Client::builder().timeout(self.timeout).build()?;
        let mut builder = http
            .post(&endpoint.url)
            .header(CONTENT_TYPE, version.content_type(&endpoint.action))
            .body(envelope);
        if let Some(action) = version.action_header(&endpoint.action) {
            builder = builder.header("SOAPAction", action);
        }

        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;

        tracing::debug!("SOAP response status: {}", status);
        tracing::trace!("Response envelope: {}", body);

        match parse_response(&body) {
            Err(fault @ ConvertError::SoapFault { .. }) => Err(fault),
            _ if !status.is_success() => Err(ConvertError::HttpStatusError {
                status: status.as_u16(),
                body,
            }),
            parsed => parsed,
        }
    }
}

impl Default for SoapConversionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockingConverter for SoapConversionClient {
    fn fahrenheit_to_celsius(&self, fahrenheit: &str) -> Result<String> {
        self.call(fahrenheit)
    }
}
