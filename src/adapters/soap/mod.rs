pub mod client;
pub mod envelope;

pub use client::{SoapConversionClient, SoapEndpoint};
pub use envelope::{EnvelopeOptions, SoapRequest, SoapVersion};
