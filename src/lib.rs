pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AppConfig;

pub use adapters::soap::{SoapConversionClient, SoapEndpoint};
pub use core::{ConversionGateway, ConvertTemperatureOperation, TemperaturePresenter};
pub use domain::model::{ConversionRequest, ConversionResult, PresentationState};
pub use utils::error::{ConvertError, Result};
