pub mod gateway;
pub mod operation;
pub mod presenter;

pub use crate::domain::model::{ConversionRequest, ConversionResult, PresentationState};
pub use crate::domain::ports::{BlockingConverter, TemperatureGateway};
pub use crate::utils::error::Result;
pub use gateway::ConversionGateway;
pub use operation::ConvertTemperatureOperation;
pub use presenter::TemperaturePresenter;
