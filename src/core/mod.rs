pub mod encoder;
pub mod forest;
pub mod pricer;
pub mod reference;

pub use crate::domain::model::{GemFeatures, GemRecord, Quote, ReferenceRow};
pub use crate::domain::ports::{ConfigProvider, PriceModel, ReferenceSource};
pub use crate::utils::error::Result;
