use crate::utils::error::Result;
use async_trait::async_trait;

/// Effective runtime configuration, whichever layer it came from.
pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> &str;
    fn reference_source(&self) -> &str;
    fn reference_required(&self) -> bool;
    fn request_timeout_seconds(&self) -> u64;
    fn n_estimators(&self) -> usize;
    fn max_depth(&self) -> Option<usize>;
    fn seed(&self) -> Option<u64>;
}

/// Where the reference dataset bytes come from.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>>;

    /// Human readable location, used in logs.
    fn describe(&self) -> String;
}

/// A fitted regressor over encoded feature vectors.
pub trait PriceModel: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<f64>;
}
