use crate::adapters::source_for;
use crate::core::encoder::FeatureEncoder;
use crate::core::forest::{ForestParams, RandomForestRegressor};
use crate::core::reference::ReferenceTable;
use crate::domain::model::{GemFeatures, GemRecord, Quote};
use crate::domain::ports::{ConfigProvider, PriceModel};
use crate::domain::training::sample_records;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::time::Duration;

/// Lower and upper bound of the jitter added to a matched reference price.
pub const NEARBY_JITTER: (f64, f64) = (-1.0, 2.0);

#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub n_estimators: usize,
    pub training_rows: usize,
    pub features: usize,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceSummary {
    pub model: ModelSummary,
    pub reference_rows: usize,
    pub skipped_reference_rows: usize,
    pub started_at: DateTime<Utc>,
}

/// Read-only pricing state shared by every request.
pub struct PricingService {
    encoder: FeatureEncoder,
    model: RandomForestRegressor,
    reference: ReferenceTable,
    started_at: DateTime<Utc>,
}

impl PricingService {
    /// Fits encoder and model on `records`.
    pub fn train(
        records: &[GemRecord],
        params: ForestParams,
        reference: ReferenceTable,
    ) -> Result<Self> {
        let mut encoder = FeatureEncoder::new();
        let x = encoder.fit_transform(records)?;
        tracing::debug!("Encoded columns: {}", encoder.feature_names().join(", "));
        let y: Vec<f64> = records.iter().map(|r| r.price).collect();
        let model = RandomForestRegressor::fit(&x, &y, params)?;

        Ok(Self {
            encoder,
            model,
            reference,
            started_at: Utc::now(),
        })
    }

    /// Trains on the built-in sample and loads the configured reference table.
    pub async fn bootstrap<C: ConfigProvider>(config: &C) -> Result<Self> {
        let params = ForestParams {
            n_estimators: config.n_estimators(),
            max_depth: config.max_depth(),
            seed: config.seed(),
            ..ForestParams::default()
        };

        let timeout = Duration::from_secs(config.request_timeout_seconds());
        let source = source_for(config.reference_source(), timeout)?;
        let reference = match ReferenceTable::load(source.as_ref()).await {
            Ok(table) => table,
            Err(e) if !config.reference_required() => {
                tracing::warn!(
                    "Reference dataset unavailable ({}); nearby prices disabled",
                    e
                );
                ReferenceTable::default()
            }
            Err(e) => return Err(e),
        };

        Self::train(&sample_records(), params, reference)
    }

    pub fn quote(&self, features: &GemFeatures) -> Result<Quote> {
        self.quote_with_rng(features, &mut rand::rng())
    }

    pub fn quote_with_rng<R: Rng>(
        &self,
        features: &GemFeatures,
        rng: &mut R,
    ) -> Result<Quote> {
        let encoded = self.encoder.transform(features)?;
        let prediction = self.model.predict(&encoded)?;

        let nearby_price = self
            .reference
            .find_exact(features)
            .map(|row| nearby_price(row.price, rng));

        tracing::debug!(
            "Quoted {:.2} (nearby: {:?}) for {} {} {} {}ct",
            prediction,
            nearby_price,
            features.cut,
            features.color,
            features.clarity,
            features.carat
        );

        Ok(Quote {
            prediction,
            nearby_price,
        })
    }

    pub fn summary(&self) -> ServiceSummary {
        ServiceSummary {
            model: ModelSummary {
                n_estimators: self.model.n_estimators(),
                training_rows: self.model.n_samples(),
                features: self.model.n_features(),
                seed: self.model.seed(),
            },
            reference_rows: self.reference.len(),
            skipped_reference_rows: self.reference.skipped_rows(),
            started_at: self.started_at,
        }
    }
}

/// Stored price plus uniform jitter, rounded to cents.
pub fn nearby_price<R: Rng>(stored: f64, rng: &mut R) -> f64 {
    let (low, high) = NEARBY_JITTER;
    let jittered = stored + rng.random_range(low..=high);
    (jittered * 100.0).round() / 100.0
}
