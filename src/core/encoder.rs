use crate::domain::model::{Clarity, Color, Cut, GemFeatures, GemRecord};
use crate::utils::error::{PricerError, Result};

/// One-hot encodes cut, color and clarity against their fixed category
/// lists. Carat, depth, table and the dimensions are not model inputs.
#[derive(Debug, Clone, Default)]
pub struct FeatureEncoder {
    fitted_rows: usize,
}

impl FeatureEncoder {
    pub const WIDTH: usize = Cut::ALL.len() + Color::ALL.len() + Clarity::ALL.len();

    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit(&mut self, records: &[GemRecord]) -> Result<()> {
        if records.is_empty() {
            return Err(PricerError::ModelError {
                message: "cannot fit encoder on an empty sample".to_string(),
            });
        }
        self.fitted_rows = records.len();
        tracing::debug!(
            "Encoder fitted on {} rows ({} output columns)",
            self.fitted_rows,
            Self::WIDTH
        );
        Ok(())
    }

    pub fn fit_transform(&mut self, records: &[GemRecord]) -> Result<Vec<Vec<f64>>> {
        self.fit(records)?;
        records
            .iter()
            .map(|record| self.transform(&record.features))
            .collect()
    }

    pub fn transform(&self, features: &GemFeatures) -> Result<Vec<f64>> {
        if !self.is_fitted() {
            return Err(PricerError::ModelError {
                message: "encoder used before fit".to_string(),
            });
        }

        let mut row = vec![0.0; Self::WIDTH];
        let mut offset = 0;
        for (index, len) in [
            (features.cut.index(), Cut::ALL.len()),
            (features.color.index(), Color::ALL.len()),
            (features.clarity.index(), Clarity::ALL.len()),
        ] {
            row[offset + index] = 1.0;
            offset += len;
        }
        Ok(row)
    }

    pub fn feature_names(&self) -> Vec<String> {
        let cuts = Cut::ALL.iter().map(|c| format!("{}_{}", Cut::FIELD, c));
        let colors = Color::ALL.iter().map(|c| format!("{}_{}", Color::FIELD, c));
        let clarities = Clarity::ALL
            .iter()
            .map(|c| format!("{}_{}", Clarity::FIELD, c));
        cuts.chain(colors).chain(clarities).collect()
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted_rows > 0
    }

    pub fn fitted_rows(&self) -> usize {
        self.fitted_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::training::sample_records;

    #[test]
    fn test_transform_layout() {
        let records = sample_records();
        let mut encoder = FeatureEncoder::new();
        let matrix = encoder.fit_transform(&records).unwrap();

        assert_eq!(FeatureEncoder::WIDTH, 20);
        assert_eq!(matrix.len(), 5);

        // Ideal, E, SI1
        let first = &matrix[0];
        assert_eq!(first.len(), 20);
        assert_eq!(first[4], 1.0);
        assert_eq!(first[5 + 5], 1.0);
        assert_eq!(first[12 + 7], 1.0);
        assert_eq!(first.iter().sum::<f64>(), 3.0);
    }

    #[test]
    fn test_numeric_attributes_do_not_change_encoding() {
        let records = sample_records();
        let mut encoder = FeatureEncoder::new();
        encoder.fit(&records).unwrap();

        let original = records[0].features;
        let heavier = GemFeatures {
            carat: 2.5,
            depth: 70.0,
            table: 50.0,
            x: 9.0,
            y: 9.1,
            z: 5.5,
            ..original
        };
        assert_eq!(
            encoder.transform(&original).unwrap(),
            encoder.transform(&heavier).unwrap()
        );
    }

    #[test]
    fn test_feature_names_align_with_width() {
        let encoder = FeatureEncoder::new();
        let names = encoder.feature_names();
        assert_eq!(names.len(), FeatureEncoder::WIDTH);
        assert_eq!(names[2], "cut_Very Good");
        assert_eq!(names[5], "color_J");
        assert_eq!(names[19], "clarity_SI1");
        assert!(!names.iter().any(|name| name == "carat"));
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let encoder = FeatureEncoder::new();
        let records = sample_records();
        assert!(encoder.transform(&records[0].features).is_err());
        assert!(FeatureEncoder::new().fit(&[]).is_err());
    }
}
