use crate::domain::model::{Clarity, Color, Cut, GemFeatures};
use crate::utils::error::{PricerError, Result};
use std::collections::HashMap;

pub const NUMERIC_FIELDS: [&str; 6] = ["carat", "depth", "table", "x", "y", "z"];

/// Raw field values of a submitted form or JSON object.
pub type Fields = HashMap<String, String>;

impl GemFeatures {
    /// Builds features from submitted fields. Numeric fields are checked
    /// before categorical ones.
    pub fn from_fields(fields: &Fields) -> Result<Self> {
        let mut numbers = [0.0f64; NUMERIC_FIELDS.len()];
        for (slot, name) in numbers.iter_mut().zip(NUMERIC_FIELDS) {
            *slot = parse_numeric(name, required(fields, name)?)?;
        }
        let [carat, depth, table, x, y, z] = numbers;

        Ok(GemFeatures {
            carat,
            cut: required(fields, Cut::FIELD)?.parse()?,
            color: required(fields, Color::FIELD)?.parse()?,
            clarity: required(fields, Clarity::FIELD)?.parse()?,
            depth,
            table,
            x,
            y,
            z,
        })
    }
}

fn required<'a>(fields: &'a Fields, name: &str) -> Result<&'a str> {
    fields
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| PricerError::MissingField {
            field: name.to_string(),
        })
}

/// Parses a trimmed finite float.
pub fn parse_numeric(field: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| PricerError::InvalidNumeric {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> Fields {
        [
            ("carat", " 0.3 "),
            ("cut", "Ideal"),
            ("color", "E"),
            ("clarity", "SI1"),
            ("depth", "62.1"),
            ("table", "58"),
            ("x", "4.27"),
            ("y", "4.29"),
            ("z", "2.66"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_valid_submission() {
        let features = GemFeatures::from_fields(&submission()).unwrap();
        assert_eq!(features.carat, 0.3);
        assert_eq!(features.table, 58.0);
        assert_eq!(features.cut, Cut::Ideal);
        assert_eq!(features.clarity, Clarity::SI1);
    }

    #[test]
    fn test_non_numeric_value_is_rejected() {
        let mut fields = submission();
        fields.insert("depth".to_string(), "deep".to_string());
        let err = GemFeatures::from_fields(&fields).unwrap_err();
        assert!(matches!(err, PricerError::InvalidNumeric { ref field, .. } if field == "depth"));
    }

    #[test]
    fn test_non_finite_value_is_rejected() {
        for raw in ["NaN", "inf", "-infinity", ""] {
            assert!(parse_numeric("x", raw).is_err(), "{raw} should be rejected");
        }
        assert_eq!(parse_numeric("x", "1e2").unwrap(), 100.0);
    }

    #[test]
    fn test_numeric_errors_reported_before_category_errors() {
        let mut fields = submission();
        fields.insert("cut".to_string(), "Superb".to_string());
        fields.insert("carat".to_string(), "heavy".to_string());
        let err = GemFeatures::from_fields(&fields).unwrap_err();
        assert!(matches!(err, PricerError::InvalidNumeric { .. }));
    }

    #[test]
    fn test_unknown_category_and_missing_field() {
        let mut fields = submission();
        fields.insert("color".to_string(), "Z".to_string());
        let err = GemFeatures::from_fields(&fields).unwrap_err();
        assert!(matches!(err, PricerError::UnknownCategory { ref field, .. } if field == "color"));

        let mut fields = submission();
        fields.remove("y");
        let err = GemFeatures::from_fields(&fields).unwrap_err();
        assert!(matches!(err, PricerError::MissingField { ref field } if field == "y"));
    }
}
