use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a categorical grade whose variant order is the one-hot column order.
macro_rules! grade_enum {
    ($name:ident, $field:literal, [$($variant:ident => $label:literal),+ $(,)?]) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const FIELD: &'static str = $field;

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn index(&self) -> usize {
                Self::ALL
                    .iter()
                    .position(|grade| grade == self)
                    .unwrap_or_default()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = crate::utils::error::PricerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|grade| grade.label() == trimmed)
                    .ok_or_else(|| crate::utils::error::PricerError::UnknownCategory {
                        field: $field.to_string(),
                        value: s.to_string(),
                    })
            }
        }
    };
}

grade_enum!(Cut, "cut", [
    Fair => "Fair",
    Good => "Good",
    VeryGood => "Very Good",
    Premium => "Premium",
    Ideal => "Ideal",
]);

grade_enum!(Color, "color", [
    J => "J",
    I => "I",
    D => "D",
    H => "H",
    F => "F",
    E => "E",
    G => "G",
]);

grade_enum!(Clarity, "clarity", [
    I1 => "I1",
    IF => "IF",
    VVS1 => "VVS1",
    VVS2 => "VVS2",
    VS1 => "VS1",
    SI2 => "SI2",
    VS2 => "VS2",
    SI1 => "SI1",
]);

/// The nine grading attributes submitted for a quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GemFeatures {
    pub carat: f64,
    pub cut: Cut,
    pub color: Color,
    pub clarity: Clarity,
    pub depth: f64,
    pub table: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GemRecord {
    #[serde(flatten)]
    pub features: GemFeatures,
    pub price: f64,
}

/// A row of the reference dataset. Empty numeric cells read as `None`;
/// any other unparsable cell fails the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub carat: Option<f64>,
    pub cut: Cut,
    pub color: Color,
    pub clarity: Clarity,
    pub depth: Option<f64>,
    pub table: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub price: f64,
}

impl ReferenceRow {
    /// Exact equality on every attribute. Blank cells never match.
    pub fn matches(&self, features: &GemFeatures) -> bool {
        fn same(cell: Option<f64>, value: f64) -> bool {
            cell.is_some_and(|v| v == value)
        }

        self.cut == features.cut
            && self.color == features.color
            && self.clarity == features.clarity
            && same(self.carat, features.carat)
            && same(self.depth, features.depth)
            && same(self.table, features.table)
            && same(self.x, features.x)
            && same(self.y, features.y)
            && same(self.z, features.z)
    }
}

/// Response body of a price quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub prediction: f64,
    pub nearby_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> GemFeatures {
        GemFeatures {
            carat: 0.3,
            cut: Cut::Ideal,
            color: Color::E,
            clarity: Clarity::SI1,
            depth: 62.1,
            table: 58.0,
            x: 4.27,
            y: 4.29,
            z: 2.66,
        }
    }

    #[test]
    fn test_grade_parsing() {
        assert_eq!(" Very Good ".parse::<Cut>().unwrap(), Cut::VeryGood);
        assert_eq!("VVS2".parse::<Clarity>().unwrap(), Clarity::VVS2);
        assert!("Excellent".parse::<Cut>().is_err());
        assert!("e".parse::<Color>().is_err());
        assert_eq!(Cut::VeryGood.to_string(), "Very Good");
    }

    #[test]
    fn test_grade_order() {
        assert_eq!(Cut::ALL.len(), 5);
        assert_eq!(Color::ALL.len(), 7);
        assert_eq!(Clarity::ALL.len(), 8);
        assert_eq!(Color::J.index(), 0);
        assert_eq!(Color::G.index(), 6);
        assert_eq!(Clarity::SI1.index(), 7);
    }

    #[test]
    fn test_reference_row_matches_exactly() {
        let row = ReferenceRow {
            carat: Some(0.3),
            cut: Cut::Ideal,
            color: Color::E,
            clarity: Clarity::SI1,
            depth: Some(62.1),
            table: Some(58.0),
            x: Some(4.27),
            y: Some(4.29),
            z: Some(2.66),
            price: 499.0,
        };
        assert!(row.matches(&features()));

        let mut other = features();
        other.z = 2.67;
        assert!(!row.matches(&other));

        let blank = ReferenceRow { depth: None, ..row };
        assert!(!blank.matches(&features()));
    }

    #[test]
    fn test_quote_serializes_null_nearby_price() {
        let quote = Quote {
            prediction: 1200.5,
            nearby_price: None,
        };
        let json = serde_json::to_value(quote).unwrap();
        assert_eq!(json["prediction"], 1200.5);
        assert!(json["nearby_price"].is_null());
    }
}
