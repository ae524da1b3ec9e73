use crate::domain::model::{Clarity, Color, Cut, GemFeatures, GemRecord};

/// Built-in sample the model is fitted on at start-up.
pub fn sample_records() -> Vec<GemRecord> {
    vec![
        record(0.30, Cut::Ideal, Color::E, Clarity::SI1, [62.1, 58.0, 4.27, 4.29, 2.66], 499.0),
        record(0.33, Cut::Premium, Color::G, Clarity::IF, [60.8, 58.0, 4.42, 4.46, 2.70], 984.0),
        record(0.90, Cut::VeryGood, Color::E, Clarity::VVS2, [62.2, 60.0, 6.04, 6.12, 3.78], 6289.0),
        record(0.42, Cut::Ideal, Color::F, Clarity::VS1, [61.6, 56.0, 4.82, 4.80, 2.96], 1082.0),
        record(0.31, Cut::Ideal, Color::F, Clarity::VVS1, [60.4, 59.0, 4.35, 4.43, 2.65], 779.0),
    ]
}

fn record(
    carat: f64,
    cut: Cut,
    color: Color,
    clarity: Clarity,
    [depth, table, x, y, z]: [f64; 5],
    price: f64,
) -> GemRecord {
    GemRecord {
        features: GemFeatures {
            carat,
            cut,
            color,
            clarity,
            depth,
            table,
            x,
            y,
            z,
        },
        price,
    }
}
