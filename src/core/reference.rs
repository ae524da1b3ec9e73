use crate::domain::model::{GemFeatures, ReferenceRow};
use crate::domain::ports::ReferenceSource;
use crate::utils::error::Result;
use std::io::Read;

/// Static table of known gems used for exact-match price lookups.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    rows: Vec<ReferenceRow>,
    skipped_rows: usize,
}

impl ReferenceTable {
    pub fn new(rows: Vec<ReferenceRow>) -> Self {
        Self {
            rows,
            skipped_rows: 0,
        }
    }

    pub async fn load(source: &dyn ReferenceSource) -> Result<Self> {
        tracing::info!("Loading reference dataset from {}", source.describe());
        let bytes = source.fetch().await?;
        tracing::debug!("Fetched {} bytes of reference data", bytes.len());
        let table = Self::from_csv_reader(bytes.as_slice())?;
        tracing::info!("Reference dataset ready with {} rows", table.len());
        Ok(table)
    }

    /// Parses CSV with a header row. Columns are matched by name and
    /// unparsable rows are skipped.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        // Fail early on a missing or unreadable header.
        csv_reader.headers()?;

        let mut rows = Vec::new();
        let mut skipped_rows = 0;
        for (line, result) in csv_reader.deserialize::<ReferenceRow>().enumerate() {
            match result {
                Ok(row) => rows.push(row),
                Err(e) => {
                    skipped_rows += 1;
                    tracing::trace!("Skipping reference row {}: {}", line + 1, e);
                }
            }
        }

        if skipped_rows > 0 {
            tracing::warn!("Skipped {} unparsable reference rows", skipped_rows);
        }

        Ok(Self { rows, skipped_rows })
    }

    /// First row, in file order, equal to `features` on every attribute.
    pub fn find_exact(&self, features: &GemFeatures) -> Option<&ReferenceRow> {
        self.rows.iter().find(|row| row.matches(features))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}
