// Adapters layer: concrete reference sources (remote http, local file).

pub mod http;
pub mod local;

use crate::domain::ports::ReferenceSource;
use crate::utils::error::Result;
use crate::utils::validation::is_remote_location;
use std::time::Duration;

pub use http::HttpSource;
pub use local::LocalSource;

/// Picks an http source for `http(s)://` locations, a local file otherwise.
pub fn source_for(location: &str, timeout: Duration) -> Result<Box<dyn ReferenceSource>> {
    if is_remote_location(location) {
        Ok(Box::new(HttpSource::new(location.to_string(), timeout)?))
    } else {
        Ok(Box::new(LocalSource::new(location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_for_picks_by_scheme() {
        let remote = source_for("https://example.com/gems.csv", Duration::from_secs(1)).unwrap();
        assert_eq!(remote.describe(), "https://example.com/gems.csv");

        let local = source_for("./data/gems.csv", Duration::from_secs(1)).unwrap();
        assert_eq!(local.describe(), "./data/gems.csv");
    }
}
