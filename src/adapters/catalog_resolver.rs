use crate::core::catalog::VenueCatalog;
use crate::domain::model::Coordinate;
use crate::domain::ports::AddressResolver;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

const STATION_SUFFIXES: [&str; 3] = [" station", " stn", " stn."];

/// Offline resolver that only knows the venues in the catalog.
///
/// Matching ignores case, surrounding whitespace and a trailing
/// "station"/"stn", so "gangnam", "Gangnam Stn" and "Gangnam Station" all
/// resolve to the same venue.
#[derive(Debug, Clone)]
pub struct CatalogResolver {
    catalog: Arc<VenueCatalog>,
}

impl CatalogResolver {
    pub fn new(catalog: Arc<VenueCatalog>) -> Self {
        Self { catalog }
    }
}

fn normalize(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    STATION_SUFFIXES
        .iter()
        .find_map(|suffix| lowered.strip_suffix(suffix))
        .unwrap_or(&lowered)
        .trim()
        .to_string()
}

#[async_trait]
impl AddressResolver for CatalogResolver {
    async fn resolve(&self, query: &str) -> Result<Option<Coordinate>> {
        let needle = normalize(query);
        if needle.is_empty() {
            return Ok(None);
        }

        let hit = self
            .catalog
            .venues()
            .iter()
            .find(|venue| normalize(&venue.label) == needle)
            .map(|venue| venue.coordinate);

        tracing::debug!("Catalog lookup for '{}': {:?}", query, hit);
        Ok(hit)
    }

    fn name(&self) -> &'static str {
        "catalog"
    }
}
