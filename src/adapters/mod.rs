pub mod catalog_resolver;
pub mod vworld;

use crate::config::toml_config::TomlConfig;
use crate::core::catalog::VenueCatalog;
use crate::domain::ports::AddressResolver;
use crate::utils::error::{MeetError, Result};
use std::sync::Arc;

pub use catalog_resolver::CatalogResolver;
pub use vworld::{VWorldResolver, VWorldSettings};

/// 依設定建立地址解析器
pub fn build_resolver(
    config: &TomlConfig,
    catalog: Arc<VenueCatalog>,
) -> Result<Arc<dyn AddressResolver>> {
    match config.resolver_kind() {
        "catalog" => Ok(Arc::new(CatalogResolver::new(catalog))),
        "vworld" => Ok(Arc::new(VWorldResolver::new(config.vworld_settings()?)?)),
        other => Err(MeetError::InvalidConfigValueError {
            field: "resolver.type".to_string(),
            value: other.to_string(),
            reason: "expected 'catalog' or 'vworld'".to_string(),
        }),
    }
}

/// 設定檔有指定 CSV 時載入，否則使用內建的首爾目錄
pub fn build_catalog(config: &TomlConfig) -> Result<Arc<VenueCatalog>> {
    let catalog = match config.catalog_path() {
        Some(path) => {
            tracing::info!("📂 Loading venue catalog from {}", path);
            VenueCatalog::from_csv_path(path)?
        }
        None => VenueCatalog::seoul(),
    };
    tracing::debug!("Venue catalog ready with {} venues", catalog.len());
    Ok(Arc::new(catalog))
}
