pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{build_catalog, build_resolver, CatalogResolver, VWorldResolver};
pub use app::{MeetingPlanner, RpcHandler};
pub use crate::core::{catalog::VenueCatalog, engine::RecommendationEngine};
pub use domain::model::{
    Coordinate, Origin, Participant, ParticipantRequest, Recommendation, RecommendationReport,
};
pub use domain::purpose::{Feature, Purpose};
pub use utils::error::{MeetError, Result};

/// 依設定組出可直接使用的 planner
pub fn planner_from_config(config: &TomlConfig) -> Result<MeetingPlanner> {
    let catalog = build_catalog(config)?;
    let resolver = build_resolver(config, catalog.clone())?;
    let engine = RecommendationEngine::new(catalog).with_max_candidates(config.max_candidates());
    Ok(MeetingPlanner::new(resolver, engine))
}
