use crate::config::toml_config::{CatalogConfig, TomlConfig, RESOLVER_KINDS};
use crate::domain::model::{Origin, ParticipantRequest};
use crate::utils::error::{MeetError, Result};
use crate::utils::validation::{validate_one_of, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "meetplanner")]
#[command(about = "Recommend a fair meeting place for a group")]
pub struct CliConfig {
    /// Participant as NAME=ORIGIN; ORIGIN is an address, a station name or LAT,LNG
    #[arg(short, long = "participant", value_name = "NAME=ORIGIN")]
    pub participants: Vec<String>,

    /// Meeting purpose (cafe_talk, restaurant, shopping, business, culture, entertainment, study, date)
    #[arg(long)]
    pub purpose: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the resolver type from the config (catalog or vworld)
    #[arg(long)]
    pub resolver: Option<String>,

    /// Load the venue catalog from a CSV file instead of the built-in one
    #[arg(long)]
    pub catalog: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 讀取設定檔（若有），再套用命令列覆蓋
    pub fn load_toml(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(kind) = &self.resolver {
            config.resolver.r#type = kind.clone();
            tracing::info!("🔧 Resolver overridden to: {}", kind);
        }
        if let Some(path) = &self.catalog {
            config.catalog = Some(CatalogConfig {
                path: Some(path.clone()),
            });
        }

        Ok(config)
    }

    pub fn participant_requests(&self) -> Result<Vec<ParticipantRequest>> {
        self.participants
            .iter()
            .map(|raw| parse_participant(raw))
            .collect()
    }
}

fn parse_participant(raw: &str) -> Result<ParticipantRequest> {
    let (name, origin) = raw.split_once('=').ok_or_else(|| {
        MeetError::invalid_input(format!("participant '{}' must look like NAME=ORIGIN", raw))
    })?;
    let name = name.trim();
    if name.is_empty() || origin.trim().is_empty() {
        return Err(MeetError::invalid_input(format!(
            "participant '{}' must have both a name and an origin",
            raw
        )));
    }
    Ok(ParticipantRequest {
        name: name.to_string(),
        origin: Origin::parse(origin)?,
    })
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(kind) = &self.resolver {
            validate_one_of("--resolver", kind, &RESOLVER_KINDS)?;
        }
        self.participant_requests().map(|_| ())
    }
}
