use clap::Parser;
use meetplanner::utils::error::ErrorSeverity;
use meetplanner::utils::{logger, validation::Validate};
use meetplanner::{planner_from_config, CliConfig, MeetError, RecommendationReport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let config = match cli.load_toml() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    // 初始化日誌
    if config.json_logging() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose || config.verbose_logging());
    }

    tracing::info!("Starting {} CLI", config.service.name);
    tracing::debug!("CLI config: {:?}", cli);

    // 驗證配置
    if let Err(e) = cli.validate().and_then(|_| config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }

    let purpose = cli
        .purpose
        .clone()
        .unwrap_or_else(|| config.default_purpose().tag().to_string());

    match run(&cli, &config, &purpose).await {
        Ok(report) => {
            let output = if cli.pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{}", output);
        }
        Err(e) => {
            tracing::error!(
                "❌ Recommendation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let code = exit_code(&e);
            if code > 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}

async fn run(
    cli: &CliConfig,
    config: &meetplanner::TomlConfig,
    purpose: &str,
) -> meetplanner::Result<RecommendationReport> {
    let requests = cli.participant_requests()?;
    let planner = planner_from_config(config)?;
    planner.plan(&requests, purpose).await
}

// 根據錯誤嚴重程度決定退出碼
fn exit_code(e: &MeetError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
