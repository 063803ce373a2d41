use meetplanner::utils::{logger, validation::Validate};
use meetplanner::{planner_from_config, RpcHandler, TomlConfig};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const CONFIG_ENV: &str = "MEETPLANNER_CONFIG";

/// 以換行分隔的 JSON-RPC：stdin 讀請求、stdout 寫回應，日誌走 stderr
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_json_logger();

    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(&path)?
        }
        Err(_) => TomlConfig::default(),
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        return Err(e.into());
    }

    let handler = RpcHandler::new(planner_from_config(&config)?);
    tracing::info!("🚀 {} RPC server ready on stdio", config.service.name);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handler.handle_line(line).await;
        let mut payload = serde_json::to_vec(&response)?;
        payload.push(b'\n');
        stdout.write_all(&payload).await?;
        stdout.flush().await?;
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}
