use crate::domain::model::Coordinate;
use crate::domain::ports::AddressResolver;
use crate::utils::error::{MeetError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_ADDRESS_ENDPOINT: &str = "https://api.vworld.kr/req/address";
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.vworld.kr/req/search";

#[derive(Debug, Clone)]
pub struct VWorldSettings {
    pub address_endpoint: String,
    pub search_endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
}

impl VWorldSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            address_endpoint: DEFAULT_ADDRESS_ENDPOINT.to_string(),
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
            retry_attempts: 2,
            retry_delay: Duration::from_millis(200),
        }
    }
}

/// VWorld 地理編碼：道路名地址 → 地號地址 → 地點搜尋，取第一個命中
pub struct VWorldResolver {
    client: Client,
    settings: VWorldSettings,
}

impl VWorldResolver {
    pub fn new(settings: VWorldSettings) -> Result<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(MeetError::MissingConfigError {
                field: "resolver.api_key".to_string(),
            });
        }
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    async fn lookup_address(&self, query: &str, address_type: &str) -> Result<Option<Coordinate>> {
        let params = [
            ("service", "address"),
            ("request", "getcoord"),
            ("version", "2.0"),
            ("crs", "epsg:4326"),
            ("address", query),
            ("refine", "true"),
            ("simple", "false"),
            ("format", "json"),
            ("type", address_type),
            ("key", self.settings.api_key.as_str()),
        ];
        let body = self.get_json(&self.settings.address_endpoint, &params).await?;

        if !is_ok_status(&body) {
            return Ok(None);
        }
        Ok(parse_point(&body["response"]["result"]["point"]))
    }

    async fn search_place(&self, query: &str) -> Result<Option<Coordinate>> {
        let params = [
            ("service", "search"),
            ("request", "search"),
            ("version", "2.0"),
            ("crs", "epsg:4326"),
            ("size", "1"),
            ("page", "1"),
            ("query", query),
            ("type", "place"),
            ("format", "json"),
            ("key", self.settings.api_key.as_str()),
        ];
        let body = self.get_json(&self.settings.search_endpoint, &params).await?;

        if !is_ok_status(&body) {
            return Ok(None);
        }
        Ok(body["response"]["result"]["items"]
            .as_array()
            .and_then(|items| items.first())
            .and_then(|item| parse_point(&item["point"])))
    }

    async fn get_json(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value> {
        let mut attempt = 0;
        loop {
            let outcome = match self.client.get(endpoint).query(params).send().await {
                Ok(response) => match response.error_for_status() {
                    Ok(response) => response.json::<Value>().await.map_err(|e| {
                        MeetError::ResolverError {
                            message: format!("unexpected response from {}: {}", endpoint, e),
                        }
                    }),
                    Err(e) => Err(MeetError::from(e)),
                },
                Err(e) => Err(MeetError::from(e)),
            };

            match outcome {
                Err(e) if e.is_retryable() && attempt < self.settings.retry_attempts => {
                    attempt += 1;
                    tracing::warn!(
                        "Resolver request to {} failed ({}), retry {}/{}",
                        endpoint,
                        e,
                        attempt,
                        self.settings.retry_attempts
                    );
                    tokio::time::sleep(self.settings.retry_delay).await;
                }
                other => return other,
            }
        }
    }
}

#[async_trait]
impl AddressResolver for VWorldResolver {
    async fn resolve(&self, query: &str) -> Result<Option<Coordinate>> {
        tracing::debug!("Resolving '{}' via VWorld", query);

        for address_type in ["road", "parcel"] {
            if let Some(coordinate) = self.lookup_address(query, address_type).await? {
                return Ok(Some(coordinate));
            }
        }

        tracing::debug!("No address match for '{}', falling back to place search", query);
        self.search_place(query).await
    }

    fn name(&self) -> &'static str {
        "vworld"
    }
}

fn is_ok_status(body: &Value) -> bool {
    body["response"]["status"].as_str() == Some("OK")
}

/// VWorld 以 x=經度、y=緯度回傳，數值可能是字串
fn parse_point(point: &Value) -> Option<Coordinate> {
    let number = |v: &Value| match v {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        other => other.as_f64(),
    };
    let lng = number(&point["x"])?;
    let lat = number(&point["y"])?;
    Coordinate::new(lat, lng).ok()
}
