use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::listings::ingest::IngestConfig;
use crate::listings::ring::PostcodeRing;
use crate::listings::source::{OfferingType, SearchQuery};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// The curated "binnen de ring" prefix bands used when `RING_BANDS` is
/// not set: centrum, west, zuid, oost.
pub const DEFAULT_RING_BANDS: &[(u32, u32)] =
    &[(1011, 1019), (1051, 1059), (1071, 1079), (1091, 1098)];

const DEFAULT_SOURCE_ORIGIN: &str = "https://www.funda.nl";
const DEFAULT_LOCATION: &str = "amsterdam";
const DEFAULT_PRICE_FLOOR: i64 = 400_000;
const DEFAULT_PRICE_CEILING: i64 = 570_000;
const DEFAULT_AREA_FLOOR: u32 = 55;
const DEFAULT_SOURCE_PAGES: u32 = 5;

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub store: StoreConfig,
    pub source: SourceConfig,
    pub filter: FilterSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let store = StoreConfig {
            url: required("STORE_URL")?,
            key: required("STORE_KEY")?,
        };

        let price_max = number_or("PRICE_MAX", DEFAULT_PRICE_CEILING)?;
        let area_min = number_or("AREA_MIN", DEFAULT_AREA_FLOOR)?;

        let source = SourceConfig {
            origin: env::var("SOURCE_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_SOURCE_ORIGIN.to_string()),
            location: env::var("SOURCE_LOCATION").unwrap_or_else(|_| DEFAULT_LOCATION.to_string()),
            offering: env::var("SOURCE_OFFERING")
                .ok()
                .and_then(|value| OfferingType::from_label(&value))
                .unwrap_or(OfferingType::Buy),
            price_min: Some(number_or("PRICE_MIN", DEFAULT_PRICE_FLOOR)?),
            price_max: Some(price_max),
            area_min: Some(area_min),
            area_max: optional_number("AREA_MAX")?,
            plot_min: optional_number("PLOT_MIN")?,
            plot_max: optional_number("PLOT_MAX")?,
            object_type: non_empty("SOURCE_OBJECT_TYPE"),
            energy_label: non_empty("SOURCE_ENERGY_LABEL"),
            pages: number_or("SOURCE_PAGES", DEFAULT_SOURCE_PAGES)?,
        };

        let ring_bands = match env::var("RING_BANDS") {
            Ok(value) => parse_ring_bands(&value)?,
            Err(_) => DEFAULT_RING_BANDS.to_vec(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            store,
            source,
            filter: FilterSettings {
                price_ceiling: price_max,
                area_floor: area_min,
                ring_bands,
            },
        })
    }

    /// Filter pipeline settings for one ingestion run.
    pub fn ingest_config(&self) -> IngestConfig {
        IngestConfig {
            price_ceiling: self.filter.price_ceiling,
            area_floor: self.filter.area_floor,
            ring: PostcodeRing::from_bands(&self.filter.ring_bands),
            listing_origin: self.source.origin.clone(),
        }
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Endpoint and credential of the hosted record store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub key: String,
}

/// Query parameters for the listing source.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub origin: String,
    pub location: String,
    pub offering: OfferingType,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub area_min: Option<u32>,
    pub area_max: Option<u32>,
    pub plot_min: Option<u32>,
    pub plot_max: Option<u32>,
    pub object_type: Option<String>,
    pub energy_label: Option<String>,
    /// Result pages fetched per run, newest first.
    pub pages: u32,
}

impl SourceConfig {
    pub fn search_query(&self) -> SearchQuery {
        SearchQuery {
            location: self.location.clone(),
            offering_type: self.offering,
            price_min: self.price_min,
            price_max: self.price_max,
            area_min: self.area_min,
            area_max: self.area_max,
            plot_min: self.plot_min,
            plot_max: self.plot_max,
            object_type: self.object_type.clone(),
            energy_label: self.energy_label.clone(),
            sort: "newest".to_string(),
        }
    }
}

/// Local acceptance filters applied on top of the source-side search.
#[derive(Debug, Clone)]
pub struct FilterSettings {
    pub price_ceiling: i64,
    pub area_floor: u32,
    pub ring_bands: Vec<(u32, u32)>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    Missing(&'static str),
    InvalidNumber(&'static str),
    InvalidRingBands(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::Missing(var) => write!(f, "{var} must be set"),
            ConfigError::InvalidNumber(var) => write!(f, "{var} must be a number"),
            ConfigError::InvalidRingBands(value) => {
                write!(
                    f,
                    "RING_BANDS '{value}' must be comma-separated prefix bands like 1011-1019"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(var)),
    }
}

fn non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}

fn optional_number<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber(var)),
        _ => Ok(None),
    }
}

fn number_or<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    Ok(optional_number(var)?.unwrap_or(default))
}

/// Parse `RING_BANDS` of the form `1011-1019,1051-1059`; a bare prefix
/// is a band of one.
fn parse_ring_bands(value: &str) -> Result<Vec<(u32, u32)>, ConfigError> {
    let invalid = || ConfigError::InvalidRingBands(value.to_string());
    let mut bands = Vec::new();

    for part in value.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        match part.split_once('-') {
            Some((low, high)) => {
                let low: u32 = low.trim().parse().map_err(|_| invalid())?;
                let high: u32 = high.trim().parse().map_err(|_| invalid())?;
                if low > high {
                    return Err(invalid());
                }
                bands.push((low, high));
            }
            None => {
                let prefix: u32 = part.parse().map_err(|_| invalid())?;
                bands.push((prefix, prefix));
            }
        }
    }

    if bands.is_empty() {
        return Err(invalid());
    }
    Ok(bands)
}
