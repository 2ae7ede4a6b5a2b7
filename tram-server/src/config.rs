//! Server configuration from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::assistant::{DEFAULT_NEARBY_ORIGIN, PagingPolicy, UnknownPagingPolicy};
use crate::domain::Coordinates;
use crate::tan::TanConfig;

const BIND_ADDR_VAR: &str = "TRAM_BIND_ADDR";
const PORT_VAR: &str = "PORT";
const BASE_URL_VAR: &str = "TAN_BASE_URL";
const TIMEOUT_VAR: &str = "TAN_TIMEOUT_SECS";
const MOCK_DIR_VAR: &str = "TAN_MOCK_DIR";
const PAGING_VAR: &str = "TRAM_PAGING_POLICY";
const NEARBY_LAT_VAR: &str = "TRAM_NEARBY_LAT";
const NEARBY_LNG_VAR: &str = "TRAM_NEARBY_LNG";

const DEFAULT_PORT: u16 = 3000;

/// Error reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error(transparent)]
    Paging(#[from] UnknownPagingPolicy),

    /// Only one half of the nearby origin was given
    #[error("TRAM_NEARBY_LAT and TRAM_NEARBY_LNG must be set together")]
    PartialOrigin,
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,

    /// Live API settings, unused when `mock_dir` is set.
    pub tan: TanConfig,

    /// Serve captured fixtures instead of calling the live API.
    pub mock_dir: Option<PathBuf>,

    pub paging: PagingPolicy,

    /// Reference point for the nearby-stops lookup.
    pub nearby_origin: Coordinates,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            tan: TanConfig::default(),
            mock_dir: None,
            paging: PagingPolicy::default(),
            nearby_origin: DEFAULT_NEARBY_ORIGIN,
        }
    }
}

impl AppConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`; unset or blank variables keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        let ip = match get(BIND_ADDR_VAR) {
            Some(v) => parse(BIND_ADDR_VAR, &v)?,
            None => config.bind.ip(),
        };
        let port = match get(PORT_VAR) {
            Some(v) => parse(PORT_VAR, &v)?,
            None => config.bind.port(),
        };
        config.bind = SocketAddr::new(ip, port);

        if let Some(url) = get(BASE_URL_VAR) {
            config.tan = config.tan.with_base_url(url.trim());
        }
        if let Some(v) = get(TIMEOUT_VAR) {
            config.tan = config.tan.with_timeout(parse(TIMEOUT_VAR, &v)?);
        }

        config.mock_dir = get(MOCK_DIR_VAR).map(PathBuf::from);

        if let Some(v) = get(PAGING_VAR) {
            config.paging = v.parse()?;
        }

        config.nearby_origin = match (get(NEARBY_LAT_VAR), get(NEARBY_LNG_VAR)) {
            (None, None) => config.nearby_origin,
            (Some(lat), Some(lng)) => {
                let origin = Coordinates::new(
                    parse(NEARBY_LAT_VAR, &lat)?,
                    parse(NEARBY_LNG_VAR, &lng)?,
                );
                if !origin.is_valid() {
                    return Err(ConfigError::Invalid {
                        var: NEARBY_LAT_VAR,
                        value: format!("{lat}, {lng}"),
                    });
                }
                origin
            }
            _ => return Err(ConfigError::PartialOrigin),
        };

        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}
