use std::{env, error::Error, fmt, net::SocketAddr, str::FromStr};

use trip_planner::{
    MissingCoordinates, TripPlanner, DEFAULT_CORRIDOR_KM, DEFAULT_EVENT_COUNT,
};

pub const BIND_ADDRESS: &str = "EVENTBUZZER_BIND_ADDRESS";
pub const DEFAULT_EVENT_COUNT_KEY: &str = "EVENTBUZZER_DEFAULT_EVENT_COUNT";
pub const DEFAULT_CORRIDOR_KM_KEY: &str = "EVENTBUZZER_DEFAULT_CORRIDOR_KM";
pub const EXCLUDE_MISSING_COORDINATES: &str = "EVENTBUZZER_EXCLUDE_MISSING_COORDINATES";

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String },
}

impl Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => {
                write!(f, "Invalid value for {}: {:?}", key, value)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebConfig {
    pub bind_address: SocketAddr,
    pub default_event_count: usize,
    pub default_corridor_km: f64,
    pub exclude_missing_coordinates: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            default_event_count: DEFAULT_EVENT_COUNT,
            default_corridor_km: DEFAULT_CORRIDOR_KM,
            exclude_missing_coordinates: false,
        }
    }
}

impl WebConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads every setting through `lookup`, falling back to the defaults for
    /// unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let default_corridor_km = parse(&lookup, DEFAULT_CORRIDOR_KM_KEY)?
            .unwrap_or(defaults.default_corridor_km);
        if !default_corridor_km.is_finite() || default_corridor_km < 0.0 {
            return Err(ConfigError::Invalid {
                key: DEFAULT_CORRIDOR_KM_KEY,
                value: default_corridor_km.to_string(),
            });
        }
        let default_event_count = parse(&lookup, DEFAULT_EVENT_COUNT_KEY)?
            .unwrap_or(defaults.default_event_count);
        // the planner rejects a zero count, so every default request would fail
        if default_event_count == 0 {
            return Err(ConfigError::Invalid {
                key: DEFAULT_EVENT_COUNT_KEY,
                value: default_event_count.to_string(),
            });
        }
        Ok(Self {
            bind_address: parse(&lookup, BIND_ADDRESS)?.unwrap_or(defaults.bind_address),
            default_event_count,
            default_corridor_km,
            exclude_missing_coordinates: parse(&lookup, EXCLUDE_MISSING_COORDINATES)?
                .unwrap_or(defaults.exclude_missing_coordinates),
        })
    }

    pub fn planner(&self) -> TripPlanner {
        let missing_coordinates = if self.exclude_missing_coordinates {
            MissingCoordinates::Exclude
        } else {
            MissingCoordinates::DefaultToOrigin
        };
        TripPlanner::new()
            .with_default_count(self.default_event_count)
            .with_default_corridor(self.default_corridor_km)
            .with_missing_coordinates(missing_coordinates)
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(None),
    }
}
