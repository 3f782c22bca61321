//! Runtime configuration for a store.
//!
//! Every field is optional. Limits are ceilings on the capacity of each
//! backing array; growth that would need more fails with
//! [`StoreError::CapacityExceeded`](crate::StoreError::CapacityExceeded)
//! and leaves the store untouched.

use serde::{Deserialize, Serialize};

use crate::capacity::BASE_CAPACITY;
use crate::error::ConfigError;

pub const ENV_SLOT_LIMIT: &str = "XRT_STORE_SLOT_LIMIT";
pub const ENV_STR_LIMIT: &str = "XRT_STORE_STR_LIMIT";
pub const ENV_WIDE_LIMIT: &str = "XRT_STORE_WIDE_LIMIT";
pub const ENV_INITIAL_CAPACITY: &str = "XRT_STORE_INITIAL_CAPACITY";

const ENV_NAMES: [&str; 4] = [
    ENV_SLOT_LIMIT,
    ENV_STR_LIMIT,
    ENV_WIDE_LIMIT,
    ENV_INITIAL_CAPACITY,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Capacity of each array on its first growth. Later growth doubles.
    pub initial_capacity: usize,
    pub slot_limit: Option<usize>,
    pub str_index_limit: Option<usize>,
    pub wide_index_limit: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_capacity: BASE_CAPACITY,
            slot_limit: None,
            str_index_limit: None,
            wide_index_limit: None,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_slot_limit(mut self, limit: usize) -> Self {
        self.slot_limit = Some(limit);
        self
    }

    pub fn with_str_index_limit(mut self, limit: usize) -> Self {
        self.str_index_limit = Some(limit);
        self
    }

    pub fn with_wide_index_limit(mut self, limit: usize) -> Self {
        self.wide_index_limit = Some(limit);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroInitialCapacity);
        }
        Ok(())
    }

    /// Parse a JSON document such as `{"slot_limit": 1024}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the `XRT_STORE_*` environment variables over the defaults.
    ///
    /// Only those four names are looked up; other variables may hold
    /// anything, including bytes that are not UTF-8.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut vars = Vec::with_capacity(ENV_NAMES.len());
        for name in ENV_NAMES {
            let Some(raw) = std::env::var_os(name) else {
                continue;
            };
            let value = raw.into_string().map_err(|raw| ConfigError::InvalidValue {
                name: name.to_string(),
                value: raw.to_string_lossy().into_owned(),
            })?;
            vars.push((name, value));
        }
        Self::from_vars(vars)
    }

    /// Same as [`StoreConfig::from_env`], reading from an explicit set of
    /// variables. Unrelated names are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (name, value) in vars {
            let (name, value) = (name.as_ref(), value.as_ref());
            let target = match name {
                ENV_SLOT_LIMIT => &mut config.slot_limit,
                ENV_STR_LIMIT => &mut config.str_index_limit,
                ENV_WIDE_LIMIT => &mut config.wide_index_limit,
                ENV_INITIAL_CAPACITY => {
                    config.initial_capacity = parse_usize(name, value)?;
                    continue;
                }
                _ => continue,
            };
            *target = Some(parse_usize(name, value)?);
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse_usize(name: &str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        })
}
