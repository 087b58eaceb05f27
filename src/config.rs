//! Settings for the `gendersdb` binary.
//!
//! Values are layered: built-in defaults, then an optional `gendersdb.toml`
//! (or any other format the `config` crate recognizes) in the working
//! directory, then `GENDERSDB_*` environment variables.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::database::DEFAULT_GENDERS_PATH;
use crate::error::Result;

pub const SETTINGS_NAME: &str = "gendersdb";
pub const ENVIRONMENT_PREFIX: &str = "GENDERSDB";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// The genders file to load.
    pub database: PathBuf,
    /// Default tracing filter, used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from(SETTINGS_NAME)
    }

    /// Loads settings with `name` as the settings file stem.
    pub fn load_from(name: &str) -> Result<Self> {
        let settings = Config::builder()
            .set_default("database", DEFAULT_GENDERS_PATH)?
            .set_default("log_level", "warn")?
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix(ENVIRONMENT_PREFIX))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_GENDERS_PATH),
            log_level: String::from("warn"),
        }
    }
}
