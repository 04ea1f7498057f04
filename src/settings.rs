//! Layered settings: built-in defaults, then an optional `lectio` config file
//! in the working directory (any format the `config` crate knows, e.g.
//! `lectio.toml` or `lectio.ini`), then `LECTIO_*` environment variables.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Directory holding the MorphGNT `.txt` files.
    pub data_dir: String,
    /// SQLite file for translations and the last position, or `:memory:`.
    pub database: String,
    /// Used when `RUST_LOG` is not set.
    pub log_filter: String,
    pub user_name: Option<String>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from("lectio")
    }
    /// `file` is a path without extension; a missing file is not an error.
    pub fn load_from(file: &str) -> Result<Self> {
        let settings = Self::defaults()?
            .add_source(File::with_name(file).required(false))
            .add_source(Environment::with_prefix("LECTIO"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("data_dir", "morphgnt")?
            .set_default("database", "userdata/lectio.db")?
            .set_default("log_filter", "info")?)
    }
}
