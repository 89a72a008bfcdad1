use std::path::{
    Path,
    PathBuf,
};

use anyhow::Context;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{
        Env,
        Format,
        Serialized,
        Toml,
    },
};
use log::debug;
use serde::{
    Serialize,
    Deserialize,
};

use crate::{
    dos::EnergyWindow,
    types::Result,
};


pub const ENV_PREFIX: &str = "RSBANDS_";
pub const CONFIG_FILE_NAME: &str = "config.toml";


#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KPathSettings {
    /// Points on the shortest segment of a generated path.
    pub min_points: usize,
}


impl Default for KPathSettings {
    fn default() -> Self {
        Self { min_points: 10 }
    }
}


/// Defaults of the subcommands, read from (later ones win)
///
/// 1. built-in values,
/// 2. `config.toml` in the user configuration directory,
/// 3. the file given by `--config`,
/// 4. environment variables like `RSBANDS_DOS__STEP=0.02`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub dos:   EnergyWindow,
    #[serde(default)]
    pub kpath: KPathSettings,
}


impl Settings {
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "rsbands")
            .map(|d| d.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn figment(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = Self::user_config_path() {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = extra {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load(extra: Option<&Path>) -> Result<Self> {
        if let Some(path) = extra {
            if !path.is_file() {
                anyhow::bail!("Config file {:?} not found.", path);
            }
        }
        let ret: Self = Self::figment(extra)
            .extract()
            .context("Failed to load settings")?;
        ret.dos.validate()?;
        debug!("Settings loaded: {:?}", ret);
        Ok(ret)
    }

    /// Default settings in TOML, as a starting point for `config.toml`.
    pub fn template() -> Result<String> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }
}
