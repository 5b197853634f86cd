use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use tokio::fs::{read_to_string, try_exists};
use tracing::debug;

use crate::error::{ConfigurationError, Result};

const FIELDS_KEY: &str = "fields";
const FILTER_TAG_KEY: &str = "filter_tag";
const DOMAIN_KEY: &str = "domain";
const ALL_KEY: &str = "all";

pub fn default_settings_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or(ConfigurationError::HomeDirectoryNotAvailable)?;
    Ok(home_dir.join(".cloudls").join("config"))
}

/// Values a listing command falls back to when the matching flag is not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDefaults {
    pub fields: Option<String>,
    pub filter_tag: Option<String>,
    pub domain: Option<String>,
    pub all: Option<bool>,
}

#[derive(Debug, Default)]
pub struct Settings {
    ini: Ini,
}

impl Settings {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn parse(path: &Path, contents: &str) -> Result<Self> {
        // Values are taken verbatim: quotes belong to field lists and
        // backslashes to domain patterns.
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..Default::default()
        };
        let ini = Ini::load_from_str_opt(contents, options).map_err(|error| {
            ConfigurationError::InvalidFile {
                path: path.display().to_string(),
                reason: error.to_string(),
            }
        })?;
        Ok(Self { ini })
    }

    /// Defaults for one command section such as `ec2.ls`. An absent section
    /// yields empty defaults.
    pub fn list_defaults(&self, command: &str) -> Result<ListDefaults> {
        let Some(section) = self.ini.section(Some(command)) else {
            return Ok(ListDefaults::default());
        };

        let all = section
            .get(ALL_KEY)
            .map(|value| parse_bool(command, value))
            .transpose()?;

        Ok(ListDefaults {
            fields: section.get(FIELDS_KEY).map(str::to_string),
            filter_tag: section.get(FILTER_TAG_KEY).map(str::to_string),
            domain: section.get(DOMAIN_KEY).map(str::to_string),
            all,
        })
    }
}

fn parse_bool(command: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigurationError::InvalidValue {
            field: format!("{command}.{ALL_KEY}"),
            reason: format!("expected a boolean, got {value:?}"),
        }
        .into()),
    }
}

/// Loads the settings file at `path`, or at the default location when `None`.
/// A missing file yields empty settings.
pub async fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_settings_path()?,
    };

    if !try_exists(&path).await? {
        debug!(path = %path.display(), "No settings file, using built-in defaults");
        return Ok(Settings::empty());
    }

    let contents = read_to_string(&path)
        .await
        .map_err(|error| ConfigurationError::InvalidFile {
            path: path.display().to_string(),
            reason: error.to_string(),
        })?;

    debug!(path = %path.display(), "Loaded settings file");
    Settings::parse(&path, &contents)
}
