//! Global mycal configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR};
use crate::error::{MycalError, MycalResult};
use crate::picker::YearRange;

static SESSION_FILE_NAME: &str = "session.toml";

/// Firebase project settings. Endpoint overrides point the client at the
/// Auth emulator or a test server.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FirebaseSettings {
    pub api_key: Option<String>,
    pub identity_url: Option<String>,
    pub token_url: Option<String>,
}

/// OAuth client used for "Sign in with Google".
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct GoogleSettings {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct CalendarSettings {
    #[serde(default = "default_min_year")]
    pub min_year: i32,

    #[serde(default = "default_max_year")]
    pub max_year: i32,
}

fn default_min_year() -> i32 {
    DEFAULT_MIN_YEAR
}

fn default_max_year() -> i32 {
    DEFAULT_MAX_YEAR
}

impl Default for CalendarSettings {
    fn default() -> Self {
        CalendarSettings {
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
        }
    }
}

/// Configuration at ~/.config/mycal/config.toml, overridable through
/// `MYCAL__SECTION__KEY` environment variables.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MycalConfig {
    /// Where the signed-in session is kept. Defaults next to the config file.
    #[serde(default)]
    pub session_file: Option<PathBuf>,

    #[serde(default)]
    pub firebase: FirebaseSettings,

    #[serde(default)]
    pub google: Option<GoogleSettings>,

    #[serde(default)]
    pub calendar: CalendarSettings,
}

impl MycalConfig {
    pub fn config_dir() -> MycalResult<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| MycalError::Config("Could not determine config directory".into()))?
            .join("mycal"))
    }

    pub fn config_path() -> MycalResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the global config, writing a commented default file first if
    /// there is none yet.
    pub fn load() -> MycalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (optional) layered under the environment.
    pub fn load_from(path: &Path) -> MycalResult<Self> {
        let config: MycalConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("MYCAL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| MycalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| MycalError::Config(e.to_string()))?;

        config.year_range()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn year_range(&self) -> MycalResult<YearRange> {
        YearRange::new(self.calendar.min_year, self.calendar.max_year)
    }

    /// Session file path with `~` expanded.
    pub fn session_path(&self) -> MycalResult<PathBuf> {
        match &self.session_file {
            Some(path) => Ok(PathBuf::from(
                shellexpand::tilde(&path.to_string_lossy()).into_owned(),
            )),
            None => Ok(Self::config_dir()?.join(SESSION_FILE_NAME)),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> MycalResult<()> {
        let contents = format!(
            "\
# mycal configuration

# Firebase project used for sign-in (Project settings > General > Web API key):
# [firebase]
# api_key = \"AIza...\"

# OAuth client for \"Sign in with Google\" (type: Desktop app):
# [google]
# client_id = \"your-client-id.apps.googleusercontent.com\"
# client_secret = \"your-client-secret\"

# Years offered by the year picker:
# [calendar]
# min_year = {DEFAULT_MIN_YEAR}
# max_year = {DEFAULT_MAX_YEAR}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MycalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| MycalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mycal").join("config.toml");
        MycalConfig::create_default_config(&path).unwrap();

        let config = MycalConfig::load_from(&path).unwrap();
        assert_eq!(config.calendar, CalendarSettings::default());
        assert_eq!(config.google, None);
    }

    #[test]
    fn reads_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
session_file = "~/mycal-session.toml"

[firebase]
api_key = "key-123"

[google]
client_id = "id"
client_secret = "secret"

[calendar]
min_year = 2000
"#,
        )
        .unwrap();

        let config = MycalConfig::load_from(&path).unwrap();
        assert_eq!(config.firebase.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.google.as_ref().map(|g| g.client_id.as_str()), Some("id"));
        assert_eq!(config.calendar.min_year, 2000);
        assert_eq!(config.calendar.max_year, DEFAULT_MAX_YEAR);
        assert!(!config.session_path().unwrap().starts_with("~"));
    }

    #[test]
    fn rejects_inverted_year_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[calendar]\nmin_year = 2100\nmax_year = 2000\n").unwrap();
        assert!(matches!(MycalConfig::load_from(&path), Err(MycalError::Config(_))));
    }

    #[test]
    fn rejects_year_beyond_calendar_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[calendar]\nmin_year = 1900\nmax_year = 300000\n").unwrap();
        assert!(matches!(MycalConfig::load_from(&path), Err(MycalError::Config(_))));
    }
}
