// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layered configuration.
//!
//! Sources, lowest to highest precedence: built-in defaults,
//! `$XDG_CONFIG_HOME/dexview/dexview.toml`, an explicit `--config` file, `DEXVIEW_*` environment
//! variables, command-line flags.

use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::model::{PageSize, DEFAULT_PAGE_SIZE};
use crate::remote::client::{DEFAULT_API_URL, DEFAULT_INDEX_LIMIT, DEFAULT_REQUEST_TIMEOUT};
use crate::remote::ClientConfig;
use crate::ui::DEFAULT_STATUS_TTL;

const APP_DIR_NAME: &str = "dexview";
const CONFIG_FILE_NAME: &str = "dexview.toml";
const ENV_PREFIX: &str = "DEXVIEW_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine a data directory; set DEXVIEW_DATA_DIR or pass --data-dir")]
    NoDataDir,
    #[error("invalid configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    pub api_url: String,
    pub page_size: PageSize,
    pub request_timeout_secs: u64,
    pub index_limit: usize,
    pub data_dir: PathBuf,
    pub status_ttl_ms: u64,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub api_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub page_size: Option<usize>,
}

/// Where to look for the user config file and default data directory, and which environment
/// variables to read.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub config_home: Option<PathBuf>,
    pub data_home: Option<PathBuf>,
    pub env: HashMap<String, String>,
}

impl ConfigSources {
    pub fn from_process() -> Self {
        Self {
            config_home: dirs::config_dir(),
            data_home: dirs::data_dir(),
            env: utf8_vars(env::vars_os()),
        }
    }
}

/// Keeps the variables whose name and value are both valid UTF-8.
fn utf8_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> HashMap<String, String> {
    vars.into_iter()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

impl AppConfig {
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::load_from(ConfigSources::from_process(), overrides)
    }

    pub fn load_from(
        sources: ConfigSources,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let default_data_dir = sources.data_home.map(|dir| dir.join(APP_DIR_NAME));

        let mut builder = Config::builder()
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("page_size", DEFAULT_PAGE_SIZE.get() as i64)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT.as_secs() as i64)?
            .set_default("index_limit", DEFAULT_INDEX_LIMIT as i64)?
            .set_default("status_ttl_ms", DEFAULT_STATUS_TTL.as_millis() as i64)?;
        if let Some(data_dir) = &default_data_dir {
            builder = builder.set_default("data_dir", path_value(data_dir))?;
        }

        if let Some(config_home) = &sources.config_home {
            let user_file = config_home.join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
            debug!(path = %user_file.display(), "reading optional user config");
            builder = builder.add_source(
                File::from(user_file)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }
        if let Some(explicit) = &overrides.config_file {
            builder = builder.add_source(File::from(explicit.clone()).format(FileFormat::Toml));
        }

        let env_values = sources
            .env
            .into_iter()
            .filter_map(|(key, value)| Some((key.strip_prefix(ENV_PREFIX)?.to_owned(), value)))
            .collect::<HashMap<_, _>>();
        builder = builder
            .add_source(Environment::default().try_parsing(true).source(Some(env_values)))
            .set_override_option("api_url", overrides.api_url.clone())?
            .set_override_option("data_dir", overrides.data_dir.as_deref().map(path_value))?
            .set_override_option(
                "page_size",
                overrides.page_size.map(|size| i64::try_from(size).unwrap_or(i64::MAX)),
            )?;

        let raw = builder.build()?;
        if raw.get_string("data_dir").map_or(true, |dir| dir.is_empty()) {
            return Err(ConfigError::NoDataDir);
        }
        Ok(raw.try_deserialize()?)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.api_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            index_limit: self.index_limit,
        }
    }

    pub fn status_ttl(&self) -> Duration {
        Duration::from_millis(self.status_ttl_ms)
    }

    pub fn prefs_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::{utf8_vars, AppConfig, ConfigError, ConfigOverrides, ConfigSources};
    use crate::model::PageSize;

    fn sources(home: &TempDir, env: &[(&str, &str)]) -> ConfigSources {
        ConfigSources {
            config_home: Some(home.path().join("config")),
            data_home: Some(home.path().join("data")),
            env: env
                .iter()
                .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_environment_variables_are_skipped() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let vars = utf8_vars([
            (OsString::from("DEXVIEW_PAGE_SIZE"), OsString::from("12")),
            (OsString::from("BROKEN"), OsString::from_vec(vec![0x66, 0xff, 0x6f])),
            (OsString::from_vec(vec![0xfe]), OsString::from("x")),
        ]);
        assert_eq!(vars, HashMap::from([("DEXVIEW_PAGE_SIZE".to_owned(), "12".to_owned())]));
    }

    fn write_user_config(home: &TempDir, contents: &str) {
        let dir = home.path().join("config").join("dexview");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("dexview.toml"), contents).unwrap();
    }

    #[test]
    fn defaults_apply_without_any_source() {
        let home = TempDir::new().unwrap();
        let config =
            AppConfig::load_from(sources(&home, &[]), &ConfigOverrides::default()).unwrap();

        assert_eq!(config.api_url, "https://pokeapi.co/api/v2/pokemon");
        assert_eq!(config.page_size.get(), 24);
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.index_limit, 100_000);
        assert_eq!(config.status_ttl_ms, 3000);
        assert_eq!(config.data_dir, home.path().join("data").join("dexview"));
        assert_eq!(config.log_dir(), config.data_dir.join("logs"));
    }

    #[test]
    fn later_sources_win() {
        let home = TempDir::new().unwrap();
        write_user_config(
            &home,
            "api_url = \"http://file.invalid/pokemon\"\npage_size = 12\nstatus_ttl_ms = 500\n",
        );
        let env = [("DEXVIEW_PAGE_SIZE", "30"), ("OTHER_PAGE_SIZE", "99")];
        let overrides = ConfigOverrides {
            api_url: Some("http://cli.invalid/pokemon".to_owned()),
            ..ConfigOverrides::default()
        };

        let config = AppConfig::load_from(sources(&home, &env), &overrides).unwrap();
        assert_eq!(config.api_url, "http://cli.invalid/pokemon");
        assert_eq!(config.page_size.get(), 30);
        assert_eq!(config.status_ttl_ms, 500);
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let home = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            config_file: Some(home.path().join("missing.toml")),
            ..ConfigOverrides::default()
        };
        let err = AppConfig::load_from(sources(&home, &[]), &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let home = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            page_size: Some(0),
            ..ConfigOverrides::default()
        };
        assert!(AppConfig::load_from(sources(&home, &[]), &overrides).is_err());
        assert!(PageSize::new(0).is_none());
    }

    #[test]
    fn data_dir_is_required_when_no_default_exists() {
        let overrides = ConfigOverrides::default();
        let err = AppConfig::load_from(ConfigSources::default(), &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::NoDataDir));

        let overrides = ConfigOverrides {
            data_dir: Some(PathBuf::from("/tmp/dexview-test")),
            ..ConfigOverrides::default()
        };
        let config = AppConfig::load_from(ConfigSources::default(), &overrides).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/dexview-test"));
    }
}
