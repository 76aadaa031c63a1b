//! Running environment and configuration.
//!
//! The config is read from `config/config.{env}.toml` under the project
//! directory. The env is taken from `CUPID_ENV` and the project directory
//! from `CUPID_PROJECT_DIR`, falling back to `dev` and the current directory.
use crate::{LazyLock, bail, error::Error};
use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};
use toml::Table;

mod env;

pub use self::env::Env;

/// A state is a record of the env and config.
#[derive(Debug, Clone, Default)]
pub struct State {
    /// Environment.
    env: Env,
    /// Configuration.
    config: Table,
}

impl State {
    /// Creates a new instance with an empty config.
    #[inline]
    pub fn new(env: Env) -> Self {
        Self {
            env,
            config: Table::new(),
        }
    }

    /// Creates a new instance with the config parsed from a TOML string.
    pub fn with_config_str(env: Env, config: &str) -> Result<Self, Error> {
        let config = toml::from_str::<Table>(config)
            .map_err(|err| Error::with_source("fail to parse the toml config", err))?;
        Ok(Self { env, config })
    }

    /// Loads the config file for the env from the project directory.
    ///
    /// A missing config file yields an empty config.
    pub fn load(env: Env, project_dir: &Path) -> Result<Self, Error> {
        let config_file = project_dir.join(env.config_file());
        match fs::read_to_string(&config_file) {
            Ok(config) => Self::with_config_str(env, &config).map_err(|err| {
                let config_file = config_file.display();
                err.wrap(format!("invalid config file `{config_file}`"))
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let config_file = config_file.display();
                tracing::warn!("config file `{config_file}` does not exist");
                Ok(Self::new(env))
            }
            Err(err) => {
                let config_file = config_file.display();
                Err(Error::with_source(
                    format!("fail to read the config file `{config_file}`"),
                    err,
                ))
            }
        }
    }

    /// Loads the config with the env and project directory taken from the environment variables.
    pub fn from_env() -> Result<Self, Error> {
        #[cfg(feature = "dotenv")]
        dotenvy::dotenv().ok();

        Self::from_vars(|key| std::env::var_os(key))
    }

    /// Loads the config with `CUPID_ENV` and `CUPID_PROJECT_DIR` read by the lookup.
    /// An empty variable counts as unset.
    fn from_vars(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Self, Error> {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let app_env = match var("CUPID_ENV") {
            Some(value) => {
                let Some(name) = value.to_str() else {
                    bail!("the `CUPID_ENV` variable should be valid UTF-8");
                };
                name.parse::<Env>()
                    .map_err(|err| err.wrap("invalid `CUPID_ENV` variable"))?
            }
            None => Env::default(),
        };
        let project_dir = var("CUPID_PROJECT_DIR")
            .map(PathBuf::from)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default();
        Self::load(app_env, &project_dir)
    }

    /// Returns a reference to the shared state loaded by [`from_env()`](Self::from_env).
    ///
    /// Loading errors are logged and result in an empty config.
    #[inline]
    pub fn shared() -> &'static Self {
        LazyLock::force(&SHARED_STATE)
    }

    /// Returns the env.
    #[inline]
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Returns a reference to the config.
    #[inline]
    pub fn config(&self) -> &Table {
        &self.config
    }
}

/// Shared application state.
static SHARED_STATE: LazyLock<State> = LazyLock::new(|| {
    State::from_env().unwrap_or_else(|err| {
        tracing::error!("fail to load the config: {err}");
        State::default()
    })
});
