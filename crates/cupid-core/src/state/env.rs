use crate::{SharedString, bail, error::Error};
use std::{fmt, path::PathBuf, str::FromStr};

/// Running environment, which selects the config file and the logging defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub enum Env {
    /// Local development with pretty logs.
    #[default]
    Dev,
    /// Production with JSON logs.
    Prod,
    /// A named environment such as `staging`.
    Custom(SharedString),
}

impl Env {
    /// Returns `true` if `self` is the `dev` environment.
    #[inline]
    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    /// Returns `true` if `self` is the `prod` environment.
    #[inline]
    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }

    /// Returns the name of the environment.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
            Self::Custom(name) => name,
        }
    }

    /// Returns the path of the config file relative to the project directory.
    #[inline]
    pub fn config_file(&self) -> PathBuf {
        PathBuf::from("config").join(format!("config.{self}.toml"))
    }
}

impl fmt::Display for Env {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Env {
    type Err = Error;

    /// Parses the name of an environment. Custom names are restricted to
    /// ASCII lowercase letters, digits, `-` and `_` since they end up in
    /// the config file name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let valid_name = name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_');
        match name {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            "" => bail!("the env name should not be empty"),
            _ if valid_name => Ok(Self::Custom(name.to_owned().into())),
            _ => bail!("the env name `{name}` should consist of lowercase letters, digits, `-` or `_`"),
        }
    }
}
