//! Optional run configuration from `stream.toml`.
//!
//! Every section is optional; command-line flags override what is set here.
//!
//! ```toml
//! [walk]
//! seed = 42
//!
//! [output]
//! directory = "results"
//!
//! [log]
//! filter = "stream_core=debug"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE: &str = "stream.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StreamConfig {
    #[serde(default)]
    pub walk: WalkSection,

    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub log: LogSection,
}

/// Random-walk settings.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WalkSection {
    /// Fixed generator seed. Unset means a fresh entropy seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Directory for result files. Unset means next to the node file.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    /// Default `tracing` filter directive; `RUST_LOG` still wins.
    #[serde(default)]
    pub filter: Option<String>,
}

impl StreamConfig {
    /// Load `explicit` if given, else `stream.toml` in the working directory
    /// if it exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
