//! Configuration System
//!
//! Layered configuration built with the `config` crate. Sources, lowest to
//! highest precedence: built-in defaults, the user config file, the project or
//! explicitly named config file, then `TREE_JSON_<SECTION>__<KEY>` environment
//! variables. Command-line flags are applied on top by the binary.

use crate::error::ConvertError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

mod merge;
mod sources;

pub use sources::workspace_file::DEFAULT_CONFIG_FILE;

/// What to do when two sibling entries map to the same key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// The later-completing entry silently replaces the earlier one
    #[default]
    Overwrite,
    /// Fail the conversion with a duplicate key error
    Reject,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "reject" => Ok(CollisionPolicy::Reject),
            other => Err(format!(
                "Invalid collision policy: {} (must be 'overwrite' or 'reject')",
                other
            )),
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionPolicy::Overwrite => f.write_str("overwrite"),
            CollisionPolicy::Reject => f.write_str("reject"),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Traversal settings
    #[serde(default)]
    pub walk: WalkConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Traversal settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Maximum simultaneous list/classify/read operations (None = unbounded)
    #[serde(default)]
    pub max_in_flight: Option<usize>,

    /// Sibling key collision handling
    #[serde(default)]
    pub collisions: CollisionPolicy,
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Indent the written JSON
    #[serde(default)]
    pub pretty: bool,
}

impl WalkConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_in_flight == Some(0) {
            return Err("walk.max_in_flight must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl ConvertConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConvertError> {
        self.walk.validate().map_err(ConvertError::Config)?;
        self.logging.validate().map_err(ConvertError::Config)
    }
}

/// Loads [`ConvertConfig`] from all configured sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration relative to the current working directory
    ///
    /// `explicit` names a config file that must exist; without it,
    /// `tree-json.toml` in the working directory is used when present.
    pub fn load(explicit: Option<&Path>) -> Result<ConvertConfig, ConvertError> {
        Self::load_from(explicit, Path::new("."))
    }

    /// Load configuration, looking for the project config file in `working_dir`
    pub fn load_from(
        explicit: Option<&Path>,
        working_dir: &Path,
    ) -> Result<ConvertConfig, ConvertError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, explicit, working_dir)?;
        let builder = sources::environment::add_to_builder(builder);

        let config: ConvertConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
