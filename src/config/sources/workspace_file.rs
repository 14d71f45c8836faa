//! Project config file source: an explicit path, or tree-json.toml in the working directory

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

/// File name looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "tree-json.toml";

/// Add the project config file to builder.
/// An explicit path is required to exist; the default file is optional.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    explicit: Option<&Path>,
    working_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(path) = explicit {
        return Ok(builder.add_source(File::from(path).required(true)));
    }

    let default_path = working_dir.join(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return Ok(builder.add_source(File::from(default_path).required(false)));
    }

    Ok(builder)
}
