//! Config file location

use super::error::LocateError;
use std::path::{Path, PathBuf};

/// Directory under the user's home that holds gonzo's configuration.
pub const CONFIG_DIR: &str = ".config/gonzo";

/// File names tried inside [`CONFIG_DIR`], first match wins.
const CANDIDATES: [&str; 2] = ["config.yml", "config.yaml"];

/// Decide which config file to read.
///
/// An explicit, non-empty path is returned as-is; whether it exists is the
/// file reader's problem. Otherwise the per-user location is derived from
/// `home`, which callers take from `dirs::home_dir()`.
pub fn locate_with_home(explicit: Option<&Path>, home: Option<&Path>) -> Result<PathBuf, LocateError> {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path.to_path_buf());
    }

    let home = home.ok_or(LocateError::HomeDirUnavailable)?;
    Ok(discover_config(&home.join(CONFIG_DIR)))
}

fn discover_config(config_dir: &Path) -> PathBuf {
    for candidate in CANDIDATES {
        let path = config_dir.join(candidate);
        if path.is_file() {
            return path;
        }
    }

    config_dir.join(CANDIDATES[0])
}
