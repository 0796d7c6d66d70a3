//! Host environment utility functions

use std::path::PathBuf;

/// Name of the environment variable giving the software root directory.
pub const SW_ROOT_ENV_VAR: &str = "HELM_SW_ROOT";

/// Get the root directory of the helm software installation.
///
/// The root is read from the `HELM_SW_ROOT` environment variable and is used
/// to locate the `params`, `scripts`, and `sessions` directories.
pub fn get_helm_sw_root() -> Result<PathBuf, std::env::VarError> {
    std::env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}
