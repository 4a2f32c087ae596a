//! Environment-driven settings.
//!
//! - `data_file`: dataset path when `--data` is absent (default `data.json`)
//! - `export_dir`: export directory when `--output` is absent
//! - `pretty_json`: pretty-print command output

use std::path::PathBuf;

/// Read an env var as bool ("1" or "true" = true).
pub fn get_env_bool(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Read an env var or return `default`.
pub fn get_env_with_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Dataset location: explicit path, then `data_file`, then `data.json`.
pub fn data_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| PathBuf::from(get_env_with_default("data_file", "data.json")))
}

/// Export directory: explicit path, then `export_dir`, then the user's
/// download directory, then the working directory.
pub fn export_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os("export_dir").map(PathBuf::from))
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
