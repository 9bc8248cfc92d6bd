use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Base config directory (`~/.config/markswap/`, `%APPDATA%\markswap` on Windows).
pub fn markswap() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected("APPDATA environment variable not set on Windows")
        })?;
        Ok(PathBuf::from(appdata).join("markswap"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected("HOME environment variable not set on Unix-like system")
        })?;
        Ok(PathBuf::from(home).join(".config").join("markswap"))
    }
}

/// Global markswap.json config file path
pub fn markswap_json() -> Result<PathBuf> {
    Ok(markswap()?.join("markswap.json"))
}
