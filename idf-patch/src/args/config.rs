// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub directory: Option<PathBuf>,
    pub patch_dir: Option<PathBuf>,
    pub commit: Option<String>,
    pub patch_file: Option<PathBuf>,
    pub install_script: Option<PathBuf>,
    pub binaries: Option<Vec<PathBuf>>,
}

impl Config {
    /// Loads the config file. Relative directories are taken relative to the
    /// directory the config file lives in.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let config = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&config)?;

        let base = path.parent().unwrap_or(Path::new(""));
        config.directory = config.directory.map(|dir| base.join(dir));
        config.patch_dir = config.patch_dir.map(|dir| base.join(dir));
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("config file format error in TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
