// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

use {
    crate::plan::FailurePolicy,
    clap::Parser,
    std::{
        ffi::OsString,
        path::{Path, PathBuf},
    },
};

mod cli;
mod config;

pub use {cli::Args as Cli, config::Error as ConfigError};

/// Program arguments loaded from the CLI and config file.
#[derive(Debug, Clone)]
pub struct Args {
    /// Absolute path of the IDF checkout, if one was given.
    pub directory: Option<PathBuf>,
    pub patch_dir: PathBuf,
    pub commit: String,
    pub patch_file: PathBuf,
    pub install_script: PathBuf,
    pub binaries: Vec<PathBuf>,
    pub policy: FailurePolicy,
    pub dry_run: bool,
}

/// Parses the command line only, the config file is not touched yet.
pub fn parse<I, T>(args: I) -> Result<Cli, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(Error::Cli)
}

/// Merges the config file into the parsed command line. Relative paths are
/// resolved against `cwd`.
pub fn resolve(cli: Cli, cwd: &Path) -> Result<Args, Error> {
    let config = cli
        .config
        .map(|c| config::Config::load(&cwd.join(c)))
        .transpose()?
        .unwrap_or_default();

    // Anything given on both sides is ambiguous.
    let directory = reconcile("directory", cli.directory, config.directory)?;
    let patch_dir = reconcile("patch dir", cli.patch_dir, config.patch_dir)?;
    let commit = reconcile("commit", cli.commit, config.commit)?;

    let binaries = match config.binaries {
        Some(binaries) => binaries,
        None => consts::BINARY_PATCH_LIST.iter().map(PathBuf::from).collect(),
    };
    if let Some(binary) = binaries.iter().find(|binary| !binary.is_relative()) {
        return Err(Error::BinaryPathNotRelative(binary.clone()));
    }

    Ok(Args {
        directory: directory.map(|dir| cwd.join(dir)),
        patch_dir: patch_dir.map_or_else(|| cwd.to_path_buf(), |dir| cwd.join(dir)),
        commit: commit.unwrap_or_else(|| consts::IDF_COMMIT.to_owned()),
        patch_file: config
            .patch_file
            .unwrap_or_else(|| PathBuf::from(consts::IDF_PATCH_FILE)),
        install_script: config
            .install_script
            .unwrap_or_else(|| PathBuf::from(consts::IDF_INSTALL_SCRIPT)),
        binaries,
        policy: if cli.keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::Strict
        },
        dry_run: cli.dry_run,
    })
}

fn reconcile<T>(key: &'static str, cli: Option<T>, config: Option<T>) -> Result<Option<T>, Error> {
    match (cli, config) {
        (Some(_), Some(_)) => Err(Error::InConfigAndCli(key)),
        (cli, config) => Ok(cli.or(config)),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Cli(clap::Error),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0} specified in both config and cli")]
    InConfigAndCli(&'static str),
    #[error(r#"config error: binary path is not relative: "{}""#, .0.display())]
    BinaryPathNotRelative(PathBuf),
}
