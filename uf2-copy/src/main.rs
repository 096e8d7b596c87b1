// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

use {
    colored::Colorize,
    std::{
        ffi::OsString,
        fs,
        io::Write,
        path::{Path, PathBuf},
    },
    tracing_subscriber::{fmt, prelude::*, EnvFilter},
};

mod args;

#[cfg(test)]
mod tests;

fn main() -> std::process::ExitCode {
    main_args(
        std::env::args_os(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .into()
}

fn main_args<I, T>(args: I, mut stdout: impl Write, mut stderr: impl Write) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match run(args, &mut stdout) {
        Ok(()) => ExitCode(0),
        Err(Error::Cli(e)) => {
            // Clap already does the "error: {}" formatting, and --help/--version land here too.
            if e.use_stderr() {
                write!(stderr, "{e}").expect("write error to stderr");
                ExitCode(1)
            } else {
                write!(stdout, "{e}").expect("write help to stdout");
                ExitCode(0)
            }
        }
        Err(e) => {
            writeln!(stderr, "{} {e}", "error:".bold().red()).expect("write error to stderr");
            ExitCode(1)
        }
    }
}

fn run<I, T>(args: I, stdout: impl Write) -> Result<(), Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = args::args(args).map_err(Error::Cli)?;
    init_logging(args.verbose);

    let src = match args.nvs_src_file {
        Some(src) if src.exists() => src,
        Some(src) => {
            tracing::debug!("{} does not exist, nothing to copy", src.display());
            return Ok(());
        }
        None => {
            tracing::debug!("no source file given, nothing to copy");
            return Ok(());
        }
    };
    let dst = args.nvs_dst_file.ok_or(Error::DestinationMissing)?;
    copy_files(&src, &dst, stdout)
}

/// Copies `src` to `dst`, creating the parent directories of `dst` first.
/// An existing `dst` is overwritten.
fn copy_files(src: &Path, dst: &Path, mut stdout: impl Write) -> Result<(), Error> {
    // Copying a file onto itself truncates it before it is read.
    if dst.exists() && same_file(src, dst) {
        return Err(Error::SameFile {
            path: src.to_path_buf(),
        });
    }

    if let Some(dir) = dst.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if !dir.exists() {
            tracing::debug!("creating {}", dir.display());
            fs::create_dir_all(dir).map_err(|source| Error::CreateDestinationDir {
                dir: dir.to_path_buf(),
                source,
            })?;
        }
    }

    let bytes = fs::copy(src, dst).map_err(|source| Error::CopyFile {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    })?;
    tracing::debug!("copied {bytes} bytes");

    writeln!(
        stdout,
        "File copied from {} to {}",
        src.display(),
        dst.display()
    )
    .map_err(Error::Stdout)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Already installed when called more than once in the same process.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error(transparent)]
    Cli(clap::Error),
    #[error("no destination file given, use --nvs_dst_file (-d2)")]
    DestinationMissing,
    #[error("\"{}\" is both source and destination", .path.display())]
    SameFile { path: PathBuf },
    #[error("failed to create destination directory \"{}\": {source}", .dir.display())]
    CreateDestinationDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to copy \"{}\" to \"{}\": {source}", .src.display(), .dst.display())]
    CopyFile {
        src: PathBuf,
        dst: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write to stdout: {0}")]
    Stdout(std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ExitCode(u8);

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        code.0.into()
    }
}
