// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

use {
    colored::Colorize,
    plan::{FailurePolicy, Plan, Step},
    runner::{Runner, StepStatus, SystemRunner},
    std::{
        ffi::OsString,
        fs,
        io::Write,
        path::{Path, PathBuf},
    },
    tracing_subscriber::{fmt, prelude::*, EnvFilter},
};

mod args;
mod plan;
mod runner;


fn main() {
    let exit_code = main_args(
        std::env::args_os(),
        std::env::consts::OS,
        &mut SystemRunner,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    );
    std::process::exit(exit_code.0);
}

fn main_args<I, T>(
    args: I,
    os: &str,
    runner: &mut dyn Runner,
    mut stdout: impl Write,
    mut stderr: impl Write,
) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match run(args, os, runner) {
        Ok(()) => ExitCode(0),
        Err(Error::Args(args::Error::Cli(e))) => {
            // Clap already does the "error: {}" formatting, and --help/--version land here too.
            if e.use_stderr() {
                write!(stderr, "{e}").expect("write error to stderr");
            } else {
                write!(stdout, "{e}").expect("write help to stdout");
            }
            ExitCode(e.exit_code())
        }
        Err(e) => {
            writeln!(stderr, "{} {e}", "error:".bold().red()).expect("write error to stderr");
            ExitCode(-1)
        }
    }
}

fn run<I, T>(args: I, os: &str, runner: &mut dyn Runner) -> Result<(), Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = args::parse(args)?;
    init_logging(cli.verbose);

    if !consts::is_supported_platform(os) {
        return Err(Error::UnsupportedPlatform(os.to_owned()));
    }

    let cwd = std::env::current_dir().map_err(Error::CurrentDir)?;
    let args = args::resolve(cli, &cwd)?;
    let idf_dir = args.directory.ok_or(Error::DirectoryMissing)?;

    let plan = Plan {
        idf_dir,
        patch_dir: args.patch_dir,
        commit: args.commit,
        patch_file: args.patch_file,
        install_script: args.install_script,
        binaries: args.binaries,
    };

    tracing::info!("patches at {}", plan.patch_dir.display());
    tracing::info!("esp-idf at {}", plan.idf_dir.display());
    if args.dry_run {
        tracing::info!("dry run, nothing will be executed or copied");
    }
    tracing::info!("Fetching origin. Please wait...");

    for stage in plan.stages() {
        run_stage(&stage, &plan.idf_dir, runner, args.policy, args.dry_run)?;
    }

    for (src, dst) in plan.binary_copies() {
        tracing::info!("Copy {} to {}", src.display(), dst.display());
        if args.dry_run {
            continue;
        }
        fs::copy(&src, &dst).map_err(|source| Error::CopyBinary { src, dst, source })?;
    }

    tracing::info!("esp-idf patched at {}", plan.commit);
    Ok(())
}

/// Runs the steps of one stage in order. A failed step ends the stage; under
/// [`FailurePolicy::Strict`] it also ends the run.
fn run_stage(
    stage: &[Step],
    cwd: &Path,
    runner: &mut dyn Runner,
    policy: FailurePolicy,
    dry_run: bool,
) -> Result<(), Error> {
    for (i, step) in stage.iter().enumerate() {
        if dry_run {
            tracing::info!("would run `{step}`");
            continue;
        }

        tracing::debug!("running `{step}` in {}", cwd.display());
        let failure = match runner.run(step, cwd) {
            Ok(status) if status.success() => continue,
            Ok(status) => Error::StepFailed {
                step: step.to_string(),
                status,
            },
            Err(source) => Error::SpawnStep {
                step: step.to_string(),
                source,
            },
        };

        match policy {
            FailurePolicy::Strict => return Err(failure),
            FailurePolicy::KeepGoing => {
                let skipped = stage.len() - i - 1;
                tracing::warn!("{failure}, skipping {skipped} chained step(s)");
                return Ok(());
            }
        }
    }
    Ok(())
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
    Args(#[from] args::Error),
    #[error("failed to read the current directory: {0}")]
    CurrentDir(std::io::Error),
    #[error("Currently not supported! ({0})")]
    UnsupportedPlatform(String),
    #[error("Please input a valid IDF dir")]
    DirectoryMissing,
    #[error("failed to run `{step}`: {source}")]
    SpawnStep {
        step: String,
        source: std::io::Error,
    },
    #[error("`{step}` failed with {status}")]
    StepFailed { step: String, status: StepStatus },
    #[error("failed to copy \"{}\" to \"{}\": {source}", .src.display(), .dst.display())]
    CopyBinary {
        src: PathBuf,
        dst: PathBuf,
        source: std::io::Error,
    },
}

/// Process exit code. Failures exit with -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ExitCode(i32);
