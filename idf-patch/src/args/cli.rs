// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command line arguments.

use std::path::PathBuf;

#[derive(clap::Parser)]
#[command(name = "idf-patch", version, about = "ESP-IDF patch apply tool")]
pub struct Args {
    /// The esp-idf directory.
    #[arg(short, long)]
    pub directory: Option<PathBuf>,
    /// Directory holding the patch file and the prebuilt binaries.
    /// Defaults to the current directory.
    #[arg(short, long)]
    pub patch_dir: Option<PathBuf>,
    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Check out this commit instead of the pinned one.
    #[arg(long)]
    pub commit: Option<String>,
    /// Log a failed step and carry on with the next one instead of stopping.
    #[arg(long)]
    pub keep_going: bool,
    /// Print the steps and copies without running them.
    #[arg(long)]
    pub dry_run: bool,
    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}
