// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command line arguments.

use std::{ffi::OsString, path::PathBuf};

#[derive(Debug, clap::Parser)]
#[command(version, about = "Move a built UF2/NVS image into place")]
pub struct Args {
    /// The image to copy. Nothing happens if it does not exist.
    #[arg(long = "nvs_src_file", value_name = "PATH")]
    pub nvs_src_file: Option<PathBuf>,
    /// Where to write the copy. Missing parent directories are created.
    #[arg(long = "nvs_dst_file", value_name = "PATH")]
    pub nvs_dst_file: Option<PathBuf>,
    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Single-dash spellings kept for the firmware build scripts, mapped to their long flags.
const LEGACY_FLAGS: [(&str, &str); 2] = [("-d1", "--nvs_src_file"), ("-d2", "--nvs_dst_file")];

pub fn args<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    <Args as clap::Parser>::try_parse_from(normalize(args))
}

/// Rewrites `-d1 PATH`, `-d1=PATH` (and the `-d2` forms) into the long flags,
/// clap only knows single character short flags.
fn normalize<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            for (short, long) in LEGACY_FLAGS {
                if text == short {
                    return long.into();
                }
                if let Some(value) = text.strip_prefix(short).and_then(|rest| rest.strip_prefix('=')) {
                    return format!("{long}={value}").into();
                }
            }
            arg
        })
        .collect()
}
