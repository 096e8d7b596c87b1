// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

//! The external command sequence that moves an IDF checkout onto the patched revision.

use std::{ffi::OsString, fmt, path::PathBuf};

/// What to do when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failed step.
    Strict,
    /// Skip the rest of the failed stage and carry on with the next one.
    KeepGoing,
}

/// One external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Step {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn git<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self::new("git").args(args)
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Steps chained with `&&`: a failing step skips the rest of its stage.
pub type Stage = Vec<Step>;

/// Everything one patch run works on, fully resolved.
#[derive(Debug, Clone)]
pub struct Plan {
    pub idf_dir: PathBuf,
    pub patch_dir: PathBuf,
    pub commit: String,
    pub patch_file: PathBuf,
    pub install_script: PathBuf,
    pub binaries: Vec<PathBuf>,
}

impl Plan {
    pub fn patch_path(&self) -> PathBuf {
        self.patch_dir.join(&self.patch_file)
    }

    /// The install script, anchored in the IDF checkout so it does not depend
    /// on how the platform resolves relative programs.
    pub fn install_program(&self) -> PathBuf {
        self.idf_dir.join(&self.install_script)
    }

    /// The stages to run, in order, with the IDF checkout as working directory.
    pub fn stages(&self) -> Vec<Stage> {
        let reset_and_clean = || {
            vec![
                Step::git(["reset", "--hard"]),
                Step::git(["clean", "-d", "-f", "-x"]),
            ]
        };

        let mut sync_submodules = reset_and_clean();
        sync_submodules.push(Step::git([
            "submodule",
            "update",
            "--init",
            "--recursive",
            "--force",
        ]));

        vec![
            vec![Step::git(["fetch", consts::IDF_REMOTE])],
            reset_and_clean(),
            vec![Step::git(["checkout", self.commit.as_str()])],
            sync_submodules,
            vec![Step::git([OsString::from("apply"), self.patch_path().into_os_string()])],
            vec![Step::new(self.install_program())],
        ]
    }

    /// `(source, destination)` pairs for the prebuilt files, in list order.
    pub fn binary_copies(&self) -> impl Iterator<Item = (PathBuf, PathBuf)> + '_ {
        self.binaries
            .iter()
            .map(|binary| (self.patch_dir.join(binary), self.idf_dir.join(binary)))
    }
}
