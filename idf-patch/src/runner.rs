// SPDX-FileCopyrightText: 2024 Foundation Devices, Inc. <hello@foundation.xyz>
// SPDX-License-Identifier: GPL-3.0-or-later

use {
    crate::plan::Step,
    std::{fmt, io, path::Path, process::Command},
};

/// Runs external steps. Swapped out in tests so no process is spawned.
pub trait Runner {
    /// Runs `step` to completion with `cwd` as its working directory.
    fn run(&mut self, step: &Step, cwd: &Path) -> io::Result<StepStatus>;
}

/// How a step exited. `code` is `None` when it was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepStatus {
    pub code: Option<i32>,
}

impl StepStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => write!(f, "a signal"),
        }
    }
}

/// Spawns steps as child processes sharing this process' stdout and stderr.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&mut self, step: &Step, cwd: &Path) -> io::Result<StepStatus> {
        let status = Command::new(&step.program)
            .args(&step.args)
            .current_dir(cwd)
            .status()?;
        Ok(StepStatus {
            code: status.code(),
        })
    }
}
