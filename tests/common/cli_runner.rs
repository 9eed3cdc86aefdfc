// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use std::process::{Command, Output};

/// Captured result of one avrforge invocation.
pub struct CliRun {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for CliRun {
    fn from(output: Output) -> Self {
        Self {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Run the built binary with a clean environment for the avrforge variables.
pub fn run_avrforge(args: &[&str]) -> CliRun {
    Command::new(env!("CARGO_BIN_EXE_avrforge"))
        .args(args)
        .env_remove("AVRFORGE_LOG")
        .env_remove("AVRFORGE_DEVICE")
        .env_remove("AVRFORGE_QUIET")
        .output()
        .expect("spawn avrforge")
        .into()
}
