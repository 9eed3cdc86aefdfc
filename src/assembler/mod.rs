// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Assembler driver: CLI handling and pass sequencing around the device
//! registry.

pub mod cli;
mod passes;
#[cfg(test)]
mod tests;

pub use passes::{run_passes, write_device_list, write_symbols, AsmRunReport};

use std::io::Write;

use clap::Parser;
use log::info;
use serde_json::json;

use crate::core::assembler::error::{AsmError, AsmErrorKind, AsmRunError};
use crate::core::assembler::listing::{device_rows, ListingWriter};
use crate::core::device::{DeviceDescriptor, DeviceRegistry};
use crate::core::instruction_set::InstructionCounter;
use crate::core::predefined::predefine_devices;
use crate::core::session::{AsmSession, Pass};
use crate::core::symbol_table::SymbolTable;
use cli::{validate_cli, Cli, CliConfig, OutputFormat};

/// What a run produced.
#[derive(Debug)]
pub enum RunOutcome {
    /// The device table was printed.
    Listed,
    Assembled(AsmRunReport),
}

/// Parse the command line and validate it.
pub fn parse_cli() -> Result<CliConfig, AsmRunError> {
    validate_cli(&Cli::parse())
}

/// Execute a validated configuration against a registry, writing any
/// requested listing to `out`.
pub fn run_with_config<W: Write>(
    config: &CliConfig,
    registry: &DeviceRegistry,
    counter: &dyn InstructionCounter,
    mut out: W,
) -> Result<RunOutcome, AsmRunError> {
    if config.list_devices {
        write_device_list(config, registry, counter, &mut out)?;
        return Ok(RunOutcome::Listed);
    }
    let report = run_passes(config, registry)?;
    if config.print_symbols {
        write_symbols(config, &report, &mut out)?;
    }
    Ok(RunOutcome::Assembled(report))
}
