// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command-line interface parsing and argument validation.

use std::env;
use std::str::FromStr;

use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;

use crate::core::assembler::error::{AsmError, AsmErrorKind, AsmRunError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the log filter (`error`, `warn`, `info`, `debug`, `trace`, `off`).
pub const LOG_ENV: &str = "AVRFORGE_LOG";
pub const DEVICE_ENV: &str = "AVRFORGE_DEVICE";
pub const QUIET_ENV: &str = "AVRFORGE_QUIET";

const LONG_ABOUT: &str = "AVR device registry driver.

Runs the two assembler passes over the device registry: pass 1 predefines one
__<DEVICE>__ constant per known device, pass 2 verifies that every constant kept
its value. With --device, the named device is selected after predefinition in
each pass, which also sets __DEVICE__, __FLASH_SIZE__ (words), __EEPROM_SIZE__
and __RAM_SIZE__.";

#[derive(Parser, Debug, Default)]
#[command(
    name = "avrforge",
    version = VERSION,
    about = "AVR device registry with pass-stable predefined device symbols",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    #[arg(
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Text,
        long_help = "Select output format. text is default; json emits machine-readable output."
    )]
    pub format: OutputFormat,
    #[arg(
        short = 'q',
        long = "quiet",
        action = ArgAction::SetTrue,
        long_help = "Suppress the summary line for successful runs. Errors are still reported."
    )]
    pub quiet: bool,
    #[arg(
        short = 'd',
        long = "device",
        value_name = "NAME",
        long_help = "Select a device by name (case-insensitive) after device predefinition. Unknown names are an error."
    )]
    pub device: Option<String>,
    #[arg(
        long = "list-devices",
        action = ArgAction::SetTrue,
        long_help = "Print the device table with memory sizes and supported instruction counts, then exit."
    )]
    pub list_devices: bool,
    #[arg(
        long = "print-symbols",
        action = ArgAction::SetTrue,
        long_help = "Print the derived and predefined device symbols after pass 2."
    )]
    pub print_symbols: bool,
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        long_help = "Log filter: off, error, warn, info, debug or trace. Overrides AVRFORGE_LOG. Defaults to warn."
    )]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub device: Option<String>,
    pub list_devices: bool,
    pub print_symbols: bool,
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub log_level: LevelFilter,
}

fn cli_error(message: impl AsRef<str>) -> AsmRunError {
    AsmRunError::new(AsmError::new(AsmErrorKind::Cli, message.as_ref(), None), None)
}

fn parse_env_string(var_name: &str) -> Option<String> {
    let raw = env::var_os(var_name)?;
    let value = raw.to_string_lossy().trim().to_string();
    if value.is_empty() {
        return None;
    }
    Some(value)
}

fn parse_env_bool(var_name: &str) -> Result<Option<bool>, AsmRunError> {
    let Some(value) = parse_env_string(var_name) else {
        return Ok(None);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(cli_error(format!(
            "Invalid boolean value for {var_name}: {value}"
        ))),
    }
}

fn parse_log_level(source: &str, value: &str) -> Result<LevelFilter, AsmRunError> {
    LevelFilter::from_str(value)
        .map_err(|_| cli_error(format!("Invalid log level for {source}: {value}")))
}

/// Validate CLI arguments and return parsed configuration.
///
/// Command-line flags win over environment variables.
pub fn validate_cli(cli: &Cli) -> Result<CliConfig, AsmRunError> {
    let env_device = parse_env_string(DEVICE_ENV);
    let env_quiet = parse_env_bool(QUIET_ENV)?;
    let log_level = match (&cli.log_level, parse_env_string(LOG_ENV)) {
        (Some(level), _) => parse_log_level("--log-level", level)?,
        (None, Some(level)) => parse_log_level(LOG_ENV, &level)?,
        (None, None) => LevelFilter::Warn,
    };

    let device = cli.device.clone().or(env_device);
    if let Some(name) = &device {
        if name.trim().is_empty() {
            return Err(cli_error("Device name must not be empty"));
        }
    }
    if cli.list_devices && cli.print_symbols {
        return Err(cli_error("--list-devices cannot be combined with --print-symbols"));
    }

    Ok(CliConfig {
        device,
        list_devices: cli.list_devices,
        print_symbols: cli.print_symbols,
        output_format: cli.format,
        quiet: cli.quiet || env_quiet.unwrap_or(false),
        log_level,
    })
}
