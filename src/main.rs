// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// CLI entrypoint for avrforge.

use std::io::{self, Write};

use log::LevelFilter;
use serde_json::json;

use avrforge::assembler::cli::{CliConfig, OutputFormat};
use avrforge::assembler::{parse_cli, run_with_config, RunOutcome};
use avrforge::core::assembler::error::AsmRunError;
use avrforge::core::instruction_set::AvrInstructionSet;
use avrforge::registry_defaults::build_default_registry;

fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn report_error(err: &AsmRunError, format: OutputFormat) {
    match format {
        OutputFormat::Text => eprintln!("{}", err.format()),
        OutputFormat::Json => {
            let payload = json!({
                "status": "error",
                "code": err.error().code(),
                "pass": err.pass(),
                "message": err.error().message(),
            });
            println!("{payload}");
        }
    }
}

fn run(config: &CliConfig) -> Result<(), AsmRunError> {
    let registry = build_default_registry()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = run_with_config(config, &registry, &AvrInstructionSet, &mut out)?;
    let RunOutcome::Assembled(report) = outcome else {
        return Ok(());
    };
    if config.quiet || config.print_symbols {
        return Ok(());
    }
    match config.output_format {
        OutputFormat::Text => {
            let name = report.device().name.unwrap_or("(default)");
            writeln!(
                out,
                "Device {name} (index {}), {} symbols defined, passes consistent",
                report.selected_device(),
                report.symbols().len()
            )?;
        }
        OutputFormat::Json => writeln!(out, "{}", report.to_json())?,
    }
    Ok(())
}

fn main() {
    let config = match parse_cli() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err.format());
            std::process::exit(1);
        }
    };
    init_logging(config.log_level);

    if let Err(err) = run(&config) {
        report_error(&err, config.output_format);
        std::process::exit(1);
    }
}
