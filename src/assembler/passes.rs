// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Pass orchestration for device predefinition and selection.
//!
//! Each pass predefines (pass 1) or verifies (pass 2) the device constants,
//! then applies the requested device selection the way a `.device` directive
//! at the top of the source would.

use super::*;

/// Result of a successful two-pass run.
#[derive(Debug, Clone)]
pub struct AsmRunReport {
    selected_device: usize,
    device: DeviceDescriptor,
    symbols: SymbolTable,
}

impl AsmRunReport {
    /// Registry index of the device selected at the end of pass 2.
    pub fn selected_device(&self) -> usize {
        self.selected_device
    }

    pub fn device(&self) -> &DeviceDescriptor {
        &self.device
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn to_json(&self) -> serde_json::Value {
        let symbols: Vec<serde_json::Value> = self
            .symbols
            .entries()
            .iter()
            .map(|entry| {
                json!({
                    "name": entry.name,
                    "value": entry.value,
                    "kind": if entry.rw { "variable" } else { "constant" },
                })
            })
            .collect();
        json!({
            "status": "ok",
            "device": {
                "index": self.selected_device,
                "name": self.device.name,
                "flash_words": self.device.flash_size,
                "ram_start": self.device.ram_start,
                "ram_size": self.device.ram_size,
                "eeprom_size": self.device.eeprom_size,
            },
            "symbols": symbols,
        })
    }
}

/// Run both passes against `registry`.
pub fn run_passes(
    config: &CliConfig,
    registry: &DeviceRegistry,
) -> Result<AsmRunReport, AsmRunError> {
    let mut session = AsmSession::new();
    for pass in [Pass::One, Pass::Two] {
        session.begin_pass(pass);
        run_pass(config, registry, &mut session)
            .map_err(|err| AsmRunError::new(err, Some(pass.number())))?;
        info!(
            "{pass} complete: {} symbols, device index {}",
            session.symbols().len(),
            session.selected_device()
        );
    }

    let selected_device = session.selected_device();
    let device = registry
        .get(selected_device)
        .copied()
        .unwrap_or(*registry.default_device());
    Ok(AsmRunReport {
        selected_device,
        device,
        symbols: session.into_symbols(),
    })
}

fn run_pass(
    config: &CliConfig,
    registry: &DeviceRegistry,
    session: &mut AsmSession,
) -> Result<(), AsmError> {
    predefine_devices(registry, session)?;
    if let Some(name) = config.device.as_deref() {
        if registry.select(session, Some(name)).is_none() {
            return Err(unknown_device_error(registry, name));
        }
    }
    Ok(())
}

fn unknown_device_error(registry: &DeviceRegistry, name: &str) -> AsmError {
    let known = registry.device_names().join(", ");
    AsmError::new(
        AsmErrorKind::Device,
        &format!("Unknown device: {name}. Known devices: {known}"),
        None,
    )
}

/// Write the device table in the configured format.
pub fn write_device_list<W: Write>(
    config: &CliConfig,
    registry: &DeviceRegistry,
    counter: &dyn InstructionCounter,
    mut out: W,
) -> Result<(), AsmRunError> {
    match config.output_format {
        OutputFormat::Text => {
            let mut listing = ListingWriter::new(&mut out);
            listing.write_devices(registry, counter)?;
        }
        OutputFormat::Json => {
            let rows = device_rows(registry, counter);
            let text = serde_json::to_string_pretty(&json!({ "devices": rows }))
                .map_err(|err| AsmError::new(AsmErrorKind::Io, &err.to_string(), None))?;
            writeln!(out, "{text}")?;
        }
    }
    Ok(())
}

/// Write the symbol table of a finished run in the configured format.
pub fn write_symbols<W: Write>(
    config: &CliConfig,
    report: &AsmRunReport,
    mut out: W,
) -> Result<(), AsmRunError> {
    match config.output_format {
        OutputFormat::Text => {
            let mut listing = ListingWriter::new(&mut out);
            listing.write_symbols(report.symbols())?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", report.to_json())?;
        }
    }
    Ok(())
}
