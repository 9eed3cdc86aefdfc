// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Device and symbol listings.

use std::io::Write;

use serde::Serialize;

use crate::core::device::{DeviceDescriptor, DeviceRegistry};
use crate::core::instruction_set::InstructionCounter;
use crate::core::symbol_table::SymbolTable;

const DEFAULT_LABEL: &str = "(default)";

/// One listing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRow {
    pub index: usize,
    pub name: Option<&'static str>,
    pub flash_words: u32,
    pub ram_start: u32,
    pub ram_size: u32,
    pub eeprom_size: u32,
    pub supported_instructions: usize,
    pub excluded_features: Vec<&'static str>,
}

impl DeviceRow {
    pub fn new(index: usize, device: &DeviceDescriptor, counter: &dyn InstructionCounter) -> Self {
        Self {
            index,
            name: device.name,
            flash_words: device.flash_size,
            ram_start: device.ram_start,
            ram_size: device.ram_size,
            eeprom_size: device.eeprom_size,
            supported_instructions: counter.count_supported_instructions(device.flags),
            excluded_features: device.flags.names(),
        }
    }
}

/// Rows for every device, default device first.
pub fn device_rows(registry: &DeviceRegistry, counter: &dyn InstructionCounter) -> Vec<DeviceRow> {
    registry
        .devices()
        .iter()
        .enumerate()
        .map(|(index, device)| DeviceRow::new(index, device, counter))
        .collect()
}

/// Writer for the device table and symbol dumps.
pub struct ListingWriter<W: Write> {
    out: W,
}

impl<W: Write> ListingWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn device_header(&mut self) -> std::io::Result<()> {
        writeln!(
            self.out,
            "Device name   | Flash size | RAM start | RAM size | EEPROM size |  Supported"
        )?;
        writeln!(
            self.out,
            "              |  (words)   | (bytes)   | (bytes)  |   (bytes)   | instructions"
        )?;
        writeln!(
            self.out,
            "--------------+------------+-----------+----------+-------------+--------------"
        )
    }

    pub fn write_device_row(&mut self, row: &DeviceRow) -> std::io::Result<()> {
        writeln!(
            self.out,
            " {:<12} |    {:>7} |    0x{:04x} |  {:>7} |       {:>5} |          {:>3}",
            row.name.unwrap_or(DEFAULT_LABEL),
            row.flash_words,
            row.ram_start,
            row.ram_size,
            row.eeprom_size,
            row.supported_instructions
        )
    }

    /// Header plus one row per device.
    pub fn write_devices(
        &mut self,
        registry: &DeviceRegistry,
        counter: &dyn InstructionCounter,
    ) -> std::io::Result<()> {
        self.device_header()?;
        for row in device_rows(registry, counter) {
            self.write_device_row(&row)?;
        }
        Ok(())
    }

    /// Symbols in definition order, marking variables with `(set)`.
    pub fn write_symbols(&mut self, symbols: &SymbolTable) -> std::io::Result<()> {
        writeln!(self.out, "SYMBOL TABLE\n")?;
        for entry in symbols.entries() {
            let kind = if entry.rw { " (set)" } else { "" };
            writeln!(
                self.out,
                "{:<32} = {:>10}  ${:08X}{kind}",
                entry.name, entry.value, entry.value
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::capability::DeviceFlags;
    use crate::core::instruction_set::AvrInstructionSet;
    use crate::core::symbol_table::SymbolDefinitions;

    fn registry() -> DeviceRegistry {
        DeviceRegistry::new(
            DeviceDescriptor::unnamed(4_194_304, 0x60, 8_388_608, 65_536, DeviceFlags::empty()),
            [DeviceDescriptor::new(
                "ATtiny85",
                4096,
                0x60,
                512,
                512,
                DeviceFlags::NO_MUL,
            )],
        )
        .expect("registry")
    }

    #[test]
    fn device_listing_matches_legacy_layout() {
        let mut writer = ListingWriter::new(Vec::new());
        writer
            .write_devices(&registry(), &AvrInstructionSet)
            .expect("write");
        let text = String::from_utf8(writer.into_inner()).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[3],
            " (default)    |    4194304 |    0x0060 |  8388608 |       65536 |          137"
        );
        assert_eq!(
            lines[4],
            " ATtiny85     |       4096 |    0x0060 |      512 |         512 |          131"
        );
    }

    #[test]
    fn rows_carry_flag_names() {
        let rows = device_rows(&registry(), &AvrInstructionSet);
        assert_eq!(rows[0].excluded_features, Vec::<&str>::new());
        assert_eq!(rows[1].excluded_features, vec!["NO_MUL"]);
        let json = serde_json::to_value(&rows[1]).expect("json");
        assert_eq!(json["name"], "ATtiny85");
        assert_eq!(json["flash_words"], 4096);
    }

    #[test]
    fn symbol_dump_marks_variables() {
        let mut symbols = SymbolTable::new();
        symbols.define_variable("__DEVICE__", 1);
        symbols.define_constant("__ATtiny85__", 1).expect("constant");
        let mut writer = ListingWriter::new(Vec::new());
        writer.write_symbols(&symbols).expect("write");
        let text = String::from_utf8(writer.into_inner()).expect("utf8");
        assert!(text.contains("__DEVICE__"));
        assert!(text.lines().any(|line| line.starts_with("__DEVICE__") && line.ends_with("(set)")));
        assert!(text
            .lines()
            .any(|line| line.starts_with("__ATtiny85__") && !line.ends_with("(set)")));
    }
}
