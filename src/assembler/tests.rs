// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

use super::*;
use crate::core::capability::DeviceFlags;
use crate::core::device::{DEVICE_VAR, EEPROM_VAR, FLASH_VAR, RAM_VAR};
use crate::core::instruction_set::AvrInstructionSet;
use crate::core::symbol_table::SymbolDefinitions;
use crate::registry_defaults::build_default_registry;
use log::LevelFilter;

fn config(device: Option<&str>) -> CliConfig {
    CliConfig {
        device: device.map(str::to_string),
        list_devices: false,
        print_symbols: false,
        output_format: OutputFormat::Text,
        quiet: true,
        log_level: LevelFilter::Off,
    }
}

fn small_registry() -> DeviceRegistry {
    DeviceRegistry::new(
        DeviceDescriptor::unnamed(4_194_304, 0x60, 8_388_608, 65_536, DeviceFlags::empty()),
        [
            DeviceDescriptor::new("ATtiny85", 4096, 0x60, 512, 512, DeviceFlags::NO_MUL),
            DeviceDescriptor::new("ATmega328P", 16384, 0x100, 2048, 1024, DeviceFlags::NO_EIJMP),
        ],
    )
    .expect("registry")
}

#[test]
fn run_without_device_keeps_default_selection() {
    let report = run_passes(&config(None), &small_registry()).expect("run");
    assert_eq!(report.selected_device(), 0);
    assert_eq!(report.device().name, None);
    assert_eq!(report.symbols().lookup(DEVICE_VAR), Some(0));
    assert_eq!(report.symbols().lookup(FLASH_VAR), Some(4_194_304));
    assert_eq!(report.symbols().lookup_constant("__DEFAULT__"), Some(0));
}

#[test]
fn run_with_device_defines_device_sizes() {
    let report = run_passes(&config(Some("atmega328p")), &small_registry()).expect("run");
    assert_eq!(report.selected_device(), 2);
    let symbols = report.symbols();
    assert_eq!(symbols.lookup(DEVICE_VAR), Some(2));
    assert_eq!(symbols.lookup(FLASH_VAR), Some(16384));
    assert_eq!(symbols.lookup(EEPROM_VAR), Some(1024));
    assert_eq!(symbols.lookup(RAM_VAR), Some(2048));
    assert_eq!(symbols.lookup_constant("__ATmega328P__"), Some(2));
}

#[test]
fn unknown_device_fails_in_pass_one() {
    let err = run_passes(&config(Some("ATfoo")), &small_registry()).unwrap_err();
    assert_eq!(err.pass(), Some(1));
    assert_eq!(err.error().kind(), AsmErrorKind::Device);
    assert!(err
        .to_string()
        .starts_with("Unknown device: ATfoo. Known devices: ATtiny85, ATmega328P"));
}

#[test]
fn listing_in_json_contains_every_device() {
    let registry = build_default_registry().expect("registry");
    let mut cfg = config(None);
    cfg.list_devices = true;
    cfg.output_format = OutputFormat::Json;
    let mut out = Vec::new();
    let outcome = run_with_config(&cfg, &registry, &AvrInstructionSet, &mut out).expect("list");
    assert!(matches!(outcome, RunOutcome::Listed));
    let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
    let devices = value["devices"].as_array().expect("devices array");
    assert_eq!(devices.len(), registry.len());
    assert_eq!(devices[0]["name"], serde_json::Value::Null);
    assert_eq!(devices[0]["supported_instructions"], 137);
}

#[test]
fn text_listing_starts_with_default_row() {
    let mut cfg = config(None);
    cfg.list_devices = true;
    let mut out = Vec::new();
    run_with_config(&cfg, &small_registry(), &AvrInstructionSet, &mut out).expect("list");
    let text = String::from_utf8(out).expect("utf8");
    assert!(text.lines().nth(3).expect("default row").starts_with(" (default)"));
    assert!(text.contains(" ATmega328P   |"));
}

#[test]
fn printed_symbols_follow_definition_order() {
    let mut cfg = config(Some("ATtiny85"));
    cfg.print_symbols = true;
    cfg.output_format = OutputFormat::Json;
    let mut out = Vec::new();
    let outcome =
        run_with_config(&cfg, &small_registry(), &AvrInstructionSet, &mut out).expect("run");
    let RunOutcome::Assembled(report) = outcome else {
        panic!("expected an assembled run");
    };
    assert_eq!(report.selected_device(), 1);
    let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
    let names: Vec<&str> = value["symbols"]
        .as_array()
        .expect("symbols")
        .iter()
        .filter_map(|symbol| symbol["name"].as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            DEVICE_VAR,
            FLASH_VAR,
            EEPROM_VAR,
            RAM_VAR,
            "__DEFAULT__",
            "__ATtiny85__",
            "__ATmega328P__"
        ]
    );
    assert_eq!(value["device"]["name"], "ATtiny85");
}
