// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

mod common;

use serde_json::Value;

use avrforge::core::capability::DeviceFlags;
use avrforge::core::device::{
    DeviceDescriptor, DeviceRegistry, DEVICE_VAR, EEPROM_VAR, FLASH_VAR, RAM_VAR,
};
use avrforge::core::predefined::{predefine_devices, PredefineError};
use avrforge::core::session::{AsmSession, Pass};
use avrforge::core::symbol_table::{SymbolDefinitions, SymbolTable};
use avrforge::registry_defaults::{build_default_registry, DEFAULT_DEVICE, DEVICE_TABLE};

use common::cli_runner::run_avrforge;

fn derived(symbols: &SymbolTable) -> [Option<i64>; 4] {
    [
        symbols.lookup(DEVICE_VAR),
        symbols.lookup(FLASH_VAR),
        symbols.lookup(EEPROM_VAR),
        symbols.lookup(RAM_VAR),
    ]
}

#[test]
fn selecting_attiny85_and_back_to_default() {
    let registry = build_default_registry().expect("registry");
    let tiny_index = registry.find_index("ATtiny85").expect("ATtiny85");
    let mut session = AsmSession::new();

    let device = registry
        .select(&mut session, Some("attiny85"))
        .expect("selected");
    assert_eq!(device.name, Some("ATtiny85"));
    assert_eq!(session.selected_device(), tiny_index);
    assert_eq!(
        derived(session.symbols()),
        [Some(tiny_index as i64), Some(4096), Some(512), Some(512)]
    );

    registry.select(&mut session, None).expect("default");
    assert_eq!(session.selected_device(), 0);
    assert_eq!(
        derived(session.symbols()),
        [Some(0), Some(4_194_304), Some(65_536), Some(8_388_608)]
    );
}

#[test]
fn both_passes_agree_on_the_builtin_registry() {
    let registry = build_default_registry().expect("registry");
    let mut session = AsmSession::new();
    predefine_devices(&registry, &mut session).expect("pass 1");
    session.begin_pass(Pass::Two);
    predefine_devices(&registry, &mut session).expect("pass 2");

    let symbols = session.symbols();
    assert_eq!(symbols.lookup_constant("__DEFAULT__"), Some(0));
    for (index, device) in registry.named_devices() {
        assert_eq!(symbols.lookup_constant(&device.symbol_name()), Some(index as i64));
    }
    assert_eq!(symbols.len(), registry.len() + 4);
}

#[test]
fn registry_reordered_between_passes_is_caught() {
    let pass1 = build_default_registry().expect("registry");
    let mut swapped: Vec<DeviceDescriptor> = DEVICE_TABLE.to_vec();
    swapped.swap(0, 1);
    let pass2 = DeviceRegistry::new(DEFAULT_DEVICE, swapped).expect("reordered");

    let mut session = AsmSession::new();
    predefine_devices(&pass1, &mut session).expect("pass 1");
    session.begin_pass(Pass::Two);
    let err = predefine_devices(&pass2, &mut session).unwrap_err();

    let first = DEVICE_TABLE[1].symbol_name();
    assert_eq!(
        err,
        PredefineError::ValueMismatch {
            symbol: first,
            pass1: 2,
            pass2: 1,
        }
    );
}

#[test]
fn user_symbol_with_device_name_blocks_pass_one() {
    let registry = DeviceRegistry::new(
        DEFAULT_DEVICE,
        [DeviceDescriptor::new("ATtiny13", 512, 0x60, 64, 64, DeviceFlags::NO_MUL)],
    )
    .expect("registry");
    let mut table = SymbolTable::new();
    table.add("__ATtiny13__", 99, false);
    let mut session = AsmSession::with_symbols(table);

    let err = predefine_devices(&registry, &mut session).unwrap_err();
    assert_eq!(err.symbol(), "__ATtiny13__");
    assert_eq!(
        err.to_string(),
        "Can't define symbol __ATtiny13__ twice. Please don't use predefined symbols"
    );
}

#[test]
fn cli_lists_devices_as_json() {
    let run = run_avrforge(&["--list-devices", "--format", "json"]);
    assert_eq!(run.status, 0, "stderr: {}", run.stderr);
    let value: Value = serde_json::from_str(&run.stdout).expect("json listing");
    let devices = value["devices"].as_array().expect("devices");
    assert_eq!(devices.len(), DEVICE_TABLE.len() + 1);
    assert!(devices
        .iter()
        .any(|row| row["name"] == "ATmega328P" && row["flash_words"] == 16_384));
}

#[test]
fn cli_reports_unknown_device_with_pass_number() {
    let run = run_avrforge(&["--device", "ATnothing"]);
    assert_eq!(run.status, 1);
    assert!(run.stderr.contains("pass 1: ERROR [asm601] - Unknown device: ATnothing"));
}

#[test]
fn cli_prints_selected_device_symbols() {
    let run = run_avrforge(&["-d", "atmega328p", "--print-symbols", "--format", "json"]);
    assert_eq!(run.status, 0, "stderr: {}", run.stderr);
    let value: Value = serde_json::from_str(&run.stdout).expect("json symbols");
    assert_eq!(value["status"], "ok");
    assert_eq!(value["device"]["name"], "ATmega328P");
    assert_eq!(value["device"]["eeprom_size"], 1024);
}
