// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Device descriptors and the device registry.
//!
//! The registry is an ordered, immutable list. Index 0 is always the unnamed
//! default device; named devices follow in table order. Lookups scan linearly
//! and never assume the table is sorted.

use log::{debug, trace, warn};
use thiserror::Error;

use crate::core::capability::DeviceFlags;
use crate::core::session::AsmSession;
use crate::core::symbol_table::SymbolDefinitions;

/// Variable holding the registry index of the selected device.
pub const DEVICE_VAR: &str = "__DEVICE__";
/// Variable holding the selected device's flash size, in words.
pub const FLASH_VAR: &str = "__FLASH_SIZE__";
pub const EEPROM_VAR: &str = "__EEPROM_SIZE__";
pub const RAM_VAR: &str = "__RAM_SIZE__";

pub const DEVICE_PREFIX: &str = "__";
pub const DEVICE_SUFFIX: &str = "__";
/// Name used for the default device's predefined symbol.
pub const DEFAULT_DEVICE_NAME: &str = "DEFAULT";
/// Device names are cut to this many characters when building symbol names.
pub const MAX_DEVICE_NAME_LEN: usize = 32;

/// One hardware variant.
///
/// `flash_size` is in 16-bit words, not bytes. Every other size is in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub name: Option<&'static str>,
    pub flash_size: u32,
    pub ram_start: u32,
    pub ram_size: u32,
    pub eeprom_size: u32,
    pub flags: DeviceFlags,
}

impl DeviceDescriptor {
    pub const fn new(
        name: &'static str,
        flash_size: u32,
        ram_start: u32,
        ram_size: u32,
        eeprom_size: u32,
        flags: DeviceFlags,
    ) -> Self {
        Self {
            name: Some(name),
            flash_size,
            ram_start,
            ram_size,
            eeprom_size,
            flags,
        }
    }

    /// The unnamed default device.
    pub const fn unnamed(
        flash_size: u32,
        ram_start: u32,
        ram_size: u32,
        eeprom_size: u32,
        flags: DeviceFlags,
    ) -> Self {
        Self {
            name: None,
            flash_size,
            ram_start,
            ram_size,
            eeprom_size,
            flags,
        }
    }

    /// Flash size in bytes.
    pub fn flash_bytes(&self) -> u64 {
        u64::from(self.flash_size) * 2
    }

    /// Name of the predefined constant for this device.
    pub fn symbol_name(&self) -> String {
        device_symbol_name(self.name)
    }
}

/// Build `__<NAME>__` for a device, or `__DEFAULT__` for the default device.
///
/// Names longer than [`MAX_DEVICE_NAME_LEN`] characters are truncated
/// without a diagnostic, so two long names sharing a prefix map to the same
/// symbol.
pub fn device_symbol_name(name: Option<&str>) -> String {
    let name = name.unwrap_or(DEFAULT_DEVICE_NAME);
    let cut = name
        .char_indices()
        .nth(MAX_DEVICE_NAME_LEN)
        .map_or(name.len(), |(idx, _)| idx);
    format!("{DEVICE_PREFIX}{}{DEVICE_SUFFIX}", &name[..cut])
}

/// Write the four derived variables for a device.
pub fn define_device_variables<S: SymbolDefinitions>(
    symbols: &mut S,
    index: usize,
    device: &DeviceDescriptor,
) {
    symbols.define_variable(DEVICE_VAR, index as i64);
    symbols.define_variable(FLASH_VAR, i64::from(device.flash_size));
    symbols.define_variable(EEPROM_VAR, i64::from(device.eeprom_size));
    symbols.define_variable(RAM_VAR, i64::from(device.ram_size));
}

/// Error returned when a device table violates the registry invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("the default device must not have a name (got {0})")]
    NamedDefault(String),
    #[error("device at index {index} has no name")]
    MissingName { index: usize },
    #[error("device {name} at index {second} duplicates index {first}")]
    DuplicateName {
        name: String,
        first: usize,
        second: usize,
    },
}

/// Ordered device catalog.
#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    devices: Vec<DeviceDescriptor>,
}

impl DeviceRegistry {
    /// Build a registry from the default device and the named devices in order.
    pub fn new(
        default: DeviceDescriptor,
        named: impl IntoIterator<Item = DeviceDescriptor>,
    ) -> Result<Self, RegistryError> {
        if let Some(name) = default.name {
            return Err(RegistryError::NamedDefault(name.to_string()));
        }
        let mut devices = vec![default];
        for device in named {
            let index = devices.len();
            let name = match device.name {
                Some(name) if !name.is_empty() => name,
                _ => return Err(RegistryError::MissingName { index }),
            };
            if let Some(first) = position_of(&devices, name) {
                return Err(RegistryError::DuplicateName {
                    name: name.to_string(),
                    first,
                    second: index,
                });
            }
            devices.push(device);
        }
        debug!("device registry built with {} named devices", devices.len() - 1);
        Ok(Self { devices })
    }

    /// All descriptors, default device first.
    pub fn devices(&self) -> &[DeviceDescriptor] {
        &self.devices
    }

    /// Named devices with their registry indices.
    pub fn named_devices(&self) -> impl Iterator<Item = (usize, &DeviceDescriptor)> {
        self.devices.iter().enumerate().skip(1)
    }

    pub fn default_device(&self) -> &DeviceDescriptor {
        &self.devices[0]
    }

    pub fn get(&self, index: usize) -> Option<&DeviceDescriptor> {
        self.devices.get(index)
    }

    /// Number of descriptors, including the default device.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Always false: the default device is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn device_names(&self) -> Vec<&'static str> {
        self.devices.iter().filter_map(|device| device.name).collect()
    }

    /// Case-insensitive linear search over named devices.
    pub fn find_index(&self, name: &str) -> Option<usize> {
        position_of(&self.devices, name)
    }

    /// Select a device for the session.
    ///
    /// The selection is reset to the default device first and only moves on a
    /// match. The four derived variables are written for whatever ends up
    /// selected, including after a failed lookup, so callers always see a
    /// populated symbol table. `None` selects the default device. An unknown
    /// name returns `None`; reporting it is up to the caller.
    pub fn select<S: SymbolDefinitions>(
        &self,
        session: &mut AsmSession<S>,
        name: Option<&str>,
    ) -> Option<&DeviceDescriptor> {
        session.set_selected_device(0);
        let found = match name {
            None => Some(0),
            Some(name) => {
                let found = self.find_index(name);
                match found {
                    Some(index) => {
                        debug!("selected device {name} (index {index})");
                        session.set_selected_device(index);
                    }
                    None => warn!("unknown device {name}; keeping the default device"),
                }
                found
            }
        };
        self.define_selected_variables(session);
        found.map(|index| &self.devices[index])
    }

    /// Write the derived variables for the session's current selection.
    ///
    /// A selection past the end of this registry is reset to the default device.
    pub fn define_selected_variables<S: SymbolDefinitions>(&self, session: &mut AsmSession<S>) {
        let selected = session.selected_device();
        let (index, device) = match self.devices.get(selected) {
            Some(device) => (selected, device),
            None => {
                warn!("device index {selected} is outside this registry; using the default device");
                session.set_selected_device(0);
                (0, &self.devices[0])
            }
        };
        trace!("defining derived variables for device index {index}");
        define_device_variables(session.symbols_mut(), index, device);
    }
}

fn position_of(devices: &[DeviceDescriptor], name: &str) -> Option<usize> {
    devices.iter().enumerate().skip(1).find_map(|(idx, device)| {
        device
            .name
            .filter(|candidate| candidate.eq_ignore_ascii_case(name))
            .map(|_| idx)
    })
}
