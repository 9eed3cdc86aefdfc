// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Built-in AVR device catalog.
//!
//! Field order: name, flash size (WORDS, not bytes), RAM start, RAM size,
//! EEPROM size, excluded features. Table order is the registry order and
//! decides the value of every `__<DEVICE>__` constant, so new devices are
//! appended to their series rather than sorted in. Mixing up words and bytes
//! for flash is the usual mistake when adding a device.

use crate::core::capability::DeviceFlags;
use crate::core::device::{DeviceDescriptor, DeviceRegistry, RegistryError};

type F = DeviceFlags;

const fn set(flags: &[DeviceFlags]) -> DeviceFlags {
    let mut bits = 0;
    let mut idx = 0;
    while idx < flags.len() {
        bits |= flags[idx].bits();
        idx += 1;
    }
    DeviceFlags::from_bits_retain(bits)
}

/// Classic ATmega: no extended addressing.
const ENHANCED_MEGA: DeviceFlags = set(&[
    F::NO_ELPM,
    F::NO_ESPM,
    F::NO_EICALL,
    F::NO_EIJMP,
]);
/// Large ATmega with `elpm`.
const LARGE_MEGA: DeviceFlags = set(&[
    F::NO_ESPM,
    F::NO_EICALL,
    F::NO_EIJMP,
]);
/// Enhanced ATtiny: no multiplier or long jumps.
const ENHANCED_TINY: DeviceFlags = set(&[
    F::NO_MUL,
    F::NO_JMP,
    F::NO_ELPM,
    F::NO_ESPM,
    F::NO_EICALL,
    F::NO_EIJMP,
]);
/// Classic AT90S core.
const CLASSIC_CORE: DeviceFlags = set(&[
    F::NO_MUL,
    F::NO_JMP,
    F::NO_LPM_X,
    F::NO_ELPM,
    F::NO_SPM,
    F::NO_ESPM,
    F::NO_MOVW,
    F::NO_BREAK,
    F::NO_EICALL,
    F::NO_EIJMP,
]);
/// ATtiny1x / AT90S1200: no SRAM, no X/Y pointers.
const TINY1X_CORE: DeviceFlags = set(&[
    F::NO_MUL,
    F::NO_JMP,
    F::NO_XREG,
    F::NO_YREG,
    F::TINY1X,
    F::NO_LPM_X,
    F::NO_ELPM,
    F::NO_SPM,
    F::NO_ESPM,
    F::NO_MOVW,
    F::NO_BREAK,
    F::NO_EICALL,
    F::NO_EIJMP,
]);
/// AVR8L reduced core.
const REDUCED_CORE: DeviceFlags = set(&[
    F::NO_MUL,
    F::NO_JMP,
    F::NO_LPM,
    F::NO_ELPM,
    F::NO_SPM,
    F::NO_ESPM,
    F::NO_MOVW,
    F::NO_BREAK,
    F::NO_EICALL,
    F::NO_EIJMP,
    F::AVR8L,
]);

/// The default device: no restrictions and the largest memories.
pub const DEFAULT_DEVICE: DeviceDescriptor =
    DeviceDescriptor::unnamed(4_194_304, 0x060, 8_388_608, 65_536, DeviceFlags::empty());

/// Named devices in registry order.
pub static DEVICE_TABLE: &[DeviceDescriptor] = &[
    // ATtiny series
    DeviceDescriptor::new("ATtiny4", 256, 0x040, 32, 0, REDUCED_CORE),
    DeviceDescriptor::new("ATtiny5", 256, 0x040, 32, 0, REDUCED_CORE),
    DeviceDescriptor::new("ATtiny9", 512, 0x040, 32, 0, REDUCED_CORE),
    DeviceDescriptor::new("ATtiny10", 512, 0x040, 32, 0, REDUCED_CORE),
    DeviceDescriptor::new("ATtiny11", 512, 0x000, 0, 0, TINY1X_CORE),
    DeviceDescriptor::new("ATtiny12", 512, 0x000, 0, 64, TINY1X_CORE),
    DeviceDescriptor::new("ATtiny13", 512, 0x060, 64, 64, ENHANCED_TINY),
    DeviceDescriptor::new("ATtiny13A", 512, 0x060, 64, 64, ENHANCED_TINY),
    DeviceDescriptor::new("ATtiny15", 512, 0x000, 0, 64, TINY1X_CORE),
    DeviceDescriptor::new("ATtiny20", 1024, 0x040, 128, 0, REDUCED_CORE),
    DeviceDescriptor::new("ATtiny22", 1024, 0x060, 128, 128, CLASSIC_CORE),
    DeviceDescriptor::new("ATtiny24", 1024, 0x060, 128, 128, ENHANCED_TINY),
    DeviceDescriptor::new("ATtiny24A", 1024, 0x060, 128, 128, ENHANCED_TINY),
    DeviceDescriptor::new("ATtiny25", 1024, 0x060, 128, 128, ENHANCED_TINY),
    DeviceDescriptor::new(
        "ATtiny26",
        1024,
        0x060,
        128,
        128,
        set(&[
            F::NO_MUL,
            F::NO_JMP,
            F::NO_ELPM,
            F::NO_SPM,
            F::NO_ESPM,
            F::NO_MOVW,
            F::NO_BREAK,
            F::NO_EICALL,
            F::NO_EIJMP,
        ]),
    ),
    DeviceDescriptor::new("ATtiny28", 1024, 0x000, 0, 0, TINY1X_CORE),
    DeviceDescriptor::new("ATtiny44", 2048, 0x060, 256, 256, ENHANCED_TINY),
    DeviceDescriptor::new("ATtiny44A", 2048, 0x060, 256, 256, ENHANCED_TINY),
    DeviceDescriptor::new("ATtiny45", 2048, 0x060, 256, 256, ENHANCED_TINY),
    DeviceDescriptor::new("ATtiny48", 2048, 0x100, 256, 64, ENHANCED_TINY),
    DeviceDescriptor::new("ATtiny84", 4096, 0x060, 512, 512, ENHANCED_TINY),
    DeviceDescriptor::new("ATtiny85", 4096, 0x060, 512, 512, ENHANCED_TINY),
    DeviceDescriptor::new("ATtiny88", 4096, 0x100, 512, 64, ENHANCED_TINY),
    DeviceDescriptor::new("ATtiny261A", 1024, 0x060, 128, 128, ENHANCED_TINY),
    DeviceDescriptor::new("ATtiny461A", 2048, 0x060, 256, 256, ENHANCED_TINY),
    DeviceDescriptor::new("ATtiny861A", 4096, 0x060, 512, 512, ENHANCED_TINY),
    DeviceDescriptor::new("ATtiny2313", 1024, 0x060, 128, 128, ENHANCED_TINY),
    DeviceDescriptor::new("ATtiny2313A", 1024, 0x060, 128, 128, ENHANCED_TINY),
    DeviceDescriptor::new("ATtiny4313", 2048, 0x060, 256, 256, ENHANCED_TINY),

    // AT90 series
    DeviceDescriptor::new(
        "AT90S1200",
        512,
        0x000,
        0,
        64,
        set(&[
            F::NO_MUL,
            F::NO_JMP,
            F::NO_XREG,
            F::NO_YREG,
            F::TINY1X,
            F::NO_LPM,
            F::NO_ELPM,
            F::NO_SPM,
            F::NO_ESPM,
            F::NO_MOVW,
            F::NO_BREAK,
            F::NO_EICALL,
            F::NO_EIJMP,
        ]),
    ),
    DeviceDescriptor::new("AT90S2313", 1024, 0x060, 128, 128, CLASSIC_CORE),
    DeviceDescriptor::new("AT90S2323", 1024, 0x060, 128, 128, CLASSIC_CORE),
    DeviceDescriptor::new("AT90S2333", 1024, 0x060, 128, 128, CLASSIC_CORE),
    DeviceDescriptor::new("AT90S2343", 1024, 0x060, 128, 128, CLASSIC_CORE),
    DeviceDescriptor::new("AT90S4414", 2048, 0x060, 256, 256, CLASSIC_CORE),
    DeviceDescriptor::new("AT90S4433", 2048, 0x060, 128, 256, CLASSIC_CORE),
    DeviceDescriptor::new("AT90S4434", 2048, 0x060, 256, 256, CLASSIC_CORE),
    DeviceDescriptor::new("AT90S8515", 4096, 0x060, 512, 512, CLASSIC_CORE),
    DeviceDescriptor::new("AT90C8534", 4096, 0x060, 256, 512, CLASSIC_CORE),
    DeviceDescriptor::new("AT90S8535", 4096, 0x060, 512, 512, CLASSIC_CORE),

    // ATmega series
    DeviceDescriptor::new("ATmega8", 4096, 0x060, 1024, 512, ENHANCED_MEGA.union(F::NO_JMP)),
    DeviceDescriptor::new("ATmega8A", 4096, 0x060, 1024, 512, ENHANCED_MEGA.union(F::NO_JMP)),
    DeviceDescriptor::new("ATmega161", 8192, 0x060, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega162", 8192, 0x100, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega163", 8192, 0x060, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega16", 8192, 0x060, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega323", 16_384, 0x060, 2048, 1024, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega32", 16_384, 0x060, 2048, 1024, ENHANCED_MEGA),
    DeviceDescriptor::new(
        "ATmega603",
        32_768,
        0x060,
        4096,
        2048,
        set(&[
            F::NO_MUL,
            F::NO_LPM_X,
            F::NO_ELPM,
            F::NO_SPM,
            F::NO_ESPM,
            F::NO_MOVW,
            F::NO_BREAK,
            F::NO_EICALL,
            F::NO_EIJMP,
        ]),
    ),
    DeviceDescriptor::new(
        "ATmega103",
        65_536,
        0x060,
        4096,
        4096,
        set(&[
            F::NO_MUL,
            F::NO_LPM_X,
            F::NO_ELPM_X,
            F::NO_SPM,
            F::NO_ESPM,
            F::NO_MOVW,
            F::NO_BREAK,
            F::NO_EICALL,
            F::NO_EIJMP,
        ]),
    ),
    DeviceDescriptor::new("ATmega104", 65_536, 0x060, 4096, 4096, LARGE_MEGA), // old name for ATmega128
    DeviceDescriptor::new("ATmega128", 65_536, 0x100, 4096, 4096, LARGE_MEGA),
    DeviceDescriptor::new("ATmega128A", 65_536, 0x100, 4096, 4096, LARGE_MEGA),
    DeviceDescriptor::new("ATmega48", 2048, 0x100, 512, 256, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega48A", 2048, 0x100, 512, 256, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega48P", 2048, 0x100, 512, 256, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega48PA", 2048, 0x100, 512, 256, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega88", 4096, 0x100, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega88A", 4096, 0x100, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega88P", 4096, 0x100, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega88PA", 4096, 0x100, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega168", 8192, 0x100, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega168A", 8192, 0x100, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega168P", 8192, 0x100, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega168PA", 8192, 0x100, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega169", 8192, 0x100, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega169A", 8192, 0x100, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega169P", 8192, 0x100, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega169PA", 8192, 0x100, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega328", 16_384, 0x100, 2048, 1024, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega328P", 16_384, 0x100, 2048, 1024, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega328PB", 16_384, 0x100, 2048, 1024, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega32U4", 16_384, 0x100, 2560, 1024, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega8515", 8192, 0x060, 512, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega1280", 65_536, 0x200, 8192, 4096, LARGE_MEGA),
    DeviceDescriptor::new("ATmega164P", 8192, 0x100, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega164PA", 8192, 0x100, 1024, 512, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega324A", 16_384, 0x100, 2048, 1024, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega324P", 16_384, 0x100, 2048, 1024, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega324PA", 16_384, 0x100, 2048, 1024, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega644", 32_768, 0x100, 4096, 2048, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega644P", 32_768, 0x100, 4096, 2096, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega644PA", 32_768, 0x100, 4096, 2096, ENHANCED_MEGA),
    DeviceDescriptor::new("ATmega1284P", 65_536, 0x100, 16_384, 4096, LARGE_MEGA),
    DeviceDescriptor::new("ATmega1284PA", 65_536, 0x100, 16_384, 4096, LARGE_MEGA),
    DeviceDescriptor::new("ATmega2560", 131_072, 0x200, 8192, 4096, F::NO_ESPM),
    DeviceDescriptor::new("ATmega2561", 131_072, 0x200, 8192, 4096, F::NO_ESPM),
    DeviceDescriptor::new("ATmega4809", 24_000, 0x2800, 6000, 256, ENHANCED_MEGA),

    // Other
    DeviceDescriptor::new(
        "AT94K",
        8192,
        0x060,
        16_384,
        0,
        ENHANCED_MEGA.union(F::NO_SPM).union(F::NO_BREAK),
    ),
];

/// Build the registry used by the assembler.
pub fn build_default_registry() -> Result<DeviceRegistry, RegistryError> {
    DeviceRegistry::new(DEFAULT_DEVICE, DEVICE_TABLE.iter().copied())
}
