// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Device capability flags.
//!
//! Each flag names an instruction-set feature the device *lacks*. An empty set
//! is the most permissive core. Bit positions are fixed so raw values can be
//! exchanged with the instruction encoder.

use bitflags::bitflags;

bitflags! {
    /// Instruction-set features excluded on a device.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DeviceFlags: u32 {
        /// No hardware multiplier (`mul`, `muls`, `fmul`, ...).
        const NO_MUL = 0x0000_0001;
        /// No `jmp`/`call` long jumps.
        const NO_JMP = 0x0000_0002;
        /// No X pointer register.
        const NO_XREG = 0x0000_0004;
        /// No Y pointer register.
        const NO_YREG = 0x0000_0008;
        /// Tiny 1x register file shape (no SRAM, no stack instructions).
        const TINY1X = 0x0000_0010;
        const NO_LPM = 0x0000_0020;
        /// No `lpm Rd, Z` / `lpm Rd, Z+` forms.
        const NO_LPM_X = 0x0000_0040;
        const NO_ELPM = 0x0000_0080;
        /// No `elpm Rd, Z` / `elpm Rd, Z+` forms.
        const NO_ELPM_X = 0x0000_0100;
        const NO_SPM = 0x0000_0200;
        const NO_ESPM = 0x0000_0400;
        const NO_MOVW = 0x0000_0800;
        const NO_BREAK = 0x0000_1000;
        const NO_EICALL = 0x0000_2000;
        const NO_EIJMP = 0x0000_4000;
        /// Reduced AVR8L core (ATtiny4/5/9/10/20 class).
        const AVR8L = 0x0000_8000;
    }
}

impl DeviceFlags {
    /// Flag names in bit order, for listings and JSON output.
    pub fn names(&self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::DeviceFlags;

    #[test]
    fn raw_bits_round_trip_through_encoder_interop() {
        let flags = DeviceFlags::NO_MUL | DeviceFlags::NO_JMP | DeviceFlags::AVR8L;
        assert_eq!(flags.bits(), 0x8003);
        assert_eq!(DeviceFlags::from_bits_retain(0x8003), flags);
    }

    #[test]
    fn default_is_unrestricted() {
        assert!(DeviceFlags::default().is_empty());
    }

    #[test]
    fn names_follow_bit_order() {
        let flags = DeviceFlags::NO_EIJMP | DeviceFlags::NO_MUL;
        assert_eq!(flags.names(), vec!["NO_MUL", "NO_EIJMP"]);
    }
}
