// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! AVR instruction forms and their device restrictions.
//!
//! Each form is a mnemonic plus an addressing shape. A form is available on a
//! device when none of its exclusion flags are set in the device flags.

use crate::core::capability::DeviceFlags;

/// Counts the instruction forms a device supports.
pub trait InstructionCounter {
    fn count_supported_instructions(&self, flags: DeviceFlags) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionForm {
    pub mnemonic: &'static str,
    /// Operand shape, empty for implied forms.
    pub form: &'static str,
    /// Flags that exclude this form.
    pub excluded_by: DeviceFlags,
}

const fn form(mnemonic: &'static str, form: &'static str, excluded_by: DeviceFlags) -> InstructionForm {
    InstructionForm {
        mnemonic,
        form,
        excluded_by,
    }
}

const ANY: DeviceFlags = DeviceFlags::empty();
const NO_LPM_Z: DeviceFlags = DeviceFlags::NO_LPM.union(DeviceFlags::NO_LPM_X);
const NO_ELPM_Z: DeviceFlags = DeviceFlags::NO_ELPM.union(DeviceFlags::NO_ELPM_X);
const NO_WORD_IMM: DeviceFlags = DeviceFlags::TINY1X.union(DeviceFlags::AVR8L);
const NO_DISP_Y: DeviceFlags = DeviceFlags::NO_YREG.union(DeviceFlags::AVR8L);

static AVR_FORMS: &[InstructionForm] = &[
    // Implied
    form("nop", "", ANY),
    form("sec", "", ANY),
    form("clc", "", ANY),
    form("sen", "", ANY),
    form("cln", "", ANY),
    form("sez", "", ANY),
    form("clz", "", ANY),
    form("sei", "", ANY),
    form("cli", "", ANY),
    form("ses", "", ANY),
    form("cls", "", ANY),
    form("sev", "", ANY),
    form("clv", "", ANY),
    form("set", "", ANY),
    form("clt", "", ANY),
    form("seh", "", ANY),
    form("clh", "", ANY),
    form("sleep", "", ANY),
    form("wdr", "", ANY),
    form("ijmp", "", ANY),
    form("eijmp", "", DeviceFlags::NO_EIJMP),
    form("icall", "", ANY),
    form("eicall", "", DeviceFlags::NO_EICALL),
    form("ret", "", ANY),
    form("reti", "", ANY),
    form("spm", "", DeviceFlags::NO_SPM),
    form("spm", "Z+", DeviceFlags::NO_ESPM),
    form("break", "", DeviceFlags::NO_BREAK),
    form("lpm", "", DeviceFlags::NO_LPM),
    form("elpm", "", DeviceFlags::NO_ELPM),
    // Single register
    form("ser", "Rd", ANY),
    form("com", "Rd", ANY),
    form("neg", "Rd", ANY),
    form("inc", "Rd", ANY),
    form("dec", "Rd", ANY),
    form("lsl", "Rd", ANY),
    form("lsr", "Rd", ANY),
    form("asr", "Rd", ANY),
    form("rol", "Rd", ANY),
    form("ror", "Rd", ANY),
    form("swap", "Rd", ANY),
    form("push", "Rr", DeviceFlags::TINY1X),
    form("pop", "Rd", DeviceFlags::TINY1X),
    form("tst", "Rd", ANY),
    form("clr", "Rd", ANY),
    form("bset", "s", ANY),
    form("bclr", "s", ANY),
    // Register pair
    form("add", "Rd, Rr", ANY),
    form("adc", "Rd, Rr", ANY),
    form("sub", "Rd, Rr", ANY),
    form("sbc", "Rd, Rr", ANY),
    form("and", "Rd, Rr", ANY),
    form("or", "Rd, Rr", ANY),
    form("eor", "Rd, Rr", ANY),
    form("cp", "Rd, Rr", ANY),
    form("cpc", "Rd, Rr", ANY),
    form("cpse", "Rd, Rr", ANY),
    form("mov", "Rd, Rr", ANY),
    form("movw", "Rd, Rr", DeviceFlags::NO_MOVW),
    form("mul", "Rd, Rr", DeviceFlags::NO_MUL),
    form("muls", "Rd, Rr", DeviceFlags::NO_MUL),
    form("mulsu", "Rd, Rr", DeviceFlags::NO_MUL),
    form("fmul", "Rd, Rr", DeviceFlags::NO_MUL),
    form("fmuls", "Rd, Rr", DeviceFlags::NO_MUL),
    form("fmulsu", "Rd, Rr", DeviceFlags::NO_MUL),
    // Bit and I/O
    form("sbrc", "Rr, b", ANY),
    form("sbrs", "Rr, b", ANY),
    form("bld", "Rd, b", ANY),
    form("bst", "Rr, b", ANY),
    form("in", "Rd, A", ANY),
    form("out", "A, Rr", ANY),
    form("cbi", "A, b", ANY),
    form("sbi", "A, b", ANY),
    form("sbic", "A, b", ANY),
    form("sbis", "A, b", ANY),
    // Immediate
    form("adiw", "Rd, K", NO_WORD_IMM),
    form("sbiw", "Rd, K", NO_WORD_IMM),
    form("subi", "Rd, K", ANY),
    form("sbci", "Rd, K", ANY),
    form("andi", "Rd, K", ANY),
    form("ori", "Rd, K", ANY),
    form("sbr", "Rd, K", ANY),
    form("cbr", "Rd, K", ANY),
    form("cpi", "Rd, K", ANY),
    form("ldi", "Rd, K", ANY),
    // Data memory
    form("lds", "Rd, k", DeviceFlags::TINY1X),
    form("sts", "k, Rr", DeviceFlags::TINY1X),
    form("ld", "Rd, X", DeviceFlags::NO_XREG),
    form("ld", "Rd, X+", DeviceFlags::NO_XREG),
    form("ld", "Rd, -X", DeviceFlags::NO_XREG),
    form("ld", "Rd, Y", DeviceFlags::NO_YREG),
    form("ld", "Rd, Y+", DeviceFlags::NO_YREG),
    form("ld", "Rd, -Y", DeviceFlags::NO_YREG),
    form("ld", "Rd, Z", ANY),
    form("ld", "Rd, Z+", DeviceFlags::TINY1X),
    form("ld", "Rd, -Z", DeviceFlags::TINY1X),
    form("st", "X, Rr", DeviceFlags::NO_XREG),
    form("st", "X+, Rr", DeviceFlags::NO_XREG),
    form("st", "-X, Rr", DeviceFlags::NO_XREG),
    form("st", "Y, Rr", DeviceFlags::NO_YREG),
    form("st", "Y+, Rr", DeviceFlags::NO_YREG),
    form("st", "-Y, Rr", DeviceFlags::NO_YREG),
    form("st", "Z, Rr", ANY),
    form("st", "Z+, Rr", DeviceFlags::TINY1X),
    form("st", "-Z, Rr", DeviceFlags::TINY1X),
    form("ldd", "Rd, Y+q", NO_DISP_Y),
    form("ldd", "Rd, Z+q", NO_WORD_IMM),
    form("std", "Y+q, Rr", NO_DISP_Y),
    form("std", "Z+q, Rr", NO_WORD_IMM),
    // Program memory
    form("lpm", "Rd, Z", NO_LPM_Z),
    form("lpm", "Rd, Z+", NO_LPM_Z),
    form("elpm", "Rd, Z", NO_ELPM_Z),
    form("elpm", "Rd, Z+", NO_ELPM_Z),
    // Control flow
    form("rjmp", "k", ANY),
    form("rcall", "k", ANY),
    form("jmp", "k", DeviceFlags::NO_JMP),
    form("call", "k", DeviceFlags::NO_JMP),
    form("brbs", "s, k", ANY),
    form("brbc", "s, k", ANY),
    form("breq", "k", ANY),
    form("brne", "k", ANY),
    form("brcs", "k", ANY),
    form("brcc", "k", ANY),
    form("brsh", "k", ANY),
    form("brlo", "k", ANY),
    form("brmi", "k", ANY),
    form("brpl", "k", ANY),
    form("brge", "k", ANY),
    form("brlt", "k", ANY),
    form("brhs", "k", ANY),
    form("brhc", "k", ANY),
    form("brts", "k", ANY),
    form("brtc", "k", ANY),
    form("brvs", "k", ANY),
    form("brvc", "k", ANY),
    form("brie", "k", ANY),
    form("brid", "k", ANY),
];

/// The AVR instruction-form table.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvrInstructionSet;

impl AvrInstructionSet {
    pub fn forms(&self) -> &'static [InstructionForm] {
        AVR_FORMS
    }

    /// Whether any form of `mnemonic` is usable with `flags`.
    pub fn is_supported(&self, mnemonic: &str, flags: DeviceFlags) -> bool {
        AVR_FORMS
            .iter()
            .filter(|entry| entry.mnemonic.eq_ignore_ascii_case(mnemonic))
            .any(|entry| !entry.excluded_by.intersects(flags))
    }
}

impl InstructionCounter for AvrInstructionSet {
    fn count_supported_instructions(&self, flags: DeviceFlags) -> usize {
        AVR_FORMS
            .iter()
            .filter(|entry| !entry.excluded_by.intersects(flags))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrestricted_core_supports_every_form() {
        let isa = AvrInstructionSet;
        assert_eq!(isa.count_supported_instructions(DeviceFlags::empty()), 137);
        assert_eq!(isa.forms().len(), 137);
    }

    #[test]
    fn multiplier_flag_removes_six_forms() {
        let isa = AvrInstructionSet;
        assert_eq!(isa.count_supported_instructions(DeviceFlags::NO_MUL), 131);
        assert!(!isa.is_supported("MUL", DeviceFlags::NO_MUL));
        assert!(isa.is_supported("mul", DeviceFlags::NO_JMP));
    }

    #[test]
    fn lpm_survives_while_indexed_forms_are_excluded() {
        let isa = AvrInstructionSet;
        assert!(isa.is_supported("lpm", DeviceFlags::NO_LPM_X));
        assert!(!isa.is_supported("lpm", DeviceFlags::NO_LPM));
    }

    #[test]
    fn unknown_mnemonic_is_unsupported() {
        assert!(!AvrInstructionSet.is_supported("xch", DeviceFlags::empty()));
    }
}
