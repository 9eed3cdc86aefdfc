// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Per-run assembler session state shared by the device registry and the
//! predefined-symbol verifier.

use std::fmt;

use crate::core::symbol_table::{SymbolDefinitions, SymbolTable};

/// Assembler pass. Exactly two passes run, one after another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Pass {
    One,
    Two,
}

impl Pass {
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pass {}", self.number())
    }
}

/// Session state for one assembly run.
///
/// The selected device index is owned here rather than in process-wide state,
/// so sessions are independent of each other.
#[derive(Debug, Clone)]
pub struct AsmSession<S = SymbolTable> {
    pass: Pass,
    symbols: S,
    selected_device: usize,
}

impl AsmSession<SymbolTable> {
    pub fn new() -> Self {
        Self::with_symbols(SymbolTable::new())
    }
}

impl Default for AsmSession<SymbolTable> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SymbolDefinitions> AsmSession<S> {
    pub fn with_symbols(symbols: S) -> Self {
        Self {
            pass: Pass::One,
            symbols,
            selected_device: 0,
        }
    }

    pub fn pass(&self) -> Pass {
        self.pass
    }

    /// Start a pass. Symbols carry over; the device selection does not.
    pub fn begin_pass(&mut self, pass: Pass) {
        self.pass = pass;
        self.selected_device = 0;
    }

    pub fn symbols(&self) -> &S {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut S {
        &mut self.symbols
    }

    pub fn into_symbols(self) -> S {
        self.symbols
    }

    /// Index into the device registry of the current selection; 0 is the default device.
    pub fn selected_device(&self) -> usize {
        self.selected_device
    }

    pub(crate) fn set_selected_device(&mut self, index: usize) {
        self.selected_device = index;
    }
}
