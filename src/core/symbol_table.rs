// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Symbol table for assembler constants and variables.
//!
//! Constants (`.equ`) are defined once per pass; variables (`.set`) may be
//! redefined at any time. Device selection and predefinition only talk to the
//! table through [`SymbolDefinitions`], so a pass driver can plug in its own
//! table.

use std::collections::HashMap;

use thiserror::Error;

/// Outcome of a raw table operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolTableResult {
    Ok,
    Duplicate,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub name: String,
    pub value: i64,
    /// `true` for redefinable variables, `false` for constants.
    pub rw: bool,
}

#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new symbol. Fails with `Duplicate` if any symbol of that name exists.
    pub fn add(&mut self, name: &str, value: i64, rw: bool) -> SymbolTableResult {
        if self.index.contains_key(name) {
            return SymbolTableResult::Duplicate;
        }
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(SymbolEntry {
            name: name.to_string(),
            value,
            rw,
        });
        SymbolTableResult::Ok
    }

    /// Overwrite the value of an existing symbol.
    pub fn update(&mut self, name: &str, value: i64) -> SymbolTableResult {
        match self.index.get(name) {
            Some(&idx) => {
                self.entries[idx].value = value;
                SymbolTableResult::Ok
            }
            None => SymbolTableResult::NotFound,
        }
    }

    pub fn entry(&self, name: &str) -> Option<&SymbolEntry> {
        self.index.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn lookup(&self, name: &str) -> Option<i64> {
        self.entry(name).map(|entry| entry.value)
    }

    pub fn remove(&mut self, name: &str) -> SymbolTableResult {
        let Some(idx) = self.index.remove(name) else {
            return SymbolTableResult::NotFound;
        };
        self.entries.remove(idx);
        for slot in self.index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        SymbolTableResult::Ok
    }

    /// Entries in definition order.
    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Error returned when a constant cannot be defined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolTableError {
    #[error("symbol {name} is already defined")]
    Duplicate { name: String },
}

/// Symbol-table operations used by device selection and predefinition.
pub trait SymbolDefinitions {
    /// Define or overwrite a variable. Never fails.
    fn define_variable(&mut self, name: &str, value: i64);
    /// Define a constant. Fails if a constant or variable of that name exists.
    fn define_constant(&mut self, name: &str, value: i64) -> Result<(), SymbolTableError>;
    /// Whether any constant or variable of that name exists.
    fn constant_exists(&self, name: &str) -> bool;
    fn lookup_constant(&self, name: &str) -> Option<i64>;
}

impl SymbolDefinitions for SymbolTable {
    /// An existing constant of the same name is overwritten and becomes a
    /// variable.
    fn define_variable(&mut self, name: &str, value: i64) {
        match self.update(name, value) {
            SymbolTableResult::NotFound => {
                let added = self.add(name, value, true);
                debug_assert_eq!(added, SymbolTableResult::Ok);
            }
            _ => {
                if let Some(&idx) = self.index.get(name) {
                    self.entries[idx].rw = true;
                }
            }
        }
    }

    fn define_constant(&mut self, name: &str, value: i64) -> Result<(), SymbolTableError> {
        match self.add(name, value, false) {
            SymbolTableResult::Ok => Ok(()),
            _ => Err(SymbolTableError::Duplicate {
                name: name.to_string(),
            }),
        }
    }

    fn constant_exists(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    fn lookup_constant(&self, name: &str) -> Option<i64> {
        self.entry(name)
            .filter(|entry| !entry.rw)
            .map(|entry| entry.value)
    }
}
