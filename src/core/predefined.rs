// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Predefined device constants.
//!
//! Every device in the registry gets a constant `__<NAME>__` whose value is
//! its registry index. Pass 1 defines them; pass 2 checks that each one still
//! exists with the same value, since forward references resolved in pass 1
//! would otherwise encode differently in pass 2.

use log::{debug, error, trace};
use thiserror::Error;

use crate::core::device::DeviceRegistry;
use crate::core::session::{AsmSession, Pass};
use crate::core::symbol_table::SymbolDefinitions;

/// Fatal predefinition failure. The run must stop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredefineError {
    #[error("Can't define symbol {symbol} twice. Please don't use predefined symbols")]
    DuplicateSymbol { symbol: String },
    #[error("Constant {symbol} is missing in pass 2")]
    MissingSymbol { symbol: String },
    #[error("Constant {symbol} changed value from {pass1} in pass 1 to {pass2} in pass 2")]
    ValueMismatch {
        symbol: String,
        pass1: i64,
        pass2: i64,
    },
}

impl PredefineError {
    pub fn symbol(&self) -> &str {
        match self {
            Self::DuplicateSymbol { symbol }
            | Self::MissingSymbol { symbol }
            | Self::ValueMismatch { symbol, .. } => symbol,
        }
    }
}

/// Define (pass 1) or verify (pass 2) the per-device constants.
///
/// The derived variables for the current selection are written first. Devices
/// are then processed default-first in registry order, stopping at the first
/// failure.
pub fn predefine_devices<S: SymbolDefinitions>(
    registry: &DeviceRegistry,
    session: &mut AsmSession<S>,
) -> Result<(), PredefineError> {
    let pass = session.pass();
    debug!(
        "{pass}: predefining {} device constants",
        registry.devices().len()
    );
    registry.define_selected_variables(session);

    for (index, device) in registry.devices().iter().enumerate() {
        let symbol = device.symbol_name();
        let value = index as i64;
        let result = match pass {
            Pass::One => define_device_constant(session.symbols_mut(), &symbol, value),
            Pass::Two => verify_device_constant(session.symbols(), &symbol, value),
        };
        if let Err(err) = result {
            error!("{pass}: {err}");
            return Err(err);
        }
        trace!("{pass}: {symbol} = {value}");
    }
    Ok(())
}

fn define_device_constant<S: SymbolDefinitions>(
    symbols: &mut S,
    symbol: &str,
    value: i64,
) -> Result<(), PredefineError> {
    if symbols.constant_exists(symbol) {
        return Err(PredefineError::DuplicateSymbol {
            symbol: symbol.to_string(),
        });
    }
    symbols
        .define_constant(symbol, value)
        .map_err(|_| PredefineError::DuplicateSymbol {
            symbol: symbol.to_string(),
        })
}

fn verify_device_constant<S: SymbolDefinitions>(
    symbols: &S,
    symbol: &str,
    value: i64,
) -> Result<(), PredefineError> {
    match symbols.lookup_constant(symbol) {
        None => Err(PredefineError::MissingSymbol {
            symbol: symbol.to_string(),
        }),
        Some(previous) if previous != value => Err(PredefineError::ValueMismatch {
            symbol: symbol.to_string(),
            pass1: previous,
            pass2: value,
        }),
        Some(_) => Ok(()),
    }
}
