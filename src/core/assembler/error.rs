// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Error types for assembler runs.

use std::fmt;

use crate::core::device::RegistryError;
use crate::core::predefined::PredefineError;

/// Categories of assembler errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsmErrorKind {
    Cli,
    Device,
    Io,
    Symbol,
}

/// An assembler error with a kind and message.
#[derive(Debug, Clone)]
pub struct AsmError {
    kind: AsmErrorKind,
    message: String,
}

impl AsmError {
    pub fn new(kind: AsmErrorKind, msg: &str, param: Option<&str>) -> Self {
        Self {
            kind,
            message: format_error(msg, param),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> AsmErrorKind {
        self.kind
    }

    /// Stable diagnostic code for the error kind.
    pub fn code(&self) -> &'static str {
        diagnostic_code(self.kind)
    }
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AsmError {}

impl From<PredefineError> for AsmError {
    fn from(err: PredefineError) -> Self {
        Self::new(AsmErrorKind::Symbol, &err.to_string(), None)
    }
}

impl From<RegistryError> for AsmError {
    fn from(err: RegistryError) -> Self {
        Self::new(AsmErrorKind::Device, "Invalid device table", Some(&err.to_string()))
    }
}

impl From<std::io::Error> for AsmError {
    fn from(err: std::io::Error) -> Self {
        Self::new(AsmErrorKind::Io, "I/O error", Some(&err.to_string()))
    }
}

/// Error from a failed assembly run, with the pass it failed in when known.
#[derive(Debug)]
pub struct AsmRunError {
    error: AsmError,
    pass: Option<u8>,
}

impl AsmRunError {
    pub fn new(error: AsmError, pass: Option<u8>) -> Self {
        Self { error, pass }
    }

    pub fn error(&self) -> &AsmError {
        &self.error
    }

    pub fn pass(&self) -> Option<u8> {
        self.pass
    }

    /// One-line rendering used by the CLI.
    pub fn format(&self) -> String {
        match self.pass {
            Some(pass) => format!(
                "pass {pass}: ERROR [{}] - {}",
                self.error.code(),
                self.error.message()
            ),
            None => format!("ERROR [{}] - {}", self.error.code(), self.error.message()),
        }
    }
}

impl fmt::Display for AsmRunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for AsmRunError {}

impl From<AsmError> for AsmRunError {
    fn from(err: AsmError) -> Self {
        Self::new(err, None)
    }
}

impl From<RegistryError> for AsmRunError {
    fn from(err: RegistryError) -> Self {
        Self::new(err.into(), None)
    }
}

impl From<std::io::Error> for AsmRunError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.into(), None)
    }
}

fn diagnostic_code(kind: AsmErrorKind) -> &'static str {
    match kind {
        AsmErrorKind::Cli => "asm101",
        AsmErrorKind::Device => "asm601",
        AsmErrorKind::Io => "asm501",
        AsmErrorKind::Symbol => "asm301",
    }
}

/// Format an error message with an optional parameter.
pub fn format_error(msg: &str, param: Option<&str>) -> String {
    match param {
        Some(p) => format!("{msg}: {p}"),
        None => msg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_error_format_includes_pass_and_code() {
        let err = AsmRunError::new(
            AsmError::new(AsmErrorKind::Symbol, "Constant __X__ is missing in pass 2", None),
            Some(2),
        );
        assert_eq!(
            err.format(),
            "pass 2: ERROR [asm301] - Constant __X__ is missing in pass 2"
        );
    }

    #[test]
    fn predefine_errors_map_to_symbol_kind() {
        let err: AsmError = PredefineError::MissingSymbol {
            symbol: "__ATtiny85__".to_string(),
        }
        .into();
        assert_eq!(err.kind(), AsmErrorKind::Symbol);
        assert!(err.message().contains("__ATtiny85__"));
    }

    #[test]
    fn format_error_appends_parameter() {
        assert_eq!(format_error("Unknown device", Some("ATfoo")), "Unknown device: ATfoo");
        assert_eq!(format_error("No input", None), "No input");
    }
}
