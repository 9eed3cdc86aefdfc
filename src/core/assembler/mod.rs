// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Assembler run support shared by the driver and its tests.
//!
//! - [`listing`] - Device table and symbol listings
//! - [`error`] - Error types

pub mod error;
pub mod listing;
