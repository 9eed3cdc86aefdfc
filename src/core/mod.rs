// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Target-independent core: device catalog types, symbol table, and the
//! pass-stable device constants.

pub mod assembler;
pub mod capability;
pub mod device;
pub mod instruction_set;
pub mod predefined;
pub mod session;
pub mod symbol_table;
