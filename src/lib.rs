// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// Library entry exposing the device registry and assembler driver.
pub mod assembler;
pub mod core;
pub mod registry_defaults;
