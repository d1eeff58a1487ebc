// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dexview: a terminal catalog viewer for the Pokémon species API.
//!
//! The crate is split into a remote catalog client ([`remote`]), local preference persistence
//! ([`store`], [`prefs`]), the pagination/filter core ([`controller`]) and a terminal renderer
//! ([`tui`]) that only consumes controller events.

pub mod app;
pub mod config;
pub mod controller;
pub mod logging;
pub mod model;
pub mod prefs;
pub mod remote;
pub mod store;
pub mod tui;
pub mod ui;

pub use app::DexApp;
