// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Catalog entries and their index, page arithmetic, and the search filter. Everything here is
//! plain data with no I/O.

pub mod entry;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod filter;
pub mod name;
pub mod page;

pub use entry::{CatalogIndexEntry, CatalogListing, EntryDetail};
pub use filter::{closest_name, match_names, FilterState};
pub use name::{normalize_term, EntryName, NameError};
pub use page::{
    clamp_page, total_pages, PageLabel, PageLink, PageSize, PageWindow, PaginationDescriptor,
    DEFAULT_PAGE_SIZE,
};
