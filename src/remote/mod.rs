// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Remote catalog access.
//!
//! [`CatalogSource`] is the seam between the page controller and wherever entries come from:
//! the PokeAPI over HTTP ([`PokeApiClient`]) or the built-in offline catalog ([`StaticCatalog`]).

use std::future::Future;

use crate::model::{CatalogIndexEntry, CatalogListing, EntryDetail, EntryName};

pub mod client;
pub mod demo;
mod error;
mod wire;

pub use client::{ClientConfig, PokeApiClient};
pub use demo::{CallCounts, StaticCatalog};
pub use error::CatalogError;

/// Paged listing, full index and per-entry detail lookups against a catalog.
///
/// Futures are `Send` so controller operations can be spawned onto a multi-threaded runtime.
pub trait CatalogSource: Send + Sync {
    /// One page of entry summaries plus the total (unfiltered) catalog size.
    fn list_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<CatalogListing, CatalogError>> + Send;

    /// Every entry in the catalog, in catalog order.
    fn list_all(&self) -> impl Future<Output = Result<CatalogListing, CatalogError>> + Send;

    /// Full detail for one entry. Fails with [`CatalogError::NotFound`] for unknown names.
    fn get_by_name(
        &self,
        name: &EntryName,
    ) -> impl Future<Output = Result<EntryDetail, CatalogError>> + Send;

    /// Full detail for an entry taken from a listing.
    ///
    /// Sources that can follow [`CatalogIndexEntry::source_ref`] directly override this.
    fn get_by_ref(
        &self,
        entry: &CatalogIndexEntry,
    ) -> impl Future<Output = Result<EntryDetail, CatalogError>> + Send {
        self.get_by_name(&entry.name)
    }
}
