// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::EntryName;

/// One row of the full catalog index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogIndexEntry {
    pub name: EntryName,
    /// Where the remote source serves this entry's detail (an absolute URL for the HTTP client).
    pub source_ref: String,
}

impl CatalogIndexEntry {
    pub fn new(name: EntryName, source_ref: impl Into<String>) -> Self {
        Self {
            name,
            source_ref: source_ref.into(),
        }
    }
}

/// A page (or the whole) of the catalog listing plus the unfiltered catalog size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogListing {
    pub items: Vec<CatalogIndexEntry>,
    pub count: usize,
}

/// Full record for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDetail {
    pub id: u32,
    pub name: EntryName,
    pub artwork_url: Option<String>,
    pub types: Vec<String>,
    /// Height as reported by the source, in decimetres.
    pub height: u32,
    /// Weight as reported by the source, in hectograms.
    pub weight: u32,
    pub abilities: Vec<String>,
}

impl EntryDetail {
    pub fn height_metres(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    pub fn weight_kilograms(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }

    pub fn types_label(&self) -> String {
        self.types.join(", ")
    }

    pub fn abilities_label(&self) -> String {
        self.abilities.join(", ")
    }
}
