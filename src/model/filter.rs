// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{normalize_term, CatalogIndexEntry, EntryName};

/// Minimum `rapidfuzz` ratio for a catalog name to be offered as a "did you mean" suggestion.
const SUGGESTION_MIN_RATIO: f64 = 0.6;

/// Search filter over the cached catalog index.
///
/// When `active` is false, `matched_names` is ignored by every consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub active: bool,
    pub normalized_term: String,
    pub matched_names: Vec<EntryName>,
}

impl FilterState {
    pub fn inactive() -> Self {
        Self::default()
    }

    /// Recomputes the match list from scratch; an empty term yields an inactive filter.
    pub fn from_index(term: &str, index: &[CatalogIndexEntry]) -> Self {
        let normalized_term = normalize_term(term);
        if normalized_term.is_empty() {
            return Self::inactive();
        }
        let matched_names = match_names(index, &normalized_term);
        Self {
            active: true,
            normalized_term,
            matched_names,
        }
    }

    pub fn match_count(&self) -> usize {
        if self.active {
            self.matched_names.len()
        } else {
            0
        }
    }
}

/// Index names containing `normalized_term` as a substring, in index order.
pub fn match_names(index: &[CatalogIndexEntry], normalized_term: &str) -> Vec<EntryName> {
    index
        .iter()
        .filter(|entry| entry.name.contains_term(normalized_term))
        .map(|entry| entry.name.clone())
        .collect()
}

/// The index name closest to `term`, if any is similar enough to be worth suggesting.
pub fn closest_name(index: &[CatalogIndexEntry], term: &str) -> Option<EntryName> {
    let needle = normalize_term(term);
    if needle.is_empty() {
        return None;
    }

    let mut best: Option<(f64, &EntryName)> = None;
    for entry in index {
        let ratio = rapidfuzz::fuzz::ratio(needle.chars(), entry.name.as_str().chars());
        if ratio < SUGGESTION_MIN_RATIO {
            continue;
        }
        if best.map_or(true, |(best_ratio, _)| ratio > best_ratio) {
            best = Some((ratio, &entry.name));
        }
    }
    best.map(|(_, name)| name.clone())
}
