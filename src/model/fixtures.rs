// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{CatalogIndexEntry, EntryDetail, EntryName};

fn name(value: &str) -> EntryName {
    EntryName::new(value).expect("entry name")
}

pub(crate) fn index_of(names: &[&str]) -> Vec<CatalogIndexEntry> {
    names
        .iter()
        .map(|value| CatalogIndexEntry::new(name(value), format!("test://pokemon/{value}")))
        .collect()
}

pub(crate) fn detail(id: u32, value: &str) -> EntryDetail {
    EntryDetail {
        id,
        name: name(value),
        artwork_url: Some(format!("test://artwork/{id}.png")),
        types: vec!["normal".to_owned()],
        height: 10,
        weight: 100,
        abilities: vec!["run-away".to_owned()],
    }
}

pub(crate) fn details_of(names: &[&str]) -> Vec<EntryDetail> {
    names
        .iter()
        .enumerate()
        .map(|(idx, value)| detail(idx as u32 + 1, value))
        .collect()
}

/// `count` entries named `entry-0001`, `entry-0002`, ...
pub(crate) fn numbered_details(count: usize) -> Vec<EntryDetail> {
    (1..=count)
        .map(|id| detail(id as u32, &format!("entry-{id:04}")))
        .collect()
}
