// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Local preference persistence.
//!
//! Two named string lists (favorites, recent searches) are stored as whole values: every save
//! overwrites the previous contents for that key.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

pub mod memory;
pub mod prefs_folder;

pub use memory::MemoryStore;
pub use prefs_folder::{PrefsFolder, WriteDurability};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PreferenceKey {
    Favorites,
    RecentSearches,
}

impl PreferenceKey {
    pub const ALL: [Self; 2] = [Self::Favorites, Self::RecentSearches];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Favorites => "favorites",
            Self::RecentSearches => "recentSearches",
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable key-value persistence for the preference lists.
pub trait PreferenceStore: Send {
    /// The stored list, or `None` when nothing was ever saved under `key`.
    fn load(&self, key: PreferenceKey) -> Result<Option<Vec<String>>, StoreError>;

    /// Replaces whatever is stored under `key`.
    fn save(&self, key: PreferenceKey, values: &[String]) -> Result<(), StoreError>;
}

impl<T: PreferenceStore + Sync> PreferenceStore for Arc<T> {
    fn load(&self, key: PreferenceKey) -> Result<Option<Vec<String>>, StoreError> {
        (**self).load(key)
    }

    fn save(&self, key: PreferenceKey, values: &[String]) -> Result<(), StoreError> {
        (**self).save(key, values)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("refusing to write through symlink at {path:?}")]
    SymlinkRefused { path: PathBuf },
    #[error("preference storage unavailable: {reason}")]
    Unavailable { reason: String },
}

impl StoreError {
    /// Whether the stored data exists but cannot be decoded (as opposed to storage being
    /// unreachable).
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Json { .. })
    }
}
