// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use super::{PreferenceKey, PreferenceStore, StoreError};

/// Process-lifetime preference storage.
///
/// Used when no durable location is wanted and by tests; `set_unavailable(true)` makes every
/// call fail the way an unreachable backing store would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<PreferenceKey, Vec<String>>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: impl IntoIterator<Item = (PreferenceKey, Vec<String>)>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn snapshot(&self, key: PreferenceKey) -> Option<Vec<String>> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                reason: "memory store switched off".to_owned(),
            });
        }
        Ok(())
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: PreferenceKey) -> Result<Option<Vec<String>>, StoreError> {
        self.check_available()?;
        Ok(self.snapshot(key))
    }

    fn save(&self, key: PreferenceKey, values: &[String]) -> Result<(), StoreError> {
        self.check_available()?;
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, values.to_vec());
        Ok(())
    }
}
