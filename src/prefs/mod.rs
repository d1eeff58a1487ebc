// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Favorites and recent searches.
//!
//! Both lists hold normalized entry names with set semantics and a hard capacity. Favorites keep
//! insertion order (oldest first, evicted first); recent searches keep most-recent-first order.
//! Every mutation is persisted immediately. If the backing store fails, the lists keep working in
//! memory for the rest of the session and further writes are skipped.

use tracing::{debug, warn};

use crate::model::EntryName;
use crate::store::{PreferenceKey, PreferenceStore, StoreError};

pub const FAVORITES_CAPACITY: usize = 50;
pub const RECENTS_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListOrder {
    /// Oldest first; new items are appended and the oldest is evicted at capacity.
    Insertion,
    /// Newest first; new items are prepended and the oldest (last) is evicted at capacity.
    MostRecentFirst,
}

/// A bounded list of unique entry names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceList {
    items: Vec<EntryName>,
    capacity: usize,
    order: ListOrder,
}

impl PreferenceList {
    pub fn favorites() -> Self {
        Self {
            items: Vec::new(),
            capacity: FAVORITES_CAPACITY,
            order: ListOrder::Insertion,
        }
    }

    pub fn recents() -> Self {
        Self {
            items: Vec::new(),
            capacity: RECENTS_CAPACITY,
            order: ListOrder::MostRecentFirst,
        }
    }

    /// Rebuilds a list from stored values: invalid names are skipped, duplicates keep their
    /// first occurrence and the list is cut to capacity keeping its newest items.
    fn restored(mut self, stored: Vec<String>) -> Self {
        for raw in stored {
            let Ok(name) = EntryName::new(&raw) else {
                debug!(value = raw, "skipping invalid stored name");
                continue;
            };
            if !self.items.contains(&name) {
                self.items.push(name);
            }
        }

        let excess = self.items.len().saturating_sub(self.capacity);
        match self.order {
            ListOrder::Insertion => {
                self.items.drain(..excess);
            }
            ListOrder::MostRecentFirst => self.items.truncate(self.capacity),
        }
        self
    }

    pub fn items(&self) -> &[EntryName] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, name: &EntryName) -> bool {
        self.items.contains(name)
    }

    /// Removes `name` if present, otherwise adds it (evicting the oldest item at capacity).
    /// Returns whether `name` is in the list afterwards.
    pub fn toggle(&mut self, name: &EntryName) -> bool {
        if let Some(pos) = self.items.iter().position(|item| item == name) {
            self.items.remove(pos);
            return false;
        }
        self.insert_new(name.clone());
        true
    }

    /// Moves `name` to the newest position, adding it if absent.
    pub fn touch(&mut self, name: &EntryName) {
        self.items.retain(|item| item != name);
        self.insert_new(name.clone());
    }

    fn insert_new(&mut self, name: EntryName) {
        match self.order {
            ListOrder::Insertion => {
                if self.items.len() >= self.capacity {
                    self.items.remove(0);
                }
                self.items.push(name);
            }
            ListOrder::MostRecentFirst => {
                self.items.insert(0, name);
                self.items.truncate(self.capacity);
            }
        }
    }

    fn to_stored(&self) -> Vec<String> {
        self.items.iter().map(ToString::to_string).collect()
    }
}

/// Both preference lists plus the store they persist to.
#[derive(Debug)]
pub struct Preferences<S> {
    store: S,
    favorites: PreferenceList,
    recents: PreferenceList,
    memory_only: bool,
    pending_warning: Option<StoreError>,
}

impl<S: PreferenceStore> Preferences<S> {
    /// Loads both lists. A corrupt list starts empty (and is overwritten on the next save); an
    /// unreachable store switches to memory-only mode.
    pub fn load(store: S) -> Self {
        let mut prefs = Self {
            store,
            favorites: PreferenceList::favorites(),
            recents: PreferenceList::recents(),
            memory_only: false,
            pending_warning: None,
        };

        for key in PreferenceKey::ALL {
            match prefs.store.load(key) {
                Ok(Some(stored)) => {
                    let list = prefs.list_mut(key);
                    *list = list.clone().restored(stored);
                }
                Ok(None) => {}
                Err(err) if err.is_corrupt() => {
                    warn!(
                        key = key.as_str(),
                        error = %err,
                        "discarding unreadable preference list"
                    );
                    prefs.pending_warning.get_or_insert(err);
                }
                Err(err) => {
                    prefs.degrade(err);
                    break;
                }
            }
        }

        debug!(
            favorites = prefs.favorites.len(),
            recents = prefs.recents.len(),
            memory_only = prefs.memory_only,
            "loaded preferences"
        );
        prefs
    }

    pub fn favorites(&self) -> &PreferenceList {
        &self.favorites
    }

    pub fn recents(&self) -> &PreferenceList {
        &self.recents
    }

    pub fn is_favorite(&self, name: &EntryName) -> bool {
        self.favorites.contains(name)
    }

    /// Whether persistence has been given up for this session.
    pub fn is_memory_only(&self) -> bool {
        self.memory_only
    }

    /// The storage problem hit by the last load or mutation, if it has not been reported yet.
    pub fn take_warning(&mut self) -> Option<StoreError> {
        self.pending_warning.take()
    }

    /// Returns whether `name` is a favorite afterwards.
    pub fn toggle_favorite(&mut self, name: &EntryName) -> bool {
        let now_favorite = self.favorites.toggle(name);
        self.persist(PreferenceKey::Favorites);
        now_favorite
    }

    pub fn add_recent_search(&mut self, name: &EntryName) {
        self.recents.touch(name);
        self.persist(PreferenceKey::RecentSearches);
    }

    fn list_mut(&mut self, key: PreferenceKey) -> &mut PreferenceList {
        match key {
            PreferenceKey::Favorites => &mut self.favorites,
            PreferenceKey::RecentSearches => &mut self.recents,
        }
    }

    fn persist(&mut self, key: PreferenceKey) {
        if self.memory_only {
            return;
        }
        let values = match key {
            PreferenceKey::Favorites => self.favorites.to_stored(),
            PreferenceKey::RecentSearches => self.recents.to_stored(),
        };
        if let Err(err) = self.store.save(key, &values) {
            self.degrade(err);
        }
    }

    fn degrade(&mut self, err: StoreError) {
        warn!(error = %err, "preference storage unavailable; keeping lists in memory only");
        self.memory_only = true;
        self.pending_warning = Some(err);
    }
}
