// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Application state: the page controller plus the preference lists, built once at startup.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::controller::{AppEvent, EventSender, PageController, PageLoadError, PageOutcome};
use crate::model::{closest_name, EntryDetail, EntryName, PageSize};
use crate::prefs::Preferences;
use crate::remote::{CatalogError, CatalogSource};
use crate::store::PreferenceStore;
use crate::ui::StatusNotice;

pub struct DexApp<C, S> {
    controller: PageController<C>,
    prefs: Mutex<Preferences<S>>,
    events: EventSender,
}

impl<C, S> std::fmt::Debug for DexApp<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DexApp")
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

impl<C: CatalogSource, S: PreferenceStore> DexApp<C, S> {
    /// Loads the preference lists from `store` and wires everything to `events`.
    pub fn new(source: Arc<C>, store: S, page_size: PageSize, events: EventSender) -> Self {
        Self {
            controller: PageController::new(source, page_size, events.clone()),
            prefs: Mutex::new(Preferences::load(store)),
            events,
        }
    }

    pub fn controller(&self) -> &PageController<C> {
        &self.controller
    }

    /// Publishes the stored lists, fetches the catalog size and loads page 1.
    pub async fn start(&self) -> Result<PageOutcome, PageLoadError> {
        self.publish_preferences();
        if let Err(err) = self.controller.fetch_total_count().await {
            warn!(error = %err, "catalog size unavailable; using the first page listing");
        }
        self.controller.load_current_page().await
    }

    pub async fn set_search_term(&self, term: &str) -> Result<PageOutcome, PageLoadError> {
        self.controller.set_search_term(term).await
    }

    pub async fn go_to_page(&self, page: usize) -> Result<PageOutcome, PageLoadError> {
        self.controller.go_to_page(page).await
    }

    /// Looks up one entry by a user-typed name (case-insensitive).
    ///
    /// A blank name is ignored and yields `Ok(None)`. A successful lookup is recorded as a recent
    /// search; a failed one only posts a status notice.
    pub async fn show_detail(&self, raw: &str) -> Result<Option<EntryDetail>, CatalogError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let name = match EntryName::new(raw) {
            Ok(name) => name,
            Err(source) => {
                let err = CatalogError::InvalidName {
                    value: raw.trim().to_owned(),
                    source,
                };
                self.events
                    .status(StatusNotice::error(format!("\"{}\" not found", raw.trim())));
                return Err(err);
            }
        };

        match self.controller.source().get_by_name(&name).await {
            Ok(detail) => {
                info!(name = %name, id = detail.id, "showing detail");
                let recents = {
                    let mut prefs = self.lock_prefs();
                    prefs.add_recent_search(&name);
                    prefs.recents().items().to_vec()
                };
                self.events.emit(AppEvent::DetailLoaded(detail.clone()));
                self.events.emit(AppEvent::RecentsChanged(recents));
                self.report_storage_warning();
                Ok(Some(detail))
            }
            Err(err) => {
                debug!(name = %name, error = %err, "detail lookup failed");
                self.events.status(StatusNotice::error(self.lookup_failure_message(&name, &err)));
                Err(err)
            }
        }
    }

    pub fn clear_detail(&self) {
        self.events.emit(AppEvent::DetailCleared);
    }

    /// Returns whether `name` is a favorite afterwards.
    ///
    /// Adding to a full list drops the oldest favorite and says so in the status line.
    pub fn toggle_favorite(&self, name: &EntryName) -> bool {
        let (now_favorite, evicted, favorites) = {
            let mut prefs = self.lock_prefs();
            let oldest = prefs.favorites().items().first().cloned();
            let now_favorite = prefs.toggle_favorite(name);
            let evicted = oldest.filter(|oldest| now_favorite && !prefs.is_favorite(oldest));
            (now_favorite, evicted, prefs.favorites().items().to_vec())
        };
        debug!(name = %name, now_favorite, "toggled favorite");
        self.events.emit(AppEvent::FavoritesChanged(favorites));
        if let Some(evicted) = evicted {
            self.events
                .status(StatusNotice::info(format!("Favorites are full; removed {evicted}")));
        }
        self.report_storage_warning();
        now_favorite
    }

    pub fn is_favorite(&self, name: &EntryName) -> bool {
        self.lock_prefs().is_favorite(name)
    }

    /// Favorites in insertion order (oldest first).
    pub fn favorites(&self) -> Vec<EntryName> {
        self.lock_prefs().favorites().items().to_vec()
    }

    /// Recent searches, most recent first.
    pub fn recents(&self) -> Vec<EntryName> {
        self.lock_prefs().recents().items().to_vec()
    }

    pub fn preferences_memory_only(&self) -> bool {
        self.lock_prefs().is_memory_only()
    }

    fn publish_preferences(&self) {
        let (favorites, recents) = {
            let prefs = self.lock_prefs();
            (
                prefs.favorites().items().to_vec(),
                prefs.recents().items().to_vec(),
            )
        };
        self.events.emit(AppEvent::FavoritesChanged(favorites));
        self.events.emit(AppEvent::RecentsChanged(recents));
        self.report_storage_warning();
    }

    fn report_storage_warning(&self) {
        let (warning, memory_only) = {
            let mut prefs = self.lock_prefs();
            (prefs.take_warning(), prefs.is_memory_only())
        };
        let Some(err) = warning else {
            return;
        };
        let message = if memory_only {
            format!("Preferences will not be saved this session: {err}")
        } else {
            format!("Preferences were unreadable and have been reset: {err}")
        };
        self.events.status(StatusNotice::warning(message));
    }

    fn lookup_failure_message(&self, name: &EntryName, err: &CatalogError) -> String {
        if !err.is_not_found() {
            return format!("Could not load \"{name}\": {err}");
        }
        let suggestion = self
            .controller
            .cached_index()
            .and_then(|index| closest_name(&index, name.as_str()))
            .filter(|candidate| candidate != name);
        match suggestion {
            Some(candidate) => format!("\"{name}\" not found. Did you mean \"{candidate}\"?"),
            None => format!("\"{name}\" not found"),
        }
    }

    fn lock_prefs(&self) -> MutexGuard<'_, Preferences<S>> {
        self.prefs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
