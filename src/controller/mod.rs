// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pagination and search filter controller.
//!
//! The controller owns the current page, the filter state and the lazily loaded catalog index. It
//! decides what to fetch for a page in either mode (the full remote catalog, or the filtered slice
//! of the cached index) and publishes the result as [`AppEvent`]s.
//!
//! Every request takes a [`RequestToken`] when it is issued. A load whose token is no longer the
//! latest when it finishes resolves to [`PageOutcome::Superseded`] and publishes nothing, so the
//! most recent request always wins regardless of response order. Searches also carry a search
//! generation: a search term is committed unless a newer search was issued, even when a page
//! request overtook it while the index was loading.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::try_join_all;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::model::{
    clamp_page, normalize_term, total_pages, CatalogIndexEntry, EntryDetail, EntryName,
    FilterState, PageSize, PageWindow, PaginationDescriptor,
};
use crate::remote::{CatalogError, CatalogSource};
use crate::ui::StatusNotice;

mod events;

pub use events::{AppEvent, EventReceiver, EventSender};

/// Which list the current page is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingMode {
    Catalog,
    Filtered,
}

/// Everything the renderer needs for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub mode: ListingMode,
    /// Entry details in listing order.
    pub entries: Vec<EntryDetail>,
    pub pagination: PaginationDescriptor,
    /// Number of items in the current mode (catalog size or match count).
    pub item_count: usize,
    /// The normalized search term when filtering.
    pub term: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Rendered(PageView),
    /// A newer request started before this one finished.
    Superseded,
}

impl PageOutcome {
    pub fn into_view(self) -> Option<PageView> {
        match self {
            Self::Rendered(view) => Some(view),
            Self::Superseded => None,
        }
    }
}

/// Ticket for one page request, taken when the request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Ticket for a search: its page request plus its place among searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchToken {
    request: RequestToken,
    search: u64,
}

#[derive(Debug, Error)]
#[error("failed to load page {page}: {source}")]
pub struct PageLoadError {
    pub page: usize,
    #[source]
    pub source: CatalogError,
}

#[derive(Debug, Default)]
struct ControllerState {
    current_page: usize,
    total_count: Option<usize>,
    filter: FilterState,
}

impl ControllerState {
    fn item_count(&self) -> Option<usize> {
        if self.filter.active {
            Some(self.filter.matched_names.len())
        } else {
            self.total_count
        }
    }
}

enum LoadPlan {
    Catalog {
        window: PageWindow,
        total_count: Option<usize>,
    },
    Filtered {
        page: usize,
        names: Vec<EntryName>,
        match_count: usize,
        term: String,
    },
}

pub struct PageController<C> {
    source: Arc<C>,
    page_size: PageSize,
    state: Mutex<ControllerState>,
    index: OnceCell<Arc<[CatalogIndexEntry]>>,
    generation: AtomicU64,
    search_generation: AtomicU64,
    events: EventSender,
}

impl<C> std::fmt::Debug for PageController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageController")
            .field("page_size", &self.page_size)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("index_loaded", &self.index.initialized())
            .finish_non_exhaustive()
    }
}

impl<C: CatalogSource> PageController<C> {
    pub fn new(source: Arc<C>, page_size: PageSize, events: EventSender) -> Self {
        Self {
            source,
            page_size,
            state: Mutex::new(ControllerState {
                current_page: 1,
                ..ControllerState::default()
            }),
            index: OnceCell::new(),
            generation: AtomicU64::new(0),
            search_generation: AtomicU64::new(0),
            events,
        }
    }

    pub fn source(&self) -> &Arc<C> {
        &self.source
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.lock_state().current_page
    }

    pub fn total_count(&self) -> Option<usize> {
        self.lock_state().total_count
    }

    pub fn filter(&self) -> FilterState {
        self.lock_state().filter.clone()
    }

    /// Pages in the current mode; at least 1.
    pub fn total_pages(&self) -> usize {
        let item_count = self.lock_state().item_count().unwrap_or(0);
        total_pages(item_count, self.page_size)
    }

    /// The catalog index, if a search has loaded it already.
    pub fn cached_index(&self) -> Option<Arc<[CatalogIndexEntry]>> {
        self.index.get().cloned()
    }

    /// Fetches the catalog size with a one-item listing. Called once at startup.
    pub async fn fetch_total_count(&self) -> Result<usize, CatalogError> {
        let listing = self.source.list_page(0, 1).await?;
        self.lock_state().total_count = Some(listing.count);
        info!(total_count = listing.count, "catalog size");
        Ok(listing.count)
    }

    /// Loads the full catalog index on first use and returns the cached copy afterwards.
    ///
    /// Concurrent callers share a single in-flight request.
    pub async fn ensure_index(&self) -> Result<Arc<[CatalogIndexEntry]>, CatalogError> {
        let index = self
            .index
            .get_or_try_init(|| async {
                let listing = self.source.list_all().await?;
                info!(entries = listing.items.len(), "loaded catalog index");
                let mut state = self.lock_state();
                if state.total_count.is_none() {
                    state.total_count = Some(listing.count);
                }
                Ok::<_, CatalogError>(Arc::from(listing.items))
            })
            .await?;
        Ok(Arc::clone(index))
    }

    /// Takes the token for a page move or reload. Later tokens win.
    pub fn begin_request(&self) -> RequestToken {
        RequestToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Takes the token for a search. It also supersedes every earlier page request.
    pub fn begin_search(&self) -> SearchToken {
        let search = self.search_generation.fetch_add(1, Ordering::SeqCst) + 1;
        SearchToken {
            request: self.begin_request(),
            search,
        }
    }

    /// Applies a search term and loads page 1 of the resulting mode.
    ///
    /// An empty term (after trimming) clears the filter. A non-empty term filters the cached
    /// index locally; only the first search fetches the index.
    pub async fn set_search_term(&self, term: &str) -> Result<PageOutcome, PageLoadError> {
        self.set_search_term_with(self.begin_search(), term).await
    }

    /// [`Self::set_search_term`] with a token taken when the search was issued.
    pub async fn set_search_term_with(
        &self,
        token: SearchToken,
        term: &str,
    ) -> Result<PageOutcome, PageLoadError> {
        let normalized = normalize_term(term);

        let filter = if normalized.is_empty() {
            FilterState::inactive()
        } else {
            let index = match self.ensure_index().await {
                Ok(index) => index,
                Err(source) => return self.fail(token.request, 1, source),
            };
            FilterState::from_index(&normalized, &index)
        };

        let matches = filter.match_count();
        if !self.commit_filter(token, filter) {
            debug!(search = token.search, term = %normalized, "search superseded by a newer one");
            return Ok(PageOutcome::Superseded);
        }
        debug!(search = token.search, term = %normalized, matches, "search applied");

        // A page request issued meanwhile was planned against the old mode.
        let request = if self.is_current(token.request) {
            token.request
        } else {
            debug!(search = token.search, "reloading page 1 for the committed search");
            self.begin_request()
        };
        self.load_with_token(request).await
    }

    /// Moves to `requested`, clamped into `[1, total_pages]` of the current mode, and loads it.
    pub async fn go_to_page(&self, requested: usize) -> Result<PageOutcome, PageLoadError> {
        self.go_to_page_with(self.begin_request(), requested).await
    }

    pub async fn go_to_page_with(
        &self,
        token: RequestToken,
        requested: usize,
    ) -> Result<PageOutcome, PageLoadError> {
        if !self.is_current(token) {
            debug!(generation = token.0, requested, "page request superseded before it started");
            return Ok(PageOutcome::Superseded);
        }
        {
            let mut state = self.lock_state();
            let page = match state.item_count() {
                Some(count) => clamp_page(requested, total_pages(count, self.page_size)),
                None => requested.max(1),
            };
            if page != requested {
                debug!(requested, page, "clamped page request");
            }
            state.current_page = page;
        }
        self.load_with_token(token).await
    }

    /// Reloads the current page in the current mode.
    pub async fn load_current_page(&self) -> Result<PageOutcome, PageLoadError> {
        self.load_with_token(self.begin_request()).await
    }

    pub async fn load_current_page_with(
        &self,
        token: RequestToken,
    ) -> Result<PageOutcome, PageLoadError> {
        self.load_with_token(token).await
    }

    async fn load_with_token(&self, token: RequestToken) -> Result<PageOutcome, PageLoadError> {
        let plan = self.plan_load();
        let page = match &plan {
            LoadPlan::Catalog { window, .. } => window.page_number,
            LoadPlan::Filtered { page, .. } => *page,
        };

        let result = match plan {
            LoadPlan::Catalog {
                window,
                total_count,
            } => self.load_catalog_page(window, total_count).await,
            LoadPlan::Filtered {
                page,
                names,
                match_count,
                term,
            } => {
                debug!(generation = token.0, page, names = names.len(), "loading filtered page");
                try_join_all(names.iter().map(|name| self.source.get_by_name(name)))
                    .await
                    .map(|entries| PageView {
                        mode: ListingMode::Filtered,
                        entries,
                        pagination: PaginationDescriptor::new(
                            page,
                            total_pages(match_count, self.page_size),
                        ),
                        item_count: match_count,
                        term: Some(term),
                    })
            }
        };

        match result {
            Ok(view) if self.is_current(token) => {
                self.events.emit(AppEvent::PageLoaded(view.clone()));
                Ok(PageOutcome::Rendered(view))
            }
            Ok(_) => {
                debug!(generation = token.0, page, "discarding superseded page");
                Ok(PageOutcome::Superseded)
            }
            Err(source) => self.fail(token, page, source),
        }
    }

    async fn load_catalog_page(
        &self,
        mut window: PageWindow,
        known_total: Option<usize>,
    ) -> Result<PageView, CatalogError> {
        debug!(offset = window.offset(), limit = window.limit(), "loading catalog page");
        let mut listing = self.source.list_page(window.offset(), window.limit()).await?;

        let total_count = match known_total {
            Some(count) => count,
            None => {
                let mut state = self.lock_state();
                let count = *state.total_count.get_or_insert(listing.count);
                count
            }
        };

        let last_page = total_pages(total_count, self.page_size);
        if window.page_number > last_page {
            debug!(requested = window.page_number, page = last_page, "clamped page past the end");
            {
                let mut state = self.lock_state();
                if !state.filter.active && state.current_page == window.page_number {
                    state.current_page = last_page;
                }
            }
            window = PageWindow::new(last_page, self.page_size);
            listing = self.source.list_page(window.offset(), window.limit()).await?;
        }

        let entries = try_join_all(listing.items.iter().map(|entry| self.source.get_by_ref(entry)))
            .await?;
        Ok(PageView {
            mode: ListingMode::Catalog,
            entries,
            pagination: PaginationDescriptor::new(
                window.page_number,
                total_pages(total_count, self.page_size),
            ),
            item_count: total_count,
            term: None,
        })
    }

    fn plan_load(&self) -> LoadPlan {
        let state = self.lock_state();
        let window = PageWindow::new(state.current_page, self.page_size);
        if state.filter.active {
            let names = &state.filter.matched_names;
            LoadPlan::Filtered {
                page: window.page_number,
                names: names[window.range_within(names.len())].to_vec(),
                match_count: names.len(),
                term: state.filter.normalized_term.clone(),
            }
        } else {
            LoadPlan::Catalog {
                window,
                total_count: state.total_count,
            }
        }
    }

    fn fail(
        &self,
        token: RequestToken,
        page: usize,
        source: CatalogError,
    ) -> Result<PageOutcome, PageLoadError> {
        if !self.is_current(token) {
            debug!(generation = token.0, page, error = %source, "ignoring superseded failure");
            return Ok(PageOutcome::Superseded);
        }
        warn!(generation = token.0, page, error = %source, "page load failed");
        self.events.emit(AppEvent::PageFailed {
            page,
            reason: source.to_string(),
        });
        self.events
            .status(StatusNotice::error(format!("Could not load page {page}: {source}")));
        Err(PageLoadError { page, source })
    }

    /// Stores `filter` and resets to page 1 unless a newer search was issued.
    fn commit_filter(&self, token: SearchToken, filter: FilterState) -> bool {
        let mut state = self.lock_state();
        if self.search_generation.load(Ordering::SeqCst) != token.search {
            return false;
        }
        state.filter = filter;
        state.current_page = 1;
        true
    }

    fn is_current(&self, token: RequestToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }

    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests;
