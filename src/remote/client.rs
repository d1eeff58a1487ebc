// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HTTP client for the PokeAPI species resource.

use std::fmt::Debug;
use std::time::Duration;

use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::wire::{ListingPayload, PokemonPayload};
use super::{CatalogError, CatalogSource};
use crate::model::{CatalogIndexEntry, CatalogListing, EntryDetail, EntryName};

pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2/pokemon";
pub const DEFAULT_INDEX_LIMIT: usize = 100_000;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for [`PokeApiClient`] construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the species resource, e.g. `https://pokeapi.co/api/v2/pokemon`.
    pub api_url: String,
    /// Applied to every request; a request exceeding it fails with a network error.
    pub request_timeout: Duration,
    /// `limit` sent when listing the whole catalog.
    pub index_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            index_limit: DEFAULT_INDEX_LIMIT,
        }
    }
}

/// A [`CatalogSource`] backed by the PokeAPI REST endpoints.
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: Url,
    config: ClientConfig,
}

impl Debug for PokeApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PokeApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl PokeApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, CatalogError> {
        let base_url = parse_base_url(&config.api_url)?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("dexview/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    fn listing_url(&self, offset: usize, limit: usize) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        url
    }

    fn entry_url(&self, name: &EntryName) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidUrl {
                value: self.base_url.to_string(),
                reason: "cannot append a path segment".to_owned(),
            })?
            .pop_if_empty()
            .push(name.as_str());
        Ok(url)
    }

    async fn get_listing(&self, url: Url) -> Result<CatalogListing, CatalogError> {
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status { url, status });
        }
        let payload: ListingPayload = decode_json(url, response).await?;
        payload.try_into()
    }

    async fn get_detail(&self, url: Url, name: &str) -> Result<EntryDetail, CatalogError> {
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(%url, %status, "detail lookup rejected");
            return Err(CatalogError::NotFound {
                name: name.to_owned(),
            });
        }
        let payload: PokemonPayload = decode_json(url, response).await?;
        payload.try_into()
    }
}

impl CatalogSource for PokeApiClient {
    #[instrument(skip(self), level = "debug")]
    async fn list_page(&self, offset: usize, limit: usize) -> Result<CatalogListing, CatalogError> {
        let listing = self.get_listing(self.listing_url(offset, limit)).await?;
        debug!(items = listing.items.len(), count = listing.count, "received catalog page");
        Ok(listing)
    }

    #[instrument(skip(self), level = "debug")]
    async fn list_all(&self) -> Result<CatalogListing, CatalogError> {
        let listing = self
            .get_listing(self.listing_url(0, self.config.index_limit))
            .await?;
        debug!(items = listing.items.len(), count = listing.count, "received catalog index");
        Ok(listing)
    }

    #[instrument(skip(self, name), fields(name = %name), level = "debug")]
    async fn get_by_name(&self, name: &EntryName) -> Result<EntryDetail, CatalogError> {
        let url = self.entry_url(name)?;
        self.get_detail(url, name.as_str()).await
    }

    async fn get_by_ref(&self, entry: &CatalogIndexEntry) -> Result<EntryDetail, CatalogError> {
        match Url::parse(&entry.source_ref) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                self.get_detail(url, entry.name.as_str()).await
            }
            _ => self.get_by_name(&entry.name).await,
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, CatalogError> {
    let url = Url::parse(raw.trim()).map_err(|err| CatalogError::InvalidUrl {
        value: raw.to_owned(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(CatalogError::InvalidUrl {
            value: raw.to_owned(),
            reason: "url cannot be a base".to_owned(),
        });
    }
    Ok(url)
}

async fn decode_json<T: DeserializeOwned>(url: Url, response: Response) -> Result<T, CatalogError> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| CatalogError::Decode { url, source })
}
