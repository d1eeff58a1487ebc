// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Error handling for remote catalog operations.

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::model::NameError;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// A detail lookup for a name the source does not know (any non-success response).
    #[error("no catalog entry named '{name}'")]
    NotFound { name: String },
    #[error("{url} responded with {status}")]
    Status { url: Url, status: StatusCode },
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("cannot decode response from {url}: {source}")]
    Decode {
        url: Url,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid entry name {value:?}: {source}")]
    InvalidName {
        value: String,
        #[source]
        source: NameError,
    },
    #[error("invalid catalog url {value:?}: {reason}")]
    InvalidUrl { value: String, reason: String },
    /// Failure injected by the offline catalog (used to exercise failure paths).
    #[error("{0}")]
    Unavailable(String),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
