// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

/// The canonical name of one catalog entry.
///
/// Names are stored normalized (trimmed, lowercase) so that user-typed lookups, the catalog index
/// and the persisted preference lists all compare equal. A name is used as a single URL path
/// segment by the remote client, so it must be non-empty and must not contain `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryName {
    value: SmolStr,
}

impl EntryName {
    pub fn new(value: impl AsRef<str>) -> Result<Self, NameError> {
        let value = normalize_term(value.as_ref());
        validate_name(&value)?;
        Ok(Self {
            value: SmolStr::new(value),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Whether this name contains an already-normalized search term.
    pub fn contains_term(&self, normalized_term: &str) -> bool {
        self.value.contains(normalized_term)
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for EntryName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for EntryName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for EntryName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EntryName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntryName> for String {
    fn from(name: EntryName) -> Self {
        name.value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("entry name must not be empty")]
    Empty,
    #[error("entry name must not contain '/'")]
    ContainsSlash,
}

/// Trims and lowercases a user-supplied term.
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn validate_name(value: &str) -> Result<(), NameError> {
    if value.is_empty() {
        return Err(NameError::Empty);
    }
    if value.contains('/') {
        return Err(NameError::ContainsSlash);
    }
    Ok(())
}
