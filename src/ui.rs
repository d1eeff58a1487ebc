// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Transient status line shared by the renderer and the one-shot commands.
//!
//! A notice stays visible until its time-to-live runs out or a newer notice replaces it.

use std::time::{Duration, Instant};

pub const DEFAULT_STATUS_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNotice {
    pub kind: StatusKind,
    pub message: String,
}

impl StatusNotice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusBoard {
    ttl: Duration,
    current: Option<(StatusNotice, Instant)>,
}

impl StatusBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            current: None,
        }
    }

    pub fn post(&mut self, notice: StatusNotice) {
        self.post_at(notice, Instant::now());
    }

    pub fn post_at(&mut self, notice: StatusNotice, now: Instant) {
        self.current = Some((notice, now + self.ttl));
    }

    pub fn current(&self) -> Option<&StatusNotice> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&StatusNotice> {
        match &self.current {
            Some((notice, expires_at)) if now < *expires_at => Some(notice),
            _ => None,
        }
    }

    /// Drops an expired notice. Returns `true` if something was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        let expired = matches!(&self.current, Some((_, expires_at)) if now >= *expires_at);
        if expired {
            self.current = None;
        }
        expired
    }
}
