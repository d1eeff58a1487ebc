// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Change notifications for the view layer.

use tokio::sync::mpsc;

use crate::controller::PageView;
use crate::model::{EntryDetail, EntryName};
use crate::ui::StatusNotice;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A page finished loading and is still the latest request.
    PageLoaded(PageView),
    /// The latest page request failed; the grid should show an explained empty state.
    PageFailed { page: usize, reason: String },
    DetailLoaded(EntryDetail),
    DetailCleared,
    FavoritesChanged(Vec<EntryName>),
    RecentsChanged(Vec<EntryName>),
    Status(StatusNotice),
}

pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

/// Sending half of the event channel. Events are dropped silently once the receiver is gone.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Option<mpsc::UnboundedSender<AppEvent>>,
}

impl EventSender {
    pub fn channel() -> (Self, EventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A sender with no subscriber, for callers that only use return values.
    pub fn disconnected() -> Self {
        Self { tx: None }
    }

    pub fn emit(&self, event: AppEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }

    pub fn status(&self, notice: StatusNotice) {
        self.emit(AppEvent::Status(notice));
    }
}
