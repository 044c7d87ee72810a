// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Emergency-request matching and notification-lifecycle engine.
//!
//! Given a request descriptor, the engine selects eligible donors, creates
//! one pending notification per donor, and manages each notification
//! through its single guarded state transition. Accepting a notification
//! appends a donation-history record at most once.
//!
//! The engine is stateless above its store: every operation is an
//! independent call against the trait seams in `hemolink-core`.

use std::sync::Arc;

use hemolink_core::traits::{DonorDirectory, HistoryRecorder, NotificationStore};

pub mod compatibility;
pub mod feeds;
pub mod lifecycle;
pub mod matching;

pub use compatibility::{lookup, CompatibilityEntry};
pub use lifecycle::RespondOutcome;
pub use matching::RaiseOutcome;

/// The engine, parameterized over its storage backend.
///
/// Cheap to clone; all state lives behind the shared store.
pub struct Engine<S> {
    store: Arc<S>,
}

impl<S> Clone for Engine<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S> Engine<S>
where
    S: DonorDirectory + NotificationStore + HistoryRecorder,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}
