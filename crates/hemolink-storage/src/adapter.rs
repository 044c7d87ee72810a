// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the core store traits.

use async_trait::async_trait;
use hemolink_core::{
    Donor, DonorDirectory, DonorId, HemolinkError, HistoryId, HistoryRecorder, HistoryView,
    HospitalId, NewNotification, NotificationId, NotificationStatus, NotificationStore,
    NotificationView, Resolution,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed implementation of the donor directory, notification
/// store, and history recorder, all over one [`Database`].
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    /// Open (or create) storage at the given database path.
    pub async fn open(path: &str) -> Result<Self, HemolinkError> {
        Ok(Self {
            db: Database::open(path).await?,
        })
    }

    /// In-memory storage with the full schema, for tests.
    pub async fn open_in_memory() -> Result<Self, HemolinkError> {
        Ok(Self {
            db: Database::open_in_memory().await?,
        })
    }

    /// Direct access to the underlying database, for provisioning
    /// (donor/hospital inserts) and operational tooling.
    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl DonorDirectory for SqliteStorage {
    async fn find_eligible(
        &self,
        blood_group: &str,
        location: &str,
    ) -> Result<Vec<Donor>, HemolinkError> {
        queries::donors::find_eligible(&self.db, blood_group, location).await
    }

    async fn search(
        &self,
        blood_group: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<Donor>, HemolinkError> {
        queries::donors::search(&self.db, blood_group, location).await
    }

    async fn hospital_exists(&self, id: HospitalId) -> Result<bool, HemolinkError> {
        Ok(queries::hospitals::get(&self.db, id).await?.is_some())
    }
}

#[async_trait]
impl NotificationStore for SqliteStorage {
    async fn insert_pending(&self, batch: Vec<NewNotification>) -> Result<usize, HemolinkError> {
        queries::notifications::insert_pending(&self.db, batch).await
    }

    async fn resolve(
        &self,
        id: NotificationId,
        donor_id: DonorId,
        status: NotificationStatus,
    ) -> Result<Resolution, HemolinkError> {
        queries::notifications::resolve(&self.db, id, donor_id, status).await
    }

    async fn for_donor(&self, donor_id: DonorId) -> Result<Vec<NotificationView>, HemolinkError> {
        queries::notifications::for_donor(&self.db, donor_id).await
    }
}

#[async_trait]
impl HistoryRecorder for SqliteStorage {
    async fn append(
        &self,
        donor_id: DonorId,
        hospital_id: HospitalId,
    ) -> Result<HistoryId, HemolinkError> {
        queries::history::append(&self.db, donor_id, hospital_id).await
    }

    async fn for_donor(&self, donor_id: DonorId) -> Result<Vec<HistoryView>, HemolinkError> {
        queries::history::for_donor(&self.db, donor_id).await
    }
}
