// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only donation history.

use hemolink_core::{DonorId, HemolinkError, HistoryId, HistoryView, HospitalId};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// Append one donation record with the current timestamp.
///
/// Rows are immutable once written; repeated acceptances each get their
/// own row, never deduplicated.
pub async fn append(
    db: &Database,
    donor_id: DonorId,
    hospital_id: HospitalId,
) -> Result<HistoryId, HemolinkError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO donation_history (donor_id, hospital_id) VALUES (?1, ?2)",
                params![donor_id.0, hospital_id.0],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map(HistoryId)
        .map_err(map_tr_err)
}

/// All donation records for a donor, most recent first, with the hospital
/// name joined in for display.
pub async fn for_donor(db: &Database, donor_id: DonorId) -> Result<Vec<HistoryView>, HemolinkError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT d.id, h.name, d.donation_date \
                 FROM donation_history d JOIN hospitals h ON h.id = d.hospital_id \
                 WHERE d.donor_id = ?1 \
                 ORDER BY d.donation_date DESC, d.id DESC",
            )?;
            let views = stmt
                .query_map(params![donor_id.0], |row| {
                    Ok(HistoryView {
                        id: HistoryId(row.get(0)?),
                        hospital_name: row.get(1)?,
                        donation_date: row.get(2)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(views)
        })
        .await
        .map_err(map_tr_err)
}

/// Number of history rows for a donor.
pub async fn count_for_donor(db: &Database, donor_id: DonorId) -> Result<i64, HemolinkError> {
    db.connection()
        .call(move |conn| {
            let n = conn.query_row(
                "SELECT COUNT(*) FROM donation_history WHERE donor_id = ?1",
                params![donor_id.0],
                |row| row.get(0),
            )?;
            Ok(n)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use hemolink_core::BloodGroup;

    use super::*;
    use crate::queries::{donors, hospitals};

    async fn setup_db() -> (Database, DonorId, HospitalId) {
        let db = Database::open_in_memory().await.unwrap();
        let donor = donors::insert(
            &db,
            "Dana",
            "dana@example.com",
            "555-0101",
            "Springfield",
            BloodGroup::ONegative,
            "1990-04-02",
        )
        .await
        .unwrap();
        let hospital = hospitals::insert(
            &db,
            "Springfield General",
            "ops@sgh.example.com",
            "555-0200",
            "Springfield",
            "REG-77",
        )
        .await
        .unwrap();
        (db, donor, hospital)
    }

    #[tokio::test]
    async fn append_and_list() {
        let (db, donor, hospital) = setup_db().await;

        let id = append(&db, donor, hospital).await.unwrap();
        assert!(id.0 > 0);

        let rows = for_donor(&db, donor).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hospital_name, "Springfield General");
        assert!(!rows[0].donation_date.is_empty());
    }

    #[tokio::test]
    async fn repeated_acceptances_each_get_a_row() {
        let (db, donor, hospital) = setup_db().await;

        append(&db, donor, hospital).await.unwrap();
        append(&db, donor, hospital).await.unwrap();

        assert_eq!(count_for_donor(&db, donor).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn list_for_donor_without_history_is_empty() {
        let (db, donor, _hospital) = setup_db().await;
        assert!(for_donor(&db, donor).await.unwrap().is_empty());
    }
}
