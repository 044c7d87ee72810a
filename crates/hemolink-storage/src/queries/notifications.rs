// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification rows and the guarded status transition.

use std::str::FromStr;

use hemolink_core::{
    DonorId, HemolinkError, HospitalId, NewNotification, NotificationId, NotificationStatus,
    NotificationView, Resolution,
};
use rusqlite::params;
use tracing::{debug, info};

use crate::database::{map_tr_err, Database};

/// Insert a batch of pending notifications, one row per eligible donor.
///
/// Deliberately not wrapped in a transaction: partial completion on
/// storage failure is acceptable, and the caller observes how many rows
/// made it via the returned count.
pub async fn insert_pending(
    db: &Database,
    batch: Vec<NewNotification>,
) -> Result<usize, HemolinkError> {
    if batch.is_empty() {
        return Ok(0);
    }
    let inserted = db
        .connection()
        .call(move |conn| {
            let mut inserted = 0usize;
            for item in &batch {
                conn.execute(
                    "INSERT INTO notifications (donor_id, hospital_id, message) \
                     VALUES (?1, ?2, ?3)",
                    params![item.donor_id.0, item.hospital_id.0, item.message],
                )?;
                inserted += 1;
            }
            Ok(inserted)
        })
        .await
        .map_err(map_tr_err)?;

    info!(inserted, "pending notifications inserted");
    Ok(inserted)
}

/// Compare-and-set transition: pending -> accepted | rejected.
///
/// The UPDATE is conditioned on the row currently being pending AND
/// belonging to the donor; zero changed rows means the transition did not
/// happen. A follow-up read inside the same transaction distinguishes
/// "already resolved" from "no such notification for this donor". The
/// whole closure runs on the single writer thread, so exactly one of two
/// concurrent callers observes a changed row.
pub async fn resolve(
    db: &Database,
    id: NotificationId,
    donor_id: DonorId,
    status: NotificationStatus,
) -> Result<Resolution, HemolinkError> {
    let status_str = status.to_string();
    let resolution = db
        .connection()
        .call(move |conn| {
            let tx = conn.transaction()?;

            let changed = tx.execute(
                "UPDATE notifications \
                 SET status = ?1, resolved_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') \
                 WHERE id = ?2 AND donor_id = ?3 AND status = 'pending'",
                params![status_str, id.0, donor_id.0],
            )?;

            let resolution = if changed == 1 {
                let hospital_id: i64 = tx.query_row(
                    "SELECT hospital_id FROM notifications WHERE id = ?1",
                    params![id.0],
                    |row| row.get(0),
                )?;
                Resolution::Applied {
                    hospital_id: HospitalId(hospital_id),
                }
            } else {
                let existing = tx.query_row(
                    "SELECT status FROM notifications WHERE id = ?1 AND donor_id = ?2",
                    params![id.0, donor_id.0],
                    |row| row.get::<_, String>(0),
                );
                match existing {
                    Ok(_) => Resolution::AlreadyResolved,
                    Err(rusqlite::Error::QueryReturnedNoRows) => Resolution::NotFound,
                    Err(e) => return Err(e.into()),
                }
            };

            tx.commit()?;
            Ok(resolution)
        })
        .await
        .map_err(map_tr_err)?;

    debug!(
        notification_id = id.0,
        donor_id = donor_id.0,
        status = %status,
        ?resolution,
        "notification transition attempted"
    );
    Ok(resolution)
}

/// All notifications for a donor, most recent first, with the hospital
/// name joined in for display.
pub async fn for_donor(
    db: &Database,
    donor_id: DonorId,
) -> Result<Vec<NotificationView>, HemolinkError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT n.id, h.name, n.message, n.status, n.created_at \
                 FROM notifications n JOIN hospitals h ON h.id = n.hospital_id \
                 WHERE n.donor_id = ?1 \
                 ORDER BY n.created_at DESC, n.id DESC",
            )?;
            let views = stmt
                .query_map(params![donor_id.0], |row| {
                    let status_str: String = row.get(3)?;
                    let status = NotificationStatus::from_str(&status_str).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            3,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?;
                    Ok(NotificationView {
                        id: NotificationId(row.get(0)?),
                        hospital_name: row.get(1)?,
                        message: row.get(2)?,
                        status,
                        created_at: row.get(4)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(views)
        })
        .await
        .map_err(map_tr_err)
}

/// Current status of a notification, regardless of owner. Operational
/// helper; the lifecycle itself only ever goes through [`resolve`].
pub async fn status_of(
    db: &Database,
    id: NotificationId,
) -> Result<Option<NotificationStatus>, HemolinkError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT status FROM notifications WHERE id = ?1",
                params![id.0],
                |row| row.get::<_, String>(0),
            );
            match result {
                Ok(s) => {
                    let status = NotificationStatus::from_str(&s).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            0,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?;
                    Ok(Some(status))
                }
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
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

    async fn insert_one(db: &Database, donor: DonorId, hospital: HospitalId) -> NotificationId {
        let count = insert_pending(
            db,
            vec![NewNotification {
                donor_id: donor,
                hospital_id: hospital,
                message: "Urgent need".to_string(),
            }],
        )
        .await
        .unwrap();
        assert_eq!(count, 1);
        let views = for_donor(db, donor).await.unwrap();
        views[0].id
    }

    #[tokio::test]
    async fn inserted_notifications_start_pending() {
        let (db, donor, hospital) = setup_db().await;
        let id = insert_one(&db, donor, hospital).await;
        assert_eq!(
            status_of(&db, id).await.unwrap(),
            Some(NotificationStatus::Pending)
        );
    }

    #[tokio::test]
    async fn resolve_applies_once_and_reports_already_resolved_after() {
        let (db, donor, hospital) = setup_db().await;
        let id = insert_one(&db, donor, hospital).await;

        let first = resolve(&db, id, donor, NotificationStatus::Accepted)
            .await
            .unwrap();
        assert_eq!(first, Resolution::Applied { hospital_id: hospital });

        let second = resolve(&db, id, donor, NotificationStatus::Rejected)
            .await
            .unwrap();
        assert_eq!(second, Resolution::AlreadyResolved);

        assert_eq!(
            status_of(&db, id).await.unwrap(),
            Some(NotificationStatus::Accepted)
        );
    }

    #[tokio::test]
    async fn resolve_for_wrong_donor_is_not_found() {
        let (db, donor, hospital) = setup_db().await;
        let other = donors::insert(
            &db,
            "Evan",
            "evan@example.com",
            "555-0102",
            "Springfield",
            BloodGroup::ONegative,
            "1985-11-20",
        )
        .await
        .unwrap();
        let id = insert_one(&db, donor, hospital).await;

        let result = resolve(&db, id, other, NotificationStatus::Accepted)
            .await
            .unwrap();
        assert_eq!(result, Resolution::NotFound);

        // The guarded write must not have touched the row.
        assert_eq!(
            status_of(&db, id).await.unwrap(),
            Some(NotificationStatus::Pending)
        );
    }

    #[tokio::test]
    async fn resolve_unknown_id_is_not_found() {
        let (db, donor, _hospital) = setup_db().await;
        let result = resolve(&db, NotificationId(9999), donor, NotificationStatus::Accepted)
            .await
            .unwrap();
        assert_eq!(result, Resolution::NotFound);
    }

    #[tokio::test]
    async fn concurrent_resolves_yield_exactly_one_applied() {
        let (db, donor, hospital) = setup_db().await;
        let id = insert_one(&db, donor, hospital).await;

        let db = std::sync::Arc::new(db);
        let mut handles = Vec::new();
        for status in [NotificationStatus::Accepted, NotificationStatus::Rejected] {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                resolve(&db, id, donor, status).await.unwrap()
            }));
        }

        let mut applied = 0;
        let mut already = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Resolution::Applied { .. } => applied += 1,
                Resolution::AlreadyResolved => already += 1,
                Resolution::NotFound => panic!("notification exists"),
            }
        }
        assert_eq!(applied, 1);
        assert_eq!(already, 1);
    }

    #[tokio::test]
    async fn for_donor_orders_by_recency() {
        let (db, donor, hospital) = setup_db().await;
        for msg in ["first", "second", "third"] {
            insert_pending(
                &db,
                vec![NewNotification {
                    donor_id: donor,
                    hospital_id: hospital,
                    message: msg.to_string(),
                }],
            )
            .await
            .unwrap();
        }

        let views = for_donor(&db, donor).await.unwrap();
        assert_eq!(views.len(), 3);
        // Identical timestamps fall back to id DESC, so insertion order reverses.
        assert_eq!(views[0].message, "third");
        assert_eq!(views[2].message, "first");
        assert_eq!(views[0].hospital_name, "Springfield General");
    }
}
