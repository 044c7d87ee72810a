// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read operations over hospital rows, plus the provisioning insert used
//! by the external account subsystem and test fixtures.

use hemolink_core::{HemolinkError, Hospital, HospitalId};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

/// Insert a hospital row. Hospital records are owned by the external
/// account subsystem; this exists for its provisioning path and fixtures.
pub async fn insert(
    db: &Database,
    name: &str,
    email: &str,
    phone: &str,
    location: &str,
    registration_number: &str,
) -> Result<HospitalId, HemolinkError> {
    let name = name.to_string();
    let email = email.to_string();
    let phone = phone.to_string();
    let location = location.to_string();
    let registration_number = registration_number.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO hospitals (name, email, phone, location, registration_number) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![name, email, phone, location, registration_number],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map(HospitalId)
        .map_err(map_tr_err)
}

/// Look up a hospital by id.
pub async fn get(db: &Database, id: HospitalId) -> Result<Option<Hospital>, HemolinkError> {
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT id, name, email, phone, location, registration_number \
                 FROM hospitals WHERE id = ?1",
                params![id.0],
                |row| {
                    Ok(Hospital {
                        id: HospitalId(row.get(0)?),
                        name: row.get(1)?,
                        email: row.get(2)?,
                        phone: row.get(3)?,
                        location: row.get(4)?,
                        registration_number: row.get(5)?,
                    })
                },
            );
            match result {
                Ok(hospital) => Ok(Some(hospital)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}
