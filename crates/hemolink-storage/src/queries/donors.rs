// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read operations over donor rows, plus the provisioning insert used by
//! the external account subsystem and test fixtures.

use std::str::FromStr;

use hemolink_core::{BloodGroup, Donor, DonorId, HemolinkError};
use rusqlite::params;

use crate::database::{map_tr_err, Database};

const DONOR_COLUMNS: &str = "id, name, email, phone, location, blood_group, date_of_birth";

/// Map a donor row. Fails if the stored blood_group is outside the eight
/// canonical values, which the schema CHECK constraint should prevent.
pub(crate) fn row_to_donor(row: &rusqlite::Row) -> Result<Donor, rusqlite::Error> {
    let group_str: String = row.get(5)?;
    let blood_group = BloodGroup::from_str(&group_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Donor {
        id: DonorId(row.get(0)?),
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        location: row.get(4)?,
        blood_group,
        date_of_birth: row.get(6)?,
    })
}

/// Donors whose stored blood group and location both equal the given
/// strings exactly. Case-sensitive; no fuzzy or compatibility matching.
pub async fn find_eligible(
    db: &Database,
    blood_group: &str,
    location: &str,
) -> Result<Vec<Donor>, HemolinkError> {
    let blood_group = blood_group.to_string();
    let location = location.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {DONOR_COLUMNS} FROM donors WHERE blood_group = ?1 AND location = ?2 ORDER BY id"
            ))?;
            let donors = stmt
                .query_map(params![blood_group, location], row_to_donor)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(donors)
        })
        .await
        .map_err(map_tr_err)
}

/// Donor search with optional exact-match filters; an absent filter
/// matches all rows. Backs the hospital dashboard's donor lookup.
pub async fn search(
    db: &Database,
    blood_group: Option<&str>,
    location: Option<&str>,
) -> Result<Vec<Donor>, HemolinkError> {
    let blood_group = blood_group.map(str::to_string);
    let location = location.map(str::to_string);
    db.connection()
        .call(move |conn| {
            let mut sql = format!("SELECT {DONOR_COLUMNS} FROM donors WHERE 1=1");
            let mut filters: Vec<String> = Vec::new();

            if let Some(group) = blood_group {
                sql.push_str(" AND blood_group = ?");
                filters.push(group);
            }
            if let Some(loc) = location {
                sql.push_str(" AND location = ?");
                filters.push(loc);
            }
            sql.push_str(" ORDER BY id");

            let mut stmt = conn.prepare(&sql)?;
            let params: Vec<&dyn rusqlite::types::ToSql> = filters
                .iter()
                .map(|f| f as &dyn rusqlite::types::ToSql)
                .collect();
            let donors = stmt
                .query_map(params.as_slice(), row_to_donor)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(donors)
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a donor row. Donor records are owned by the external account
/// subsystem; this exists for its provisioning path and for fixtures.
pub async fn insert(
    db: &Database,
    name: &str,
    email: &str,
    phone: &str,
    location: &str,
    blood_group: BloodGroup,
    date_of_birth: &str,
) -> Result<DonorId, HemolinkError> {
    let name = name.to_string();
    let email = email.to_string();
    let phone = phone.to_string();
    let location = location.to_string();
    let blood_group = blood_group.to_string();
    let date_of_birth = date_of_birth.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO donors (name, email, phone, location, blood_group, date_of_birth) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![name, email, phone, location, blood_group, date_of_birth],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map(DonorId)
        .map_err(map_tr_err)
}
