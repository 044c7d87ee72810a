// SPDX-FileCopyrightText: 2026 Hemolink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static blood-group compatibility reference table.
//!
//! Display-only enrichment for the donor dashboard. This table is
//! medically accurate, and that is exactly why it must never feed the
//! matching engine: matching is a logistic exact-type lookup, not a
//! clinical compatibility decision.

use hemolink_core::BloodGroup;
use serde::Serialize;

use BloodGroup::*;

/// Compatibility facts for one blood group.
#[derive(Debug, Clone, Serialize)]
pub struct CompatibilityEntry {
    pub group: BloodGroup,
    /// Groups this group's blood can be given to.
    pub donate_to: &'static [BloodGroup],
    /// Groups this group can receive blood from.
    pub receive_from: &'static [BloodGroup],
    /// A short display fact.
    pub fact: &'static str,
}

const ALL: &[BloodGroup] = &[
    APositive, ANegative, BPositive, BNegative, AbPositive, AbNegative, OPositive, ONegative,
];

static TABLE: [CompatibilityEntry; 8] = [
    CompatibilityEntry {
        group: APositive,
        donate_to: &[APositive, AbPositive],
        receive_from: &[APositive, ANegative, OPositive, ONegative],
        fact: "A+ is the second most common blood group.",
    },
    CompatibilityEntry {
        group: ANegative,
        donate_to: &[APositive, ANegative, AbPositive, AbNegative],
        receive_from: &[ANegative, ONegative],
        fact: "A- red cells can go to any A or AB recipient.",
    },
    CompatibilityEntry {
        group: BPositive,
        donate_to: &[BPositive, AbPositive],
        receive_from: &[BPositive, BNegative, OPositive, ONegative],
        fact: "B+ donors can give to B+ and AB+ recipients.",
    },
    CompatibilityEntry {
        group: BNegative,
        donate_to: &[BPositive, BNegative, AbPositive, AbNegative],
        receive_from: &[BNegative, ONegative],
        fact: "B- is one of the rarest blood groups.",
    },
    CompatibilityEntry {
        group: AbPositive,
        donate_to: &[AbPositive],
        receive_from: ALL,
        fact: "AB+ is the universal recipient.",
    },
    CompatibilityEntry {
        group: AbNegative,
        donate_to: &[AbPositive, AbNegative],
        receive_from: &[AbNegative, ANegative, BNegative, ONegative],
        fact: "AB- is the rarest of the eight major groups.",
    },
    CompatibilityEntry {
        group: OPositive,
        donate_to: &[OPositive, APositive, BPositive, AbPositive],
        receive_from: &[OPositive, ONegative],
        fact: "O+ is the most common blood group.",
    },
    CompatibilityEntry {
        group: ONegative,
        donate_to: ALL,
        receive_from: &[ONegative],
        fact: "O- is the universal donor, used in emergencies.",
    },
];

/// Look up the compatibility entry for a blood group. Pure; never fails.
pub fn lookup(group: BloodGroup) -> &'static CompatibilityEntry {
    TABLE
        .iter()
        .find(|entry| entry.group == group)
        .expect("table covers all eight groups")
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_group_has_an_entry() {
        for group in BloodGroup::iter() {
            let entry = lookup(group);
            assert_eq!(entry.group, group);
            assert!(!entry.donate_to.is_empty());
            assert!(!entry.receive_from.is_empty());
            assert!(!entry.fact.is_empty());
        }
    }

    #[test]
    fn universal_donor_and_recipient() {
        assert_eq!(lookup(ONegative).donate_to.len(), 8);
        assert_eq!(lookup(ONegative).receive_from, &[ONegative]);
        assert_eq!(lookup(AbPositive).receive_from.len(), 8);
        assert_eq!(lookup(AbPositive).donate_to, &[AbPositive]);
    }

    #[test]
    fn donate_and_receive_are_mutually_consistent() {
        // If X can donate to Y, then Y must list X among its sources.
        for group in BloodGroup::iter() {
            for &recipient in lookup(group).donate_to {
                assert!(
                    lookup(recipient).receive_from.contains(&group),
                    "{group} donates to {recipient} but is not in its receive_from"
                );
            }
        }
    }

    #[test]
    fn a_group_is_always_self_compatible() {
        for group in BloodGroup::iter() {
            assert!(lookup(group).donate_to.contains(&group));
            assert!(lookup(group).receive_from.contains(&group));
        }
    }
}
