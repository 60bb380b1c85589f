//! Identity reconciliation
//!
//! Computes the minimal insert/delete delta between directory candidates
//! and the identity store's contents, keyed by exact email equality.

use crate::identity::{ExistingIdentity, IdentityRecord, ReconciliationResult};

/// Compute the delta between directory candidates and existing identities.
///
/// Pure function. An empty candidate list yields an empty delta: a
/// directory lookup that returned nothing must not wipe previously synced
/// identities. With candidates present, every candidate email unknown to
/// the store lands in `to_insert` (deduplicated, first seen wins) and every
/// store entry whose email no candidate carries lands in `to_delete`.
///
/// Matching is pairwise equality; identity counts are expected to be tens,
/// not thousands.
pub fn reconcile(
    candidates: &[IdentityRecord],
    existing: &[ExistingIdentity],
) -> ReconciliationResult {
    if candidates.is_empty() {
        return ReconciliationResult::empty();
    }

    let mut to_insert: Vec<IdentityRecord> = Vec::new();
    for candidate in candidates {
        let in_store = existing.iter().any(|e| e.email == candidate.email);
        let already_planned = to_insert.iter().any(|i| i.email == candidate.email);
        if !in_store && !already_planned {
            to_insert.push(candidate.clone());
        }
    }

    let to_delete = existing
        .iter()
        .filter(|e| !candidates.iter().any(|c| c.email == e.email))
        .map(|e| e.id.clone())
        .collect();

    ReconciliationResult {
        to_insert,
        to_delete,
    }
}
