#![forbid(unsafe_code)]

use concord_kernel_contracts::admin::AdminId;
use concord_kernel_contracts::audit::{AuditAction, AuditEntryId, AuditEntryInput};
use concord_kernel_contracts::update::UpdateId;
use concord_kernel_contracts::BlockHeight;
use concord_storage::repo::AuditLedgerRepo;
use concord_storage::store::{GovStore, StorageError};

fn admin(id: &str) -> AdminId {
    AdminId::new(id).unwrap()
}

fn seeded() -> GovStore {
    GovStore::bootstrap_v1(admin("admin_owner"), BlockHeight(1)).unwrap()
}

fn entry(action: AuditAction, update_id: Option<u64>, height: u64, detail: &str) -> AuditEntryInput {
    AuditEntryInput::v1(
        action,
        admin("admin_p"),
        update_id.map(UpdateId),
        BlockHeight(height),
        detail.to_string(),
    )
    .unwrap()
}

#[test]
fn at_audit_db_01_entry_ids_are_sequential_from_one() {
    let mut s = seeded();
    let a = s
        .append_audit_row(entry(
            AuditAction::ProposalCreated,
            Some(1),
            1_000,
            "uint proposal staged",
        ))
        .unwrap();
    let b = s
        .append_audit_row(entry(
            AuditAction::UpdateConfirmed,
            Some(1),
            1_010,
            "second confirmation",
        ))
        .unwrap();
    assert_eq!(a, AuditEntryId(1));
    assert_eq!(b, AuditEntryId(2));
    assert_eq!(s.audit_rows().len(), 2);
}

#[test]
fn at_audit_db_02_lookup_by_id_round_trips() {
    let mut s = seeded();
    let id = s
        .append_audit_row(entry(
            AuditAction::UpdateExecuted,
            Some(3),
            1_020,
            "uint cell written",
        ))
        .unwrap();
    let row = s.audit_row(id).unwrap();
    assert_eq!(row.action, AuditAction::UpdateExecuted);
    assert_eq!(row.update_id, Some(UpdateId(3)));
    assert!(s.audit_row(AuditEntryId(99)).is_none());
    assert!(s.audit_row(AuditEntryId(0)).is_none());
}

#[test]
fn at_audit_db_03_append_only_enforced() {
    let mut s = seeded();
    let id = s
        .append_audit_row(entry(
            AuditAction::EnginePaused,
            None,
            1_030,
            "pause engaged",
        ))
        .unwrap();
    assert!(matches!(
        s.attempt_overwrite_audit_entry(id),
        Err(StorageError::AppendOnlyViolation { .. })
    ));
    assert_eq!(s.audit_rows().len(), 1);
}
