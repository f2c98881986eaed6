#![forbid(unsafe_code)]

use concord_kernel_contracts::admin::AdminId;
use concord_kernel_contracts::update::{PendingUpdateInput, StagedValue, UpdateId};
use concord_kernel_contracts::BlockHeight;
use concord_storage::repo::UpdateLedgerTablesRepo;
use concord_storage::store::{GovStore, StorageError};

fn admin(id: &str) -> AdminId {
    AdminId::new(id).unwrap()
}

fn seeded() -> GovStore {
    GovStore::bootstrap_v1(admin("admin_owner"), BlockHeight(1)).unwrap()
}

fn proposal(
    value: StagedValue,
    proposer: &str,
    created_at: u64,
    time_lock_ends: Option<u64>,
) -> PendingUpdateInput {
    PendingUpdateInput::v1(
        value,
        admin(proposer),
        BlockHeight(created_at),
        BlockHeight(created_at + 1_440),
        time_lock_ends.map(BlockHeight),
        0,
        "staged config change".to_string(),
        None,
    )
    .unwrap()
}

#[test]
fn at_ledger_db_01_update_ids_are_sequential_from_one() {
    let mut s = seeded();
    let a = s
        .insert_pending_update_row(proposal(StagedValue::Uint(5), "admin_p", 1_000, None))
        .unwrap();
    let b = s
        .insert_pending_update_row(proposal(StagedValue::Flag(true), "admin_p", 1_001, None))
        .unwrap();
    assert_eq!(a, UpdateId(1));
    assert_eq!(b, UpdateId(2));
}

#[test]
fn at_ledger_db_02_insert_populates_active_and_time_lock_indexes() {
    let mut s = seeded();
    let id = s
        .insert_pending_update_row(proposal(
            StagedValue::Uint(5),
            "admin_p",
            1_000,
            Some(1_100),
        ))
        .unwrap();
    assert!(s.active_update_index().contains(&id));
    assert_eq!(s.time_lock_deadline_row(id), Some(BlockHeight(1_100)));

    let unlocked = s
        .insert_pending_update_row(proposal(StagedValue::Flag(true), "admin_p", 1_000, None))
        .unwrap();
    assert_eq!(s.time_lock_deadline_row(unlocked), None);
}

#[test]
fn at_ledger_db_03_confirmation_append_counts_and_dedupes() {
    let mut s = seeded();
    let id = s
        .insert_pending_update_row(proposal(StagedValue::Uint(5), "admin_p", 1_000, None))
        .unwrap();
    let count = s.append_confirmation_row(id, admin("admin_q")).unwrap();
    assert_eq!(count, 2);
    let dup = s.append_confirmation_row(id, admin("admin_q"));
    assert!(matches!(dup, Err(StorageError::DuplicateKey { .. })));
    assert_eq!(s.pending_update(id).unwrap().confirmation_count(), 2);
}

#[test]
fn at_ledger_db_04_confirmer_capacity_is_enforced() {
    let mut s = seeded();
    let id = s
        .insert_pending_update_row(proposal(StagedValue::Uint(5), "admin_p", 1_000, None))
        .unwrap();
    for i in 0..9 {
        s.append_confirmation_row(id, admin(&format!("admin_q{i}")))
            .unwrap();
    }
    let overflow = s.append_confirmation_row(id, admin("admin_overflow"));
    assert!(matches!(overflow, Err(StorageError::ContractViolation(_))));
}

#[test]
fn at_ledger_db_05_retire_drops_indexes_but_retains_record() {
    let mut s = seeded();
    let id = s
        .insert_pending_update_row(proposal(
            StagedValue::Uint(5),
            "admin_p",
            1_000,
            Some(1_100),
        ))
        .unwrap();
    s.retire_update_row(id).unwrap();
    assert!(!s.active_update_index().contains(&id));
    assert_eq!(s.time_lock_deadline_row(id), None);
    assert!(s.pending_update(id).is_some());

    let again = s.retire_update_row(id);
    assert!(matches!(again, Err(StorageError::ForeignKeyViolation { .. })));
}

#[test]
fn at_ledger_db_06_unknown_update_is_foreign_key_violation() {
    let mut s = seeded();
    let out = s.append_confirmation_row(UpdateId(99), admin("admin_q"));
    assert!(matches!(out, Err(StorageError::ForeignKeyViolation { .. })));
}
