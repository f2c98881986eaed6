#![forbid(unsafe_code)]

use concord_kernel_contracts::admin::{AdminId, AdminRecord, AdminRole};
use concord_kernel_contracts::BlockHeight;
use concord_storage::repo::AdminTablesRepo;
use concord_storage::store::{GovStore, StorageError};

fn admin(id: &str) -> AdminId {
    AdminId::new(id).unwrap()
}

fn seeded() -> GovStore {
    GovStore::bootstrap_v1(admin("admin_owner"), BlockHeight(1)).unwrap()
}

fn member_record(id: &str, added_by: &str, height: u64) -> AdminRecord {
    AdminRecord::v1(
        admin(id),
        AdminRole::Member,
        true,
        BlockHeight(height),
        admin(added_by),
    )
    .unwrap()
}

#[test]
fn at_admin_db_01_bootstrap_seeds_active_owner() {
    let s = seeded();
    let row = s.admin_record(&admin("admin_owner")).unwrap();
    assert!(row.active);
    assert_eq!(row.role, AdminRole::Owner);
    assert_eq!(s.active_admin_total(), 1);
    assert_eq!(s.owner_id(), &admin("admin_owner"));
}

#[test]
fn at_admin_db_02_duplicate_identity_rejected() {
    let mut s = seeded();
    s.insert_admin_record(member_record("admin_p", "admin_owner", 5))
        .unwrap();
    let out = s.insert_admin_record(member_record("admin_p", "admin_owner", 6));
    assert!(matches!(out, Err(StorageError::DuplicateKey { .. })));
    assert_eq!(s.active_admin_total(), 2);
}

#[test]
fn at_admin_db_03_deactivation_retains_row_and_decrements_count() {
    let mut s = seeded();
    s.insert_admin_record(member_record("admin_p", "admin_owner", 5))
        .unwrap();
    s.deactivate_admin_record(&admin("admin_p")).unwrap();
    let row = s.admin_record(&admin("admin_p")).unwrap();
    assert!(!row.active);
    assert_eq!(s.active_admin_total(), 1);
}

#[test]
fn at_admin_db_04_double_deactivation_rejected() {
    let mut s = seeded();
    s.insert_admin_record(member_record("admin_p", "admin_owner", 5))
        .unwrap();
    s.deactivate_admin_record(&admin("admin_p")).unwrap();
    let out = s.deactivate_admin_record(&admin("admin_p"));
    assert!(matches!(out, Err(StorageError::ContractViolation(_))));
    assert_eq!(s.active_admin_total(), 1);
}

#[test]
fn at_admin_db_05_unknown_identity_is_foreign_key_violation() {
    let mut s = seeded();
    let out = s.deactivate_admin_record(&admin("admin_ghost"));
    assert!(matches!(out, Err(StorageError::ForeignKeyViolation { .. })));
}

#[test]
fn at_admin_db_06_role_authority_reads() {
    let mut s = seeded();
    s.insert_admin_record(
        AdminRecord::v1(
            admin("admin_s"),
            AdminRole::Senior,
            true,
            BlockHeight(5),
            admin("admin_owner"),
        )
        .unwrap(),
    )
    .unwrap();
    s.insert_admin_record(member_record("admin_m", "admin_s", 6))
        .unwrap();
    assert!(s.is_owner_or_senior(&admin("admin_owner")));
    assert!(s.is_owner_or_senior(&admin("admin_s")));
    assert!(!s.is_owner_or_senior(&admin("admin_m")));
    assert!(s.is_active_admin(&admin("admin_m")));
    s.deactivate_admin_record(&admin("admin_s")).unwrap();
    assert!(!s.is_owner_or_senior(&admin("admin_s")));
}
