#![forbid(unsafe_code)]

use concord_kernel_contracts::admin::AdminId;
use concord_kernel_contracts::batch::{BatchId, BatchRecordInput, BatchStatus};
use concord_kernel_contracts::update::UpdateId;
use concord_kernel_contracts::BlockHeight;
use concord_storage::repo::BatchTablesRepo;
use concord_storage::store::GovStore;

fn admin(id: &str) -> AdminId {
    AdminId::new(id).unwrap()
}

fn seeded() -> GovStore {
    GovStore::bootstrap_v1(admin("admin_owner"), BlockHeight(1)).unwrap()
}

#[test]
fn at_batch_db_01_batch_ids_are_sequential_from_one() {
    let mut s = seeded();
    let a = s
        .insert_batch_row(
            BatchRecordInput::v1(vec![UpdateId(1)], admin("admin_p"), BlockHeight(10)).unwrap(),
        )
        .unwrap();
    let b = s
        .insert_batch_row(
            BatchRecordInput::v1(
                vec![UpdateId(2), UpdateId(3)],
                admin("admin_p"),
                BlockHeight(11),
            )
            .unwrap(),
        )
        .unwrap();
    assert_eq!(a, BatchId(1));
    assert_eq!(b, BatchId(2));
}

#[test]
fn at_batch_db_02_stored_batches_are_pending_bookkeeping() {
    let mut s = seeded();
    let id = s
        .insert_batch_row(
            BatchRecordInput::v1(
                vec![UpdateId(4), UpdateId(9)],
                admin("admin_p"),
                BlockHeight(12),
            )
            .unwrap(),
        )
        .unwrap();
    let row = s.batch_record(id).unwrap();
    assert_eq!(row.status, BatchStatus::Pending);
    assert_eq!(row.update_ids, vec![UpdateId(4), UpdateId(9)]);
    assert!(s.batch_record(BatchId(99)).is_none());
}
