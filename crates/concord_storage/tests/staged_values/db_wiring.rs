#![forbid(unsafe_code)]

use concord_kernel_contracts::admin::AdminId;
use concord_kernel_contracts::update::{PartyId, RecordEntry, RecordKey, StagedValue};
use concord_kernel_contracts::BlockHeight;
use concord_storage::repo::StagedValueTablesRepo;
use concord_storage::store::{sha256_hex, GovStore};

fn seeded() -> GovStore {
    GovStore::bootstrap_v1(AdminId::new("admin_owner").unwrap(), BlockHeight(1)).unwrap()
}

fn party(id: &str) -> PartyId {
    PartyId::new(id).unwrap()
}

#[test]
fn at_staged_db_01_containers_start_empty() {
    let s = seeded();
    assert_eq!(s.staged_uint_cell(), None);
    assert_eq!(s.staged_text_cell(), None);
    assert_eq!(s.staged_flag_cell(), None);
    assert!(!s.member_flag_cell(&party("party_a")));
}

#[test]
fn at_staged_db_02_each_shape_lands_in_its_own_container() {
    let mut s = seeded();
    s.apply_staged_value_row(&StagedValue::Uint(5)).unwrap();
    s.apply_staged_value_row(&StagedValue::Text("endpoint:9443".to_string()))
        .unwrap();
    s.apply_staged_value_row(&StagedValue::Flag(true)).unwrap();
    s.apply_staged_value_row(&StagedValue::Identity(party("party_a")))
        .unwrap();

    assert_eq!(s.staged_uint_cell(), Some(5));
    assert_eq!(s.staged_text_cell(), Some("endpoint:9443"));
    assert_eq!(s.staged_flag_cell(), Some(true));
    assert!(s.member_flag_cell(&party("party_a")));
    assert!(!s.member_flag_cell(&party("party_b")));
}

#[test]
fn at_staged_db_03_record_upsert_overwrites_same_key() {
    let mut s = seeded();
    let key = RecordKey::v1(party("party_a"), 3).unwrap();
    let first = RecordEntry::v1(
        "quota_profile".to_string(),
        sha256_hex(&["quota_profile", "v1"]),
    )
    .unwrap();
    let second = RecordEntry::v1(
        "quota_profile".to_string(),
        sha256_hex(&["quota_profile", "v2"]),
    )
    .unwrap();

    s.apply_staged_value_row(&StagedValue::Record {
        key: key.clone(),
        entry: first,
    })
    .unwrap();
    s.apply_staged_value_row(&StagedValue::Record {
        key: key.clone(),
        entry: second.clone(),
    })
    .unwrap();

    assert_eq!(s.record_cell(&key), Some(&second));
    let other_key = RecordKey::v1(party("party_a"), 4).unwrap();
    assert_eq!(s.record_cell(&other_key), None);
}

#[test]
fn at_staged_db_04_content_digest_is_64_char_lowercase_hex() {
    let hex = sha256_hex(&["quota_profile", "v1"]);
    assert_eq!(hex.len(), 64);
    assert!(hex
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    assert_ne!(hex, sha256_hex(&["quota_profile", "v2"]));
    // Delimited hashing: moving a boundary must change the digest.
    assert_ne!(sha256_hex(&["ab", "c"]), sha256_hex(&["a", "bc"]));
}
