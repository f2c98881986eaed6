#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use concord_kernel_contracts::admin::{AdminId, AdminRecord};
use concord_kernel_contracts::audit::{AuditEntry, AuditEntryId, AuditEntryInput};
use concord_kernel_contracts::batch::{BatchId, BatchRecord, BatchRecordInput};
use concord_kernel_contracts::config::EngineConfig;
use concord_kernel_contracts::update::{
    PartyId, PendingUpdate, PendingUpdateInput, RecordEntry, RecordKey, StagedValue, UpdateId,
};
use concord_kernel_contracts::BlockHeight;

use crate::store::{GovStore, StorageError};

/// Typed repository interface for the authorized-party table.
pub trait AdminTablesRepo {
    fn insert_admin_record(&mut self, record: AdminRecord) -> Result<(), StorageError>;
    fn deactivate_admin_record(&mut self, admin_id: &AdminId) -> Result<(), StorageError>;
    fn admin_record(&self, admin_id: &AdminId) -> Option<&AdminRecord>;
    fn active_admin_total(&self) -> u32;
}

/// Typed repository interface for the pending-update ledger and its
/// active/time-lock indexes.
pub trait UpdateLedgerTablesRepo {
    fn insert_pending_update_row(
        &mut self,
        input: PendingUpdateInput,
    ) -> Result<UpdateId, StorageError>;
    fn append_confirmation_row(
        &mut self,
        update_id: UpdateId,
        confirmer: AdminId,
    ) -> Result<u32, StorageError>;
    fn retire_update_row(&mut self, update_id: UpdateId) -> Result<(), StorageError>;
    fn pending_update(&self, update_id: UpdateId) -> Option<&PendingUpdate>;
    fn active_update_index(&self) -> &BTreeSet<UpdateId>;
    fn time_lock_deadline_row(&self, update_id: UpdateId) -> Option<BlockHeight>;
}

/// Typed repository interface for append-only audit persistence.
pub trait AuditLedgerRepo {
    fn append_audit_row(&mut self, input: AuditEntryInput) -> Result<AuditEntryId, StorageError>;
    fn audit_rows(&self) -> &[AuditEntry];
    fn audit_row(&self, entry_id: AuditEntryId) -> Option<&AuditEntry>;
}

/// Typed repository interface for the five staged-value containers.
pub trait StagedValueTablesRepo {
    fn apply_staged_value_row(&mut self, value: &StagedValue) -> Result<(), StorageError>;
    fn staged_uint_cell(&self) -> Option<u64>;
    fn staged_text_cell(&self) -> Option<&str>;
    fn staged_flag_cell(&self) -> Option<bool>;
    fn member_flag_cell(&self, party: &PartyId) -> bool;
    fn record_cell(&self, key: &RecordKey) -> Option<&RecordEntry>;
}

/// Typed repository interface for the batch table.
pub trait BatchTablesRepo {
    fn insert_batch_row(&mut self, input: BatchRecordInput) -> Result<BatchId, StorageError>;
    fn batch_record(&self, batch_id: BatchId) -> Option<&BatchRecord>;
}

/// Typed repository interface for the configuration record.
pub trait ConfigTableRepo {
    fn config_row(&self) -> &EngineConfig;
    fn update_config_row(&mut self, config: EngineConfig) -> Result<(), StorageError>;
}

impl AdminTablesRepo for GovStore {
    fn insert_admin_record(&mut self, record: AdminRecord) -> Result<(), StorageError> {
        self.insert_admin_row(record)
    }

    fn deactivate_admin_record(&mut self, admin_id: &AdminId) -> Result<(), StorageError> {
        self.deactivate_admin_row(admin_id)
    }

    fn admin_record(&self, admin_id: &AdminId) -> Option<&AdminRecord> {
        self.admin_row(admin_id)
    }

    fn active_admin_total(&self) -> u32 {
        self.active_admin_count()
    }
}

impl UpdateLedgerTablesRepo for GovStore {
    fn insert_pending_update_row(
        &mut self,
        input: PendingUpdateInput,
    ) -> Result<UpdateId, StorageError> {
        self.insert_pending_update(input)
    }

    fn append_confirmation_row(
        &mut self,
        update_id: UpdateId,
        confirmer: AdminId,
    ) -> Result<u32, StorageError> {
        self.append_confirmation(update_id, confirmer)
    }

    fn retire_update_row(&mut self, update_id: UpdateId) -> Result<(), StorageError> {
        self.retire_update(update_id)
    }

    fn pending_update(&self, update_id: UpdateId) -> Option<&PendingUpdate> {
        self.pending_update_row(update_id)
    }

    fn active_update_index(&self) -> &BTreeSet<UpdateId> {
        self.active_update_ids()
    }

    fn time_lock_deadline_row(&self, update_id: UpdateId) -> Option<BlockHeight> {
        self.time_lock_deadline(update_id)
    }
}

impl AuditLedgerRepo for GovStore {
    fn append_audit_row(&mut self, input: AuditEntryInput) -> Result<AuditEntryId, StorageError> {
        self.append_audit_entry(input)
    }

    fn audit_rows(&self) -> &[AuditEntry] {
        self.audit_entries()
    }

    fn audit_row(&self, entry_id: AuditEntryId) -> Option<&AuditEntry> {
        self.audit_entry_row(entry_id)
    }
}

impl StagedValueTablesRepo for GovStore {
    fn apply_staged_value_row(&mut self, value: &StagedValue) -> Result<(), StorageError> {
        self.apply_staged_value(value)
    }

    fn staged_uint_cell(&self) -> Option<u64> {
        self.staged_uint()
    }

    fn staged_text_cell(&self) -> Option<&str> {
        self.staged_text()
    }

    fn staged_flag_cell(&self) -> Option<bool> {
        self.staged_flag()
    }

    fn member_flag_cell(&self, party: &PartyId) -> bool {
        self.member_flag(party)
    }

    fn record_cell(&self, key: &RecordKey) -> Option<&RecordEntry> {
        self.record_row(key)
    }
}

impl BatchTablesRepo for GovStore {
    fn insert_batch_row(&mut self, input: BatchRecordInput) -> Result<BatchId, StorageError> {
        self.insert_batch(input)
    }

    fn batch_record(&self, batch_id: BatchId) -> Option<&BatchRecord> {
        self.batch_row(batch_id)
    }
}

impl ConfigTableRepo for GovStore {
    fn config_row(&self) -> &EngineConfig {
        self.config()
    }

    fn update_config_row(&mut self, config: EngineConfig) -> Result<(), StorageError> {
        self.update_config(config)
    }
}
