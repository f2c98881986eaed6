#![forbid(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use concord_kernel_contracts::admin::{AdminId, AdminRecord, AdminRole};
use concord_kernel_contracts::audit::{AuditEntry, AuditEntryId, AuditEntryInput};
use concord_kernel_contracts::batch::{BatchId, BatchRecord, BatchRecordInput};
use concord_kernel_contracts::config::EngineConfig;
use concord_kernel_contracts::update::{
    PartyId, PendingUpdate, PendingUpdateInput, RecordEntry, RecordKey, StagedValue, UpdateId,
    MAX_CONFIRMATIONS,
};
use concord_kernel_contracts::{BlockHeight, ContractViolation, Validate};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    ForeignKeyViolation { table: &'static str, key: String },
    DuplicateKey { table: &'static str, key: String },
    AppendOnlyViolation { table: &'static str },
    ContractViolation(ContractViolation),
}

impl From<ContractViolation> for StorageError {
    fn from(v: ContractViolation) -> Self {
        StorageError::ContractViolation(v)
    }
}

/// Deterministic content digest for record entries and export payloads.
/// Parts are delimiter-separated to avoid concatenation ambiguity.
pub fn sha256_hex(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([b'|']);
    }
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(64);
    for byte in digest {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

/// The whole persisted state surface, in memory: authorized-party table,
/// pending-update ledger with its active and time-lock indexes, append-only
/// audit log, batch table, the five staged-value containers, and the
/// configuration record. Store methods are mechanical (contract validation,
/// key uniqueness, sequential ID assignment, append-only enforcement);
/// authorization and gate ordering belong to the runtimes above.
#[derive(Debug, Clone)]
pub struct GovStore {
    owner_id: AdminId,
    admins: BTreeMap<AdminId, AdminRecord>,
    active_admin_count: u32,

    pending_updates: BTreeMap<UpdateId, PendingUpdate>,
    active_index: BTreeSet<UpdateId>,
    time_lock_index: BTreeMap<UpdateId, BlockHeight>,
    next_update_id: u64,

    audit_log: Vec<AuditEntry>,
    next_audit_entry_id: u64,

    staged_uint: Option<u64>,
    staged_text: Option<String>,
    staged_flag: Option<bool>,
    member_flags: BTreeMap<PartyId, bool>,
    records: BTreeMap<RecordKey, RecordEntry>,

    batches: BTreeMap<BatchId, BatchRecord>,
    next_batch_id: u64,

    config: EngineConfig,
}

impl GovStore {
    /// Seeds the immutable bootstrap owner and default configuration.
    pub fn bootstrap_v1(
        owner_id: AdminId,
        genesis_height: BlockHeight,
    ) -> Result<Self, StorageError> {
        let owner_record = AdminRecord::v1(
            owner_id.clone(),
            AdminRole::Owner,
            true,
            genesis_height,
            owner_id.clone(),
        )?;
        let mut admins = BTreeMap::new();
        admins.insert(owner_id.clone(), owner_record);
        Ok(Self {
            owner_id,
            admins,
            active_admin_count: 1,
            pending_updates: BTreeMap::new(),
            active_index: BTreeSet::new(),
            time_lock_index: BTreeMap::new(),
            next_update_id: 1,
            audit_log: Vec::new(),
            next_audit_entry_id: 1,
            staged_uint: None,
            staged_text: None,
            staged_flag: None,
            member_flags: BTreeMap::new(),
            records: BTreeMap::new(),
            batches: BTreeMap::new(),
            next_batch_id: 1,
            config: EngineConfig::bootstrap_v1(),
        })
    }

    // ------------------------
    // Authorized-party table.
    // ------------------------

    pub fn owner_id(&self) -> &AdminId {
        &self.owner_id
    }

    pub fn admin_row(&self, admin_id: &AdminId) -> Option<&AdminRecord> {
        self.admins.get(admin_id)
    }

    pub fn is_active_admin(&self, admin_id: &AdminId) -> bool {
        self.admins.get(admin_id).map_or(false, |row| row.active)
    }

    pub fn is_owner_or_senior(&self, admin_id: &AdminId) -> bool {
        self.admins
            .get(admin_id)
            .map_or(false, |row| row.active && row.role.is_owner_or_senior())
    }

    pub fn active_admin_count(&self) -> u32 {
        self.active_admin_count
    }

    pub fn insert_admin_row(&mut self, record: AdminRecord) -> Result<(), StorageError> {
        record.validate()?;
        if self.admins.contains_key(&record.admin_id) {
            return Err(StorageError::DuplicateKey {
                table: "admins",
                key: record.admin_id.as_str().to_string(),
            });
        }
        if record.active {
            self.active_admin_count = self.active_admin_count.saturating_add(1);
        }
        self.admins.insert(record.admin_id.clone(), record);
        Ok(())
    }

    /// Records are retained; only the active flag flips.
    pub fn deactivate_admin_row(&mut self, admin_id: &AdminId) -> Result<(), StorageError> {
        let row = self
            .admins
            .get_mut(admin_id)
            .ok_or_else(|| StorageError::ForeignKeyViolation {
                table: "admins",
                key: admin_id.as_str().to_string(),
            })?;
        if !row.active {
            return Err(StorageError::ContractViolation(
                ContractViolation::InvalidValue {
                    field: "admin_record.active",
                    reason: "already inactive",
                },
            ));
        }
        row.active = false;
        self.active_admin_count = self.active_admin_count.saturating_sub(1);
        Ok(())
    }

    // ------------------------
    // Pending-update ledger + active/time-lock indexes.
    // ------------------------

    pub fn insert_pending_update(
        &mut self,
        input: PendingUpdateInput,
    ) -> Result<UpdateId, StorageError> {
        let update_id = UpdateId(self.next_update_id);
        let record = PendingUpdate::from_input_v1(update_id, input)?;
        self.next_update_id = self.next_update_id.saturating_add(1);
        if let Some(deadline) = record.time_lock_ends {
            self.time_lock_index.insert(update_id, deadline);
        }
        self.active_index.insert(update_id);
        self.pending_updates.insert(update_id, record);
        Ok(update_id)
    }

    pub fn pending_update_row(&self, update_id: UpdateId) -> Option<&PendingUpdate> {
        self.pending_updates.get(&update_id)
    }

    pub fn is_update_active(&self, update_id: UpdateId) -> bool {
        self.active_index.contains(&update_id)
    }

    pub fn active_update_ids(&self) -> &BTreeSet<UpdateId> {
        &self.active_index
    }

    pub fn time_lock_deadline(&self, update_id: UpdateId) -> Option<BlockHeight> {
        self.time_lock_index.get(&update_id).copied()
    }

    pub fn total_update_count(&self) -> u64 {
        self.pending_updates.len() as u64
    }

    pub fn append_confirmation(
        &mut self,
        update_id: UpdateId,
        confirmer: AdminId,
    ) -> Result<u32, StorageError> {
        let record = self.pending_updates.get_mut(&update_id).ok_or_else(|| {
            StorageError::ForeignKeyViolation {
                table: "pending_updates",
                key: update_id.0.to_string(),
            }
        })?;
        if record.has_confirmed(&confirmer) {
            return Err(StorageError::DuplicateKey {
                table: "pending_update_confirmations",
                key: confirmer.as_str().to_string(),
            });
        }
        if record.confirmations.len() >= MAX_CONFIRMATIONS {
            return Err(StorageError::ContractViolation(
                ContractViolation::InvalidValue {
                    field: "pending_update.confirmations",
                    reason: "exceeds max confirmer count",
                },
            ));
        }
        record.confirmations.push(confirmer);
        Ok(record.confirmation_count())
    }

    /// Execution-time retirement: the record stays for historical reads,
    /// only its index memberships are dropped.
    pub fn retire_update(&mut self, update_id: UpdateId) -> Result<(), StorageError> {
        if !self.active_index.remove(&update_id) {
            return Err(StorageError::ForeignKeyViolation {
                table: "active_index",
                key: update_id.0.to_string(),
            });
        }
        self.time_lock_index.remove(&update_id);
        Ok(())
    }

    // ------------------------
    // Staged-value containers. Written only by execution dispatch.
    // ------------------------

    pub fn apply_staged_value(&mut self, value: &StagedValue) -> Result<(), StorageError> {
        value.validate()?;
        match value {
            StagedValue::Uint(v) => self.staged_uint = Some(*v),
            StagedValue::Text(v) => self.staged_text = Some(v.clone()),
            StagedValue::Flag(v) => self.staged_flag = Some(*v),
            StagedValue::Identity(party) => {
                self.member_flags.insert(party.clone(), true);
            }
            StagedValue::Record { key, entry } => {
                self.records.insert(key.clone(), entry.clone());
            }
        }
        Ok(())
    }

    pub fn staged_uint(&self) -> Option<u64> {
        self.staged_uint
    }

    pub fn staged_text(&self) -> Option<&str> {
        self.staged_text.as_deref()
    }

    pub fn staged_flag(&self) -> Option<bool> {
        self.staged_flag
    }

    pub fn member_flag(&self, party: &PartyId) -> bool {
        self.member_flags.get(party).copied().unwrap_or(false)
    }

    pub fn record_row(&self, key: &RecordKey) -> Option<&RecordEntry> {
        self.records.get(key)
    }

    // ------------------------
    // Append-only audit log.
    // ------------------------

    pub fn append_audit_entry(
        &mut self,
        input: AuditEntryInput,
    ) -> Result<AuditEntryId, StorageError> {
        let entry_id = AuditEntryId(self.next_audit_entry_id);
        let entry = AuditEntry::from_input_v1(entry_id, input)?;
        self.next_audit_entry_id = self.next_audit_entry_id.saturating_add(1);
        self.audit_log.push(entry);
        Ok(entry_id)
    }

    pub fn audit_entries(&self) -> &[AuditEntry] {
        &self.audit_log
    }

    pub fn audit_entry_row(&self, entry_id: AuditEntryId) -> Option<&AuditEntry> {
        if entry_id.0 == 0 {
            return None;
        }
        let row = self.audit_log.get((entry_id.0 - 1) as usize)?;
        (row.entry_id == entry_id).then_some(row)
    }

    pub fn attempt_overwrite_audit_entry(
        &mut self,
        _entry_id: AuditEntryId,
    ) -> Result<(), StorageError> {
        Err(StorageError::AppendOnlyViolation { table: "audit_log" })
    }

    // ------------------------
    // Batch table (write-once bookkeeping).
    // ------------------------

    pub fn insert_batch(&mut self, input: BatchRecordInput) -> Result<BatchId, StorageError> {
        let batch_id = BatchId(self.next_batch_id);
        let record = BatchRecord::from_input_v1(batch_id, input)?;
        self.next_batch_id = self.next_batch_id.saturating_add(1);
        self.batches.insert(batch_id, record);
        Ok(batch_id)
    }

    pub fn batch_row(&self, batch_id: BatchId) -> Option<&BatchRecord> {
        self.batches.get(&batch_id)
    }

    // ------------------------
    // Configuration record.
    // ------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn update_config(&mut self, config: EngineConfig) -> Result<(), StorageError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }
}
