#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use crate::admin::AdminId;
use crate::batch::BatchId;
use crate::common::{validate_sha256, validate_text, validate_token};
use crate::{BlockHeight, ContractViolation, SchemaVersion, Validate};

pub const UPDATE_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

/// Hard bound on distinct confirmers per update, proposer included.
pub const MAX_CONFIRMATIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct UpdateId(pub u64);

impl Validate for UpdateId {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.0 == 0 {
            return Err(ContractViolation::InvalidValue {
                field: "update_id",
                reason: "must be > 0",
            });
        }
        Ok(())
    }
}

/// Identity staged as data (membership flags, record keys). Distinct from
/// `AdminId`: a staged party need not be an authorized admin.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct PartyId(String);

impl PartyId {
    pub fn new(id: impl Into<String>) -> Result<Self, ContractViolation> {
        let id = id.into();
        validate_token("party_id", &id, 64)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Validate for PartyId {
    fn validate(&self) -> Result<(), ContractViolation> {
        validate_token("party_id", &self.0, 64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum DataType {
    Uint,
    Text,
    Flag,
    Identity,
    Record,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Uint => "uint",
            DataType::Text => "text",
            DataType::Flag => "flag",
            DataType::Identity => "identity",
            DataType::Record => "record",
        }
    }
}

/// Pre-allocated tuple key for the keyed-record container, chosen at
/// proposal time and fixed thereafter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct RecordKey {
    pub party: PartyId,
    pub slot: u32,
}

impl RecordKey {
    pub fn v1(party: PartyId, slot: u32) -> Result<Self, ContractViolation> {
        let key = Self { party, slot };
        key.validate()?;
        Ok(key)
    }
}

impl Validate for RecordKey {
    fn validate(&self) -> Result<(), ContractViolation> {
        self.party.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RecordEntry {
    pub label: String,
    pub content_hash_sha256: String,
}

impl RecordEntry {
    pub fn v1(label: String, content_hash_sha256: String) -> Result<Self, ContractViolation> {
        let entry = Self {
            label,
            content_hash_sha256,
        };
        entry.validate()?;
        Ok(entry)
    }
}

impl Validate for RecordEntry {
    fn validate(&self) -> Result<(), ContractViolation> {
        validate_token("record_entry.label", &self.label, 64)?;
        validate_sha256("record_entry.content_hash_sha256", &self.content_hash_sha256)
    }
}

/// Closed five-shape union of everything a pending update may stage.
/// Execution dispatch matches exhaustively on this; there is no fallthrough.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum StagedValue {
    Uint(u64),
    Text(String),
    Flag(bool),
    Identity(PartyId),
    Record { key: RecordKey, entry: RecordEntry },
}

impl StagedValue {
    pub fn data_type(&self) -> DataType {
        match self {
            StagedValue::Uint(_) => DataType::Uint,
            StagedValue::Text(_) => DataType::Text,
            StagedValue::Flag(_) => DataType::Flag,
            StagedValue::Identity(_) => DataType::Identity,
            StagedValue::Record { .. } => DataType::Record,
        }
    }
}

impl Validate for StagedValue {
    fn validate(&self) -> Result<(), ContractViolation> {
        match self {
            StagedValue::Uint(_) | StagedValue::Flag(_) => Ok(()),
            StagedValue::Text(text) => validate_text("staged_value.text", text, 256),
            StagedValue::Identity(party) => party.validate(),
            StagedValue::Record { key, entry } => {
                key.validate()?;
                entry.validate()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdateInput {
    pub schema_version: SchemaVersion,
    pub value: StagedValue,
    pub proposer: AdminId,
    pub created_at: BlockHeight,
    pub expires_at: BlockHeight,
    pub time_lock_ends: Option<BlockHeight>,
    pub priority: u32,
    pub reason: String,
    pub batch_ref: Option<BatchId>,
}

impl PendingUpdateInput {
    #[allow(clippy::too_many_arguments)]
    pub fn v1(
        value: StagedValue,
        proposer: AdminId,
        created_at: BlockHeight,
        expires_at: BlockHeight,
        time_lock_ends: Option<BlockHeight>,
        priority: u32,
        reason: String,
        batch_ref: Option<BatchId>,
    ) -> Result<Self, ContractViolation> {
        let input = Self {
            schema_version: UPDATE_CONTRACT_VERSION,
            value,
            proposer,
            created_at,
            expires_at,
            time_lock_ends,
            priority,
            reason,
            batch_ref,
        };
        input.validate()?;
        Ok(input)
    }
}

impl Validate for PendingUpdateInput {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != UPDATE_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "pending_update_input.schema_version",
                reason: "must match UPDATE_CONTRACT_VERSION",
            });
        }
        self.value.validate()?;
        self.proposer.validate()?;
        if self.expires_at <= self.created_at {
            return Err(ContractViolation::InvalidValue {
                field: "pending_update_input.expires_at",
                reason: "must be after created_at",
            });
        }
        if let Some(ends) = self.time_lock_ends {
            if ends <= self.created_at {
                return Err(ContractViolation::InvalidValue {
                    field: "pending_update_input.time_lock_ends",
                    reason: "must be after created_at when present",
                });
            }
        }
        validate_text("pending_update_input.reason", &self.reason, 256)?;
        if let Some(batch_ref) = self.batch_ref {
            batch_ref.validate()?;
        }
        Ok(())
    }
}

/// One proposal-in-flight. Created by propose, mutated only by confirm
/// (confirmer append) until executed, and retained immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PendingUpdate {
    pub schema_version: SchemaVersion,
    pub update_id: UpdateId,
    pub value: StagedValue,
    pub proposer: AdminId,
    pub confirmations: Vec<AdminId>,
    pub created_at: BlockHeight,
    pub expires_at: BlockHeight,
    pub time_lock_ends: Option<BlockHeight>,
    pub priority: u32,
    pub reason: String,
    pub batch_ref: Option<BatchId>,
}

impl PendingUpdate {
    /// The proposal itself is the first confirmation.
    pub fn from_input_v1(
        update_id: UpdateId,
        input: PendingUpdateInput,
    ) -> Result<Self, ContractViolation> {
        input.validate()?;
        let record = Self {
            schema_version: UPDATE_CONTRACT_VERSION,
            update_id,
            value: input.value,
            proposer: input.proposer.clone(),
            confirmations: vec![input.proposer],
            created_at: input.created_at,
            expires_at: input.expires_at,
            time_lock_ends: input.time_lock_ends,
            priority: input.priority,
            reason: input.reason,
            batch_ref: input.batch_ref,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn confirmation_count(&self) -> u32 {
        self.confirmations.len() as u32
    }

    pub fn has_confirmed(&self, admin_id: &AdminId) -> bool {
        self.confirmations.iter().any(|c| c == admin_id)
    }
}

impl Validate for PendingUpdate {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != UPDATE_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "pending_update.schema_version",
                reason: "must match UPDATE_CONTRACT_VERSION",
            });
        }
        self.update_id.validate()?;
        self.value.validate()?;
        self.proposer.validate()?;
        if self.confirmations.is_empty() || self.confirmations.len() > MAX_CONFIRMATIONS {
            return Err(ContractViolation::InvalidValue {
                field: "pending_update.confirmations",
                reason: "must contain 1..=10 confirmers",
            });
        }
        if self.confirmations.first() != Some(&self.proposer) {
            return Err(ContractViolation::InvalidValue {
                field: "pending_update.confirmations",
                reason: "proposer must be the first confirmer",
            });
        }
        let mut seen = BTreeSet::new();
        for confirmer in &self.confirmations {
            confirmer.validate()?;
            if !seen.insert(confirmer.as_str()) {
                return Err(ContractViolation::InvalidValue {
                    field: "pending_update.confirmations",
                    reason: "must not contain duplicates",
                });
            }
        }
        if self.expires_at <= self.created_at {
            return Err(ContractViolation::InvalidValue {
                field: "pending_update.expires_at",
                reason: "must be after created_at",
            });
        }
        if let Some(ends) = self.time_lock_ends {
            if ends <= self.created_at {
                return Err(ContractViolation::InvalidValue {
                    field: "pending_update.time_lock_ends",
                    reason: "must be after created_at when present",
                });
            }
        }
        validate_text("pending_update.reason", &self.reason, 256)?;
        if let Some(batch_ref) = self.batch_ref {
            batch_ref.validate()?;
        }
        Ok(())
    }
}
