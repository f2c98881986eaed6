#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use crate::admin::AdminId;
use crate::update::UpdateId;
use crate::{BlockHeight, ContractViolation, SchemaVersion, Validate};

pub const BATCH_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

pub const MAX_BATCH_UPDATES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct BatchId(pub u64);

impl Validate for BatchId {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.0 == 0 {
            return Err(ContractViolation::InvalidValue {
                field: "batch_id",
                reason: "must be > 0",
            });
        }
        Ok(())
    }
}

/// Batches are write-once bookkeeping; `Pending` is the only status the
/// engine ever assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum BatchStatus {
    Pending,
}

impl BatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BatchStatus::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRecordInput {
    pub schema_version: SchemaVersion,
    pub update_ids: Vec<UpdateId>,
    pub created_by: AdminId,
    pub created_at: BlockHeight,
}

impl BatchRecordInput {
    pub fn v1(
        update_ids: Vec<UpdateId>,
        created_by: AdminId,
        created_at: BlockHeight,
    ) -> Result<Self, ContractViolation> {
        let input = Self {
            schema_version: BATCH_CONTRACT_VERSION,
            update_ids,
            created_by,
            created_at,
        };
        input.validate()?;
        Ok(input)
    }
}

impl Validate for BatchRecordInput {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != BATCH_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "batch_record_input.schema_version",
                reason: "must match BATCH_CONTRACT_VERSION",
            });
        }
        validate_update_id_list("batch_record_input.update_ids", &self.update_ids)?;
        self.created_by.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BatchRecord {
    pub schema_version: SchemaVersion,
    pub batch_id: BatchId,
    pub update_ids: Vec<UpdateId>,
    pub status: BatchStatus,
    pub created_by: AdminId,
    pub created_at: BlockHeight,
}

impl BatchRecord {
    pub fn from_input_v1(
        batch_id: BatchId,
        input: BatchRecordInput,
    ) -> Result<Self, ContractViolation> {
        input.validate()?;
        let record = Self {
            schema_version: BATCH_CONTRACT_VERSION,
            batch_id,
            update_ids: input.update_ids,
            status: BatchStatus::Pending,
            created_by: input.created_by,
            created_at: input.created_at,
        };
        record.validate()?;
        Ok(record)
    }
}

impl Validate for BatchRecord {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != BATCH_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "batch_record.schema_version",
                reason: "must match BATCH_CONTRACT_VERSION",
            });
        }
        self.batch_id.validate()?;
        validate_update_id_list("batch_record.update_ids", &self.update_ids)?;
        self.created_by.validate()?;
        Ok(())
    }
}

fn validate_update_id_list(
    field: &'static str,
    ids: &[UpdateId],
) -> Result<(), ContractViolation> {
    if ids.is_empty() || ids.len() > MAX_BATCH_UPDATES {
        return Err(ContractViolation::InvalidValue {
            field,
            reason: "must contain 1..=10 update ids",
        });
    }
    let mut seen = BTreeSet::new();
    for id in ids {
        id.validate()?;
        if !seen.insert(id.0) {
            return Err(ContractViolation::InvalidValue {
                field,
                reason: "must not contain duplicates",
            });
        }
    }
    Ok(())
}
