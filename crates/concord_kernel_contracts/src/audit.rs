#![forbid(unsafe_code)]

use crate::admin::AdminId;
use crate::common::validate_text;
use crate::update::UpdateId;
use crate::{BlockHeight, ContractViolation, SchemaVersion, Validate};

pub const AUDIT_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct AuditEntryId(pub u64);

impl Validate for AuditEntryId {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.0 == 0 {
            return Err(ContractViolation::InvalidValue {
                field: "audit_entry_id",
                reason: "must be > 0",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum AuditAction {
    ProposalCreated,
    UpdateConfirmed,
    UpdateExecuted,
    AdminRegistered,
    AdminDeactivated,
    ThresholdChanged,
    TimeLockChanged,
    ExpiryWindowChanged,
    BatchUpdatesToggled,
    EnginePaused,
    EngineUnpaused,
    BatchCreated,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::ProposalCreated => "proposal-created",
            AuditAction::UpdateConfirmed => "update-confirmed",
            AuditAction::UpdateExecuted => "update-executed",
            AuditAction::AdminRegistered => "admin-registered",
            AuditAction::AdminDeactivated => "admin-deactivated",
            AuditAction::ThresholdChanged => "threshold-changed",
            AuditAction::TimeLockChanged => "time-lock-changed",
            AuditAction::ExpiryWindowChanged => "expiry-window-changed",
            AuditAction::BatchUpdatesToggled => "batch-updates-toggled",
            AuditAction::EnginePaused => "engine-paused",
            AuditAction::EngineUnpaused => "engine-unpaused",
            AuditAction::BatchCreated => "batch-created",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntryInput {
    pub schema_version: SchemaVersion,
    pub action: AuditAction,
    pub actor: AdminId,
    pub update_id: Option<UpdateId>,
    pub height: BlockHeight,
    pub detail: String,
}

impl AuditEntryInput {
    pub fn v1(
        action: AuditAction,
        actor: AdminId,
        update_id: Option<UpdateId>,
        height: BlockHeight,
        detail: String,
    ) -> Result<Self, ContractViolation> {
        let input = Self {
            schema_version: AUDIT_CONTRACT_VERSION,
            action,
            actor,
            update_id,
            height,
            detail,
        };
        input.validate()?;
        Ok(input)
    }
}

impl Validate for AuditEntryInput {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != AUDIT_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "audit_entry_input.schema_version",
                reason: "must match AUDIT_CONTRACT_VERSION",
            });
        }
        self.actor.validate()?;
        if let Some(update_id) = self.update_id {
            update_id.validate()?;
        }
        validate_text("audit_entry_input.detail", &self.detail, 192)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AuditEntry {
    pub schema_version: SchemaVersion,
    pub entry_id: AuditEntryId,
    pub action: AuditAction,
    pub actor: AdminId,
    pub update_id: Option<UpdateId>,
    pub height: BlockHeight,
    pub detail: String,
}

impl AuditEntry {
    pub fn from_input_v1(
        entry_id: AuditEntryId,
        input: AuditEntryInput,
    ) -> Result<Self, ContractViolation> {
        input.validate()?;
        let entry = Self {
            schema_version: AUDIT_CONTRACT_VERSION,
            entry_id,
            action: input.action,
            actor: input.actor,
            update_id: input.update_id,
            height: input.height,
            detail: input.detail,
        };
        entry.validate()?;
        Ok(entry)
    }
}

impl Validate for AuditEntry {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != AUDIT_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "audit_entry.schema_version",
                reason: "must match AUDIT_CONTRACT_VERSION",
            });
        }
        self.entry_id.validate()?;
        self.actor.validate()?;
        if let Some(update_id) = self.update_id {
            update_id.validate()?;
        }
        validate_text("audit_entry.detail", &self.detail, 192)?;
        Ok(())
    }
}
