#![forbid(unsafe_code)]

use concord_kernel_contracts::admin::AdminId;
use concord_kernel_contracts::audit::{AuditAction, AuditEntryInput};
use concord_kernel_contracts::config::{
    MAX_CONFIRMATION_THRESHOLD, MIN_CONFIRMATION_THRESHOLD, MIN_TIME_LOCK_BLOCKS,
};
use concord_kernel_contracts::BlockHeight;
use concord_storage::store::GovStore;

use crate::error::GovError;

/// Configuration setters. Threshold, time-lock, expiry window and the
/// batch toggle belong to the bootstrap owner; pause/unpause to any
/// active owner-or-senior party.
#[derive(Debug, Default, Clone)]
pub struct ConfigRuntime;

impl ConfigRuntime {
    pub fn set_threshold(
        &self,
        store: &mut GovStore,
        now: BlockHeight,
        actor: AdminId,
        threshold: u32,
    ) -> Result<(), GovError> {
        self.require_owner(store, &actor)?;
        if !(MIN_CONFIRMATION_THRESHOLD..=MAX_CONFIRMATION_THRESHOLD).contains(&threshold) {
            return Err(GovError::InvalidParameter);
        }
        let mut config = *store.config();
        config.confirmation_threshold = threshold;
        store.update_config(config)?;
        store.append_audit_entry(AuditEntryInput::v1(
            AuditAction::ThresholdChanged,
            actor,
            None,
            now,
            format!("confirmation threshold set to {threshold}"),
        )?)?;
        Ok(())
    }

    pub fn set_time_lock(
        &self,
        store: &mut GovStore,
        now: BlockHeight,
        actor: AdminId,
        blocks: u64,
    ) -> Result<(), GovError> {
        self.require_owner(store, &actor)?;
        if blocks != 0 && blocks < MIN_TIME_LOCK_BLOCKS {
            return Err(GovError::InvalidParameter);
        }
        let mut config = *store.config();
        config.time_lock_blocks = blocks;
        store.update_config(config)?;
        store.append_audit_entry(AuditEntryInput::v1(
            AuditAction::TimeLockChanged,
            actor,
            None,
            now,
            format!("time lock set to {blocks} blocks"),
        )?)?;
        Ok(())
    }

    pub fn set_expiry_window(
        &self,
        store: &mut GovStore,
        now: BlockHeight,
        actor: AdminId,
        blocks: u64,
    ) -> Result<(), GovError> {
        self.require_owner(store, &actor)?;
        if blocks == 0 {
            return Err(GovError::InvalidParameter);
        }
        let mut config = *store.config();
        config.expiry_window_blocks = blocks;
        store.update_config(config)?;
        store.append_audit_entry(AuditEntryInput::v1(
            AuditAction::ExpiryWindowChanged,
            actor,
            None,
            now,
            format!("expiry window set to {blocks} blocks"),
        )?)?;
        Ok(())
    }

    pub fn set_batch_updates_enabled(
        &self,
        store: &mut GovStore,
        now: BlockHeight,
        actor: AdminId,
        enabled: bool,
    ) -> Result<(), GovError> {
        self.require_owner(store, &actor)?;
        let mut config = *store.config();
        config.batch_updates_enabled = enabled;
        store.update_config(config)?;
        let detail = if enabled {
            "batch updates enabled"
        } else {
            "batch updates disabled"
        };
        store.append_audit_entry(AuditEntryInput::v1(
            AuditAction::BatchUpdatesToggled,
            actor,
            None,
            now,
            detail.to_string(),
        )?)?;
        Ok(())
    }

    pub fn pause(
        &self,
        store: &mut GovStore,
        now: BlockHeight,
        actor: AdminId,
    ) -> Result<(), GovError> {
        if !store.is_owner_or_senior(&actor) {
            return Err(GovError::Unauthorized);
        }
        let mut config = *store.config();
        config.paused = true;
        store.update_config(config)?;
        store.append_audit_entry(AuditEntryInput::v1(
            AuditAction::EnginePaused,
            actor,
            None,
            now,
            "pause engaged".to_string(),
        )?)?;
        Ok(())
    }

    pub fn unpause(
        &self,
        store: &mut GovStore,
        now: BlockHeight,
        actor: AdminId,
    ) -> Result<(), GovError> {
        if !store.is_owner_or_senior(&actor) {
            return Err(GovError::Unauthorized);
        }
        let mut config = *store.config();
        config.paused = false;
        store.update_config(config)?;
        store.append_audit_entry(AuditEntryInput::v1(
            AuditAction::EngineUnpaused,
            actor,
            None,
            now,
            "pause released".to_string(),
        )?)?;
        Ok(())
    }

    fn require_owner(&self, store: &GovStore, actor: &AdminId) -> Result<(), GovError> {
        if actor != store.owner_id() {
            return Err(GovError::Unauthorized);
        }
        Ok(())
    }
}
