#![forbid(unsafe_code)]

use concord_kernel_contracts::admin::{AdminId, AdminRecord, AdminRole};
use concord_kernel_contracts::audit::{AuditAction, AuditEntryInput};
use concord_kernel_contracts::config::MAX_ACTIVE_ADMINS;
use concord_kernel_contracts::BlockHeight;
use concord_storage::store::GovStore;

use crate::error::GovError;

/// Authorized-party CRUD. Parties are never deleted; deactivation flips
/// the active flag and the bootstrap owner can never be deactivated.
#[derive(Debug, Default, Clone)]
pub struct AdminRegistryRuntime;

impl AdminRegistryRuntime {
    pub fn register(
        &self,
        store: &mut GovStore,
        now: BlockHeight,
        actor: AdminId,
        admin_id: AdminId,
        role: AdminRole,
    ) -> Result<(), GovError> {
        if !store.is_owner_or_senior(&actor) {
            return Err(GovError::Unauthorized);
        }
        if store.active_admin_count() >= MAX_ACTIVE_ADMINS {
            return Err(GovError::CapacityExceeded);
        }
        if store.config().paused {
            return Err(GovError::PauseActive);
        }
        if store.admin_row(&admin_id).is_some() {
            return Err(GovError::InvalidTarget);
        }

        let record = AdminRecord::v1(admin_id.clone(), role, true, now, actor.clone())?;
        store.insert_admin_row(record)?;
        store.append_audit_entry(AuditEntryInput::v1(
            AuditAction::AdminRegistered,
            actor,
            None,
            now,
            format!("party {} registered", admin_id.as_str()),
        )?)?;
        Ok(())
    }

    pub fn deactivate(
        &self,
        store: &mut GovStore,
        now: BlockHeight,
        actor: AdminId,
        admin_id: AdminId,
    ) -> Result<(), GovError> {
        if !store.is_owner_or_senior(&actor) {
            return Err(GovError::Unauthorized);
        }
        if &admin_id == store.owner_id() {
            return Err(GovError::InvalidTarget);
        }
        match store.admin_row(&admin_id) {
            None => return Err(GovError::InvalidTarget),
            Some(row) if !row.active => return Err(GovError::InvalidTarget),
            Some(_) => {}
        }

        store.deactivate_admin_row(&admin_id)?;
        store.append_audit_entry(AuditEntryInput::v1(
            AuditAction::AdminDeactivated,
            actor,
            None,
            now,
            format!("party {} deactivated", admin_id.as_str()),
        )?)?;
        Ok(())
    }
}
