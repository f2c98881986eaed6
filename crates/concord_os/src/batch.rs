#![forbid(unsafe_code)]

use concord_kernel_contracts::admin::AdminId;
use concord_kernel_contracts::audit::{AuditAction, AuditEntryInput};
use concord_kernel_contracts::batch::{BatchId, BatchRecordInput, MAX_BATCH_UPDATES};
use concord_kernel_contracts::update::UpdateId;
use concord_kernel_contracts::BlockHeight;
use concord_storage::store::GovStore;

use crate::error::GovError;

/// Write-once batch bookkeeping. Recording a group never triggers any
/// execution over its members.
#[derive(Debug, Default, Clone)]
pub struct BatchRuntime;

impl BatchRuntime {
    pub fn create_batch(
        &self,
        store: &mut GovStore,
        now: BlockHeight,
        caller: AdminId,
        update_ids: Vec<UpdateId>,
    ) -> Result<BatchId, GovError> {
        if !store.is_active_admin(&caller) || !store.config().batch_updates_enabled {
            return Err(GovError::Unauthorized);
        }
        if update_ids.len() > MAX_BATCH_UPDATES {
            return Err(GovError::CapacityExceeded);
        }

        let member_count = update_ids.len();
        let input = BatchRecordInput::v1(update_ids, caller.clone(), now)?;
        let batch_id = store.insert_batch(input)?;
        store.append_audit_entry(AuditEntryInput::v1(
            AuditAction::BatchCreated,
            caller,
            None,
            now,
            format!("batch of {member_count} updates recorded"),
        )?)?;
        Ok(batch_id)
    }
}
