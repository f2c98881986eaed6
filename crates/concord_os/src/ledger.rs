#![forbid(unsafe_code)]

use concord_kernel_contracts::admin::AdminId;
use concord_kernel_contracts::audit::{AuditAction, AuditEntryInput};
use concord_kernel_contracts::batch::BatchId;
use concord_kernel_contracts::update::{
    PendingUpdateInput, StagedValue, UpdateId, MAX_CONFIRMATIONS,
};
use concord_kernel_contracts::BlockHeight;
use concord_storage::store::GovStore;

use crate::error::GovError;

/// The core state machine: one proposal-in-flight per record, confirmed
/// until quorum, then executed into the staged-value containers exactly
/// once. Expiry is a pure guard; expired updates are never swept.
#[derive(Debug, Default, Clone)]
pub struct UpdateLedgerRuntime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Pending { confirmation_count: u32 },
    Executed,
}

impl UpdateLedgerRuntime {
    /// Stages a typed value change. The proposal auto-confirms with the
    /// proposer; expiry and time-lock deadlines are fixed here and never
    /// recomputed, even if the global configuration changes later.
    #[allow(clippy::too_many_arguments)]
    pub fn propose(
        &self,
        store: &mut GovStore,
        now: BlockHeight,
        caller: AdminId,
        value: StagedValue,
        priority: u32,
        reason: String,
        batch_ref: Option<BatchId>,
    ) -> Result<UpdateId, GovError> {
        if !store.is_active_admin(&caller) {
            return Err(GovError::Unauthorized);
        }
        if store.config().paused {
            return Err(GovError::PauseActive);
        }
        if let Some(batch_ref) = batch_ref {
            if store.batch_row(batch_ref).is_none() {
                return Err(GovError::NotFound);
            }
        }

        let config = *store.config();
        let expires_at = now.offset(config.expiry_window_blocks);
        let time_lock_ends =
            (config.time_lock_blocks > 0).then(|| now.offset(config.time_lock_blocks));
        let data_type = value.data_type();

        let input = PendingUpdateInput::v1(
            value,
            caller.clone(),
            now,
            expires_at,
            time_lock_ends,
            priority,
            reason,
            batch_ref,
        )?;
        let update_id = store.insert_pending_update(input)?;

        store.append_audit_entry(AuditEntryInput::v1(
            AuditAction::ProposalCreated,
            caller,
            Some(update_id),
            now,
            format!("{} proposal staged", data_type.as_str()),
        )?)?;
        Ok(update_id)
    }

    /// Gate order is part of the interface contract; the first failing
    /// check wins. The threshold is read fresh here, not frozen at
    /// proposal time: lowering it mid-flight makes the next valid
    /// confirmation execute immediately.
    pub fn confirm(
        &self,
        store: &mut GovStore,
        now: BlockHeight,
        caller: AdminId,
        update_id: UpdateId,
    ) -> Result<ConfirmOutcome, GovError> {
        let record = store
            .pending_update_row(update_id)
            .ok_or(GovError::NotFound)?;
        let proposer = record.proposer.clone();
        let expires_at = record.expires_at;
        let time_lock_ends = record.time_lock_ends;
        let already_confirmed = record.has_confirmed(&caller);
        let confirmer_count = record.confirmations.len();

        if !store.is_active_admin(&caller) {
            return Err(GovError::Unauthorized);
        }
        if store.config().paused {
            return Err(GovError::PauseActive);
        }
        if caller == proposer {
            return Err(GovError::SelfConfirmationForbidden);
        }
        if now > expires_at {
            return Err(GovError::Expired);
        }
        if !store.is_update_active(update_id) {
            return Err(GovError::NotFound);
        }
        if already_confirmed {
            return Err(GovError::DuplicateConfirmation);
        }
        if let Some(deadline) = time_lock_ends {
            if now < deadline {
                return Err(GovError::TimeLockActive);
            }
        }
        if confirmer_count >= MAX_CONFIRMATIONS {
            return Err(GovError::CapacityExceeded);
        }

        let threshold = store.config().confirmation_threshold;
        let new_count = store.append_confirmation(update_id, caller.clone())?;

        if new_count >= threshold {
            self.execute(store, now, caller, update_id)?;
            Ok(ConfirmOutcome::Executed)
        } else {
            store.append_audit_entry(AuditEntryInput::v1(
                AuditAction::UpdateConfirmed,
                caller,
                Some(update_id),
                now,
                format!("confirmation {new_count} of {threshold} recorded"),
            )?)?;
            Ok(ConfirmOutcome::Pending {
                confirmation_count: new_count,
            })
        }
    }

    /// Quorum dispatch. Only reachable from `confirm`; writes exactly the
    /// container matching the value shape, then retires the update from
    /// the active and time-lock indexes in the same unit of work. The
    /// record itself is retained for historical reads.
    fn execute(
        &self,
        store: &mut GovStore,
        now: BlockHeight,
        executor: AdminId,
        update_id: UpdateId,
    ) -> Result<(), GovError> {
        let record = store
            .pending_update_row(update_id)
            .ok_or(GovError::NotFound)?;
        let value = record.value.clone();
        let data_type = value.data_type();

        store.apply_staged_value(&value)?;
        store.retire_update(update_id)?;
        store.append_audit_entry(AuditEntryInput::v1(
            AuditAction::UpdateExecuted,
            executor,
            Some(update_id),
            now,
            format!("{} value applied at quorum", data_type.as_str()),
        )?)?;
        Ok(())
    }
}
