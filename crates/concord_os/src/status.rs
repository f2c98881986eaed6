#![forbid(unsafe_code)]

use concord_storage::store::GovStore;

/// Aggregate read-only snapshot of configuration and ledger occupancy.
/// Serializable for host-side export; carries no authority.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EngineStatus {
    pub schema_version: u8,
    pub paused: bool,
    pub confirmation_threshold: u32,
    pub time_lock_blocks: u64,
    pub expiry_window_blocks: u64,
    pub batch_updates_enabled: bool,
    pub active_admin_count: u32,
    pub active_update_count: u64,
    pub total_update_count: u64,
    pub audit_entry_count: u64,
}

impl EngineStatus {
    pub fn snapshot(store: &GovStore) -> Self {
        let config = store.config();
        Self {
            schema_version: 1,
            paused: config.paused,
            confirmation_threshold: config.confirmation_threshold,
            time_lock_blocks: config.time_lock_blocks,
            expiry_window_blocks: config.expiry_window_blocks,
            batch_updates_enabled: config.batch_updates_enabled,
            active_admin_count: store.active_admin_count(),
            active_update_count: store.active_update_ids().len() as u64,
            total_update_count: store.total_update_count(),
            audit_entry_count: store.audit_entries().len() as u64,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
