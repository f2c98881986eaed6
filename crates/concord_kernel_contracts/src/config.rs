#![forbid(unsafe_code)]

use crate::{ContractViolation, SchemaVersion, Validate};

pub const CONFIG_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

pub const MIN_CONFIRMATION_THRESHOLD: u32 = 2;
pub const MAX_CONFIRMATION_THRESHOLD: u32 = 10;
pub const MAX_ACTIVE_ADMINS: u32 = 20;
/// Smallest nonzero time-lock; zero disables the gate entirely.
pub const MIN_TIME_LOCK_BLOCKS: u64 = 10;
pub const DEFAULT_CONFIRMATION_THRESHOLD: u32 = 2;
pub const DEFAULT_EXPIRY_WINDOW_BLOCKS: u64 = 1_440;

/// Process-wide tunables, read fresh by every ledger operation. The
/// threshold is deliberately not snapshotted into pending updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct EngineConfig {
    pub schema_version: SchemaVersion,
    pub paused: bool,
    pub confirmation_threshold: u32,
    pub time_lock_blocks: u64,
    pub expiry_window_blocks: u64,
    pub batch_updates_enabled: bool,
}

impl EngineConfig {
    pub fn v1(
        paused: bool,
        confirmation_threshold: u32,
        time_lock_blocks: u64,
        expiry_window_blocks: u64,
        batch_updates_enabled: bool,
    ) -> Result<Self, ContractViolation> {
        let config = Self {
            schema_version: CONFIG_CONTRACT_VERSION,
            paused,
            confirmation_threshold,
            time_lock_blocks,
            expiry_window_blocks,
            batch_updates_enabled,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn bootstrap_v1() -> Self {
        Self {
            schema_version: CONFIG_CONTRACT_VERSION,
            paused: false,
            confirmation_threshold: DEFAULT_CONFIRMATION_THRESHOLD,
            time_lock_blocks: 0,
            expiry_window_blocks: DEFAULT_EXPIRY_WINDOW_BLOCKS,
            batch_updates_enabled: true,
        }
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != CONFIG_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "engine_config.schema_version",
                reason: "must match CONFIG_CONTRACT_VERSION",
            });
        }
        if self.confirmation_threshold < MIN_CONFIRMATION_THRESHOLD
            || self.confirmation_threshold > MAX_CONFIRMATION_THRESHOLD
        {
            return Err(ContractViolation::InvalidRange {
                field: "engine_config.confirmation_threshold",
                min: MIN_CONFIRMATION_THRESHOLD as u64,
                max: MAX_CONFIRMATION_THRESHOLD as u64,
                got: self.confirmation_threshold as u64,
            });
        }
        if self.time_lock_blocks != 0 && self.time_lock_blocks < MIN_TIME_LOCK_BLOCKS {
            return Err(ContractViolation::InvalidValue {
                field: "engine_config.time_lock_blocks",
                reason: "must be 0 (disabled) or >= MIN_TIME_LOCK_BLOCKS",
            });
        }
        if self.expiry_window_blocks == 0 {
            return Err(ContractViolation::InvalidValue {
                field: "engine_config.expiry_window_blocks",
                reason: "must be > 0",
            });
        }
        Ok(())
    }
}
