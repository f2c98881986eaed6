#![forbid(unsafe_code)]

use crate::common::validate_token;
use crate::{BlockHeight, ContractViolation, SchemaVersion, Validate};

pub const ADMIN_CONTRACT_VERSION: SchemaVersion = SchemaVersion(1);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct AdminId(String);

impl AdminId {
    pub fn new(id: impl Into<String>) -> Result<Self, ContractViolation> {
        let id = id.into();
        validate_token("admin_id", &id, 64)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Validate for AdminId {
    fn validate(&self) -> Result<(), ContractViolation> {
        validate_token("admin_id", &self.0, 64)
    }
}

/// Role tag for an authorized party. `Owner` and `Senior` carry
/// registry-mutation authority; everything else can only propose/confirm.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub enum AdminRole {
    Owner,
    Senior,
    Member,
    Other(String),
}

impl AdminRole {
    pub fn as_str(&self) -> &str {
        match self {
            AdminRole::Owner => "owner",
            AdminRole::Senior => "senior",
            AdminRole::Member => "member",
            AdminRole::Other(tag) => tag.as_str(),
        }
    }

    pub fn is_owner_or_senior(&self) -> bool {
        matches!(self, AdminRole::Owner | AdminRole::Senior)
    }
}

impl Validate for AdminRole {
    fn validate(&self) -> Result<(), ContractViolation> {
        if let AdminRole::Other(tag) = self {
            validate_token("admin_role.other", tag, 32)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AdminRecord {
    pub schema_version: SchemaVersion,
    pub admin_id: AdminId,
    pub role: AdminRole,
    pub active: bool,
    pub added_at: BlockHeight,
    pub added_by: AdminId,
}

impl AdminRecord {
    pub fn v1(
        admin_id: AdminId,
        role: AdminRole,
        active: bool,
        added_at: BlockHeight,
        added_by: AdminId,
    ) -> Result<Self, ContractViolation> {
        let record = Self {
            schema_version: ADMIN_CONTRACT_VERSION,
            admin_id,
            role,
            active,
            added_at,
            added_by,
        };
        record.validate()?;
        Ok(record)
    }
}

impl Validate for AdminRecord {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.schema_version != ADMIN_CONTRACT_VERSION {
            return Err(ContractViolation::InvalidValue {
                field: "admin_record.schema_version",
                reason: "must match ADMIN_CONTRACT_VERSION",
            });
        }
        self.admin_id.validate()?;
        self.role.validate()?;
        self.added_by.validate()?;
        Ok(())
    }
}
