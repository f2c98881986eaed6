#![forbid(unsafe_code)]

pub mod admin;
pub mod audit;
pub mod batch;
pub mod common;
pub mod config;
pub mod update;

pub use common::{BlockHeight, ContractViolation, SchemaVersion, Validate};
