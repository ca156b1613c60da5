//! Data models for statements and configuration.

pub mod config;
pub mod statement;

pub use config::ExtratoConfig;
pub use statement::{StatementFile, StatementRecord};
