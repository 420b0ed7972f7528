//! smartcalc-core
//!
//! Calculation services and session orchestration for SmartCalc.
//! Depends on smartcalc-domain. No CLI, no terminal I/O, no direct file access.

pub mod aggregation_service;
pub mod audit_service;
pub mod auth;
pub mod currency;
pub mod entry_builder;
pub mod error;
pub mod feedback_service;
pub mod net_worth_service;
pub mod notify;
pub mod session;
pub mod storage;
pub mod time;

pub use aggregation_service::*;
pub use audit_service::*;
pub use auth::*;
pub use currency::{CurrencyCode, CurrencyConverter, RateTable};
pub use entry_builder::*;
pub use error::CoreError;
pub use feedback_service::*;
pub use net_worth_service::*;
pub use notify::*;
pub use session::*;
pub use storage::{snapshot_warnings, SnapshotStorage};
pub use time::*;

#[cfg(test)]
mod tests;
