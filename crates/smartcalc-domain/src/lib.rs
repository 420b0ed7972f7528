//! smartcalc-domain
//!
//! Pure domain models (BudgetEntry, Ledger, reports, scoring results).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod entry;
pub mod feedback;
pub mod ledger;
pub mod report;
pub mod scoring;

pub use category::*;
pub use common::*;
pub use entry::*;
pub use feedback::*;
pub use ledger::*;
pub use report::*;
pub use scoring::*;
