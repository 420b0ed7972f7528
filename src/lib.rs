#![doc(test(attr(deny(warnings))))]

//! SmartCalc budgeting calculators: entry ledgers for personal, business and
//! government budgets, cross-category reports, net-worth scoring and
//! discrepancy audits, driven from an interactive or scripted shell.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("SmartCalc tracing initialized.");
    });
}
