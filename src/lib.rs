#![doc(test(attr(deny(warnings))))]

//! Subledger Core offers the reconciliation primitives behind subcontractor
//! cost control: purchase orders with their change orders, invoices with
//! their payment allocations, and the derived ledgers that roll both up per
//! subcontractor and per project.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod money;
pub mod snapshot;
pub mod utils;

pub use errors::LedgerError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Subledger Core tracing initialized.");
    });
}
