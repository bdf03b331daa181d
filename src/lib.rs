#![doc(test(attr(deny(warnings))))]

//! Subtrack Core offers the subscription scheduling, currency, and reporting
//! primitives that power the subscription-tracker CLI.

pub mod cli;
pub mod config;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod reports;
pub mod schedule;
pub mod services;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Subtrack tracing initialized.");
    });
}
