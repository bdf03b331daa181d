//! The simulated payment flow. There is no gateway behind this: confirming a
//! payment waits out a short processing delay and reports success, then the
//! caller records it via `SubscriptionService::mark_as_paid`.

use std::{env, thread, time::Duration};

use dialoguer::Confirm;

use crate::cli::output;
use crate::errors::TrackerError;

const SCRIPT_ENV: &str = "SUBTRACK_CLI_SCRIPT";
const PROCESSING_DELAY_MS: u64 = 2000;

/// Script mode disables prompts and delays so the CLI can be driven from
/// tests and shell scripts.
pub fn script_mode() -> bool {
    env::var(SCRIPT_ENV).is_ok()
}

/// Asks for confirmation, auto-accepting in script mode.
pub fn confirm(prompt: &str) -> Result<bool, TrackerError> {
    if script_mode() {
        return Ok(true);
    }
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()?)
}

/// Runs the simulated charge: processing delay, then success.
pub fn process(name: &str, amount_label: &str) {
    output::info(&format!("Processing payment of {amount_label} for {name}..."));
    if !script_mode() {
        thread::sleep(Duration::from_millis(PROCESSING_DELAY_MS));
    }
    output::success("Payment successful!");
}
