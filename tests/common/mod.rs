#![allow(dead_code)]

use chrono::NaiveDate;
use subtrack_core::storage::JsonStore;
use tempfile::TempDir;

/// A store rooted in a throwaway directory. Keep the guard alive for the
/// duration of the test.
pub fn temp_store() -> (JsonStore, TempDir) {
    let temp = TempDir::new().expect("temp dir");
    let store = JsonStore::new(Some(temp.path().to_path_buf())).expect("json store");
    (store, temp)
}

pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
}

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
