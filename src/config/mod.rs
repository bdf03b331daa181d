//! Application settings and theme, persisted through the key-value store.
//!
//! Settings live under `app_settings` as a JSON object; the theme lives under
//! `theme` as a raw string. Unreadable or malformed values silently default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::errors::TrackerError;
use crate::storage::{read_json_or, write_json, KeyValueStore, SETTINGS_KEY, THEME_KEY};

const DEFAULT_MONTHLY_BUDGET_USD: f64 = 300.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub display_currency: Currency,
    /// Monthly budget the dashboard gauge measures against, in USD.
    #[serde(default = "AppSettings::default_budget")]
    pub monthly_budget_usd: f64,
}

impl AppSettings {
    fn default_budget() -> f64 {
        DEFAULT_MONTHLY_BUDGET_USD
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            display_currency: Currency::Usd,
            monthly_budget_usd: DEFAULT_MONTHLY_BUDGET_USD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        };
        f.write_str(label)
    }
}

impl FromStr for Theme {
    type Err = TrackerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(TrackerError::Validation(format!(
                "unrecognized theme `{other}`"
            ))),
        }
    }
}

pub fn load_settings(store: &dyn KeyValueStore) -> AppSettings {
    read_json_or(store, SETTINGS_KEY, AppSettings::default)
}

pub fn save_settings(store: &dyn KeyValueStore, settings: &AppSettings) {
    write_json(store, SETTINGS_KEY, settings);
}

/// Reads the theme string, defaulting to `system` on anything unrecognized.
pub fn load_theme(store: &dyn KeyValueStore) -> Theme {
    match store.read(THEME_KEY) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_default(),
        Ok(None) => Theme::default(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read theme, using default");
            Theme::default()
        }
    }
}

pub fn save_theme(store: &dyn KeyValueStore, theme: Theme) {
    if let Err(err) = store.write(THEME_KEY, &theme.to_string()) {
        tracing::error!(error = %err, "failed to persist theme");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_accept_reference_blobs_without_budget_field() {
        let settings: AppSettings =
            serde_json::from_str(r#"{ "displayCurrency": "EUR" }"#).unwrap();
        assert_eq!(settings.display_currency, Currency::Eur);
        assert_eq!(settings.monthly_budget_usd, DEFAULT_MONTHLY_BUDGET_USD);
    }

    #[test]
    fn theme_parses_the_persisted_strings() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }
}
