//! The closed currency set and USD-based conversion.
//!
//! Rates are a static table expressing "units of USD per 1 unit of the
//! currency"; every cross-currency conversion routes through USD. No rounding
//! happens at this layer; callers round for display only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Rub,
    Uzs,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Rub, Currency::Uzs];

    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Rub => "RUB",
            Currency::Uzs => "UZS",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Rub => "₽",
            Currency::Uzs => "soʻm",
        }
    }

    /// Units of USD bought by 1 unit of this currency. Static for this
    /// application; there is no live rate fetching.
    pub fn usd_rate(&self) -> f64 {
        match self {
            Currency::Usd => 1.0,
            Currency::Eur => 1.08,
            Currency::Rub => 0.011,
            Currency::Uzs => 0.000079,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Usd
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = TrackerError;

    /// The defensive boundary for the closed set: any code outside it is a
    /// data-integrity error, not a recoverable runtime condition.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "RUB" => Ok(Currency::Rub),
            "UZS" => Ok(Currency::Uzs),
            other => Err(TrackerError::UnknownCurrency(other.to_string())),
        }
    }
}

/// Converts `amount` from one currency to another through USD.
pub fn convert(amount: f64, from: Currency, to: Currency) -> f64 {
    if from == to {
        return amount;
    }
    let amount_in_usd = amount * from.usd_rate();
    amount_in_usd / to.usd_rate()
}

/// Formats an amount for display with the currency symbol and two decimals.
pub fn format_amount(amount: f64, currency: Currency) -> String {
    format!("{}{:.2}", currency.symbol(), amount)
}
