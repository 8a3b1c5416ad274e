//! Display formatting for stat values, rates and counts.
//!
//! All functions here are pure. Locale is fixed to en-US and currency to USD.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a numeric stat is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    /// Rounded integer with thousands separators: `1,235`
    #[default]
    Number,
    /// Whole US dollars: `$75,000`
    Currency,
    /// One decimal and a percent sign: `12.5%`
    Percentage,
    /// One decimal with K/M/B suffix: `2.5M`
    Compact,
}

impl DisplayFormat {
    /// All formats in declaration order.
    pub const ALL: [Self; 4] = [Self::Number, Self::Currency, Self::Percentage, Self::Compact];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Currency => "currency",
            Self::Percentage => "percentage",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for DisplayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisplayFormat {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "number" | "integer" | "plain" => Ok(Self::Number),
            "currency" | "usd" => Ok(Self::Currency),
            "percentage" | "percent" => Ok(Self::Percentage),
            "compact" => Ok(Self::Compact),
            other => Err(CatalogError::UnknownFormat(other.to_string())),
        }
    }
}

/// Format `value` for display.
///
/// Non-finite values are rendered verbatim.
#[must_use]
pub fn format_value(value: f64, format: DisplayFormat) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    match format {
        DisplayFormat::Number => format_integer(value),
        DisplayFormat::Currency => format_currency(value),
        DisplayFormat::Percentage => format!("{}%", to_fixed(value, 1)),
        DisplayFormat::Compact => format_compact(value),
    }
}

/// Rounded integer with thousands separators. Halves round up.
#[must_use]
pub fn format_integer(value: f64) -> String {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    signed_grouped(rounded, "")
}

/// Whole US dollars with thousands separators. Halves round away from zero.
#[must_use]
pub fn format_currency(value: f64) -> String {
    signed_grouped(value.round(), "$")
}

/// Compact notation: `1.0B`, `2.5M`, `12.3K`, or a plain integer below 1,000.
#[must_use]
pub fn format_compact(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("{}B", to_fixed(value / 1_000_000_000.0, 1))
    } else if value >= 1_000_000.0 {
        format!("{}M", to_fixed(value / 1_000_000.0, 1))
    } else if value >= 1_000.0 {
        format!("{}K", to_fixed(value / 1_000.0, 1))
    } else {
        to_fixed(value, 0)
    }
}

/// Short view/creator count for campaign cards: `1.2M`, `45.0K`, `999`.
#[must_use]
pub fn format_short_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{}M", to_fixed(count as f64 / 1_000_000.0, 1))
    } else if count >= 1_000 {
        format!("{}K", to_fixed(count as f64 / 1_000.0, 1))
    } else {
        count.to_string()
    }
}

/// Dollars with two decimals: `$1.13`.
#[must_use]
pub fn format_usd_2dp(value: f64) -> String {
    let fixed = to_fixed(value, 2);
    match fixed.strip_prefix('-') {
        Some(abs) => format!("-${abs}"),
        None => format!("${fixed}"),
    }
}

/// A rate stored in cents as dollars: `150 -> $1.50`.
#[must_use]
pub fn format_cents_rate(cents: i64) -> String {
    format_usd_2dp(cents as f64 / 100.0)
}

/// Trend indicator: `↑ 12.5%` or `↓ 8.2%`.
#[must_use]
pub fn format_trend(value: f64, is_positive: bool) -> String {
    let arrow = if is_positive { '↑' } else { '↓' };
    format!("{arrow} {}%", value.abs())
}

/// View count with separators and unit: `400,000 views`.
#[must_use]
pub fn format_views(views: i64) -> String {
    let sign = if views < 0 { "-" } else { "" };
    format!(
        "{sign}{} views",
        group_thousands(&views.unsigned_abs().to_string())
    )
}

/// Fixed-point rendering with `decimals` places, ties away from zero.
///
/// Never renders a negative zero.
#[must_use]
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let factor = 10f64.powi(decimals as i32);
    let scaled = (value.abs() * factor).round();
    let sign = if value < 0.0 && scaled > 0.0 { "-" } else { "" };
    format!("{sign}{:.*}", decimals, scaled / factor)
}

/// Insert `,` every three digits of a plain digit string.
#[must_use]
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn signed_grouped(rounded: f64, unit: &str) -> String {
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{unit}{}", group_thousands(&digits))
}
