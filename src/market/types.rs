use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Latest quote for one symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: Option<f64>,
    /// Percent change versus the previous close
    pub change_1d: Option<f64>,
}

/// Cached S&P 500 state: constituents plus per-symbol quotes, weekly changes and caps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquitySnapshot {
    pub symbols: Vec<CompactString>,
    pub quotes: BTreeMap<CompactString, Quote>,
    /// symbol → percent change over the last week
    pub weekly: BTreeMap<CompactString, f64>,
    pub market_caps: BTreeMap<CompactString, f64>,
}

/// Cached sector ETF state. Sizing comes from the static sector weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorSnapshot {
    pub quotes: BTreeMap<CompactString, Quote>,
    pub weekly: BTreeMap<CompactString, f64>,
}

/// One crypto asset as delivered by the markets endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoAsset {
    pub id: CompactString,
    pub symbol: CompactString,
    pub name: CompactString,
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub change_1d: Option<f64>,
    pub change_1w: Option<f64>,
    pub logo_url: Option<String>,
}

/// Company profile in the shape the profile endpoint returns it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    pub name: Option<String>,
    pub ticker: Option<String>,
    pub logo: Option<String>,
    pub market_capitalization: Option<f64>,
}

/// Normalized company profile, cached per symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub symbol: CompactString,
    pub name: String,
    pub logo: Option<String>,
    pub market_cap: Option<f64>,
    pub fetched_at: DateTime<Utc>,
}

impl CompanyProfile {
    /// Normalize a raw profile: upper-case symbol, name falls back to the
    /// ticker and then the symbol, scheme-less logo URLs get `https://`.
    pub fn from_raw(symbol: &str, raw: RawProfile, fetched_at: DateTime<Utc>) -> Self {
        let key = symbol.to_ascii_uppercase();
        let name = raw
            .name
            .filter(|n| !n.is_empty())
            .or(raw.ticker.filter(|t| !t.is_empty()))
            .unwrap_or_else(|| key.clone());
        let logo = raw.logo.filter(|l| !l.is_empty()).map(|l| {
            if l.starts_with("http") {
                l
            } else {
                format!("https://{}", l)
            }
        });

        Self {
            symbol: CompactString::new(&key),
            name,
            logo,
            market_cap: raw.market_capitalization.filter(|c| c.is_finite()),
            fetched_at,
        }
    }

    /// Placeholder used when a profile lookup failed.
    pub fn unknown(symbol: &str, fetched_at: DateTime<Utc>) -> Self {
        Self {
            symbol: CompactString::new(symbol),
            name: symbol.to_string(),
            logo: None,
            market_cap: None,
            fetched_at,
        }
    }
}

/// One row of the provider's earnings calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsEntry {
    pub symbol: CompactString,
    pub date: NaiveDate,
    /// "bmo" / "amc" / "dmh" or empty
    #[serde(default)]
    pub hour: Option<String>,
    #[serde(default)]
    pub eps_actual: Option<f64>,
    #[serde(default)]
    pub eps_estimate: Option<f64>,
    #[serde(default)]
    pub revenue_actual: Option<f64>,
    #[serde(default)]
    pub revenue_estimate: Option<f64>,
}
