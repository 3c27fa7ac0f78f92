//! Static market universe: sector ETFs, default crypto ids, refresh cadences.

/// SPDR sector ETF with its approximate share of the S&P 500 (percent).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorEtf {
    pub symbol: &'static str,
    pub name: &'static str,
    pub weight: f64,
}

/// Display order matches the sector tab; weights are approximate mid-2025 values.
pub const SECTORS: [SectorEtf; 11] = [
    SectorEtf { symbol: "XLF", name: "Financials", weight: 13.8 },
    SectorEtf { symbol: "XLK", name: "Technology", weight: 34.0 },
    SectorEtf { symbol: "XLE", name: "Energy", weight: 3.0 },
    SectorEtf { symbol: "XLY", name: "Consumer Discretionary", weight: 10.4 },
    SectorEtf { symbol: "XLV", name: "Health Care", weight: 8.8 },
    SectorEtf { symbol: "XLB", name: "Materials", weight: 1.9 },
    SectorEtf { symbol: "XLI", name: "Industrials", weight: 8.6 },
    SectorEtf { symbol: "XLRE", name: "Real Estate", weight: 2.0 },
    SectorEtf { symbol: "XLC", name: "Communication Services", weight: 9.9 },
    SectorEtf { symbol: "XLU", name: "Utilities", weight: 2.5 },
    SectorEtf { symbol: "XLP", name: "Consumer Staples", weight: 5.2 },
];

pub fn sector(symbol: &str) -> Option<&'static SectorEtf> {
    SECTORS.iter().find(|s| s.symbol.eq_ignore_ascii_case(symbol))
}

/// CoinGecko ids for the crypto heatmap.
pub const CRYPTO_IDS: [&str; 15] = [
    "bitcoin",
    "ethereum",
    "binancecoin",
    "solana",
    "ripple",
    "cardano",
    "dogecoin",
    "tron",
    "avalanche-2",
    "toncoin",
    "chainlink",
    "polkadot",
    "uniswap",
    "litecoin",
    "polygon",
];

pub const EQUITY_QUOTES_REFRESH_MINUTES: i64 = 10;
pub const WEEKLY_REFRESH_MINUTES: i64 = 60 * 12;
pub const SECTOR_QUOTES_REFRESH_MINUTES: i64 = 10;
pub const CRYPTO_REFRESH_MINUTES: i64 = 5;
pub const EARNINGS_REFRESH_MINUTES: i64 = 60 * 24;
pub const PROFILE_REFRESH_MINUTES: i64 = 60 * 24 * 7;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_weights_sum_to_about_one_hundred() {
        let total: f64 = SECTORS.iter().map(|s| s.weight).sum();
        assert!((total - 100.1).abs() < 1e-9);
    }

    #[test]
    fn sector_lookup_is_case_insensitive() {
        assert_eq!(sector("xlk").unwrap().name, "Technology");
        assert!(sector("SPY").is_none());
    }
}
