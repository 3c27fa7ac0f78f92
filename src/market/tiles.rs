use compact_str::CompactString;

use super::types::{CryptoAsset, EquitySnapshot, SectorSnapshot};
use super::universe::SECTORS;
use crate::heatmap::Tile;

/// One tile per constituent, sized by market cap.
pub fn equity_tiles(snapshot: &EquitySnapshot) -> Vec<Tile> {
    snapshot
        .symbols
        .iter()
        .map(|symbol| {
            let quote = snapshot.quotes.get(symbol).copied().unwrap_or_default();
            Tile {
                symbol: symbol.clone(),
                label: None,
                weight: snapshot.market_caps.get(symbol).copied(),
                change_1d: quote.change_1d,
                change_1w: snapshot.weekly.get(symbol).copied(),
                image_ref: None,
            }
        })
        .collect()
}

/// One tile per sector ETF, sized by the static S&P sector weights.
pub fn sector_tiles(snapshot: &SectorSnapshot) -> Vec<Tile> {
    SECTORS
        .iter()
        .map(|sector| {
            let quote = snapshot.quotes.get(sector.symbol).copied().unwrap_or_default();
            Tile {
                symbol: CompactString::new(sector.symbol),
                label: Some(CompactString::new(sector.name)),
                weight: Some(sector.weight),
                change_1d: quote.change_1d,
                change_1w: snapshot.weekly.get(sector.symbol).copied(),
                image_ref: None,
            }
        })
        .collect()
}

/// One tile per asset, labelled with the asset name and its logo.
pub fn crypto_tiles(assets: &[CryptoAsset]) -> Vec<Tile> {
    assets
        .iter()
        .map(|asset| Tile {
            symbol: CompactString::new(asset.symbol.to_ascii_uppercase()),
            label: Some(asset.name.clone()),
            weight: asset.market_cap,
            change_1d: asset.change_1d,
            change_1w: asset.change_1w,
            image_ref: asset.logo_url.clone(),
        })
        .collect()
}
