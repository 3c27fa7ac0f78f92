/// Diagnostic tool to verify tiles → layout → classification pipeline
use std::path::PathBuf;

use anyhow::{Context, Result};
use marketmap_rs::config::HeatmapConfig;
use marketmap_rs::heatmap::format::format_pct;
use marketmap_rs::heatmap::{build_heatmap, Tile, Timeframe};
use marketmap_rs::market::tiles::sector_tiles;
use marketmap_rs::market::types::{Quote, SectorSnapshot};
use marketmap_rs::market::universe::SECTORS;

struct Args {
    input: Option<PathBuf>,
    timeframe: Timeframe,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        input: None,
        timeframe: Timeframe::default(),
        json: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--json" => args.json = true,
            "--timeframe" => {
                let value = it.next().context("--timeframe needs a value (1D or 1W)")?;
                args.timeframe = value.parse()?;
            }
            flag if flag.starts_with("--") => anyhow::bail!("Unknown flag {}", flag),
            path => args.input = Some(PathBuf::from(path)),
        }
    }
    Ok(args)
}

/// Sector universe with a spread of made-up moves covering every bucket.
fn synthetic_tiles() -> Vec<Tile> {
    const MOVES: [f64; 11] = [4.2, 1.3, 0.2, -0.1, -0.8, -3.5, 2.1, 0.0, -1.7, 3.0, 0.6];
    let mut snapshot = SectorSnapshot::default();
    for (i, sector) in SECTORS.iter().enumerate() {
        let change = MOVES[i % MOVES.len()];
        snapshot.quotes.insert(
            sector.symbol.into(),
            Quote {
                price: Some(100.0 + change),
                change_1d: Some(change),
            },
        );
        snapshot.weekly.insert(sector.symbol.into(), change * 2.5);
    }
    sector_tiles(&snapshot)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("marketmap_rs=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;

    let tiles = match &args.input {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<Vec<Tile>>(&raw)
                .with_context(|| format!("Invalid tile list in {}", path.display()))?
        }
        None => synthetic_tiles(),
    };

    let config = HeatmapConfig::default();
    let heatmap = build_heatmap(&tiles, args.timeframe, &config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&heatmap)?);
        return Ok(());
    }

    println!("=== DIAGNOSTIC: Tiles → Heatmap Pipeline ===");
    println!(
        "Input: {}",
        args.input
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "synthetic sector universe".to_string())
    );

    println!("\n[1] Tiles supplied: {}", tiles.len());
    println!("[2] Tiles placed:   {} ({})", heatmap.len(), heatmap.timeframe);

    println!("\n[3] Top 10 tiles by area:");
    let mut by_area: Vec<_> = heatmap.tiles.iter().collect();
    by_area.sort_by(|a, b| b.rect.area().total_cmp(&a.rect.area()));
    for (i, tile) in by_area.iter().take(10).enumerate() {
        println!(
            "    [{}] {:<6} {:>8} {:<13} rect: {:.3}x{:.3} at ({:.3}, {:.3}) - {:?}",
            i,
            tile.symbol,
            format_pct(tile.change.display_value),
            tile.change.bucket.css_class(),
            tile.rect.w,
            tile.rect.h,
            tile.rect.x,
            tile.rect.y,
            tile.size_class
        );
    }

    println!("\n[4] Checking for anomalies:");
    let canvas_area = config.canvas.area();
    let covered = heatmap.covered_area();
    println!("    Total tile area: {:.4}", covered);
    println!("    Canvas area:     {:.4}", canvas_area);
    println!("    Coverage: {:.1}%", (covered / canvas_area) * 100.0);
    println!("    Max aspect ratio: {:.2}", heatmap.max_aspect_ratio());

    Ok(())
}
