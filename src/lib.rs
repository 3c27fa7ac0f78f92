// Public library interface for marketmap-rs
// The debug-layout tool and any front end build on these modules

pub mod cache;
pub mod config;
pub mod dashboard;
pub mod heatmap;
pub mod layout;
pub mod market;
