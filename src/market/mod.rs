//! Provider-neutral market records and the pure helpers that turn cached
//! snapshots into heatmap tiles and the weekly earnings calendar.

pub mod earnings;
pub mod quote;
pub mod status;
pub mod tiles;
pub mod timezone;
pub mod types;
pub mod universe;
