//! Per-domain snapshot caching with injected storage and time.

pub mod clock;
pub mod snapshot;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use snapshot::{CacheDomain, RefreshStatus, Snapshot, SnapshotCache};
pub use store::{JsonFileStore, MemoryStore, SnapshotStore};
