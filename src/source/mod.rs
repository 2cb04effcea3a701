//! Snapshot loading.
//!
//! A snapshot lives either in a local file or behind an HTTP URL
//! ([`SnapshotLocation`]). A [`Loader`] fetches it and, when the fetch
//! fails, substitutes mock data instead of failing. A [`RefreshTask`] runs
//! the loader on a schedule and publishes each result to a
//! [`ChannelSource`], which the TUI polls through the [`DataSource`] trait.
//!
//! ```text
//!  RefreshTask (tokio) ── Loader::load() ── watch channel ──▶ ChannelSource ──▶ App
//!        ▲                     │
//!  RefreshHandle               └─ on failure: mock snapshot, Origin::Mock
//!  (refresh_now / cancel)
//! ```

mod channel;
mod fetch;
mod loaded;
mod loader;
mod refresh;

pub use channel::{ChannelSource, Update};
pub use fetch::{FetchError, SnapshotLocation};
pub use loaded::{Loaded, Origin};
pub use loader::{load_or_mock, Loader, MockFn};
pub use refresh::{RefreshHandle, RefreshTask};

use std::fmt::Debug;

/// Trait for receiving loaded snapshots.
///
/// # Example
///
/// ```
/// use statusboard::source::{ChannelSource, DataSource, Loaded, Update};
/// use statusboard::ServiceSnapshot;
///
/// let (tx, mut source) = ChannelSource::<ServiceSnapshot>::create("status.json");
/// tx.send(Update::Loaded(Loaded::live(ServiceSnapshot::new("2025-01-01T00:00:00Z"))))
///     .unwrap();
///
/// if let Some(loaded) = source.poll() {
///     println!("Got {} services", loaded.snapshot.services.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    type Snapshot;

    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(loaded)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<Loaded<Self::Snapshot>>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Returns the error from the last load, if it failed and no mock
    /// data was substituted.
    fn error(&self) -> Option<&str>;
}
