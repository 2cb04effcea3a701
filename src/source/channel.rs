//! Channel-based data source.
//!
//! Receives load results via a tokio watch channel. The refresh task is the
//! producer; the TUI polls the receiving end once per frame.

use std::fmt::Debug;

use tokio::sync::watch;

use super::{DataSource, Loaded};

/// The latest outcome of a load, as published on the channel.
#[derive(Debug, Clone)]
pub enum Update<S> {
    /// Nothing loaded yet.
    Pending,
    /// A snapshot was loaded (live or mock).
    Loaded(Loaded<S>),
    /// The load failed and no mock data was substituted.
    Failed(String),
}

/// A data source that receives snapshots via a channel.
///
/// # Example
///
/// ```
/// use statusboard::source::ChannelSource;
/// use statusboard::BackupSnapshot;
///
/// let (tx, source) = ChannelSource::<BackupSnapshot>::create("backup-status.json");
/// ```
#[derive(Debug)]
pub struct ChannelSource<S> {
    receiver: watch::Receiver<Update<S>>,
    description: String,
    last_error: Option<String>,
}

impl<S: Clone> ChannelSource<S> {
    /// Create a new channel source.
    ///
    /// `source_description` says where snapshots come from
    /// (e.g., "status.json", "https://status.example.com/status.json").
    pub fn new(receiver: watch::Receiver<Update<S>>, source_description: &str) -> Self {
        Self {
            receiver,
            description: source_description.to_string(),
            last_error: None,
        }
    }

    /// Create a channel pair. The sender publishes updates, the source is
    /// handed to the TUI.
    pub fn create(source_description: &str) -> (watch::Sender<Update<S>>, Self) {
        let (tx, rx) = watch::channel(Update::Pending);
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl<S: Clone + Send + Sync + Debug> DataSource for ChannelSource<S> {
    type Snapshot = S;

    fn poll(&mut self) -> Option<Loaded<S>> {
        if !self.receiver.has_changed().unwrap_or(false) {
            return None;
        }

        match self.receiver.borrow_and_update().clone() {
            Update::Pending => None,
            Update::Loaded(loaded) => {
                self.last_error = None;
                Some(loaded)
            }
            Update::Failed(err) => {
                self.last_error = Some(err);
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
