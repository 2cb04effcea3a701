use std::fmt;
use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{FetchError, Loaded, SnapshotLocation};

/// Produces a substitute snapshot when the real one cannot be loaded.
pub type MockFn<S> = Arc<dyn Fn() -> S + Send + Sync>;

/// Loads one kind of snapshot from one location.
pub struct Loader<S> {
    location: SnapshotLocation,
    client: Client,
    fallback: Option<MockFn<S>>,
}

impl<S> Clone for Loader<S> {
    fn clone(&self) -> Self {
        Self {
            location: self.location.clone(),
            client: self.client.clone(),
            fallback: self.fallback.clone(),
        }
    }
}

impl<S> fmt::Debug for Loader<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("location", &self.location)
            .field("mock_fallback", &self.fallback.is_some())
            .finish()
    }
}

impl<S: DeserializeOwned> Loader<S> {
    /// A loader that reports fetch failures as errors.
    pub fn new(location: SnapshotLocation, client: Client) -> Self {
        Self {
            location,
            client,
            fallback: None,
        }
    }

    /// Substitute `mock()` whenever the fetch fails.
    pub fn with_mock(mut self, mock: MockFn<S>) -> Self {
        self.fallback = Some(mock);
        self
    }

    pub fn location(&self) -> &SnapshotLocation {
        &self.location
    }

    /// Load the snapshot once.
    ///
    /// With a mock fallback configured this never fails: the fetch error is
    /// logged and recorded on the returned [`Loaded`].
    pub async fn load(&self) -> Result<Loaded<S>, FetchError> {
        match self.location.fetch(&self.client).await {
            Ok(snapshot) => {
                debug!("Loaded snapshot from {}", self.location);
                Ok(Loaded::live(snapshot))
            }
            Err(err) => match &self.fallback {
                Some(mock) => Ok(substitute_mock(&self.location, err, || mock())),
                None => Err(err),
            },
        }
    }
}

fn substitute_mock<S>(
    location: &SnapshotLocation,
    err: FetchError,
    mock: impl FnOnce() -> S,
) -> Loaded<S> {
    warn!("Failed to load {}: {}; using mock data", location, err);
    Loaded::mock(mock(), err.to_string())
}

/// Fetch a snapshot, falling back to `mock` on any failure.
///
/// Never fails. The caller cannot tell live from mock data except through
/// [`Loaded::origin`].
pub async fn load_or_mock<S, F>(location: &SnapshotLocation, client: &Client, mock: F) -> Loaded<S>
where
    S: DeserializeOwned,
    F: FnOnce() -> S,
{
    match location.fetch(client).await {
        Ok(snapshot) => Loaded::live(snapshot),
        Err(err) => substitute_mock(location, err, mock),
    }
}
