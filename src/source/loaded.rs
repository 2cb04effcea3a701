use std::time::Instant;

/// Where a loaded snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Fetched from the configured location.
    Live,
    /// Generated because the fetch failed.
    Mock,
}

impl Origin {
    pub fn label(&self) -> &'static str {
        match self {
            Origin::Live => "live",
            Origin::Mock => "mock",
        }
    }
}

/// A snapshot together with how and when it was obtained.
#[derive(Debug, Clone)]
pub struct Loaded<S> {
    pub snapshot: S,
    pub origin: Origin,
    /// The fetch error that caused mock data to be used.
    pub fetch_error: Option<String>,
    pub loaded_at: Instant,
}

impl<S> Loaded<S> {
    pub fn live(snapshot: S) -> Self {
        Self {
            snapshot,
            origin: Origin::Live,
            fetch_error: None,
            loaded_at: Instant::now(),
        }
    }

    pub fn mock(snapshot: S, fetch_error: String) -> Self {
        Self {
            snapshot,
            origin: Origin::Mock,
            fetch_error: Some(fetch_error),
            loaded_at: Instant::now(),
        }
    }

    pub fn is_mock(&self) -> bool {
        self.origin == Origin::Mock
    }
}
