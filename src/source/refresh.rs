//! Periodic reloading of a snapshot.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::{ChannelSource, Loader, Update};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Spawns the background task that reloads a snapshot on a fixed period.
pub struct RefreshTask;

impl RefreshTask {
    /// Load once immediately, then every `every`, publishing each result.
    ///
    /// Loads run one at a time, so a slow fetch delays the next tick rather
    /// than racing it. Must be called from within a tokio runtime.
    pub fn spawn<S>(loader: Loader<S>, every: Duration) -> (ChannelSource<S>, RefreshHandle)
    where
        S: DeserializeOwned + Clone + Send + Sync + Debug + 'static,
    {
        let period = every.max(MIN_PERIOD);
        let (tx, source) = ChannelSource::create(&loader.location().to_string());
        let trigger = Arc::new(Notify::new());
        let notified = trigger.clone();

        info!("Refreshing {} every {:?}", loader.location(), period);

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = notified.notified() => {
                        debug!("Manual refresh of {}", loader.location());
                        ticker.reset();
                    }
                }

                let update = match loader.load().await {
                    Ok(loaded) => Update::Loaded(loaded),
                    Err(err) => {
                        warn!("Failed to load {}: {}", loader.location(), err);
                        Update::Failed(err.to_string())
                    }
                };

                if tx.send(update).is_err() {
                    debug!("Receiver for {} dropped, stopping refresh", loader.location());
                    break;
                }
            }
        });

        let handle = RefreshHandle {
            task: Some(task),
            trigger,
            period,
        };
        (source, handle)
    }
}

/// Controls a running [`RefreshTask`].
///
/// Dropping the handle cancels the task.
#[derive(Debug)]
pub struct RefreshHandle {
    task: Option<JoinHandle<()>>,
    trigger: Arc<Notify>,
    period: Duration,
}

impl RefreshHandle {
    /// Load again now instead of waiting for the next tick.
    ///
    /// A request made while a load is in flight runs right after it.
    pub fn refresh_now(&self) {
        if !self.is_cancelled() {
            self.trigger.notify_one();
        }
    }

    /// Stop the task. Calling this more than once is a no-op.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.task.as_ref().is_none_or(|t| t.is_finished())
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
