//! Cancellable periodic polling.
//!
//! [`spawn_poll`] runs a tick closure on a fixed period inside one tokio task
//! and hands back a [`PollHandle`]. Ticks run one after another, never
//! concurrently, so each cycle's response is applied before the next request
//! goes out. Stopping the handle (or dropping it) tears the task down.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Owner of one running poll loop.
#[derive(Debug)]
pub struct PollHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Signal the loop to stop and wait for it. A tick already in flight is
    /// allowed to finish.
    pub async fn stop(mut self) {
        let _ = self.stop.send(true);
        if let Err(e) = (&mut self.task).await {
            if e.is_panic() {
                tracing::error!("poll task panicked: {}", e);
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start calling `tick` every `period`, beginning immediately.
///
/// Must be called from within a tokio runtime.
pub fn spawn_poll<F, Fut>(period: Duration, mut tick: F) -> PollHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let (stop, mut stopped) = watch::channel(false);
    let task = tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                biased;
                changed = stopped.changed() => {
                    if changed.is_err() || *stopped.borrow() {
                        break;
                    }
                }
                _ = interval.tick() => tick().await,
            }
        }
        tracing::debug!("poll loop stopped");
    });
    PollHandle { stop, task }
}
