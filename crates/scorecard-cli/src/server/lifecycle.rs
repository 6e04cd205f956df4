//! Process lifetime tied to an open browser tab.
//!
//! The page pings the server every couple of seconds. Once a first ping has
//! arrived, the [`Watchdog`] asks the server to shut down when the pings stop
//! for longer than the idle timeout. Nothing happens before the first ping,
//! so a slow browser launch does not end the process.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Timestamp of the most recent browser ping.
#[derive(Clone, Default)]
pub struct Heartbeat {
    last: Arc<Mutex<Option<Instant>>>,
}

impl Heartbeat {
    /// Record a ping.
    pub fn beat(&self) {
        if let Ok(mut last) = self.last.lock() {
            *last = Some(Instant::now());
        }
    }

    /// When the last ping arrived, if any ever did.
    pub fn last_beat(&self) -> Option<Instant> {
        self.last.lock().ok().and_then(|last| *last)
    }
}

/// Background task that fires `expired` after a silent period.
pub struct Watchdog {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Watchdog {
    /// Start polling `heartbeat` every `poll`.
    pub fn start(heartbeat: Heartbeat, timeout: Duration, poll: Duration, expired: Arc<Notify>) -> Self {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = stop_rx.changed() => break,
                }

                let Some(last) = heartbeat.last_beat() else {
                    continue;
                };
                if last.elapsed() > timeout {
                    log::info!("no heartbeat for {:?}, requesting shutdown", timeout);
                    expired.notify_one();
                    break;
                }
            }
        });

        Self { stop_tx, task }
    }

    /// Stop polling and wait for the task to finish.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);
    const POLL: Duration = Duration::from_secs(1);

    #[tokio::test(start_paused = true)]
    async fn test_idle_until_first_ping() {
        let expired = Arc::new(Notify::new());
        let watchdog = Watchdog::start(Heartbeat::default(), TIMEOUT, POLL, expired.clone());

        let fired = tokio::time::timeout(Duration::from_secs(60), expired.notified()).await;
        assert!(fired.is_err());

        watchdog.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_pings_stop() {
        let heartbeat = Heartbeat::default();
        let expired = Arc::new(Notify::new());
        let watchdog = Watchdog::start(heartbeat.clone(), TIMEOUT, POLL, expired.clone());

        heartbeat.beat();
        let fired = tokio::time::timeout(Duration::from_secs(10), expired.notified()).await;
        assert!(fired.is_ok());

        watchdog.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_regular_pings_keep_it_alive() {
        let heartbeat = Heartbeat::default();
        let expired = Arc::new(Notify::new());
        let watchdog = Watchdog::start(heartbeat.clone(), TIMEOUT, POLL, expired.clone());

        for _ in 0..10 {
            heartbeat.beat();
            tokio::time::sleep(Duration::from_secs(2)).await;
        }
        heartbeat.beat();

        let fired = tokio::time::timeout(Duration::from_secs(2), expired.notified()).await;
        assert!(fired.is_err());

        watchdog.stop().await;
    }

    #[test]
    fn test_heartbeat_starts_empty() {
        let heartbeat = Heartbeat::default();
        assert!(heartbeat.last_beat().is_none());
    }
}
