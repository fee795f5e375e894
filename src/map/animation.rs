//! Travelling markers along the spokes of the selected hotel
//!
//! Every connector gets its own tokio task that loops the marker from the
//! hotel to the anchor until the task is aborted. Handles abort their task
//! when dropped, so discarding a scene's handles tears the loops down.

use serde::Serialize;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::trace;

use super::projection::CanvasPoint;
use super::scene::Connector;

/// Fixed-duration loop of one marker along one connector
#[derive(Debug, Clone, PartialEq)]
pub struct SpokeAnimation {
    pub anchor_id: String,
    pub color: String,
    pub from: CanvasPoint,
    pub to: CanvasPoint,
    pub duration: Duration,
    pub frame_interval: Duration,
}

impl SpokeAnimation {
    #[must_use]
    pub fn new(connector: &Connector, duration: Duration, frame_interval: Duration) -> Self {
        Self {
            anchor_id: connector.anchor_id.clone(),
            color: connector.color.clone(),
            from: connector.from,
            to: connector.to,
            duration,
            frame_interval,
        }
    }

    /// Linear progress in `[0, 1)` after `elapsed`, restarting every `duration`
    #[must_use]
    pub fn progress_at(&self, elapsed: Duration) -> f64 {
        let period = self.duration.as_secs_f64();
        if period <= 0.0 {
            return 0.0;
        }
        (elapsed.as_secs_f64() % period) / period
    }

    #[must_use]
    pub fn position_at(&self, elapsed: Duration) -> CanvasPoint {
        self.from.lerp(self.to, self.progress_at(elapsed))
    }

    /// Start the loop on `runtime`. It runs until the returned handle is cancelled or dropped.
    pub fn spawn(self, runtime: &Handle) -> AnimationHandle {
        let (tx, rx) = watch::channel(self.from);
        let anchor_id = self.anchor_id.clone();
        let color = self.color.clone();

        let task = runtime.spawn(async move {
            let started = Instant::now();
            let mut ticker = tokio::time::interval(self.frame_interval.max(Duration::from_millis(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let position = self.position_at(started.elapsed());
                if tx.send(position).is_err() {
                    trace!(anchor = %self.anchor_id, "Spoke marker has no observers, stopping");
                    break;
                }
            }
        });

        AnimationHandle {
            anchor_id,
            color,
            position: rx,
            task,
        }
    }
}

/// Current state of one travelling marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpokeMarker {
    pub anchor_id: String,
    pub color: String,
    pub position: CanvasPoint,
}

/// Owner of a running spoke animation
#[derive(Debug)]
pub struct AnimationHandle {
    anchor_id: String,
    color: String,
    position: watch::Receiver<CanvasPoint>,
    task: JoinHandle<()>,
}

impl AnimationHandle {
    #[must_use]
    pub fn anchor_id(&self) -> &str {
        &self.anchor_id
    }

    /// Most recently published marker position
    #[must_use]
    pub fn position(&self) -> CanvasPoint {
        *self.position.borrow()
    }

    #[must_use]
    pub fn marker(&self) -> SpokeMarker {
        SpokeMarker {
            anchor_id: self.anchor_id.clone(),
            color: self.color.clone(),
            position: self.position(),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Handle that observes the task after this owner is gone
    #[must_use]
    pub fn abort_handle(&self) -> AbortHandle {
        self.task.abort_handle()
    }

    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
