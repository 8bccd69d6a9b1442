//! Live trip tracking.
//!
//! One task owns the [`Navigator`] and the [`Estimator`]. Position fixes and
//! motion samples arrive on separate bounded channels and are handled one
//! at a time, so neither piece of state is ever shared. The latest
//! [`TrackerView`] is published on a watch channel.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::motion::{DeadReckoning, Estimator, MotionSample, MotionSnapshot};
use crate::navigation::{Alert, NavStatus, Navigator, PositionFix, StatusView};
use crate::notify::NotificationSink;

/// Channel sizes for the two producers.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub fix_buffer: usize,
    pub sample_buffer: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            fix_buffer: 64,
            sample_buffer: 4096,
        }
    }
}

/// The tracker task has exited.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("tracker has stopped")]
pub struct TrackerStopped;

/// Snapshot of a tracked trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerView {
    pub status: NavStatus,
    pub next_station: Option<String>,
    /// Stations left including the next one.
    pub remaining: usize,
    pub display: StatusView,
    /// Alert currently on display.
    pub alert: Option<Alert>,
    pub motion: MotionSnapshot,
    pub finished: bool,
}

impl TrackerView {
    fn from_navigator(navigator: &Navigator) -> Self {
        Self {
            status: navigator.status(),
            next_station: next_station_name(navigator),
            remaining: navigator.remaining_len(),
            display: StatusView::default(),
            alert: None,
            motion: MotionSnapshot::default(),
            finished: navigator.is_finished(),
        }
    }
}

fn next_station_name(navigator: &Navigator) -> Option<String> {
    navigator
        .next_station()
        .map(|id| navigator.network().graph().name(id).to_string())
}

/// Cloneable senders into a running tracker.
#[derive(Debug, Clone)]
pub struct TrackerInputs {
    fixes: mpsc::Sender<PositionFix>,
    samples: mpsc::Sender<MotionSample>,
}

impl TrackerInputs {
    pub async fn push_fix(&self, fix: PositionFix) -> Result<(), TrackerStopped> {
        self.fixes.send(fix).await.map_err(|_| TrackerStopped)
    }

    pub async fn push_sample(&self, sample: MotionSample) -> Result<(), TrackerStopped> {
        self.samples.send(sample).await.map_err(|_| TrackerStopped)
    }
}

/// Owner of a running tracker. Dropping it stops the task.
#[derive(Debug)]
pub struct TrackerHandle {
    inputs: TrackerInputs,
    view: watch::Receiver<TrackerView>,
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl TrackerHandle {
    pub fn inputs(&self) -> TrackerInputs {
        self.inputs.clone()
    }

    pub async fn push_fix(&self, fix: PositionFix) -> Result<(), TrackerStopped> {
        self.inputs.push_fix(fix).await
    }

    pub async fn push_sample(&self, sample: MotionSample) -> Result<(), TrackerStopped> {
        self.inputs.push_sample(sample).await
    }

    /// Latest view.
    pub fn view(&self) -> TrackerView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TrackerView> {
        self.view.clone()
    }

    /// True once the task has exited (trip finished or stopped).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop tracking and wait for the task to exit.
    pub async fn stop(self) {
        // The task may already have exited; nothing to signal then.
        let _ = self.stop.send(());
        if let Err(e) = self.task.await {
            warn!(error = %e, "tracker task failed");
        }
    }

    /// Wait for the trip to finish on its own.
    pub async fn wait(self) {
        let Self { task, stop, .. } = self;
        if let Err(e) = task.await {
            warn!(error = %e, "tracker task failed");
        }
        drop(stop);
    }
}

/// Start tracking a trip.
pub fn spawn<N>(
    navigator: Navigator,
    estimator: Estimator,
    notifier: Arc<N>,
    config: &TrackerConfig,
) -> TrackerHandle
where
    N: NotificationSink + 'static,
{
    let (fix_tx, fix_rx) = mpsc::channel(config.fix_buffer);
    let (sample_tx, sample_rx) = mpsc::channel(config.sample_buffer);
    let (stop_tx, stop_rx) = oneshot::channel();
    let (view_tx, view_rx) = watch::channel(TrackerView::from_navigator(&navigator));

    let worker = Worker {
        navigator,
        estimator,
        notifier,
        view: view_tx,
    };
    let task = tokio::spawn(worker.run(fix_rx, sample_rx, stop_rx));

    TrackerHandle {
        inputs: TrackerInputs {
            fixes: fix_tx,
            samples: sample_tx,
        },
        view: view_rx,
        stop: stop_tx,
        task,
    }
}

struct Worker<N> {
    navigator: Navigator,
    estimator: Estimator,
    notifier: Arc<N>,
    view: watch::Sender<TrackerView>,
}

impl<N: NotificationSink + 'static> Worker<N> {
    async fn run(
        mut self,
        mut fixes: mpsc::Receiver<PositionFix>,
        mut samples: mpsc::Receiver<MotionSample>,
        mut stop: oneshot::Receiver<()>,
    ) {
        info!(
            stations = self.navigator.remaining_len(),
            "tracker started"
        );

        let mut fixes_open = true;
        let mut samples_open = true;
        let mut clear_at: Option<Instant> = None;

        loop {
            let finished = self.navigator.is_finished();
            if finished && clear_at.is_none() {
                break;
            }
            if !fixes_open && !samples_open {
                debug!("both producers closed");
                break;
            }

            tokio::select! {
                _ = &mut stop => {
                    debug!("stop requested");
                    break;
                }
                fix = fixes.recv(), if fixes_open && !finished => match fix {
                    Some(fix) => {
                        if let Some(deadline) = self.on_fix(&fix) {
                            clear_at = Some(deadline);
                        }
                    }
                    None => fixes_open = false,
                },
                sample = samples.recv(), if samples_open && !finished => match sample {
                    Some(sample) => {
                        let snapshot = self.estimator.update(&sample);
                        self.view.send_modify(|view| view.motion = snapshot);
                    }
                    None => samples_open = false,
                },
                _ = sleep_until(clear_at.unwrap_or_else(Instant::now)), if clear_at.is_some() => {
                    clear_at = None;
                    self.view.send_modify(|view| view.alert = None);
                }
            }
        }

        info!(
            finished = self.navigator.is_finished(),
            "tracker stopped"
        );
    }

    /// Tick the navigator. Returns when a new alert should be cleared.
    fn on_fix(&mut self, fix: &PositionFix) -> Option<Instant> {
        let outcome = self.navigator.tick(fix, &mut self.estimator, Utc::now());
        let snapshot = self.estimator.snapshot();
        let next_station = next_station_name(&self.navigator);
        let remaining = self.navigator.remaining_len();
        let finished = self.navigator.is_finished();

        let deadline = outcome.alert.as_ref().map(|alert| {
            self.deliver(alert);
            let display = (alert.expires_at - alert.raised_at)
                .to_std()
                .unwrap_or_default();
            Instant::now() + display
        });

        self.view.send_modify(|view| {
            view.status = outcome.status;
            view.next_station = next_station;
            view.remaining = remaining;
            view.display = outcome.view;
            view.motion = snapshot;
            view.finished = finished;
            if outcome.alert.is_some() {
                view.alert = outcome.alert;
            }
        });

        deadline
    }

    /// Hand an alert to the sink without blocking the loop.
    fn deliver(&self, alert: &Alert) {
        let notifier = Arc::clone(&self.notifier);
        let title = alert.title.clone();
        let body = alert.body.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&title, &body).await {
                warn!(error = %e, title = %title, "notification delivery failed");
            }
        });
    }
}
