//! Periodic tick driver for the manual timer.
//!
//! A tokio task ticks on a fixed period and lets the shared timer fold in
//! the time elapsed since its previous tick or resume. Shutting the driver down (explicitly or by
//! dropping it) marks it cancelled before aborting the task, and the
//! cancelled flag is checked under the timer lock, so no tick mutates the
//! timer after shutdown returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::timer::{TickOutcome, TimerHandle};

/// Callback invoked after a tick changed the timer (e.g. to request a repaint).
pub type TickCallback = Arc<dyn Fn(TickOutcome) + Send + Sync>;

/// Owns the background tick task for one timer.
pub struct TimerDriver {
    timer: TimerHandle,
    cancelled: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl TimerDriver {
    /// Spawn the tick task on `runtime`.
    pub fn spawn(
        runtime: &Handle,
        timer: TimerHandle,
        period: Duration,
        on_tick: Option<TickCallback>,
    ) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let task = runtime.spawn(tick_loop(
            timer.clone(),
            period.max(Duration::from_millis(1)),
            Arc::clone(&cancelled),
            on_tick,
        ));
        info!(period_ms = period.as_millis() as u64, "Timer driver started");
        Self {
            timer,
            cancelled,
            task: Some(task),
        }
    }

    pub fn timer(&self) -> &TimerHandle {
        &self.timer
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop ticking. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            // Taking the lock orders this store after any tick in progress.
            let _guard = self.timer.lock();
            self.cancelled.store(true, Ordering::SeqCst);
            task.abort();
            info!("Timer driver stopped");
        }
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn tick_loop(
    timer: TimerHandle,
    period: Duration,
    cancelled: Arc<AtomicBool>,
    on_tick: Option<TickCallback>,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let outcome = {
            let mut guard = timer.lock();
            if cancelled.load(Ordering::SeqCst) {
                return;
            }
            guard.tick(Instant::now())
        };

        match outcome {
            TickOutcome::Idle => {}
            TickOutcome::Advanced => notify(&on_tick, outcome),
            TickOutcome::Finished => {
                debug!("Timer finished during tick");
                notify(&on_tick, outcome);
            }
        }
    }
}

fn notify(on_tick: &Option<TickCallback>, outcome: TickOutcome) {
    if let Some(callback) = on_tick {
        callback(outcome);
    }
}
