use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::{CancellationToken, DropGuard};

use super::model::ProgressModel;
use crate::config::ProgressConfig;

/// Periodic emitter driving a [`ProgressModel`] while a request is in flight.
///
/// The first tick fires one full interval after start. `stop` cancels the
/// task and waits for it, so the callback never runs after `stop` returns.
/// Dropping the estimator without `stop` still cancels the task.
pub struct ProgressEstimator {
    cancel: CancellationToken,
    handle: JoinHandle<ProgressModel>,
    initial: ProgressModel,
    _guard: DropGuard,
}

impl ProgressEstimator {
    pub fn start<F>(cfg: &ProgressConfig, mut on_tick: F) -> Self
    where
        F: FnMut(f64) + Send + 'static,
    {
        let period = Duration::from_millis(cfg.tick_interval_ms.max(1));
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut model = ProgressModel::from_config(cfg);
        let initial = model.clone();
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let guard = cancel.clone().drop_guard();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let before = model.value();
                        let value = model.tick(&mut rng);
                        if value > before {
                            tracing::trace!(target: "deid.progress", value, "tick");
                            on_tick(value);
                        }
                    }
                }
            }
            model
        });

        Self {
            cancel,
            handle,
            initial,
            _guard: guard,
        }
    }

    /// Cancel and join. Returns the model as the last tick left it.
    pub async fn stop(self) -> ProgressModel {
        self.cancel.cancel();
        match self.handle.await {
            Ok(model) => model,
            Err(e) => {
                tracing::warn!(target: "deid.progress", error = %e, "estimator task ended abnormally");
                self.initial
            }
        }
    }
}
