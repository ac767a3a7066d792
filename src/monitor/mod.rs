/// # Poll Cycle Orchestration
///
/// Drives the tick pipeline: fetch a snapshot per category, normalize it,
/// record the channel updates, evict stale samples and publish a
/// [`SensorView`].
///
/// ## Implementation Details
///
/// [`SensorPoller`] is the synchronous core and can be ticked by hand with an
/// explicit elapsed time. [`SensorMonitor`] runs a poller on a tokio interval:
///
/// 1. **Single owner**: the poller is moved into a blocking worker for each
///    tick and handed back when the tick completes, so only one context ever
///    mutates the registries.
/// 2. **Serialized ticks**: the loop waits for a tick to finish before taking
///    the next one. Interval ticks missed while a cycle is in flight are
///    skipped, so views are published strictly in tick order.
/// 3. **Handoff**: each finished view is kept as the latest view and offered
///    to the presentation side over a bounded channel. When the channel is
///    full the view is dropped instead of stalling the loop.
///
/// ## Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use hwmon_history::config::MonitorConfig;
/// use hwmon_history::core::types::SensorReading;
/// use hwmon_history::hardware::{Hardware, HardwareInventory, HardwareType};
/// use hwmon_history::monitor::SensorMonitor;
///
/// #[tokio::main]
/// async fn main() -> hwmon_history::Result<()> {
///     let inventory = Arc::new(HardwareInventory::new(vec![
///         Hardware::new("Test CPU", HardwareType::Cpu)
///             .with_sensor(SensorReading::temperature("CPU Package", 45.0, 30.0, 70.0)),
///     ]));
///
///     let config = MonitorConfig { poll_interval_ms: 50, ..MonitorConfig::default() };
///     let mut monitor = SensorMonitor::new(inventory, config).await?;
///
///     let view = monitor.next_view().await?;
///     assert_eq!(view.cpu.representative, Some(45.0));
///
///     monitor.stop().await?;
///     Ok(())
/// }
/// ```
use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use futures::Stream;
use parking_lot::{Mutex, RwLock};
use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    config::{constants::VIEW_CHANNEL_CAPACITY, MonitorConfig},
    core::{
        metrics::ChannelRegistry,
        types::{Category, SensorItem},
    },
    normalize::Normalizer,
    traits::SensorSource,
    view::{CategoryStatus, CategoryView, SensorView},
    Error, Result,
};

/// Phase of the poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Waiting for the next tick
    Idle,
    /// A cycle is in flight
    Polling,
    /// The loop has exited
    Stopped,
}

/// What a category produced during one tick, before it is rendered into a view
#[derive(Debug)]
struct CategoryOutcome {
    status: CategoryStatus,
    items: Vec<SensorItem>,
    representative: Option<f64>,
}

impl CategoryOutcome {
    fn absent(err: &Error) -> Self {
        Self { status: CategoryStatus::from(err), items: Vec::new(), representative: None }
    }
}

/// Synchronous tick pipeline over an injected sensor source
pub struct SensorPoller {
    source: Arc<dyn SensorSource>,
    config: MonitorConfig,
    normalizer: Normalizer,
    registries: HashMap<Category, ChannelRegistry>,
    hardware_names: HashMap<Category, String>,
    tick: u64,
    last_elapsed: Option<f64>,
}

impl std::fmt::Debug for SensorPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorPoller")
            .field("config", &self.config)
            .field("registries", &self.registries)
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}

impl SensorPoller {
    /// Creates a poller, resolving hardware names once up front
    pub fn new(source: Arc<dyn SensorSource>, config: MonitorConfig) -> Result<Self> {
        config.validate()?;

        let hardware_names = Category::ALL
            .iter()
            .map(|&category| {
                let name = source.hardware_name(category).unwrap_or_else(|| category.default_hardware_name().to_string());
                (category, name)
            })
            .collect();
        let registries = Category::ALL.iter().map(|&category| (category, ChannelRegistry::new())).collect();

        Ok(Self {
            normalizer: Normalizer::new(&config),
            source,
            config,
            registries,
            hardware_names,
            tick: 0,
            last_elapsed: None,
        })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Number of ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn hardware_name(&self, category: Category) -> &str {
        self.hardware_names.get(&category).map_or(category.default_hardware_name(), String::as_str)
    }

    pub fn registry(&self, category: Category) -> &ChannelRegistry {
        &self.registries[&category]
    }

    /// Runs one tick at `elapsed` seconds since start and returns its view.
    ///
    /// Categories are isolated: a category that fails gets no sample this
    /// tick but every other category is still updated. Eviction runs on every
    /// channel whether or not it reported.
    #[instrument(level = "debug", skip(self), fields(tick = self.tick + 1))]
    pub fn poll_once(&mut self, elapsed: f64) -> SensorView {
        self.tick += 1;
        let elapsed = match self.last_elapsed {
            Some(last) if elapsed < last => {
                warn!(elapsed, last, "elapsed time went backwards, holding at last tick");
                last
            },
            _ => elapsed,
        };
        self.last_elapsed = Some(elapsed);

        let mut outcomes = HashMap::new();
        for category in Category::ALL {
            outcomes.insert(category, self.poll_category(category, elapsed));
        }

        let horizon = elapsed - self.config.retention_window_secs;
        for (category, registry) in self.registries.iter_mut() {
            let evicted = registry.evict_older_than(horizon);
            let pruned = registry.prune_stale(self.config.stale_channels);
            if evicted > 0 || !pruned.is_empty() {
                debug!(%category, evicted, pruned = pruned.len(), "trimmed series");
            }
        }

        let mut view_for = |category: Category| {
            let outcome = outcomes.remove(&category).unwrap_or_else(|| CategoryOutcome::absent(&Error::system("category not polled")));
            CategoryView::build(
                category,
                self.hardware_name(category).to_string(),
                outcome.status,
                outcome.items,
                outcome.representative,
                self.registry(category),
            )
        };

        SensorView {
            tick: self.tick,
            elapsed,
            cpu: view_for(Category::Cpu),
            gpu: view_for(Category::Gpu),
            fan: view_for(Category::Motherboard),
        }
    }

    fn poll_category(&mut self, category: Category, elapsed: f64) -> CategoryOutcome {
        let snapshot = match self.source.fetch(category).and_then(|raw| self.normalizer.normalize(&raw, category)) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                if err.is_category_absence() {
                    warn!(%category, error = %err, "no reading this tick");
                } else {
                    error!(%category, error = %err, "category poll failed");
                }
                return CategoryOutcome::absent(&err);
            },
        };

        let registry = self.registries.entry(category).or_default();
        for (key, value) in &snapshot.channels {
            if let Err(err) = registry.upsert(key, elapsed, *value) {
                warn!(%category, channel = %key, error = %err, "sample rejected");
            }
        }

        CategoryOutcome { status: CategoryStatus::Ok, items: snapshot.items, representative: snapshot.representative }
    }
}

/// Runs a [`SensorPoller`] in the background and hands views to the presentation side
///
/// The monitor stops when [`SensorMonitor::stop`] is called or when it is
/// dropped.
pub struct SensorMonitor {
    poll_interval: Duration,
    view_timeout: Duration,
    stop_tx: mpsc::Sender<()>,
    monitor_task: Option<JoinHandle<()>>,
    view_rx: mpsc::Receiver<SensorView>,
    latest: Arc<RwLock<Option<SensorView>>>,
    state: Arc<Mutex<PollState>>,
}

impl SensorMonitor {
    /// Starts polling `source` on the configured interval.
    ///
    /// The first tick fires immediately. Must be called within a tokio runtime.
    pub async fn new(source: Arc<dyn SensorSource>, config: MonitorConfig) -> Result<Self> {
        let poll_interval = config.poll_interval();
        let view_timeout = config.view_timeout();
        let poller = SensorPoller::new(source, config)?;

        let (view_tx, view_rx) = mpsc::channel(VIEW_CHANNEL_CAPACITY);
        let (stop_tx, mut stop_rx) = mpsc::channel(1);
        let latest = Arc::new(RwLock::new(None));
        let state = Arc::new(Mutex::new(PollState::Idle));

        let task_latest = Arc::clone(&latest);
        let task_state = Arc::clone(&state);
        let monitor_task = tokio::spawn(async move {
            let start = Instant::now();
            let mut interval = tokio::time::interval(poll_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut poller = Some(poller);

            info!(interval_ms = poll_interval.as_millis() as u64, "sensor monitor started");
            loop {
                tokio::select! {
                    biased;
                    _ = stop_rx.recv() => break,
                    _ = interval.tick() => {},
                }

                let Some(mut owned) = poller.take() else {
                    break;
                };
                *task_state.lock() = PollState::Polling;
                let elapsed = start.elapsed().as_secs_f64();

                // Hardware reads may block, keep them off the runtime workers
                let result = tokio::task::spawn_blocking(move || {
                    let view = owned.poll_once(elapsed);
                    (owned, view)
                })
                .await;
                *task_state.lock() = PollState::Idle;

                let (owned, view) = match result {
                    Ok(pair) => pair,
                    Err(e) => {
                        error!(error = %e, "poll cycle panicked");
                        break;
                    },
                };
                poller = Some(owned);
                *task_latest.write() = Some(view.clone());

                // Never wait on the presentation side; a reader that falls
                // behind loses views but the latest one is always kept above
                match view_tx.try_send(view) {
                    Ok(()) => {},
                    Err(TrySendError::Full(view)) => {
                        debug!(tick = view.tick, "view channel full, dropping view");
                    },
                    Err(TrySendError::Closed(_)) => {
                        debug!("view receiver dropped");
                        break;
                    },
                }
            }

            *task_state.lock() = PollState::Stopped;
            info!("sensor monitor stopped");
        });

        Ok(Self { poll_interval, view_timeout, stop_tx, monitor_task: Some(monitor_task), view_rx, latest, state })
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Current phase of the poll loop
    pub fn state(&self) -> PollState {
        *self.state.lock()
    }

    /// The most recently completed view, if any tick has finished
    pub fn latest_view(&self) -> Option<SensorView> {
        self.latest.read().clone()
    }

    /// Waits for the next published view.
    ///
    /// Fails with `Error::Timeout` when no view arrives within the configured
    /// view timeout, which happens when a sensor fetch hangs.
    pub async fn next_view(&mut self) -> Result<SensorView> {
        tokio::time::timeout(self.view_timeout, self.view_rx.recv())
            .await
            .map_err(|_| Error::Timeout)?
            .ok_or(Error::ChannelClosed)
    }

    /// Published views as a stream, ending when the monitor stops
    pub fn views(&mut self) -> impl Stream<Item = SensorView> + '_ {
        futures::stream::poll_fn(move |cx| self.view_rx.poll_recv(cx))
    }

    /// Stops the poll loop and waits for the in-flight tick to finish
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(handle) = self.monitor_task.take() {
            // The loop may already have exited on its own
            let _ = self.stop_tx.send(()).await;

            match tokio::time::timeout(Duration::from_secs(5), handle).await {
                Ok(result) => {
                    result.map_err(|e| Error::system(format!("Monitor task panicked: {}", e)))?;
                },
                Err(_) => {
                    return Err(Error::system("Timed out waiting for monitor task to stop"));
                },
            }
        }

        Ok(())
    }
}

impl Drop for SensorMonitor {
    fn drop(&mut self) {
        if let Some(handle) = self.monitor_task.take() {
            let _ = self.stop_tx.try_send(());
            handle.abort();
        }
    }
}

/// Pull-based access to a running monitor
#[async_trait]
pub trait SensorMonitoring: Send + Sync {
    /// Get the next published view
    async fn next_view(&mut self) -> Result<SensorView>;

    /// Stop the monitor
    async fn stop(&mut self) -> Result<()>;
}

#[async_trait]
impl SensorMonitoring for SensorMonitor {
    async fn next_view(&mut self) -> Result<SensorView> {
        SensorMonitor::next_view(self).await
    }

    async fn stop(&mut self) -> Result<()> {
        SensorMonitor::stop(self).await
    }
}
