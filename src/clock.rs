//! Shared once-per-second clock with subscriber-counted lifecycle.
//!
//! A [`ClockSource`] publishes the current Unix time in whole seconds to any
//! number of [`ClockSubscription`]s. The first subscription starts a single
//! tick task on the current tokio runtime; dropping the last one stops it.
//! All subscribers read the same published value for a given tick.
//!
//! In a non-persistent context (one-shot rendering, no runtime) the clock
//! never ticks: the first subscription takes a single static read that every
//! later subscriber shares.

use crate::time::{SystemTimeSource, TimeSource};
use core::time::Duration;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace, warn};

/// Default period between ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Shortest accepted tick period.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Clock configuration.
///
/// # Example
/// ```
/// use time_layers::ClockConfig;
///
/// let config = ClockConfig::new().persistent_context(false);
/// assert!(!config.is_persistent_context());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    tick_interval: Duration,
    persistent_context: bool,
}

impl ClockConfig {
    /// Creates the default configuration: 1 s ticks in a persistent context.
    pub const fn new() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            persistent_context: true,
        }
    }

    /// Sets the tick period. Values below [`MIN_TICK_INTERVAL`] are raised to it.
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(MIN_TICK_INTERVAL);
        self
    }

    /// Declares whether the host can keep a long-lived timer running.
    ///
    /// Pass `false` for one-shot rendering passes; the clock then serves a
    /// static read and never spawns a task.
    pub const fn persistent_context(mut self, persistent: bool) -> Self {
        self.persistent_context = persistent;
        self
    }

    /// Returns the tick period.
    pub const fn get_tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Returns true if ticking is allowed.
    pub const fn is_persistent_context(&self) -> bool {
        self.persistent_context
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct TimerState {
    subscribers: usize,
    task: Option<JoinHandle<()>>,
    started: u64,
    static_read: bool,
}

struct Shared<T> {
    source: T,
    config: ClockConfig,
    sender: watch::Sender<i64>,
    timer: Mutex<TimerState>,
}

impl<T> Shared<T> {
    fn lock_timer(&self) -> MutexGuard<'_, TimerState> {
        // TimerState holds no invariants a panicking holder could break.
        self.timer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publishes `now` unless it would move the clock backwards.
    fn publish(&self, now: i64) {
        let advanced = self.sender.send_if_modified(|current| {
            if now > *current {
                *current = now;
                true
            } else {
                false
            }
        });

        if advanced {
            trace!(now, "clock tick");
        }
    }

    fn release_subscriber(&self) {
        let mut timer = self.lock_timer();
        timer.subscribers = timer.subscribers.saturating_sub(1);

        if timer.subscribers == 0 {
            if let Some(task) = timer.task.take() {
                task.abort();
                debug!("clock tick task stopped");
            }
        }
    }
}

impl<T> Shared<T>
where
    T: TimeSource + Send + Sync + 'static,
{
    /// Starts the tick task, or takes a static read when ticking is not possible.
    fn start(self: &Arc<Self>, timer: &mut TimerState) {
        let handle = if self.config.persistent_context {
            match Handle::try_current() {
                Ok(handle) => Some(handle),
                Err(_) => {
                    warn!("no tokio runtime available, clock will not tick");
                    None
                }
            }
        } else {
            None
        };

        let Some(handle) = handle else {
            // Without a tick task the clock serves a single read for its lifetime.
            if !timer.static_read {
                timer.static_read = true;
                self.publish(self.source.now_seconds());
            }
            return;
        };

        self.publish(self.source.now_seconds());

        let period = self.config.tick_interval;
        timer.task = Some(handle.spawn(run_ticks(Arc::downgrade(self), period)));
        timer.started += 1;
        debug!(period_ms = period.as_millis() as u64, "clock tick task started");
    }
}

async fn run_ticks<T>(shared: Weak<Shared<T>>, period: Duration)
where
    T: TimeSource + Send + Sync + 'static,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let Some(shared) = shared.upgrade() else {
            break;
        };
        shared.publish(shared.source.now_seconds());
    }
}

/// Publishes the current time in whole seconds to its subscribers.
///
/// Cloning is cheap and yields a handle to the same clock, so the
/// one-timer-per-clock guarantee holds across clones.
///
/// # Type Parameters
/// * `T` - Wall-clock source; [`SystemTimeSource`] outside of tests
pub struct ClockSource<T = SystemTimeSource> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for ClockSource<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl ClockSource<SystemTimeSource> {
    /// Returns the process-wide clock over the system time source.
    ///
    /// Created on first use. Its tick task still only runs while it has
    /// subscribers.
    pub fn shared() -> &'static ClockSource {
        static SHARED: OnceLock<ClockSource> = OnceLock::new();
        SHARED.get_or_init(|| ClockSource::new(SystemTimeSource))
    }
}

impl<T> ClockSource<T>
where
    T: TimeSource + Send + Sync + 'static,
{
    /// Creates a clock with the default configuration.
    pub fn new(source: T) -> Self {
        Self::with_config(source, ClockConfig::default())
    }

    /// Creates a clock with an explicit configuration.
    pub fn with_config(source: T, config: ClockConfig) -> Self {
        let (sender, _) = watch::channel(source.now_seconds());

        Self {
            shared: Arc::new(Shared {
                source,
                config,
                sender,
                timer: Mutex::new(TimerState::default()),
            }),
        }
    }

    /// Registers a subscriber, starting the tick task if none is running.
    ///
    /// The returned subscription must be dropped (or [`released`]) when no
    /// longer needed; the task stops once the last one goes away.
    ///
    /// [`released`]: ClockSubscription::release
    pub fn subscribe(&self) -> ClockSubscription<T> {
        let mut timer = self.shared.lock_timer();
        timer.subscribers += 1;

        // A task whose runtime has shut down reports finished; replace it.
        if timer.task.as_ref().is_none_or(JoinHandle::is_finished) {
            timer.task = None;
            self.shared.start(&mut timer);
        }

        ClockSubscription {
            receiver: self.shared.sender.subscribe(),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> ClockSource<T> {
    /// Returns the most recently published time in Unix seconds.
    pub fn current_seconds(&self) -> i64 {
        *self.shared.sender.borrow()
    }

    /// Returns the configuration this clock was built with.
    pub fn config(&self) -> ClockConfig {
        self.shared.config
    }

    /// Returns true while a tick task is live.
    pub fn is_running(&self) -> bool {
        self.shared
            .lock_timer()
            .task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Returns the number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.shared.lock_timer().subscribers
    }

    /// Returns how many tick tasks this clock has spawned over its lifetime.
    pub fn timers_started(&self) -> u64 {
        self.shared.lock_timer().started
    }
}

/// A live handle on a [`ClockSource`].
///
/// Holding one keeps the clock ticking. Dropping it unsubscribes.
pub struct ClockSubscription<T = SystemTimeSource> {
    receiver: watch::Receiver<i64>,
    shared: Arc<Shared<T>>,
}

impl<T> ClockSubscription<T> {
    /// Returns the most recently published time in Unix seconds.
    pub fn current(&self) -> i64 {
        *self.receiver.borrow()
    }

    /// Waits for the next published tick and returns its value.
    ///
    /// Resolves immediately if a tick arrived since the last call. In a
    /// non-persistent context this never resolves.
    pub async fn changed(&mut self) -> i64 {
        // The sender lives in `shared`, which this subscription keeps alive,
        // so the channel cannot close underneath us.
        let _ = self.receiver.changed().await;
        *self.receiver.borrow_and_update()
    }

    /// Unsubscribes. Equivalent to dropping the subscription.
    pub fn release(self) {}
}

impl<T> Drop for ClockSubscription<T> {
    fn drop(&mut self) {
        self.shared.release_subscriber();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    struct Manual(AtomicI64);

    impl TimeSource for Manual {
        fn now_millis(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn config_clamps_zero_interval() {
        let config = ClockConfig::new().tick_interval(Duration::ZERO);
        assert_eq!(config.get_tick_interval(), MIN_TICK_INTERVAL);
    }

    #[test]
    fn publish_never_moves_backwards() {
        let clock = ClockSource::with_config(
            Manual(AtomicI64::new(10_000)),
            ClockConfig::new().persistent_context(false),
        );
        clock.shared.publish(5);
        assert_eq!(clock.current_seconds(), 10);
        clock.shared.publish(12);
        assert_eq!(clock.current_seconds(), 12);
    }

    #[test]
    fn subscribe_without_runtime_takes_static_read() {
        let source = Arc::new(Manual(AtomicI64::new(1_000)));
        let clock = ClockSource::new(Arc::clone(&source));
        source.0.store(42_000, Ordering::SeqCst);

        let subscription = clock.subscribe();
        assert_eq!(subscription.current(), 42);
        assert!(!clock.is_running());
        assert_eq!(clock.timers_started(), 0);

        source.0.store(99_000, Ordering::SeqCst);
        let later = clock.subscribe();
        assert_eq!(later.current(), 42);
        assert_eq!(subscription.current(), 42);
    }
}
