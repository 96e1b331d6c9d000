use tracing::warn;

/// Environment variable read by [`SchedulerConfig::from_env`]
pub const MAX_LOOPS_ENV: &str = "FUTURISTIC_MAX_LOOPS";

/// Default number of fast defers issued before one low-priority yield
pub const DEFAULT_MAX_LOOPS: usize = 2000;

/// Tuning for the thread-local event loop
///
/// `max_loops` bounds how many continuations may be queued on the fast queue
/// in a row. Once the count is exceeded, the next continuation goes to the
/// low-priority queue so that due timers and other pending work can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub max_loops: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            max_loops: DEFAULT_MAX_LOOPS,
        }
    }
}

impl SchedulerConfig {
    pub fn with_max_loops(mut self, max_loops: usize) -> Self {
        self.max_loops = max_loops;
        self
    }

    /// Default configuration overridden by `FUTURISTIC_MAX_LOOPS` when it holds a number
    ///
    /// Every thread's event loop starts with this configuration;
    /// [`crate::scheduler::configure`] replaces it afterwards.
    pub fn from_env() -> Self {
        let config = SchedulerConfig::default();
        match std::env::var(MAX_LOOPS_ENV) {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(max_loops) => config.with_max_loops(max_loops),
                Err(err) => {
                    warn!(value = %raw, error = %err, "ignoring invalid {}", MAX_LOOPS_ENV);
                    config
                }
            },
            Err(_) => config,
        }
    }
}
