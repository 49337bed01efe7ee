//! Provides simple logging about planning run execution.

use crate::utils::Timer;
use std::sync::Arc;

/// A logger type which is called with various information regarding the work done
/// by the planner.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Returns a logger which writes to stdout.
pub fn create_stdout_logger() -> InfoLogger {
    Arc::new(|msg: &str| println!("{msg}"))
}

/// Returns a logger which discards everything.
pub fn create_noop_logger() -> InfoLogger {
    Arc::new(|_: &str| {})
}

/// Collects basic measurements of a planning run and writes them into the log.
pub struct PlanTelemetry {
    logger: InfoLogger,
    time: Timer,
}

impl PlanTelemetry {
    /// Creates a new instance of `PlanTelemetry`.
    pub fn new(logger: InfoLogger) -> Self {
        Self { logger, time: Timer::start() }
    }

    /// Reports iteration statistics.
    pub fn on_iteration(&self, iteration: usize, delivered: usize, infeasible: usize, cost: f64, is_improved: bool) {
        (self.logger)(&format!(
            "[{}s] iteration {iteration}: delivered {delivered}, infeasible {infeasible}, cost {cost:.2}{}",
            self.time.elapsed_secs(),
            if is_improved { " (improvement)" } else { "" }
        ));
    }

    /// Reports the final run summary.
    pub fn on_result(&self, planned: usize, infeasible: usize, cost: f64, instances: usize) {
        (self.logger)(&format!(
            "[{}s] planned {planned} orders, {infeasible} infeasible, total cost {cost:.2}, {instances} flight instances expanded",
            self.time.elapsed_secs()
        ));
    }
}
