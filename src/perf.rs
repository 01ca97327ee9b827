//! Timing instrumentation for interaction hot paths.
//!
//! `profile_scope!` marks pointer handling and command execution. Built with
//! `--features profiling`, a scope that overruns one frame is logged; without
//! the feature the macro expands to nothing. [`measure_and_log`] is always on
//! and guards document saves.
//!
//! ```ignore
//! pub fn handle_pointer_move(&mut self, position: Point) {
//!     profile_scope!("handle_pointer_move");
//!     // ...
//! }
//! ```

use std::time::{Duration, Instant};
use tracing::warn;

/// One frame at 60 Hz
pub const SLOW_SCOPE_MS: f64 = 16.0;

/// Time the rest of the enclosing block.
#[macro_export]
macro_rules! profile_scope {
    ($label:expr) => {
        #[cfg(feature = "profiling")]
        let _scope_timer = $crate::perf::ScopedTimer::new($label, $crate::perf::SLOW_SCOPE_MS);
        #[cfg(not(feature = "profiling"))]
        let _ = $label;
    };
}

pub use profile_scope;

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Warns on drop when the scope it guards ran over budget.
pub struct ScopedTimer {
    label: &'static str,
    started: Instant,
    budget_ms: f64,
}

impl ScopedTimer {
    pub fn new(label: &'static str, budget_ms: f64) -> Self {
        Self {
            label,
            started: Instant::now(),
            budget_ms,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn elapsed_ms(&self) -> f64 {
        millis(self.started.elapsed())
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms > self.budget_ms {
            warn!(scope = self.label, elapsed_ms, budget_ms = self.budget_ms, "Scope over budget");
        }
    }
}

/// Run `f`, warning when it takes longer than `budget_ms`.
pub fn measure_and_log<T>(label: &str, budget_ms: f64, f: impl FnOnce() -> T) -> T {
    let started = Instant::now();
    let result = f();
    let elapsed_ms = millis(started.elapsed());
    if elapsed_ms > budget_ms {
        warn!(operation = label, elapsed_ms, budget_ms, "Slow operation");
    }
    result
}
