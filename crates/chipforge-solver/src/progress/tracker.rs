//! Throughput and ETA tracking.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chipforge_core::domain::ProgressSample;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::window::DeltaWindow;

/// Estimated time to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eta {
    pub remaining_secs: u64,
    /// Set when the estimate exceeds the warning threshold.
    pub warn: bool,
}

#[derive(Debug, Default)]
struct TrackerState {
    window: DeltaWindow,
    reference_millis: Option<u64>,
    latest: ProgressSample,
    found: u64,
}

/// Consumes engine progress samples on the worker thread and answers ETA
/// queries from the controller.
///
/// # Example
///
/// ```
/// use chipforge_core::domain::ProgressSample;
/// use chipforge_solver::progress::ProgressTracker;
///
/// let tracker = ProgressTracker::new(3600);
/// for (i, ts) in [0, 200, 400].into_iter().enumerate() {
///     tracker.on_sample(ProgressSample {
///         timestamp_millis: ts,
///         enumerated: i as u64 * 10,
///         total_estimate: 1_020,
///         found: 0,
///     });
/// }
///
/// // 200 ms per sample, 1000 units left.
/// let eta = tracker.eta().unwrap();
/// assert_eq!(eta.remaining_secs, 200);
/// assert!(!eta.warn);
/// ```
#[derive(Debug)]
pub struct ProgressTracker {
    state: Mutex<TrackerState>,
    warn_after_secs: u64,
}

impl ProgressTracker {
    pub fn new(warn_after_secs: u64) -> Self {
        Self {
            state: Mutex::new(TrackerState::default()),
            warn_after_secs,
        }
    }

    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records one engine sample.
    ///
    /// The first sample after a reset only sets the reference timestamp;
    /// each later one pushes its distance from the previous sample.
    pub fn on_sample(&self, sample: ProgressSample) {
        let mut state = self.lock();
        if let Some(reference) = state.reference_millis {
            let delta = sample.timestamp_millis.saturating_sub(reference);
            state.window.push(delta);
        }
        state.reference_millis = Some(sample.timestamp_millis);
        state.latest = ProgressSample {
            found: state.found,
            ..sample
        };
        trace!(
            event = "progress",
            enumerated = sample.enumerated,
            total = sample.total_estimate,
            found = state.found,
            window = state.window.len(),
            "progress sample"
        );
    }

    /// Counts one newly published result.
    pub fn on_result_appended(&self) {
        let mut state = self.lock();
        state.found += 1;
        state.latest.found = state.found;
    }

    /// Forgets the delta window and the reference timestamp.
    pub fn reset_window(&self) {
        let mut state = self.lock();
        state.window.clear();
        state.reference_millis = None;
    }

    pub fn average_delta(&self) -> Option<u64> {
        self.lock().window.average()
    }

    /// Remaining time at the current average pace. `None` until two
    /// samples have arrived since the last reset.
    pub fn eta(&self) -> Option<Eta> {
        let state = self.lock();
        let average = state.window.average()?;
        let remaining = u128::from(average) * u128::from(state.latest.remaining()) / 1000;
        let remaining_secs = u64::try_from(remaining).unwrap_or(u64::MAX);
        Some(Eta {
            remaining_secs,
            warn: remaining_secs > self.warn_after_secs,
        })
    }

    /// Most recent sample, with `found` counting every appended result.
    pub fn latest(&self) -> ProgressSample {
        self.lock().latest
    }

    pub fn warn_after_secs(&self) -> u64 {
        self.warn_after_secs
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(chipforge_config::DEFAULT_ETA_WARNING_SECS)
    }
}
