//! Pause-aware elapsed time.

/// Running time of one job in clock milliseconds.
///
/// `elapsed = end - start - total pause`, where `end` is the finish time,
/// the start of an open pause, or now.
///
/// # Example
///
/// ```
/// use chipforge_solver::manager::ElapsedTimer;
///
/// let mut timer = ElapsedTimer::start(0);
/// timer.pause(10_000);
/// assert_eq!(timer.elapsed(12_000), 10_000);
/// timer.resume(15_000);
/// timer.finish(18_000);
/// assert_eq!(timer.elapsed(99_000), 13_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedTimer {
    started_at: u64,
    paused_total: u64,
    paused_at: Option<u64>,
    finished_at: Option<u64>,
}

impl ElapsedTimer {
    pub fn start(now: u64) -> Self {
        Self {
            started_at: now,
            paused_total: 0,
            paused_at: None,
            finished_at: None,
        }
    }

    /// A finished timer reading `elapsed`, for jobs loaded from disk.
    pub fn fixed(elapsed: u64) -> Self {
        Self {
            started_at: 0,
            paused_total: 0,
            paused_at: None,
            finished_at: Some(elapsed),
        }
    }

    pub fn pause(&mut self, now: u64) {
        if self.paused_at.is_none() && self.finished_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: u64) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += now.saturating_sub(paused_at);
        }
    }

    /// Freezes the timer at `now`, closing any open pause first.
    ///
    /// `now` may precede the open pause when the search finished before
    /// the pause was requested; that pause then counts as zero.
    pub fn finish(&mut self, now: u64) {
        if self.finished_at.is_some() {
            return;
        }
        self.resume(now);
        self.finished_at = Some(now);
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn elapsed(&self, now: u64) -> u64 {
        let end = self.finished_at.or(self.paused_at).unwrap_or(now);
        end.saturating_sub(self.started_at)
            .saturating_sub(self.paused_total)
    }
}
