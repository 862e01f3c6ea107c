//! Fixed-size window of sample deltas.

/// Number of inter-sample deltas kept for throughput estimation.
pub const ETA_WINDOW: usize = 100;

/// Ring buffer holding the most recent [`ETA_WINDOW`] millisecond deltas.
///
/// Pushing never allocates; once full, each push evicts the oldest delta.
///
/// # Example
///
/// ```
/// use chipforge_solver::progress::{DeltaWindow, ETA_WINDOW};
///
/// let mut window = DeltaWindow::new();
/// assert_eq!(window.average(), None);
///
/// for _ in 0..ETA_WINDOW {
///     window.push(500);
/// }
/// window.push(600);
/// assert_eq!(window.len(), ETA_WINDOW);
/// assert_eq!(window.average(), Some(501));
/// ```
#[derive(Debug, Clone)]
pub struct DeltaWindow {
    deltas: [u64; ETA_WINDOW],
    head: usize,
    len: usize,
    sum: u64,
}

impl DeltaWindow {
    pub fn new() -> Self {
        Self {
            deltas: [0; ETA_WINDOW],
            head: 0,
            len: 0,
            sum: 0,
        }
    }

    pub fn push(&mut self, delta: u64) {
        if self.len == ETA_WINDOW {
            self.sum -= self.deltas[self.head];
        } else {
            self.len += 1;
        }
        self.deltas[self.head] = delta;
        self.sum = self.sum.saturating_add(delta);
        self.head = (self.head + 1) % ETA_WINDOW;
    }

    /// Mean delta in milliseconds, or `None` when empty.
    pub fn average(&self) -> Option<u64> {
        if self.len == 0 {
            None
        } else {
            Some(self.sum / self.len as u64)
        }
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
        self.sum = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Deltas from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        let start = (self.head + ETA_WINDOW - self.len) % ETA_WINDOW;
        (0..self.len).map(move |i| self.deltas[(start + i) % ETA_WINDOW])
    }
}

impl Default for DeltaWindow {
    fn default() -> Self {
        Self::new()
    }
}
