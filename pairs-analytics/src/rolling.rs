//! Fixed-size trailing window with incremental mean and sample standard deviation.

use std::collections::VecDeque;

/// Ring buffer over the last `size` observations, keeping a running mean and sum of
/// squared deviations (Welford) so each push and statistic is O(1).
///
/// The running moments are re-derived from the buffer once per full turnover of the
/// window to bound drift. A window holding a single repeated value reports exactly zero
/// deviation.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    size: usize,
    values: VecDeque<f64>,
    mean: f64,
    /// Sum of squared deviations from `mean`
    m2: f64,
    /// Length of the run of identical values ending at the newest observation
    equal_run: usize,
    evictions_since_resync: usize,
}

impl RollingWindow {
    pub fn new(size: usize) -> Self {
        debug_assert!(size > 0, "rolling window size must be positive");
        let size = size.max(1);
        Self {
            size,
            values: VecDeque::with_capacity(size),
            mean: 0.0,
            m2: 0.0,
            equal_run: 0,
            evictions_since_resync: 0,
        }
    }

    /// Add a new observation, evicting the oldest once the window is full.
    pub fn push(&mut self, value: f64) {
        self.equal_run = match self.values.back() {
            Some(&last) if last == value => self.equal_run + 1,
            _ => 1,
        };

        match self.evict() {
            // Replace in place: count unchanged
            Some(old) => {
                let n = self.size as f64;
                let old_mean = self.mean;
                self.mean += (value - old) / n;
                self.m2 += (value - old) * (value - self.mean + old - old_mean);
                self.evictions_since_resync += 1;
            }
            None => {
                let n = (self.values.len() + 1) as f64;
                let delta = value - self.mean;
                self.mean += delta / n;
                self.m2 += delta * (value - self.mean);
            }
        }
        self.values.push_back(value);

        if self.evictions_since_resync >= self.size {
            self.resync();
        }
    }

    fn evict(&mut self) -> Option<f64> {
        if self.values.len() >= self.size {
            self.values.pop_front()
        } else {
            None
        }
    }

    fn resync(&mut self) {
        let n = self.values.len() as f64;
        self.mean = self.values.iter().sum::<f64>() / n;
        self.m2 = self
            .values
            .iter()
            .map(|value| (value - self.mean).powi(2))
            .sum();
        self.evictions_since_resync = 0;
    }

    /// True once `size` observations have been pushed.
    pub fn is_full(&self) -> bool {
        self.values.len() == self.size
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn is_constant(&self) -> bool {
        self.equal_run >= self.values.len()
    }

    /// Mean of a full window
    pub fn mean(&self) -> Option<f64> {
        if !self.is_full() {
            return None;
        }
        if self.is_constant() {
            return self.values.back().copied();
        }
        Some(self.mean)
    }

    /// Sample standard deviation (n - 1 denominator) of a full window.
    /// Undefined for a window of one observation.
    pub fn std(&self) -> Option<f64> {
        if !self.is_full() || self.size < 2 {
            return None;
        }
        if self.is_constant() {
            return Some(0.0);
        }
        Some((self.m2 / (self.size - 1) as f64).max(0.0).sqrt())
    }
}
