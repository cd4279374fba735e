//! Bounded-window linear trend.
//!
//! Keeps the most recent `capacity` scalar samples (oldest first) and the
//! ordinary least-squares line through them, using the insertion index as
//! x (`x = 1..=n`). The fit is recomputed from scratch on every mutation;
//! windows are a handful of samples, so O(n) per insert is the whole cost.
use std::collections::VecDeque;

use crate::error::TrendError;

/// Window size used by `TrendTracker::new`.
///
/// Small enough that the line follows real drift within a few readings,
/// large enough that one noisy sample does not swing it.
pub const DEFAULT_CAPACITY: usize = 5;

/// `y = slope * x + intercept`.
///
/// Both coefficients and every prediction saturate at the finite `f32`
/// range instead of overflowing to infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f32,
    pub intercept: f32,
}

impl LinearFit {
    #[inline]
    pub fn predict(&self, x: f32) -> f32 {
        saturate(f64::from(self.slope) * f64::from(x) + f64::from(self.intercept))
    }
}

/// Narrow to `f32`, clamping to `±f32::MAX`. NaN passes through.
#[inline]
fn saturate(v: f64) -> f32 {
    v.clamp(f64::from(f32::MIN), f64::from(f32::MAX)) as f32
}

#[derive(Debug, Clone)]
pub struct TrendTracker {
    samples: VecDeque<f32>,
    capacity: usize,
    /// `None` iff `samples` is empty.
    fit: Option<LinearFit>,
}

impl Default for TrendTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TrendTracker {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
            fit: None,
        }
    }

    /// Empty tracker holding at most `capacity` samples. Zero is rejected.
    pub fn with_capacity(capacity: usize) -> Result<Self, TrendError> {
        if capacity == 0 {
            return Err(TrendError::ZeroCapacity);
        }
        Ok(Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            fit: None,
        })
    }

    /// Default-capacity tracker seeded with one sample.
    pub fn with_initial(value: f32) -> Self {
        let mut t = Self::new();
        t.add_datapoint(value);
        t
    }

    pub fn with_initial_and_capacity(value: f32, capacity: usize) -> Result<Self, TrendError> {
        let mut t = Self::with_capacity(capacity)?;
        t.add_datapoint(value);
        Ok(t)
    }

    /// Append a sample, evicting the oldest when full, and refit.
    ///
    /// NaN and infinities are dropped: a failed read must not poison the fit.
    pub fn add_datapoint(&mut self, value: f32) {
        if !value.is_finite() {
            tracing::debug!(value, "ignoring non-finite datapoint");
            return;
        }
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
        self.recalculate();
    }

    /// Closed-form OLS over `(i, v_i)`, `i = 1..=n`:
    ///
    /// ```text
    /// a = n * Σ(i * v_i)    b = Σi * Σv_i
    /// c = n * Σ(i²)         d = (Σi)²
    /// slope     = (a - b) / (c - d)
    /// intercept = (Σv_i - slope * Σi) / n
    /// ```
    ///
    /// `c - d` is zero for a single sample, so that case is fixed to a flat
    /// line through the sample. Sums are accumulated in `f64`.
    pub(crate) fn recalculate(&mut self) {
        let n = self.samples.len();
        self.fit = match n {
            0 => None,
            1 => Some(LinearFit {
                slope: 0.0,
                intercept: self.samples[0],
            }),
            _ => {
                let mut sum_xv = 0.0f64;
                let mut sum_xx = 0.0f64;
                let mut sum_x = 0.0f64;
                let mut sum_v = 0.0f64;
                for (i, v) in self.samples.iter().enumerate() {
                    let x = (i + 1) as f64;
                    let v = f64::from(*v);
                    sum_xv += x * v;
                    sum_xx += x * x;
                    sum_x += x;
                    sum_v += v;
                }
                let nf = n as f64;
                let a = nf * sum_xv;
                let b = sum_x * sum_v;
                let c = nf * sum_xx;
                let d = sum_x * sum_x;
                // c - d = n²(n² - 1) / 12 > 0 for n >= 2
                let slope = (a - b) / (c - d);
                let intercept = (sum_v - slope * sum_x) / nf;
                Some(LinearFit {
                    slope: saturate(slope),
                    intercept: saturate(intercept),
                })
            }
        };
    }

    /// Evaluate the fitted line at `x`; `None` while the window is empty.
    pub fn predict_value(&self, x: f32) -> Option<f32> {
        self.fit.map(|f| f.predict(x))
    }

    /// Prediction one step past the newest sample (`x = len + 1`).
    pub fn predict_next(&self) -> Option<f32> {
        self.predict_value((self.samples.len() + 1) as f32)
    }

    /// Whether the prediction at `x` lies in `[min, max]` (both inclusive).
    /// Always false without a fit.
    pub fn validate_predicted_value(&self, x: f32, min: f32, max: f32) -> bool {
        self.predict_value(x).is_some_and(|y| y >= min && y <= max)
    }

    /// Change the window size.
    ///
    /// Shrinking drops the oldest samples and refits. Growing only takes
    /// effect as new datapoints arrive.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), TrendError> {
        if capacity == 0 {
            return Err(TrendError::ZeroCapacity);
        }
        if self.samples.len() > capacity {
            let excess = self.samples.len() - capacity;
            self.samples.drain(..excess);
            self.recalculate();
        }
        self.capacity = capacity;
        Ok(())
    }

    pub fn fit(&self) -> Option<LinearFit> {
        self.fit
    }

    pub fn slope(&self) -> Option<f32> {
        self.fit.map(|f| f.slope)
    }

    pub fn intercept(&self) -> Option<f32> {
        self.fit.map(|f| f.intercept)
    }

    /// Samples, oldest first.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = f32> + DoubleEndedIterator + '_ {
        self.samples.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.samples.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.fit = None;
    }
}
