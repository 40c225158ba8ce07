//! Cooperative progress reporting
//!
//! The engine reports progress as a fraction in `0.0..=1.0` through a
//! [`ProgressSink`]. Reporting is one-way and fire-and-forget: a sink must
//! never block the pipeline, and the engine never waits on it.

/// Observer for pipeline progress.
pub trait ProgressSink {
    /// Report overall progress as a fraction in `0.0..=1.0` with a short
    /// human-readable stage message.
    fn report(&self, fraction: f64, message: &str);
}

/// Sink that discards all reports.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn report(&self, _fraction: f64, _message: &str) {}
}

/// Scales a sub-operation's `0.0..=1.0` progress into a fixed slice of the
/// parent range, so a stage can own e.g. the 10%–35% window of the overall
/// pipeline.
pub struct SubRange<'a> {
    inner: &'a dyn ProgressSink,
    lo: f64,
    hi: f64,
}

impl<'a> SubRange<'a> {
    /// Create a scaler mapping `0.0..=1.0` onto `lo..=hi` of `inner`.
    #[must_use]
    pub fn new(inner: &'a dyn ProgressSink, lo: f64, hi: f64) -> Self {
        Self { inner, lo, hi }
    }
}

impl ProgressSink for SubRange<'_> {
    fn report(&self, fraction: f64, message: &str) {
        let clamped = fraction.clamp(0.0, 1.0);
        self.inner
            .report((self.hi - self.lo).mul_add(clamped, self.lo), message);
    }
}
