use lagview_protocol::SampleTable;
use serde::{Deserialize, Serialize};

/// Aggregate statistics over a thread's event delay samples.
///
/// Computed once per thread when a profile loads and handed to the graph
/// view and the tooltip builder. `delay_range` — the maximum observed delay —
/// is the normalization divisor for graph heights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventDelayStats {
    /// Maximum observed delay in ms. A series with no delay data (or all
    /// zeros) has range 0, and normalized heights default to 0 rather than
    /// dividing by it.
    pub delay_range: f64,
    /// Smallest present delay value in ms, 0 when none are present.
    pub min_delay: f64,
    /// Largest present delay value in ms, 0 when none are present.
    pub max_delay: f64,
    /// Number of samples in the series.
    pub sample_count: usize,
}

impl EventDelayStats {
    /// Compute stats over a sample table. Absent delay values count as 0
    /// toward the range, matching how the graph draws them.
    pub fn compute(samples: &SampleTable) -> Self {
        let mut min = f64::INFINITY;
        let mut max: f64 = 0.0;
        for i in 0..samples.len() {
            let delay = samples.delay_at(i);
            min = min.min(delay);
            max = max.max(delay);
        }
        if !min.is_finite() {
            min = 0.0;
        }
        Self {
            delay_range: max,
            min_delay: min,
            max_delay: max,
            sample_count: samples.len(),
        }
    }

    /// Delay value scaled into [0, 1] against the range, 0 when the range
    /// is 0.
    pub fn normalize(&self, delay: f64) -> f64 {
        if self.delay_range > 0.0 {
            delay / self.delay_range
        } else {
            0.0
        }
    }
}
