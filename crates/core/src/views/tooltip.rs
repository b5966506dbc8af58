use lagview_protocol::{SampleTable, SharedStr};

use crate::model::EventDelayStats;

/// One value/label pair in a tooltip, e.g. `18.5ms` / `event delay`.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLine {
    pub value: String,
    pub label: SharedStr,
}

/// Format a millisecond quantity for tooltips and labels.
pub fn format_milliseconds(ms: f64) -> String {
    if ms >= 1_000.0 {
        format!("{:.2}s", ms / 1_000.0)
    } else {
        format!("{:.1}ms", ms)
    }
}

/// Tooltip contents for a hovered event delay sample: the sample's delay and
/// the delay range the graph is normalized against.
pub fn event_delay_tooltip(
    samples: &SampleTable,
    stats: &EventDelayStats,
    index: usize,
) -> Vec<TooltipLine> {
    let delay = samples.delay_at(index);
    vec![
        TooltipLine {
            value: format_milliseconds(delay),
            label: SharedStr::from("event delay"),
        },
        TooltipLine {
            value: format_milliseconds(stats.delay_range),
            label: SharedStr::from("delay range in graph"),
        },
    ]
}
