pub mod empty_thread;
pub mod event_delay;
pub mod process;
pub mod screenshots;
pub mod time_axis;
pub mod tooltip;
pub mod tracks;
pub mod visual_progress;

pub use event_delay::{hit_test_sample, hover_dot, render_event_delay};
pub use tooltip::{TooltipLine, event_delay_tooltip, format_milliseconds};
pub use tracks::{GRAPH_LINE_WIDTH, render_track};
