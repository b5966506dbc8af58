pub mod delay_stats;
pub mod redraw;
pub mod track;

pub use delay_stats::EventDelayStats;
pub use redraw::RedrawScheduler;
pub use track::{Track, TrackKind, build_tracks};
