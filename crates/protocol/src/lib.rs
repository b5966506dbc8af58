pub mod commands;
pub mod profile;
pub mod shared_str;
pub mod theme;
pub mod types;

pub use commands::{RenderCommand, TextAlign};
pub use profile::{Profile, ProfileMeta, ProgressSample, SampleTable, ScreenshotInfo, Thread};
pub use shared_str::SharedStr;
pub use theme::ThemeToken;
pub use types::{Color, Point, Rect, TimeRange, Viewport};
