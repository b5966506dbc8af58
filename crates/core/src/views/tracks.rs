use lagview_protocol::{Profile, Rect, RenderCommand, ThemeToken, TimeRange, Viewport};

use crate::model::{EventDelayStats, Track, TrackKind};
use crate::views::{empty_thread, event_delay, process, screenshots, visual_progress};

/// Stroke width of the delay and progress curves, in CSS pixels.
pub const GRAPH_LINE_WIDTH: f64 = 1.5;

/// Render one track body: background, content, and empty-region overlays.
///
/// The match on `TrackKind` is exhaustive — a new track variant will not
/// compile until it renders here.
pub fn render_track(
    profile: &Profile,
    track: &Track,
    viewport: &Viewport,
    range: &TimeRange,
) -> Vec<RenderCommand> {
    if viewport.width == 0.0 || range.duration() <= 0.0 {
        return Vec::new();
    }

    let device_width = viewport.width * viewport.dpr;
    let device_height = viewport.height * viewport.dpr;

    let mut commands = Vec::new();
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, device_width, device_height),
        color: ThemeToken::TrackBackground,
        border_color: Some(ThemeToken::TrackBorder),
        label: None,
    });

    match track.kind {
        TrackKind::Process { thread_index } => {
            if let Some(thread) = profile.threads.get(thread_index) {
                commands.extend(process::render_process_activity(
                    &thread.samples,
                    viewport,
                    range,
                ));
                commands.extend(empty_thread::render_empty_regions(
                    &thread.samples,
                    viewport,
                    range,
                    profile.meta.interval,
                ));
            }
        }
        TrackKind::EventDelay { thread_index } => {
            if let Some(thread) = profile.threads.get(thread_index) {
                let stats = EventDelayStats::compute(&thread.samples);
                commands.extend(event_delay::render_event_delay(
                    &thread.samples,
                    &stats,
                    viewport,
                    range,
                    profile.meta.interval,
                    GRAPH_LINE_WIDTH,
                ));
                commands.extend(empty_thread::render_empty_regions(
                    &thread.samples,
                    viewport,
                    range,
                    profile.meta.interval,
                ));
            }
        }
        TrackKind::Screenshots => {
            commands.extend(screenshots::render_screenshots(
                &profile.screenshots,
                viewport,
                range,
            ));
        }
        TrackKind::VisualProgress => {
            commands.extend(visual_progress::render_visual_progress(
                &profile.visual_progress,
                viewport,
                range,
                GRAPH_LINE_WIDTH,
            ));
        }
    }

    commands
}
