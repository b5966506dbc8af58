use lagview_protocol::{
    Point, Rect, RenderCommand, SharedStr, TextAlign, ThemeToken, TimeRange, Viewport,
};

const AXIS_HEIGHT: f64 = 24.0;
const MAJOR_TICK_HEIGHT: f64 = 10.0;
const MEDIUM_TICK_HEIGHT: f64 = 6.0;
const MINOR_TICK_HEIGHT: f64 = 3.0;
const FONT_SIZE: f64 = 10.0;
const LABEL_Y: f64 = 12.0;
const MIN_MAJOR_SPACING_PX: f64 = 80.0;

/// Render the time ruler: major/medium/minor ticks with labels, plus
/// vertical gridlines extending `grid_height` below the axis bar.
///
/// Range bounds are milliseconds (absolute profile timestamps).
pub fn render_time_axis(
    viewport: &Viewport,
    range: &TimeRange,
    grid_height: f64,
) -> Vec<RenderCommand> {
    let duration = range.duration();
    if duration <= 0.0 || viewport.width == 0.0 {
        return Vec::new();
    }

    let width = viewport.width;
    let x_scale = width / duration;
    let mut commands = Vec::with_capacity(64);

    // Background bar
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, width, AXIS_HEIGHT),
        color: ThemeToken::AxisBackground,
        border_color: Some(ThemeToken::TrackBorder),
        label: None,
    });

    let (major_interval, subdivisions) = nice_interval(duration, width);
    let medium_interval = major_interval / f64::from(subdivisions);
    let minor_interval = medium_interval / 2.0;

    let first_major = (range.start / major_interval).floor() * major_interval;

    // Minor ticks
    let first_minor = (range.start / minor_interval).floor() * minor_interval;
    let mut t = first_minor;
    while t <= range.end {
        let x = (t - range.start) * x_scale;
        if x >= 0.0 && x <= width {
            let is_major = is_aligned(t, major_interval, first_major);
            let is_medium = !is_major && is_aligned(t, medium_interval, first_major);
            if !is_major && !is_medium {
                commands.push(RenderCommand::DrawLine {
                    from: Point::new(x, AXIS_HEIGHT - MINOR_TICK_HEIGHT),
                    to: Point::new(x, AXIS_HEIGHT),
                    color: ThemeToken::AxisTick,
                    width: 0.5,
                });
            }
        }
        t += minor_interval;
    }

    // Medium ticks
    let first_medium = (range.start / medium_interval).floor() * medium_interval;
    t = first_medium;
    while t <= range.end {
        let x = (t - range.start) * x_scale;
        if x >= 0.0 && x <= width && !is_aligned(t, major_interval, first_major) {
            commands.push(RenderCommand::DrawLine {
                from: Point::new(x, AXIS_HEIGHT - MEDIUM_TICK_HEIGHT),
                to: Point::new(x, AXIS_HEIGHT),
                color: ThemeToken::AxisTick,
                width: 0.5,
            });
        }
        t += medium_interval;
    }

    // Major ticks with labels + gridlines
    t = first_major;
    while t <= range.end {
        let x = (t - range.start) * x_scale;
        if x >= 0.0 && x <= width {
            commands.push(RenderCommand::DrawLine {
                from: Point::new(x, AXIS_HEIGHT - MAJOR_TICK_HEIGHT),
                to: Point::new(x, AXIS_HEIGHT),
                color: ThemeToken::TrackBorder,
                width: 1.0,
            });

            let label = format_time_label(t);
            commands.push(RenderCommand::DrawText {
                position: Point::new(x + 3.0, LABEL_Y),
                text: SharedStr::from(label.as_str()),
                color: ThemeToken::AxisLabel,
                font_size: FONT_SIZE,
                align: TextAlign::Left,
            });

            if grid_height > 0.0 {
                commands.push(RenderCommand::DrawLine {
                    from: Point::new(x, AXIS_HEIGHT),
                    to: Point::new(x, AXIS_HEIGHT + grid_height),
                    color: ThemeToken::GridLine,
                    width: 0.5,
                });
            }
        }
        t += major_interval;
    }

    commands
}

/// Check if time `t` is approximately aligned with `interval` starting from `base`.
fn is_aligned(t: f64, interval: f64, base: f64) -> bool {
    let offset = (t - base) / interval;
    (offset - offset.round()).abs() < 0.001
}

/// Choose a "nice" major tick interval in milliseconds given the visible
/// duration and pixel width. Returns (major_interval_ms, subdivisions).
fn nice_interval(duration_ms: f64, width_px: f64) -> (f64, u32) {
    let target_count = (width_px / MIN_MAJOR_SPACING_PX).max(2.0);
    let raw_interval = duration_ms / target_count;

    // Nice intervals: 0.1ms up to minutes.
    let nice_values: &[(f64, u32)] = &[
        (0.1, 2),
        (0.2, 2),
        (0.5, 5),
        (1.0, 2),
        (2.0, 2),
        (5.0, 5),
        (10.0, 2),
        (20.0, 2),
        (50.0, 5),
        (100.0, 2),
        (200.0, 2),
        (500.0, 5),
        (1_000.0, 2),  // 1s
        (2_000.0, 2),
        (5_000.0, 5),
        (10_000.0, 2), // 10s
        (20_000.0, 2),
        (30_000.0, 3), // 30s
        (60_000.0, 2), // 1min
    ];

    for &(interval, subs) in nice_values {
        if interval >= raw_interval {
            return (interval, subs);
        }
    }

    // Fallback for very long profiles
    let magnitude = 10.0_f64.powf(raw_interval.log10().floor());
    (magnitude, 2)
}

/// Format a millisecond timestamp as a tick label.
fn format_time_label(ms: f64) -> String {
    let abs = ms.abs();
    if abs >= 60_000.0 {
        let mins = (ms / 60_000.0).floor();
        let secs = (ms - mins * 60_000.0) / 1_000.0;
        format!("{:.0}m{:.1}s", mins, secs)
    } else if abs >= 1_000.0 {
        format!("{:.2}s", ms / 1_000.0)
    } else if abs >= 1.0 {
        format!("{:.1}ms", ms)
    } else {
        format!("{:.0}µs", ms * 1_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_interval_selects_reasonable_value() {
        // 1 second visible in 800px → ~10 major ticks → 100ms intervals
        let (interval, _subs) = nice_interval(1_000.0, 800.0);
        assert!(
            (50.0..=200.0).contains(&interval),
            "interval={interval}"
        );
    }

    #[test]
    fn renders_ticks_labels_and_gridlines() {
        let vp = Viewport {
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 24.0,
            dpr: 1.0,
        };
        let cmds = render_time_axis(&vp, &TimeRange::new(0.0, 1_000.0), 400.0);
        assert!(!cmds.is_empty());

        assert!(cmds
            .iter()
            .any(|c| matches!(c, RenderCommand::DrawRect { .. })));
        assert!(cmds
            .iter()
            .any(|c| matches!(c, RenderCommand::DrawText { .. })));
        let lines = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawLine { .. }))
            .count();
        assert!(lines >= 3);
    }

    #[test]
    fn degenerate_range_renders_nothing() {
        let vp = Viewport {
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 24.0,
            dpr: 1.0,
        };
        assert!(render_time_axis(&vp, &TimeRange::new(5.0, 5.0), 100.0).is_empty());
    }

    #[test]
    fn format_labels() {
        assert_eq!(format_time_label(0.5), "500µs");
        assert_eq!(format_time_label(1.5), "1.5ms");
        assert_eq!(format_time_label(1_500.0), "1.50s");
        assert_eq!(format_time_label(90_000.0), "1m30.0s");
    }
}
