use lagview_protocol::{
    Point, ProgressSample, RenderCommand, ThemeToken, TimeRange, Viewport,
};

/// Render visual progress (0–100%) as a stepped polyline with a filled area.
///
/// Progress is monotone per capture, so the curve holds each value until the
/// next measurement. One sample on either side of the visible range is
/// included to keep the curve continuous at the edges.
pub fn render_visual_progress(
    progress: &[ProgressSample],
    viewport: &Viewport,
    range: &TimeRange,
    line_width: f64,
) -> Vec<RenderCommand> {
    let duration = range.duration();
    if viewport.width == 0.0 || duration <= 0.0 || progress.is_empty() {
        return Vec::new();
    }

    let device_width = viewport.width * viewport.dpr;
    let device_height = viewport.height * viewport.dpr;
    let device_line_width = line_width * viewport.dpr;
    let x_scale = device_width / duration;

    let first_visible = progress.partition_point(|p| p.ts < range.start);
    let start = first_visible.saturating_sub(1);
    let y_for = |percent: f64| device_height - device_height * (percent / 100.0).clamp(0.0, 1.0);

    let mut points: Vec<Point> = Vec::new();
    for (i, sample) in progress.iter().enumerate().skip(start) {
        let x = (sample.ts - range.start) * x_scale;
        let y = y_for(sample.percent);
        // Step: hold the previous value until this timestamp.
        if let Some(prev) = points.last().copied() {
            points.push(Point::new(x, prev.y));
        }
        points.push(Point::new(x, y));
        if sample.ts > range.end {
            break;
        }
        // Hold the last value to the right edge.
        if i == progress.len() - 1 {
            points.push(Point::new(device_width, y));
        }
    }

    if points.len() < 2 {
        return Vec::new();
    }

    vec![
        RenderCommand::BeginGroup {
            id: "visual-progress".into(),
            label: Some("Visual Progress".into()),
        },
        RenderCommand::DrawPolyline {
            points: points.clone(),
            color: ThemeToken::ProgressLine,
            width: device_line_width,
        },
        RenderCommand::FillArea {
            points,
            baseline_y: device_height,
            color: ThemeToken::ProgressFill,
        },
        RenderCommand::EndGroup,
    ]
}
