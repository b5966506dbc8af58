use lagview_protocol::{Point, Rect, RenderCommand, SampleTable, ThemeToken, TimeRange, Viewport};

/// Bucket width in device pixels for the activity histogram.
const BUCKET_WIDTH: f64 = 3.0;

/// Render a thread's sampling activity as a bucketed area chart.
///
/// The visible range is split into fixed-width pixel buckets; each bucket's
/// bar height is its sample count normalized against the densest bucket.
/// Cheap at any zoom level since the work is bounded by pixel width, not
/// sample count.
pub fn render_process_activity(
    samples: &SampleTable,
    viewport: &Viewport,
    range: &TimeRange,
) -> Vec<RenderCommand> {
    let duration = range.duration();
    if viewport.width == 0.0 || duration <= 0.0 || samples.is_empty() {
        return Vec::new();
    }

    let device_width = viewport.width * viewport.dpr;
    let device_height = viewport.height * viewport.dpr;
    let buckets = ((device_width / BUCKET_WIDTH).ceil() as usize).max(1);
    let bucket_duration = duration / buckets as f64;

    let mut counts = vec![0u32; buckets];
    let start_idx = samples.time.partition_point(|&t| t < range.start);
    for &ts in &samples.time[start_idx..] {
        if ts > range.end {
            break;
        }
        let b = (((ts - range.start) / bucket_duration) as usize).min(buckets - 1);
        counts[b] = counts[b].saturating_add(1);
    }

    let max_count = counts.iter().copied().max().unwrap_or(0);
    if max_count == 0 {
        return Vec::new();
    }

    let mut commands = Vec::with_capacity(buckets + 2);
    commands.push(RenderCommand::BeginGroup {
        id: "process-activity".into(),
        label: None,
    });

    for (b, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let bar_height = device_height * f64::from(count) / f64::from(max_count);
        let x = b as f64 * BUCKET_WIDTH;
        let w = BUCKET_WIDTH.min(device_width - x);
        let y = device_height - bar_height;

        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, y, w, bar_height),
            color: ThemeToken::ActivityFill,
            border_color: None,
            label: None,
        });
        commands.push(RenderCommand::DrawLine {
            from: Point::new(x, y),
            to: Point::new(x + w, y),
            color: ThemeToken::ActivityLine,
            width: 1.0,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(width: f64) -> Viewport {
        Viewport {
            x: 0.0,
            y: 0.0,
            width,
            height: 40.0,
            dpr: 1.0,
        }
    }

    fn uniform_samples(n: usize, spacing: f64) -> SampleTable {
        SampleTable {
            time: (0..n).map(|i| i as f64 * spacing).collect(),
            event_delay: vec![None; n],
        }
    }

    #[test]
    fn dense_region_fills_full_height() {
        let samples = uniform_samples(100, 1.0);
        let cmds =
            render_process_activity(&samples, &viewport(300.0), &TimeRange::new(0.0, 100.0));
        let full_height = cmds.iter().any(|c| {
            matches!(c, RenderCommand::DrawRect { rect, .. } if (rect.h - 40.0).abs() < 1e-9)
        });
        assert!(full_height);
    }

    #[test]
    fn samples_outside_range_are_ignored() {
        let samples = uniform_samples(10, 1.0); // covers [0, 9]
        let cmds =
            render_process_activity(&samples, &viewport(300.0), &TimeRange::new(100.0, 200.0));
        assert!(cmds.is_empty());
    }

    #[test]
    fn empty_series_renders_nothing() {
        let cmds = render_process_activity(
            &SampleTable::default(),
            &viewport(300.0),
            &TimeRange::new(0.0, 100.0),
        );
        assert!(cmds.is_empty());
    }
}
