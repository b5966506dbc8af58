use lagview_protocol::{Rect, RenderCommand, SampleTable, ThemeToken, TimeRange, Viewport};

/// Dim the parts of the committed range where a thread has no samples.
///
/// A thread that started late or exited early shows translucent overlays
/// before its first sample and after its last sample plus one interval.
/// A thread with no samples at all dims the whole strip.
pub fn render_empty_regions(
    samples: &SampleTable,
    viewport: &Viewport,
    range: &TimeRange,
    interval: f64,
) -> Vec<RenderCommand> {
    if viewport.width == 0.0 || range.duration() <= 0.0 {
        return Vec::new();
    }

    let device_width = viewport.width * viewport.dpr;
    let device_height = viewport.height * viewport.dpr;
    let x_scale = device_width / range.duration();

    let mut commands = Vec::new();
    let mut push_region = |start: f64, end: f64| {
        let x0 = ((start - range.start) * x_scale).max(0.0);
        let x1 = ((end - range.start) * x_scale).min(device_width);
        if x1 - x0 >= 1.0 {
            commands.push(RenderCommand::DrawRect {
                rect: Rect::new(x0, 0.0, x1 - x0, device_height),
                color: ThemeToken::EmptyRegion,
                border_color: None,
                label: None,
            });
        }
    };

    match (samples.first_time(), samples.last_time()) {
        (Some(first), Some(last)) => {
            if first > range.start {
                push_region(range.start, first);
            }
            let data_end = last + interval;
            if data_end < range.end {
                push_region(data_end, range.end);
            }
        }
        _ => push_region(range.start, range.end),
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 20.0,
            dpr: 1.0,
        }
    }

    #[test]
    fn empty_thread_dims_entire_range() {
        let cmds = render_empty_regions(
            &SampleTable::default(),
            &viewport(),
            &TimeRange::new(0.0, 50.0),
            1.0,
        );
        assert_eq!(cmds.len(), 1);
        match &cmds[0] {
            RenderCommand::DrawRect { rect, .. } => {
                assert!((rect.w - 100.0).abs() < 1e-9);
            }
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn late_start_and_early_end_produce_two_regions() {
        let samples = SampleTable {
            time: vec![20.0, 30.0],
            event_delay: vec![Some(1.0), Some(1.0)],
        };
        // Data covers [20, 30+5); committed range is [0, 100].
        let cmds = render_empty_regions(&samples, &viewport(), &TimeRange::new(0.0, 100.0), 5.0);
        assert_eq!(cmds.len(), 2);
    }

    #[test]
    fn full_coverage_draws_nothing() {
        let samples = SampleTable {
            time: vec![0.0, 50.0, 99.0],
            event_delay: vec![None, None, None],
        };
        let cmds = render_empty_regions(&samples, &viewport(), &TimeRange::new(0.0, 100.0), 1.0);
        assert!(cmds.is_empty());
    }
}
