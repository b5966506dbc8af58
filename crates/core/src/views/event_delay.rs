use lagview_protocol::{Point, RenderCommand, SampleTable, ThemeToken, TimeRange, Viewport};

use crate::model::EventDelayStats;

/// Pixel geometry derived from the viewport for one draw call.
///
/// Ephemeral by design: recomputed every call, never stored, so layout
/// changes between frames can't leave stale scale factors behind.
struct DrawGeometry {
    device_width: f64,
    device_height: f64,
    device_line_width: f64,
    half_line_width: f64,
    /// Height available to the curve once the stroke is inset so it isn't
    /// clipped at the top or bottom edge.
    inner_height: f64,
}

impl DrawGeometry {
    fn from_viewport(viewport: &Viewport, line_width: f64) -> Self {
        let device_line_width = line_width * viewport.dpr;
        let device_height = viewport.height * viewport.dpr;
        Self {
            device_width: viewport.width * viewport.dpr,
            device_height,
            device_line_width,
            half_line_width: device_line_width * 0.5,
            inner_height: device_height - device_line_width,
        }
    }
}

/// Map a sample to device-pixel chart coordinates.
fn sample_point(
    ts: f64,
    delay: f64,
    stats: &EventDelayStats,
    range: &TimeRange,
    geometry: &DrawGeometry,
) -> Point {
    let x = geometry.device_width * (ts - range.start) / range.duration();
    let unit = stats.normalize(delay);
    let y = geometry.inner_height - geometry.inner_height * unit + geometry.half_line_width;
    Point::new(x, y)
}

/// Render the event delay graph: a stroked polyline over the samples with a
/// filled area beneath it.
///
/// Delays are normalized against `stats.delay_range`; a range of 0 pins the
/// whole curve to the baseline. The final point is extended one sampling
/// `interval` to the right, since the samples range ends at the last
/// sample's time plus the interval.
///
/// Returns nothing when the surface has no width yet (layout pending) or
/// the series is empty — both silent skips, not errors.
pub fn render_event_delay(
    samples: &SampleTable,
    stats: &EventDelayStats,
    viewport: &Viewport,
    range: &TimeRange,
    interval: f64,
    line_width: f64,
) -> Vec<RenderCommand> {
    if viewport.width == 0.0 {
        // Drawing before the surface was laid out.
        return Vec::new();
    }
    if samples.is_empty() {
        return Vec::new();
    }

    let geometry = DrawGeometry::from_viewport(viewport, line_width);
    let x_scale = geometry.device_width / range.duration();

    let mut points = Vec::with_capacity(samples.len() + 1);
    for i in 0..samples.len() {
        points.push(sample_point(
            samples.time[i],
            samples.delay_at(i),
            stats,
            range,
            &geometry,
        ));
    }

    // Extend past the last sample by one interval.
    let last = points[points.len() - 1];
    points.push(Point::new(last.x + interval * x_scale, last.y));

    vec![
        RenderCommand::BeginGroup {
            id: "event-delay".into(),
            label: None,
        },
        RenderCommand::DrawPolyline {
            points: points.clone(),
            color: ThemeToken::DelayLine,
            width: geometry.device_line_width,
        },
        RenderCommand::FillArea {
            points,
            baseline_y: geometry.device_height,
            color: ThemeToken::DelayFill,
        },
        RenderCommand::EndGroup,
    ]
}

/// Find the sample under a horizontal pixel position.
///
/// Inverts the draw mapping to get a timestamp, then takes the rightmost
/// sample whose time is at or before it (binary search over the sorted
/// timestamps). Positions before the first sample or past the last sample
/// plus one interval hover nothing. A search landing past the end — the
/// mouse between the last sample and the interval extension — clamps to the
/// last sample.
pub fn hit_test_sample(
    samples: &SampleTable,
    range: &TimeRange,
    interval: f64,
    pixel_x: f64,
    width: f64,
) -> Option<usize> {
    if samples.is_empty() || width == 0.0 {
        return None;
    }

    let time = range.start + (pixel_x / width) * range.duration();

    let first = samples.first_time()?;
    let last = samples.last_time()?;
    if time < first || time > last + interval {
        return None;
    }

    let idx = samples.time.partition_point(|&t| t <= time);
    Some(idx.saturating_sub(1).min(samples.len() - 1))
}

/// The dot marking a hovered sample on the curve.
///
/// Uses the same mapping as the draw call so the dot sits exactly on the
/// stroked line. Returns `None` for an out-of-range index.
pub fn hover_dot(
    samples: &SampleTable,
    stats: &EventDelayStats,
    viewport: &Viewport,
    range: &TimeRange,
    index: usize,
    line_width: f64,
) -> Option<RenderCommand> {
    if index >= samples.len() {
        return None;
    }
    let geometry = DrawGeometry::from_viewport(viewport, line_width);
    let center = sample_point(
        samples.time[index],
        samples.delay_at(index),
        stats,
        range,
        &geometry,
    );
    Some(RenderCommand::DrawCircle {
        center,
        radius: geometry.device_line_width.max(1.0) * 2.0,
        color: ThemeToken::DelayDot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(width: f64, height: f64) -> Viewport {
        Viewport {
            x: 0.0,
            y: 0.0,
            width,
            height,
            dpr: 1.0,
        }
    }

    fn series(times: &[f64], delays: &[f64]) -> SampleTable {
        SampleTable {
            time: times.to_vec(),
            event_delay: delays.iter().map(|&d| Some(d)).collect(),
        }
    }

    fn chart_points(cmds: &[RenderCommand]) -> Vec<Point> {
        cmds.iter()
            .find_map(|c| match c {
                RenderCommand::DrawPolyline { points, .. } => Some(points.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    #[test]
    fn zero_width_skips_draw() {
        let samples = series(&[0.0, 1.0], &[1.0, 2.0]);
        let stats = EventDelayStats::compute(&samples);
        let cmds = render_event_delay(
            &samples,
            &stats,
            &viewport(0.0, 25.0),
            &TimeRange::new(0.0, 10.0),
            1.0,
            1.5,
        );
        assert!(cmds.is_empty());
    }

    #[test]
    fn empty_series_skips_draw() {
        let samples = SampleTable::default();
        let stats = EventDelayStats::compute(&samples);
        let cmds = render_event_delay(
            &samples,
            &stats,
            &viewport(100.0, 25.0),
            &TimeRange::new(0.0, 10.0),
            1.0,
            1.5,
        );
        assert!(cmds.is_empty());
    }

    #[test]
    fn zero_delay_range_draws_flat_baseline() {
        let samples = series(&[0.0, 10.0, 20.0], &[0.0, 0.0, 0.0]);
        let stats = EventDelayStats::compute(&samples);
        assert_eq!(stats.delay_range, 0.0);

        let vp = viewport(30.0, 25.0);
        let line_width = 2.0;
        let cmds = render_event_delay(
            &samples,
            &stats,
            &vp,
            &TimeRange::new(0.0, 30.0),
            10.0,
            line_width,
        );
        let points = chart_points(&cmds);
        assert_eq!(points.len(), 4); // 3 samples + interval extension

        // inner_height - 0 + half_line_width for every point.
        let inner = vp.height - line_width;
        let baseline = inner + line_width * 0.5;
        for p in &points {
            assert!((p.y - baseline).abs() < 1e-9, "y={} baseline={baseline}", p.y);
        }
    }

    #[test]
    fn evenly_spaced_samples_give_evenly_spaced_x() {
        let n = 8;
        let interval = 5.0;
        let times: Vec<f64> = (0..n).map(|i| i as f64 * interval).collect();
        let delays = vec![1.0; n];
        let samples = series(&times, &delays);
        let stats = EventDelayStats::compute(&samples);

        let vp = viewport(400.0, 25.0);
        let cmds = render_event_delay(
            &samples,
            &stats,
            &vp,
            &TimeRange::new(0.0, n as f64 * interval),
            interval,
            1.0,
        );
        let points = chart_points(&cmds);
        assert_eq!(points.len(), n + 1);

        let step = points[1].x - points[0].x;
        for pair in points.windows(2) {
            assert!(((pair[1].x - pair[0].x) - step).abs() < 1e-9);
        }
        // N samples over [0, N*interval] leave exactly one step of slack, so
        // the interval extension lands on the right edge.
        assert!((points[n].x - vp.width).abs() < 1e-9);
    }

    #[test]
    fn peak_sample_touches_top_inset() {
        let samples = series(&[0.0, 10.0, 20.0], &[0.0, 10.0, 0.0]);
        let stats = EventDelayStats::compute(&samples);
        let vp = viewport(30.0, 25.0);
        let line_width = 2.0;
        let cmds = render_event_delay(
            &samples,
            &stats,
            &vp,
            &TimeRange::new(0.0, 30.0),
            10.0,
            line_width,
        );
        let points = chart_points(&cmds);
        // Normalized 1.0 maps to half the stroke width from the top.
        assert!((points[1].y - line_width * 0.5).abs() < 1e-9);
    }

    #[test]
    fn fill_reuses_curve_points_down_to_bottom_edge() {
        let samples = series(&[0.0, 10.0], &[1.0, 3.0]);
        let stats = EventDelayStats::compute(&samples);
        let vp = viewport(100.0, 25.0);
        let cmds = render_event_delay(
            &samples,
            &stats,
            &vp,
            &TimeRange::new(0.0, 20.0),
            10.0,
            1.0,
        );
        let polyline = chart_points(&cmds);
        let (fill_points, baseline) = cmds
            .iter()
            .find_map(|c| match c {
                RenderCommand::FillArea {
                    points, baseline_y, ..
                } => Some((points.clone(), *baseline_y)),
                _ => None,
            })
            .unwrap_or_default();
        assert_eq!(fill_points, polyline);
        assert!((baseline - vp.height).abs() < 1e-9);
    }

    #[test]
    fn single_sample_draws_one_flat_segment() {
        let samples = series(&[5.0], &[2.0]);
        let stats = EventDelayStats::compute(&samples);
        let cmds = render_event_delay(
            &samples,
            &stats,
            &viewport(100.0, 25.0),
            &TimeRange::new(0.0, 10.0),
            1.0,
            1.0,
        );
        let points = chart_points(&cmds);
        assert_eq!(points.len(), 2);
        assert!((points[1].x - points[0].x - 10.0).abs() < 1e-9); // 1ms at 10px/ms
        assert!((points[0].y - points[1].y).abs() < 1e-9);
    }

    #[test]
    fn draw_is_idempotent() {
        let samples = series(&[0.0, 10.0, 20.0], &[0.0, 10.0, 0.0]);
        let stats = EventDelayStats::compute(&samples);
        let vp = viewport(30.0, 25.0);
        let range = TimeRange::new(0.0, 30.0);
        let a = render_event_delay(&samples, &stats, &vp, &range, 10.0, 1.5);
        let b = render_event_delay(&samples, &stats, &vp, &range, 10.0, 1.5);
        assert_eq!(a, b);
    }

    #[test]
    fn device_pixel_ratio_scales_geometry() {
        let samples = series(&[0.0, 10.0], &[0.0, 4.0]);
        let stats = EventDelayStats::compute(&samples);
        let vp = Viewport {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 25.0,
            dpr: 2.0,
        };
        let cmds = render_event_delay(
            &samples,
            &stats,
            &vp,
            &TimeRange::new(0.0, 20.0),
            10.0,
            1.0,
        );
        let points = chart_points(&cmds);
        // 10ms of a 20ms range across 200 device px.
        assert!((points[1].x - 100.0).abs() < 1e-9);
        let (_, baseline) = cmds
            .iter()
            .find_map(|c| match c {
                RenderCommand::FillArea {
                    points, baseline_y, ..
                } => Some((points.clone(), *baseline_y)),
                _ => None,
            })
            .unwrap_or_default();
        assert!((baseline - 50.0).abs() < 1e-9);
    }

    #[test]
    fn hit_test_scenario() {
        // times 0/10/20 with delays 0/10/0, viewport [0,30], width 30.
        let samples = series(&[0.0, 10.0, 20.0], &[0.0, 10.0, 0.0]);
        let range = TimeRange::new(0.0, 30.0);
        assert_eq!(hit_test_sample(&samples, &range, 10.0, 5.0, 30.0), Some(0));
        assert_eq!(hit_test_sample(&samples, &range, 10.0, 15.0, 30.0), Some(1));
        assert_eq!(hit_test_sample(&samples, &range, 10.0, 25.0, 30.0), Some(2));
    }

    #[test]
    fn hit_test_at_exact_sample_time_returns_that_sample() {
        let samples = series(&[0.0, 10.0, 20.0], &[1.0, 2.0, 3.0]);
        let range = TimeRange::new(0.0, 30.0);
        for (i, &t) in samples.time.iter().enumerate() {
            // pixel_x mapping back to exactly t at width == duration.
            assert_eq!(hit_test_sample(&samples, &range, 10.0, t, 30.0), Some(i));
        }
    }

    #[test]
    fn hit_test_outside_sample_range_is_none() {
        let samples = series(&[10.0, 20.0], &[1.0, 2.0]);
        let range = TimeRange::new(0.0, 40.0);
        let width = 40.0;
        // Before the first sample.
        assert_eq!(hit_test_sample(&samples, &range, 5.0, 5.0, width), None);
        // Past last sample + interval (20 + 5 = 25).
        assert_eq!(hit_test_sample(&samples, &range, 5.0, 26.0, width), None);
        // Within the interval extension clamps to the last sample.
        assert_eq!(hit_test_sample(&samples, &range, 5.0, 24.0, width), Some(1));
    }

    #[test]
    fn hit_test_empty_series_is_none() {
        let samples = SampleTable::default();
        let range = TimeRange::new(0.0, 10.0);
        assert_eq!(hit_test_sample(&samples, &range, 1.0, 5.0, 10.0), None);
    }

    #[test]
    fn hover_dot_sits_on_the_curve() {
        let samples = series(&[0.0, 10.0, 20.0], &[0.0, 10.0, 0.0]);
        let stats = EventDelayStats::compute(&samples);
        let vp = viewport(30.0, 25.0);
        let range = TimeRange::new(0.0, 30.0);
        let line_width = 2.0;

        let cmds = render_event_delay(&samples, &stats, &vp, &range, 10.0, line_width);
        let points = chart_points(&cmds);

        let dot = hover_dot(&samples, &stats, &vp, &range, 1, line_width);
        match dot {
            Some(RenderCommand::DrawCircle { center, .. }) => {
                assert!((center.x - points[1].x).abs() < 1e-9);
                assert!((center.y - points[1].y).abs() < 1e-9);
            }
            other => panic!("expected a circle, got {other:?}"),
        }

        assert!(hover_dot(&samples, &stats, &vp, &range, 3, line_width).is_none());
    }
}
