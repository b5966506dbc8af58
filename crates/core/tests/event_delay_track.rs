//! Integration test: load a Gecko profile with event delay data, derive the
//! track list, render the delay graph, and hover it end to end.

use lagview_core::model::{EventDelayStats, TrackKind, build_tracks};
use lagview_core::parsers::parse_profile;
use lagview_core::views::{self, GRAPH_LINE_WIDTH};
use lagview_protocol::{RenderCommand, TimeRange, Viewport};

const FIXTURE: &[u8] = include_bytes!("fixtures/gecko-event-delay.json");

#[test]
fn gecko_profile_renders_and_hovers() {
    let profile = parse_profile(FIXTURE).expect("failed to parse fixture");

    assert_eq!(profile.threads.len(), 2);
    assert_eq!(profile.meta.product.as_deref(), Some("Firefox"));
    // 70ms last sample + 10ms interval.
    assert!((profile.meta.end_time - 80.0).abs() < f64::EPSILON);

    // Only GeckoMain carries delay data, so it alone gets a delay track.
    let tracks = build_tracks(&profile);
    let delay_tracks: Vec<_> = tracks
        .iter()
        .filter(|t| matches!(t.kind, TrackKind::EventDelay { .. }))
        .collect();
    assert_eq!(delay_tracks.len(), 1);
    assert_eq!(delay_tracks[0].name, "Event Delay — GeckoMain");

    let process_tracks = tracks
        .iter()
        .filter(|t| matches!(t.kind, TrackKind::Process { .. }))
        .count();
    assert_eq!(process_tracks, 2);

    // Render the delay track across the full committed range.
    let range = TimeRange::new(profile.meta.start_time, profile.meta.end_time);
    let viewport = Viewport {
        x: 0.0,
        y: 0.0,
        width: 800.0,
        height: 25.0,
        dpr: 1.0,
    };
    let commands = views::render_track(&profile, delay_tracks[0], &viewport, &range);

    let polyline = commands
        .iter()
        .find_map(|c| match c {
            RenderCommand::DrawPolyline { points, .. } => Some(points.clone()),
            _ => None,
        })
        .expect("delay track should emit a polyline");
    // 8 samples + the interval extension.
    assert_eq!(polyline.len(), 9);
    assert!(commands
        .iter()
        .any(|c| matches!(c, RenderCommand::FillArea { .. })));

    // The 120ms peak at t=30 is the delay range, so its point touches the
    // top stroke inset.
    let thread = &profile.threads[0];
    let stats = EventDelayStats::compute(&thread.samples);
    assert!((stats.delay_range - 120.0).abs() < f64::EPSILON);
    let peak = polyline
        .iter()
        .map(|p| p.y)
        .fold(f64::INFINITY, f64::min);
    assert!((peak - GRAPH_LINE_WIDTH * 0.5).abs() < 1e-9);

    // Hovering: pixel → time → sample index. 800px over 80ms is 10px/ms.
    let samples = &thread.samples;
    let interval = profile.meta.interval;
    let hit = |px: f64| views::hit_test_sample(samples, &range, interval, px, viewport.width);
    assert_eq!(hit(5.0), Some(0)); // 0.5ms → sample at t=0
    assert_eq!(hit(305.0), Some(3)); // 30.5ms → the peak sample
    assert_eq!(hit(795.0), Some(7)); // inside the interval extension clamps
    assert_eq!(hit(-10.0), None);

    // The tooltip for the peak sample reports delay and range.
    let lines = views::event_delay_tooltip(samples, &stats, 3);
    assert_eq!(lines[0].value, "120.0ms");
    assert_eq!(lines[1].value, "120.0ms");

    // Rendering twice yields identical output.
    let again = views::render_track(&profile, delay_tracks[0], &viewport, &range);
    assert_eq!(commands, again);
}

#[test]
fn share_pipeline_produces_stable_payload() {
    use lagview_core::share::{RemovableData, SharingOptions, prepare_upload};

    let profile = parse_profile(FIXTURE).expect("failed to parse fixture");
    let committed = TimeRange::new(20.0, 60.0);

    let options = SharingOptions::strict().including(RemovableData::Urls);
    let payload = prepare_upload(&profile, &options, &committed).expect("prepare upload");
    assert_eq!(payload.digest.len(), 40);
    assert!(payload.data.len() < payload.uncompressed_size);

    let again = prepare_upload(&profile, &options, &committed).expect("prepare upload");
    assert_eq!(payload.digest, again.digest);
}
