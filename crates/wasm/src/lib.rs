use std::sync::Mutex;

use lagview_core::model::{EventDelayStats, build_tracks};
use lagview_core::share::{RemovableData, SharingOptions, prepare_upload};
use lagview_core::views;
use lagview_protocol::{Profile, TimeRange, Viewport};
use wasm_bindgen::prelude::*;

static PROFILES: Mutex<Vec<Profile>> = Mutex::new(Vec::new());

fn with_profile<T>(index: usize, f: impl FnOnce(&Profile) -> Result<T, JsError>) -> Result<T, JsError> {
    let profiles = PROFILES.lock().unwrap_or_else(|e| e.into_inner());
    let profile = profiles
        .get(index)
        .ok_or_else(|| JsError::new("invalid profile index"))?;
    f(profile)
}

/// Parse a profile from bytes (JSON). Returns a handle (index) for later use.
#[wasm_bindgen]
pub fn parse_profile(data: &[u8]) -> Result<usize, JsError> {
    let profile =
        lagview_core::parsers::parse_profile(data).map_err(|e| JsError::new(&e.to_string()))?;
    let mut profiles = PROFILES.lock().unwrap_or_else(|e| e.into_inner());
    let idx = profiles.len();
    profiles.push(profile);
    Ok(idx)
}

/// The derived track list as JSON, for building the lane DOM.
#[wasm_bindgen]
pub fn get_tracks(profile_index: usize) -> Result<String, JsError> {
    with_profile(profile_index, |profile| {
        serde_json::to_string(&build_tracks(profile)).map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Render one track, returning render commands as JSON for a JS canvas
/// interpreter.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn render_track(
    profile_index: usize,
    track_index: usize,
    view_start: f64,
    view_end: f64,
    width: f64,
    height: f64,
    dpr: f64,
) -> Result<String, JsError> {
    with_profile(profile_index, |profile| {
        let tracks = build_tracks(profile);
        let track = tracks
            .get(track_index)
            .ok_or_else(|| JsError::new("invalid track index"))?;
        let viewport = Viewport {
            x: 0.0,
            y: 0.0,
            width,
            height,
            dpr,
        };
        let range = TimeRange::new(view_start, view_end);
        let commands = views::render_track(profile, track, &viewport, &range);
        serde_json::to_string(&commands).map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Hit-test a delay graph: pixel x → sample index, or -1 for none.
#[wasm_bindgen]
pub fn hit_test_delay_sample(
    profile_index: usize,
    thread_index: usize,
    view_start: f64,
    view_end: f64,
    pixel_x: f64,
    width: f64,
) -> Result<i32, JsError> {
    with_profile(profile_index, |profile| {
        let thread = profile
            .threads
            .get(thread_index)
            .ok_or_else(|| JsError::new("invalid thread index"))?;
        let range = TimeRange::new(view_start, view_end);
        let hit = views::hit_test_sample(
            &thread.samples,
            &range,
            profile.meta.interval,
            pixel_x,
            width,
        );
        Ok(hit.map_or(-1, |i| i as i32))
    })
}

/// Tooltip lines for a delay sample, as a JSON array of {value, label}.
#[wasm_bindgen]
pub fn delay_tooltip(
    profile_index: usize,
    thread_index: usize,
    sample_index: usize,
) -> Result<String, JsError> {
    with_profile(profile_index, |profile| {
        let thread = profile
            .threads
            .get(thread_index)
            .ok_or_else(|| JsError::new("invalid thread index"))?;
        let stats = EventDelayStats::compute(&thread.samples);
        let lines: Vec<serde_json::Value> =
            views::event_delay_tooltip(&thread.samples, &stats, sample_index)
                .into_iter()
                .map(|l| {
                    serde_json::json!({
                        "value": l.value,
                        "label": l.label.as_str(),
                    })
                })
                .collect();
        serde_json::to_string(&lines).map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Sanitize, compress, and digest a profile for upload. The payload bytes
/// come back to JS; `last_upload_digest` exposes the hash.
#[wasm_bindgen]
pub fn prepare_profile_upload(
    profile_index: usize,
    include_hidden_threads: bool,
    include_full_range: bool,
    include_screenshots: bool,
    include_urls: bool,
    view_start: f64,
    view_end: f64,
) -> Result<Vec<u8>, JsError> {
    with_profile(profile_index, |profile| {
        let mut options = SharingOptions::strict();
        if include_hidden_threads {
            options = options.including(RemovableData::HiddenThreads);
        }
        if include_full_range {
            options = options.including(RemovableData::FullTimeRange);
        }
        if include_screenshots {
            options = options.including(RemovableData::Screenshots);
        }
        if include_urls {
            options = options.including(RemovableData::Urls);
        }
        let committed = TimeRange::new(view_start, view_end);
        let payload = prepare_upload(profile, &options, &committed)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(payload.data)
    })
}

/// Profile metadata as JSON.
#[wasm_bindgen]
pub fn get_profile_metadata(profile_index: usize) -> Result<String, JsError> {
    with_profile(profile_index, |profile| {
        serde_json::to_string(&profile.meta).map_err(|e| JsError::new(&e.to_string()))
    })
}
