use lagview_protocol::{Profile, ProfileMeta, SampleTable, Thread};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeckoParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no threads found")]
    NoThreads,
}

/// Gecko profiler format top level.
#[derive(Debug, Deserialize)]
struct GeckoProfile {
    #[serde(default)]
    threads: Vec<GeckoThread>,
    #[serde(default)]
    meta: Option<GeckoMeta>,
}

#[derive(Debug, Deserialize)]
struct GeckoMeta {
    #[serde(default)]
    interval: Option<f64>,
    #[serde(default, rename = "startTime")]
    start_time: Option<f64>,
    #[serde(default)]
    product: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeckoThread {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    pid: Option<u64>,
    #[serde(default)]
    tid: Option<u64>,
    samples: Option<GeckoSamples>,
}

#[derive(Debug, Deserialize)]
struct GeckoSamples {
    #[serde(default)]
    time: Vec<f64>,
    /// Per-sample event delay. Older captures call this `responsiveness`.
    #[serde(default, rename = "eventDelay")]
    event_delay: Option<Vec<Option<f64>>>,
    #[serde(default)]
    responsiveness: Option<Vec<Option<f64>>>,
}

/// Parse a Gecko profiler JSON into a `Profile`.
///
/// Used by: Firefox DevTools profiler, `profiler.firefox.com` exports.
/// Timestamps are kept in milliseconds as the format records them.
pub fn parse_gecko(data: &[u8]) -> Result<Profile, GeckoParseError> {
    let gecko: GeckoProfile = serde_json::from_slice(data)?;

    if gecko.threads.is_empty() {
        return Err(GeckoParseError::NoThreads);
    }

    let interval = gecko.meta.as_ref().and_then(|m| m.interval).unwrap_or(1.0);
    let profile_start = gecko
        .meta
        .as_ref()
        .and_then(|m| m.start_time)
        .unwrap_or(0.0);

    let mut threads = Vec::with_capacity(gecko.threads.len());
    for (i, thread) in gecko.threads.into_iter().enumerate() {
        let samples = thread.samples.map_or_else(SampleTable::default, |s| {
            let len = s.time.len();
            let mut delays = s.event_delay.or(s.responsiveness).unwrap_or_default();
            // Align the delay column with the time column.
            delays.resize(len, None);
            SampleTable {
                time: s.time,
                event_delay: delays,
            }
        });

        threads.push(Thread {
            name: thread.name.unwrap_or_else(|| format!("Thread {i}")),
            pid: thread.pid.unwrap_or(0),
            tid: thread.tid.unwrap_or(i as u64),
            is_hidden: false,
            samples,
        });
    }

    let start_time = threads
        .iter()
        .filter_map(|t| t.samples.first_time())
        .fold(f64::INFINITY, f64::min);
    let end_time = threads
        .iter()
        .filter_map(|t| t.samples.last_time())
        .fold(f64::NEG_INFINITY, f64::max);

    let meta = ProfileMeta {
        product: gecko.meta.and_then(|m| m.product),
        interval,
        start_time: if start_time.is_finite() {
            start_time
        } else {
            profile_start
        },
        // The samples range extends one interval past the last sample.
        end_time: if end_time.is_finite() {
            end_time + interval
        } else {
            profile_start
        },
    };

    log::debug!(
        "parsed gecko profile: {} threads, {} samples",
        threads.len(),
        threads.iter().map(|t| t.samples.len()).sum::<usize>(),
    );

    Ok(Profile {
        meta,
        threads,
        screenshots: Vec::new(),
        visual_progress: Vec::new(),
    })
}
