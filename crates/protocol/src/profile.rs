use serde::{Deserialize, Serialize};

/// The profile IR every loader compiles into and every view reads from.
///
/// ```text
///   Gecko JSON ──▶ Profile ──▶ View Transform ──▶ RenderCommand[] ──▶ Renderer
///                  (this)      (event delay,       (DrawPolyline,      (egui,
///                               process activity,   FillArea,           terminal,
///                               screenshots…)       DrawRect…)          SVG…)
/// ```
///
/// # Design principles
///
/// 1. **Immutable once loaded** — views never mutate the profile; every
///    derived quantity (delay stats, track lists, pixel geometry) is
///    recomputed from it.
/// 2. **Columnar samples** — timestamps and delay values are parallel
///    vectors, matching the on-disk format and keeping binary search over
///    time cheap.
/// 3. **Serializable** — the same struct is saved to disk, shipped across
///    the WASM boundary, and fed to the share pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub meta: ProfileMeta,
    pub threads: Vec<Thread>,
    /// Timeline screenshots, ordered by timestamp. Empty when the profile
    /// was captured without them.
    #[serde(default)]
    pub screenshots: Vec<ScreenshotInfo>,
    /// Visual progress samples (0–100%), ordered by timestamp.
    #[serde(default)]
    pub visual_progress: Vec<ProgressSample>,
}

/// Top-level metadata about the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileMeta {
    /// Product that captured the profile ("Firefox", app name, etc.).
    pub product: Option<String>,
    /// Sampling interval in milliseconds. The samples range extends one
    /// interval past the last sample's timestamp.
    pub interval: f64,
    /// Start of the profile in milliseconds.
    pub start_time: f64,
    /// End of the profile in milliseconds.
    pub end_time: f64,
}

/// One sampled thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub name: String,
    pub pid: u64,
    pub tid: u64,
    /// Hidden threads are kept out of the timeline and stripped from shared
    /// profiles unless the user opts in.
    #[serde(default)]
    pub is_hidden: bool,
    pub samples: SampleTable,
}

impl Thread {
    /// Whether any sample carries an event delay value.
    pub fn has_event_delay(&self) -> bool {
        self.samples.event_delay.iter().any(Option::is_some)
    }
}

/// Columnar sample storage: `time[i]` pairs with `event_delay[i]`.
///
/// Timestamps are monotonically non-decreasing — loaders must uphold this,
/// views rely on it for binary search. A `None` delay means the sampler had
/// no event delay measurement for that tick and is treated as 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleTable {
    pub time: Vec<f64>,
    pub event_delay: Vec<Option<f64>>,
}

impl SampleTable {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Delay value for sample `i`, with absent values read as 0.
    pub fn delay_at(&self, i: usize) -> f64 {
        self.event_delay.get(i).copied().flatten().unwrap_or(0.0)
    }

    pub fn first_time(&self) -> Option<f64> {
        self.time.first().copied()
    }

    pub fn last_time(&self) -> Option<f64> {
        self.time.last().copied()
    }
}

/// A screenshot captured during profiling, positioned on the timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotInfo {
    pub ts: f64,
    /// Source dimensions in pixels, used to compute the thumbnail aspect.
    pub width: f64,
    pub height: f64,
    /// Origin URL of the captured page, if known. Stripped by sharing
    /// sanitization when URLs are excluded.
    pub url: Option<String>,
}

/// One visual-progress measurement (perceptual page load), 0–100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProgressSample {
    pub ts: f64,
    pub percent: f64,
}

impl Profile {
    /// Total duration of the profile in milliseconds.
    pub fn duration(&self) -> f64 {
        self.meta.end_time - self.meta.start_time
    }

    /// Threads that should appear in the timeline.
    pub fn visible_threads(&self) -> impl Iterator<Item = (usize, &Thread)> {
        self.threads
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_hidden)
    }

    /// Total number of samples across all threads.
    pub fn sample_count(&self) -> usize {
        self.threads.iter().map(|t| t.samples.len()).sum()
    }
}
