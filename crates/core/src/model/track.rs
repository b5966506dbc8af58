use lagview_protocol::{Profile, SharedStr};
use serde::{Deserialize, Serialize};

/// Default heights in CSS pixels for each track body.
pub const PROCESS_TRACK_HEIGHT: f64 = 40.0;
pub const EVENT_DELAY_TRACK_HEIGHT: f64 = 25.0;
pub const SCREENSHOT_TRACK_HEIGHT: f64 = 50.0;
pub const PROGRESS_TRACK_HEIGHT: f64 = 30.0;

/// What a timeline track displays.
///
/// A closed set rather than a string tag: the view dispatcher matches on it
/// exhaustively, so adding a variant fails compilation until every renderer
/// path handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackKind {
    /// Sample activity of one thread.
    Process { thread_index: usize },
    /// Event delay (responsiveness) graph of one thread.
    EventDelay { thread_index: usize },
    /// Screenshot thumbnails along the timeline.
    Screenshots,
    /// Visual progress percentage graph.
    VisualProgress,
}

/// One horizontal strip of the timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub kind: TrackKind,
    pub name: SharedStr,
    /// Body height in CSS pixels (headers are renderer-owned).
    pub height: f64,
}

/// Derive the track list for a loaded profile.
///
/// Every visible thread gets a process activity track, and threads carrying
/// event delay data get a delay graph track beneath it. Screenshots and
/// visual progress each contribute one global track when present.
pub fn build_tracks(profile: &Profile) -> Vec<Track> {
    let mut tracks = Vec::new();

    if !profile.screenshots.is_empty() {
        tracks.push(Track {
            kind: TrackKind::Screenshots,
            name: SharedStr::from("Screenshots"),
            height: SCREENSHOT_TRACK_HEIGHT,
        });
    }

    if !profile.visual_progress.is_empty() {
        tracks.push(Track {
            kind: TrackKind::VisualProgress,
            name: SharedStr::from("Visual Progress"),
            height: PROGRESS_TRACK_HEIGHT,
        });
    }

    for (thread_index, thread) in profile.visible_threads() {
        tracks.push(Track {
            kind: TrackKind::Process { thread_index },
            name: SharedStr::from(thread.name.as_str()),
            height: PROCESS_TRACK_HEIGHT,
        });
        if thread.has_event_delay() {
            tracks.push(Track {
                kind: TrackKind::EventDelay { thread_index },
                name: SharedStr::from(format!("Event Delay — {}", thread.name)),
                height: EVENT_DELAY_TRACK_HEIGHT,
            });
        }
    }

    tracks
}

#[cfg(test)]
mod tests {
    use super::*;
    use lagview_protocol::{ProfileMeta, ProgressSample, SampleTable, ScreenshotInfo, Thread};

    fn profile_with(
        threads: Vec<Thread>,
        screenshots: Vec<ScreenshotInfo>,
        visual_progress: Vec<ProgressSample>,
    ) -> Profile {
        Profile {
            meta: ProfileMeta {
                product: None,
                interval: 1.0,
                start_time: 0.0,
                end_time: 10.0,
            },
            threads,
            screenshots,
            visual_progress,
        }
    }

    fn thread(name: &str, hidden: bool, with_delay: bool) -> Thread {
        Thread {
            name: name.into(),
            pid: 1,
            tid: 1,
            is_hidden: hidden,
            samples: SampleTable {
                time: vec![0.0, 1.0],
                event_delay: if with_delay {
                    vec![Some(1.0), Some(2.0)]
                } else {
                    vec![None, None]
                },
            },
        }
    }

    #[test]
    fn delay_track_only_for_threads_with_data() {
        let p = profile_with(
            vec![thread("GeckoMain", false, true), thread("Compositor", false, false)],
            vec![],
            vec![],
        );
        let tracks = build_tracks(&p);
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
    }

    #[test]
    fn hidden_threads_get_no_tracks() {
        let p = profile_with(vec![thread("Hidden", true, true)], vec![], vec![]);
        assert!(build_tracks(&p).is_empty());
    }

    #[test]
    fn global_tracks_come_first_when_present() {
        let p = profile_with(
            vec![thread("GeckoMain", false, true)],
            vec![ScreenshotInfo {
                ts: 1.0,
                width: 1280.0,
                height: 720.0,
                url: None,
            }],
            vec![ProgressSample {
                ts: 1.0,
                percent: 50.0,
            }],
        );
        let tracks = build_tracks(&p);
        assert!(matches!(tracks[0].kind, TrackKind::Screenshots));
        assert!(matches!(tracks[1].kind, TrackKind::VisualProgress));
    }
}
