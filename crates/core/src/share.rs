use std::collections::BTreeSet;
use std::io::Write as _;

use flate2::Compression;
use flate2::write::GzEncoder;
use lagview_protocol::{Profile, ProfileMeta, TimeRange};
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use thiserror::Error;

/// Data categories that can be stripped from a profile before sharing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RemovableData {
    /// Threads the user hid in the timeline.
    HiddenThreads,
    /// Everything outside the committed range.
    FullTimeRange,
    /// Timeline screenshots.
    Screenshots,
    /// URL-like strings in names and screenshot origins.
    Urls,
}

impl RemovableData {
    pub const ALL: [RemovableData; 4] = [
        RemovableData::HiddenThreads,
        RemovableData::FullTimeRange,
        RemovableData::Screenshots,
        RemovableData::Urls,
    ];
}

/// The set of categories to remove before upload.
///
/// A value object: `including`/`excluding` build a new set instead of
/// mutating, so a sharing panel can hold one per open state and compare
/// them cheaply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharingOptions {
    removed: BTreeSet<RemovableData>,
}

impl SharingOptions {
    /// Strip everything — the default when the sharing panel opens.
    pub fn strict() -> Self {
        Self {
            removed: RemovableData::ALL.into_iter().collect(),
        }
    }

    /// Keep everything.
    pub fn permissive() -> Self {
        Self {
            removed: BTreeSet::new(),
        }
    }

    /// A copy of these options with `data` included in the upload.
    #[must_use]
    pub fn including(&self, data: RemovableData) -> Self {
        let mut removed = self.removed.clone();
        removed.remove(&data);
        Self { removed }
    }

    /// A copy of these options with `data` stripped from the upload.
    #[must_use]
    pub fn excluding(&self, data: RemovableData) -> Self {
        let mut removed = self.removed.clone();
        removed.insert(data);
        Self { removed }
    }

    pub fn removes(&self, data: RemovableData) -> bool {
        self.removed.contains(&data)
    }
}

impl Default for SharingOptions {
    fn default() -> Self {
        Self::strict()
    }
}

/// Drop a whitespace-separated token when it looks like a URL.
fn scrub_urls(text: &str) -> String {
    text.split_whitespace()
        .map(|tok| if tok.contains("://") { "<URL>" } else { tok })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Apply the selected PII redactions, returning a new profile.
///
/// The input is untouched; renderers keep displaying the full profile while
/// the sanitized copy goes through the upload pipeline.
pub fn sanitize_profile(
    profile: &Profile,
    options: &SharingOptions,
    committed: &TimeRange,
) -> Profile {
    let mut out = profile.clone();

    if options.removes(RemovableData::HiddenThreads) {
        out.threads.retain(|t| !t.is_hidden);
    }

    if options.removes(RemovableData::FullTimeRange) {
        for thread in &mut out.threads {
            let samples = &mut thread.samples;
            let lo = samples.time.partition_point(|&t| t < committed.start);
            let hi = samples.time.partition_point(|&t| t <= committed.end);
            samples.event_delay = (lo..hi)
                .map(|i| samples.event_delay.get(i).copied().flatten())
                .collect();
            samples.time = samples.time[lo..hi].to_vec();
        }
        out.screenshots.retain(|s| committed.contains(s.ts));
        out.visual_progress.retain(|p| committed.contains(p.ts));
        out.meta.start_time = out.meta.start_time.max(committed.start);
        out.meta.end_time = out.meta.end_time.min(committed.end);
    }

    if options.removes(RemovableData::Screenshots) {
        out.screenshots.clear();
    }

    if options.removes(RemovableData::Urls) {
        for thread in &mut out.threads {
            thread.name = scrub_urls(&thread.name);
        }
        for shot in &mut out.screenshots {
            shot.url = None;
        }
    }

    out
}

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("failed to serialize profile: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to compress profile: {0}")]
    Compress(#[from] std::io::Error),
}

/// The prepared upload: gzip bytes plus their digest.
///
/// Handing this to an uploader (or writing it to disk) is the caller's
/// business — no network I/O happens here.
#[derive(Debug, Clone)]
pub struct UploadPayload {
    /// Gzip-compressed serialized profile.
    pub data: Vec<u8>,
    /// SHA-1 of the compressed bytes, hex-encoded.
    pub digest: String,
    /// Serialized size before compression.
    pub uncompressed_size: usize,
}

/// Sanitize, serialize, compress, and digest a profile for sharing.
pub fn prepare_upload(
    profile: &Profile,
    options: &SharingOptions,
    committed: &TimeRange,
) -> Result<UploadPayload, ShareError> {
    let sanitized = sanitize_profile(profile, options, committed);
    let json = serde_json::to_vec(&sanitized)?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    let data = encoder.finish()?;

    let digest = hex::encode(Sha1::digest(&data));
    log::info!(
        "prepared upload: {} bytes compressed ({} uncompressed), sha1 {digest}",
        data.len(),
        json.len(),
    );

    Ok(UploadPayload {
        data,
        digest,
        uncompressed_size: json.len(),
    })
}

/// File name for saving a profile to disk.
pub fn download_file_name(meta: &ProfileMeta) -> String {
    let product = meta.product.as_deref().unwrap_or("untitled");
    let slug: String = product
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    format!("{}-profile.json.gz", slug.trim_matches('-'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lagview_protocol::{SampleTable, ScreenshotInfo, Thread};
    use std::io::Read as _;

    fn profile() -> Profile {
        Profile {
            meta: ProfileMeta {
                product: Some("Firefox".into()),
                interval: 1.0,
                start_time: 0.0,
                end_time: 100.0,
            },
            threads: vec![
                Thread {
                    name: "GeckoMain https://example.com/secret".into(),
                    pid: 1,
                    tid: 1,
                    is_hidden: false,
                    samples: SampleTable {
                        time: vec![0.0, 10.0, 20.0, 30.0, 40.0],
                        event_delay: vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)],
                    },
                },
                Thread {
                    name: "Hidden".into(),
                    pid: 1,
                    tid: 2,
                    is_hidden: true,
                    samples: SampleTable::default(),
                },
            ],
            screenshots: vec![ScreenshotInfo {
                ts: 15.0,
                width: 100.0,
                height: 100.0,
                url: Some("https://example.com".into()),
            }],
            visual_progress: vec![],
        }
    }

    #[test]
    fn options_are_rebuilt_not_mutated() {
        let strict = SharingOptions::strict();
        let with_screens = strict.including(RemovableData::Screenshots);
        assert!(strict.removes(RemovableData::Screenshots));
        assert!(!with_screens.removes(RemovableData::Screenshots));
        assert_ne!(strict, with_screens);

        let back = with_screens.excluding(RemovableData::Screenshots);
        assert_eq!(back, strict);
    }

    #[test]
    fn strict_sanitization_strips_everything() {
        let p = profile();
        let committed = TimeRange::new(10.0, 30.0);
        let out = sanitize_profile(&p, &SharingOptions::strict(), &committed);

        assert_eq!(out.threads.len(), 1); // hidden thread dropped
        assert_eq!(out.threads[0].samples.time, vec![10.0, 20.0, 30.0]);
        assert!(out.screenshots.is_empty());
        assert_eq!(out.threads[0].name, "GeckoMain <URL>");
        assert!((out.meta.start_time - 10.0).abs() < f64::EPSILON);
        assert!((out.meta.end_time - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn permissive_sanitization_is_identity_on_counts() {
        let p = profile();
        let committed = TimeRange::new(10.0, 30.0);
        let out = sanitize_profile(&p, &SharingOptions::permissive(), &committed);
        assert_eq!(out.threads.len(), 2);
        assert_eq!(out.threads[0].samples.len(), 5);
        assert_eq!(out.screenshots.len(), 1);
        assert_eq!(out.threads[0].name, p.threads[0].name);
    }

    #[test]
    fn upload_payload_roundtrips_through_gzip() {
        let p = profile();
        let committed = TimeRange::new(0.0, 100.0);
        let payload =
            prepare_upload(&p, &SharingOptions::permissive(), &committed).expect("prepare");

        assert!(payload.uncompressed_size > 0);
        assert_eq!(payload.digest.len(), 40);

        let mut decoder = flate2::read::GzDecoder::new(payload.data.as_slice());
        let mut json = Vec::new();
        decoder.read_to_end(&mut json).expect("gunzip");
        assert_eq!(json.len(), payload.uncompressed_size);

        let back: Profile = serde_json::from_slice(&json).expect("parse");
        assert_eq!(back.sample_count(), p.sample_count());
    }

    #[test]
    fn digest_is_stable_for_identical_input() {
        let p = profile();
        let committed = TimeRange::new(0.0, 100.0);
        let a = prepare_upload(&p, &SharingOptions::strict(), &committed).expect("prepare");
        let b = prepare_upload(&p, &SharingOptions::strict(), &committed).expect("prepare");
        assert_eq!(a.digest, b.digest);
    }

    #[test]
    fn download_name_slugifies_product() {
        let meta = ProfileMeta {
            product: Some("Firefox Nightly".into()),
            interval: 1.0,
            start_time: 0.0,
            end_time: 1.0,
        };
        assert_eq!(download_file_name(&meta), "firefox-nightly-profile.json.gz");

        let unnamed = ProfileMeta {
            product: None,
            ..meta
        };
        assert_eq!(download_file_name(&unnamed), "untitled-profile.json.gz");
    }
}
