use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Pixel dimensions of the surface a view is drawn into.
///
/// Produced by the layout-measurement side of a renderer and recomputed on
/// every draw call. `dpr` is the device pixel ratio; views multiply their
/// CSS-pixel inputs by it to get device-pixel output coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

/// The committed (visible) time window of the timeline, in milliseconds.
///
/// Mutated externally on pan/zoom; views only read it. Callers must uphold
/// `start < end` — a degenerate or inverted range is a precondition violation
/// and views are free to return nothing for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the window in milliseconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether a timestamp falls inside the window (inclusive bounds).
    pub fn contains(&self, ts: f64) -> bool {
        ts >= self.start && ts <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_range_duration() {
        let r = TimeRange::new(10.0, 40.0);
        assert!((r.duration() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn time_range_contains_bounds() {
        let r = TimeRange::new(0.0, 100.0);
        assert!(r.contains(0.0));
        assert!(r.contains(100.0));
        assert!(!r.contains(-0.1));
        assert!(!r.contains(100.1));
    }
}
