use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;
use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` for each track. Renderers consume
/// the list sequentially — each command carries all the data it needs, so
/// drawing the same list twice paints identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally with a text label.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        label: Option<SharedStr>,
    },

    /// Draw a text string at a position.
    DrawText {
        position: Point,
        text: SharedStr,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Stroke an open polyline through `points` in order.
    ///
    /// Used for the top edge of sample graphs (event delay, visual progress).
    DrawPolyline {
        points: Vec<Point>,
        color: ThemeToken,
        width: f64,
    },

    /// Fill the region between an open polyline and the horizontal line
    /// `y = baseline_y`. The area is bounded on the left and right by the
    /// first and last point's x coordinates.
    FillArea {
        points: Vec<Point>,
        baseline_y: f64,
        color: ThemeToken,
    },

    /// Draw a filled circle. Used for the hover dot on sample graphs.
    DrawCircle {
        center: Point,
        radius: f64,
        color: ThemeToken,
    },

    /// Restrict subsequent drawing to a rectangular region.
    SetClip { rect: Rect },

    /// Remove the active clip region.
    ClearClip,

    /// Begin a logical group (e.g. a track). Renderers may use this for
    /// batching, layer separation, or accessibility.
    BeginGroup {
        id: SharedStr,
        label: Option<SharedStr>,
    },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_roundtrip() {
        let cmds = vec![
            RenderCommand::DrawPolyline {
                points: vec![Point::new(0.0, 10.0), Point::new(5.0, 2.0)],
                color: ThemeToken::DelayLine,
                width: 1.0,
            },
            RenderCommand::FillArea {
                points: vec![Point::new(0.0, 10.0), Point::new(5.0, 2.0)],
                baseline_y: 20.0,
                color: ThemeToken::DelayFill,
            },
        ];
        let json = serde_json::to_string(&cmds).expect("serialize");
        let back: Vec<RenderCommand> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cmds);
    }
}
