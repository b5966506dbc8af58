use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    TrackBackground,
    TrackBorder,
    TrackHeaderBackground,
    TrackHeaderText,

    TextPrimary,
    TextSecondary,
    TextMuted,

    // Event delay graph
    DelayLine,
    DelayFill,
    DelayDot,

    // Process activity track
    ActivityFill,
    ActivityLine,

    // Visual progress track
    ProgressLine,
    ProgressFill,

    // Screenshots track
    ScreenshotFrame,
    ScreenshotLabel,

    // Regions of the committed range with no samples
    EmptyRegion,

    // Time axis
    AxisBackground,
    AxisTick,
    AxisLabel,
    GridLine,

    // Hover / selection
    HoverHighlight,
    SelectionHighlight,

    // Tooltip
    TooltipBackground,
    TooltipText,
    TooltipValue,

    Background,
    Surface,
    Border,

    // Toolbar
    ToolbarBackground,
    ToolbarText,
}
