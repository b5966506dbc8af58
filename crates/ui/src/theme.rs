use lagview_protocol::ThemeToken;

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
    .to_color32()
}

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    // Catppuccin Mocha palette
    use ThemeToken::*;
    match token {
        DelayLine => ResolvedColor::rgb(0xfa, 0xb3, 0x87), // Peach
        DelayFill => ResolvedColor::rgba(0xfa, 0xb3, 0x87, 0x88),
        DelayDot => ResolvedColor::rgb(0xf9, 0xe2, 0xaf), // Yellow

        ActivityFill => ResolvedColor::rgba(0x74, 0xc7, 0xec, 80), // Sapphire
        ActivityLine => ResolvedColor::rgb(0x74, 0xc7, 0xec),

        ProgressLine => ResolvedColor::rgb(0xa6, 0xe3, 0xa1), // Green
        ProgressFill => ResolvedColor::rgba(0xa6, 0xe3, 0xa1, 70),

        ScreenshotFrame => ResolvedColor::rgb(0x45, 0x47, 0x5a), // Surface1
        ScreenshotLabel => ResolvedColor::rgb(0xba, 0xc2, 0xde), // Subtext1

        EmptyRegion => ResolvedColor::rgba(0x11, 0x11, 0x1b, 140),

        TrackBackground => ResolvedColor::rgb(0x1e, 0x1e, 0x2e), // Base
        TrackBorder => ResolvedColor::rgb(0x31, 0x32, 0x44),     // Surface0
        TrackHeaderBackground => ResolvedColor::rgb(0x18, 0x18, 0x25), // Mantle
        TrackHeaderText => ResolvedColor::rgb(0xcd, 0xd6, 0xf4), // Text

        TextPrimary => ResolvedColor::rgb(0xcd, 0xd6, 0xf4),
        TextSecondary => ResolvedColor::rgb(0xba, 0xc2, 0xde),
        TextMuted => ResolvedColor::rgb(0xa6, 0xad, 0xc8),

        AxisBackground => ResolvedColor::rgb(0x18, 0x18, 0x25),
        AxisTick => ResolvedColor::rgb(0xa6, 0xad, 0xc8),
        AxisLabel => ResolvedColor::rgb(0xcd, 0xd6, 0xf4),
        GridLine => ResolvedColor::rgba(0x31, 0x32, 0x44, 180),

        HoverHighlight => ResolvedColor::rgba(0xcd, 0xd6, 0xf4, 25),
        SelectionHighlight => ResolvedColor::rgba(0x89, 0xb4, 0xfa, 80),

        TooltipBackground => ResolvedColor::rgb(0x18, 0x18, 0x25),
        TooltipText => ResolvedColor::rgb(0xba, 0xc2, 0xde),
        TooltipValue => ResolvedColor::rgb(0xcd, 0xd6, 0xf4),

        Background => ResolvedColor::rgb(0x11, 0x11, 0x1b), // Crust
        Surface => ResolvedColor::rgb(0x18, 0x18, 0x25),
        Border => ResolvedColor::rgb(0x31, 0x32, 0x44),

        ToolbarBackground => ResolvedColor::rgb(0x18, 0x18, 0x25),
        ToolbarText => ResolvedColor::rgb(0xcd, 0xd6, 0xf4),
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        // The classic orange of the event delay graph.
        DelayLine => ResolvedColor::rgb(0xe8, 0x83, 0x0c),
        DelayFill => ResolvedColor::rgba(0xff, 0x94, 0x00, 0x88),
        DelayDot => ResolvedColor::rgb(0xb0, 0x60, 0x00),

        ActivityFill => ResolvedColor::rgba(66, 135, 245, 70),
        ActivityLine => ResolvedColor::rgb(50, 110, 220),

        ProgressLine => ResolvedColor::rgb(46, 158, 68),
        ProgressFill => ResolvedColor::rgba(46, 158, 68, 70),

        ScreenshotFrame => ResolvedColor::rgb(210, 210, 220),
        ScreenshotLabel => ResolvedColor::rgb(80, 80, 100),

        EmptyRegion => ResolvedColor::rgba(0, 0, 0, 20),

        TrackBackground => ResolvedColor::rgb(250, 250, 252),
        TrackBorder => ResolvedColor::rgb(210, 210, 220),
        TrackHeaderBackground => ResolvedColor::rgb(240, 240, 245),
        TrackHeaderText => ResolvedColor::rgb(40, 40, 50),

        TextPrimary => ResolvedColor::rgb(20, 20, 30),
        TextSecondary => ResolvedColor::rgb(80, 80, 100),
        TextMuted => ResolvedColor::rgb(100, 100, 110),

        AxisBackground => ResolvedColor::rgb(240, 240, 245),
        AxisTick => ResolvedColor::rgb(100, 100, 110),
        AxisLabel => ResolvedColor::rgb(20, 20, 30),
        GridLine => ResolvedColor::rgba(180, 180, 190, 160),

        HoverHighlight => ResolvedColor::rgba(0, 0, 0, 15),
        SelectionHighlight => ResolvedColor::rgba(66, 135, 245, 60),

        TooltipBackground => ResolvedColor::rgb(255, 255, 255),
        TooltipText => ResolvedColor::rgb(80, 80, 100),
        TooltipValue => ResolvedColor::rgb(20, 20, 30),

        Background => ResolvedColor::rgb(255, 255, 255),
        Surface => ResolvedColor::rgb(245, 245, 248),
        Border => ResolvedColor::rgb(210, 210, 220),

        ToolbarBackground => ResolvedColor::rgb(248, 248, 250),
        ToolbarText => ResolvedColor::rgb(40, 40, 50),
    }
}

// ── egui visual presets ────────────────────────────────────────────────────

/// Dark widget visuals matching the track palette.
pub fn dark_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::dark();
    v.panel_fill = egui::Color32::from_rgb(0x18, 0x18, 0x25);
    v.window_fill = egui::Color32::from_rgb(0x1e, 0x1e, 0x2e);
    v.extreme_bg_color = egui::Color32::from_rgb(0x11, 0x11, 0x1b);
    v.faint_bg_color = egui::Color32::from_rgb(0x1e, 0x1e, 0x2e);
    v.widgets.noninteractive.bg_fill = egui::Color32::from_rgb(0x31, 0x32, 0x44);
    v.widgets.noninteractive.fg_stroke =
        egui::Stroke::new(1.0, egui::Color32::from_rgb(0xba, 0xc2, 0xde));
    v.widgets.inactive.bg_fill = egui::Color32::from_rgb(0x45, 0x47, 0x5a);
    v.widgets.inactive.fg_stroke =
        egui::Stroke::new(1.0, egui::Color32::from_rgb(0xba, 0xc2, 0xde));
    v.widgets.hovered.bg_fill = egui::Color32::from_rgb(0x58, 0x5b, 0x70);
    v.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(0xcd, 0xd6, 0xf4));
    v.widgets.active.bg_fill = egui::Color32::from_rgb(0xfa, 0xb3, 0x87);
    v.widgets.active.fg_stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(0x1e, 0x1e, 0x2e));
    v.selection.bg_fill = egui::Color32::from_rgba_unmultiplied(0xfa, 0xb3, 0x87, 60);
    v.selection.stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(0xfa, 0xb3, 0x87));
    v.hyperlink_color = egui::Color32::from_rgb(0xfa, 0xb3, 0x87);
    v.warn_fg_color = egui::Color32::from_rgb(0xf9, 0xe2, 0xaf);
    v.error_fg_color = egui::Color32::from_rgb(0xf3, 0x8b, 0xa8);
    v
}

/// Light widget visuals.
pub fn light_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::light();
    v.panel_fill = egui::Color32::from_rgb(248, 248, 250);
    v.window_fill = egui::Color32::from_rgb(255, 255, 255);
    v.faint_bg_color = egui::Color32::from_rgb(245, 245, 248);
    v.widgets.active.bg_fill = egui::Color32::from_rgb(0xe8, 0x83, 0x0c);
    v.widgets.active.fg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    v.selection.bg_fill = egui::Color32::from_rgba_unmultiplied(0xe8, 0x83, 0x0c, 50);
    v.selection.stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(0xe8, 0x83, 0x0c));
    v.hyperlink_color = egui::Color32::from_rgb(0xb0, 0x60, 0x00);
    v
}
