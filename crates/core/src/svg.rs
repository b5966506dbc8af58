//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use lagview_protocol::{RenderCommand, ThemeToken};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 120);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif;font-size:11px">"#,
    ));

    let bg = if dark { "#1e1e2e" } else { "#ffffff" };
    svg.push_str(&format!(
        r#"<rect width="{width}" height="{height}" fill="{bg}"/>"#,
    ));

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                label,
            } => {
                let fill = resolve_color(*color, dark);
                let stroke = border_color
                    .map(|b| format!(r#" stroke="{}""#, resolve_color(b, dark)))
                    .unwrap_or_default();
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}"{stroke}>"#,
                    rect.x, rect.y, rect.w, rect.h,
                ));
                if let Some(label) = label {
                    svg.push_str(&format!("<title>{}</title>", escape_xml(label)));
                }
                svg.push_str("</rect>");
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
            } => {
                let stroke = resolve_color(*color, dark);
                svg.push_str(&format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{line_width}"/>"#,
                    from.x, from.y, to.x, to.y,
                ));
            }
            RenderCommand::DrawPolyline {
                points,
                color,
                width: line_width,
            } => {
                let stroke = resolve_color(*color, dark);
                svg.push_str(&format!(
                    r#"<polyline points="{}" fill="none" stroke="{stroke}" stroke-width="{line_width}" stroke-linejoin="round"/>"#,
                    point_list(points),
                ));
            }
            RenderCommand::FillArea {
                points,
                baseline_y,
                color,
            } => {
                if let (Some(first), Some(last)) = (points.first(), points.last()) {
                    let fill = resolve_color(*color, dark);
                    svg.push_str(&format!(
                        r#"<path d="M{} L{} {} L{} {} Z" fill="{fill}"/>"#,
                        path_list(points),
                        last.x,
                        baseline_y,
                        first.x,
                        baseline_y,
                    ));
                }
            }
            RenderCommand::DrawCircle {
                center,
                radius,
                color,
            } => {
                let fill = resolve_color(*color, dark);
                svg.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="{radius}" fill="{fill}"/>"#,
                    center.x, center.y,
                ));
            }
            RenderCommand::DrawText {
                text,
                position,
                color,
                ..
            } => {
                let fill = resolve_color(*color, dark);
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" fill="{fill}">{}</text>"#,
                    position.x,
                    position.y,
                    escape_xml(text),
                ));
            }
            // Clip/group commands don't affect static SVG output
            _ => {}
        }
    }

    svg.push_str("</svg>");
    svg
}

fn point_list(points: &[lagview_protocol::Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn path_list(points: &[lagview_protocol::Point]) -> String {
    points
        .iter()
        .map(|p| format!("{} {}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" L")
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::DelayLine => "#fab387",
            ThemeToken::DelayFill => "#fab38788",
            ThemeToken::DelayDot => "#f9e2af",
            ThemeToken::ActivityFill => "#74c7ec55",
            ThemeToken::ActivityLine => "#74c7ec",
            ThemeToken::ProgressLine => "#a6e3a1",
            ThemeToken::ProgressFill => "#a6e3a155",
            ThemeToken::ScreenshotFrame => "#45475a",
            ThemeToken::EmptyRegion => "#11111b80",
            ThemeToken::TrackBackground | ThemeToken::Background => "#1e1e2e",
            ThemeToken::TrackBorder | ThemeToken::Border | ThemeToken::GridLine => "#313244",
            ThemeToken::AxisBackground => "#181825",
            ThemeToken::TextPrimary | ThemeToken::AxisLabel => "#cdd6f4",
            ThemeToken::TextSecondary | ThemeToken::TextMuted | ThemeToken::AxisTick => "#a6adc8",
            _ => "#6c7086",
        }
    } else {
        match token {
            ThemeToken::DelayLine => "#e8830c",
            ThemeToken::DelayFill => "#ff940088",
            ThemeToken::DelayDot => "#b06000",
            ThemeToken::ActivityFill => "#4287f555",
            ThemeToken::ActivityLine => "#326edc",
            ThemeToken::ProgressLine => "#2e9e44",
            ThemeToken::ProgressFill => "#2e9e4455",
            ThemeToken::ScreenshotFrame => "#d2d2dc",
            ThemeToken::EmptyRegion => "#00000014",
            ThemeToken::TrackBackground | ThemeToken::Background => "#fafafc",
            ThemeToken::TrackBorder | ThemeToken::Border | ThemeToken::GridLine => "#d2d2dc",
            ThemeToken::AxisBackground => "#f0f0f5",
            ThemeToken::TextPrimary | ThemeToken::AxisLabel => "#14141e",
            ThemeToken::TextSecondary | ThemeToken::TextMuted | ThemeToken::AxisTick => "#646477",
            _ => "#999999",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
