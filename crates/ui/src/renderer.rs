use egui::{Align2, CornerRadius, FontId, Pos2, Rect, Stroke, StrokeKind};
use lagview_protocol::{RenderCommand, TextAlign};

use crate::theme::{self, ThemeMode};

/// Render a list of `RenderCommand` into an egui `Painter`.
///
/// `offset` is the top-left pixel position of the rendering area. Commands
/// carry device-pixel coordinates produced with `dpr = 1.0` here — egui
/// works in logical points and applies the native scale itself.
pub fn render_commands(
    painter: &mut egui::Painter,
    commands: &[RenderCommand],
    offset: Pos2,
    mode: ThemeMode,
) {
    let mut clip_stack: Vec<Rect> = Vec::new();
    let at = |x: f64, y: f64| Pos2::new(x as f32 + offset.x, y as f32 + offset.y);

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                label,
            } => {
                let egui_rect = Rect::from_min_size(
                    at(rect.x, rect.y),
                    egui::vec2(rect.w as f32, rect.h as f32),
                );
                if egui_rect.width() < 0.5 || !painter.clip_rect().intersects(egui_rect) {
                    continue;
                }

                painter.rect_filled(egui_rect, CornerRadius::ZERO, theme::resolve(*color, mode));

                if let Some(bc) = border_color {
                    painter.rect_stroke(
                        egui_rect,
                        CornerRadius::ZERO,
                        Stroke::new(1.0, theme::resolve(*bc, mode)),
                        StrokeKind::Inside,
                    );
                }

                if let Some(label_text) = label {
                    let label_str: &str = label_text;
                    if !label_str.is_empty() && egui_rect.width() > 24.0 {
                        painter.text(
                            Pos2::new(egui_rect.left() + 3.0, egui_rect.center().y),
                            Align2::LEFT_CENTER,
                            label_str,
                            FontId::proportional(10.0),
                            theme::resolve(lagview_protocol::ThemeToken::TextPrimary, mode),
                        );
                    }
                }
            }

            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
            } => {
                let anchor = match align {
                    TextAlign::Left => Align2::LEFT_CENTER,
                    TextAlign::Center => Align2::CENTER_CENTER,
                    TextAlign::Right => Align2::RIGHT_CENTER,
                };
                painter.text(
                    at(position.x, position.y),
                    anchor,
                    text.as_ref(),
                    FontId::proportional(*font_size as f32),
                    theme::resolve(*color, mode),
                );
            }

            RenderCommand::DrawLine {
                from,
                to,
                color,
                width,
            } => {
                painter.line_segment(
                    [at(from.x, from.y), at(to.x, to.y)],
                    Stroke::new(*width as f32, theme::resolve(*color, mode)),
                );
            }

            RenderCommand::DrawPolyline {
                points,
                color,
                width,
            } => {
                if points.len() < 2 {
                    continue;
                }
                let line: Vec<Pos2> = points.iter().map(|p| at(p.x, p.y)).collect();
                painter.add(egui::Shape::line(
                    line,
                    Stroke::new(*width as f32, theme::resolve(*color, mode)),
                ));
            }

            RenderCommand::FillArea {
                points,
                baseline_y,
                color,
            } => {
                // epaint only fills convex polygons correctly; the area
                // under a curve is split into one trapezoid per segment,
                // each of which is convex.
                let fill = theme::resolve(*color, mode);
                for seg in points.windows(2) {
                    let quad = vec![
                        at(seg[0].x, seg[0].y),
                        at(seg[1].x, seg[1].y),
                        at(seg[1].x, *baseline_y),
                        at(seg[0].x, *baseline_y),
                    ];
                    painter.add(egui::Shape::convex_polygon(quad, fill, Stroke::NONE));
                }
            }

            RenderCommand::DrawCircle {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(
                    at(center.x, center.y),
                    *radius as f32,
                    theme::resolve(*color, mode),
                );
            }

            RenderCommand::SetClip { rect } => {
                let clip_rect = Rect::from_min_size(
                    at(rect.x, rect.y),
                    egui::vec2(rect.w as f32, rect.h as f32),
                );
                clip_stack.push(painter.clip_rect());
                let intersected = painter.clip_rect().intersect(clip_rect);
                painter.set_clip_rect(intersected);
            }

            RenderCommand::ClearClip => {
                if let Some(prev) = clip_stack.pop() {
                    painter.set_clip_rect(prev);
                }
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {
                // Groups are semantic — no visual effect in egui
            }
        }
    }
}
