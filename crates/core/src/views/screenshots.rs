use lagview_protocol::{Rect, RenderCommand, ScreenshotInfo, ThemeToken, TimeRange, Viewport};

const THUMB_GAP: f64 = 1.0;

/// Render screenshot thumbnails as framed slots along the timeline.
///
/// Each screenshot occupies a slot at its capture position, sized to the
/// track height with the source aspect ratio. Actual image decoding is the
/// renderer's concern; the command layer only carries the frames.
pub fn render_screenshots(
    screenshots: &[ScreenshotInfo],
    viewport: &Viewport,
    range: &TimeRange,
) -> Vec<RenderCommand> {
    let duration = range.duration();
    if viewport.width == 0.0 || duration <= 0.0 || screenshots.is_empty() {
        return Vec::new();
    }

    let device_width = viewport.width * viewport.dpr;
    let device_height = viewport.height * viewport.dpr;
    let x_scale = device_width / duration;

    let mut commands = Vec::with_capacity(screenshots.len() + 2);
    commands.push(RenderCommand::BeginGroup {
        id: "screenshots".into(),
        label: Some("Screenshots".into()),
    });

    for shot in screenshots {
        if shot.ts < range.start || shot.ts > range.end {
            continue;
        }
        let aspect = if shot.height > 0.0 {
            shot.width / shot.height
        } else {
            1.0
        };
        let thumb_w = device_height * aspect;
        let x = (shot.ts - range.start) * x_scale;
        if x + thumb_w < 0.0 || x > device_width {
            continue;
        }

        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, THUMB_GAP, thumb_w, device_height - 2.0 * THUMB_GAP),
            color: ThemeToken::ScreenshotFrame,
            border_color: Some(ThemeToken::TrackBorder),
            label: None,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 50.0,
            dpr: 1.0,
        }
    }

    fn shot(ts: f64) -> ScreenshotInfo {
        ScreenshotInfo {
            ts,
            width: 1280.0,
            height: 720.0,
            url: None,
        }
    }

    #[test]
    fn renders_visible_screenshots() {
        let shots = vec![shot(10.0), shot(50.0), shot(500.0)];
        let cmds = render_screenshots(&shots, &viewport(), &TimeRange::new(0.0, 100.0));
        let rects = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawRect { .. }))
            .count();
        assert_eq!(rects, 2);
    }

    #[test]
    fn thumb_width_follows_aspect() {
        let shots = vec![shot(10.0)];
        let cmds = render_screenshots(&shots, &viewport(), &TimeRange::new(0.0, 100.0));
        let rect = cmds.iter().find_map(|c| match c {
            RenderCommand::DrawRect { rect, .. } => Some(*rect),
            _ => None,
        });
        let rect = rect.unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
        // 50px tall track, 16:9 source → ~88.9px wide thumb.
        assert!((rect.w - 50.0 * (1280.0 / 720.0)).abs() < 1e-9);
    }

    #[test]
    fn no_screenshots_renders_nothing() {
        let cmds = render_screenshots(&[], &viewport(), &TimeRange::new(0.0, 100.0));
        assert!(cmds.is_empty());
    }
}
