use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lagview_core::model::{EventDelayStats, Track, TrackKind, build_tracks};
use lagview_core::views;
use lagview_protocol::{Point, Profile, RenderCommand, ThemeToken, TimeRange, Viewport};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
};

/// Rows per track body in the terminal layout.
const TRACK_BODY_ROWS: u16 = 4;
/// Sub-cell height units per row; eighth blocks give 8 fill levels.
const UNITS_PER_ROW: f64 = 8.0;

const BLOCKS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::DelayLine | ThemeToken::DelayFill => Color::Rgb(250, 179, 135),
        ThemeToken::DelayDot => Color::LightYellow,
        ThemeToken::ActivityFill | ThemeToken::ActivityLine => Color::Rgb(116, 199, 236),
        ThemeToken::ProgressLine | ThemeToken::ProgressFill => Color::Green,
        ThemeToken::ScreenshotFrame => Color::DarkGray,
        ThemeToken::EmptyRegion => Color::Rgb(40, 40, 50),
        ThemeToken::TrackBackground | ThemeToken::Background | ThemeToken::Surface => Color::Black,
        ThemeToken::TrackBorder | ThemeToken::Border | ThemeToken::GridLine => Color::DarkGray,
        ThemeToken::TrackHeaderBackground | ThemeToken::AxisBackground => Color::DarkGray,
        ThemeToken::TrackHeaderText
        | ThemeToken::TextPrimary
        | ThemeToken::ToolbarText
        | ThemeToken::TooltipText
        | ThemeToken::TooltipValue => Color::White,
        ThemeToken::TextSecondary | ThemeToken::AxisLabel | ThemeToken::ScreenshotLabel => {
            Color::Gray
        }
        ThemeToken::TextMuted | ThemeToken::AxisTick => Color::DarkGray,
        ThemeToken::HoverHighlight | ThemeToken::SelectionHighlight => Color::LightYellow,
        ThemeToken::TooltipBackground | ThemeToken::ToolbarBackground => Color::DarkGray,
    }
}

/// Sample the area-fill height at each column center, in viewport units.
///
/// Linear interpolation along the polyline; columns left of the first point
/// or right of the last get no bar.
fn column_fill_heights(
    points: &[Point],
    baseline_y: f64,
    columns: u16,
    device_width: f64,
) -> Vec<Option<f64>> {
    let mut heights = vec![None; columns as usize];
    if points.len() < 2 || columns == 0 {
        return heights;
    }

    let col_width = device_width / f64::from(columns);
    for (c, slot) in heights.iter_mut().enumerate() {
        let x = (c as f64 + 0.5) * col_width;
        let segment = points
            .windows(2)
            .find(|seg| x >= seg[0].x && x <= seg[1].x);
        if let Some(seg) = segment {
            let span = seg[1].x - seg[0].x;
            let t = if span > 0.0 { (x - seg[0].x) / span } else { 0.0 };
            let y = seg[0].y + (seg[1].y - seg[0].y) * t;
            *slot = Some((baseline_y - y).max(0.0));
        }
    }
    heights
}

/// Paint one track's commands into its body rows.
fn paint_track(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    commands: &[RenderCommand],
    viewport: &Viewport,
) {
    let buf = frame.buffer_mut();
    let col_scale = f64::from(area.width) / viewport.width;

    for cmd in commands {
        match cmd {
            RenderCommand::FillArea {
                points,
                baseline_y,
                color,
            } => {
                let fg = theme_to_color(*color);
                let heights =
                    column_fill_heights(points, *baseline_y, area.width, viewport.width);
                let units_total = f64::from(area.height) * UNITS_PER_ROW;
                for (c, height) in heights.iter().enumerate() {
                    let Some(height) = height else { continue };
                    // Scale viewport height units into sub-cell units.
                    let mut units = (height / viewport.height * units_total).round();
                    for row in (0..area.height).rev() {
                        if units <= 0.0 {
                            break;
                        }
                        let level = units.min(UNITS_PER_ROW) as usize;
                        let x = area.x + c as u16;
                        let y = area.y + row;
                        buf[(x, y)]
                            .set_char(BLOCKS[level])
                            .set_fg(fg)
                            .set_bg(Color::Black);
                        units -= UNITS_PER_ROW;
                    }
                }
            }
            RenderCommand::DrawRect { rect, color, .. } => {
                // The track background spans the whole viewport and is the
                // terminal's own background already.
                if rect.w >= viewport.width && rect.h >= viewport.height {
                    continue;
                }
                let fg = theme_to_color(*color);
                let ch = if *color == ThemeToken::EmptyRegion {
                    '░'
                } else {
                    '█'
                };
                let col = (rect.x * col_scale) as u16;
                let width = ((rect.w * col_scale) as u16).max(1);
                let fill_rows = ((rect.h / viewport.height) * f64::from(area.height))
                    .ceil()
                    .clamp(1.0, f64::from(area.height)) as u16;
                for dx in 0..width.min(area.width.saturating_sub(col)) {
                    for dy in 0..fill_rows {
                        let x = area.x + col + dx;
                        let y = area.y + area.height - 1 - dy;
                        buf[(x, y)].set_char(ch).set_fg(fg).set_bg(Color::Black);
                    }
                }
            }
            // The stroke is implied by the fill's top edge in cell space,
            // and clip/group/text commands have no terminal representation.
            _ => {}
        }
    }
}

struct Hover {
    track_name: String,
    lines: Vec<views::TooltipLine>,
}

pub fn run(profile: &Profile) -> Result<()> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let tracks = build_tracks(profile);
    let full = TimeRange::new(profile.meta.start_time, profile.meta.end_time);

    let mut view = full;
    let mut hover: Option<Hover> = None;
    let mut mouse_pos: Option<(u16, u16)> = None;

    loop {
        terminal.draw(|frame| {
            let area = frame.area();

            // Header: title or hover tooltip.
            let title = match &hover {
                Some(h) => {
                    let details: Vec<String> = h
                        .lines
                        .iter()
                        .map(|l| format!("{} {}", l.value, l.label))
                        .collect();
                    format!(" {} — {} ", h.track_name, details.join(" | "))
                }
                None => format!(
                    " lagview — {} | viewing {:.1}–{:.1}ms | ←→ pan, +/- zoom, 0 reset, q quit ",
                    profile.meta.product.as_deref().unwrap_or("profile"),
                    view.start,
                    view.end,
                ),
            };
            let header = Block::default()
                .title(title)
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, Rect::new(0, 0, area.width, 1));

            // Stacked tracks: one header row + body rows each.
            let mut y = 1u16;
            for track in &tracks {
                if y + 1 + TRACK_BODY_ROWS > area.height {
                    break;
                }
                let header_area = Rect::new(0, y, area.width, 1);
                let label = Block::default()
                    .title(format!(" {} ", track.name))
                    .style(Style::default().fg(Color::Gray).bg(Color::Black));
                frame.render_widget(label, header_area);

                let body = Rect::new(0, y + 1, area.width, TRACK_BODY_ROWS);
                let viewport = Viewport {
                    x: 0.0,
                    y: 0.0,
                    width: f64::from(area.width),
                    height: f64::from(TRACK_BODY_ROWS) * UNITS_PER_ROW,
                    dpr: 1.0,
                };
                let commands = views::render_track(profile, track, &viewport, &view);
                paint_track(frame, body, &commands, &viewport);

                y += 1 + TRACK_BODY_ROWS;
            }
        })?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Left => {
                        let step = view.duration() * 0.1;
                        let start = (view.start - step).max(full.start);
                        view = TimeRange::new(start, start + view.duration());
                    }
                    KeyCode::Right => {
                        let step = view.duration() * 0.1;
                        let end = (view.end + step).min(full.end);
                        view = TimeRange::new(end - view.duration(), end);
                    }
                    KeyCode::Char('+') | KeyCode::Char('=') => {
                        let center = (view.start + view.end) * 0.5;
                        let half = (view.duration() / 2.6).max(0.5);
                        view = TimeRange::new(center - half, center + half);
                    }
                    KeyCode::Char('-') => {
                        let center = (view.start + view.end) * 0.5;
                        let half = (view.duration() * 0.65).min(full.duration() * 0.5);
                        view = TimeRange::new(
                            (center - half).max(full.start),
                            (center + half).min(full.end),
                        );
                    }
                    KeyCode::Char('0') => view = full,
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        mouse_pos = Some((mouse.column, mouse.row));
                    }
                    MouseEventKind::ScrollLeft => {
                        let step = view.duration() * 0.05;
                        let start = (view.start - step).max(full.start);
                        view = TimeRange::new(start, start + view.duration());
                    }
                    MouseEventKind::ScrollRight => {
                        let step = view.duration() * 0.05;
                        let end = (view.end + step).min(full.end);
                        view = TimeRange::new(end - view.duration(), end);
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        hover = mouse_pos.and_then(|(col, row)| {
            let size = terminal.size().ok()?;
            hover_at(profile, &tracks, &view, col, row, size.width)
        });
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

/// Map a terminal cell to the track under it, then hit-test delay tracks.
fn hover_at(
    profile: &Profile,
    tracks: &[Track],
    view: &TimeRange,
    col: u16,
    row: u16,
    width: u16,
) -> Option<Hover> {
    if row == 0 || width == 0 {
        return None;
    }
    let per_track = 1 + TRACK_BODY_ROWS;
    let index = ((row - 1) / per_track) as usize;
    let in_body = (row - 1) % per_track != 0;
    let track = tracks.get(index)?;
    if !in_body {
        return None;
    }

    let TrackKind::EventDelay { thread_index } = track.kind else {
        return None;
    };
    let thread = profile.threads.get(thread_index)?;
    let sample = views::hit_test_sample(
        &thread.samples,
        view,
        profile.meta.interval,
        f64::from(col),
        f64::from(width),
    )?;
    let stats = EventDelayStats::compute(&thread.samples);
    Some(Hover {
        track_name: track.name.to_string(),
        lines: views::event_delay_tooltip(&thread.samples, &stats, sample),
    })
}
