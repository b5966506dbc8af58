use eframe::egui;
use lagview_core::model::{EventDelayStats, RedrawScheduler, Track, TrackKind, build_tracks};
use lagview_core::share::{RemovableData, SharingOptions, UploadPayload, prepare_upload};
use lagview_core::views;
use lagview_protocol::{Profile, RenderCommand, ThemeToken, TimeRange, Viewport};

use crate::renderer;
use crate::theme::{self, ThemeMode};

const TRACK_HEADER_HEIGHT: f32 = 20.0;
const TRACK_GAP: f32 = 2.0;
const AXIS_HEIGHT: f32 = 24.0;

/// Main application state.
pub struct LagApp {
    profile: Option<Profile>,
    tracks: Vec<Track>,
    /// Committed (visible) time window, in ms.
    view: TimeRange,
    /// Full profile time range, in ms.
    full: TimeRange,
    theme_mode: ThemeMode,
    /// Cached render commands per track. The redraw scheduler collapses
    /// pan/zoom/resize/load requests into one rebuild per frame.
    track_commands: Vec<Vec<RenderCommand>>,
    redraw: RedrawScheduler,
    last_width: f32,
    /// Hovered delay sample: (track index, sample index).
    hovered: Option<(usize, usize)>,
    error: Option<String>,
    /// Sharing panel state.
    share_open: bool,
    sharing: SharingOptions,
    prepared: Option<UploadPayload>,
    /// Pending profile data from an async load.
    pending_data: std::sync::Arc<std::sync::Mutex<Option<Vec<u8>>>>,
}

impl LagApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(theme::dark_visuals());

        Self {
            profile: None,
            tracks: Vec::new(),
            view: TimeRange::new(0.0, 1.0),
            full: TimeRange::new(0.0, 1.0),
            theme_mode: ThemeMode::Dark,
            track_commands: Vec::new(),
            redraw: RedrawScheduler::new(),
            last_width: 0.0,
            hovered: None,
            error: None,
            share_open: false,
            sharing: SharingOptions::strict(),
            prepared: None,
            pending_data: std::sync::Arc::new(std::sync::Mutex::new(None)),
        }
    }

    fn load_profile(&mut self, data: &[u8]) {
        match lagview_core::parsers::parse_profile(data) {
            Ok(profile) => {
                self.full = TimeRange::new(profile.meta.start_time, profile.meta.end_time);
                self.view = self.full;
                self.tracks = build_tracks(&profile);
                log::info!(
                    "loaded profile: {} threads, {} tracks",
                    profile.threads.len(),
                    self.tracks.len(),
                );
                self.profile = Some(profile);
                self.error = None;
                self.prepared = None;
                self.redraw.request();
            }
            Err(e) => {
                self.error = Some(format!("Failed to parse profile: {e}"));
            }
        }
    }

    /// Pan by `delta_ms`, clamped to the profile bounds.
    fn pan(&mut self, delta_ms: f64) {
        let span = self.view.duration();
        let start = (self.view.start + delta_ms)
            .max(self.full.start)
            .min(self.full.end - span);
        self.view = TimeRange::new(start, start + span);
        self.redraw.request();
    }

    /// Zoom around `anchor_frac` (0 = left edge, 1 = right edge).
    fn zoom(&mut self, factor: f64, anchor_frac: f64) {
        let span = self.view.duration();
        let new_span = (span * factor).clamp(0.01, self.full.duration());
        let anchor_time = self.view.start + anchor_frac * span;
        let start = (anchor_time - anchor_frac * new_span)
            .max(self.full.start)
            .min(self.full.end - new_span);
        self.view = TimeRange::new(start, start + new_span);
        self.redraw.request();
    }

    fn ensure_commands(&mut self, canvas_width: f32) {
        if (canvas_width - self.last_width).abs() > 0.5 {
            self.last_width = canvas_width;
            self.redraw.request();
        }
        if !self.redraw.take() && self.track_commands.len() == self.tracks.len() {
            return;
        }

        let Some(profile) = &self.profile else {
            self.track_commands.clear();
            return;
        };

        self.track_commands.clear();
        for track in &self.tracks {
            let viewport = Viewport {
                x: 0.0,
                y: 0.0,
                width: f64::from(canvas_width),
                height: track.height,
                dpr: 1.0,
            };
            self.track_commands
                .push(views::render_track(profile, track, &viewport, &self.view));
        }
    }

    fn toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("lagview");
                ui.separator();

                if ui.button("Open").clicked() {
                    #[cfg(not(target_arch = "wasm32"))]
                    {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Profile", &["json"])
                            .pick_file()
                        {
                            match std::fs::read(&path) {
                                Ok(data) => self.load_profile(&data),
                                Err(e) => {
                                    self.error = Some(format!("Failed to read file: {e}"));
                                }
                            }
                        }
                    }
                }

                if self.profile.is_some() && ui.button("Share").clicked() {
                    self.share_open = !self.share_open;
                }

                #[cfg(not(target_arch = "wasm32"))]
                if self.profile.is_some() && ui.button("Export SVG").clicked() {
                    if let Err(e) = self.export_svg() {
                        self.error = Some(format!("Export failed: {e}"));
                    }
                }

                ui.separator();

                let theme_label = match self.theme_mode {
                    ThemeMode::Dark => "Dark",
                    ThemeMode::Light => "Light",
                };
                if ui.button(theme_label).clicked() {
                    self.theme_mode = match self.theme_mode {
                        ThemeMode::Dark => {
                            ctx.set_visuals(theme::light_visuals());
                            ThemeMode::Light
                        }
                        ThemeMode::Light => {
                            ctx.set_visuals(theme::dark_visuals());
                            ThemeMode::Dark
                        }
                    };
                    self.redraw.request();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.full.duration() > 0.0 {
                        let zoom_pct = 100.0 * self.full.duration() / self.view.duration();
                        ui.label(format!("{zoom_pct:.0}%"));
                    }
                });
            });
        });
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(err) = &self.error {
                    ui.colored_label(egui::Color32::RED, err);
                } else if let Some(profile) = &self.profile {
                    ui.label(format!(
                        "{} | {} | viewing {}",
                        profile.meta.product.as_deref().unwrap_or("profile"),
                        views::format_milliseconds(profile.duration()),
                        views::format_milliseconds(self.view.duration()),
                    ));
                } else {
                    ui.label("No profile loaded — click Open or drop a file");
                }
            });
        });
    }

    fn share_window(&mut self, ctx: &egui::Context) {
        let mut open = self.share_open;
        egui::Window::new("Share profile")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(
                    "The shared copy is stripped of personally identifiable \
                     information by default. Select more data to include:",
                );
                ui.add_space(4.0);

                let choices = [
                    (RemovableData::HiddenThreads, "Include hidden threads"),
                    (RemovableData::FullTimeRange, "Include full time range"),
                    (RemovableData::Screenshots, "Include screenshots"),
                    (RemovableData::Urls, "Include URLs"),
                ];
                for (data, label) in choices {
                    let mut include = !self.sharing.removes(data);
                    if ui.checkbox(&mut include, label).changed() {
                        // Options are a value object: rebuild, don't mutate.
                        self.sharing = if include {
                            self.sharing.including(data)
                        } else {
                            self.sharing.excluding(data)
                        };
                        self.prepared = None;
                    }
                }

                ui.add_space(6.0);
                if ui.button("Prepare upload").clicked() {
                    if let Some(profile) = &self.profile {
                        match prepare_upload(profile, &self.sharing, &self.view) {
                            Ok(payload) => self.prepared = Some(payload),
                            Err(e) => self.error = Some(format!("Share failed: {e}")),
                        }
                    }
                }

                if let Some(payload) = &self.prepared {
                    ui.add_space(4.0);
                    ui.label(format!(
                        "{} compressed ({} raw)",
                        format_bytes(payload.data.len()),
                        format_bytes(payload.uncompressed_size),
                    ));
                    ui.monospace(&payload.digest);

                    #[cfg(not(target_arch = "wasm32"))]
                    if ui.button("Save…").clicked() {
                        if let Err(e) = self.save_prepared() {
                            self.error = Some(format!("Save failed: {e}"));
                        }
                    }
                }
            });
        self.share_open = open;
    }

    /// Export the first delay graph at the current view as a standalone SVG.
    #[cfg(not(target_arch = "wasm32"))]
    fn export_svg(&self) -> anyhow::Result<()> {
        use anyhow::Context as _;

        let Some(profile) = &self.profile else {
            return Ok(());
        };
        let Some(track) = self
            .tracks
            .iter()
            .find(|t| matches!(t.kind, TrackKind::EventDelay { .. }))
        else {
            return Ok(());
        };
        let width = if self.last_width > 1.0 {
            f64::from(self.last_width)
        } else {
            800.0
        };
        let viewport = Viewport {
            x: 0.0,
            y: 0.0,
            width,
            height: track.height,
            dpr: 1.0,
        };
        let commands = views::render_track(profile, track, &viewport, &self.view);
        let svg = lagview_core::svg::render_svg(
            &commands,
            width,
            track.height,
            self.theme_mode == ThemeMode::Dark,
        );

        let Some(path) = rfd::FileDialog::new()
            .set_file_name("event-delay.svg")
            .save_file()
        else {
            return Ok(());
        };
        std::fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
        log::info!("exported delay graph to {}", path.display());
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save_prepared(&self) -> anyhow::Result<()> {
        use anyhow::Context as _;
        use lagview_core::share::download_file_name;

        let (Some(profile), Some(payload)) = (&self.profile, &self.prepared) else {
            return Ok(());
        };
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(download_file_name(&profile.meta))
            .save_file()
        else {
            return Ok(());
        };
        std::fs::write(&path, &payload.data)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("saved shared profile to {}", path.display());
        Ok(())
    }

    fn timeline(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.profile.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(ui.available_height() / 3.0);
                        ui.heading("Drop a Gecko profile here or click Open");
                        ui.label("Event delay, activity, screenshot, and progress tracks");
                    });
                });
                return;
            }

            let available = ui.available_rect_before_wrap();
            self.ensure_commands(available.width());

            // Pan by dragging, zoom with the scroll wheel around the cursor.
            let response = ui.allocate_rect(available, egui::Sense::click_and_drag());
            if response.dragged() {
                let dx = f64::from(response.drag_delta().x);
                let ms_per_px = self.view.duration() / f64::from(available.width());
                self.pan(-dx * ms_per_px);
            }

            let scroll = ui.input(|i| i.smooth_scroll_delta);
            if scroll.y.abs() > 0.1 {
                let factor = 2.0_f64.powf(-f64::from(scroll.y) * 0.01);
                let anchor = ui.input(|i| i.pointer.hover_pos()).map_or(0.5, |pos| {
                    f64::from((pos.x - available.left()) / available.width()).clamp(0.0, 1.0)
                });
                self.zoom(factor, anchor);
            }
            if scroll.x.abs() > 0.1 {
                let ms_per_px = self.view.duration() / f64::from(available.width());
                self.pan(-f64::from(scroll.x) * ms_per_px);
            }

            let mut painter = ui.painter_at(available);
            painter.rect_filled(
                available,
                egui::CornerRadius::ZERO,
                theme::resolve(ThemeToken::Background, self.theme_mode),
            );

            // Time axis across the top.
            let axis_viewport = Viewport {
                x: 0.0,
                y: 0.0,
                width: f64::from(available.width()),
                height: f64::from(AXIS_HEIGHT),
                dpr: 1.0,
            };
            let grid_height = f64::from(available.height() - AXIS_HEIGHT);
            let axis_cmds =
                views::time_axis::render_time_axis(&axis_viewport, &self.view, grid_height);
            renderer::render_commands(
                &mut painter,
                &axis_cmds,
                available.left_top(),
                self.theme_mode,
            );

            let hover_pos = ui.input(|i| i.pointer.hover_pos());
            self.hovered = None;

            let tracks = self.tracks.clone();
            let mut y = available.top() + AXIS_HEIGHT;
            for (i, track) in tracks.iter().enumerate() {
                let header_rect = egui::Rect::from_min_size(
                    egui::pos2(available.left(), y),
                    egui::vec2(available.width(), TRACK_HEADER_HEIGHT),
                );
                if header_rect.top() > available.bottom() {
                    break;
                }

                painter.rect_filled(
                    header_rect,
                    egui::CornerRadius::ZERO,
                    theme::resolve(ThemeToken::TrackHeaderBackground, self.theme_mode),
                );
                painter.text(
                    egui::pos2(header_rect.left() + 6.0, header_rect.center().y),
                    egui::Align2::LEFT_CENTER,
                    track.name.as_str(),
                    egui::FontId::proportional(11.0),
                    theme::resolve(ThemeToken::TrackHeaderText, self.theme_mode),
                );

                let body_top = y + TRACK_HEADER_HEIGHT;
                let body_rect = egui::Rect::from_min_size(
                    egui::pos2(available.left(), body_top),
                    egui::vec2(available.width(), track.height as f32),
                );

                let prev_clip = painter.clip_rect();
                painter.set_clip_rect(body_rect.intersect(available));
                if let Some(cmds) = self.track_commands.get(i) {
                    renderer::render_commands(
                        &mut painter,
                        cmds,
                        body_rect.left_top(),
                        self.theme_mode,
                    );
                }

                // Hover: delay tracks hit-test the sample under the cursor.
                if let Some(pos) = hover_pos {
                    if body_rect.contains(pos) {
                        self.hover_track(&mut painter, i, track, &body_rect, pos);
                    }
                }
                painter.set_clip_rect(prev_clip);

                y = body_rect.bottom() + TRACK_GAP;
            }

            // Tooltip for the hovered delay sample.
            if let Some((track_index, sample)) = self.hovered {
                let lines = self.tooltip_lines(track_index, sample);
                if !lines.is_empty() {
                    #[allow(deprecated)]
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new("delay_tooltip"),
                        |ui| {
                            for line in &lines {
                                ui.horizontal(|ui| {
                                    ui.monospace(&line.value);
                                    ui.label(line.label.as_str());
                                });
                            }
                        },
                    );
                }
            }
        });
    }

    /// Hit-test a hovered track body and draw the dot for delay tracks.
    fn hover_track(
        &mut self,
        painter: &mut egui::Painter,
        track_index: usize,
        track: &Track,
        body_rect: &egui::Rect,
        pos: egui::Pos2,
    ) {
        let Some(profile) = &self.profile else {
            return;
        };
        let TrackKind::EventDelay { thread_index } = track.kind else {
            return;
        };
        let Some(thread) = profile.threads.get(thread_index) else {
            return;
        };

        let pixel_x = f64::from(pos.x - body_rect.left());
        let Some(sample) = views::hit_test_sample(
            &thread.samples,
            &self.view,
            profile.meta.interval,
            pixel_x,
            f64::from(body_rect.width()),
        ) else {
            return;
        };
        self.hovered = Some((track_index, sample));

        let stats = EventDelayStats::compute(&thread.samples);
        let viewport = Viewport {
            x: 0.0,
            y: 0.0,
            width: f64::from(body_rect.width()),
            height: track.height,
            dpr: 1.0,
        };
        if let Some(dot) = views::hover_dot(
            &thread.samples,
            &stats,
            &viewport,
            &self.view,
            sample,
            views::GRAPH_LINE_WIDTH,
        ) {
            renderer::render_commands(
                painter,
                std::slice::from_ref(&dot),
                body_rect.left_top(),
                self.theme_mode,
            );
        }
    }

    fn tooltip_lines(&self, track_index: usize, sample: usize) -> Vec<views::TooltipLine> {
        let Some(profile) = &self.profile else {
            return Vec::new();
        };
        let Some(track) = self.tracks.get(track_index) else {
            return Vec::new();
        };
        let TrackKind::EventDelay { thread_index } = track.kind else {
            return Vec::new();
        };
        let Some(thread) = profile.threads.get(thread_index) else {
            return Vec::new();
        };
        let stats = EventDelayStats::compute(&thread.samples);
        views::event_delay_tooltip(&thread.samples, &stats, sample)
    }

    /// Queue profile bytes for the next frame (used by async loaders).
    pub fn pending_data_handle(&self) -> std::sync::Arc<std::sync::Mutex<Option<Vec<u8>>>> {
        self.pending_data.clone()
    }
}

impl eframe::App for LagApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Profile bytes handed over from an async source.
        let pending = {
            let mut lock = self.pending_data.lock().unwrap_or_else(|e| e.into_inner());
            lock.take()
        };
        if let Some(data) = pending {
            self.load_profile(&data);
        }

        // Dropped files load directly.
        let dropped: Option<Vec<u8>> = ctx.input(|i| {
            i.raw
                .dropped_files
                .first()
                .and_then(|f| f.bytes.as_ref().map(|b| b.to_vec()))
        });
        if let Some(data) = dropped {
            self.load_profile(&data);
        }

        self.toolbar(ctx);
        self.status_bar(ctx);
        self.share_window(ctx);
        self.timeline(ctx);
    }
}

fn format_bytes(n: usize) -> String {
    let n = n as f64;
    if n >= 1_048_576.0 {
        format!("{:.1} MB", n / 1_048_576.0)
    } else if n >= 1_024.0 {
        format!("{:.1} KB", n / 1_024.0)
    } else {
        format!("{n:.0} B")
    }
}
