#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 650.0])
            .with_title("lagview"),
        ..Default::default()
    };
    eframe::run_native(
        "lagview",
        options,
        Box::new(|cc| Ok(Box::new(lagview_ui::LagApp::new(cc)))),
    )
}

// The wasm build enters through `lagview_ui::start` instead.
#[cfg(target_arch = "wasm32")]
fn main() {}
