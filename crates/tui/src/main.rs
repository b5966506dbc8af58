mod renderer;

use std::path::PathBuf;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: lagview <profile.json>");
        std::process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    let data = std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
    let profile = lagview_core::parsers::parse_profile(&data)
        .with_context(|| format!("parsing {}", path.display()))?;

    log::info!(
        "loaded {} ({} threads, {} samples)",
        path.display(),
        profile.threads.len(),
        profile.sample_count(),
    );

    renderer::run(&profile)?;
    Ok(())
}
