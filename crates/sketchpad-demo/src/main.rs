mod app;
mod config;
mod shapes;

use anyhow::Result;

use sketchpad_engine::logging::init_logging;
use sketchpad_engine::window::Runtime;

use crate::app::SketchApp;
use crate::config::SketchConfig;

fn main() {
    let config = SketchConfig::default();
    init_logging(config.logging.clone());

    if let Err(err) = run(config) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(config: SketchConfig) -> Result<()> {
    let app = SketchApp::new(&config)?;
    log::info!(
        "opening {}x{} window \"{}\"",
        config.runtime.initial_size.width,
        config.runtime.initial_size.height,
        config.runtime.title
    );
    Runtime::run(config.runtime, config.gpu, app)
}
