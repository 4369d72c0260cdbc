mod app;
mod color;
mod ui;

use anyhow::Context;
use app::JobscopeApp;
use eframe::egui;
use jobscope::config::DashboardConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match DashboardConfig::discover() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{e}; falling back to default configuration");
            DashboardConfig::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Jobscope – Job Market Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(JobscopeApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running the dashboard window")
}
