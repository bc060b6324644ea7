/**
 * egui Native Desktop App - Main Entry Point
 *
 * Sets up logging and configuration, then runs the document client.
 */
use std::time::Instant;

use docshelf::egui_app::theme::styles;
use docshelf::egui_app::{views, AppState, Config, FileTokenStore};
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docshelf=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "invalid configuration, using defaults");
            Config::new()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = load_config();
    let store = FileTokenStore::new(config.session_file());
    let state = AppState::new(config, store)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Docshelf",
        options,
        Box::new(move |cc| {
            styles::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(DocshelfApp { state }))
        }),
    )?;
    Ok(())
}

/// Main application state
struct DocshelfApp {
    state: AppState,
}

impl eframe::App for DocshelfApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.state.tick(now);

        views::render_top_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);
        views::render_toasts(ctx, &mut self.state);

        // typing in the search box changes input after this frame's tick
        self.state.documents.observe_input(Instant::now());
        if let Some(delay) = self.state.next_repaint(Instant::now()) {
            ctx.request_repaint_after(delay);
        }
    }
}
