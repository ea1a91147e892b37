#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
// Tell OS to hide the console window when running.
// This attribute is only applied if the target OS is Windows.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod loader;
mod mapping;
mod text;
mod ui_centralpanel;
mod ui_dialog;
mod ui_filedrop;
mod ui_mapping;
mod ui_menubar;

use app::ArcaneTextApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let options = eframe::NativeOptions {
        vsync: true,
        viewport: egui::ViewportBuilder::default()
            .with_resizable(true)
            .with_inner_size([600.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "ArcaneText",
        options,
        Box::new(|_cc| Ok(Box::new(ArcaneTextApp::default()))),
    )
}

impl eframe::App for ArcaneTextApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_menu_bar(ctx);
        self.show_status_bar(ctx);

        self.handle_drag_and_drop(ctx);

        self.show_mapping_window(ctx);
        self.show_central_panel(ctx);

        // Drawn last so the modal sits above everything else
        self.show_dialogs(ctx);
    }
}
