use crate::ArcaneTextApp;
use crate::app::colors;
use eframe::egui;

const DIALOG_WIDTH: f32 = 360.0;

fn about_contents(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.heading("ArcaneText");
        ui.label(
            egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                .color(colors::GRAY_160)
                .small(),
        );
    });
    ui.separator();
    ui.label(
        "Every byte of the text is replaced according to a user-defined mapping when \
        saving. Binary files are decoded back by matching the longest known replacement \
        (up to 3 bytes) first.",
    );
    ui.label("Mappings are JSON tables; Tools generates one from the bytes of the current text.");
}

impl ArcaneTextApp {
    /// True while a modal dialog covers the app.
    pub(crate) const fn dialog_open(&self) -> bool {
        self.error.is_some() || self.show_about
    }

    /// Show the error dialog if an error is pending, otherwise the About dialog if
    /// requested. Both close on their button, on Escape, or on a click outside.
    pub(crate) fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(msg) = &self.error {
            let modal = egui::Modal::new(egui::Id::new("error_dialog")).show(ctx, |ui| {
                ui.set_max_width(DIALOG_WIDTH);
                ui.heading("Error");
                ui.add_space(6.0);
                ui.label(msg);
                ui.add_space(10.0);
                ui.button(" OK ").clicked()
            });

            if modal.inner || modal.should_close() {
                self.error = None;
            }
        } else if self.show_about {
            let modal = egui::Modal::new(egui::Id::new("about_dialog")).show(ctx, |ui| {
                ui.set_max_width(DIALOG_WIDTH);
                about_contents(ui);
                ui.add_space(10.0);
                ui.button("Close").clicked()
            });

            if modal.inner || modal.should_close() {
                self.show_about = false;
            }
        }
    }
}
