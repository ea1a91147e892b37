use crate::app::ArcaneTextApp;
use eframe::egui;

impl ArcaneTextApp {
    /// Handle drag and drop events:
    /// - If a JSON file is dropped, import it as a mapping.
    /// - If any other file is dropped, open and decode it.
    /// - If a file is dragged over the central panel, display a message.
    /// - If a dialog is shown, do not handle drag and drop events.
    pub(crate) fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        if self.dialog_open() {
            return;
        }

        // Overwrite the central panel with a message when file is dragged over
        let hovering_files = ctx.input(|i| i.raw.hovered_files.clone());
        if !hovering_files.is_empty() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.heading("Drop file to open");
                });
            });
        }

        for file in ctx.input(|i| i.raw.dropped_files.clone()) {
            if let Some(path) = file.path {
                let is_json = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

                if is_json {
                    self.import_mapping(&path);
                } else {
                    self.load_file(&path);
                }
            }
        }
    }
}
