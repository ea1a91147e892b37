use crate::ArcaneTextApp;
use crate::app::colors;
use bytemaplib::EncodeMode;
use eframe::egui;

impl ArcaneTextApp {
    /// Displays the central panel with the editable text.
    pub(crate) fn show_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_sized(
                        ui.available_size(),
                        egui::TextEdit::multiline(&mut self.text)
                            .code_editor()
                            .hint_text("Type text or open a file to decode it"),
                    );
                });
        });
    }

    /// Displays the status bar with file and mapping information.
    pub(crate) fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("statusbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mode = match self.encode_mode {
                    EncodeMode::FirstByte => "first byte",
                    EncodeMode::FullSequence => "full sequence",
                };

                let status = format!(
                    "{} | {} raw bytes | {} mapping entries | encode: {mode}",
                    self.name,
                    self.session.raw_bytes().len(),
                    self.session.table().len(),
                );
                ui.label(egui::RichText::new(status).color(colors::GRAY_160).size(12.0));
            });
        });
    }
}
