use crate::ArcaneTextApp;
use crate::app::colors;
use crate::mapping::display_char;
use crate::text::text_to_bytes;
use eframe::egui;

enum MappingAction {
    Import,
    Export,
    Apply,
}

impl ArcaneTextApp {
    /// Show the smart mapping window: one row per mapped byte with an editable
    /// replacement field. Closing the window applies the edits.
    pub(crate) fn show_mapping_window(&mut self, ctx: &egui::Context) {
        if !self.mapping.open {
            return;
        }

        let mut is_open = true;
        let mut action = None;

        egui::Window::new("Smart Mapping Generator")
            .open(&mut is_open)
            .collapsible(false)
            .resizable(true)
            .default_size([420.0, 360.0])
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .max_height(300.0)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        egui::Grid::new("mapping_grid")
                            .num_columns(3)
                            .spacing([10.0, 5.0])
                            .striped(true)
                            .show(ui, |ui| {
                                for row in &mut self.mapping.rows {
                                    ui.label(
                                        egui::RichText::new(display_char(row.byte).to_string())
                                            .monospace(),
                                    );
                                    ui.label(
                                        egui::RichText::new(format!("0x{:02X}", row.byte))
                                            .color(colors::GRAY_160)
                                            .monospace(),
                                    );

                                    let response = ui.add(
                                        egui::TextEdit::singleline(&mut row.field)
                                            .desired_width(140.0)
                                            .font(egui::TextStyle::Monospace),
                                    );

                                    // Only allow characters of a "0x..." value
                                    if response.changed() {
                                        row.field.retain(|c| {
                                            c.is_ascii_hexdigit() || c == 'x' || c == 'X'
                                        });
                                    }

                                    ui.end_row();
                                }
                            });
                    });

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    if ui.button("Import...").clicked() {
                        action = Some(MappingAction::Import);
                    }
                    if ui.button("Export...").clicked() {
                        action = Some(MappingAction::Export);
                    }
                    if ui.button("Apply").clicked() {
                        action = Some(MappingAction::Apply);
                    }
                });
            });

        match action {
            Some(MappingAction::Import) => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Import JSON Mapping")
                    .add_filter("JSON Mapping Files", &["json"])
                    .pick_file()
                {
                    self.import_mapping(&path);
                }
            }
            Some(MappingAction::Export) => {
                if let Some(mut path) = rfd::FileDialog::new()
                    .set_title("Export JSON Mapping")
                    .add_filter("JSON Mapping Files", &["json"])
                    .set_file_name("mapping.json")
                    .save_file()
                {
                    if path.extension().is_none() {
                        path.set_extension("json");
                    }
                    self.export_mapping(&path);
                }
            }
            Some(MappingAction::Apply) => self.apply_mapping(),
            None => {}
        }

        // Window closed via its close button
        if !is_open {
            self.apply_mapping();
            if self.error.is_none() {
                self.mapping.open = false;
            }
        }
    }

    /// Write the grid into the session and decode the opened file again.
    fn apply_mapping(&mut self) {
        match self.mapping.sync_to(&mut self.session) {
            Ok(()) => {
                self.redecode();
                let text = text_to_bytes(&self.text);
                self.mapping.refresh(&mut self.session, &text);
            }
            Err(msg) => self.report(msg),
        }
    }
}
