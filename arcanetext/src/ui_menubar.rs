use crate::ArcaneTextApp;
use crate::text::text_to_bytes;
use bytemaplib::EncodeMode;
use eframe::egui;

fn json_dialog(title: &str) -> rfd::FileDialog {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter("JSON Mapping Files", &["json"])
}

impl ArcaneTextApp {
    /// Displays the top menu bar with File, Tools, View, and About buttons
    pub(crate) fn show_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menubar").show(ctx, |ui| {
            ui.add_space(3.0);

            egui::MenuBar::new().ui(ui, |ui| {
                ui.horizontal(|ui| {
                    // FILE MENU
                    ui.menu_button("File", |ui| {
                        // OPEN BUTTON
                        if ui.button("Open file...").clicked()
                            && let Some(path) =
                                rfd::FileDialog::new().set_title("Open File").pick_file()
                        {
                            self.load_file(&path);
                        }

                        // SAVE BUTTON
                        if ui.button("Save file...").clicked()
                            && let Some(path) = rfd::FileDialog::new()
                                .set_title("Save File")
                                .set_file_name(self.name.clone())
                                .save_file()
                        {
                            self.save_file(&path);
                        }

                        ui.separator();

                        // IMPORT BUTTON
                        if ui.button("Import mapping...").clicked()
                            && let Some(path) = json_dialog("Import JSON Mapping").pick_file()
                        {
                            self.import_mapping(&path);
                        }

                        // EXPORT BUTTON
                        if ui.button("Export mapping...").clicked()
                            && let Some(mut path) = json_dialog("Export JSON Mapping")
                                .set_file_name("mapping.json")
                                .save_file()
                        {
                            if path.extension().is_none() {
                                path.set_extension("json");
                            }
                            self.export_mapping(&path);
                        }
                    });

                    // TOOLS MENU
                    ui.menu_button("Tools", |ui| {
                        if ui.button("Generate smart mapping...").clicked() {
                            let text = text_to_bytes(&self.text);
                            self.mapping.refresh(&mut self.session, &text);
                            self.mapping.open = true;
                        }
                    });

                    // VIEW MENU
                    ui.menu_button("View", |ui| {
                        ui.label("Encode on save:");

                        ui.add_space(3.0);

                        ui.radio_value(
                            &mut self.encode_mode,
                            EncodeMode::FirstByte,
                            "First replacement byte",
                        );
                        ui.add_space(1.0);
                        ui.radio_value(
                            &mut self.encode_mode,
                            EncodeMode::FullSequence,
                            "Full replacement sequence",
                        );
                    });

                    // ABOUT BUTTON
                    if ui.button("About").clicked() {
                        self.show_about = true;
                    }
                });
            });

            ui.add_space(2.0);
        });
    }
}
