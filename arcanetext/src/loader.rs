use crate::app::ArcaneTextApp;
use crate::text::{bytes_to_text, text_to_bytes};
use std::path::Path;

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || "Untitled".to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

impl ArcaneTextApp {
    /// Open a binary file, decode it with the current mapping and show the result.
    pub(crate) fn load_file(&mut self, path: &Path) {
        if let Err(err) = self.session.open_raw(path) {
            self.report(format!("Could not open {}:\n{err}", path.display()));
            return;
        }

        self.name = file_name(path);
        self.redecode();
    }

    /// Encode the text with the current mapping and write it to disk.
    pub(crate) fn save_file(&mut self, path: &Path) {
        let bytes = text_to_bytes(&self.text);

        if let Err(err) = self.session.save_encoded(path, &bytes, self.encode_mode) {
            self.report(format!("Could not save {}:\n{err}", path.display()));
            return;
        }

        self.name = file_name(path);
    }

    /// Merge a mapping file into the current mapping.
    /// Refreshes the mapping grid if it is shown, otherwise decodes the opened file again.
    pub(crate) fn import_mapping(&mut self, path: &Path) {
        if let Err(err) = self.session.import(path) {
            self.report(err.to_string());
            return;
        }

        if self.mapping.open {
            let text = text_to_bytes(&self.text);
            self.mapping.refresh(&mut self.session, &text);
        } else {
            self.redecode();
        }
    }

    /// Save the current mapping. Pending edits of the mapping grid are applied first.
    pub(crate) fn export_mapping(&mut self, path: &Path) {
        if self.mapping.open
            && let Err(msg) = self.mapping.sync_to(&mut self.session)
        {
            self.report(msg);
            return;
        }

        if let Err(err) = self.session.export(path) {
            self.report(err.to_string());
        }
    }

    /// Replace the text with the opened file decoded by the current mapping.
    /// Does nothing if no file was opened.
    pub(crate) fn redecode(&mut self) {
        if self.session.raw_path().is_some() {
            self.text = bytes_to_text(&self.session.decoded());
        }
    }
}
