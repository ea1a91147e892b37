use crate::mapping::MappingEditor;
use bytemaplib::{EncodeMode, Session};

pub mod colors {
    use eframe::egui::Color32;

    pub const GRAY_160: Color32 = Color32::from_gray(160);
}

pub struct ArcaneTextApp {
    /// Mapping, compiled tables and the last opened binary
    pub session: Session,
    /// Contents of the text view
    pub text: String,
    /// Name of the last opened or saved file
    pub name: String,
    /// How the text is encoded on save
    pub encode_mode: EncodeMode,
    /// Handler for the smart mapping window
    pub mapping: MappingEditor,
    /// Whether the About dialog is requested
    pub show_about: bool,
    /// Errors during loading, saving, importing or exporting
    pub error: Option<String>,
}

impl Default for ArcaneTextApp {
    fn default() -> Self {
        Self {
            session: Session::new(),
            text: String::new(),
            name: "Untitled".to_string(),
            encode_mode: EncodeMode::FirstByte,
            mapping: MappingEditor::default(),
            show_about: false,
            error: None,
        }
    }
}

impl ArcaneTextApp {
    /// Store an error to be shown in the error dialog
    pub(crate) fn report(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        log::error!("{msg}");
        self.error = Some(msg);
    }
}
