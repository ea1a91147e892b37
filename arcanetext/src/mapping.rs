use bytemaplib::{Session, format_replacement, parse_replacement};

/// One line of the mapping grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    /// Source byte
    pub(crate) byte: u8,
    /// Replacement as typed by the user, e.g. "0x0203"
    pub(crate) field: String,
}

#[derive(Default)]
pub struct MappingEditor {
    /// Is the mapping window shown
    pub(crate) open: bool,
    /// Grid rows in display order
    pub(crate) rows: Vec<MappingRow>,
}

/// Character shown for a byte in the grid. Non-printable bytes are shown as '.'
pub const fn display_char(byte: u8) -> char {
    if byte.is_ascii_graphic() || byte == b' ' {
        byte as char
    } else {
        '.'
    }
}

/// Sort key of the grid: printable characters case-insensitively,
/// non-printable bytes first.
const fn display_rank(byte: u8) -> (u8, u8) {
    let primary = if byte.is_ascii_graphic() || byte == b' ' {
        byte.to_ascii_lowercase()
    } else {
        0
    };
    (primary, byte)
}

impl MappingEditor {
    /// Rebuild the grid from the session. Every byte of `text` gets an identity
    /// mapping first if it has none, so the grid covers the whole text.
    pub(crate) fn refresh(&mut self, session: &mut Session, text: &[u8]) {
        session.ensure_defaults_for(text);

        let mut bytes: Vec<u8> = session.table().keys().collect();
        bytes.sort_by_key(|&b| display_rank(b));

        self.rows = bytes
            .into_iter()
            .map(|byte| MappingRow {
                byte,
                field: format_replacement(session.table().get(byte).unwrap_or(&[byte])),
            })
            .collect();
    }

    /// Parse all fields of the grid.
    ///
    /// # Errors
    /// Returns a message naming the first row whose field is not a valid replacement.
    pub(crate) fn parse_rows(&self) -> Result<Vec<(u8, Vec<u8>)>, String> {
        self.rows
            .iter()
            .map(|row| {
                parse_replacement(row.field.trim())
                    .map(|seq| (row.byte, seq))
                    .map_err(|err| {
                        format!(
                            "Mapping of '{}' (0x{:02X}) is invalid:\n{err}",
                            display_char(row.byte),
                            row.byte
                        )
                    })
            })
            .collect()
    }

    /// Write the grid fields into the session mapping.
    ///
    /// # Errors
    /// Returns a message if any field is invalid; the session is unchanged.
    pub(crate) fn sync_to(&self, session: &mut Session) -> Result<(), String> {
        let entries = self.parse_rows()?;
        session.set_entries(entries).map_err(|err| err.to_string())
    }
}
