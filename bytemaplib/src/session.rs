//! The `session` module provides the [`Session`] struct: the single owner of the editing
//! state (mapping table, its compiled tables and the last opened binary buffer).
//!
//! Every mutation of the mapping recompiles both lookup tables from scratch, so the
//! codec never sees stale data.

use crate::codec::{EncodeMode, decode, encode_with};
use crate::compiler::{CompiledTables, compile};
use crate::error::MappingError;
use crate::table::MappingTable;
use log::{debug, info};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct Session {
    /// User-defined mapping
    table: MappingTable,
    /// Lookup tables derived from `table`
    compiled: CompiledTables,
    /// Contents of the last opened binary file
    raw_bytes: Vec<u8>,
    /// Path of the last opened binary file
    raw_path: Option<PathBuf>,
}

impl Session {
    /// Creates a session with an empty mapping and no binary loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session around an existing mapping table.
    ///
    /// # Example
    /// ```
    /// use bytemaplib::{MappingTable, Session};
    ///
    /// let table = MappingTable::parse(br#"{"41": "0x01"}"#).unwrap();
    /// let session = Session::with_table(table);
    ///
    /// assert_eq!(session.encode_text(b"AB", Default::default()), vec![0x01, b'B']);
    /// ```
    #[must_use]
    pub fn with_table(table: MappingTable) -> Self {
        let compiled = compile(&table);
        Self {
            table,
            compiled,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn table(&self) -> &MappingTable {
        &self.table
    }

    #[must_use]
    pub const fn compiled(&self) -> &CompiledTables {
        &self.compiled
    }

    /// Contents of the last opened binary file (empty if none).
    #[must_use]
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw_bytes
    }

    #[must_use]
    pub fn raw_path(&self) -> Option<&Path> {
        self.raw_path.as_deref()
    }

    fn recompile(&mut self) {
        self.compiled = compile(&self.table);
    }

    /// Replace the whole mapping table.
    pub fn set_table(&mut self, table: MappingTable) {
        self.table = table;
        self.recompile();
    }

    /// Set the replacement of a single source byte.
    ///
    /// # Errors
    /// Returns an error if `seq` is empty; the mapping is unchanged.
    pub fn set_entry(&mut self, byte: u8, seq: Vec<u8>) -> Result<(), MappingError> {
        self.table.insert(byte, seq)?;
        self.recompile();
        Ok(())
    }

    /// Set the replacements of several source bytes at once. Either all entries are
    /// applied or, if any replacement is empty, none of them.
    ///
    /// # Errors
    /// Returns an error if any replacement is empty.
    pub fn set_entries<I>(&mut self, entries: I) -> Result<(), MappingError>
    where
        I: IntoIterator<Item = (u8, Vec<u8>)>,
    {
        let mut updated = self.table.clone();
        for (byte, seq) in entries {
            updated.insert(byte, seq)?;
        }
        self.set_table(updated);
        Ok(())
    }

    /// Add identity mappings for every byte of `text` that has no mapping yet.
    /// Returns the number of entries added.
    pub fn ensure_defaults_for(&mut self, text: &[u8]) -> usize {
        let inserted = self.table.ensure_defaults_for(text);
        if inserted > 0 {
            debug!("Added {inserted} identity mapping(s)");
            self.recompile();
        }
        inserted
    }

    /// Load a mapping file and merge it into the current mapping.
    ///
    /// # Errors
    /// Returns an error if the file cannot be loaded; the mapping is unchanged.
    pub fn import<P: AsRef<Path>>(&mut self, filepath: P) -> Result<(), MappingError> {
        let loaded = MappingTable::load(&filepath)?;
        info!(
            "Importing {} mapping entries from {}",
            loaded.len(),
            filepath.as_ref().display()
        );
        self.table.merge(loaded);
        self.recompile();
        Ok(())
    }

    /// Save the current mapping to a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn export<P: AsRef<Path>>(&self, filepath: P) -> Result<(), MappingError> {
        self.table.save(&filepath)?;
        info!(
            "Exported {} mapping entries to {}",
            self.table.len(),
            filepath.as_ref().display()
        );
        Ok(())
    }

    /// Replace the binary buffer with in-memory data.
    pub fn set_raw(&mut self, raw_bytes: Vec<u8>) {
        self.raw_bytes = raw_bytes;
        self.raw_path = None;
    }

    /// Read a binary file into the session buffer.
    ///
    /// # Errors
    /// Returns [`MappingError::FileNotFound`] or [`MappingError::FileUnreadable`] if the
    /// file cannot be read; the previous buffer is kept.
    pub fn open_raw<P: AsRef<Path>>(&mut self, filepath: P) -> Result<(), MappingError> {
        let raw_bytes = std::fs::read(&filepath)
            .map_err(|err| MappingError::from_read(filepath.as_ref().to_path_buf(), &err))?;
        info!(
            "Opened {} ({} bytes)",
            filepath.as_ref().display(),
            raw_bytes.len()
        );
        self.raw_bytes = raw_bytes;
        self.raw_path = Some(filepath.as_ref().to_path_buf());
        Ok(())
    }

    /// Decode the session buffer with the current mapping.
    #[must_use]
    pub fn decoded(&self) -> Vec<u8> {
        decode(&self.raw_bytes, &self.compiled.decode)
    }

    /// Encode text with the current mapping.
    #[must_use]
    pub fn encode_text(&self, text: &[u8], mode: EncodeMode) -> Vec<u8> {
        encode_with(text, mode, &self.table, &self.compiled.encode)
    }

    /// Encode text with the current mapping and write the result to a file.
    /// Missing parent directories are created.
    ///
    /// # Errors
    /// Returns [`MappingError::FileUnwritable`] if the file or its parent directories
    /// cannot be written.
    pub fn save_encoded<P: AsRef<Path>>(
        &self,
        filepath: P,
        text: &[u8],
        mode: EncodeMode,
    ) -> Result<(), MappingError> {
        let encoded = self.encode_text(text, mode);
        let unwritable = |err: std::io::Error| {
            MappingError::FileUnwritable(filepath.as_ref().to_path_buf(), err.kind())
        };

        if let Some(parent) = filepath.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(unwritable)?;
        }
        std::fs::write(&filepath, &encoded).map_err(unwritable)?;

        info!(
            "Saved {} encoded bytes to {}",
            encoded.len(),
            filepath.as_ref().display()
        );
        Ok(())
    }
}
