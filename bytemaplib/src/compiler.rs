//! The `compiler` module derives the lookup tables used by the codec from a
//! [`MappingTable`].
//!
//! Two tables are produced:
//! - [`EncodeTable`]: source byte -> **first** byte of its replacement sequence. Longer
//!   replacements are truncated in the encode direction; this asymmetry is intentional.
//!   Use [`encode_sequences`](crate::encode_sequences) to emit the full sequences instead.
//! - [`DecodeTable`]: lowercase hex of the **full** replacement sequence -> source byte.
//!
//! Entries are visited in ascending source-byte order, so if two source bytes share the
//! same replacement sequence, the larger source byte wins the decode key.

use crate::codec::MAX_MATCH_LEN;
use crate::table::MappingTable;
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt::Write;

/// Lowercase hex string of the byte sequence, two digits per byte.
///
/// # Example
/// ```
/// assert_eq!(bytemaplib::hex_key(&[0x02, 0xAB]), "02ab");
/// ```
#[must_use]
pub fn hex_key(seq: &[u8]) -> String {
    let mut key = String::with_capacity(seq.len() * 2);
    push_hex(&mut key, seq);
    key
}

/// Append the lowercase hex digits of `seq` to `key`.
pub(crate) fn push_hex(key: &mut String, seq: &[u8]) {
    for byte in seq {
        // Writing into a String cannot fail
        let _ = write!(key, "{byte:02x}");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeTable {
    map: [Option<u8>; 256],
}

impl Default for EncodeTable {
    fn default() -> Self {
        Self { map: [None; 256] }
    }
}

impl EncodeTable {
    /// Get the byte the source byte encodes to, if it is mapped.
    #[must_use]
    pub const fn get(&self, byte: u8) -> Option<u8> {
        self.map[byte as usize]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.iter().filter(|b| b.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.iter().all(Option::is_none)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeTable {
    /// Hex key of the replacement sequence -> source byte
    map: HashMap<String, u8>,
    /// Number of inserts that replaced an already present key
    collisions: usize,
    /// Source bytes whose replacement is longer than the decode lookahead
    unreachable: Vec<u8>,
}

impl DecodeTable {
    /// Look up the source byte for a replacement sequence.
    #[must_use]
    pub fn get(&self, seq: &[u8]) -> Option<u8> {
        self.map.get(&hex_key(seq)).copied()
    }

    /// Look up the source byte for an already hex-encoded key (lowercase).
    #[must_use]
    pub fn get_hex(&self, key: &str) -> Option<u8> {
        self.map.get(key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of mapping entries whose decode key was taken over by a later entry.
    #[must_use]
    pub const fn collisions(&self) -> usize {
        self.collisions
    }

    /// Source bytes whose replacement sequence is longer than [`MAX_MATCH_LEN`]
    /// and therefore can never be matched by [`decode`](crate::decode).
    #[must_use]
    pub fn unreachable(&self) -> &[u8] {
        &self.unreachable
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledTables {
    pub encode: EncodeTable,
    pub decode: DecodeTable,
}

/// Build fresh encode and decode tables from the mapping table.
///
/// # Example
/// ```
/// use bytemaplib::{MappingTable, compile};
///
/// let table = MappingTable::parse(br#"{"42": "0x0203"}"#).unwrap();
/// let tables = compile(&table);
///
/// // Encode direction only keeps the first replacement byte
/// assert_eq!(tables.encode.get(0x42), Some(0x02));
/// // Decode direction matches the full sequence
/// assert_eq!(tables.decode.get_hex("0203"), Some(0x42));
/// ```
#[must_use]
pub fn compile(table: &MappingTable) -> CompiledTables {
    let mut tables = CompiledTables::default();

    for (&byte, seq) in table {
        if let Some(&first) = seq.first() {
            tables.encode.map[byte as usize] = Some(first);
        }

        if seq.len() > MAX_MATCH_LEN {
            warn!(
                "Replacement of 0x{byte:02X} is {} bytes long and will never be decoded",
                seq.len()
            );
            tables.decode.unreachable.push(byte);
        }

        let key = hex_key(seq);
        if let Some(prev) = tables.decode.map.insert(key, byte) {
            warn!(
                "0x{prev:02X} and 0x{byte:02X} share the replacement {}; decoding yields 0x{byte:02X}",
                crate::table::format_replacement(seq)
            );
            tables.decode.collisions += 1;
        }
    }

    debug!(
        "Compiled {} encode entries and {} decode keys",
        tables.encode.len(),
        tables.decode.len()
    );

    tables
}
