//! The `table` module provides the [`MappingTable`] struct, the user-editable association
//! between source bytes and their replacement byte sequences.
//!
//! The table is persisted as a flat JSON object. Keys are the source bytes written as two
//! lowercase hex digits and values are the replacement sequences written as `0x` followed
//! by uppercase hex pairs, e.g. `{"41": "0x01", "42": "0x0203"}`. Keys and values are
//! accepted case-insensitively on load.
//!
//! Entries are kept in a `BTreeMap`, so every iteration (and thus every derived table)
//! visits the source bytes in ascending order.

use crate::error::{MappingError, ParseErrorKind};
use log::debug;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f]{2}$").expect("Key regex should compile"));

#[allow(clippy::expect_used)]
static REPLACEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^0[xX]((?:[0-9A-Fa-f]{2})+)$").expect("Replacement regex should compile")
});

/// Format the source byte as a mapping key (two lowercase hex digits).
///
/// # Example
/// ```
/// assert_eq!(bytemaplib::format_key(0x4A), "4a");
/// ```
#[must_use]
pub fn format_key(byte: u8) -> String {
    format!("{byte:02x}")
}

/// Parse a mapping key. Exactly two hex digits are accepted, in either case.
///
/// # Errors
/// Returns [`MappingError::InvalidKey`] if the key is not exactly two hex digits.
///
/// # Example
/// ```
/// use bytemaplib::{MappingError, parse_key};
///
/// assert_eq!(parse_key("4A"), Ok(0x4A));
/// assert_eq!(parse_key("4"), Err(MappingError::InvalidKey("4".into())));
/// ```
pub fn parse_key(key: &str) -> Result<u8, MappingError> {
    if !KEY_RE.is_match(key) {
        return Err(MappingError::InvalidKey(key.to_string()));
    }
    u8::from_str_radix(key, 16).map_err(|_| MappingError::InvalidKey(key.to_string()))
}

/// Format a replacement sequence as `0x` followed by uppercase hex pairs.
///
/// # Example
/// ```
/// assert_eq!(bytemaplib::format_replacement(&[0x02, 0xAB]), "0x02AB");
/// ```
#[must_use]
pub fn format_replacement(seq: &[u8]) -> String {
    let mut s = String::with_capacity(2 + seq.len() * 2);
    s.push_str("0x");
    for byte in seq {
        s.push_str(&format!("{byte:02X}"));
    }
    s
}

/// Parse a replacement sequence of the form `0x` + an even number of hex digits.
/// Surrounding whitespace is ignored.
///
/// # Errors
/// Returns the [`ParseErrorKind`] describing why the value is not a valid replacement.
/// A bare `0x` is rejected since every mapped byte needs at least one replacement byte.
/// Surrounding whitespace is not allowed.
///
/// # Example
/// ```
/// use bytemaplib::{ParseErrorKind, parse_replacement};
///
/// assert_eq!(parse_replacement("0x0203"), Ok(vec![0x02, 0x03]));
/// assert_eq!(
///     parse_replacement("0xGG"),
///     Err(ParseErrorKind::InvalidHexDigit("0xGG".into()))
/// );
/// ```
pub fn parse_replacement(value: &str) -> Result<Vec<u8>, ParseErrorKind> {
    if let Some(caps) = REPLACEMENT_RE.captures(value) {
        let digits = caps.get(1).map_or("", |m| m.as_str());
        return (0..digits.len())
            .step_by(2)
            .map(|i| {
                u8::from_str_radix(&digits[i..i + 2], 16)
                    .map_err(|_| ParseErrorKind::InvalidHexDigit(value.to_string()))
            })
            .collect();
    }

    // Figure out why the value did not match
    let Some(digits) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    else {
        return Err(ParseErrorKind::MissingPrefix(value.to_string()));
    };

    if digits.is_empty() {
        Err(ParseErrorKind::EmptyReplacement(value.to_string()))
    } else if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        Err(ParseErrorKind::InvalidHexDigit(value.to_string()))
    } else {
        Err(ParseErrorKind::OddDigitCount(value.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    /// Source byte -> replacement sequence (never empty)
    entries: BTreeMap<u8, Vec<u8>>,
}

impl<'a> IntoIterator for &'a MappingTable {
    type Item = (&'a u8, &'a Vec<u8>);
    type IntoIter = std::collections::btree_map::Iter<'a, u8, Vec<u8>>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl MappingTable {
    /// Creates an empty `MappingTable`.
    ///
    /// # Example
    /// ```
    /// use bytemaplib::MappingTable;
    ///
    /// let table = MappingTable::new();
    /// assert!(table.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Parse the raw contents of a JSON mapping document.
    ///
    /// # Errors
    /// - Returns [`MappingError::ParseError`] if the document is not a flat JSON object
    ///   of string values, or a value is not a valid replacement sequence
    /// - Returns [`MappingError::InvalidKey`] if a key is not two hex digits
    ///
    /// # Example
    /// ```
    /// use bytemaplib::MappingTable;
    ///
    /// let table = MappingTable::parse(br#"{"41": "0x01", "42": "0x0203"}"#).unwrap();
    /// assert_eq!(table.get(0x42), Some(&[0x02, 0x03][..]));
    /// ```
    pub fn parse(raw_bytes: &[u8]) -> Result<Self, MappingError> {
        let doc: Value = serde_json::from_slice(raw_bytes).map_err(|err| {
            MappingError::ParseError(ParseErrorKind::MalformedJson(err.to_string()))
        })?;

        let Value::Object(map) = doc else {
            return Err(MappingError::ParseError(ParseErrorKind::NotAnObject));
        };

        let mut table = Self::new();
        for (key, value) in map {
            let byte = parse_key(&key)?;
            let Value::String(text) = value else {
                return Err(MappingError::ParseError(ParseErrorKind::ValueNotString(
                    key,
                )));
            };
            let seq = parse_replacement(&text).map_err(MappingError::ParseError)?;
            table.entries.insert(byte, seq);
        }

        Ok(table)
    }

    /// Creates a `MappingTable` from the JSON mapping file at the provided path.
    ///
    /// # Errors
    /// - Returns [`MappingError::FileNotFound`] if the file does not exist
    /// - Returns [`MappingError::FileUnreadable`] if the file cannot be read
    /// - Returns a parse error if the contents are not a valid mapping (see [`Self::parse`])
    ///
    /// # Example
    /// ```
    /// use bytemaplib::MappingTable;
    ///
    /// let table = MappingTable::load("tests/fixtures/map_valid_1.json").unwrap();
    /// assert_eq!(table.get(b'A'), Some(&[0x01][..]));
    /// ```
    pub fn load<P: AsRef<Path>>(filepath: P) -> Result<Self, MappingError> {
        let path = filepath.as_ref();

        // Read the contents of the file. The handle is closed before parsing.
        let raw_bytes =
            std::fs::read(path).map_err(|err| MappingError::from_read(path.to_path_buf(), &err))?;

        let table = Self::parse(&raw_bytes)?;
        debug!("Loaded {} mapping entries from {}", table.len(), path.display());

        Ok(table)
    }

    /// Serialize the table into a pretty-printed JSON object, keys in ascending order.
    ///
    /// # Example
    /// ```
    /// use bytemaplib::MappingTable;
    ///
    /// let mut table = MappingTable::new();
    /// table.insert(0x42, vec![0x02, 0x03]).unwrap();
    ///
    /// assert_eq!(table.to_json(), "{\n  \"42\": \"0x0203\"\n}");
    /// ```
    #[must_use]
    pub fn to_json(&self) -> String {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(byte, seq)| (format_key(*byte), Value::String(format_replacement(seq))))
            .collect();

        // Serializing a map of strings cannot fail
        serde_json::to_string_pretty(&Value::Object(map)).unwrap_or_default()
    }

    /// Writes the table as a JSON mapping file at the specified path.
    /// Missing parent directories are created.
    ///
    /// # Errors
    /// Returns [`MappingError::FileUnwritable`] if the file cannot be written.
    ///
    /// # Example
    /// ```
    /// use bytemaplib::MappingTable;
    ///
    /// let table = MappingTable::load("tests/fixtures/map_valid_1.json").unwrap();
    /// table.save("build/ex1/map.json").unwrap();
    ///
    /// assert_eq!(MappingTable::load("build/ex1/map.json").unwrap(), table);
    /// ```
    pub fn save<P: AsRef<Path>>(&self, filepath: P) -> Result<(), MappingError> {
        let path = filepath.as_ref();
        let unwritable = |err: std::io::Error| MappingError::FileUnwritable(path.to_path_buf(), err.kind());

        // Ensure the parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(unwritable)?;
        }

        let file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(unwritable)?;

        let mut writer = std::io::BufWriter::new(file);
        writer.write_all(self.to_json().as_bytes()).map_err(unwritable)?;
        writeln!(writer).map_err(unwritable)?;
        writer.flush().map_err(unwritable)?;

        debug!("Saved {} mapping entries to {}", self.len(), path.display());
        Ok(())
    }

    /// Insert or replace the mapping of a single source byte.
    /// Returns the previous replacement, if any.
    ///
    /// # Errors
    /// Returns [`ParseErrorKind::EmptyReplacement`] if `seq` is empty; the table is unchanged.
    ///
    /// # Example
    /// ```
    /// use bytemaplib::MappingTable;
    ///
    /// let mut table = MappingTable::new();
    /// assert_eq!(table.insert(b'A', vec![0x01]), Ok(None));
    /// assert_eq!(table.insert(b'A', vec![0x02]), Ok(Some(vec![0x01])));
    /// assert!(table.insert(b'B', vec![]).is_err());
    /// ```
    pub fn insert(&mut self, byte: u8, seq: Vec<u8>) -> Result<Option<Vec<u8>>, MappingError> {
        if seq.is_empty() {
            return Err(MappingError::ParseError(ParseErrorKind::EmptyReplacement(
                format_replacement(&seq),
            )));
        }
        Ok(self.entries.insert(byte, seq))
    }

    /// Remove the mapping of a source byte. Returns the removed replacement, if any.
    pub fn remove(&mut self, byte: u8) -> Option<Vec<u8>> {
        self.entries.remove(&byte)
    }

    /// Get the replacement sequence of a source byte.
    #[must_use]
    pub fn get(&self, byte: u8) -> Option<&[u8]> {
        self.entries.get(&byte).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, byte: u8) -> bool {
        self.entries.contains_key(&byte)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an iterator over (source byte, replacement) pairs in ascending source-byte order.
    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, u8, Vec<u8>> {
        self.into_iter()
    }

    /// Get the configured source bytes in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries.keys().copied()
    }

    /// Merge another table into this one. Entries of `other` overwrite entries
    /// with the same source byte; all other existing entries are kept.
    ///
    /// # Example
    /// ```
    /// use bytemaplib::MappingTable;
    ///
    /// let mut existing = MappingTable::parse(br#"{"41": "0x01", "42": "0x02"}"#).unwrap();
    /// let loaded = MappingTable::parse(br#"{"42": "0xFF", "43": "0x03"}"#).unwrap();
    ///
    /// existing.merge(loaded);
    ///
    /// assert_eq!(existing.get(0x41), Some(&[0x01][..]));
    /// assert_eq!(existing.get(0x42), Some(&[0xFF][..]));
    /// assert_eq!(existing.get(0x43), Some(&[0x03][..]));
    /// ```
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Insert the identity mapping `byte -> [byte]` unless the byte is already mapped.
    /// Returns `true` if an entry was inserted.
    pub fn ensure_default(&mut self, byte: u8) -> bool {
        if self.entries.contains_key(&byte) {
            return false;
        }
        self.entries.insert(byte, vec![byte]);
        true
    }

    /// Apply [`Self::ensure_default`] to every distinct byte of `text`.
    /// Returns the number of entries inserted.
    ///
    /// # Example
    /// ```
    /// use bytemaplib::MappingTable;
    ///
    /// let mut table = MappingTable::parse(br#"{"61": "0x01"}"#).unwrap();
    /// let inserted = table.ensure_defaults_for(b"abba");
    ///
    /// assert_eq!(inserted, 1);
    /// assert_eq!(table.get(b'a'), Some(&[0x01][..]));
    /// assert_eq!(table.get(b'b'), Some(&[b'b'][..]));
    /// ```
    pub fn ensure_defaults_for(&mut self, text: &[u8]) -> usize {
        text.iter()
            .filter(|&&byte| self.ensure_default(byte))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_valid() {
        assert_eq!(parse_key("00"), Ok(0x00));
        assert_eq!(parse_key("ff"), Ok(0xFF));
        assert_eq!(parse_key("Ab"), Ok(0xAB));
    }

    #[test]
    fn test_parse_key_invalid() {
        for key in ["", "0", "000", "0x1", "zz", " 1", "+1"] {
            assert_eq!(parse_key(key), Err(MappingError::InvalidKey(key.to_string())));
        }
    }

    #[test]
    fn test_parse_replacement_valid() {
        assert_eq!(parse_replacement("0x01"), Ok(vec![0x01]));
        assert_eq!(parse_replacement("0XaBcD"), Ok(vec![0xAB, 0xCD]));
        assert_eq!(parse_replacement("0x0203ff"), Ok(vec![0x02, 0x03, 0xFF]));
    }

    #[test]
    fn test_parse_replacement_rejects_padding() {
        assert_eq!(
            parse_replacement("  0x0203ff"),
            Err(ParseErrorKind::MissingPrefix("  0x0203ff".into()))
        );
        assert_eq!(
            parse_replacement("0x0203 "),
            Err(ParseErrorKind::InvalidHexDigit("0x0203 ".into()))
        );
        assert_eq!(
            parse_replacement("0x01\n"),
            Err(ParseErrorKind::InvalidHexDigit("0x01\n".into()))
        );
    }

    #[test]
    fn test_parse_replacement_invalid() {
        assert_eq!(
            parse_replacement("01"),
            Err(ParseErrorKind::MissingPrefix("01".into()))
        );
        assert_eq!(
            parse_replacement("0x"),
            Err(ParseErrorKind::EmptyReplacement("0x".into()))
        );
        assert_eq!(
            parse_replacement("0x123"),
            Err(ParseErrorKind::OddDigitCount("0x123".into()))
        );
        assert_eq!(
            parse_replacement("0xGG"),
            Err(ParseErrorKind::InvalidHexDigit("0xGG".into()))
        );
        assert_eq!(
            parse_replacement("0x0G1"),
            Err(ParseErrorKind::InvalidHexDigit("0x0G1".into()))
        );
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_key(0x0A), "0a");
        assert_eq!(format_replacement(&[0x0A, 0xBC]), "0x0ABC");
        assert_eq!(format_replacement(&[]), "0x");
    }

    #[test]
    fn test_parse_document_errors() {
        // Arrange
        let cases: [(&[u8], MappingError); 7] = [
            (
                br#"["41"]"#,
                MappingError::ParseError(ParseErrorKind::NotAnObject),
            ),
            (
                br#"{"41": 1}"#,
                MappingError::ParseError(ParseErrorKind::ValueNotString("41".into())),
            ),
            (
                br#"{"41": "0xGG"}"#,
                MappingError::ParseError(ParseErrorKind::InvalidHexDigit("0xGG".into())),
            ),
            (
                br#"{"41": "0x"}"#,
                MappingError::ParseError(ParseErrorKind::EmptyReplacement("0x".into())),
            ),
            (
                br#"{"41": " 0x01"}"#,
                MappingError::ParseError(ParseErrorKind::MissingPrefix(" 0x01".into())),
            ),
            (
                br#"{"41": "0x01\n"}"#,
                MappingError::ParseError(ParseErrorKind::InvalidHexDigit("0x01\n".into())),
            ),
            (br#"{"410": "0x01"}"#, MappingError::InvalidKey("410".into())),
        ];

        for (doc, expected) in cases {
            // Act
            let res = MappingTable::parse(doc);

            // Assert
            assert_eq!(res, Err(expected));
        }
    }

    #[test]
    fn test_parse_malformed_json() {
        let res = MappingTable::parse(br#"{"41": "0x01""#);

        assert!(matches!(
            res,
            Err(MappingError::ParseError(ParseErrorKind::MalformedJson(_)))
        ));
    }

    #[test]
    fn test_parse_keys_case_insensitive() {
        // Act
        let table = MappingTable::parse(br#"{"fF": "0x01", "0A": "0xabCD"}"#);

        // Assert
        let table = table.unwrap_or_default();
        assert_eq!(table.get(0xFF), Some(&[0x01][..]));
        assert_eq!(table.get(0x0A), Some(&[0xAB, 0xCD][..]));
    }

    #[test]
    fn test_to_json_fixed_case_and_order() {
        // Arrange
        let mut table = MappingTable::new();
        assert!(table.insert(0xFF, vec![0xab]).is_ok());
        assert!(table.insert(0x0A, vec![0x01, 0xcd]).is_ok());

        // Act
        let json = table.to_json();

        // Assert
        assert_eq!(json, "{\n  \"0a\": \"0x01CD\",\n  \"ff\": \"0xAB\"\n}");
    }

    #[test]
    fn test_insert_empty_keeps_table() {
        // Arrange
        let mut table = MappingTable::new();
        assert!(table.insert(0x41, vec![0x01]).is_ok());

        // Act
        let res = table.insert(0x41, vec![]);

        // Assert
        assert!(res.is_err());
        assert_eq!(table.get(0x41), Some(&[0x01][..]));
    }

    #[test]
    fn test_ensure_default() {
        // Arrange
        let mut table = MappingTable::new();
        assert!(table.insert(0x41, vec![0x99]).is_ok());

        // Act + Assert
        assert!(!table.ensure_default(0x41));
        assert!(table.ensure_default(0x42));
        assert_eq!(table.get(0x41), Some(&[0x99][..]));
        assert_eq!(table.get(0x42), Some(&[0x42][..]));
    }

    #[test]
    fn test_merge_overwrites_and_retains() {
        // Arrange
        let mut existing = MappingTable::new();
        assert!(existing.insert(1, vec![10]).is_ok());
        assert!(existing.insert(2, vec![20]).is_ok());
        let mut loaded = MappingTable::new();
        assert!(loaded.insert(2, vec![21, 22]).is_ok());
        assert!(loaded.insert(3, vec![30]).is_ok());

        // Act
        existing.merge(loaded);

        // Assert
        assert_eq!(existing.len(), 3);
        assert_eq!(existing.get(1), Some(&[10][..]));
        assert_eq!(existing.get(2), Some(&[21, 22][..]));
        assert_eq!(existing.get(3), Some(&[30][..]));
    }

    #[test]
    fn test_iteration_is_ascending() {
        // Arrange
        let mut table = MappingTable::new();
        for byte in [0x7F, 0x00, 0x41, 0xFE] {
            assert!(table.insert(byte, vec![byte]).is_ok());
        }

        // Act
        let keys: Vec<u8> = table.keys().collect();

        // Assert
        assert_eq!(keys, vec![0x00, 0x41, 0x7F, 0xFE]);
    }
}
