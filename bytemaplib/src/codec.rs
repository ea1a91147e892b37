//! The `codec` module holds the stateless encode and decode passes.
//!
//! Both passes work on raw 8-bit values: text is never interpreted as UTF-8, and the
//! decoded output is a sequence of single-byte characters.

use crate::compiler::{DecodeTable, EncodeTable, push_hex};
use crate::table::MappingTable;

/// Longest replacement sequence (in bytes) the decoder tries to match.
pub const MAX_MATCH_LEN: usize = 3;

/// How the text is turned into bytes when encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EncodeMode {
    /// Emit only the first byte of each replacement (uses the compiled [`EncodeTable`])
    #[default]
    FirstByte,
    /// Emit the whole replacement sequence of each mapped byte
    FullSequence,
}

/// Encode text byte by byte. Mapped bytes are replaced by the first byte of their
/// replacement, unmapped bytes are copied unchanged.
///
/// # Example
/// ```
/// use bytemaplib::{MappingTable, compile, encode};
///
/// let table = MappingTable::parse(br#"{"41": "0x01", "42": "0x0203"}"#).unwrap();
/// let tables = compile(&table);
///
/// assert_eq!(encode(b"ABC", &tables.encode), vec![0x01, 0x02, b'C']);
/// ```
#[must_use]
pub fn encode(text: &[u8], table: &EncodeTable) -> Vec<u8> {
    text.iter()
        .map(|&byte| table.get(byte).unwrap_or(byte))
        .collect()
}

/// Encode text byte by byte, emitting the full replacement sequence of every mapped byte.
/// Unmapped bytes are copied unchanged.
///
/// # Example
/// ```
/// use bytemaplib::{MappingTable, encode_sequences};
///
/// let table = MappingTable::parse(br#"{"42": "0x0203"}"#).unwrap();
///
/// assert_eq!(encode_sequences(b"AB", &table), vec![b'A', 0x02, 0x03]);
/// ```
#[must_use]
pub fn encode_sequences(text: &[u8], table: &MappingTable) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(text.len());
    for &byte in text {
        match table.get(byte) {
            Some(seq) => encoded.extend_from_slice(seq),
            None => encoded.push(byte),
        }
    }
    encoded
}

/// Encode text with the selected [`EncodeMode`].
#[must_use]
pub fn encode_with(
    text: &[u8],
    mode: EncodeMode,
    table: &MappingTable,
    encode_table: &EncodeTable,
) -> Vec<u8> {
    match mode {
        EncodeMode::FirstByte => encode(text, encode_table),
        EncodeMode::FullSequence => encode_sequences(text, table),
    }
}

/// Decode raw bytes with greedy longest-match-first lookup.
///
/// At every position the next 3, then 2, then 1 bytes are looked up in the decode table.
/// The first hit emits its source byte and skips the matched bytes. Without a hit the raw
/// byte is emitted unchanged and the cursor moves by one.
///
/// # Example
/// ```
/// use bytemaplib::{MappingTable, compile, decode};
///
/// let table = MappingTable::parse(br#"{"42": "0x0203"}"#).unwrap();
/// let tables = compile(&table);
///
/// assert_eq!(decode(&[0x02, 0x03, 0x99], &tables.decode), vec![0x42, 0x99]);
/// ```
#[must_use]
pub fn decode(raw_bytes: &[u8], table: &DecodeTable) -> Vec<u8> {
    let mut decoded = Vec::with_capacity(raw_bytes.len());
    let mut key = String::with_capacity(MAX_MATCH_LEN * 2);
    let mut i = 0;

    while i < raw_bytes.len() {
        let longest = MAX_MATCH_LEN.min(raw_bytes.len() - i);

        // Build the longest key once and shorten it for the next attempts
        key.clear();
        push_hex(&mut key, &raw_bytes[i..i + longest]);

        let mut matched = None;
        for len in (1..=longest).rev() {
            key.truncate(len * 2);
            if let Some(byte) = table.get_hex(&key) {
                matched = Some((byte, len));
                break;
            }
        }

        match matched {
            Some((byte, len)) => {
                decoded.push(byte);
                i += len;
            }
            None => {
                decoded.push(raw_bytes[i]);
                i += 1;
            }
        }
    }

    decoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use rand::Rng;
    use rand::seq::SliceRandom;

    fn table_of(pairs: &[(u8, &[u8])]) -> MappingTable {
        let mut table = MappingTable::new();
        for (byte, seq) in pairs {
            assert!(table.insert(*byte, seq.to_vec()).is_ok());
        }
        table
    }

    #[test]
    fn test_single_byte_scenario() {
        // Arrange
        let tables = compile(&table_of(&[(0x41, &[0x01])]));

        // Act
        let encoded = encode(b"A", &tables.encode);
        let decoded = decode(&encoded, &tables.decode);

        // Assert
        assert_eq!(encoded, vec![0x01]);
        assert_eq!(decoded, b"A");
    }

    #[test]
    fn test_multi_byte_scenario() {
        // Arrange
        let tables = compile(&table_of(&[(0x42, &[0x02, 0x03])]));

        // Act
        let decoded = decode(&[0x02, 0x03, 0x99], &tables.decode);

        // Assert
        assert_eq!(decoded, vec![0x42, 0x99]);
    }

    #[test]
    fn test_longest_match_wins() {
        // Arrange
        let tables = compile(&table_of(&[(0x31, &[0xAA]), (0x32, &[0xAA, 0xBB])]));

        // Act
        let decoded = decode(&[0xAA, 0xBB], &tables.decode);

        // Assert
        assert_eq!(decoded, vec![0x32]);
    }

    #[test]
    fn test_three_byte_match_before_shorter() {
        // Arrange
        let tables = compile(&table_of(&[
            (b'x', &[0x01]),
            (b'y', &[0x01, 0x02]),
            (b'z', &[0x01, 0x02, 0x03]),
        ]));

        // Act
        let decoded = decode(&[0x01, 0x02, 0x03, 0x01, 0x02, 0x01], &tables.decode);

        // Assert
        assert_eq!(decoded, b"zyx");
    }

    #[test]
    fn test_shorter_match_near_end_of_buffer() {
        // Arrange
        let tables = compile(&table_of(&[(b'y', &[0x01, 0x02]), (b'z', &[0x01, 0x02, 0x03])]));

        // Act
        let decoded = decode(&[0x01, 0x02], &tables.decode);

        // Assert
        assert_eq!(decoded, b"y");
    }

    #[test]
    fn test_fallback_advances_by_one() {
        // Arrange
        let tables = compile(&table_of(&[(b'q', &[0x02, 0x03])]));

        // Act
        let decoded = decode(&[0x77, 0x02, 0x03], &tables.decode);

        // Assert
        assert_eq!(decoded, vec![0x77, b'q']);
    }

    #[test]
    fn test_decode_empty_input() {
        let tables = compile(&table_of(&[(b'q', &[0x02])]));

        assert!(decode(&[], &tables.decode).is_empty());
        assert!(encode(&[], &tables.encode).is_empty());
    }

    #[test]
    fn test_encode_passes_unmapped_bytes() {
        // Arrange
        let tables = compile(&MappingTable::new());
        let text: Vec<u8> = (0..=255).collect();

        // Act
        let encoded = encode(&text, &tables.encode);

        // Assert
        assert_eq!(encoded, text);
    }

    #[test]
    fn test_encode_asymmetry() {
        // Arrange
        let table = table_of(&[(0x42, &[0x02, 0x03])]);
        let tables = compile(&table);

        // Act
        let first_byte = encode_with(b"B", EncodeMode::FirstByte, &table, &tables.encode);
        let full = encode_with(b"B", EncodeMode::FullSequence, &table, &tables.encode);

        // Assert
        assert_eq!(first_byte, vec![0x02]);
        assert_eq!(full, vec![0x02, 0x03]);
        // Only the full-sequence output decodes back to the source byte
        assert_eq!(decode(&first_byte, &tables.decode), vec![0x02]);
        assert_eq!(decode(&full, &tables.decode), vec![0x42]);
    }

    #[test]
    fn test_round_trip_unique_single_byte_table() {
        // Arrange: random permutation of all byte values
        let mut rng = rand::rng();
        let mut targets: Vec<u8> = (0..=255).collect();
        targets.shuffle(&mut rng);

        let mut table = MappingTable::new();
        for (source, target) in (0..=255u8).zip(targets) {
            assert!(table.insert(source, vec![target]).is_ok());
        }
        let tables = compile(&table);

        let text: Vec<u8> = rng
            .sample_iter(rand::distr::StandardUniform)
            .take(4096)
            .collect();

        // Act
        let encoded = encode(&text, &tables.encode);
        let decoded = decode(&encoded, &tables.decode);

        // Assert
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_round_trip_partial_table() {
        // Arrange: a few swaps, everything else passes through
        let table = table_of(&[(b'a', &[b'b']), (b'b', &[b'a']), (b'\n', &[0x00]), (0x00, &[b'\n'])]);
        let tables = compile(&table);
        let text = b"abba\n\0 cabbage\n";

        // Act
        let encoded = encode(text, &tables.encode);
        let decoded = decode(&encoded, &tables.decode);

        // Assert
        assert_eq!(encoded, b"baab\0\n cbaabge\0");
        assert_eq!(decoded, text);
    }
}
