//! # `bytemaplib`
//!
//! `bytemaplib` is a Rust library for byte-substitution encoding and decoding of text.
//!
//! The library provides:
//! - Mapping table from source bytes to replacement byte sequences, persisted as JSON
//!   (via [`MappingTable`] struct).
//! - Compilation of the table into fast encode/decode lookups (via [`compile`]).
//! - Encoding of text and greedy longest-match decoding of binary data (via [`encode`] and [`decode`]).
//! - Single owner of the editing state (via [`Session`] struct).
//! - Error handling with [`MappingError`].
//!
//! ## Example
//!
//! ```
//! use bytemaplib::{MappingTable, compile, decode, encode};
//!
//! let mut table = MappingTable::new();
//! table.insert(b'A', vec![0x01]).unwrap();
//!
//! let tables = compile(&table);
//! let encoded = encode(b"ABA", &tables.encode);
//! assert_eq!(encoded, vec![0x01, b'B', 0x01]);
//!
//! let decoded = decode(&encoded, &tables.decode);
//! assert_eq!(decoded, b"ABA");
//! ```

mod codec;
mod compiler;
mod error;
mod session;
mod table;

// Public APIs
pub use codec::{EncodeMode, MAX_MATCH_LEN, decode, encode, encode_sequences, encode_with};
pub use compiler::{CompiledTables, DecodeTable, EncodeTable, compile, hex_key};
pub use error::{MappingError, ParseErrorKind};
pub use session::Session;
pub use table::{MappingTable, format_key, format_replacement, parse_key, parse_replacement};
