//! Conversion between the byte buffers of the codec and the text shown in the editor.
//!
//! Every byte is shown as the character with the same code point (Latin-1), so decoded
//! buffers display without loss. Characters typed by the user outside of that range are
//! stored as their UTF-8 bytes.

/// Convert bytes to editor text, one character per byte.
pub fn bytes_to_text(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Convert editor text back to bytes.
pub fn text_to_bytes(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        if let Ok(byte) = u8::try_from(ch) {
            bytes.push(byte);
        } else {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        }
    }
    bytes
}
