//! Text envelopes that carry raw frames.
//!
//! The base answers `GETMAP` with a JSON object whose `compressedmapdata`
//! field is the frame as a hex string. Saved dumps are either that JSON,
//! a bare hex string, or the raw binary frame.

use serde::Deserialize;

use crate::error::{Error, Result};

/// JSON field holding the hex-encoded frame
pub const MAP_DATA_FIELD: &str = "compressedmapdata";

#[derive(Debug, Deserialize)]
struct MapEnvelope {
    #[serde(rename = "compressedmapdata")]
    compressed_map_data: String,
}

/// How a frame was wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    /// `{"compressedmapdata": "<hex>"}`
    Json,
    /// Bare hex text
    Hex,
    /// Raw binary frame
    Binary,
}

/// Unwrap a frame from whatever envelope it arrived in
pub fn unwrap_frame(data: &[u8]) -> Result<(EnvelopeKind, Vec<u8>)> {
    let Ok(text) = std::str::from_utf8(data) else {
        return Ok((EnvelopeKind::Binary, data.to_vec()));
    };
    let text = text.trim();

    if text.starts_with('{') {
        match serde_json::from_str::<MapEnvelope>(text) {
            Ok(envelope) => {
                return Ok((EnvelopeKind::Json, decode_hex(&envelope.compressed_map_data)?));
            }
            // Not JSON at all: a binary frame whose id happens to start with '{'
            Err(e) if !e.is_data() && !text.contains(MAP_DATA_FIELD) => {
                return Ok((EnvelopeKind::Binary, data.to_vec()));
            }
            Err(e) => {
                return Err(Error::Format(format!(
                    "map envelope is not valid JSON with {}: {}",
                    MAP_DATA_FIELD, e
                )));
            }
        }
    }

    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Ok((EnvelopeKind::Hex, decode_hex(text)?));
    }

    Ok((EnvelopeKind::Binary, data.to_vec()))
}

/// Decode a hex string, tolerating surrounding whitespace
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    if text.len() % 2 != 0 {
        return Err(Error::Format(format!(
            "invalid hex string length: {}",
            text.len()
        )));
    }
    hex::decode(text).map_err(|e| Error::Format(format!("invalid hex frame data: {}", e)))
}

/// Wrap a raw frame the way the device sends it
pub fn wrap_frame(raw: &[u8]) -> String {
    serde_json::json!({ MAP_DATA_FIELD: hex::encode(raw) }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_json_envelope() {
        let text = wrap_frame(&[0x01, 0xAB, 0xFE]);
        let (kind, raw) = unwrap_frame(text.as_bytes()).unwrap();
        assert_eq!(kind, EnvelopeKind::Json);
        assert_eq!(raw, vec![0x01, 0xAB, 0xFE]);
    }

    #[test]
    fn test_json_with_extra_fields() {
        let text = br#"{"success": true, "compressedmapdata": "00ff10"}"#;
        let (kind, raw) = unwrap_frame(text).unwrap();
        assert_eq!(kind, EnvelopeKind::Json);
        assert_eq!(raw, vec![0x00, 0xFF, 0x10]);
    }

    #[test]
    fn test_bare_hex_with_newline() {
        let (kind, raw) = unwrap_frame(b"deadBEEF\n").unwrap();
        assert_eq!(kind, EnvelopeKind::Hex);
        assert_eq!(raw, vec![0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_odd_hex_rejected() {
        let err = unwrap_frame(b"abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_json_missing_field() {
        let err = unwrap_frame(br#"{"map_ids": [1]}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_truncated_json_envelope_rejected() {
        let err = unwrap_frame(br#"{"compressedmapdata": "00ff"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_utf8_binary_frame_starting_with_brace() {
        // Header id 0x7B, every byte ASCII
        let mut raw = vec![0x7Bu8, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00];
        raw.extend_from_slice(&[0x08, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00]);
        assert!(std::str::from_utf8(&raw).is_ok());

        let (kind, out) = unwrap_frame(&raw).unwrap();
        assert_eq!(kind, EnvelopeKind::Binary);
        assert_eq!(out, raw);
    }

    #[test]
    fn test_binary_passthrough() {
        let raw = [0x01u8, 0x00, 0xFF, 0xFE, 0x80];
        let (kind, out) = unwrap_frame(&raw).unwrap();
        assert_eq!(kind, EnvelopeKind::Binary);
        assert_eq!(out, raw);
    }
}
