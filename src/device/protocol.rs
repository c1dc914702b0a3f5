//! Hackerbot base text protocol.
//!
//! Commands are ASCII lines terminated by `\r\n`. The base answers with
//! free-form text; acknowledgements contain `OK` or `true`, and map data
//! arrives as a JSON object.
//!
//! ```text
//! MACHINE,0 | PING | INIT | MACHINE,1    wake sequence
//! GETML                                  {"map_num": 2, "map_ids": [1, 4], ...}
//! GETMAP,<id>                            {"compressedmapdata": "<hex>", ...}
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Commands understood by the base
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Leave (`false`) or enter (`true`) machine control mode
    Machine(bool),
    /// Liveness check
    Ping,
    /// Initialise the base
    Init,
    /// List stored maps
    GetMapList,
    /// Download one stored map
    GetMap(String),
}

impl Command {
    /// Wire form including the CRLF terminator
    pub fn encode(&self) -> String {
        match self {
            Command::Machine(on) => format!("MACHINE,{}\r\n", *on as u8),
            Command::Ping => "PING\r\n".to_string(),
            Command::Init => "INIT\r\n".to_string(),
            Command::GetMapList => "GETML\r\n".to_string(),
            Command::GetMap(id) => format!("GETMAP,{}\r\n", id),
        }
    }
}

/// Commands sent, in order, to bring the base into machine mode
pub fn wake_sequence() -> [Command; 4] {
    [
        Command::Machine(false),
        Command::Ping,
        Command::Init,
        Command::Machine(true),
    ]
}

/// Whether a response acknowledges the last command
pub fn is_ack(response: &[u8]) -> bool {
    let text = String::from_utf8_lossy(response);
    text.contains("OK") || text.contains("true")
}

/// Byte range of the first complete top-level JSON object in `buf`.
///
/// Braces inside string literals are ignored. Returns `None` until the
/// closing brace of the first object has arrived.
pub fn find_json_object(buf: &[u8]) -> Option<std::ops::Range<usize>> {
    let start = buf.iter().position(|&b| b == b'{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in buf[start..].iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start..start + offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Maps stored on the base
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapList {
    /// Count reported by the base
    pub map_num: u32,
    /// Map identifiers, as sent back in `GETMAP`
    pub map_ids: Vec<String>,
}

#[derive(Deserialize)]
struct RawMapList {
    map_num: u32,
    map_ids: Vec<Value>,
}

/// Parse a `GETML` reply; the JSON object may be surrounded by other text.
pub fn parse_map_list(response: &[u8]) -> Result<MapList> {
    let range = find_json_object(response)
        .ok_or_else(|| Error::Device("map list reply holds no JSON object".to_string()))?;
    let raw: RawMapList = serde_json::from_slice(&response[range])
        .map_err(|e| Error::Device(format!("Failed to parse map list: {}", e)))?;

    let map_ids = raw
        .map_ids
        .into_iter()
        .map(|id| match id {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .collect();

    Ok(MapList {
        map_num: raw.map_num,
        map_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_encoding() {
        assert_eq!(Command::Machine(false).encode(), "MACHINE,0\r\n");
        assert_eq!(Command::Machine(true).encode(), "MACHINE,1\r\n");
        assert_eq!(Command::GetMapList.encode(), "GETML\r\n");
        assert_eq!(Command::GetMap("3".into()).encode(), "GETMAP,3\r\n");
    }

    #[test]
    fn test_ack_detection() {
        assert!(is_ack(b"OK\r\n"));
        assert!(is_ack(b"{\"success\": true}"));
        assert!(!is_ack(b"ERR\r\n"));
        assert!(!is_ack(b""));
    }

    #[test]
    fn test_find_json_object() {
        assert_eq!(find_json_object(b"OK\r\n{\"a\":1}\r\n"), Some(4..11));
        assert_eq!(find_json_object(b"{\"a\":{\"b\":2}"), None);
        assert_eq!(find_json_object(b"no json"), None);
        // Braces inside strings do not count
        let text = br#"{"s":"}{\"}"} tail"#;
        assert_eq!(find_json_object(text), Some(0..13));
    }

    #[test]
    fn test_parse_map_list() {
        let list = parse_map_list(b"OK\r\n{\"map_num\": 2, \"map_ids\": [1, \"7\"]}\r\n").unwrap();
        assert_eq!(list.map_num, 2);
        assert_eq!(list.map_ids, vec!["1", "7"]);
    }

    #[test]
    fn test_parse_map_list_errors() {
        assert!(parse_map_list(b"OK\r\n").is_err());
        assert!(parse_map_list(b"{\"map_num\": 1}").is_err());
    }
}
