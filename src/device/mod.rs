//! Serial map retrieval from a Hackerbot base.

mod link;
pub mod protocol;

pub use link::{LinkConfig, LinkState, MapLink};
pub use protocol::MapList;

use crate::error::Result;
use crate::transport::SerialTransport;

/// Read timeout for a single serial read
const SERIAL_READ_TIMEOUT: std::time::Duration = std::time::Duration::from_millis(20);

/// Open `port` and wrap it in a map session
pub fn connect(port: &str, baud_rate: u32, config: LinkConfig) -> Result<MapLink<SerialTransport>> {
    let transport = SerialTransport::open(port, baud_rate, SERIAL_READ_TIMEOUT)?;
    Ok(MapLink::new(transport, config))
}
