//! Map download session with the robot base.
//!
//! ```text
//! Idle --wake--> Awake --list_maps--> Listing --> Awake
//!                  |
//!                  +--download--> Downloading --> Done
//!
//! any failure --> Failed (terminal)
//! ```
//!
//! Every read is bounded by a deadline. Responses are accumulated until
//! they are complete (ack seen, JSON object closed), the line goes quiet
//! after data, or the deadline passes.

use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::frame::{FrameSource, envelope};
use crate::transport::Transport;

use super::protocol::{self, Command, MapList};

/// Link timing
#[derive(Clone, Debug, PartialEq)]
pub struct LinkConfig {
    /// Deadline for each wake/list/shutdown reply
    pub command_timeout: Duration,
    /// Deadline for a full map download
    pub download_timeout: Duration,
    /// Silence after data that ends a download
    pub idle_gap: Duration,
    /// Pause between empty reads
    pub poll_interval: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            command_timeout: Duration::from_millis(2000),
            download_timeout: Duration::from_millis(10000),
            idle_gap: Duration::from_millis(500),
            poll_interval: Duration::from_millis(5),
        }
    }
}

/// Session state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkState {
    /// Connected, base not yet in machine mode
    Idle,
    /// Base acknowledged the wake sequence
    Awake,
    /// Waiting for the map list
    Listing,
    /// Receiving map data
    Downloading,
    /// A map was downloaded
    Done,
    /// A request failed; the session is unusable
    Failed,
}

/// How a read loop ended
#[derive(Debug, PartialEq, Eq)]
enum ReadEnd {
    Complete,
    Idle,
    Deadline,
}

/// Request/response session over a [`Transport`]
pub struct MapLink<T: Transport> {
    transport: T,
    config: LinkConfig,
    state: LinkState,
    rx: Vec<u8>,
}

impl<T: Transport> MapLink<T> {
    /// Wrap an open transport
    pub fn new(transport: T, config: LinkConfig) -> Self {
        Self {
            transport,
            config,
            state: LinkState::Idle,
            rx: Vec::new(),
        }
    }

    /// Current session state
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Put the base into machine mode.
    ///
    /// The base does not acknowledge every wake command, so a missing ack is
    /// logged and the sequence continues.
    pub fn wake(&mut self) -> Result<()> {
        self.ensure_usable()?;
        for cmd in protocol::wake_sequence() {
            let acked = self.command(&cmd)?;
            if !acked {
                log::warn!("No acknowledgement for {}", cmd.encode().trim_end());
            }
        }
        self.state = LinkState::Awake;
        log::info!("Base awake");
        Ok(())
    }

    /// Ask the base which maps it holds
    pub fn list_maps(&mut self) -> Result<MapList> {
        self.ensure_awake()?;
        self.state = LinkState::Listing;

        let result = self.request_map_list();
        match result {
            Ok(list) => {
                self.state = LinkState::Awake;
                log::info!("Found {} maps: {:?}", list.map_num, list.map_ids);
                Ok(list)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn request_map_list(&mut self) -> Result<MapList> {
        self.send(&Command::GetMapList)?;
        let deadline = Instant::now() + self.config.command_timeout;
        let end = self.read_until(deadline, None, |buf| {
            protocol::find_json_object(buf).is_some()
        })?;
        if end != ReadEnd::Complete {
            return Err(Error::Timeout("no map list from base".to_string()));
        }

        let list = protocol::parse_map_list(&self.rx)?;
        if list.map_ids.is_empty() {
            return Err(Error::Device("no maps available".to_string()));
        }
        Ok(list)
    }

    /// Download the envelope text for `map_id` as received
    pub fn download_envelope(&mut self, map_id: &str) -> Result<Vec<u8>> {
        self.ensure_awake()?;
        self.state = LinkState::Downloading;

        match self.receive_map(map_id) {
            Ok(data) => {
                self.state = LinkState::Done;
                Ok(data)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn receive_map(&mut self, map_id: &str) -> Result<Vec<u8>> {
        self.send(&Command::GetMap(map_id.to_string()))?;
        let deadline = Instant::now() + self.config.download_timeout;
        let end = self.read_until(deadline, Some(self.config.idle_gap), |buf| {
            protocol::find_json_object(buf).is_some()
        })?;

        if self.rx.is_empty() {
            return Err(Error::Timeout(format!("no data for map {}", map_id)));
        }
        log::info!(
            "Received {} bytes for map {} ({:?})",
            self.rx.len(),
            map_id,
            end
        );

        let data = std::mem::take(&mut self.rx);
        Ok(match protocol::find_json_object(&data) {
            Some(range) => data[range].to_vec(),
            None => data,
        })
    }

    /// Download `map_id` and unwrap its envelope into a raw frame
    pub fn download(&mut self, map_id: &str) -> Result<Vec<u8>> {
        let text = self.download_envelope(map_id)?;
        let (kind, frame) = envelope::unwrap_frame(&text)?;
        log::debug!("Map {} arrived as {:?} envelope", map_id, kind);
        Ok(frame)
    }

    /// Return the base to normal mode
    pub fn shutdown(&mut self) -> Result<()> {
        if self.state == LinkState::Idle {
            return Ok(());
        }
        let acked = self.command(&Command::Machine(false))?;
        if !acked {
            log::warn!("No acknowledgement for MACHINE,0");
        }
        self.state = LinkState::Idle;
        Ok(())
    }

    /// Send `cmd` and wait for an acknowledgement
    fn command(&mut self, cmd: &Command) -> Result<bool> {
        self.send(cmd)?;
        let deadline = Instant::now() + self.config.command_timeout;
        let end = self.read_until(deadline, None, protocol::is_ack)?;
        Ok(end == ReadEnd::Complete)
    }

    fn send(&mut self, cmd: &Command) -> Result<()> {
        self.rx.clear();
        let wire = cmd.encode();
        log::debug!("Sending {}", wire.trim_end());
        self.transport.send_all(wire.as_bytes())
    }

    /// Accumulate into `rx` until `complete` holds, the line idles for
    /// `idle_gap` after data, or `deadline` passes.
    fn read_until<F>(
        &mut self,
        deadline: Instant,
        idle_gap: Option<Duration>,
        complete: F,
    ) -> Result<ReadEnd>
    where
        F: Fn(&[u8]) -> bool,
    {
        let mut chunk = [0u8; 4096];
        let mut last_data: Option<Instant> = None;

        loop {
            let n = self.transport.read(&mut chunk)?;
            if n > 0 {
                self.rx.extend_from_slice(&chunk[..n]);
                last_data = Some(Instant::now());
                if complete(&self.rx) {
                    return Ok(ReadEnd::Complete);
                }
                continue;
            }

            if let (Some(gap), Some(at)) = (idle_gap, last_data)
                && at.elapsed() >= gap
            {
                return Ok(ReadEnd::Idle);
            }
            if Instant::now() >= deadline {
                return Ok(ReadEnd::Deadline);
            }
            std::thread::sleep(self.config.poll_interval);
        }
    }

    fn ensure_usable(&self) -> Result<()> {
        if self.state == LinkState::Failed {
            return Err(Error::Device(
                "link failed earlier; reconnect to retry".to_string(),
            ));
        }
        Ok(())
    }

    fn ensure_awake(&mut self) -> Result<()> {
        self.ensure_usable()?;
        if self.state == LinkState::Idle {
            self.wake()?;
        }
        Ok(())
    }

    fn fail(&mut self, err: Error) -> Error {
        log::error!("Map link failed in {:?}: {}", self.state, err);
        self.state = LinkState::Failed;
        err
    }
}

impl<T: Transport> FrameSource for MapLink<T> {
    /// `identifier` is a map id; empty selects the first listed map.
    fn fetch_frame(&mut self, identifier: &str) -> Result<Vec<u8>> {
        let map_id = if identifier.is_empty() {
            let list = self.list_maps()?;
            let first = list
                .map_ids
                .into_iter()
                .next()
                .ok_or_else(|| Error::Device("no maps available".to_string()))?;
            log::info!("No map specified, defaulting to first one: {}", first);
            first
        } else {
            identifier.to_string()
        };
        self.download(&map_id)
    }
}

impl<T: Transport> Drop for MapLink<T> {
    fn drop(&mut self) {
        if matches!(self.state, LinkState::Idle | LinkState::Failed) {
            return;
        }
        // Best effort; nothing to report to on drop
        let wire = Command::Machine(false).encode();
        if let Err(e) = self.transport.send_all(wire.as_bytes()) {
            log::warn!("Failed to release base on drop: {}", e);
        }
    }
}
