//! Scripted mock transport for testing

use super::Transport;
use crate::error::Result;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mock transport that answers writes from a script.
///
/// Clones share state, so a test can keep a handle after moving one into
/// the code under test.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Default)]
struct MockTransportInner {
    read_buffer: VecDeque<u8>,
    write_buffer: Vec<u8>,
    /// (trigger, reply) pairs; first matching trigger wins
    script: Vec<(Vec<u8>, Vec<u8>)>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockTransportInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue `reply` for reading whenever a write starts with `trigger`
    pub fn respond_to(&self, trigger: &str, reply: &[u8]) {
        self.lock()
            .script
            .push((trigger.as_bytes().to_vec(), reply.to_vec()));
    }

    /// Get all written data
    pub fn get_written(&self) -> Vec<u8> {
        self.lock().write_buffer.clone()
    }

    /// Written data split into CRLF-terminated commands
    pub fn written_commands(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.get_written())
            .split("\r\n")
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Clear written data
    pub fn clear_written(&self) {
        self.lock().write_buffer.clear();
    }
}

impl Transport for MockTransport {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let mut inner = self.lock();
        let n = inner.read_buffer.len().min(buffer.len());
        for (slot, byte) in buffer.iter_mut().zip(inner.read_buffer.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        let mut inner = self.lock();
        inner.write_buffer.extend_from_slice(data);
        let reply = inner
            .script
            .iter()
            .find(|(trigger, _)| data.starts_with(trigger))
            .map(|(_, reply)| reply.clone());
        if let Some(reply) = reply {
            inner.read_buffer.extend(reply);
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn available(&mut self) -> Result<usize> {
        Ok(self.lock().read_buffer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_reply() {
        let mock = MockTransport::new();
        mock.respond_to("PING", b"OK\r\n");

        let mut transport = mock.clone();
        transport.send_all(b"PING\r\n").unwrap();
        transport.send_all(b"INIT\r\n").unwrap();

        let mut buf = [0u8; 16];
        let n = transport.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"OK\r\n");
        assert_eq!(transport.read(&mut buf).unwrap(), 0);
        assert_eq!(mock.written_commands(), vec!["PING", "INIT"]);
    }
}
