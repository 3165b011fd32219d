//! Transport abstraction for the connection shell.
//!
//! The crate never owns a socket. The surrounding connection shell (a TCP
//! accept loop, a test harness, ...) hands an implementation of
//! [`Transport`] to [`Ism8::connection_made`](crate::Ism8::connection_made)
//! and feeds received bytes into
//! [`Ism8::on_data_received`](crate::Ism8::on_data_received); the core only
//! ever pushes complete outbound frames through this trait.
//!
//! Writes are fire-and-forget: the object-server protocol has no
//! application-level reply to wait for on the write path, so the trait is
//! synchronous and returns as soon as the frame is handed to the shell.
//!
//! ## Testing
//!
//! [`MockTransport`] records every frame it is given and is used by the
//! unit and integration tests to assert on the exact bytes that would have
//! gone out on the wire.

use crate::error::{Ism8Error, Result};

/// Byte sink for outbound object-server frames.
pub trait Transport {
    /// Hand one complete frame to the connection shell for transmission.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot accept the frame (connection
    /// torn down, buffer exhausted). The core treats this as a failed
    /// write and does not retry.
    fn write(&mut self, frame: &[u8]) -> Result<()>;
}

/// Maximum frame size the mock records. Outbound frames are small: the
/// acknowledgment is 17 bytes, a write frame at most 24.
const MOCK_FRAME_CAP: usize = 32;

/// Recording transport for tests.
///
/// Stores every written frame in order, bounded so it stays usable without
/// an allocator.
#[derive(Debug, Default)]
pub struct MockTransport {
    sent: heapless::Vec<heapless::Vec<u8, MOCK_FRAME_CAP>, 16>,
    fail_writes: bool,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make all subsequent writes fail, simulating a dead connection.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// All frames written so far, in order.
    pub fn sent_frames(&self) -> &[heapless::Vec<u8, MOCK_FRAME_CAP>] {
        &self.sent
    }

    /// The last frame written, if any.
    pub fn last_sent(&self) -> Option<&[u8]> {
        self.sent.last().map(heapless::Vec::as_slice)
    }

    /// Number of frames written.
    pub fn sent_count(&self) -> usize {
        self.sent.len()
    }

    /// Forget all recorded frames.
    pub fn clear(&mut self) {
        self.sent.clear();
    }
}

impl Transport for MockTransport {
    fn write(&mut self, frame: &[u8]) -> Result<()> {
        if self.fail_writes {
            return Err(Ism8Error::send_failed());
        }

        let mut stored = heapless::Vec::new();
        stored
            .extend_from_slice(frame)
            .map_err(|_overflow| Ism8Error::send_failed())?;
        self.sent
            .push(stored)
            .map_err(|_full| Ism8Error::send_failed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_in_order() {
        let mut mock = MockTransport::new();
        mock.write(&[0x01, 0x02]).unwrap();
        mock.write(&[0x03]).unwrap();

        assert_eq!(mock.sent_count(), 2);
        assert_eq!(mock.sent_frames()[0].as_slice(), &[0x01, 0x02]);
        assert_eq!(mock.last_sent().unwrap(), &[0x03]);
    }

    #[test]
    fn test_mock_failing_writes() {
        let mut mock = MockTransport::new();
        mock.set_fail_writes(true);
        assert!(mock.write(&[0x01]).is_err());
        assert_eq!(mock.sent_count(), 0);
    }

    #[test]
    fn test_mock_clear() {
        let mut mock = MockTransport::new();
        mock.write(&[0x01]).unwrap();
        mock.clear();
        assert!(mock.last_sent().is_none());
    }
}
