//! ISM8 endpoint: value store, receive path and write path.
//!
//! [`Ism8`] is the passive protocol endpoint behind one gateway
//! connection. The surrounding connection shell owns the TCP socket; it
//! hands the transport over on connect, feeds every received buffer into
//! [`Ism8::on_data_received`] and takes the transport back on disconnect.
//!
//! Received frames are split, their datapoint records decoded through the
//! catalog into the value store, and each successfully decoded frame is
//! acknowledged. Writes run the full validation chain before anything is
//! encoded or transmitted.
//!
//! All state is instance-scoped. Mutation happens only in the caller's
//! event context; the type itself takes no locks, so an embedder that
//! reads from other threads has to wrap the instance in its own mutex.

use crate::catalog;
use crate::dpt::{DpValue, DptType};
use crate::error::{Ism8Error, Result};
use crate::protocol::constants::REQUEST_ALL_FRAME;
use crate::protocol::frame::{self, DatapointRecords, FrameSplitter};
use crate::transport::Transport;

/// Value store capacity; must be a power of two and exceed the catalog size.
const VALUE_STORE_CAP: usize = 512;

/// Callback registry capacity.
const CALLBACK_CAP: usize = 32;

/// Scratch size for outbound write frames (20-byte envelope + value).
const WRITE_FRAME_CAP: usize = 24;

/// Notification hook invoked after a datapoint value arrived from the
/// gateway and was stored.
pub type DpCallback = fn(dp_id: u16, value: &DpValue);

/// Encode an application value into the wire bytes for one datapoint.
///
/// Pure helper: consults the catalog for the type tag and dispatches to
/// the codec, without touching connection state or the value store.
pub fn encode_datapoint(dp_id: u16, value: &DpValue) -> Result<heapless::Vec<u8, 4>> {
    let Some(dp) = catalog::lookup(dp_id) else {
        ism8_log!(error, "cannot encode unknown datapoint {}", dp_id);
        return Err(Ism8Error::unknown_datapoint());
    };

    let mut buf = [0u8; 4];
    let len = dp.dpt.encode(value, &mut buf)?;
    let mut encoded = heapless::Vec::new();
    encoded
        .extend_from_slice(&buf[..len])
        .map_err(|_overflow| Ism8Error::buffer_too_small())?;
    Ok(encoded)
}

/// Protocol endpoint for one ISM8 gateway connection.
pub struct Ism8<T: Transport> {
    /// Last-known decoded value per datapoint id
    values: heapless::index_map::FnvIndexMap<u16, DpValue, VALUE_STORE_CAP>,
    /// Per-datapoint update hooks
    callbacks: heapless::index_map::FnvIndexMap<u16, DpCallback, CALLBACK_CAP>,
    transport: Option<T>,
    connected: bool,
}

impl<T: Transport> core::fmt::Debug for Ism8<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ism8")
            .field("connected", &self.connected)
            .field("stored_values", &self.values.len())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Default for Ism8<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Ism8<T> {
    /// Create an endpoint with no active connection and an empty store.
    pub fn new() -> Self {
        Self {
            values: heapless::index_map::FnvIndexMap::new(),
            callbacks: heapless::index_map::FnvIndexMap::new(),
            transport: None,
            connected: false,
        }
    }

    // =========================================================================
    // Connection lifecycle (driven by the shell)
    // =========================================================================

    /// Take ownership of the transport once the gateway has connected.
    pub fn connection_made(&mut self, transport: T) {
        ism8_log!(info, "connection from ISM8 established");
        self.transport = Some(transport);
        self.connected = true;
    }

    /// Release the transport after the connection ended. In-flight decodes
    /// are unaffected; subsequent writes fail with `NotConnected`.
    pub fn connection_lost(&mut self) -> Option<T> {
        ism8_log!(debug, "ISM8 closed the connection");
        self.connected = false;
        self.transport.take()
    }

    /// Whether a gateway connection is currently active.
    pub fn connected(&self) -> bool {
        self.connected
    }

    /// Borrow the attached transport, if any.
    pub fn transport(&self) -> Option<&T> {
        self.transport.as_ref()
    }

    // =========================================================================
    // Receive path
    // =========================================================================

    /// Process one received buffer: split it into frames, decode every
    /// datapoint record and acknowledge each cleanly decoded frame.
    ///
    /// Returns the number of successfully decoded frames. A frame whose
    /// payload is faulty is skipped without an acknowledgment (the gateway
    /// will resend it) and later frames in the buffer are still processed.
    ///
    /// # Errors
    ///
    /// Structural buffer errors (`NoSignatureFound`, `TruncatedHeader`,
    /// `IncompleteFrame`) abort processing of this buffer only; the
    /// connection stays usable. On `IncompleteFrame` the shell should
    /// buffer the tail and retry once more data has arrived.
    pub fn on_data_received(&mut self, data: &[u8]) -> Result<usize> {
        ism8_log!(debug, "received {} bytes from ISM8", data.len());

        let mut processed = 0;
        for item in FrameSplitter::new(data) {
            let frame = item?;
            match self.process_datapoint_frame(frame.payload()) {
                Ok(()) => {
                    if let Some(echo) = frame.ack_echo() {
                        let ack = frame::build_ack(echo);
                        if let Some(transport) = self.transport.as_mut() {
                            transport.write(&ack)?;
                        }
                    }
                    processed += 1;
                }
                Err(err) => {
                    ism8_log!(info, "message faulty, no ACK sent: {}", err);
                }
            }
        }
        Ok(processed)
    }

    /// Walk the records of one frame payload and store their values.
    fn process_datapoint_frame(&mut self, payload: &[u8]) -> Result<()> {
        for record in DatapointRecords::new(payload)? {
            let record = record?;
            self.decode_datapoint(record.id, record.value);
        }
        Ok(())
    }

    /// Decode one datapoint's raw value bytes and store the result.
    ///
    /// Unknown ids, sentinel floats, unmapped enumeration numbers and
    /// implausible power/flow readings are skipped; none of them is an
    /// error for the surrounding frame.
    pub fn decode_datapoint(&mut self, dp_id: u16, raw: &[u8]) {
        let Some(dp) = catalog::lookup(dp_id) else {
            ism8_log!(info, "unknown datapoint {}, skipping {} value bytes", dp_id, raw.len());
            return;
        };

        if raw.is_empty() || raw.len() > 4 {
            ism8_log!(debug, "datapoint {}: implausible value width {}", dp_id, raw.len());
            return;
        }

        let mut accumulated: u32 = 0;
        for byte in raw {
            accumulated = accumulated << 8 | u32::from(*byte);
        }

        let value = match dp.dpt.decode(accumulated) {
            Ok(value) => value,
            Err(err) => {
                ism8_log!(debug, "datapoint {}: discarding sample: {}", dp_id, err);
                return;
            }
        };

        // Implausible readings show up on the bus occasionally; origin
        // unclear. Threshold taken from field observations.
        if matches!(dp.dpt, DptType::Power | DptType::FlowRate) {
            if let DpValue::Float(reading) = value {
                if !(-1000.0..=1000.0).contains(&reading) {
                    ism8_log!(debug, "datapoint {}: discarding out-of-range reading", dp_id);
                    return;
                }
            }
        }

        self.store_received(dp_id, value);
    }

    fn store_received(&mut self, dp_id: u16, value: DpValue) {
        if self.values.insert(dp_id, value).is_err() {
            ism8_log!(error, "value store full, dropping datapoint {}", dp_id);
            return;
        }
        if let Some(callback) = self.callbacks.get(&dp_id) {
            callback(dp_id, &value);
        }
    }

    /// Last-known value of a datapoint, if one has been seen or written.
    pub fn read_value(&self, dp_id: u16) -> Option<DpValue> {
        self.values.get(&dp_id).copied()
    }

    // =========================================================================
    // Write path
    // =========================================================================

    /// Validate, encode and transmit a value for a writable datapoint.
    ///
    /// Validation runs first (known id, writable, matching representation,
    /// allowed range), then the connection check; nothing is transmitted
    /// and the store is untouched unless every step passes. After a
    /// successful transmission the store caches the application-level
    /// value as given, not a re-decode of the wire bytes.
    pub fn send_value(&mut self, dp_id: u16, value: DpValue) -> Result<()> {
        if let Err(err) = catalog::validate_dp_range(dp_id, &value) {
            ism8_log!(error, "rejecting write to datapoint {}: {}", dp_id, err);
            return Err(err);
        }

        if !self.connected || self.transport.is_none() {
            ism8_log!(error, "no connection to ISM8 module");
            return Err(Ism8Error::not_connected());
        }

        let encoded = encode_datapoint(dp_id, &value)?;
        let mut buf = [0u8; WRITE_FRAME_CAP];
        let len = frame::build_write_frame(dp_id, &encoded, &mut buf)?;

        ism8_log!(debug, "writing datapoint {} ({} value bytes)", dp_id, encoded.len());
        if let Some(transport) = self.transport.as_mut() {
            transport.write(&buf[..len])?;
        }

        // Optimistic local update; no callback for self-initiated writes
        if self.values.insert(dp_id, value).is_err() {
            ism8_log!(error, "value store full, dropping datapoint {}", dp_id);
        }
        Ok(())
    }

    /// Ask the gateway to push the current value of every datapoint.
    pub fn request_all_datapoints(&mut self) -> Result<()> {
        let Some(transport) = self.transport.as_mut() else {
            return Err(Ism8Error::not_connected());
        };
        ism8_log!(debug, "requesting refresh of all datapoints");
        transport.write(&REQUEST_ALL_FRAME)
    }

    // =========================================================================
    // Update notifications
    // =========================================================================

    /// Register a hook that fires whenever the gateway reports a new value
    /// for the datapoint. Replaces a previously registered hook.
    pub fn register_callback(&mut self, dp_id: u16, callback: DpCallback) -> Result<()> {
        self.callbacks
            .insert(dp_id, callback)
            .map(|_previous| ())
            .map_err(|_full| Ism8Error::buffer_too_small())
    }

    /// Remove the update hook of a datapoint, if one was registered.
    pub fn remove_callback(&mut self, dp_id: u16) {
        self.callbacks.remove(&dp_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    fn connected_endpoint() -> Ism8<MockTransport> {
        let mut ism8 = Ism8::new();
        ism8.connection_made(MockTransport::new());
        ism8
    }

    fn assert_float_value(value: Option<DpValue>, expected: f32) {
        match value {
            Some(DpValue::Float(f)) => {
                assert!((f - expected).abs() < 0.001, "expected {expected}, got {f}");
            }
            other => panic!("expected float value, got {other:?}"),
        }
    }

    #[test]
    fn test_connection_lifecycle() {
        let mut ism8: Ism8<MockTransport> = Ism8::new();
        assert!(!ism8.connected());

        ism8.connection_made(MockTransport::new());
        assert!(ism8.connected());

        let transport = ism8.connection_lost();
        assert!(transport.is_some());
        assert!(!ism8.connected());
        assert!(ism8.send_value(72, DpValue::Bool(true)).is_err());
    }

    #[test]
    fn test_receive_stores_and_acks() {
        let mut ism8 = connected_endpoint();
        let data: &[u8] = &[
            0x06, 0x20, 0xF0, 0x80, 0x00, 0x16, 0x04, 0x00, 0x00, 0x00, 0xF0, 0x06, 0x00, 0xB2,
            0x00, 0x01, 0x00, 0xB2, 0x03, 0x02, 0x02, 0x62,
        ];
        assert_eq!(ism8.on_data_received(data).unwrap(), 1);
        assert_float_value(ism8.read_value(178), 6.1);

        let transport = ism8.transport().unwrap();
        assert_eq!(transport.sent_count(), 1);
        let ack = transport.last_sent().unwrap();
        assert_eq!(ack.len(), 17);
        assert_eq!(ack[12], 0x00);
        assert_eq!(ack[13], 0xB2);
    }

    #[test]
    fn test_receive_zero_length_record_no_ack() {
        let mut ism8 = connected_endpoint();
        let data: &[u8] = &[
            0x06, 0x20, 0xF0, 0x80, 0x00, 0x14, 0x04, 0x00, 0x00, 0x00, 0xF0, 0x06, 0x00, 0xB2,
            0x00, 0x01, 0x00, 0xB2, 0x03, 0x00,
        ];
        // The buffer itself is well-formed, so the call succeeds...
        assert_eq!(ism8.on_data_received(data).unwrap(), 0);
        // ...but the faulty frame is neither stored nor acknowledged
        assert!(ism8.read_value(178).is_none());
        assert_eq!(ism8.transport().unwrap().sent_count(), 0);
    }

    #[test]
    fn test_receive_without_transport_still_decodes() {
        let mut ism8: Ism8<MockTransport> = Ism8::new();
        let data: &[u8] = &[
            0x06, 0x20, 0xF0, 0x80, 0x00, 0x15, 0x04, 0x00, 0x00, 0x00, 0xF0, 0x06, 0x00, 0xB2,
            0x00, 0x01, 0x00, 0xB2, 0x03, 0x01, 0x0A,
        ];
        assert_eq!(ism8.on_data_received(data).unwrap(), 1);
        assert_float_value(ism8.read_value(178), 0.1);
    }

    #[test]
    fn test_receive_no_signature() {
        let mut ism8 = connected_endpoint();
        let err = ism8.on_data_received(&[0x00, 0x01, 0x02]).unwrap_err();
        assert!(matches!(err, Ism8Error::Frame(e) if e.is_no_signature()));
        // The connection survives structural errors
        assert!(ism8.connected());
    }

    #[test]
    fn test_decode_unknown_datapoint_is_skipped() {
        let mut ism8 = connected_endpoint();
        ism8.decode_datapoint(9999, &[0x01]);
        assert!(ism8.read_value(9999).is_none());
    }

    #[test]
    fn test_decode_sentinel_float_is_skipped() {
        let mut ism8 = connected_endpoint();
        ism8.decode_datapoint(178, &[0x07, 0xFF]);
        assert!(ism8.read_value(178).is_none());
    }

    #[test]
    fn test_decode_implausible_power_is_skipped() {
        let mut ism8 = connected_endpoint();
        // 0x7ECF: exponent 15, mantissa 1743 -> far over the threshold
        ism8.decode_datapoint(175, &[0x7E, 0xCF]);
        assert!(ism8.read_value(175).is_none());
        // A plausible reading on the same id is stored
        ism8.decode_datapoint(175, &[0x02, 0x62]);
        assert_float_value(ism8.read_value(175), 6.1);
    }

    #[test]
    fn test_decode_implausible_flow_rate_is_skipped() {
        let mut ism8 = connected_endpoint();
        // 20_000_000 * 0.0001 = 2000 m³/h, over threshold
        ism8.decode_datapoint(93, &[0x01, 0x31, 0x2D, 0x00]);
        assert!(ism8.read_value(93).is_none());
    }

    #[test]
    fn test_send_value_happy_path() {
        let mut ism8 = connected_endpoint();
        ism8.send_value(72, DpValue::Bool(true)).unwrap();

        assert_eq!(ism8.read_value(72), Some(DpValue::Bool(true)));
        let sent = ism8.transport().unwrap().last_sent().unwrap().to_vec();
        assert_eq!(sent.len(), 21);
        assert_eq!(&sent[10..12], &[0xF0, 0xC1]);
        assert_eq!(&sent[16..18], &[0x00, 0x48]);
        assert_eq!(sent[20], 0x01);
    }

    #[test]
    fn test_send_value_rejects_before_transmitting() {
        let mut ism8 = connected_endpoint();

        // Read-only id
        assert!(ism8.send_value(1, DpValue::Bool(true)).is_err());
        // Label outside the allowed set
        assert!(ism8.send_value(57, DpValue::Text("Comfort")).is_err());
        // Wrong representation
        assert!(ism8.send_value(56, DpValue::Bool(true)).is_err());

        assert_eq!(ism8.transport().unwrap().sent_count(), 0);
        assert!(ism8.read_value(1).is_none());
        assert!(ism8.read_value(57).is_none());
    }

    #[test]
    fn test_send_value_not_connected() {
        let mut ism8: Ism8<MockTransport> = Ism8::new();
        let err = ism8.send_value(72, DpValue::Bool(true)).unwrap_err();
        assert!(matches!(err, Ism8Error::Transport(e) if e.is_not_connected()));
        assert!(ism8.read_value(72).is_none());
    }

    #[test]
    fn test_send_value_failed_write_leaves_store_untouched() {
        let mut ism8 = connected_endpoint();
        // Simulate a dead socket under an allegedly live connection
        let mut transport = ism8.connection_lost().unwrap();
        transport.set_fail_writes(true);
        ism8.connection_made(transport);

        assert!(ism8.send_value(72, DpValue::Bool(true)).is_err());
        assert!(ism8.read_value(72).is_none());
    }

    #[test]
    fn test_request_all_datapoints() {
        let mut ism8 = connected_endpoint();
        ism8.request_all_datapoints().unwrap();
        assert_eq!(
            ism8.transport().unwrap().last_sent().unwrap(),
            &REQUEST_ALL_FRAME
        );

        ism8.connection_lost();
        assert!(ism8.request_all_datapoints().is_err());
    }

    #[test]
    fn test_callbacks_fire_on_received_values_only() {
        use core::sync::atomic::{AtomicUsize, Ordering};
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        fn count_update(_dp_id: u16, _value: &DpValue) {
            CALLS.fetch_add(1, Ordering::SeqCst);
        }

        CALLS.store(0, Ordering::SeqCst);
        let mut ism8 = connected_endpoint();
        ism8.register_callback(72, count_update).unwrap();

        // Self-initiated write: cache update without notification
        ism8.send_value(72, DpValue::Bool(true)).unwrap();
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);

        // Gateway-reported value: notification fires
        ism8.decode_datapoint(72, &[0x00]);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);

        ism8.remove_callback(72);
        ism8.decode_datapoint(72, &[0x01]);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_encode_datapoint_helper() {
        let encoded = encode_datapoint(56, &DpValue::Float(51.8)).unwrap();
        assert_eq!(encoded.as_slice(), &[0x15, 0x0F]);

        assert!(encode_datapoint(9999, &DpValue::Bool(true)).is_err());
        assert!(encode_datapoint(177, &DpValue::Text("GibtsNicht")).is_err());
    }
}
