//! ISM8 object-server frame parsing and building.
//!
//! This module provides zero-copy splitting of a TCP read buffer into
//! object-server frames, a walker for the datapoint records inside a frame
//! payload, and builders for the outbound acknowledgment and write frames.
//!
//! ## Frame Structure
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │  Signature (4 bytes)            │  06 20 F0 80
//! ├─────────────────────────────────┤
//! │  Total Length (2 bytes, BE)     │  includes everything below
//! ├─────────────────────────────────┤
//! │  Sub-header (4 bytes)           │  04 00 00 00
//! ├─────────────────────────────────┤
//! │  Service Code (2 bytes, BE)     │  e.g. F0 06
//! │  Service payload (variable)     │
//! └─────────────────────────────────┘
//! ```
//!
//! For the datapoint service the payload continues with a 2-byte start id,
//! a 2-byte record count and `count` records of the form
//! `id(2B,BE) | command(1B) | length(1B) | value(length B)`.
//!
//! One TCP read may carry zero, one or many frames and may end in the
//! middle of one. The splitter never panics on malformed input: structural
//! problems are reported as errors and end iteration for that buffer.

use crate::error::{Ism8Error, Result};
use crate::protocol::constants::{
    ACK_ECHO_OFFSET, ACK_FRAME_TEMPLATE, CONNECTION_HEADER, DP_COMMAND_SET_VALUE,
    FIRST_RECORD_OFFSET, FIXED_HEADER_LEN, FRAME_SIGNATURE, LENGTH_OFFSET, RECORD_COUNT_OFFSET,
    ServiceCode,
};

/// Zero-copy view of one complete object-server frame.
#[derive(Debug, Clone, Copy)]
pub struct ObjectServerFrame<'a> {
    data: &'a [u8],
}

impl<'a> ObjectServerFrame<'a> {
    /// Get the complete frame bytes, signature included.
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Get the service code (bytes 10-11), if the frame carries one.
    pub fn service_code(&self) -> Option<u16> {
        let high = *self.data.get(FIXED_HEADER_LEN)?;
        let low = *self.data.get(FIXED_HEADER_LEN + 1)?;
        Some(u16::from_be_bytes([high, low]))
    }

    /// Get the service payload: everything after the fixed 10-byte header,
    /// starting at the service code.
    pub fn payload(&self) -> &'a [u8] {
        &self.data[FIXED_HEADER_LEN..]
    }

    /// Get the 2-byte field an acknowledgment has to echo back (frame
    /// bytes 12-13), if present.
    pub fn ack_echo(&self) -> Option<[u8; 2]> {
        let first = *self.data.get(ACK_ECHO_OFFSET)?;
        let second = *self.data.get(ACK_ECHO_OFFSET + 1)?;
        Some([first, second])
    }
}

/// Stateless splitter that cuts one receive buffer into frames.
///
/// Yields each structurally complete frame in order. A structural error
/// (`NoSignatureFound`, `TruncatedHeader`, `IncompleteFrame`,
/// `InvalidLength`) is yielded once and ends iteration; the caller decides
/// whether to buffer and retry with more data. Trailing bytes after the
/// last complete frame that contain no further signature simply end
/// iteration.
#[derive(Debug)]
pub struct FrameSplitter<'a> {
    data: &'a [u8],
    cursor: usize,
    yielded_any: bool,
    done: bool,
}

impl<'a> FrameSplitter<'a> {
    /// Create a splitter over one receive buffer.
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            cursor: 0,
            yielded_any: false,
            done: false,
        }
    }

    fn find_signature(&self, from: usize) -> Option<usize> {
        if from >= self.data.len() {
            return None;
        }
        self.data[from..]
            .windows(FRAME_SIGNATURE.len())
            .position(|window| window == FRAME_SIGNATURE)
            .map(|pos| pos + from)
    }
}

impl<'a> Iterator for FrameSplitter<'a> {
    type Item = Result<ObjectServerFrame<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let Some(start) = self.find_signature(self.cursor) else {
            self.done = true;
            // A buffer without any signature is an error; leftover bytes
            // after processed frames just end the iteration.
            if self.yielded_any {
                return None;
            }
            return Some(Err(Ism8Error::no_signature_found()));
        };

        let remaining = self.data.len() - start;
        if remaining < FIXED_HEADER_LEN {
            self.done = true;
            return Some(Err(Ism8Error::truncated_header()));
        }

        let frame_len = usize::from(u16::from_be_bytes([
            self.data[start + LENGTH_OFFSET],
            self.data[start + LENGTH_OFFSET + 1],
        ]));
        if frame_len < FIXED_HEADER_LEN {
            self.done = true;
            return Some(Err(Ism8Error::invalid_length()));
        }
        if remaining < frame_len {
            self.done = true;
            return Some(Err(Ism8Error::incomplete_frame()));
        }

        self.cursor = start + frame_len;
        self.yielded_any = true;
        Some(Ok(ObjectServerFrame {
            data: &self.data[start..start + frame_len],
        }))
    }
}

/// One datapoint record from a frame payload.
#[derive(Debug, Clone, Copy)]
pub struct DatapointRecord<'a> {
    /// Datapoint id
    pub id: u16,
    /// Command byte (0x03 for value transport)
    pub command: u8,
    /// Raw value bytes, big-endian
    pub value: &'a [u8],
}

/// Walker over the datapoint records of one frame payload.
///
/// A record with zero value length, an unexpected command byte or a header
/// running past the payload is malformed and poisons the rest of the
/// frame: the error is yielded once and the remaining records are not
/// visited.
#[derive(Debug)]
pub struct DatapointRecords<'a> {
    payload: &'a [u8],
    offset: usize,
    remaining: u16,
    poisoned: bool,
}

impl<'a> DatapointRecords<'a> {
    /// Create a record walker over one frame payload.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRecord` if the payload is too short to carry a
    /// record count.
    pub fn new(payload: &'a [u8]) -> Result<Self> {
        if payload.len() < FIRST_RECORD_OFFSET {
            return Err(Ism8Error::malformed_record());
        }
        let count = u16::from_be_bytes([
            payload[RECORD_COUNT_OFFSET],
            payload[RECORD_COUNT_OFFSET + 1],
        ]);
        Ok(Self {
            payload,
            offset: FIRST_RECORD_OFFSET,
            remaining: count,
            poisoned: false,
        })
    }
}

impl<'a> Iterator for DatapointRecords<'a> {
    type Item = Result<DatapointRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.poisoned || self.remaining == 0 {
            return None;
        }

        if self.offset + 4 > self.payload.len() {
            self.poisoned = true;
            return Some(Err(Ism8Error::malformed_record()));
        }

        let id = u16::from_be_bytes([self.payload[self.offset], self.payload[self.offset + 1]]);
        let command = self.payload[self.offset + 2];
        let length = usize::from(self.payload[self.offset + 3]);

        if length == 0 || command != DP_COMMAND_SET_VALUE {
            self.poisoned = true;
            return Some(Err(Ism8Error::malformed_record()));
        }

        let value_start = self.offset + 4;
        let value_end = value_start + length;
        if value_end > self.payload.len() {
            self.poisoned = true;
            return Some(Err(Ism8Error::malformed_record()));
        }

        self.offset = value_end;
        self.remaining -= 1;
        Some(Ok(DatapointRecord {
            id,
            command,
            value: &self.payload[value_start..value_end],
        }))
    }
}

/// Build the 17-byte acknowledgment for a received frame.
pub fn build_ack(echo: [u8; 2]) -> [u8; 17] {
    let mut frame = ACK_FRAME_TEMPLATE;
    frame[ACK_ECHO_OFFSET] = echo[0];
    frame[ACK_ECHO_OFFSET + 1] = echo[1];
    frame
}

/// Build a write frame carrying one encoded datapoint value.
///
/// Layout: signature, total length, sub-header, write service, start id,
/// record count (1), then one record `id | command(0) | length | value`.
/// Returns the total frame length.
pub fn build_write_frame(dp_id: u16, value: &[u8], buf: &mut [u8]) -> Result<usize> {
    let total = 20 + value.len();
    if value.len() > usize::from(u8::MAX) {
        return Err(Ism8Error::invalid_value());
    }
    if buf.len() < total {
        return Err(Ism8Error::buffer_too_small());
    }

    buf[..4].copy_from_slice(&FRAME_SIGNATURE);
    buf[4..6].copy_from_slice(&(total as u16).to_be_bytes());
    buf[6..10].copy_from_slice(&CONNECTION_HEADER);
    buf[10..12].copy_from_slice(&ServiceCode::WriteDatapointValue.to_u16().to_be_bytes());
    buf[12..14].copy_from_slice(&dp_id.to_be_bytes());
    buf[14..16].copy_from_slice(&1u16.to_be_bytes());
    buf[16..18].copy_from_slice(&dp_id.to_be_bytes());
    buf[18] = 0x00;
    buf[19] = value.len() as u8;
    buf[20..total].copy_from_slice(value);

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single valid frame: one record for datapoint 178, value 0x0262.
    const SINGLE_FRAME: &[u8] = &[
        0x06, 0x20, 0xF0, 0x80, 0x00, 0x16, 0x04, 0x00, 0x00, 0x00, 0xF0, 0x06, 0x00, 0xB2,
        0x00, 0x01, 0x00, 0xB2, 0x03, 0x02, 0x02, 0x62,
    ];

    #[test]
    fn test_split_single_frame() {
        let mut splitter = FrameSplitter::new(SINGLE_FRAME);
        let frame = splitter.next().unwrap().unwrap();
        assert_eq!(frame.data().len(), 0x16);
        assert_eq!(
            frame.service_code(),
            Some(ServiceCode::SetDatapointValue.to_u16())
        );
        assert_eq!(frame.ack_echo(), Some([0x00, 0xB2]));
        assert!(splitter.next().is_none());
    }

    #[test]
    fn test_split_skips_leading_garbage() {
        let mut data = heapless::Vec::<u8, 64>::new();
        data.extend_from_slice(&[0xDE, 0xAD, 0xBE]).unwrap();
        data.extend_from_slice(SINGLE_FRAME).unwrap();

        let mut splitter = FrameSplitter::new(&data);
        let frame = splitter.next().unwrap().unwrap();
        assert_eq!(frame.data(), SINGLE_FRAME);
        assert!(splitter.next().is_none());
    }

    #[test]
    fn test_split_concatenated_frames() {
        let mut data = heapless::Vec::<u8, 128>::new();
        for _ in 0..3 {
            data.extend_from_slice(SINGLE_FRAME).unwrap();
        }

        let frames: heapless::Vec<_, 8> = FrameSplitter::new(&data)
            .map(|frame| frame.unwrap())
            .collect();
        assert_eq!(frames.len(), 3);
        for frame in &frames {
            assert_eq!(frame.data(), SINGLE_FRAME);
        }
    }

    #[test]
    fn test_split_no_signature() {
        let err = FrameSplitter::new(&[0x01, 0x02, 0x03, 0x04, 0x05])
            .next()
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, Ism8Error::Frame(e) if e.is_no_signature()));
    }

    #[test]
    fn test_split_empty_buffer() {
        let err = FrameSplitter::new(&[]).next().unwrap().unwrap_err();
        assert!(matches!(err, Ism8Error::Frame(e) if e.is_no_signature()));
    }

    #[test]
    fn test_split_truncated_header() {
        // Signature present but fewer than 10 bytes available
        let err = FrameSplitter::new(&SINGLE_FRAME[..8])
            .next()
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, Ism8Error::Frame(e) if e.is_truncated_header()));
    }

    #[test]
    fn test_split_incomplete_frame() {
        // Header complete, but the buffer ends before the declared length
        let err = FrameSplitter::new(&SINGLE_FRAME[..15])
            .next()
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, Ism8Error::Frame(e) if e.is_incomplete_frame()));
    }

    #[test]
    fn test_split_invalid_length_field() {
        let mut data = [0u8; 12];
        data[..10].copy_from_slice(&SINGLE_FRAME[..10]);
        data[4] = 0x00;
        data[5] = 0x04; // shorter than the fixed header
        let err = FrameSplitter::new(&data).next().unwrap().unwrap_err();
        assert!(matches!(err, Ism8Error::Frame(_)));
    }

    #[test]
    fn test_split_error_after_good_frame() {
        // One complete frame followed by a truncated second one: the good
        // frame is yielded, then the error
        let mut data = heapless::Vec::<u8, 64>::new();
        data.extend_from_slice(SINGLE_FRAME).unwrap();
        data.extend_from_slice(&SINGLE_FRAME[..12]).unwrap();

        let mut splitter = FrameSplitter::new(&data);
        assert!(splitter.next().unwrap().is_ok());
        let err = splitter.next().unwrap().unwrap_err();
        assert!(matches!(err, Ism8Error::Frame(e) if e.is_incomplete_frame()));
        assert!(splitter.next().is_none());
    }

    #[test]
    fn test_records_walk() {
        let frame = FrameSplitter::new(SINGLE_FRAME).next().unwrap().unwrap();
        let mut records = DatapointRecords::new(frame.payload()).unwrap();
        let record = records.next().unwrap().unwrap();
        assert_eq!(record.id, 178);
        assert_eq!(record.command, DP_COMMAND_SET_VALUE);
        assert_eq!(record.value, &[0x02, 0x62]);
        assert!(records.next().is_none());
    }

    #[test]
    fn test_records_two_in_one_frame() {
        let payload: &[u8] = &[
            0xF0, 0x06, 0x00, 0xB2, 0x00, 0x02, // service, start id, count 2
            0x00, 0xB2, 0x03, 0x02, 0x02, 0x62, // record 178
            0x00, 0xB3, 0x03, 0x02, 0x02, 0x63, // record 179
        ];
        let records: heapless::Vec<_, 4> = DatapointRecords::new(payload)
            .unwrap()
            .map(|record| record.unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 178);
        assert_eq!(records[1].id, 179);
    }

    #[test]
    fn test_records_zero_length_poisons_frame() {
        // Record count claims 1, but the record carries no value bytes
        let payload: &[u8] = &[
            0xF0, 0x06, 0x00, 0xB2, 0x00, 0x01, 0x00, 0xB2, 0x03, 0x00,
        ];
        let mut records = DatapointRecords::new(payload).unwrap();
        let err = records.next().unwrap().unwrap_err();
        assert!(matches!(err, Ism8Error::Frame(e) if e.is_malformed_record()));
        assert!(records.next().is_none());
    }

    #[test]
    fn test_records_wrong_command_poisons_frame() {
        let payload: &[u8] = &[
            0xF0, 0x06, 0x00, 0xB2, 0x00, 0x01, 0x00, 0xB2, 0x01, 0x02, 0x02, 0x62,
        ];
        let mut records = DatapointRecords::new(payload).unwrap();
        assert!(records.next().unwrap().is_err());
    }

    #[test]
    fn test_records_count_past_payload() {
        // Count claims 2 records but only one is present
        let payload: &[u8] = &[
            0xF0, 0x06, 0x00, 0xB2, 0x00, 0x02, 0x00, 0xB2, 0x03, 0x02, 0x02, 0x62,
        ];
        let mut records = DatapointRecords::new(payload).unwrap();
        assert!(records.next().unwrap().is_ok());
        assert!(records.next().unwrap().is_err());
        assert!(records.next().is_none());
    }

    #[test]
    fn test_records_payload_too_short() {
        assert!(DatapointRecords::new(&[0xF0, 0x06, 0x00]).is_err());
    }

    #[test]
    fn test_records_zero_count_is_empty() {
        let payload: &[u8] = &[0xF0, 0x06, 0x00, 0x00, 0x00, 0x00];
        let mut records = DatapointRecords::new(payload).unwrap();
        assert!(records.next().is_none());
    }

    #[test]
    fn test_build_ack_patches_echo() {
        let frame = FrameSplitter::new(SINGLE_FRAME).next().unwrap().unwrap();
        let ack = build_ack(frame.ack_echo().unwrap());
        assert_eq!(ack.len(), 17);
        assert_eq!(&ack[..4], &FRAME_SIGNATURE);
        assert_eq!(&ack[4..6], &[0x00, 0x11]);
        assert_eq!(ack[12], 0x00);
        assert_eq!(ack[13], 0xB2);
        assert_eq!(&ack[14..], &[0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_build_write_frame_layout() {
        let mut buf = [0u8; 32];
        let len = build_write_frame(56, &[0x15, 0x0F], &mut buf).unwrap();
        assert_eq!(len, 22);
        assert_eq!(&buf[..4], &FRAME_SIGNATURE);
        assert_eq!(&buf[4..6], &[0x00, 0x16]); // patched total length
        assert_eq!(&buf[6..10], &CONNECTION_HEADER);
        assert_eq!(&buf[10..12], &[0xF0, 0xC1]);
        assert_eq!(&buf[12..14], &[0x00, 0x38]); // start id 56
        assert_eq!(&buf[14..16], &[0x00, 0x01]); // one record
        assert_eq!(&buf[16..18], &[0x00, 0x38]); // record id 56
        assert_eq!(buf[18], 0x00); // command
        assert_eq!(buf[19], 0x02); // value length
        assert_eq!(&buf[20..22], &[0x15, 0x0F]);
    }

    #[test]
    fn test_build_write_frame_buffer_too_small() {
        let mut buf = [0u8; 8];
        assert!(build_write_frame(56, &[0x01], &mut buf).is_err());
    }

    #[test]
    fn test_written_frame_splits_back() {
        let mut buf = [0u8; 32];
        let len = build_write_frame(72, &[0x01], &mut buf).unwrap();
        let frame = FrameSplitter::new(&buf[..len]).next().unwrap().unwrap();
        assert_eq!(
            frame.service_code(),
            Some(ServiceCode::WriteDatapointValue.to_u16())
        );
        assert_eq!(frame.ack_echo(), Some([0x00, 0x48]));
    }
}
