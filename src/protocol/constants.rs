//! ISM8 object-server protocol constants and service code identifiers.

/// Fixed 4-byte frame signature every object-server frame starts with.
pub const FRAME_SIGNATURE: [u8; 4] = [0x06, 0x20, 0xF0, 0x80];

/// Fixed 4-byte sub-header following the 2-byte frame length.
pub const CONNECTION_HEADER: [u8; 4] = [0x04, 0x00, 0x00, 0x00];

/// Offset of the 2-byte big-endian total frame length within a frame.
pub const LENGTH_OFFSET: usize = 4;

/// Fixed header size: signature + length + sub-header. The service code
/// and payload follow from here.
pub const FIXED_HEADER_LEN: usize = 10;

/// Offset of the 2-byte echo field copied into acknowledgments.
pub const ACK_ECHO_OFFSET: usize = 12;

/// Offset of the record count within a frame payload (payload starts at
/// the service code).
pub const RECORD_COUNT_OFFSET: usize = 4;

/// Offset of the first datapoint record within a frame payload.
pub const FIRST_RECORD_OFFSET: usize = 6;

/// Command byte carried by datapoint records that transport a value.
pub const DP_COMMAND_SET_VALUE: u8 = 0x03;

/// Acknowledgment frame template (17 bytes). Bytes 12-13 are overwritten
/// with the echo field of the frame being acknowledged before sending.
pub const ACK_FRAME_TEMPLATE: [u8; 17] = [
    0x06, 0x20, 0xF0, 0x80, // signature
    0x00, 0x11, // total length (17)
    0x04, 0x00, 0x00, 0x00, // sub-header
    0xF0, 0x86, // acknowledge service
    0x00, 0x00, // echo field, patched per frame
    0x00, 0x00, 0x00,
];

/// Fixed request-all-datapoints frame. Its length field reads 0x0016 even
/// though the message is 12 bytes on the wire; the gateway expects these
/// exact bytes, so they are preserved as observed.
pub const REQUEST_ALL_FRAME: [u8; 12] = [
    0x06, 0x20, 0xF0, 0x80, // signature
    0x00, 0x16, // length field as sent by the reference client
    0x04, 0x00, 0x00, 0x00, // sub-header
    0xF0, 0xD0, // request-all service
];

// =============================================================================
// Service Code Identifiers
// =============================================================================

/// Object-server service codes (bytes 10-11 of a frame, big-endian).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ServiceCode {
    /// `SetDatapointValue.Req` - gateway pushes datapoint values
    SetDatapointValue = 0xF006,
    /// `SetDatapointValue.Res` - acknowledgment for received values
    SetDatapointValueAck = 0xF086,
    /// `DatapointValue.Write` - client writes a datapoint value
    WriteDatapointValue = 0xF0C1,
    /// `RequestAllDatapoints` - client asks for a full refresh
    RequestAllDatapoints = 0xF0D0,
}

impl ServiceCode {
    /// Convert a u16 to `ServiceCode`
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0xF006 => Some(Self::SetDatapointValue),
            0xF086 => Some(Self::SetDatapointValueAck),
            0xF0C1 => Some(Self::WriteDatapointValue),
            0xF0D0 => Some(Self::RequestAllDatapoints),
            _ => None,
        }
    }

    /// Convert `ServiceCode` to u16
    pub const fn to_u16(self) -> u16 {
        self as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_code_round_trip() {
        for code in [
            ServiceCode::SetDatapointValue,
            ServiceCode::SetDatapointValueAck,
            ServiceCode::WriteDatapointValue,
            ServiceCode::RequestAllDatapoints,
        ] {
            assert_eq!(ServiceCode::from_u16(code.to_u16()), Some(code));
        }
        assert!(ServiceCode::from_u16(0x0000).is_none());
    }

    #[test]
    fn test_ack_template_shape() {
        assert_eq!(ACK_FRAME_TEMPLATE.len(), 17);
        assert_eq!(&ACK_FRAME_TEMPLATE[..4], &FRAME_SIGNATURE);
        assert_eq!(&ACK_FRAME_TEMPLATE[4..6], &[0x00, 0x11]);
        assert_eq!(&ACK_FRAME_TEMPLATE[6..10], &CONNECTION_HEADER);
        assert_eq!(
            u16::from_be_bytes([ACK_FRAME_TEMPLATE[10], ACK_FRAME_TEMPLATE[11]]),
            ServiceCode::SetDatapointValueAck.to_u16()
        );
    }

    #[test]
    fn test_request_all_frame_shape() {
        assert_eq!(&REQUEST_ALL_FRAME[..4], &FRAME_SIGNATURE);
        assert_eq!(
            u16::from_be_bytes([REQUEST_ALL_FRAME[10], REQUEST_ALL_FRAME[11]]),
            ServiceCode::RequestAllDatapoints.to_u16()
        );
    }
}
