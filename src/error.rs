//! Error types for ISM8 operations.
//!
//! This module provides structured error types with backtraces (when std is
//! enabled) and helper methods for error information.

use core::fmt;

#[cfg(feature = "std")]
use std::backtrace::Backtrace;

/// Result type alias for ISM8 operations.
pub type Result<T> = core::result::Result<T, Ism8Error>;

// =============================================================================
// Error Kind Enums (Internal)
// =============================================================================

/// Frame-level structural error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum FrameErrorKind {
    NoSignatureFound,
    TruncatedHeader,
    IncompleteFrame,
    InvalidLength,
    MalformedRecord,
}

/// Datapoint codec error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum DptErrorKind {
    InvalidValue,
    UnknownEnumValue,
    UnknownLabel,
    UnsupportedType,
    BufferTooSmall,
}

/// Write-path validation error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum WriteErrorKind {
    UnknownDatapoint,
    NotWritable,
    TypeMismatch,
    OutOfRange,
}

/// Transport error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum TransportErrorKind {
    NotConnected,
    SendFailed,
}

// =============================================================================
// Main Error Type
// =============================================================================

/// ISM8 protocol error types.
///
/// This is the main error type returned by all ISM8 operations.
/// It contains a backtrace (when std feature is enabled) and detailed
/// error information through helper methods.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ism8Error {
    /// Frame-level structural errors (missing signature, truncation, etc.)
    Frame(FrameError),
    /// Datapoint codec errors (sentinel values, unknown enum entries, etc.)
    Dpt(DptError),
    /// Write-path validation errors (not writable, out of range, etc.)
    Write(WriteError),
    /// Transport errors (no connection, send failure)
    Transport(TransportError),
}

// =============================================================================
// Structured Error Types
// =============================================================================

/// Frame error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameError {
    kind: FrameErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl FrameError {
    pub(crate) fn new(kind: FrameErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if no frame signature was found in the buffer
    pub fn is_no_signature(&self) -> bool {
        matches!(self.kind, FrameErrorKind::NoSignatureFound)
    }

    /// Check if the buffer ended inside a frame header
    pub fn is_truncated_header(&self) -> bool {
        matches!(self.kind, FrameErrorKind::TruncatedHeader)
    }

    /// Check if the buffer ended before the declared frame length.
    ///
    /// The caller should buffer the partial frame and retry once more
    /// data has arrived; the splitter itself does no reassembly.
    pub fn is_incomplete_frame(&self) -> bool {
        matches!(self.kind, FrameErrorKind::IncompleteFrame)
    }

    /// Check if a datapoint record was malformed (zero-length or out of bounds)
    pub fn is_malformed_record(&self) -> bool {
        matches!(self.kind, FrameErrorKind::MalformedRecord)
    }
}

/// Datapoint codec error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DptError {
    kind: DptErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl DptError {
    pub(crate) fn new(kind: DptErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if the raw value was invalid (sentinel float, impossible date)
    pub fn is_invalid_value(&self) -> bool {
        matches!(self.kind, DptErrorKind::InvalidValue)
    }

    /// Check if an enumeration number had no table entry
    pub fn is_unknown_enum_value(&self) -> bool {
        matches!(self.kind, DptErrorKind::UnknownEnumValue)
    }

    /// Check if a label matched no (or more than one) table entry
    pub fn is_unknown_label(&self) -> bool {
        matches!(self.kind, DptErrorKind::UnknownLabel)
    }

    /// Check if encoding is not implemented for this datapoint type
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self.kind, DptErrorKind::UnsupportedType)
    }
}

/// Write validation error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WriteError {
    kind: WriteErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl WriteError {
    pub(crate) fn new(kind: WriteErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if the datapoint id is not in the catalog
    pub fn is_unknown_datapoint(&self) -> bool {
        matches!(self.kind, WriteErrorKind::UnknownDatapoint)
    }

    /// Check if the datapoint is read-only
    pub fn is_not_writable(&self) -> bool {
        matches!(self.kind, WriteErrorKind::NotWritable)
    }

    /// Check if the value's type does not match the datapoint type
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, WriteErrorKind::TypeMismatch)
    }

    /// Check if the value is outside the datapoint's allowed range
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind, WriteErrorKind::OutOfRange)
    }
}

/// Transport error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransportError {
    kind: TransportErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl TransportError {
    pub(crate) fn new(kind: TransportErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if there is no active connection
    pub fn is_not_connected(&self) -> bool {
        matches!(self.kind, TransportErrorKind::NotConnected)
    }

    /// Check if the underlying write failed
    pub fn is_send_failed(&self) -> bool {
        matches!(self.kind, TransportErrorKind::SendFailed)
    }
}

// =============================================================================
// Convenience Constructors for Ism8Error
// =============================================================================

impl Ism8Error {
    // Frame errors
    pub(crate) fn no_signature_found() -> Self {
        Self::Frame(FrameError::new(FrameErrorKind::NoSignatureFound))
    }

    pub(crate) fn truncated_header() -> Self {
        Self::Frame(FrameError::new(FrameErrorKind::TruncatedHeader))
    }

    pub(crate) fn incomplete_frame() -> Self {
        Self::Frame(FrameError::new(FrameErrorKind::IncompleteFrame))
    }

    pub(crate) fn invalid_length() -> Self {
        Self::Frame(FrameError::new(FrameErrorKind::InvalidLength))
    }

    pub(crate) fn malformed_record() -> Self {
        Self::Frame(FrameError::new(FrameErrorKind::MalformedRecord))
    }

    // Dpt errors
    pub(crate) fn invalid_value() -> Self {
        Self::Dpt(DptError::new(DptErrorKind::InvalidValue))
    }

    pub(crate) fn unknown_enum_value() -> Self {
        Self::Dpt(DptError::new(DptErrorKind::UnknownEnumValue))
    }

    pub(crate) fn unknown_label() -> Self {
        Self::Dpt(DptError::new(DptErrorKind::UnknownLabel))
    }

    pub(crate) fn unsupported_type() -> Self {
        Self::Dpt(DptError::new(DptErrorKind::UnsupportedType))
    }

    pub(crate) fn buffer_too_small() -> Self {
        Self::Dpt(DptError::new(DptErrorKind::BufferTooSmall))
    }

    // Write errors
    pub(crate) fn unknown_datapoint() -> Self {
        Self::Write(WriteError::new(WriteErrorKind::UnknownDatapoint))
    }

    pub(crate) fn not_writable() -> Self {
        Self::Write(WriteError::new(WriteErrorKind::NotWritable))
    }

    pub(crate) fn type_mismatch() -> Self {
        Self::Write(WriteError::new(WriteErrorKind::TypeMismatch))
    }

    pub(crate) fn out_of_range() -> Self {
        Self::Write(WriteError::new(WriteErrorKind::OutOfRange))
    }

    // Transport errors
    pub(crate) fn not_connected() -> Self {
        Self::Transport(TransportError::new(TransportErrorKind::NotConnected))
    }

    pub(crate) fn send_failed() -> Self {
        Self::Transport(TransportError::new(TransportErrorKind::SendFailed))
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl fmt::Display for Ism8Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ism8Error::Frame(e) => write!(f, "Frame error: {:?}", e.kind),
            Ism8Error::Dpt(e) => write!(f, "Datapoint error: {:?}", e.kind),
            Ism8Error::Write(e) => write!(f, "Write error: {:?}", e.kind),
            Ism8Error::Transport(e) => write!(f, "Transport error: {:?}", e.kind),
        }
    }
}

// Implement std::error::Error for std-based applications
#[cfg(feature = "std")]
impl std::error::Error for Ism8Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_error_helpers() {
        let err = Ism8Error::incomplete_frame();
        match err {
            Ism8Error::Frame(e) => {
                assert!(e.is_incomplete_frame());
                assert!(!e.is_no_signature());
            }
            _ => panic!("expected frame error"),
        }
    }

    #[test]
    fn test_write_error_helpers() {
        let err = Ism8Error::not_writable();
        match err {
            Ism8Error::Write(e) => {
                assert!(e.is_not_writable());
                assert!(!e.is_out_of_range());
            }
            _ => panic!("expected write error"),
        }
    }

    #[test]
    fn test_display() {
        let err = Ism8Error::no_signature_found();
        let mut s = heapless::String::<64>::new();
        core::fmt::write(&mut s, format_args!("{err}")).unwrap();
        assert!(s.as_str().contains("NoSignatureFound"));
    }
}
