#![cfg_attr(all(not(test), not(feature = "std")), no_std)]

//! # wolf-ism8
//!
//! Protocol implementation for the Wolf ISM8 home-automation gateway.
//!
//! The ISM8 module of a Wolf heating/ventilation installation connects to
//! a TCP server and pushes datapoint values in a KNX-derived object-server
//! framing. This crate implements the passive endpoint behind such a
//! connection: stream splitting, per-datapoint decoding into typed values,
//! and the validated encode path for writable datapoints. The TCP listener
//! itself stays outside; it talks to the core through the [`Transport`]
//! trait and [`Ism8::on_data_received`].
//!
//! ## Features
//!
//! - Zero-copy frame splitting with strict malformed-input handling
//! - Typed datapoint codecs (bool, scaling, 16-bit float, modes, date, time)
//! - Static datapoint catalog with per-id write validation
//! - `no_std` by default; `std`, `defmt`, `log` and `serde` features
//!
//! ## Example
//!
//! ```rust
//! use wolf_ism8::{DpValue, Ism8, MockTransport};
//!
//! let mut ism8 = Ism8::new();
//! ism8.connection_made(MockTransport::new());
//!
//! // Feed one received buffer; decoded frames are acknowledged
//! let buffer = [
//!     0x06, 0x20, 0xF0, 0x80, 0x00, 0x16, 0x04, 0x00, 0x00, 0x00,
//!     0xF0, 0x06, 0x00, 0xB2, 0x00, 0x01, 0x00, 0xB2, 0x03, 0x02,
//!     0x02, 0x62,
//! ];
//! ism8.on_data_received(&buffer)?;
//! assert!(matches!(ism8.read_value(178), Some(DpValue::Float(_))));
//!
//! // Writes run the full validation chain first
//! ism8.send_value(57, DpValue::Text("Automatikbetrieb"))?;
//! # Ok::<(), wolf_ism8::Ism8Error>(())
//! ```

// Macro modules (must be declared before use)
#[macro_use]
pub mod logging;

pub mod catalog;
pub mod dpt;
pub mod error;
pub mod ism8;
pub mod protocol;
pub mod transport;

// Re-export commonly used types
#[doc(inline)]
pub use catalog::{Datapoint, ValueRange};
#[doc(inline)]
pub use dpt::{Date, DpValue, DptType, Time};
#[doc(inline)]
pub use error::{Ism8Error, Result};
#[doc(inline)]
pub use ism8::{encode_datapoint, Ism8};
#[doc(inline)]
pub use transport::{MockTransport, Transport};
