//! ISM8 Datapoint Types (DPT)
//!
//! This module provides encoding and decoding for the datapoint types the
//! ISM8 object server uses on the wire. The type tag of a datapoint decides
//! how its raw big-endian value is interpreted.
//!
//! ## Supported DPT Families
//!
//! - **DPT 1.xxx** - Boolean (1 bit): pump states, fault flags, time programs
//! - **DPT 5.001** - Scaling (1 byte): burner output, valve positions (0-100 %)
//! - **DPT 9.xxx** - 2-byte float: temperatures, pressure, power
//! - **DPT 10.001** - Time of day (3 bytes)
//! - **DPT 11.001** - Date (3 bytes)
//! - **DPT 13.xxx** - 32-bit counters: energy totals, flow rate
//! - **DPT 20.1xx** - Enumerated operating modes (1 byte)
//!
//! ## Usage
//!
//! ```rust
//! use wolf_ism8::dpt::{DptType, DpValue};
//!
//! // Decode a temperature from its accumulated raw value
//! let value = DptType::ValueTemp.decode(0x0262)?;
//! let DpValue::Float(celsius) = value else { unreachable!() };
//! assert!((celsius - 6.1).abs() < 0.01);
//!
//! // Encode it back into wire bytes
//! let mut buf = [0u8; 4];
//! let len = DptType::ValueTemp.encode(&value, &mut buf)?;
//! assert_eq!(&buf[..len], &[0x02, 0x62]);
//! # Ok::<(), wolf_ism8::Ism8Error>(())
//! ```
//!
//! ## Design Note
//!
//! Decode functions take the record's value bytes accumulated into one
//! unsigned big-endian integer, which is how the object-server records
//! arrive; encode functions write big-endian bytes into a caller buffer.
//! Dispatch happens through a single `match` on [`DptType`] so that the
//! type-to-codec mapping is closed and checked at compile time.

use crate::error::{Ism8Error, Result};

pub mod dpt1;
pub mod dpt5;
pub mod dpt9;
pub mod dpt10;
pub mod dpt11;
pub mod dpt13;
pub mod dpt20;

// Re-export common types
#[doc(inline)]
pub use dpt10::Time;
#[doc(inline)]
pub use dpt11::Date;

/// Datapoint type tags used by the ISM8 object server.
///
/// Every catalog entry carries one of these tags; it determines both the
/// wire width of the value and the codec used for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DptType {
    /// DPT 1.001 - Switch / boolean state
    Switch,
    /// DPT 5.001 - Percentage scaling (0-100 %)
    Scaling,
    /// DPT 9.001 - Temperature (°C)
    ValueTemp,
    /// DPT 9.002 - Temperature difference (K)
    TempDifference,
    /// DPT 9.006 - Pressure (Pa)
    Pressure,
    /// DPT 9.024 - Power (kW)
    Power,
    /// DPT 9.025 - Volume flow (l/h)
    VolumeFlow,
    /// DPT 13.010 - Active energy (Wh)
    ActiveEnergy,
    /// DPT 13.013 - Active energy (kWh)
    ActiveEnergyKwh,
    /// DPT 13.002 - Flow rate, reported in 0.0001 m³/h steps
    FlowRate,
    /// DPT 20.102 - HVAC operating mode
    HvacMode,
    /// DPT 20.102, CWL ventilation variant with its own label table
    HvacModeCwl,
    /// DPT 20.103 - Domestic hot water mode
    DhwMode,
    /// DPT 20.105 - HVAC controller mode
    HvacContrMode,
    /// DPT 11.001 - Date
    Date,
    /// DPT 10.001 - Time of day
    TimeOfDay,
}

/// A decoded datapoint value.
///
/// Reads store the decoded, typed value; writes cache the application-level
/// value that was sent (not a re-decode of the wire bytes).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DpValue {
    /// Boolean state (switches, fault flags)
    Bool(bool),
    /// Scaled or floating-point reading
    Float(f32),
    /// Plain integer (energy totals, counters)
    Int(u32),
    /// Enumerated operating-mode label
    Text(&'static str),
    /// Calendar date
    Date(Date),
    /// Time of day
    Time(Time),
}

impl DptType {
    /// Get the KNX DPT identifier string
    pub const fn identifier(self) -> &'static str {
        match self {
            DptType::Switch => "1.001",
            DptType::Scaling => "5.001",
            DptType::ValueTemp => "9.001",
            DptType::TempDifference => "9.002",
            DptType::Pressure => "9.006",
            DptType::Power => "9.024",
            DptType::VolumeFlow => "9.025",
            DptType::ActiveEnergy => "13.010",
            DptType::ActiveEnergyKwh => "13.013",
            DptType::FlowRate => "13.002",
            DptType::HvacMode | DptType::HvacModeCwl => "20.102",
            DptType::DhwMode => "20.103",
            DptType::HvacContrMode => "20.105",
            DptType::Date => "11.001",
            DptType::TimeOfDay => "10.001",
        }
    }

    /// Get the unit string
    pub const fn unit(self) -> &'static str {
        match self {
            DptType::Scaling => "%",
            DptType::ValueTemp => "°C",
            DptType::TempDifference => "K",
            DptType::Pressure => "Pa",
            DptType::Power => "kW",
            DptType::VolumeFlow => "l/h",
            DptType::ActiveEnergy => "Wh",
            DptType::ActiveEnergyKwh => "kWh",
            DptType::FlowRate => "m³/h",
            DptType::Switch
            | DptType::HvacMode
            | DptType::HvacModeCwl
            | DptType::DhwMode
            | DptType::HvacContrMode
            | DptType::Date
            | DptType::TimeOfDay => "",
        }
    }

    /// Wire width of an encoded value of this type, in bytes
    pub const fn value_len(self) -> usize {
        match self {
            DptType::Switch
            | DptType::Scaling
            | DptType::HvacMode
            | DptType::HvacModeCwl
            | DptType::DhwMode
            | DptType::HvacContrMode => 1,
            DptType::ValueTemp
            | DptType::TempDifference
            | DptType::Pressure
            | DptType::Power
            | DptType::VolumeFlow => 2,
            DptType::Date | DptType::TimeOfDay => 3,
            DptType::ActiveEnergy | DptType::ActiveEnergyKwh | DptType::FlowRate => 4,
        }
    }

    /// Decode an accumulated big-endian raw value into a typed value.
    ///
    /// # Errors
    ///
    /// Returns an error for the 2-byte float "no data" sentinel, an
    /// enumeration number without a table entry, or an impossible
    /// date/time field.
    pub fn decode(self, raw: u32) -> Result<DpValue> {
        let value = match self {
            DptType::Switch => DpValue::Bool(dpt1::decode(raw)),
            DptType::Scaling => DpValue::Float(dpt5::decode(raw)),
            DptType::ValueTemp
            | DptType::TempDifference
            | DptType::Pressure
            | DptType::Power
            | DptType::VolumeFlow => DpValue::Float(dpt9::decode(raw as u16)?),
            DptType::ActiveEnergy | DptType::ActiveEnergyKwh => {
                DpValue::Int(dpt13::decode_int(raw))
            }
            DptType::FlowRate => DpValue::Float(dpt13::decode_flow_rate(raw)),
            DptType::HvacMode => DpValue::Text(dpt20::decode_mode(raw, dpt20::HVAC_MODES)?),
            DptType::HvacModeCwl => {
                DpValue::Text(dpt20::decode_mode(raw, dpt20::HVAC_MODES_CWL)?)
            }
            DptType::DhwMode => DpValue::Text(dpt20::decode_mode(raw, dpt20::DHW_MODES)?),
            DptType::HvacContrMode => {
                DpValue::Text(dpt20::decode_mode(raw, dpt20::HVAC_CONTR_MODES)?)
            }
            DptType::Date => DpValue::Date(dpt11::decode(raw)?),
            DptType::TimeOfDay => DpValue::Time(dpt10::decode(raw)?),
        };
        Ok(value)
    }

    /// Encode a typed value into wire bytes.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns an error if the value variant does not match this type, the
    /// buffer is too small, a label is not in the type's table, or the type
    /// has no write encoding (energy totals and flow rate are read-only on
    /// the wire).
    pub fn encode(self, value: &DpValue, buf: &mut [u8]) -> Result<usize> {
        match (self, value) {
            (DptType::Switch, DpValue::Bool(v)) => dpt1::encode(*v, buf),
            (DptType::Scaling, DpValue::Float(v)) => dpt5::encode(*v, buf),
            (
                DptType::ValueTemp
                | DptType::TempDifference
                | DptType::Pressure
                | DptType::Power
                | DptType::VolumeFlow,
                DpValue::Float(v),
            ) => dpt9::encode(*v, buf),
            (DptType::HvacMode, DpValue::Text(label)) => {
                dpt20::encode_mode_into(label, dpt20::HVAC_MODES, buf)
            }
            (DptType::HvacModeCwl, DpValue::Text(label)) => {
                dpt20::encode_mode_into(label, dpt20::HVAC_MODES_CWL, buf)
            }
            (DptType::DhwMode, DpValue::Text(label)) => {
                dpt20::encode_mode_into(label, dpt20::DHW_MODES, buf)
            }
            (DptType::HvacContrMode, DpValue::Text(label)) => {
                dpt20::encode_mode_into(label, dpt20::HVAC_CONTR_MODES, buf)
            }
            (DptType::Date, DpValue::Date(d)) => dpt11::encode(*d, buf),
            (DptType::TimeOfDay, DpValue::Time(t)) => dpt10::encode(*t, buf),
            (DptType::ActiveEnergy | DptType::ActiveEnergyKwh | DptType::FlowRate, _) => {
                Err(Ism8Error::unsupported_type())
            }
            _ => Err(Ism8Error::type_mismatch()),
        }
    }

    /// Check whether a value variant is the right representation for this type
    pub const fn accepts(self, value: &DpValue) -> bool {
        matches!(
            (self, value),
            (DptType::Switch, DpValue::Bool(_))
                | (
                    DptType::Scaling
                        | DptType::ValueTemp
                        | DptType::TempDifference
                        | DptType::Pressure
                        | DptType::Power
                        | DptType::VolumeFlow
                        | DptType::FlowRate,
                    DpValue::Float(_)
                )
                | (
                    DptType::ActiveEnergy | DptType::ActiveEnergyKwh,
                    DpValue::Int(_)
                )
                | (
                    DptType::HvacMode
                        | DptType::HvacModeCwl
                        | DptType::DhwMode
                        | DptType::HvacContrMode,
                    DpValue::Text(_)
                )
                | (DptType::Date, DpValue::Date(_))
                | (DptType::TimeOfDay, DpValue::Time(_))
        )
    }
}
