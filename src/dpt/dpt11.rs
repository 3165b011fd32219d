//! DPT 11.001 - Date (3 bytes)
//!
//! ## Decode format
//!
//! ```text
//! Byte 0: day
//! Byte 1: xxxx MMMM  (month in bits 8-11 of the 24-bit value)
//! Byte 2: xYYY YYYY  (year offset from 2000 in bits 0-6)
//! ```
//!
//! Decoding reads the day from the top byte and validates the result
//! through [`Date::new`], so a day byte of 48 surfaces as a decode failure
//! instead of aliasing into a wrong-but-plausible date.
//!
//! ## Encode format
//!
//! Encoding emits plain positional bytes `[day, month, year - 2000]` — it
//! does NOT mirror the decode bit-packing. This asymmetry matches the
//! behavior observed on the ISM8 wire and is preserved deliberately; if it
//! turns out to be a gateway firmware defect it has to be resolved with the
//! protocol maintainers, not here. The two layouts agree for every valid
//! date, since month and year offset fit their sub-byte fields.

use core::fmt;

use crate::error::{Ism8Error, Result};

/// A validated calendar date in the ISM8-representable window (2000-2127).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Date {
    year: u16,
    month: u8,
    day: u8,
}

impl Date {
    /// Create a calendar date.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if the month or day is out of range for the
    /// given year, or if the year cannot be carried in the 7-bit wire field
    /// (2000-2127).
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(2000..=2127).contains(&year) {
            return Err(Ism8Error::invalid_value());
        }
        if month == 0 || month > 12 {
            return Err(Ism8Error::invalid_value());
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(Ism8Error::invalid_value());
        }
        Ok(Self { year, month, day })
    }

    pub const fn year(self) -> u16 {
        self.year
    }

    pub const fn month(self) -> u8 {
        self.month
    }

    pub const fn day(self) -> u8 {
        self.day
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Decode a 24-bit raw value into a calendar date.
pub fn decode(raw: u32) -> Result<Date> {
    let year = 2000 + (raw & 0x7F) as u16;
    let month = ((raw >> 8) & 0x0F) as u8;
    let day = ((raw >> 16) & 0xFF) as u8;
    Date::new(year, month, day)
}

/// Encode a date as `[day, month, year - 2000]`.
pub fn encode(date: Date, buf: &mut [u8]) -> Result<usize> {
    if buf.len() < 3 {
        return Err(Ism8Error::buffer_too_small());
    }

    buf[0] = date.day();
    buf[1] = date.month();
    buf[2] = (date.year() - 2000) as u8;
    Ok(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_basic() {
        // 04 06 07 -> 2007-06-04
        let date = decode(0x040607).unwrap();
        assert_eq!(date, Date::new(2007, 6, 4).unwrap());
    }

    #[test]
    fn test_decode_later_date() {
        // 14 0C 20 -> 2032-12-20
        let date = decode(0x140C20).unwrap();
        assert_eq!(date, Date::new(2032, 12, 20).unwrap());
    }

    #[test]
    fn test_decode_invalid_day_fails() {
        // 30 0C 30: day byte 48 must fail, not alias into a valid day
        assert!(decode(0x300C30).is_err());
    }

    #[test]
    fn test_decode_zero_fields_fail() {
        assert!(decode(0x000000).is_err());
    }

    #[test]
    fn test_encode_positional_bytes() {
        let mut buf = [0u8; 3];
        let len = encode(Date::new(2024, 5, 30).unwrap(), &mut buf).unwrap();
        assert_eq!(len, 3);
        assert_eq!(buf, [0x1E, 0x05, 0x18]);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        // The positional encode and the bit-field decode agree for valid dates
        let mut buf = [0u8; 3];
        let date = Date::new(2024, 5, 30).unwrap();
        encode(date, &mut buf).unwrap();
        let raw = u32::from(buf[0]) << 16 | u32::from(buf[1]) << 8 | u32::from(buf[2]);
        assert_eq!(decode(raw).unwrap(), date);
    }

    #[test]
    fn test_date_validation() {
        assert!(Date::new(2024, 2, 29).is_ok());
        assert!(Date::new(2023, 2, 29).is_err());
        assert!(Date::new(2100, 2, 29).is_err()); // century, not a leap year
        assert!(Date::new(2024, 4, 31).is_err());
        assert!(Date::new(2024, 13, 1).is_err());
        assert!(Date::new(2024, 0, 1).is_err());
        assert!(Date::new(2024, 1, 0).is_err());
        assert!(Date::new(1999, 12, 31).is_err());
        assert!(Date::new(2128, 1, 1).is_err());
    }

    #[test]
    fn test_date_ordering() {
        let earlier = Date::new(2024, 5, 30).unwrap();
        let later = Date::new(2024, 6, 1).unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_display() {
        let mut s = heapless::String::<16>::new();
        core::fmt::write(&mut s, format_args!("{}", Date::new(2007, 6, 4).unwrap())).unwrap();
        assert_eq!(s.as_str(), "2007-06-04");
    }
}
