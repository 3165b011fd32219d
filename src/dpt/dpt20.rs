//! DPT 20.1xx - Enumerated operating modes (1 byte)
//!
//! The ISM8 reports and accepts operating modes as single-byte enumeration
//! numbers; applications see the German/English labels from the tables
//! below. Labels follow the Wolf gateway documentation, including the mixed
//! languages of the controller-mode table.
//!
//! Datapoints of the CWL ventilation unit use their own label table for the
//! same 20.102 type number ([`HVAC_MODES_CWL`]); the catalog ties each
//! datapoint to the right table through its type tag, so no id-specific
//! branching exists here.

use crate::error::{Ism8Error, Result};

/// A mode table: wire number to display label.
pub type ModeTable = &'static [(u8, &'static str)];

/// DPT 20.102 - HVAC operating modes (heating circuits)
pub static HVAC_MODES: ModeTable = &[
    (0, "Automatikbetrieb"),
    (1, "Heizbetrieb"),
    (2, "Standby"),
    (3, "Sparbetrieb"),
    (4, "Frostschutz"),
    (5, "Automatikbetrieb kühlen"),
];

/// DPT 20.102, CWL variant - ventilation operating modes
pub static HVAC_MODES_CWL: ModeTable = &[
    (0, "Automatikbetrieb"),
    (1, "Nennlüftung"),
    (2, "Standby"),
    (3, "Reduzierte Lüftung"),
    (4, "Feuchteschutz"),
];

/// DPT 20.103 - Domestic hot water modes
pub static DHW_MODES: ModeTable = &[
    (0, "Automatikbetrieb"),
    (1, "LegioProtect"),
    (2, "Normal"),
    (3, "Reduzierter Betrieb"),
    (4, "Standby"),
];

/// DPT 20.105 - HVAC controller modes
pub static HVAC_CONTR_MODES: ModeTable = &[
    (0, "Auto"),
    (1, "Heizbetrieb"),
    (2, "Morning Warmup"),
    (3, "Kühlbetrieb"),
    (4, "Nachtlüftung"),
    (5, "Precool"),
    (6, "Standby"),
    (7, "Test"),
    (8, "Emergency Heat"),
    (9, "Fan Only"),
    (10, "Free Cool"),
    (11, "Frostschutz"),
    (12, "Maximum Heating Mode"),
    (13, "Economic Heat/Cool Mode"),
    (14, "Dehumidification"),
    (15, "Calibration Mode"),
    (16, "Emergency Cool Mode"),
    (17, "Emergency Steam Mode"),
    (20, "NoDem"),
];

/// Decode a mode number into its label.
///
/// # Errors
///
/// Returns `UnknownEnumValue` if the number has no table entry.
pub fn decode_mode(raw: u32, table: ModeTable) -> Result<&'static str> {
    table
        .iter()
        .find(|(number, _)| u32::from(*number) == raw)
        .map(|(_, label)| *label)
        .ok_or_else(Ism8Error::unknown_enum_value)
}

/// Encode a label into its mode number.
///
/// Matching is whitespace-trimmed and ASCII-case-insensitive (umlauts
/// compare exactly). A label matching zero or more than one table entry is
/// an error — an ambiguous table must never silently pick an entry.
///
/// # Errors
///
/// Returns `UnknownLabel` if not exactly one entry matches.
pub fn encode_mode(label: &str, table: ModeTable) -> Result<u8> {
    let wanted = label.trim();
    let mut matched = None;
    for (number, entry) in table {
        if entry.eq_ignore_ascii_case(wanted) {
            if matched.is_some() {
                return Err(Ism8Error::unknown_label());
            }
            matched = Some(*number);
        }
    }
    matched.ok_or_else(Ism8Error::unknown_label)
}

/// Encode a label into a single wire byte in the caller's buffer.
pub fn encode_mode_into(label: &str, table: ModeTable, buf: &mut [u8]) -> Result<usize> {
    if buf.is_empty() {
        return Err(Ism8Error::buffer_too_small());
    }

    buf[0] = encode_mode(label, table)?;
    Ok(1)
}
