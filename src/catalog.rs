//! Static datapoint catalog.
//!
//! Maps every known datapoint id to its device, display name, type tag,
//! writability and allowed write range. The table is process-wide constant
//! data: built at compile time, shared by reference, never mutated.
//!
//! Ids missing from the table are tolerated on the receive path (the block
//! decoder skips them) but are never writable.
//!
//! Gaps in the id space are real: the gateway firmware grew the datapoint
//! list over several releases, see [`first_fw_version`].

use crate::dpt::{DpValue, DptType};
use crate::error::{Ism8Error, Result};

/// Allowed values for write operations on one datapoint.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueRange {
    /// No constraint beyond the value type itself (booleans, times)
    None,
    /// Inclusive numeric bounds
    Numeric { min: f32, max: f32 },
    /// Exact membership in a label set (may be smaller than the full
    /// decode table of the type)
    Labels(&'static [&'static str]),
    /// Inclusive year window for dates
    Years { min: u16, max: u16 },
}

/// One catalog entry.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Datapoint {
    /// Protocol-wide unique datapoint id
    pub id: u16,
    /// Device group the datapoint belongs to (HG1, BM1, CWL, ...)
    pub device: &'static str,
    /// Display name
    pub name: &'static str,
    /// Type tag; decides wire width and codec
    pub dpt: DptType,
    /// Whether the gateway accepts writes for this id
    pub writable: bool,
    /// Allowed values for writes
    pub range: ValueRange,
}

const fn dp(
    id: u16,
    device: &'static str,
    name: &'static str,
    dpt: DptType,
    writable: bool,
    range: ValueRange,
) -> Datapoint {
    Datapoint {
        id,
        device,
        name,
        dpt,
        writable,
        range,
    }
}

const fn num(min: f32, max: f32) -> ValueRange {
    ValueRange::Numeric { min, max }
}

const fn years(min: u16, max: u16) -> ValueRange {
    ValueRange::Years { min, max }
}

const NONE: ValueRange = ValueRange::None;
const RO: bool = false;
const RW: bool = true;

/// Heating-circuit program labels accepted by the boiler operating modules.
static HEATING_PROGRAMS: &[&str] = &[
    "Automatikbetrieb",
    "Heizbetrieb",
    "Standby",
    "Sparbetrieb",
    "Automatikbetrieb kühlen",
];

/// Heating-circuit program labels accepted by the mixer modules.
static MIXER_PROGRAMS: &[&str] = &[
    "Automatikbetrieb",
    "Heizbetrieb",
    "Standby",
    "Sparbetrieb",
];

/// Hot-water program labels accepted for writes. LegioProtect is reported
/// by the gateway but cannot be selected from outside.
static DHW_PROGRAMS: &[&str] = &["Automatikbetrieb", "Normal", "Reduzierter Betrieb"];

/// The full datapoint table, sorted by id.
#[rustfmt::skip]
pub static DATAPOINTS: &[Datapoint] = &[
    // Heizgerät 1
    dp(1, "HG1", "Störung", DptType::Switch, RO, NONE),
    dp(2, "HG1", "Betriebsart", DptType::HvacContrMode, RO, NONE),
    dp(3, "HG1", "Brennerleistung", DptType::Scaling, RO, NONE),
    dp(4, "HG1", "Kesseltemperatur", DptType::ValueTemp, RO, NONE),
    dp(5, "HG1", "Sammlertemperatur", DptType::ValueTemp, RO, NONE),
    dp(6, "HG1", "Rücklauftemperatur", DptType::ValueTemp, RO, NONE),
    dp(7, "HG1", "Warmwassertemperatur", DptType::ValueTemp, RO, NONE),
    dp(8, "HG1", "Außentemperatur", DptType::ValueTemp, RO, NONE),
    dp(9, "HG1", "Status Brenner", DptType::Switch, RO, NONE),
    dp(10, "HG1", "Status Heizkreispumpe", DptType::Switch, RO, NONE),
    dp(11, "HG1", "Status Speicherladepumpe", DptType::Switch, RO, NONE),
    dp(12, "HG1", "Status 3-Wege-Umschaltventil", DptType::Switch, RO, NONE),
    dp(13, "HG1", "Anlagendruck", DptType::Pressure, RO, NONE),
    // Heizgerät 2
    dp(14, "HG2", "Störung", DptType::Switch, RO, NONE),
    dp(15, "HG2", "Betriebsart", DptType::HvacContrMode, RO, NONE),
    dp(16, "HG2", "Brennerleistung", DptType::Scaling, RO, NONE),
    dp(17, "HG2", "Kesseltemperatur", DptType::ValueTemp, RO, NONE),
    dp(18, "HG2", "Sammlertemperatur", DptType::ValueTemp, RO, NONE),
    dp(19, "HG2", "Rücklauftemperatur", DptType::ValueTemp, RO, NONE),
    dp(20, "HG2", "Warmwassertemperatur", DptType::ValueTemp, RO, NONE),
    dp(21, "HG2", "Außentemperatur", DptType::ValueTemp, RO, NONE),
    dp(22, "HG2", "Status Brenner", DptType::Switch, RO, NONE),
    dp(23, "HG2", "Status Heizkreispumpe", DptType::Switch, RO, NONE),
    dp(24, "HG2", "Status Speicherladepumpe", DptType::Switch, RO, NONE),
    dp(25, "HG2", "Status 3-Wege-Umschaltventil", DptType::Switch, RO, NONE),
    dp(26, "HG2", "Anlagendruck", DptType::Pressure, RO, NONE),
    // Heizgerät 3
    dp(27, "HG3", "Störung", DptType::Switch, RO, NONE),
    dp(28, "HG3", "Betriebsart", DptType::HvacContrMode, RO, NONE),
    dp(29, "HG3", "Brennerleistung", DptType::Scaling, RO, NONE),
    dp(30, "HG3", "Kesseltemperatur", DptType::ValueTemp, RO, NONE),
    dp(31, "HG3", "Sammlertemperatur", DptType::ValueTemp, RO, NONE),
    dp(32, "HG3", "Rücklauftemperatur", DptType::ValueTemp, RO, NONE),
    dp(33, "HG3", "Warmwassertemperatur", DptType::ValueTemp, RO, NONE),
    dp(34, "HG3", "Außentemperatur", DptType::ValueTemp, RO, NONE),
    dp(35, "HG3", "Status Brenner", DptType::Switch, RO, NONE),
    dp(36, "HG3", "Status Heizkreispumpe", DptType::Switch, RO, NONE),
    dp(37, "HG3", "Status Speicherladepumpe", DptType::Switch, RO, NONE),
    dp(38, "HG3", "Status 3-Wege-Umschaltventil", DptType::Switch, RO, NONE),
    dp(39, "HG3", "Anlagendruck", DptType::Pressure, RO, NONE),
    // Heizgerät 4
    dp(40, "HG4", "Störung", DptType::Switch, RO, NONE),
    dp(41, "HG4", "Betriebsart", DptType::HvacContrMode, RO, NONE),
    dp(42, "HG4", "Brennerleistung", DptType::Scaling, RO, NONE),
    dp(43, "HG4", "Kesseltemperatur", DptType::ValueTemp, RO, NONE),
    dp(44, "HG4", "Sammlertemperatur", DptType::ValueTemp, RO, NONE),
    dp(45, "HG4", "Rücklauftemperatur", DptType::ValueTemp, RO, NONE),
    dp(46, "HG4", "Warmwassertemperatur", DptType::ValueTemp, RO, NONE),
    dp(47, "HG4", "Außentemperatur", DptType::ValueTemp, RO, NONE),
    dp(48, "HG4", "Status Brenner", DptType::Switch, RO, NONE),
    dp(49, "HG4", "Status Heizkreispumpe", DptType::Switch, RO, NONE),
    dp(50, "HG4", "Status Speicherladepumpe", DptType::Switch, RO, NONE),
    dp(51, "HG4", "Status 3-Wege-Umschaltventil", DptType::Switch, RO, NONE),
    dp(52, "HG4", "Anlagendruck", DptType::Pressure, RO, NONE),
    // Bedienmodul 1
    dp(53, "BM1", "Störung", DptType::Switch, RO, NONE),
    dp(54, "BM1", "Außentemperatur", DptType::ValueTemp, RO, NONE),
    dp(55, "BM1", "Raumtemperatur", DptType::ValueTemp, RO, NONE),
    dp(56, "BM1", "Warmwassersolltemperatur", DptType::ValueTemp, RW, num(20.0, 80.0)),
    dp(57, "BM1", "Programmwahl Heizkreis", DptType::HvacMode, RW, ValueRange::Labels(HEATING_PROGRAMS)),
    dp(58, "BM1", "Programmwahl Warmwasser", DptType::DhwMode, RW, ValueRange::Labels(DHW_PROGRAMS)),
    dp(59, "BM1", "Heizkreis Zeitprogramm 1", DptType::Switch, RW, NONE),
    dp(60, "BM1", "Heizkreis Zeitprogramm 2", DptType::Switch, RW, NONE),
    dp(61, "BM1", "Heizkreis Zeitprogramm 3", DptType::Switch, RW, NONE),
    dp(62, "BM1", "Warmwasser Zeitprogramm 1", DptType::Switch, RW, NONE),
    dp(63, "BM1", "Warmwasser Zeitprogramm 2", DptType::Switch, RW, NONE),
    dp(64, "BM1", "Warmwasser Zeitprogramm 3", DptType::Switch, RW, NONE),
    dp(65, "BM1", "Sollwertkorrektur", DptType::TempDifference, RW, num(-4.0, 4.0)),
    dp(66, "BM1", "Sparfaktor", DptType::TempDifference, RW, num(0.0, 10.0)),
    // Mischermodul 1
    dp(67, "MM1", "Störung", DptType::Switch, RO, NONE),
    dp(68, "MM1", "Warmwassertemperatur", DptType::ValueTemp, RO, NONE),
    dp(69, "MM1", "Vorlauftemperatur", DptType::ValueTemp, RO, NONE),
    dp(70, "MM1", "Programmwahl Heizkreis", DptType::HvacMode, RW, ValueRange::Labels(MIXER_PROGRAMS)),
    dp(71, "MM1", "Sollwertkorrektur", DptType::TempDifference, RW, num(-4.0, 4.0)),
    dp(72, "MM1", "Mischer Zeitprogramm 1", DptType::Switch, RW, NONE),
    // Mischermodul 2
    dp(73, "MM2", "Störung", DptType::Switch, RO, NONE),
    dp(74, "MM2", "Warmwassertemperatur", DptType::ValueTemp, RO, NONE),
    dp(75, "MM2", "Vorlauftemperatur", DptType::ValueTemp, RO, NONE),
    dp(76, "MM2", "Programmwahl Heizkreis", DptType::HvacMode, RW, ValueRange::Labels(MIXER_PROGRAMS)),
    dp(77, "MM2", "Sollwertkorrektur", DptType::TempDifference, RW, num(-4.0, 4.0)),
    dp(78, "MM2", "Mischer Zeitprogramm 1", DptType::Switch, RW, NONE),
    // Mischermodul 3
    dp(79, "MM3", "Störung", DptType::Switch, RO, NONE),
    dp(80, "MM3", "Warmwassertemperatur", DptType::ValueTemp, RO, NONE),
    dp(81, "MM3", "Vorlauftemperatur", DptType::ValueTemp, RO, NONE),
    dp(82, "MM3", "Programmwahl Heizkreis", DptType::HvacMode, RW, ValueRange::Labels(MIXER_PROGRAMS)),
    dp(83, "MM3", "Sollwertkorrektur", DptType::TempDifference, RW, num(-4.0, 4.0)),
    dp(84, "MM3", "Mischer Zeitprogramm 1", DptType::Switch, RW, NONE),
    // Kaskadenmodul
    dp(85, "KM1", "Störung", DptType::Switch, RO, NONE),
    dp(86, "KM1", "Gesamtvorlauftemperatur", DptType::ValueTemp, RO, NONE),
    dp(87, "KM1", "Sammlertemperatur", DptType::ValueTemp, RO, NONE),
    dp(88, "KM1", "Status Zubringerpumpe", DptType::Switch, RO, NONE),
    dp(89, "KM1", "Stellgrad Mischer", DptType::Scaling, RO, NONE),
    // Solarmodul
    dp(90, "SM", "Störung", DptType::Switch, RO, NONE),
    dp(91, "SM", "Warmwassertemperatur Solar 1", DptType::ValueTemp, RO, NONE),
    dp(92, "SM", "Temperatur Kollektor 1", DptType::ValueTemp, RO, NONE),
    dp(93, "SM", "Durchfluss", DptType::FlowRate, RO, NONE),
    dp(94, "SM", "Aktuelle Leistung", DptType::Power, RO, NONE),
    dp(95, "SM", "Status Solarkreispumpe", DptType::Switch, RO, NONE),
    dp(96, "SM", "Tagesertrag", DptType::ActiveEnergyKwh, RO, NONE),
    dp(97, "SM", "Gesamtertrag", DptType::ActiveEnergyKwh, RO, NONE),
    // Bedienmodul 2
    dp(98, "BM2", "Störung", DptType::Switch, RO, NONE),
    dp(99, "BM2", "Außentemperatur", DptType::ValueTemp, RO, NONE),
    dp(100, "BM2", "Raumtemperatur", DptType::ValueTemp, RO, NONE),
    dp(101, "BM2", "Sollwertkorrektur", DptType::TempDifference, RW, num(-4.0, 4.0)),
    // Bedienmodul 3
    dp(102, "BM3", "Störung", DptType::Switch, RO, NONE),
    dp(103, "BM3", "Außentemperatur", DptType::ValueTemp, RO, NONE),
    dp(104, "BM3", "Raumtemperatur", DptType::ValueTemp, RO, NONE),
    dp(105, "BM3", "Sollwertkorrektur", DptType::TempDifference, RW, num(-4.0, 4.0)),
    // Bedienmodul 4
    dp(106, "BM4", "Störung", DptType::Switch, RO, NONE),
    dp(107, "BM4", "Außentemperatur", DptType::ValueTemp, RO, NONE),
    dp(108, "BM4", "Raumtemperatur", DptType::ValueTemp, RO, NONE),
    dp(109, "BM4", "Sollwertkorrektur", DptType::TempDifference, RW, num(-4.0, 4.0)),
    // Heizgeräte, erweiterte Messwerte
    dp(110, "HG1", "Abgastemperatur", DptType::ValueTemp, RO, NONE),
    dp(111, "HG1", "Status Zündung", DptType::Switch, RO, NONE),
    dp(112, "HG1", "Modulationsgrad", DptType::Scaling, RO, NONE),
    dp(113, "HG2", "Abgastemperatur", DptType::ValueTemp, RO, NONE),
    dp(114, "HG2", "Status Zündung", DptType::Switch, RO, NONE),
    dp(115, "HG2", "Modulationsgrad", DptType::Scaling, RO, NONE),
    dp(116, "HG3", "Abgastemperatur", DptType::ValueTemp, RO, NONE),
    dp(117, "HG3", "Status Zündung", DptType::Switch, RO, NONE),
    dp(118, "HG3", "Modulationsgrad", DptType::Scaling, RO, NONE),
    dp(119, "HG4", "Abgastemperatur", DptType::ValueTemp, RO, NONE),
    dp(120, "HG4", "Status Zündung", DptType::Switch, RO, NONE),
    dp(121, "HG4", "Modulationsgrad", DptType::Scaling, RO, NONE),
    // Solarmodul, zweites Kollektorfeld
    dp(135, "SM", "Temperatur Kollektor 2", DptType::ValueTemp, RO, NONE),
    dp(136, "SM", "Warmwassertemperatur Solar 2", DptType::ValueTemp, RO, NONE),
    dp(137, "SM", "Status Pumpe Kollektor 2", DptType::Switch, RO, NONE),
    dp(138, "SM", "Momentanleistung Kollektor 2", DptType::Power, RO, NONE),
    dp(139, "SM", "Durchfluss Kollektor 2", DptType::FlowRate, RO, NONE),
    // Wohnraumlüftung
    dp(146, "CWL", "Störung", DptType::Switch, RO, NONE),
    dp(147, "CWL", "Betriebsart", DptType::HvacContrMode, RO, NONE),
    dp(148, "CWL", "Abluftfeuchte", DptType::Scaling, RO, NONE),
    dp(149, "CWL", "Programmwahl", DptType::HvacModeCwl, RW, ValueRange::Labels(&[
        "Automatikbetrieb",
        "Nennlüftung",
        "Standby",
        "Reduzierte Lüftung",
        "Feuchteschutz",
    ])),
    dp(150, "CWL", "Zeitprogramm 1", DptType::Switch, RW, NONE),
    dp(151, "CWL", "Zeitprogramm 2", DptType::Switch, RW, NONE),
    dp(152, "CWL", "Zeitprogramm 3", DptType::Switch, RW, NONE),
    dp(153, "CWL", "Intensivlüftung", DptType::Switch, RW, NONE),
    dp(154, "CWL", "Datum Filterwechsel", DptType::Date, RW, years(2000, 2099)),
    dp(155, "CWL", "Datum nächster Filterwechsel", DptType::Date, RO, NONE),
    dp(156, "CWL", "Startzeit Intensivlüftung", DptType::TimeOfDay, RW, NONE),
    dp(157, "CWL", "Endzeit Intensivlüftung", DptType::TimeOfDay, RW, NONE),
    dp(158, "CWL", "Zulufttemperatur", DptType::ValueTemp, RO, NONE),
    dp(159, "CWL", "Datum letzter Filterwechsel", DptType::Date, RO, NONE),
    dp(160, "CWL", "Uhrzeit letzter Filterwechsel", DptType::TimeOfDay, RO, NONE),
    dp(161, "CWL", "Startzeit Nennlüftung", DptType::TimeOfDay, RW, NONE),
    // Luft/Wasser-Wärmepumpe
    dp(162, "BWL", "Störung", DptType::Switch, RO, NONE),
    dp(163, "BWL", "Status Verdichter", DptType::Switch, RO, NONE),
    dp(164, "BWL", "Status Heizkreispumpe", DptType::Switch, RO, NONE),
    dp(165, "BWL", "Status Zubringerpumpe", DptType::Switch, RO, NONE),
    dp(166, "BWL", "Status 3-Wege-Umschaltventil", DptType::Switch, RO, NONE),
    dp(167, "BWL", "Status E-Heizung", DptType::Switch, RO, NONE),
    dp(168, "BWL", "Status Kühlbetrieb", DptType::Switch, RO, NONE),
    dp(169, "BWL", "Status Abtaubetrieb", DptType::Switch, RO, NONE),
    dp(170, "BWL", "Anlagendruck", DptType::Pressure, RO, NONE),
    dp(171, "BWL", "Vorlauftemperatur", DptType::ValueTemp, RO, NONE),
    dp(172, "BWL", "Rücklauftemperatur", DptType::ValueTemp, RO, NONE),
    dp(173, "BWL", "Warmwassertemperatur", DptType::ValueTemp, RO, NONE),
    dp(174, "BWL", "Außentemperatur", DptType::ValueTemp, RO, NONE),
    dp(175, "BWL", "Leistungsaufnahme", DptType::Power, RO, NONE),
    dp(176, "BWL", "Wärmeleistung", DptType::Power, RO, NONE),
    dp(177, "BWL", "Betriebsart", DptType::HvacContrMode, RO, NONE),
    dp(178, "BWL", "Temperatur Verdampfer", DptType::ValueTemp, RO, NONE),
    dp(179, "BWL", "Temperatur Verflüssiger", DptType::ValueTemp, RO, NONE),
    dp(180, "BWL", "Drehzahl Verdichter", DptType::Scaling, RO, NONE),
    dp(181, "BWL", "Durchfluss", DptType::FlowRate, RO, NONE),
    dp(182, "BWL", "Energieertrag Tag", DptType::ActiveEnergyKwh, RO, NONE),
    dp(183, "BWL", "Energieertrag gesamt", DptType::ActiveEnergyKwh, RO, NONE),
    dp(184, "BWL", "Leistung Heizstab", DptType::Power, RO, NONE),
    // Firmware 1.50 additions
    dp(192, "CWL", "Filterwarnung aktiv", DptType::Switch, RO, NONE),
    dp(193, "CWL", "Status Bypass", DptType::Switch, RO, NONE),
];

/// Look up a datapoint descriptor by id.
pub fn lookup(dp_id: u16) -> Option<&'static Datapoint> {
    DATAPOINTS
        .binary_search_by_key(&dp_id, |dp| dp.id)
        .ok()
        .map(|index| &DATAPOINTS[index])
}

/// Device group of a datapoint, or "" if unknown.
pub fn device(dp_id: u16) -> &'static str {
    lookup(dp_id).map_or("", |dp| dp.device)
}

/// Display name of a datapoint, or "" if unknown.
pub fn name(dp_id: u16) -> &'static str {
    lookup(dp_id).map_or("", |dp| dp.name)
}

/// Type tag of a datapoint.
pub fn datapoint_type(dp_id: u16) -> Option<DptType> {
    lookup(dp_id).map(|dp| dp.dpt)
}

/// Unit string of a datapoint, or "" if unknown.
pub fn unit(dp_id: u16) -> &'static str {
    lookup(dp_id).map_or("", |dp| dp.dpt.unit())
}

/// Whether the gateway accepts writes for this id. Unknown ids are never
/// writable.
pub fn is_writable(dp_id: u16) -> bool {
    lookup(dp_id).is_some_and(|dp| dp.writable)
}

/// Allowed values for write operations on this id.
pub fn value_range(dp_id: u16) -> ValueRange {
    lookup(dp_id).map_or(ValueRange::None, |dp| dp.range)
}

/// The whole catalog, sorted by id.
pub fn all_datapoints() -> &'static [Datapoint] {
    DATAPOINTS
}

/// Sorted, de-duplicated list of device groups present in the catalog.
pub fn all_devices() -> heapless::Vec<&'static str, 32> {
    let mut devices: heapless::Vec<&'static str, 32> = heapless::Vec::new();
    for dp in DATAPOINTS {
        if !devices.contains(&dp.device) {
            // The device count is fixed at compile time and far below the
            // capacity, so a push can only fail if the catalog grows wildly.
            let _ = devices.push(dp.device);
        }
    }
    devices.sort_unstable();
    devices
}

/// First gateway firmware version that reports a datapoint id.
pub fn first_fw_version(dp_id: u16) -> &'static str {
    if (192..208).contains(&dp_id) {
        return "1.50";
    }
    if matches!(dp_id, 209 | 210 | 211 | 251) {
        return "1.70";
    }
    if (355..362).contains(&dp_id) {
        return "1.70";
    }
    if (364..373).contains(&dp_id) {
        return "1.80";
    }
    if (212..251).contains(&dp_id) {
        return "1.80";
    }
    "1.00"
}

/// Validate a value for writing to a datapoint.
///
/// Checks run in order: the id must be known, the datapoint writable, the
/// value's representation must match the type tag, and the value must lie
/// within the allowed range (exact membership for label sets, inclusive
/// bounds for numeric and year windows). Nothing is transmitted or cached
/// here.
pub fn validate_dp_range(dp_id: u16, value: &DpValue) -> Result<()> {
    let Some(dp) = lookup(dp_id) else {
        return Err(Ism8Error::unknown_datapoint());
    };

    if !dp.writable {
        return Err(Ism8Error::not_writable());
    }

    if !dp.dpt.accepts(value) {
        return Err(Ism8Error::type_mismatch());
    }

    let in_range = match (dp.range, value) {
        (ValueRange::None, _) => true,
        (ValueRange::Numeric { min, max }, DpValue::Float(v)) => *v >= min && *v <= max,
        (ValueRange::Numeric { min, max }, DpValue::Int(v)) => {
            let v = *v as f32;
            v >= min && v <= max
        }
        (ValueRange::Labels(allowed), DpValue::Text(label)) => allowed.contains(label),
        (ValueRange::Years { min, max }, DpValue::Date(d)) => {
            d.year() >= min && d.year() <= max
        }
        // Range kind and value kind are tied together by the type check
        _ => true,
    };

    if in_range {
        Ok(())
    } else {
        Err(Ism8Error::out_of_range())
    }
}

/// Assert at test time that catalog label sets stay encodable: every label
/// allowed for writing must exist in the type's mode table.
#[cfg(test)]
fn allowed_labels_are_encodable(dp: &Datapoint) -> bool {
    use crate::dpt::dpt20;

    let table = match dp.dpt {
        DptType::HvacMode => dpt20::HVAC_MODES,
        DptType::HvacModeCwl => dpt20::HVAC_MODES_CWL,
        DptType::DhwMode => dpt20::DHW_MODES,
        DptType::HvacContrMode => dpt20::HVAC_CONTR_MODES,
        _ => return true,
    };
    match dp.range {
        ValueRange::Labels(allowed) => allowed
            .iter()
            .all(|label| dpt20::encode_mode(label, table).is_ok()),
        _ => true,
    }
}
