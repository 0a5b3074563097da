use serde::{Deserialize, Serialize};

use crate::band::{DuplexMode, RadioType};
use crate::resolver::{self, FrequencyResolution};

/// Which line family a record was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// `+QSCAN:` full network scan result
    NetworkScan,
    /// `+QENG:` serving cell report
    ServingCell,
    /// `+QCAINFO:` per-band carrier aggregation info
    CarrierInfo,
}

/// Primary or secondary component carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarrierRole {
    Primary,
    Secondary,
}

impl CarrierRole {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "PCC" => Some(Self::Primary),
            "SCC" => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Mobile network identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plmn {
    /// Mobile Country Code, 3 digits
    pub mcc: String,
    /// Mobile Network Code, 2 or 3 digits. Leading zeros are kept.
    pub mnc: String,
}

/// Fields every carrier has, whatever its radio type.
///
/// Measurements are `None` when the modem reported a sentinel (`-` or `-32768`).
/// A `None` reading means "not measured", never zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Carrier {
    pub source: LineKind,
    pub role: CarrierRole,

    /// Absent on lines that do not carry it when no serving cell line provided it.
    pub plmn: Option<Plmn>,

    /// EARFCN for LTE, NR-ARFCN for NR.
    pub channel: u32,
    pub physical_cell_id: u32,

    /// Band the modem claims the carrier is on.
    pub band: u16,

    /// Hex-encoded cell identity (eNB/gNB ID + cell ID)
    pub cell_id: Option<String>,
    /// Hex-encoded tracking area code
    pub tac: Option<String>,

    /// dBm
    pub rsrp: Option<i32>,
    /// dB
    pub rsrq: Option<i32>,
    /// As reported by the modem, no unit conversion is applied.
    pub sinr: Option<i32>,
    pub srxlev: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LteCell {
    #[serde(flatten)]
    pub carrier: Carrier,
    /// Only reported by serving cell lines.
    pub duplex: Option<DuplexMode>,
    /// `squal` from network scans
    pub signal_quality: Option<i32>,
    /// Either a `0..=5` bandwidth code or a resource block count, see
    /// [`lte_bandwidth_mhz`].
    pub bandwidth_code: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NrCell {
    #[serde(flatten)]
    pub carrier: Carrier,
    pub duplex: Option<DuplexMode>,
    pub subcarrier_spacing_khz: Option<u32>,
    /// `0..=14` DL bandwidth code from serving cell and carrier info lines, see
    /// [`nr_bandwidth_mhz`].
    pub bandwidth_code: Option<u32>,
    /// Carrier bandwidth in resource blocks, from network scans.
    pub carrier_bandwidth_rb: Option<u32>,
    pub offset_to_point_a: Option<u32>,
    pub ssb_subcarrier_offset: Option<u32>,
    pub ssb_subcarrier_spacing_khz: Option<u32>,
}

/// One decoded carrier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "radio", rename_all = "lowercase")]
pub enum CellRecord {
    Lte(LteCell),
    Nr(NrCell),
}

impl CellRecord {
    pub fn radio(&self) -> RadioType {
        match self {
            CellRecord::Lte(_) => RadioType::Lte,
            CellRecord::Nr(_) => RadioType::Nr,
        }
    }

    pub fn carrier(&self) -> &Carrier {
        match self {
            CellRecord::Lte(c) => &c.carrier,
            CellRecord::Nr(c) => &c.carrier,
        }
    }

    pub(crate) fn carrier_mut(&mut self) -> &mut Carrier {
        match self {
            CellRecord::Lte(c) => &mut c.carrier,
            CellRecord::Nr(c) => &mut c.carrier,
        }
    }

    pub fn role(&self) -> CarrierRole {
        self.carrier().role
    }

    /// Downlink bandwidth in MHz, when the reported code is known.
    pub fn bandwidth_mhz(&self) -> Option<f64> {
        match self {
            CellRecord::Lte(c) => c.bandwidth_code.and_then(lte_bandwidth_mhz),
            CellRecord::Nr(c) => c.bandwidth_code.and_then(nr_bandwidth_mhz),
        }
    }

    /// Candidate frequencies for this carrier's channel, using the band the modem
    /// reported as the hint for the primary guess.
    pub fn resolve_frequency(&self) -> FrequencyResolution {
        let carrier = self.carrier();
        resolver::resolve(self.radio(), carrier.channel, Some(carrier.band))
    }
}

/// Maps an LTE bandwidth value to MHz.
///
/// Serving cell and scan lines report a `0..=5` code, carrier info lines report
/// the resource block count. The two value sets do not overlap.
pub fn lte_bandwidth_mhz(code: u32) -> Option<f64> {
    match code {
        0 | 6 => Some(1.4),
        1 | 15 => Some(3.0),
        2 | 25 => Some(5.0),
        3 | 50 => Some(10.0),
        4 | 75 => Some(15.0),
        5 | 100 => Some(20.0),
        _ => None,
    }
}

pub fn nr_bandwidth_mhz(code: u32) -> Option<f64> {
    const TABLE: [f64; 15] = [
        5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0,
        100.0, 200.0, 400.0,
    ];
    TABLE.get(code as usize).copied()
}

/// Maps a numerology code (`0..=4`) to kHz. Values that already are a valid
/// spacing in kHz are passed through.
pub fn subcarrier_spacing_khz(value: u32) -> Option<u32> {
    match value {
        0..=4 => Some(15 << value),
        15 | 30 | 60 | 120 | 240 => Some(value),
        _ => None,
    }
}
