//! Channel number to frequency resolution.
//!
//! LTE frequencies come from the per-band EARFCN raster, so the frequency depends
//! on which band the channel is interpreted in. NR frequencies come from the band
//! independent global raster and band matching is a separate lookup.
//!
//! Nothing here fails: a channel outside every catalogued range resolves to an
//! empty candidate list, and a channel inside several ranges resolves to all of
//! them in catalog order.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::band::{self, BandDefinition, DuplexMode, RadioType};

/// Distance between the downlink and uplink EARFCN of an LTE FDD carrier.
pub const LTE_FDD_UPLINK_CHANNEL_OFFSET: u32 = 18000;

/// Last NR-ARFCN of the global raster.
pub const NR_ARFCN_MAX: u32 = 3_279_165;

/// Frequency information derived for one candidate band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyInfo {
    pub radio: RadioType,
    pub band: u16,
    pub band_name: &'static str,
    pub duplex: DuplexMode,
    pub downlink_channel: u32,
    #[serde(serialize_with = "serialize_mhz")]
    pub downlink_mhz: f64,
    /// Equal to the downlink for TDD, `None` for supplemental downlink bands.
    #[serde(serialize_with = "serialize_opt_mhz")]
    pub uplink_mhz: Option<f64>,
    /// Only LTE FDD carriers have a paired uplink channel number.
    pub uplink_channel: Option<u32>,
    /// Set when `uplink_mhz` is the NR FDD midpoint approximation rather than a
    /// value derived from a channel raster.
    pub uplink_estimated: bool,
}

impl fmt::Display for FrequencyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.radio {
            RadioType::Lte => "B",
            RadioType::Nr => "n",
        };
        write!(
            f,
            "{prefix}{} ({}) {} DL {:.2} MHz",
            self.band,
            self.band_name,
            self.duplex.as_str(),
            self.downlink_mhz
        )?;
        if let Some(ul) = self.uplink_mhz {
            let approx = if self.uplink_estimated { "~" } else { "" };
            write!(f, " / UL {approx}{ul:.2} MHz")?;
        }
        Ok(())
    }
}

/// All candidate bands for one channel, plus the band the modem claimed (if any).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyResolution {
    pub candidates: Vec<FrequencyInfo>,
    pub band_hint: Option<u16>,
}

impl FrequencyResolution {
    /// Best guess among the candidates: the hinted band when it is one of them,
    /// otherwise the first candidate in catalog order.
    pub fn primary(&self) -> Option<&FrequencyInfo> {
        self.band_hint
            .and_then(|hint| self.candidates.iter().find(|c| c.band == hint))
            .or_else(|| self.candidates.first())
    }

    pub fn is_ambiguous(&self) -> bool {
        self.candidates.len() > 1
    }

    pub fn is_unresolved(&self) -> bool {
        self.candidates.is_empty()
    }
}

pub fn resolve(radio: RadioType, channel: u32, band_hint: Option<u16>) -> FrequencyResolution {
    let candidates = match radio {
        RadioType::Lte => resolve_lte(channel),
        RadioType::Nr => resolve_nr(channel),
    };
    FrequencyResolution {
        candidates,
        band_hint,
    }
}

pub fn resolve_lte(earfcn: u32) -> Vec<FrequencyInfo> {
    band::bands_containing(RadioType::Lte, earfcn)
        .filter_map(|b| lte_frequency(b, earfcn))
        .collect()
}

fn lte_frequency(band: &BandDefinition, earfcn: u32) -> Option<FrequencyInfo> {
    let raster = band.raster?;
    let steps = f64::from(earfcn - raster.offset) * raster.spacing_mhz;
    let downlink_mhz = band.downlink.low_mhz + steps;

    let (uplink_mhz, uplink_channel) = match band.duplex {
        DuplexMode::Fdd => (
            band.uplink.map(|ul| ul.low_mhz + steps),
            Some(earfcn + LTE_FDD_UPLINK_CHANNEL_OFFSET),
        ),
        DuplexMode::Tdd => (Some(downlink_mhz), None),
        DuplexMode::Sdl => (None, None),
    };

    Some(FrequencyInfo {
        radio: RadioType::Lte,
        band: band.number,
        band_name: band.name,
        duplex: band.duplex,
        downlink_channel: earfcn,
        downlink_mhz,
        uplink_mhz,
        uplink_channel,
        uplink_estimated: false,
    })
}

/// NR-ARFCN to frequency through the global raster (TS 38.104 5.4.2.1).
pub fn nr_frequency_mhz(arfcn: u32) -> Option<f64> {
    let n = f64::from(arfcn);
    match arfcn {
        0..=599_999 => Some(n * 0.005),
        600_000..=2_016_666 => Some(3000.0 + (n - 600_000.0) * 0.015),
        2_016_667..=NR_ARFCN_MAX => Some(24250.08 + (n - 2_016_667.0) * 0.06),
        _ => None,
    }
}

pub fn resolve_nr(arfcn: u32) -> Vec<FrequencyInfo> {
    let Some(downlink_mhz) = nr_frequency_mhz(arfcn) else {
        return Vec::new();
    };

    band::bands_containing(RadioType::Nr, arfcn)
        .map(|b| {
            let (uplink_mhz, uplink_estimated) = match (b.duplex, b.uplink) {
                (DuplexMode::Fdd, Some(ul)) => {
                    (Some(estimate_nr_uplink(b, ul.midpoint_mhz(), downlink_mhz)), true)
                }
                (DuplexMode::Tdd, _) => (Some(downlink_mhz), false),
                _ => (None, false),
            };
            FrequencyInfo {
                radio: RadioType::Nr,
                band: b.number,
                band_name: b.name,
                duplex: b.duplex,
                downlink_channel: arfcn,
                downlink_mhz,
                uplink_mhz,
                uplink_channel: None,
                uplink_estimated,
            }
        })
        .collect()
}

/// NR defines no fixed uplink channel offset, so the uplink is approximated by
/// shifting the downlink by the distance between the uplink and downlink band
/// midpoints. This is a heuristic, not a 3GPP formula.
fn estimate_nr_uplink(band: &BandDefinition, uplink_mid_mhz: f64, downlink_mhz: f64) -> f64 {
    downlink_mhz + (uplink_mid_mhz - band.downlink.midpoint_mhz())
}

fn round_mhz(mhz: f64) -> f64 {
    (mhz * 100.0).round() / 100.0
}

fn serialize_mhz<S: Serializer>(mhz: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_mhz(*mhz))
}

fn serialize_opt_mhz<S: Serializer>(mhz: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match mhz {
        Some(mhz) => serializer.serialize_some(&round_mhz(*mhz)),
        None => serializer.serialize_none(),
    }
}
