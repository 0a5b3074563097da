//! Static LTE and NR operating band tables.
//!
//! LTE bands follow 3GPP TS 36.101 table 5.7.3-1 (EARFCN numbering) and NR bands
//! follow TS 38.104 tables 5.2-1/5.2-2 and 5.4.2.3-1 (NR-ARFCN numbering).
//!
//! Tables are ordered by band number. Channel ranges may overlap between bands of
//! the same radio type (n77/n78, n1/n65/n66, ...), lookups never pick a winner.

mod lte;
mod nr;

use std::io;

use serde::{Deserialize, Serialize};

pub use lte::LTE_BANDS;
pub use nr::NR_BANDS;

/// Radio access technology a channel number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadioType {
    Lte,
    Nr,
}

impl RadioType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RadioType::Lte => "LTE",
            RadioType::Nr => "NR",
        }
    }
}

impl std::fmt::Display for RadioType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DuplexMode {
    Fdd,
    Tdd,
    /// Supplemental downlink. The band has no uplink of its own.
    Sdl,
}

impl DuplexMode {
    /// Normalize the duplex token the modem reports (`"FDD"`, `"TDD"`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_uppercase().as_str() {
            "FDD" => Some(Self::Fdd),
            "TDD" => Some(Self::Tdd),
            "SDL" => Some(Self::Sdl),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DuplexMode::Fdd => "FDD",
            DuplexMode::Tdd => "TDD",
            DuplexMode::Sdl => "SDL",
        }
    }
}

/// Inclusive frequency range in MHz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FreqRange {
    pub low_mhz: f64,
    pub high_mhz: f64,
}

impl FreqRange {
    pub const fn new(low_mhz: f64, high_mhz: f64) -> Self {
        Self { low_mhz, high_mhz }
    }

    pub fn midpoint_mhz(&self) -> f64 {
        (self.low_mhz + self.high_mhz) / 2.0
    }
}

/// Inclusive range of EARFCN or NR-ARFCN values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelRange {
    pub first: u32,
    pub last: u32,
}

impl ChannelRange {
    pub const fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    pub const fn contains(&self, channel: u32) -> bool {
        self.first <= channel && channel <= self.last
    }
}

/// Per-band linear channel raster. Only LTE bands carry one: NR frequencies come
/// from the band independent global raster instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelRaster {
    /// `N_Offs-DL`, the channel number that maps to the low edge of the band.
    pub offset: u32,
    pub spacing_mhz: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandDefinition {
    pub radio: RadioType,
    pub number: u16,
    /// Common name of the band, e.g. `"AWS-3"`.
    pub name: &'static str,
    pub downlink: FreqRange,
    /// `None` for supplemental downlink bands.
    pub uplink: Option<FreqRange>,
    pub channels: ChannelRange,
    pub raster: Option<ChannelRaster>,
    pub duplex: DuplexMode,
}

impl BandDefinition {
    pub fn contains_channel(&self, channel: u32) -> bool {
        self.channels.contains(channel)
    }
}

/// Every catalogued band of `radio`, ordered by band number.
pub fn bands_for(radio: RadioType) -> &'static [BandDefinition] {
    match radio {
        RadioType::Lte => LTE_BANDS,
        RadioType::Nr => NR_BANDS,
    }
}

pub fn band_by_number(radio: RadioType, number: u16) -> Option<&'static BandDefinition> {
    bands_for(radio).iter().find(|b| b.number == number)
}

/// Every band of `radio` whose channel range contains `channel`, in catalog order.
pub fn bands_containing(
    radio: RadioType,
    channel: u32,
) -> impl Iterator<Item = &'static BandDefinition> {
    bands_for(radio)
        .iter()
        .filter(move |b| b.contains_channel(channel))
}

const CSV_HEADER: [&str; 12] = [
    "radio",
    "band",
    "name",
    "duplex",
    "dl_low_mhz",
    "dl_high_mhz",
    "ul_low_mhz",
    "ul_high_mhz",
    "first_channel",
    "last_channel",
    "channel_offset",
    "channel_spacing_mhz",
];

/// Writes the band table of `radio` as CSV, one row per band.
pub fn write_csv<W: io::Write>(radio: RadioType, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for band in bands_for(radio) {
        let (ul_low, ul_high) = match band.uplink {
            Some(ul) => (ul.low_mhz.to_string(), ul.high_mhz.to_string()),
            None => (String::new(), String::new()),
        };
        let (offset, spacing) = match band.raster {
            Some(r) => (r.offset.to_string(), r.spacing_mhz.to_string()),
            None => (String::new(), String::new()),
        };

        wtr.write_record([
            band.radio.as_str().to_string(),
            band.number.to_string(),
            band.name.to_string(),
            band.duplex.as_str().to_string(),
            band.downlink.low_mhz.to_string(),
            band.downlink.high_mhz.to_string(),
            ul_low,
            ul_high,
            band.channels.first.to_string(),
            band.channels.last.to_string(),
            offset,
            spacing,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
