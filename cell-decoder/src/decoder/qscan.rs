//! `+QSCAN:` full network scan lines.
//!
//! ```text
//! +QSCAN: "LTE",<MCC>,<MNC>,<EARFCN>,<PCI>,<RSRP>,<RSRQ>,<srxlev>,<squal>,<cellID>,<TAC>,<bandwidth>,<band>
//! +QSCAN: "NR5G",<MCC>,<MNC>,<ARFCN>,<PCI>,<RSRP>,<RSRQ>,<srxlev>,<scs>,<cellID>,<TAC>,<carrierBandwidth>,<band>,<offsetToPointA>,<ssbSubcarrierOffset>,<ssbScs>
//! ```

use super::fields::{Fields, Layout};
use super::Draft;
use crate::cell::{
    subcarrier_spacing_khz, Carrier, CarrierRole, CellRecord, LineKind, LteCell, NrCell,
};
use crate::error::LineError;

const LTE: Layout = Layout::exact("QSCAN LTE", 13);
const NR: Layout = Layout::exact("QSCAN NR5G", 16);

pub(super) fn parse(fields: &[&str]) -> Result<Draft, LineError> {
    let rat = fields.first().copied().unwrap_or_default();
    let record = match rat.to_ascii_uppercase().as_str() {
        "LTE" => parse_lte(LTE.check(fields)?)?,
        "NR5G" | "NR" => parse_nr(NR.check(fields)?)?,
        _ => {
            return Err(LineError::UnknownRadio {
                token: rat.to_string(),
            });
        }
    };
    Ok(Draft {
        record,
        explicit_role: None,
    })
}

/// Columns shared by both layouts, which agree up to `<TAC>`.
fn carrier(f: &Fields, band_idx: usize) -> Result<Carrier, LineError> {
    Ok(Carrier {
        source: LineKind::NetworkScan,
        role: CarrierRole::Secondary,
        plmn: f.plmn(1, 2)?,
        channel: f.u32(3, "channel")?,
        physical_cell_id: f.u32(4, "pci")?,
        band: f.u16(band_idx, "band")?,
        cell_id: f.hex(9, "cell_id")?,
        tac: f.hex(10, "tac")?,
        rsrp: f.measurement(5, "rsrp")?,
        rsrq: f.measurement(6, "rsrq")?,
        sinr: None,
        srxlev: f.measurement(7, "srxlev")?,
    })
}

fn parse_lte(f: Fields) -> Result<CellRecord, LineError> {
    Ok(CellRecord::Lte(LteCell {
        carrier: carrier(&f, 12)?,
        duplex: None,
        signal_quality: f.measurement(8, "squal")?,
        bandwidth_code: f.opt_u32(11, "bandwidth")?,
    }))
}

fn parse_nr(f: Fields) -> Result<CellRecord, LineError> {
    Ok(CellRecord::Nr(NrCell {
        carrier: carrier(&f, 12)?,
        duplex: None,
        subcarrier_spacing_khz: f.opt_u32(8, "scs")?.and_then(subcarrier_spacing_khz),
        bandwidth_code: None,
        carrier_bandwidth_rb: f.opt_u32(11, "carrier_bandwidth")?,
        offset_to_point_a: f.opt_u32(13, "offset_to_point_a")?,
        ssb_subcarrier_offset: f.opt_u32(14, "ssb_subcarrier_offset")?,
        ssb_subcarrier_spacing_khz: f
            .opt_u32(15, "ssb_scs")?
            .and_then(subcarrier_spacing_khz),
    }))
}
