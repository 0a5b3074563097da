//! `+QENG:` serving cell lines.
//!
//! In SA and LTE-only mode the report is a single line prefixed with
//! `"servingcell",<state>`. In EN-DC (NSA) mode the state comes on its own line
//! and the LTE anchor and NR leg follow as bare `"LTE",...` and `"NR5G-NSA",...`
//! lines.

use super::fields::{Fields, Layout};
use super::Draft;
use crate::band::DuplexMode;
use crate::cell::{
    subcarrier_spacing_khz, Carrier, CarrierRole, CellRecord, LineKind, LteCell, NrCell,
};
use crate::error::LineError;

const LTE: Layout = Layout::range("QENG LTE", 15, 18);
const NR_NSA: Layout = Layout::exact("QENG NR5G-NSA", 11);
const NR_SA: Layout = Layout::range("QENG NR5G-SA", 15, 16);

const SERVINGCELL: &str = "servingcell";
const NEIGHBOURCELL: &str = "neighbourcell";

/// `Ok(None)` for lines that are recognised but carry no carrier: the bare
/// `"servingcell",<state>` header and neighbour cell lines.
pub(super) fn parse(fields: &[&str]) -> Result<Option<Draft>, LineError> {
    let fields = match fields.first() {
        Some(&SERVINGCELL) if fields.len() <= 2 => return Ok(None),
        Some(&SERVINGCELL) => &fields[2..],
        Some(tag) if tag.starts_with(NEIGHBOURCELL) => return Ok(None),
        _ => fields,
    };

    let rat = fields.first().copied().unwrap_or_default();
    let record = match rat.to_ascii_uppercase().as_str() {
        "LTE" => parse_lte(LTE.check(fields)?)?,
        "NR5G-NSA" => parse_nr_nsa(NR_NSA.check(fields)?)?,
        "NR5G-SA" => parse_nr_sa(NR_SA.check(fields)?)?,
        _ => {
            return Err(LineError::UnknownRadio {
                token: rat.to_string(),
            });
        }
    };
    Ok(Some(Draft {
        record,
        explicit_role: None,
    }))
}

fn parse_lte(f: Fields) -> Result<CellRecord, LineError> {
    Ok(CellRecord::Lte(LteCell {
        carrier: Carrier {
            source: LineKind::ServingCell,
            role: CarrierRole::Secondary,
            plmn: f.plmn(2, 3)?,
            cell_id: f.hex(4, "cell_id")?,
            physical_cell_id: f.u32(5, "pci")?,
            channel: f.u32(6, "earfcn")?,
            band: f.u16(7, "band")?,
            tac: f.hex(10, "tac")?,
            rsrp: f.measurement(11, "rsrp")?,
            rsrq: f.measurement(12, "rsrq")?,
            sinr: f.measurement(14, "sinr")?,
            srxlev: f.measurement(17, "srxlev")?,
        },
        duplex: DuplexMode::from_token(f.text(1)),
        signal_quality: None,
        bandwidth_code: f.opt_u32(9, "dl_bandwidth")?,
    }))
}

fn parse_nr_nsa(f: Fields) -> Result<CellRecord, LineError> {
    Ok(CellRecord::Nr(NrCell {
        carrier: Carrier {
            source: LineKind::ServingCell,
            role: CarrierRole::Secondary,
            plmn: f.plmn(1, 2)?,
            physical_cell_id: f.u32(3, "pci")?,
            rsrp: f.measurement(4, "rsrp")?,
            sinr: f.measurement(5, "sinr")?,
            rsrq: f.measurement(6, "rsrq")?,
            channel: f.u32(7, "arfcn")?,
            band: f.u16(8, "band")?,
            cell_id: None,
            tac: None,
            srxlev: None,
        },
        duplex: None,
        subcarrier_spacing_khz: f.opt_u32(10, "scs")?.and_then(subcarrier_spacing_khz),
        bandwidth_code: f.opt_u32(9, "dl_bandwidth")?,
        carrier_bandwidth_rb: None,
        offset_to_point_a: None,
        ssb_subcarrier_offset: None,
        ssb_subcarrier_spacing_khz: None,
    }))
}

fn parse_nr_sa(f: Fields) -> Result<CellRecord, LineError> {
    Ok(CellRecord::Nr(NrCell {
        carrier: Carrier {
            source: LineKind::ServingCell,
            role: CarrierRole::Secondary,
            plmn: f.plmn(2, 3)?,
            cell_id: f.hex(4, "cell_id")?,
            physical_cell_id: f.u32(5, "pci")?,
            tac: f.hex(6, "tac")?,
            channel: f.u32(7, "arfcn")?,
            band: f.u16(8, "band")?,
            rsrp: f.measurement(10, "rsrp")?,
            rsrq: f.measurement(11, "rsrq")?,
            sinr: f.measurement(12, "sinr")?,
            srxlev: f.measurement(14, "srxlev")?,
        },
        duplex: DuplexMode::from_token(f.text(1)),
        subcarrier_spacing_khz: f.opt_u32(13, "scs")?.and_then(subcarrier_spacing_khz),
        bandwidth_code: f.opt_u32(9, "dl_bandwidth")?,
        carrier_bandwidth_rb: None,
        offset_to_point_a: None,
        ssb_subcarrier_offset: None,
        ssb_subcarrier_spacing_khz: None,
    }))
}
