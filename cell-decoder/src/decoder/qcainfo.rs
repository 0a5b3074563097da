//! `+QCAINFO:` per-band carrier aggregation lines.
//!
//! ```text
//! +QCAINFO: "PCC",<EARFCN>,<bandwidth RB>,"LTE BAND <n>",<state>,<PCI>,<RSRP>,<RSRQ>,<RSSI>,<SINR>
//! +QCAINFO: "SCC",<EARFCN>,<bandwidth RB>,"LTE BAND <n>",<state>,<PCI>,<RSRP>,<RSRQ>,<RSSI>,<SINR>[,<UL configured>,<UL bandwidth>,<UL EARFCN>]
//! +QCAINFO: "SCC",<ARFCN>,<DL bandwidth>,"NR5G BAND <n>",<PCI>
//! +QCAINFO: "SCC",<ARFCN>,<DL bandwidth>,"NR5G BAND <n>",<state>,<PCI>,<UL configured>,<RSRP>,<RSRQ>[,<SINR>,...]
//! ```
//!
//! These lines carry no PLMN, cell ID or TAC. The decoder fills them in from the
//! serving cell context.

use super::fields::{parse_band_token, Fields, Layout};
use super::Draft;
use crate::band::RadioType;
use crate::cell::{Carrier, CarrierRole, CellRecord, LineKind, LteCell, NrCell};
use crate::error::LineError;

/// Enough to reach the band token, which tells the radio type.
const HEADER: Layout = Layout::range("QCAINFO", 4, usize::MAX);
const LTE: Layout = Layout::range("QCAINFO LTE", 10, 13);
const NR_SHORT: Layout = Layout::exact("QCAINFO NR5G", 5);
const NR_LONG: Layout = Layout::range("QCAINFO NR5G", 9, 12);

pub(super) fn parse(fields: &[&str]) -> Result<Draft, LineError> {
    let header = HEADER.check(fields)?;
    let role_tag = header.text(0);
    let role = CarrierRole::from_tag(role_tag).ok_or_else(|| LineError::UnknownRole {
        token: role_tag.to_string(),
    })?;
    let (radio, band) = parse_band_token(header.text(3))?;

    let record = match radio {
        RadioType::Lte => parse_lte(LTE.check(fields)?, band)?,
        RadioType::Nr if fields.len() == NR_SHORT.min => {
            parse_nr_short(NR_SHORT.check(fields)?, band)?
        }
        RadioType::Nr => parse_nr_long(NR_LONG.check(fields)?, band)?,
    };

    Ok(Draft {
        record,
        explicit_role: Some(role),
    })
}

fn carrier(f: &Fields, band: u16, pci_idx: usize) -> Result<Carrier, LineError> {
    Ok(Carrier {
        source: LineKind::CarrierInfo,
        role: CarrierRole::Secondary,
        plmn: None,
        channel: f.u32(1, "channel")?,
        physical_cell_id: f.u32(pci_idx, "pci")?,
        band,
        cell_id: None,
        tac: None,
        rsrp: None,
        rsrq: None,
        sinr: None,
        srxlev: None,
    })
}

fn parse_lte(f: Fields, band: u16) -> Result<CellRecord, LineError> {
    Ok(CellRecord::Lte(LteCell {
        carrier: Carrier {
            rsrp: f.measurement(6, "rsrp")?,
            rsrq: f.measurement(7, "rsrq")?,
            sinr: f.measurement(9, "sinr")?,
            ..carrier(&f, band, 5)?
        },
        duplex: None,
        signal_quality: None,
        bandwidth_code: f.opt_u32(2, "bandwidth")?,
    }))
}

fn nr_cell(carrier: Carrier, f: &Fields) -> Result<CellRecord, LineError> {
    Ok(CellRecord::Nr(NrCell {
        carrier,
        duplex: None,
        subcarrier_spacing_khz: None,
        bandwidth_code: f.opt_u32(2, "dl_bandwidth")?,
        carrier_bandwidth_rb: None,
        offset_to_point_a: None,
        ssb_subcarrier_offset: None,
        ssb_subcarrier_spacing_khz: None,
    }))
}

fn parse_nr_short(f: Fields, band: u16) -> Result<CellRecord, LineError> {
    nr_cell(carrier(&f, band, 4)?, &f)
}

fn parse_nr_long(f: Fields, band: u16) -> Result<CellRecord, LineError> {
    let carrier = Carrier {
        rsrp: f.measurement(7, "rsrp")?,
        rsrq: f.measurement(8, "rsrq")?,
        sinr: f.measurement(9, "sinr")?,
        ..carrier(&f, band, 5)?
    };
    nr_cell(carrier, &f)
}
