//! Line-oriented decoder for raw modem output.
//!
//! Input is whatever a shell endpoint returned for one or more AT commands. Lines
//! are classified by their response prefix; unrelated lines (echoes, `OK`,
//! other commands) are skipped silently. A recognised line that cannot be parsed
//! is dropped and reported as a [`MalformedLine`], the rest of the batch is still
//! decoded.

pub mod fields;
mod qcainfo;
mod qeng;
mod qscan;

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::band::RadioType;
use crate::cell::{CarrierRole, CellRecord, LineKind, Plmn};
use crate::error::{DecodeError, LineError, MalformedLine};
use fields::{split_quoted_fields, unescape};

const QSCAN_PREFIX: &str = "+QSCAN:";
const QENG_PREFIX: &str = "+QENG:";
const QCAINFO_PREFIX: &str = "+QCAINFO:";

/// Output of one decode pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Decoded {
    /// In input line order.
    pub records: Vec<CellRecord>,
    pub warnings: Vec<MalformedLine>,
}

/// A parsed line before the decoder assigned its role.
#[derive(Debug)]
struct Draft {
    record: CellRecord,
    /// Set by line families that tag PCC/SCC themselves.
    explicit_role: Option<CarrierRole>,
}

/// Identity and location fields learnt from serving cell lines.
#[derive(Debug, Clone, Default)]
struct ServingContext {
    plmn: Option<Plmn>,
    cell_id: Option<String>,
    tac: Option<String>,
}

/// Streaming decoder. Feed it text with [`Decoder::feed`], collect the result
/// with [`Decoder::finish`].
#[derive(Debug, Default)]
pub struct Decoder {
    line_number: usize,
    serving: HashMap<RadioType, ServingContext>,
    primaries: HashSet<(RadioType, Option<Plmn>)>,
    decoded: Decoded,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds complete lines. Chunks must not split a line.
    pub fn feed(&mut self, text: &str) -> &mut Self {
        for line in unescape(text).lines() {
            self.feed_line(line);
        }
        self
    }

    pub fn finish(self) -> Decoded {
        self.decoded
    }

    fn feed_line(&mut self, line: &str) {
        self.line_number += 1;
        let line = line.trim();

        let Some((kind, body)) = classify(line) else {
            if !line.is_empty() {
                trace!(
                    line_number = self.line_number,
                    line,
                    "ignoring unrelated line"
                );
            }
            return;
        };

        let fields = split_quoted_fields(body);
        let parsed = match kind {
            LineKind::NetworkScan => qscan::parse(&fields).map(Some),
            LineKind::ServingCell => qeng::parse(&fields),
            LineKind::CarrierInfo => qcainfo::parse(&fields).map(Some),
        };

        match parsed {
            Ok(Some(draft)) => self.accept(draft),
            Ok(None) => trace!(line_number = self.line_number, "line carries no carrier"),
            Err(reason) => self.reject(kind, line, reason),
        }
    }

    fn reject(&mut self, kind: LineKind, line: &str, reason: LineError) {
        warn!(
            line_number = self.line_number,
            ?kind,
            %reason,
            "dropping malformed modem line"
        );
        self.decoded.warnings.push(MalformedLine {
            line_number: self.line_number,
            kind,
            reason,
            raw: line.to_string(),
        });
    }

    fn accept(&mut self, draft: Draft) {
        let Draft {
            mut record,
            explicit_role,
        } = draft;
        let radio = record.radio();

        match record.carrier().source {
            LineKind::ServingCell => {
                self.remember_serving(&record);
                self.backfill_carrier_info(radio);
                // carrier info came first, the serving line only adds identity
                if let Some(idx) = self.find_carrier(&record, Some(LineKind::CarrierInfo)) {
                    self.merge_serving(idx, &record);
                    return;
                }
            }
            LineKind::CarrierInfo => {
                self.apply_serving(&mut record, explicit_role);
                if self.find_carrier(&record, None).is_some() {
                    debug!(
                        %radio,
                        channel = record.carrier().channel,
                        "carrier already reported by a serving cell line"
                    );
                    return;
                }
            }
            LineKind::NetworkScan => {}
        }

        let key = (radio, record.carrier().plmn.clone());
        let role = match explicit_role {
            Some(role) => role,
            // the first carrier of its radio type is the primary one
            None if self.primaries.contains(&key) => CarrierRole::Secondary,
            None => CarrierRole::Primary,
        };
        if role == CarrierRole::Primary {
            self.primaries.insert(key);
        }
        record.carrier_mut().role = role;

        debug!(
            %radio,
            channel = record.carrier().channel,
            band = record.carrier().band,
            ?role,
            "decoded carrier"
        );
        self.decoded.records.push(record);
    }

    fn remember_serving(&mut self, record: &CellRecord) {
        let carrier = record.carrier();
        let ctx = self.serving.entry(record.radio()).or_default();
        if carrier.plmn.is_some() {
            ctx.plmn.clone_from(&carrier.plmn);
        }
        if carrier.cell_id.is_some() {
            ctx.cell_id.clone_from(&carrier.cell_id);
        }
        if carrier.tac.is_some() {
            ctx.tac.clone_from(&carrier.tac);
        }
    }

    fn apply_serving(&self, record: &mut CellRecord, role: Option<CarrierRole>) {
        let radio = record.radio();
        // the NR leg of EN-DC inherits the PLMN of its LTE anchor
        let plmn = self
            .serving
            .get(&radio)
            .and_then(|ctx| ctx.plmn.clone())
            .or_else(|| {
                self.serving
                    .get(&RadioType::Lte)
                    .and_then(|ctx| ctx.plmn.clone())
            });
        let ctx = self.serving.get(&radio).cloned().unwrap_or_default();

        let carrier = record.carrier_mut();
        carrier.plmn = carrier.plmn.take().or(plmn);
        carrier.tac = carrier.tac.take().or(ctx.tac);
        // secondary carriers are other cells, only the PCC is the serving cell
        if role == Some(CarrierRole::Primary) {
            carrier.cell_id = carrier.cell_id.take().or(ctx.cell_id);
        }
    }

    /// Stamps carrier info records that were decoded before any serving line of
    /// `serving_radio` with the context that line just provided.
    fn backfill_carrier_info(&mut self, serving_radio: RadioType) {
        let Some(ctx) = self.serving.get(&serving_radio).cloned() else {
            return;
        };
        let Self {
            decoded,
            primaries,
            ..
        } = self;

        for record in decoded
            .records
            .iter_mut()
            .filter(|r| r.carrier().source == LineKind::CarrierInfo)
        {
            let radio = record.radio();
            let same_radio = radio == serving_radio;
            let anchored_nr = serving_radio == RadioType::Lte && radio == RadioType::Nr;
            if !same_radio && !anchored_nr {
                continue;
            }

            let role = record.role();
            let carrier = record.carrier_mut();
            if carrier.plmn.is_none() && ctx.plmn.is_some() {
                carrier.plmn.clone_from(&ctx.plmn);
                if role == CarrierRole::Primary {
                    primaries.remove(&(radio, None));
                    primaries.insert((radio, ctx.plmn.clone()));
                }
            }
            if same_radio {
                if carrier.tac.is_none() {
                    carrier.tac.clone_from(&ctx.tac);
                }
                if role == CarrierRole::Primary && carrier.cell_id.is_none() {
                    carrier.cell_id.clone_from(&ctx.cell_id);
                }
            }
        }
    }

    /// Folds a serving cell line into the carrier info record at `idx`, which
    /// describes the same carrier.
    fn merge_serving(&mut self, idx: usize, serving: &CellRecord) {
        let Some(target) = self.decoded.records.get_mut(idx) else {
            return;
        };
        let radio = target.radio();

        let from = serving.carrier();
        let into = target.carrier_mut();
        into.plmn = into.plmn.take().or_else(|| from.plmn.clone());
        // this carrier is the serving cell whatever its aggregation role
        into.cell_id = into.cell_id.take().or_else(|| from.cell_id.clone());
        into.tac = into.tac.take().or_else(|| from.tac.clone());
        into.rsrp = into.rsrp.or(from.rsrp);
        into.rsrq = into.rsrq.or(from.rsrq);
        into.sinr = into.sinr.or(from.sinr);
        into.srxlev = into.srxlev.or(from.srxlev);

        match (&mut *target, serving) {
            (CellRecord::Lte(into), CellRecord::Lte(from)) => {
                into.duplex = into.duplex.or(from.duplex);
            }
            (CellRecord::Nr(into), CellRecord::Nr(from)) => {
                into.duplex = into.duplex.or(from.duplex);
                into.subcarrier_spacing_khz =
                    into.subcarrier_spacing_khz.or(from.subcarrier_spacing_khz);
            }
            _ => {}
        }

        // same outcome as if the serving line had come first
        let key = (radio, target.carrier().plmn.clone());
        if target.role() == CarrierRole::Secondary && !self.primaries.contains(&key) {
            target.carrier_mut().role = CarrierRole::Primary;
            self.primaries.insert(key);
        }

        debug!(
            %radio,
            channel = target.carrier().channel,
            role = ?target.role(),
            "serving cell merged into carrier info record"
        );
    }

    /// Index of an emitted record for the same carrier (radio type, channel and
    /// PCI), optionally restricted to one line family.
    fn find_carrier(&self, record: &CellRecord, source: Option<LineKind>) -> Option<usize> {
        let carrier = record.carrier();
        self.decoded.records.iter().position(|seen| {
            seen.radio() == record.radio()
                && seen.carrier().channel == carrier.channel
                && seen.carrier().physical_cell_id == carrier.physical_cell_id
                && source.is_none_or(|source| seen.carrier().source == source)
        })
    }
}

fn classify(line: &str) -> Option<(LineKind, &str)> {
    [
        (QSCAN_PREFIX, LineKind::NetworkScan),
        (QENG_PREFIX, LineKind::ServingCell),
        (QCAINFO_PREFIX, LineKind::CarrierInfo),
    ]
    .into_iter()
    .find_map(|(prefix, kind)| {
        line.find(prefix)
            .map(|idx| (kind, line[idx + prefix.len()..].trim()))
    })
}

/// Decodes a whole snapshot of modem output.
pub fn decode(text: &str) -> Decoded {
    let mut decoder = Decoder::new();
    decoder.feed(text);
    decoder.finish()
}

/// Like [`decode`], for output that has not been validated as text yet.
pub fn decode_bytes(bytes: &[u8]) -> Result<Decoded, DecodeError> {
    Ok(decode(std::str::from_utf8(bytes)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lte_primary_and_secondary_carrier() {
        let raw = r#"
            +QCAINFO: "PCC",1300,100,"LTE BAND 3",1,123,-90,-10,-60,12
            +QCAINFO: "SCC",3100,75,"LTE BAND 7",2,57,-100,-14,-70,8
        "#;
        let decoded = decode(raw);
        assert!(decoded.warnings.is_empty());
        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.records[0].role(), CarrierRole::Primary);
        assert_eq!(decoded.records[0].carrier().band, 3);
        assert_eq!(decoded.records[1].role(), CarrierRole::Secondary);
        assert_eq!(decoded.records[1].carrier().band, 7);
        assert_eq!(
            decoded.records[0].carrier().plmn,
            decoded.records[1].carrier().plmn
        );
    }

    #[test_log::test]
    fn unknown_radio_is_dropped_with_one_warning() {
        let raw = r#"
            +QSCAN: "LTE",310,260,1300,123,-95,-11,28,-,2A1B30B,7E,3,3
            +QSCAN: "GSM",310,260,128,1,-70,-,-,-,1A2B,3C,-,-
            +QSCAN: "NR5G",310,260,627264,501,-88,-11,20,1,12AB34C05,3A0F,273,78,626280,6,1
        "#;
        let decoded = decode(raw);
        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.warnings.len(), 1);
        let warning = &decoded.warnings[0];
        assert_eq!(warning.line_number, 3);
        assert_eq!(warning.kind, LineKind::NetworkScan);
        assert_eq!(
            warning.reason,
            LineError::UnknownRadio {
                token: "GSM".into()
            }
        );
    }

    #[test]
    fn unrelated_lines_are_ignored_without_warnings() {
        let raw = "AT+QSCAN=3,1\r\nOK\r\n+CSQ: 20,99\r\n\r\nERROR\r\n";
        assert_eq!(decode(raw), Decoded::default());
    }

    #[test]
    fn first_record_of_each_radio_is_primary() {
        let raw = r#"
            +QSCAN: "LTE",310,260,1300,123,-95,-11,28,-,2A1B30B,7E,3,3
            +QSCAN: "NR5G",310,260,627264,501,-88,-11,20,1,12AB34C05,3A0F,273,78,626280,6,1
            +QSCAN: "LTE",310,260,5110,77,-105,-13,12,-,2A1B30C,7E,2,12
            +QSCAN: "LTE",311,480,66986,12,-99,-12,18,-,0B1C2D3,1F,5,66
        "#;
        let roles: Vec<_> = decode(raw).records.iter().map(|r| r.role()).collect();
        assert_eq!(
            roles,
            vec![
                CarrierRole::Primary,
                CarrierRole::Primary,
                CarrierRole::Secondary,
                // different operator
                CarrierRole::Primary,
            ]
        );
    }

    #[test_log::test]
    fn nsa_serving_cell_with_carrier_info() {
        let raw = r#"
AT+QENG="servingcell";+QCAINFO
+QENG: "servingcell","NOCONN"
+QENG: "LTE","FDD",310,260,2A1B30B,393,1150,2,5,5,7E,-95,-11,-64,10,35,-,-
+QENG: "NR5G-NSA",310,260,394,-91,13,-11,520110,41,12,1
+QCAINFO: "PCC",1150,100,"LTE BAND 2",1,393,-95,-11,-64,10
+QCAINFO: "SCC",5110,50,"LTE BAND 12",2,356,-99,-12,-66,5,0,-,-
+QCAINFO: "SCC",520110,12,"NR5G BAND 41",394
OK
"#;
        let decoded = decode(raw);
        assert!(decoded.warnings.is_empty(), "{:?}", decoded.warnings);

        let summary: Vec<_> = decoded
            .records
            .iter()
            .map(|r| (r.radio(), r.carrier().channel, r.role(), r.carrier().source))
            .collect();
        assert_eq!(
            summary,
            vec![
                (RadioType::Lte, 1150, CarrierRole::Primary, LineKind::ServingCell),
                (RadioType::Nr, 520110, CarrierRole::Primary, LineKind::ServingCell),
                (RadioType::Lte, 5110, CarrierRole::Secondary, LineKind::CarrierInfo),
            ]
        );

        let scc = decoded.records[2].carrier();
        assert_eq!(scc.plmn, decoded.records[0].carrier().plmn);
        assert_eq!(scc.tac.as_deref(), Some("7E"));
    }

    #[test_log::test]
    fn carrier_info_before_serving_cell_is_not_duplicated() {
        let raw = r#"
AT+QCAINFO;+QENG="servingcell"
+QCAINFO: "PCC",1150,100,"LTE BAND 2",1,393,-95,-11,-64,10
+QCAINFO: "SCC",5110,50,"LTE BAND 12",2,356,-99,-12,-66,5,0,-,-
+QCAINFO: "SCC",520110,12,"NR5G BAND 41",394
+QENG: "servingcell","NOCONN"
+QENG: "LTE","FDD",310,260,2A1B30B,393,1150,2,5,5,7E,-95,-11,-64,10
+QENG: "NR5G-NSA",310,260,394,-91,13,-11,520110,41,12,1
OK
"#;
        let decoded = decode(raw);
        assert!(decoded.warnings.is_empty(), "{:?}", decoded.warnings);

        let summary: Vec<_> = decoded
            .records
            .iter()
            .map(|r| (r.radio(), r.carrier().channel, r.role()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (RadioType::Lte, 1150, CarrierRole::Primary),
                (RadioType::Lte, 5110, CarrierRole::Secondary),
                (RadioType::Nr, 520110, CarrierRole::Primary),
            ]
        );

        let plmn = Some(Plmn {
            mcc: "310".into(),
            mnc: "260".into(),
        });
        for record in &decoded.records {
            assert_eq!(record.carrier().plmn, plmn);
        }

        let pcc = decoded.records[0].carrier();
        assert_eq!(pcc.cell_id.as_deref(), Some("2A1B30B"));
        assert_eq!(pcc.tac.as_deref(), Some("7E"));
        assert_eq!(decoded.records[1].carrier().tac.as_deref(), Some("7E"));
        assert_eq!(decoded.records[1].carrier().cell_id, None);

        // the NR leg picks up what only the serving line reports
        let CellRecord::Nr(nr) = &decoded.records[2] else {
            panic!("expected an NR record");
        };
        assert_eq!(nr.carrier.rsrp, Some(-91));
        assert_eq!(nr.carrier.sinr, Some(13));
        assert_eq!(nr.subcarrier_spacing_khz, Some(30));
    }

    #[test]
    fn command_order_does_not_change_the_carriers() {
        let serving = r#"
+QENG: "LTE","FDD",310,260,2A1B30B,393,1150,2,5,5,7E,-95,-11,-64,10
+QENG: "NR5G-NSA",310,260,394,-91,13,-11,520110,41,12,1
"#;
        let carrier_info = r#"
+QCAINFO: "PCC",1150,100,"LTE BAND 2",1,393,-95,-11,-64,10
+QCAINFO: "SCC",5110,50,"LTE BAND 12",2,356,-99,-12,-66,5
+QCAINFO: "SCC",520110,12,"NR5G BAND 41",394
"#;
        let carriers = |text: &str| {
            let mut carriers: Vec<_> = decode(text)
                .records
                .into_iter()
                .map(|r| {
                    let c = r.carrier();
                    (r.radio(), c.channel, c.role, c.plmn.clone(), c.tac.clone())
                })
                .collect();
            carriers.sort_by_key(|c| (c.0, c.1));
            carriers
        };

        assert_eq!(
            carriers(&format!("{serving}{carrier_info}")),
            carriers(&format!("{carrier_info}{serving}"))
        );
    }

    #[test]
    fn nr_carrier_info_inherits_lte_plmn() {
        let raw = r#"
+QENG: "LTE","FDD",310,260,2A1B30B,393,1150,2,5,5,7E,-95,-11,-64,10
+QCAINFO: "SCC",627264,12,"NR5G BAND 78",501
"#;
        let decoded = decode(raw);
        assert_eq!(decoded.records.len(), 2);
        assert_eq!(
            decoded.records[1].carrier().plmn,
            decoded.records[0].carrier().plmn
        );
        assert_eq!(decoded.records[1].carrier().tac, None);
    }

    #[test]
    fn json_escaped_blob() {
        let raw = r#"+QCAINFO: \"PCC\",1300,100,\"LTE BAND 3\",1,123,-90,-10,-60,12\r\n+QCAINFO: \"SCC\",3100,75,\"LTE BAND 7\",2,57,-100,-14,-70,8\r\nOK"#;
        let decoded = decode(raw);
        assert_eq!(decoded.records.len(), 2);
        assert!(decoded.warnings.is_empty());
    }

    #[test_log::test]
    fn malformed_lines_do_not_abort_the_batch() {
        let raw = r#"
+QCAINFO: "PCC",1300,100,"LTE BAND 3",1,123,-90,-10,-60,12
+QCAINFO: "SCC",abc,75,"LTE BAND 7",2,57,-100,-14,-70,8
+QCAINFO: "SCC",3100,75
+QCAINFO: "SCC",9820,50,"LTE BAND 30",2,88,-104,-15,-72,3
"#;
        let decoded = decode(raw);
        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.warnings.len(), 2);
        assert!(matches!(
            decoded.warnings[0].reason,
            LineError::InvalidField {
                field: "channel",
                ..
            }
        ));
        assert!(matches!(
            decoded.warnings[1].reason,
            LineError::FieldCount { found: 3, .. }
        ));
    }

    #[test]
    fn sentinels_are_not_zero() {
        let raw = r#"+QCAINFO: "PCC",1300,100,"LTE BAND 3",1,123,-32768,-,-60,-"#;
        let decoded = decode(raw);
        let carrier = decoded.records[0].carrier();
        assert_eq!(carrier.rsrp, None);
        assert_eq!(carrier.rsrq, None);
        assert_eq!(carrier.sinr, None);
    }

    #[test]
    fn feeding_in_chunks_matches_one_shot() {
        let first = "+QENG: \"LTE\",\"FDD\",310,260,2A1B30B,393,1150,2,5,5,7E,-95,-11,-64,10\n";
        let second = "+QCAINFO: \"SCC\",5110,50,\"LTE BAND 12\",2,356,-99,-12,-66,5\n";

        let mut decoder = Decoder::new();
        decoder.feed(first).feed(second);
        assert_eq!(decoder.finish(), decode(&format!("{first}{second}")));
    }

    #[test]
    fn invalid_utf8_is_a_hard_error() {
        let err = decode_bytes(&[0x2b, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidUtf8(_)));
        assert!(decode_bytes(b"OK\r\n").unwrap().records.is_empty());
    }

    proptest! {
        #[test]
        fn prop_never_panics_on_text(s in "\\PC*") {
            let _ = decode(&s);
        }

        #[test]
        fn prop_never_panics_on_bytes(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
            let _ = decode_bytes(&bytes);
        }

        #[test]
        fn prop_never_panics_on_prefixed_garbage(
            prefix in prop::sample::select(vec!["+QSCAN: ", "+QENG: ", "+QCAINFO: "]),
            fields in prop::collection::vec("[-\"A-Z0-9 ]{0,8}", 0..20),
        ) {
            let line = format!("{prefix}{}", fields.join(","));
            let decoded = decode(&line);
            prop_assert!(decoded.records.len() + decoded.warnings.len() <= 1);
        }
    }
}
