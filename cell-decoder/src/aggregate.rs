//! Collapses per-carrier readings into one quality percentage per carrier
//! aggregation group.

use serde::Serialize;
use tracing::trace;

use crate::band::RadioType;
use crate::cell::{CarrierRole, CellRecord, Plmn};
use crate::config::Calibration;

/// Signal quality of one carrier aggregation group. `None` means no carrier in
/// the group had a usable reading, which is not the same as 0%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateSignalQuality {
    pub rsrp_percent: Option<u8>,
    pub sinr_percent: Option<u8>,
}

impl AggregateSignalQuality {
    pub fn is_unknown(&self) -> bool {
        self.rsrp_percent.is_none() && self.sinr_percent.is_none()
    }
}

/// Mean of the valid readings, rescaled linearly so that `floor_db` is 0 and
/// `ceiling_db` is 100, clamped and rounded.
///
/// Returns `None` when no reading is valid or the scale is empty.
pub fn aggregate(readings: &[Option<i32>], floor_db: f64, ceiling_db: f64) -> Option<u8> {
    let (sum, count) = readings
        .iter()
        .flatten()
        .fold((0.0, 0u32), |(sum, count), &v| (sum + f64::from(v), count + 1));
    if count == 0 {
        return None;
    }
    let mean = sum / f64::from(count);

    let percent = (mean - floor_db) / (ceiling_db - floor_db) * 100.0;
    if !percent.is_finite() {
        return None;
    }
    Some(percent.clamp(0.0, 100.0).round() as u8)
}

/// Pools the readings of every carrier in `group`, LTE and NR alike.
pub fn signal_quality(group: &[CellRecord], calibration: &Calibration) -> AggregateSignalQuality {
    let rsrp: Vec<_> = group.iter().map(|r| r.carrier().rsrp).collect();
    let sinr: Vec<_> = group.iter().map(|r| r.carrier().sinr).collect();

    let quality = AggregateSignalQuality {
        rsrp_percent: aggregate(
            &rsrp,
            calibration.rsrp_floor_dbm,
            calibration.rsrp_ceiling_dbm,
        ),
        sinr_percent: aggregate(
            &sinr,
            calibration.sinr_floor_db,
            calibration.sinr_ceiling_db,
        ),
    };
    if quality.is_unknown() {
        trace!(carriers = group.len(), "no valid readings in group");
    }
    quality
}

/// Splits a decoded record list into carrier aggregation groups.
///
/// Groups are contiguous runs of records. A new group starts when a primary
/// carrier shows up for a radio type that already has one in the current group,
/// or when the operator changes. An LTE primary followed by an NR primary stays
/// one group (EN-DC).
pub fn carrier_groups(records: &[CellRecord]) -> Vec<&[CellRecord]> {
    let mut groups = Vec::new();
    let mut start = 0;
    let mut primaries: Vec<RadioType> = Vec::new();
    let mut group_plmn: Option<&Plmn> = None;

    for (idx, record) in records.iter().enumerate() {
        let plmn = record.carrier().plmn.as_ref();
        let is_primary = record.role() == CarrierRole::Primary;

        let operator_changed = matches!((group_plmn, plmn), (Some(a), Some(b)) if a != b);
        let repeated_primary = is_primary && primaries.contains(&record.radio());
        if idx > start && (operator_changed || repeated_primary) {
            groups.push(&records[start..idx]);
            start = idx;
            primaries.clear();
            group_plmn = None;
        }

        if is_primary {
            primaries.push(record.radio());
        }
        if group_plmn.is_none() {
            group_plmn = plmn;
        }
    }
    if start < records.len() {
        groups.push(&records[start..]);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;
    use proptest::prelude::*;

    const RSRP_FLOOR: f64 = -140.0;
    const RSRP_CEILING: f64 = -75.0;

    #[test]
    fn mean_of_valid_readings() {
        assert_eq!(
            aggregate(&[Some(-90), None, Some(-100)], RSRP_FLOOR, RSRP_CEILING),
            Some(69)
        );
    }

    #[test]
    fn nothing_valid_is_unknown() {
        assert_eq!(aggregate(&[], RSRP_FLOOR, RSRP_CEILING), None);
        assert_eq!(aggregate(&[None, None], RSRP_FLOOR, RSRP_CEILING), None);
    }

    #[test]
    fn sentinels_do_not_move_the_mean() {
        assert_eq!(
            aggregate(&[Some(-90)], RSRP_FLOOR, RSRP_CEILING),
            aggregate(&[Some(-90), None], RSRP_FLOOR, RSRP_CEILING),
        );
    }

    #[test]
    fn sinr_scale() {
        assert_eq!(aggregate(&[Some(20)], 0.0, 40.0), Some(50));
        assert_eq!(aggregate(&[Some(-5)], 0.0, 40.0), Some(0));
        assert_eq!(aggregate(&[Some(45)], 0.0, 40.0), Some(100));
    }

    #[test]
    fn out_of_range_readings_are_clamped() {
        assert_eq!(aggregate(&[Some(-150)], RSRP_FLOOR, RSRP_CEILING), Some(0));
        assert_eq!(aggregate(&[Some(-60)], RSRP_FLOOR, RSRP_CEILING), Some(100));
    }

    #[test]
    fn empty_scale_is_unknown() {
        assert_eq!(aggregate(&[Some(-90)], -90.0, -90.0), None);
    }

    #[test]
    fn nsa_group_pools_lte_and_nr() {
        let raw = r#"
+QENG: "LTE","FDD",310,260,2A1B30B,393,1150,2,5,5,7E,-95,-11,-64,10
+QENG: "NR5G-NSA",310,260,394,-91,13,-11,520110,41,12,1
"#;
        let records = decode(raw).records;
        let groups = carrier_groups(&records);
        assert_eq!(groups.len(), 1);

        let quality = signal_quality(groups[0], &Calibration::default());
        // mean RSRP -93 dBm, mean SINR 11.5 dB
        assert_eq!(
            quality,
            AggregateSignalQuality {
                rsrp_percent: Some(72),
                sinr_percent: Some(29),
            }
        );
    }

    #[test]
    fn group_without_readings_is_unknown() {
        let raw = r#"+QCAINFO: "SCC",520110,12,"NR5G BAND 41",394"#;
        let records = decode(raw).records;
        let quality = signal_quality(&records, &Calibration::default());
        assert!(quality.is_unknown());
    }

    #[test]
    fn groups_split_on_new_primary_and_operator() {
        let raw = r#"
+QCAINFO: "PCC",1300,100,"LTE BAND 3",1,123,-90,-10,-60,12
+QCAINFO: "SCC",3100,75,"LTE BAND 7",2,57,-100,-14,-70,8
+QCAINFO: "PCC",1850,100,"LTE BAND 3",1,124,-92,-10,-61,11
+QSCAN: "LTE",311,480,66986,12,-99,-12,18,-,0B1C2D3,1F,5,66
"#;
        let records = decode(raw).records;
        let sizes: Vec<_> = carrier_groups(&records).iter().map(|g| g.len()).collect();
        assert_eq!(sizes, vec![2, 1, 1]);
    }

    #[test]
    fn no_records_no_groups() {
        assert!(carrier_groups(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_percent_in_range(
            readings in prop::collection::vec(prop::option::of(-200i32..0), 0..16),
        ) {
            if let Some(p) = aggregate(&readings, RSRP_FLOOR, RSRP_CEILING) {
                prop_assert!(p <= 100);
            }
        }

        #[test]
        fn prop_unknown_iff_no_valid_reading(
            readings in prop::collection::vec(prop::option::of(-200i32..0), 0..16),
        ) {
            let result = aggregate(&readings, RSRP_FLOOR, RSRP_CEILING);
            prop_assert_eq!(result.is_none(), readings.iter().all(Option::is_none));
        }

        #[test]
        fn prop_order_does_not_matter(
            mut readings in prop::collection::vec(prop::option::of(-200i32..0), 0..16),
        ) {
            let forward = aggregate(&readings, RSRP_FLOOR, RSRP_CEILING);
            readings.reverse();
            prop_assert_eq!(forward, aggregate(&readings, RSRP_FLOOR, RSRP_CEILING));
        }
    }
}
