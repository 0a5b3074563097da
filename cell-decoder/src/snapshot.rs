//! Everything derived from one capture of modem output.

use serde::Serialize;
use tracing::debug;

use crate::aggregate::{carrier_groups, signal_quality, AggregateSignalQuality};
use crate::cell::CellRecord;
use crate::config::Calibration;
use crate::decoder::{self, Decoded};
use crate::error::{DecodeError, MalformedLine};
use crate::resolver::FrequencyResolution;

/// Quality of one carrier aggregation group, with the slice of
/// [`Snapshot::records`] it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupQuality {
    /// Index of the group's first record
    pub first_record: usize,
    pub carriers: usize,
    #[serde(flatten)]
    pub quality: AggregateSignalQuality,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub records: Vec<CellRecord>,
    /// One entry per record, same order.
    pub frequencies: Vec<FrequencyResolution>,
    pub groups: Vec<GroupQuality>,
    pub warnings: Vec<MalformedLine>,
}

impl Snapshot {
    pub fn decode(text: &str, calibration: &Calibration) -> Self {
        Self::from_decoded(decoder::decode(text), calibration)
    }

    pub fn decode_bytes(bytes: &[u8], calibration: &Calibration) -> Result<Self, DecodeError> {
        Ok(Self::from_decoded(decoder::decode_bytes(bytes)?, calibration))
    }

    pub fn from_decoded(decoded: Decoded, calibration: &Calibration) -> Self {
        let Decoded { records, warnings } = decoded;

        let frequencies: Vec<_> = records
            .iter()
            .map(|record| {
                let resolution = record.resolve_frequency();
                if resolution.is_unresolved() {
                    debug!(
                        radio = %record.radio(),
                        channel = record.carrier().channel,
                        "channel outside every catalogued band"
                    );
                }
                resolution
            })
            .collect();

        let mut first_record = 0;
        let groups = carrier_groups(&records)
            .into_iter()
            .map(|group| {
                let entry = GroupQuality {
                    first_record,
                    carriers: group.len(),
                    quality: signal_quality(group, calibration),
                };
                first_record += group.len();
                entry
            })
            .collect();

        debug!(
            records = records.len(),
            warnings = warnings.len(),
            "decoded modem snapshot"
        );
        Self {
            records,
            frequencies,
            groups,
            warnings,
        }
    }

    /// Records of the group at `idx` of [`Snapshot::groups`].
    pub fn group_records(&self, idx: usize) -> Option<&[CellRecord]> {
        let group = self.groups.get(idx)?;
        self.records
            .get(group.first_record..group.first_record + group.carriers)
    }
}
