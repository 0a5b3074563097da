//! Decoder for Quectel cellular modem telemetry and LTE/NR channel to
//! frequency resolver.
//!
//! The usual entry point is [`Snapshot::decode`], which decodes a capture of raw
//! AT command output, resolves every carrier's channel to candidate frequencies
//! and computes one signal quality figure per carrier aggregation group.

pub mod aggregate;
pub mod band;
pub mod cell;
pub mod config;
pub mod decoder;
pub mod error;
pub mod resolver;
pub mod snapshot;

pub use aggregate::{aggregate, AggregateSignalQuality};
pub use band::{BandDefinition, DuplexMode, RadioType};
pub use cell::{CarrierRole, CellRecord};
pub use config::{Calibration, Config};
pub use decoder::{decode, decode_bytes, Decoded, Decoder};
pub use error::{DecodeError, LineError, MalformedLine};
pub use resolver::{resolve, FrequencyInfo, FrequencyResolution};
pub use snapshot::Snapshot;
