//! Nomad metrics client
//!
//! Fetches the metrics summary of a Nomad client node and derives the utilization
//! fraction of a single resource from its gauges.

// Linter configuration
#![warn(unsafe_code, clippy::pedantic, clippy::use_self)]
// Too many false positives.
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::cast_precision_loss
)]

pub use crate::{
    client::{Client, Config, TlsConfig, DEFAULT_ADDRESS},
    errors::{Error, Result},
    resource::Resource,
    summary::{GaugeValue, MetricsSummary, PointValue, SampledValue},
};

mod client;
mod errors;
mod resource;
mod summary;
