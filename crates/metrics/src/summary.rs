//! Metrics summary returned by the `/v1/metrics` endpoint.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

use crate::{Error, Resource, Result};

/// Gauge with the number of allocations running on the node.
const RUNNING_ALLOCATIONS_GAUGE: &str = "nomad.client.allocations.running";

/// Snapshot of the node metrics.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MetricsSummary {
    pub timestamp: String,
    #[serde(deserialize_with = "nullable")]
    pub gauges: Vec<GaugeValue>,
    #[serde(deserialize_with = "nullable")]
    pub points: Vec<PointValue>,
    #[serde(deserialize_with = "nullable")]
    pub counters: Vec<SampledValue>,
    #[serde(deserialize_with = "nullable")]
    pub samples: Vec<SampledValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GaugeValue {
    pub name: String,
    pub value: f64,
    #[serde(deserialize_with = "nullable")]
    pub labels: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PointValue {
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub points: Vec<f64>,
}

/// Aggregated counter or sample.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SampledValue {
    pub name: String,
    pub count: u64,
    pub rate: f64,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub stddev: f64,
    #[serde(deserialize_with = "nullable")]
    pub labels: HashMap<String, String>,
}

/// Go encodes empty slices and maps as `null`.
fn nullable<'de, D, T>(deserializer: D) -> core::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl MetricsSummary {
    /// Returns the sum of all gauges with the given name, or `None` if there is no such gauge.
    #[must_use]
    pub fn gauge(&self, name: &str) -> Option<f64> {
        let mut values = self
            .gauges
            .iter()
            .filter(|gauge| gauge.name == name)
            .map(|gauge| gauge.value)
            .peekable();
        values.peek()?;
        Some(values.sum())
    }

    fn require_gauge(&self, name: &str) -> Result<f64> {
        self.gauge(name)
            .ok_or_else(|| Error::MissingGauge(name.to_owned()))
    }

    /// Computes the utilization fraction of the given resource.
    ///
    /// Allocations are measured against `max_allocations`, other resources against
    /// the sum of their allocated and unallocated amounts. The result may exceed `1.0`
    /// when more allocations than the maximum are running.
    pub fn utilization(&self, resource: Resource, max_allocations: u32) -> Result<f64> {
        if resource == Resource::Allocations {
            if max_allocations == 0 {
                return Err(Error::ZeroMaxAllocations);
            }
            let running = self.require_gauge(RUNNING_ALLOCATIONS_GAUGE)?;
            return Ok(running / f64::from(max_allocations));
        }

        let allocated = self.require_gauge(&format!("nomad.client.allocated.{resource}"))?;
        let unallocated = self.require_gauge(&format!("nomad.client.unallocated.{resource}"))?;
        let total = allocated + unallocated;
        if total <= 0.0 {
            return Err(Error::ZeroCapacity(resource));
        }
        Ok(allocated / total)
    }
}
