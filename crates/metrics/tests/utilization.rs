use nomad_blinkt_metrics::{Error, MetricsSummary, Resource};

fn summary(json: &str) -> MetricsSummary {
    serde_json::from_str(json).unwrap()
}

const NODE: &str = r#"{
    "Timestamp": "2023-05-01 10:00:00 +0000 UTC",
    "Gauges": [
        {"Name": "nomad.client.allocations.running", "Value": 6, "Labels": {"node_id": "a"}},
        {"Name": "nomad.client.allocated.cpu", "Value": 1500, "Labels": null},
        {"Name": "nomad.client.unallocated.cpu", "Value": 500, "Labels": null},
        {"Name": "nomad.client.allocated.disk", "Value": 0, "Labels": {}},
        {"Name": "nomad.client.unallocated.disk", "Value": 0, "Labels": {}},
        {"Name": "nomad.runtime.num_goroutines", "Value": 87, "Labels": {}}
    ],
    "Counters": [
        {"Name": "nomad.client.allocs.start", "Count": 4, "Rate": 0.4, "Sum": 4, "Min": 1, "Max": 1, "Mean": 1, "Stddev": 0, "Labels": {}}
    ],
    "Samples": null
}"#;

#[test]
fn test_decode_summary() {
    let summary = summary(NODE);
    assert_eq!(summary.gauges.len(), 6);
    assert!(summary.gauges[1].labels.is_empty());
    assert_eq!(summary.counters[0].count, 4);
    assert!(summary.samples.is_empty());
    assert!(summary.points.is_empty());
}

#[test]
fn test_allocations_utilization() {
    let summary = summary(NODE);
    assert!((summary.utilization(Resource::Allocations, 8).unwrap() - 0.75).abs() < f64::EPSILON);
    // More allocations than the maximum overflow the gauge.
    assert!((summary.utilization(Resource::Allocations, 4).unwrap() - 1.5).abs() < f64::EPSILON);
    assert!(matches!(
        summary.utilization(Resource::Allocations, 0),
        Err(Error::ZeroMaxAllocations)
    ));
}

#[test]
fn test_resource_utilization() {
    let summary = summary(NODE);
    assert!((summary.utilization(Resource::Cpu, 8).unwrap() - 0.75).abs() < f64::EPSILON);
    assert!(matches!(
        summary.utilization(Resource::Disk, 8),
        Err(Error::ZeroCapacity(Resource::Disk))
    ));
    assert!(matches!(
        summary.utilization(Resource::Memory, 8),
        Err(Error::MissingGauge(name)) if name == "nomad.client.allocated.memory"
    ));
}

#[test]
fn test_gauges_are_summed() {
    let summary = summary(
        r#"{"Gauges": [
            {"Name": "nomad.client.allocations.running", "Value": 1},
            {"Name": "nomad.client.allocations.running", "Value": 2}
        ]}"#,
    );
    assert_eq!(summary.gauge("nomad.client.allocations.running"), Some(3.0));
    assert_eq!(summary.gauge("nomad.client.allocations.pending"), None);
    assert!(summary.timestamp.is_empty());
}
