use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bottleneck::{BottleneckCategory, Finding};
use crate::coefficients::{base_error_rate, base_latency_ms};
use crate::models::{RunConfig, Topology};

/// Derived per-component view of one run, keyed by component id in the
/// result map.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ComponentPerformance {
    pub name: String,
    pub requests_handled: u64,
    pub average_latency_ms: f64,
    pub error_rate: f64,
    pub cpu_pct: f64,
    pub memory_pct: f64,
    pub network_in_kbps: f64,
    pub network_out_kbps: f64,
    pub bottlenecks: Vec<Finding>,
    pub recommendations: Vec<String>,
}

/// Models each component's share of the run. Load is a saturating weighted
/// sum of a 0.3 base, 0.2 per incoming edge, and 0.3 per 100 rps of global
/// traffic; everything else derives from that factor.
pub(crate) fn analyze_components(
    topology: &Topology,
    config: &RunConfig,
) -> BTreeMap<String, ComponentPerformance> {
    let rps = config.requests_per_second;
    let duration = config.duration_secs as f64;

    topology
        .components
        .iter()
        .map(|component| {
            let fan_in = topology
                .connections
                .iter()
                .filter(|connection| connection.target == component.id)
                .count() as f64;
            let load_factor = (0.3 + 0.2 * fan_in + 0.3 * (rps / 100.0)).min(1.0);

            let average_latency_ms = (base_latency_ms(component.kind) * (1.0 + load_factor)).round();
            let error_rate = (base_error_rate(component.kind) * (1.0 + load_factor)).min(0.2);
            let cpu_pct = (20.0 + 60.0 * load_factor).min(100.0);
            let memory_pct = (15.0 + 40.0 * load_factor).min(100.0);

            let mut bottlenecks = Vec::new();
            let mut recommendations = Vec::new();
            if cpu_pct > 80.0 {
                bottlenecks.push(Finding::new(BottleneckCategory::Cpu, "High CPU usage"));
                recommendations
                    .push("Scale out this component or optimize its hot paths".to_string());
            }
            if memory_pct > 80.0 {
                bottlenecks.push(Finding::new(BottleneckCategory::Memory, "High memory usage"));
                recommendations
                    .push("Raise the memory limit or cache less aggressively here".to_string());
            }
            if error_rate > 0.05 {
                bottlenecks.push(Finding::new(BottleneckCategory::ErrorRate, "High error rate"));
                recommendations
                    .push("Add retries with backoff and investigate failing calls".to_string());
            }

            let performance = ComponentPerformance {
                name: component.name.clone(),
                requests_handled: (rps * duration * load_factor).round() as u64,
                average_latency_ms,
                error_rate,
                cpu_pct,
                memory_pct,
                network_in_kbps: (rps * load_factor * 2.0).round(),
                network_out_kbps: (rps * load_factor * 1.5).round(),
                bottlenecks,
                recommendations,
            };
            (component.id.clone(), performance)
        })
        .collect()
}
