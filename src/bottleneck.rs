use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analyzer::ComponentPerformance;
use crate::models::Topology;

/// Structured bottleneck category. Recommendation synthesis matches on this
/// tag, never on the message text.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum BottleneckCategory {
    Cpu,
    Memory,
    ErrorRate,
    Network,
}

impl fmt::Display for BottleneckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BottleneckCategory::Cpu => write!(f, "cpu"),
            BottleneckCategory::Memory => write!(f, "memory"),
            BottleneckCategory::ErrorRate => write!(f, "error-rate"),
            BottleneckCategory::Network => write!(f, "network"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Finding {
    pub category: BottleneckCategory,
    pub message: String,
}

impl Finding {
    pub fn new(category: BottleneckCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

/// Cross-component and cross-connection anomaly scan. Thresholds here are
/// stricter than the per-component rules (10% error rate vs 5%) so the
/// system-level report stays conservative. Flat scan: each component and each
/// connection is judged independently.
pub(crate) fn detect_system_bottlenecks(
    performances: &BTreeMap<String, ComponentPerformance>,
    topology: &Topology,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (id, perf) in performances {
        if perf.cpu_pct > 80.0 {
            findings.push(Finding::new(
                BottleneckCategory::Cpu,
                format!("{} ({}): CPU at {:.1}%", perf.name, id, perf.cpu_pct),
            ));
        }
        if perf.memory_pct > 80.0 {
            findings.push(Finding::new(
                BottleneckCategory::Memory,
                format!("{} ({}): memory at {:.1}%", perf.name, id, perf.memory_pct),
            ));
        }
        if perf.error_rate > 0.1 {
            findings.push(Finding::new(
                BottleneckCategory::ErrorRate,
                format!(
                    "{} ({}): error rate at {:.1}%",
                    perf.name,
                    id,
                    perf.error_rate * 100.0
                ),
            ));
        }
    }

    for connection in &topology.connections {
        let Some(source) = performances.get(&connection.source) else {
            continue;
        };
        if source.network_out_kbps > 1000.0 {
            findings.push(Finding::new(
                BottleneckCategory::Network,
                format!(
                    "high network traffic on {} -> {}: {:.0} KB/s",
                    connection.source, connection.target, source.network_out_kbps
                ),
            ));
        }
    }

    findings
}
