use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::analyzer::ComponentPerformance;
use crate::bottleneck::{BottleneckCategory, Finding};
use crate::models::{ComponentType, Topology};

/// Maps tagged findings to a fixed advice catalog, one block per category no
/// matter how many findings share it, then applies two structural heuristics
/// that need the topology rather than the findings.
pub(crate) fn synthesize(
    findings: &[Finding],
    performances: &BTreeMap<String, ComponentPerformance>,
    topology: &Topology,
) -> Vec<String> {
    let categories: BTreeSet<BottleneckCategory> =
        findings.iter().map(|finding| finding.category).collect();

    let mut recommendations = Vec::new();
    for category in categories {
        match category {
            BottleneckCategory::Cpu => {
                recommendations
                    .push("Enable autoscaling for CPU-bound components".to_string());
                recommendations
                    .push("Profile and optimize the hottest request paths".to_string());
            }
            BottleneckCategory::Memory => {
                recommendations
                    .push("Introduce caching or raise memory limits on pressured components"
                        .to_string());
            }
            BottleneckCategory::ErrorRate => {
                recommendations
                    .push("Add circuit breakers around failing dependencies".to_string());
                recommendations
                    .push("Use retries with exponential backoff for transient errors".to_string());
            }
            BottleneckCategory::Network => {
                recommendations.push(
                    "Compress payloads and trim response sizes on hot connections".to_string(),
                );
                recommendations
                    .push("Pool connections between chatty components".to_string());
            }
        }
    }

    let database_under_pressure = topology
        .components
        .iter()
        .filter(|component| component.kind == ComponentType::Database)
        .filter_map(|component| performances.get(&component.id))
        .any(|perf| perf.cpu_pct > 70.0);
    if database_under_pressure {
        recommendations.push(
            "Add read replicas and connection pooling in front of the database".to_string(),
        );
    }

    let cache_count = topology
        .components
        .iter()
        .filter(|component| component.kind == ComponentType::Cache)
        .count();
    if topology.components.len() > 3 && cache_count == 0 {
        recommendations
            .push("Add a caching layer to reduce load on backend components".to_string());
    }

    recommendations
}
