use crate::engine::SimulationResult;
use crate::error::{Error, Result};

pub trait Formatter {
    fn write(&self, result: &SimulationResult) -> Result<String>;
}

/// Full report: aggregates, per-component table, findings, advice, cost.
pub struct HumanFormatter;

/// Aggregates and score only.
pub struct SummaryFormatter;

/// The whole result as pretty-printed JSON (snake_case fields).
pub struct JsonFormatter;

impl Formatter for SummaryFormatter {
    fn write(&self, result: &SimulationResult) -> Result<String> {
        let mut out = String::new();
        out.push_str(&format!(
            "Simulation {} (system {})\n",
            result.simulation_id, result.system_id
        ));
        out.push_str(&format!("Score: {}/100\n", result.performance_score));
        out.push_str(&format!(
            "Latency: avg {:.1}ms, p95 {:.1}ms, p99 {:.1}ms\n",
            result.metrics.average_latency_ms,
            result.metrics.p95_latency_ms,
            result.metrics.p99_latency_ms
        ));
        out.push_str(&format!(
            "Throughput: {:.1} rps, error rate {:.2}%\n",
            result.metrics.average_throughput_rps,
            result.metrics.average_error_rate * 100.0
        ));
        out.push_str(&format!(
            "Requests: {} total ({} ok, {} failed)\n",
            result.metrics.total_requests,
            result.metrics.successful_requests,
            result.metrics.failed_requests
        ));
        Ok(out)
    }
}

impl Formatter for HumanFormatter {
    fn write(&self, result: &SimulationResult) -> Result<String> {
        let mut out = SummaryFormatter.write(result)?;

        out.push_str("Components:\n");
        for (id, perf) in &result.components {
            out.push_str(&format!(
                "  {} ({}): {} req, {:.0}ms, err {:.2}%, cpu {:.1}%, mem {:.1}%, net {:.0}/{:.0} KB/s\n",
                perf.name,
                id,
                perf.requests_handled,
                perf.average_latency_ms,
                perf.error_rate * 100.0,
                perf.cpu_pct,
                perf.memory_pct,
                perf.network_in_kbps,
                perf.network_out_kbps
            ));
            for finding in &perf.bottlenecks {
                out.push_str(&format!("    [{}] {}\n", finding.category, finding.message));
            }
        }

        if result.bottlenecks.is_empty() {
            out.push_str("Bottlenecks: none\n");
        } else {
            out.push_str("Bottlenecks:\n");
            for finding in &result.bottlenecks {
                out.push_str(&format!("  [{}] {}\n", finding.category, finding.message));
            }
        }

        if !result.recommendations.is_empty() {
            out.push_str("Recommendations:\n");
            for recommendation in &result.recommendations {
                out.push_str(&format!("  - {}\n", recommendation));
            }
        }

        out.push_str(&format!(
            "Resources: cpu {:.1}%, memory {} MB, storage {} GB, network {} KB/s, connections {}\n",
            result.resources.total_cpu_pct,
            result.resources.total_memory_mb,
            result.resources.total_storage_gb,
            result.resources.network_bandwidth_kbps,
            result.resources.active_connections
        ));
        out.push_str(&format!(
            "Cost: ${:.2}/hour, ${:.2} for this run\n",
            result.resources.cost.hourly_usd, result.resources.cost.total_usd
        ));
        Ok(out)
    }
}

impl Formatter for JsonFormatter {
    fn write(&self, result: &SimulationResult) -> Result<String> {
        let mut json = serde_json::to_string_pretty(result)
            .map_err(|err| Error::Output(err.to_string()))?;
        json.push('\n');
        Ok(json)
    }
}
