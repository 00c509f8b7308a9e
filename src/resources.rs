use serde::{Deserialize, Serialize};

use crate::models::{CostRates, RunConfig, Topology};

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ResourceEstimate {
    pub total_cpu_pct: f64,
    pub total_memory_mb: u64,
    pub total_storage_gb: u64,
    pub network_bandwidth_kbps: u64,
    pub active_connections: u64,
    pub cost: CostEstimate,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct CostEstimate {
    pub hourly_usd: f64,
    pub total_usd: f64,
}

/// Linear footprint model: every component adds a fixed slice, traffic adds
/// a proportional one. Monetized with flat per-resource hourly rates; not a
/// cloud pricing lookup.
pub(crate) fn estimate_resources(
    topology: &Topology,
    config: &RunConfig,
    rates: &CostRates,
) -> ResourceEstimate {
    let components = topology.components.len() as f64;
    let traffic = config.requests_per_second / 100.0;

    let total_cpu_pct = (20.0 + 15.0 * components + 20.0 * traffic).min(100.0);
    let total_memory_mb = (512.0 + 256.0 * components + 512.0 * traffic).round() as u64;
    let total_storage_gb = (10.0 + 5.0 * components + 2.0 * traffic).round() as u64;
    let network_bandwidth_kbps = (config.requests_per_second * 2.0).round() as u64;

    let hourly = (total_cpu_pct / 100.0) * rates.cpu_hourly
        + (total_memory_mb as f64 / 1024.0) * rates.memory_hourly
        + (total_storage_gb as f64 / 1024.0) * rates.storage_hourly
        + (network_bandwidth_kbps as f64 / 1024.0) * rates.network_hourly;
    let total = hourly * (config.duration_secs as f64 / 3600.0);

    ResourceEstimate {
        total_cpu_pct,
        total_memory_mb,
        total_storage_gb,
        network_bandwidth_kbps,
        active_connections: config.users,
        cost: CostEstimate {
            hourly_usd: round_to(hourly, 2),
            total_usd: round_to(total, 2),
        },
    }
}

pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals == 0 {
        return value.round();
    }
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}
