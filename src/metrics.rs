use rand::rngs::StdRng;
use rand::Rng;

use crate::coefficients::base_latency_ms;
use crate::models::{EngineParams, FailureKind, RunConfig, Topology};
use crate::traffic::multiplier;

/// One simulated time slice. Held only for the duration of a run (plus the
/// series store's retention window) and consumed by the aggregator.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MetricSample {
    /// Step start relative to the beginning of the run.
    pub offset_ms: u64,
    pub latency_ms: f64,
    pub throughput_rps: f64,
    pub error_rate: f64,
    pub cpu_pct: f64,
    pub memory_pct: f64,
    pub network_kbps: f64,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AggregateMetrics {
    pub average_latency_ms: f64,
    pub p95_latency_ms: f64,
    pub p99_latency_ms: f64,
    pub average_throughput_rps: f64,
    pub average_error_rate: f64,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
}

pub fn step_count(duration_secs: u64, max_steps: u64) -> u64 {
    duration_secs.min(max_steps)
}

/// Generates the full step series for one run. Sequential on purpose: the
/// aggregator needs the complete series, and a run is bounded by the step cap
/// anyway.
pub(crate) fn generate_series(
    config: &RunConfig,
    topology: &Topology,
    params: &EngineParams,
    rng: &mut StdRng,
) -> Vec<MetricSample> {
    let steps = step_count(config.duration_secs, params.max_steps);
    if steps == 0 {
        return Vec::new();
    }
    let step_duration_secs = config.duration_secs as f64 / steps as f64;

    let base_latency: f64 = topology
        .components
        .iter()
        .map(|component| base_latency_ms(component.kind))
        .sum::<f64>()
        + 2.0 * topology.connections.len() as f64;

    let mut samples = Vec::with_capacity(steps as usize);
    for step in 0..steps {
        let progress = step as f64 / steps as f64;
        let rps = config.requests_per_second * multiplier(config.traffic_pattern, progress);
        let load_factor = (rps / 100.0).max(1.0);

        let latency_ms =
            (base_latency * load_factor + jitter(rng, params.latency_jitter_ms)).max(0.0);
        let error_rate = step_error_rate(config, progress, rps, params.error_rate_cap);
        let cpu_pct = (rps / 10.0 + jitter(rng, params.cpu_jitter_pct)).clamp(0.0, 100.0);
        let memory_pct =
            (30.0 + rps / 20.0 + jitter(rng, params.memory_jitter_pct)).clamp(0.0, 100.0);

        samples.push(MetricSample {
            offset_ms: (step as f64 * step_duration_secs * 1000.0).round() as u64,
            latency_ms,
            throughput_rps: rps,
            error_rate,
            cpu_pct,
            memory_pct,
            network_kbps: rps * 1.5,
        });
    }

    samples
}

fn step_error_rate(config: &RunConfig, progress: f64, rps: f64, cap: f64) -> f64 {
    let mut rate: f64 = 0.01;
    if rps > 200.0 {
        rate += 0.02;
    }
    if rps > 500.0 {
        rate += 0.03;
    }
    for scenario in &config.failure_scenarios {
        match scenario.kind {
            FailureKind::NetworkPartition => {
                if progress > 0.3 && progress < 0.7 {
                    rate += 0.10;
                }
            }
            FailureKind::ServiceFailure => {
                if progress > 0.5 && progress < 0.6 {
                    rate += 0.20;
                }
            }
        }
    }
    rate.clamp(0.0, cap)
}

fn jitter(rng: &mut StdRng, half_width: f64) -> f64 {
    if half_width <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-half_width..=half_width)
}

/// Reduces the step series to summary statistics. `total_requests` comes from
/// the config (`users * rps * duration`), not from integrating the sampled
/// throughput; the two are deliberately decoupled approximations.
pub(crate) fn aggregate(samples: &[MetricSample], config: &RunConfig) -> AggregateMetrics {
    let total_requests = (config.users as f64
        * config.requests_per_second
        * config.duration_secs as f64)
        .round() as u64;

    if samples.is_empty() {
        return AggregateMetrics {
            total_requests,
            successful_requests: total_requests,
            ..AggregateMetrics::default()
        };
    }

    let count = samples.len() as f64;
    let average_latency_ms = samples.iter().map(|s| s.latency_ms).sum::<f64>() / count;
    let average_throughput_rps = samples.iter().map(|s| s.throughput_rps).sum::<f64>() / count;
    let average_error_rate = samples.iter().map(|s| s.error_rate).sum::<f64>() / count;

    let mut sorted: Vec<f64> = samples.iter().map(|s| s.latency_ms).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("latency samples are finite"));
    let p95_latency_ms = nearest_rank(&sorted, 0.95).unwrap_or(average_latency_ms);
    let p99_latency_ms = nearest_rank(&sorted, 0.99).unwrap_or(average_latency_ms);

    let failed_requests =
        ((total_requests as f64 * average_error_rate).round() as u64).min(total_requests);

    AggregateMetrics {
        average_latency_ms,
        p95_latency_ms,
        p99_latency_ms,
        average_throughput_rps,
        average_error_rate,
        total_requests,
        // The rounding remainder lands on the success side so the split
        // always sums back to total_requests.
        successful_requests: total_requests - failed_requests,
        failed_requests,
    }
}

fn nearest_rank(sorted: &[f64], quantile: f64) -> Option<f64> {
    let idx = (quantile * sorted.len() as f64).floor() as usize;
    sorted.get(idx).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Component, ComponentType, Connection, FailureScenario, TrafficPattern,
    };
    use rand::SeedableRng;

    fn component(id: &str, kind: ComponentType) -> Component {
        Component {
            id: id.to_string(),
            kind,
            name: id.to_string(),
            position: None,
        }
    }

    fn connection(id: &str, source: &str, target: &str) -> Connection {
        Connection {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            kind: String::new(),
        }
    }

    fn line_topology() -> Topology {
        Topology {
            components: vec![
                component("lb", ComponentType::LoadBalancer),
                component("gw", ComponentType::ApiGateway),
                component("svc", ComponentType::Microservice),
                component("db", ComponentType::Database),
                component("cache", ComponentType::Cache),
            ],
            connections: vec![
                connection("e1", "lb", "gw"),
                connection("e2", "gw", "svc"),
                connection("e3", "svc", "db"),
                connection("e4", "svc", "cache"),
            ],
        }
    }

    fn config(duration_secs: u64, rps: f64) -> RunConfig {
        RunConfig {
            system_id: "sys".to_string(),
            duration_secs,
            users: 100,
            requests_per_second: rps,
            traffic_pattern: TrafficPattern::Constant,
            failure_scenarios: Vec::new(),
            seed: Some(1),
        }
    }

    #[test]
    fn series_length_is_capped_at_max_steps() {
        let params = EngineParams::default();
        let mut rng = StdRng::seed_from_u64(1);
        let short = generate_series(&config(60, 10.0), &line_topology(), &params, &mut rng);
        assert_eq!(short.len(), 60);

        let mut rng = StdRng::seed_from_u64(1);
        let long = generate_series(&config(7200, 10.0), &line_topology(), &params, &mut rng);
        assert_eq!(long.len(), 300);
    }

    #[test]
    fn constant_pattern_latency_stays_in_jitter_band() {
        // Base latency: 5 + 10 + 50 + 20 + 2 = 87, plus 2ms per edge = 95.
        let params = EngineParams::default();
        let mut rng = StdRng::seed_from_u64(42);
        let samples = generate_series(&config(60, 10.0), &line_topology(), &params, &mut rng);
        for sample in &samples {
            assert!(sample.latency_ms >= 85.0 && sample.latency_ms <= 105.0);
            assert_eq!(sample.throughput_rps, 10.0);
            assert_eq!(sample.error_rate, 0.01);
            assert_eq!(sample.network_kbps, 15.0);
        }
    }

    #[test]
    fn error_rate_escalates_with_traffic_bands() {
        let params = EngineParams::default();
        let cfg = config(10, 0.0);
        assert_eq!(step_error_rate(&cfg, 0.0, 100.0, params.error_rate_cap), 0.01);
        assert_eq!(step_error_rate(&cfg, 0.0, 300.0, params.error_rate_cap), 0.03);
        assert_eq!(step_error_rate(&cfg, 0.0, 600.0, params.error_rate_cap), 0.06);
    }

    #[test]
    fn failure_scenarios_apply_only_inside_their_windows() {
        let params = EngineParams::default();
        let mut cfg = config(10, 10.0);
        cfg.failure_scenarios = vec![
            FailureScenario {
                kind: FailureKind::NetworkPartition,
            },
            FailureScenario {
                kind: FailureKind::ServiceFailure,
            },
        ];
        assert_eq!(step_error_rate(&cfg, 0.1, 10.0, params.error_rate_cap), 0.01);
        assert!((step_error_rate(&cfg, 0.4, 10.0, params.error_rate_cap) - 0.11).abs() < 1e-9);
        assert!((step_error_rate(&cfg, 0.55, 10.0, params.error_rate_cap) - 0.31).abs() < 1e-9);
        assert_eq!(step_error_rate(&cfg, 0.9, 10.0, params.error_rate_cap), 0.01);
    }

    #[test]
    fn error_rate_is_clamped_to_cap() {
        let mut cfg = config(10, 600.0);
        cfg.failure_scenarios = vec![
            FailureScenario {
                kind: FailureKind::NetworkPartition,
            },
            FailureScenario {
                kind: FailureKind::NetworkPartition,
            },
            FailureScenario {
                kind: FailureKind::NetworkPartition,
            },
            FailureScenario {
                kind: FailureKind::ServiceFailure,
            },
            FailureScenario {
                kind: FailureKind::ServiceFailure,
            },
        ];
        let rate = step_error_rate(&cfg, 0.55, 600.0, 0.5);
        assert_eq!(rate, 0.5);
    }

    #[test]
    fn cpu_and_memory_stay_within_percent_bounds() {
        let params = EngineParams::default();
        let mut rng = StdRng::seed_from_u64(7);
        let samples = generate_series(&config(120, 5000.0), &line_topology(), &params, &mut rng);
        for sample in &samples {
            assert!(sample.cpu_pct >= 0.0 && sample.cpu_pct <= 100.0);
            assert!(sample.memory_pct >= 0.0 && sample.memory_pct <= 100.0);
        }
    }

    #[test]
    fn percentiles_are_ordered_and_bounded() {
        let params = EngineParams::default();
        let cfg = config(90, 50.0);
        let mut rng = StdRng::seed_from_u64(9);
        let samples = generate_series(&cfg, &line_topology(), &params, &mut rng);
        let metrics = aggregate(&samples, &cfg);

        let min = samples.iter().map(|s| s.latency_ms).fold(f64::MAX, f64::min);
        let max = samples.iter().map(|s| s.latency_ms).fold(f64::MIN, f64::max);
        assert!(metrics.p95_latency_ms <= metrics.p99_latency_ms);
        assert!(metrics.p95_latency_ms >= min && metrics.p99_latency_ms <= max);
    }

    #[test]
    fn request_split_reconciles_exactly() {
        let params = EngineParams::default();
        let mut cfg = config(60, 600.0);
        cfg.failure_scenarios = vec![FailureScenario {
            kind: FailureKind::NetworkPartition,
        }];
        let mut rng = StdRng::seed_from_u64(3);
        let samples = generate_series(&cfg, &line_topology(), &params, &mut rng);
        let metrics = aggregate(&samples, &cfg);

        assert_eq!(metrics.total_requests, 100 * 600 * 60);
        assert_eq!(
            metrics.successful_requests + metrics.failed_requests,
            metrics.total_requests
        );
        assert!(metrics.failed_requests > 0);
    }

    #[test]
    fn empty_series_aggregates_to_zeroes() {
        let cfg = config(60, 10.0);
        let metrics = aggregate(&[], &cfg);
        assert_eq!(metrics.average_latency_ms, 0.0);
        assert_eq!(metrics.p95_latency_ms, 0.0);
        assert_eq!(metrics.total_requests, 60_000);
        assert_eq!(metrics.successful_requests, 60_000);
        assert_eq!(metrics.failed_requests, 0);
    }

    #[test]
    fn seeded_series_are_identical() {
        let params = EngineParams::default();
        let cfg = config(60, 10.0);
        let mut rng_a = StdRng::seed_from_u64(11);
        let mut rng_b = StdRng::seed_from_u64(11);
        let a = generate_series(&cfg, &line_topology(), &params, &mut rng_a);
        let b = generate_series(&cfg, &line_topology(), &params, &mut rng_b);
        assert_eq!(a, b);
    }
}
