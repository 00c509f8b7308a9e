use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analyzer::{analyze_components, ComponentPerformance};
use crate::bottleneck::{detect_system_bottlenecks, Finding};
use crate::error::{Error, Result};
use crate::metrics::{aggregate, generate_series, AggregateMetrics, MetricSample};
use crate::models::{EngineParams, RunConfig, Topology};
use crate::recommend::synthesize;
use crate::resources::{estimate_resources, ResourceEstimate};
use crate::score::performance_score;
use crate::store::SeriesStore;

/// Terminal artifact of one run. Built once, never mutated; the caller owns
/// it and decides whether to persist or serialize it (snake_case throughout).
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SimulationResult {
    pub simulation_id: String,
    pub system_id: String,
    pub metrics: AggregateMetrics,
    pub components: BTreeMap<String, ComponentPerformance>,
    pub resources: ResourceEstimate,
    pub bottlenecks: Vec<Finding>,
    pub recommendations: Vec<String>,
    pub performance_score: u32,
    /// Seed the jitter was drawn from; replaying with it reproduces
    /// everything except `executed_at` and `execution_ms`.
    pub seed: u64,
    pub executed_at: u64,
    pub execution_ms: u64,
}

/// Runs simulations and retains their step series for later polling. Each
/// run is pure, synchronous and CPU-bound; engines are cheap to share across
/// threads since the only shared state is the series store.
pub struct SimulationEngine {
    params: EngineParams,
    store: Arc<SeriesStore>,
    run_seq: AtomicU64,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(EngineParams::default())
    }
}

impl SimulationEngine {
    pub fn new(params: EngineParams) -> Self {
        Self::with_store(params, Arc::new(SeriesStore::new()))
    }

    /// Injects a shared store so several engines (or an outer service) can
    /// retain and sweep series together.
    pub fn with_store(params: EngineParams, store: Arc<SeriesStore>) -> Self {
        Self {
            params,
            store,
            run_seq: AtomicU64::new(1),
        }
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    pub fn run(&self, config: &RunConfig, topology: &Topology) -> Result<SimulationResult> {
        validate_config(config)?;
        let started = Instant::now();
        let seed = config.seed.unwrap_or_else(time_based_seed);
        let simulation_id = format!(
            "{}-run-{}",
            config.system_id,
            self.run_seq.fetch_add(1, Ordering::Relaxed)
        );

        // An empty system is a valid design-time state: degenerate series,
        // zero-valued metrics, no findings.
        let samples = if topology.components.is_empty() {
            Vec::new()
        } else {
            let mut rng = StdRng::seed_from_u64(seed);
            generate_series(config, topology, &self.params, &mut rng)
        };
        debug!(
            simulation_id = %simulation_id,
            steps = samples.len(),
            components = topology.components.len(),
            "generated step series"
        );

        let metrics = aggregate(&samples, config);
        let components = analyze_components(topology, config);
        let bottlenecks = detect_system_bottlenecks(&components, topology);
        let resources = estimate_resources(topology, config, &self.params.cost_rates);
        let recommendations = synthesize(&bottlenecks, &components, topology);
        let bottleneck_count = components
            .values()
            .map(|perf| perf.bottlenecks.len())
            .sum::<usize>();
        let performance_score =
            performance_score(&metrics, config.duration_secs, bottleneck_count);

        self.store.insert(&simulation_id, samples);

        let result = SimulationResult {
            simulation_id,
            system_id: config.system_id.clone(),
            metrics,
            components,
            resources,
            bottlenecks,
            recommendations,
            performance_score,
            seed,
            executed_at: unix_seconds(),
            execution_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            simulation_id = %result.simulation_id,
            score = result.performance_score,
            bottlenecks = result.bottlenecks.len(),
            "simulation complete"
        );
        Ok(result)
    }

    /// Retained step series for a finished run, if it has not been purged.
    pub fn series(&self, simulation_id: &str) -> Result<Vec<MetricSample>> {
        self.store
            .get(simulation_id)
            .ok_or_else(|| Error::SeriesNotFound(simulation_id.to_string()))
    }

    /// Caller-triggered sweep of retained series older than `max_age_secs`.
    pub fn purge_older_than(&self, max_age_secs: u64) -> usize {
        self.store.purge_older_than(Duration::from_secs(max_age_secs))
    }

    /// Sweep using the configured retention window.
    pub fn purge_expired(&self) -> usize {
        self.purge_older_than(self.params.retention_secs)
    }

    pub fn store(&self) -> Arc<SeriesStore> {
        Arc::clone(&self.store)
    }
}

/// One-shot convenience wrapper around a throwaway engine.
pub fn run_simulation(config: &RunConfig, topology: &Topology) -> Result<SimulationResult> {
    SimulationEngine::default().run(config, topology)
}

/// Defensive re-validation; the caller is supposed to have checked these
/// already.
fn validate_config(config: &RunConfig) -> Result<()> {
    if config.duration_secs == 0 {
        return Err(Error::InvalidDuration);
    }
    if !config.requests_per_second.is_finite() || config.requests_per_second < 0.0 {
        return Err(Error::InvalidRequestRate(config.requests_per_second));
    }
    Ok(())
}

fn time_based_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
