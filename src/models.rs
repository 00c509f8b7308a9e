use serde::{Deserialize, Serialize};

/// Component categories recognized by the coefficient tables. Anything else
/// deserializes as `Unknown` and picks up the default coefficients, so
/// forward-compatible topologies still simulate instead of failing.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ComponentType {
    LoadBalancer,
    ApiGateway,
    Microservice,
    Database,
    Cache,
    MessageQueue,
    MlModel,
    Unknown,
}

impl From<String> for ComponentType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "load_balancer" => ComponentType::LoadBalancer,
            "api_gateway" => ComponentType::ApiGateway,
            "microservice" => ComponentType::Microservice,
            "database" => ComponentType::Database,
            "cache" => ComponentType::Cache,
            "message_queue" => ComponentType::MessageQueue,
            "ml_model" => ComponentType::MlModel,
            _ => ComponentType::Unknown,
        }
    }
}

/// Canvas coordinates from the editor. Cosmetic; the engine never reads them.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Component {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub name: String,
    #[serde(default)]
    pub position: Option<Position>,
}

/// Directed edge between two components. Consulted as a flat list for hop
/// latency and per-edge traffic checks, never traversed as a graph.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Connection {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Topology {
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

/// Request-rate shape over the run's progress. Unrecognized names fall back
/// to `Constant` rather than erroring.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum TrafficPattern {
    #[default]
    Constant,
    Gradual,
    Spike,
}

impl From<String> for TrafficPattern {
    fn from(value: String) -> Self {
        match value.as_str() {
            "gradual" => TrafficPattern::Gradual,
            "spike" => TrafficPattern::Spike,
            _ => TrafficPattern::Constant,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NetworkPartition,
    ServiceFailure,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FailureScenario {
    #[serde(rename = "type")]
    pub kind: FailureKind,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RunConfig {
    pub system_id: String,
    pub duration_secs: u64,
    #[serde(default)]
    pub users: u64,
    pub requests_per_second: f64,
    #[serde(default)]
    pub traffic_pattern: TrafficPattern,
    #[serde(default)]
    pub failure_scenarios: Vec<FailureScenario>,
    /// Seeds all jitter. Unset means a time-based seed: the run is still
    /// valid, just not reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Tunable knobs with documented defaults. None of these are derived from a
/// calibrated model; they are design-time heuristics.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EngineParams {
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,
    #[serde(default = "default_latency_jitter_ms")]
    pub latency_jitter_ms: f64,
    #[serde(default = "default_cpu_jitter_pct")]
    pub cpu_jitter_pct: f64,
    #[serde(default = "default_memory_jitter_pct")]
    pub memory_jitter_pct: f64,
    #[serde(default = "default_error_rate_cap")]
    pub error_rate_cap: f64,
    /// Retained step series older than this are dropped by a purge sweep.
    #[serde(default = "default_retention_secs")]
    pub retention_secs: u64,
    #[serde(default)]
    pub cost_rates: CostRates,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            latency_jitter_ms: default_latency_jitter_ms(),
            cpu_jitter_pct: default_cpu_jitter_pct(),
            memory_jitter_pct: default_memory_jitter_pct(),
            error_rate_cap: default_error_rate_cap(),
            retention_secs: default_retention_secs(),
            cost_rates: CostRates::default(),
        }
    }
}

/// Hourly USD rates per resource unit. A linear provider-agnostic
/// approximation, not a cloud pricing lookup.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct CostRates {
    #[serde(default = "default_cpu_rate")]
    pub cpu_hourly: f64,
    #[serde(default = "default_memory_rate")]
    pub memory_hourly: f64,
    #[serde(default = "default_storage_rate")]
    pub storage_hourly: f64,
    #[serde(default = "default_network_rate")]
    pub network_hourly: f64,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            cpu_hourly: default_cpu_rate(),
            memory_hourly: default_memory_rate(),
            storage_hourly: default_storage_rate(),
            network_hourly: default_network_rate(),
        }
    }
}

fn default_max_steps() -> u64 {
    300
}

fn default_latency_jitter_ms() -> f64 {
    10.0
}

fn default_cpu_jitter_pct() -> f64 {
    5.0
}

fn default_memory_jitter_pct() -> f64 {
    2.5
}

fn default_error_rate_cap() -> f64 {
    0.5
}

fn default_retention_secs() -> u64 {
    3600
}

fn default_cpu_rate() -> f64 {
    0.05
}

fn default_memory_rate() -> f64 {
    0.01
}

fn default_storage_rate() -> f64 {
    0.001
}

fn default_network_rate() -> f64 {
    0.02
}
