use std::collections::HashSet;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{load_scenario, Scenario};
use crate::error::{Error, Result};
use crate::models::{
    Component, ComponentType, Connection, FailureKind, FailureScenario, RunConfig, Topology,
    TrafficPattern,
};

#[derive(Parser, Debug)]
#[command(name = "topo-sim", about = "Synthetic performance forecast for a system topology")]
pub struct Args {
    /// Scenario file (.toml or .json) with run settings and topology.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Inline component as name:type (e.g. edge:load_balancer). Repeatable.
    #[arg(long = "component")]
    pub components: Vec<String>,
    /// Inline directed connection as source:target. Repeatable.
    #[arg(long = "connection")]
    pub connections: Vec<String>,
    #[arg(long)]
    pub system_id: Option<String>,
    /// Simulated duration in seconds.
    #[arg(long)]
    pub duration: Option<u64>,
    #[arg(long)]
    pub users: Option<u64>,
    /// Baseline requests per second before the traffic pattern applies.
    #[arg(long)]
    pub rps: Option<f64>,
    #[arg(long, value_enum)]
    pub pattern: Option<TrafficPattern>,
    /// Failure scenario to inject. Repeatable.
    #[arg(long = "fail", value_enum)]
    pub failures: Vec<FailureKind>,
    /// Seed for jitter; omit for a time-based seed (non-reproducible run).
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, value_enum, default_value = "human")]
    pub format: FormatArg,
}

#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Human,
    Summary,
    Json,
}

pub fn parse_args() -> Result<Args> {
    Args::try_parse().map_err(|err| Error::Cli(err.to_string()))
}

/// Resolves a scenario from the file and/or inline flags. Inline flags win
/// over file values.
pub fn build_scenario(args: Args) -> Result<(Scenario, FormatArg)> {
    let mut scenario = match &args.config {
        Some(path) => load_scenario(path)?,
        None => Scenario {
            run: RunConfig {
                system_id: "adhoc".to_string(),
                duration_secs: 60,
                users: 0,
                requests_per_second: 10.0,
                traffic_pattern: TrafficPattern::Constant,
                failure_scenarios: Vec::new(),
                seed: None,
            },
            topology: Topology::default(),
        },
    };

    if !args.components.is_empty() {
        scenario.topology = Topology {
            components: parse_components(&args.components)?,
            connections: Vec::new(),
        };
    }
    if !args.connections.is_empty() {
        scenario.topology.connections =
            parse_connections(&args.connections, &scenario.topology.components)?;
    }

    if let Some(system_id) = args.system_id {
        scenario.run.system_id = system_id;
    }
    if let Some(duration) = args.duration {
        scenario.run.duration_secs = duration;
    }
    if let Some(users) = args.users {
        scenario.run.users = users;
    }
    if let Some(rps) = args.rps {
        scenario.run.requests_per_second = rps;
    }
    if let Some(pattern) = args.pattern {
        scenario.run.traffic_pattern = pattern;
    }
    if !args.failures.is_empty() {
        scenario.run.failure_scenarios = args
            .failures
            .into_iter()
            .map(|kind| FailureScenario { kind })
            .collect();
    }
    if args.seed.is_some() {
        scenario.run.seed = args.seed;
    }

    Ok((scenario, args.format))
}

pub fn parse_components(entries: &[String]) -> Result<Vec<Component>> {
    let mut components = Vec::with_capacity(entries.len());
    let mut ids = HashSet::new();

    for entry in entries {
        let trimmed = entry.trim();
        let mut parts = trimmed.split(':');
        let name = parts.next().unwrap_or("").trim();
        let kind = parts.next().unwrap_or("").trim();
        if parts.next().is_some() || name.is_empty() || kind.is_empty() {
            return Err(Error::InvalidComponentEntry(trimmed.to_string()));
        }
        if !ids.insert(name.to_string()) {
            return Err(Error::DuplicateComponentId(name.to_string()));
        }
        components.push(Component {
            id: name.to_string(),
            kind: ComponentType::from(kind.to_string()),
            name: name.to_string(),
            position: None,
        });
    }

    Ok(components)
}

pub fn parse_connections(
    entries: &[String],
    components: &[Component],
) -> Result<Vec<Connection>> {
    let ids: HashSet<&str> = components.iter().map(|c| c.id.as_str()).collect();
    let mut connections = Vec::with_capacity(entries.len());

    for entry in entries {
        let trimmed = entry.trim();
        let mut parts = trimmed.split(':');
        let source = parts.next().unwrap_or("").trim();
        let target = parts.next().unwrap_or("").trim();
        if parts.next().is_some() || source.is_empty() || target.is_empty() {
            return Err(Error::InvalidConnectionEntry(trimmed.to_string()));
        }
        for endpoint in [source, target] {
            if !ids.contains(endpoint) {
                return Err(Error::UnknownEndpoint(
                    trimmed.to_string(),
                    endpoint.to_string(),
                ));
            }
        }
        connections.push(Connection {
            id: format!("{}-{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            kind: String::new(),
        });
    }

    Ok(connections)
}
