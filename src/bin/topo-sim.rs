use topo_sim::cli::{self, FormatArg};
use topo_sim::engine::run_simulation;
use topo_sim::error::Result;
use topo_sim::output::{Formatter, HumanFormatter, JsonFormatter, SummaryFormatter};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so formatted results stay clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args()?;
    let (scenario, format) = cli::build_scenario(args)?;
    let result = run_simulation(&scenario.run, &scenario.topology)?;

    let formatter = formatter_for(&format);
    print!("{}", formatter.write(&result)?);

    Ok(())
}

fn formatter_for(format: &FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}
