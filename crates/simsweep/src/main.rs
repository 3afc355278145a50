use clap::Parser;
use simsweep::{Args, RunConfig, execute, init_logging};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level)?;

    let config = RunConfig::from_args(&args)?;
    tracing::debug!(?config, "resolved configuration");

    let output = execute(&config, args.format)?;
    print!("{output}");

    Ok(())
}
