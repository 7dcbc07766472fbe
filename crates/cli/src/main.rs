use anyhow::Result;
use bitrix_tools::Runner;
use clap::Parser;

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    Runner::parse().command.execute()
}
